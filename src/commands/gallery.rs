use crate::commands::Out;
use crate::gallery::{filter, GalleryFilter};
use crate::views::{gallery_list, GalleryRow, ListView};
use crate::Config;

/// The gallery items visible under `category`, or all of them.
pub fn gallery(config: &Config, category: Option<&str>) -> Out<ListView<GalleryRow>> {
    let filter_by = GalleryFilter::from(category.map(str::to_string));
    let view = gallery_list(filter(config.gallery(), &filter_by));
    Out::new(
        format!("Showing {} of the gallery", filter_by),
        view,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_gallery() {
        let env = TestEnv::new().await;
        let config = env.config();
        let all = gallery(&config, None);
        assert_eq!(all.structure().unwrap().rows().len(), config.gallery().len());

        let lashes = gallery(&config, Some("lashes"));
        assert_eq!(lashes.message(), "Showing lashes of the gallery");
        assert_eq!(lashes.structure().unwrap().rows().len(), 2);

        let none = gallery(&config, Some("hair"));
        assert!(none.structure().unwrap().placeholder().is_some());
    }
}
