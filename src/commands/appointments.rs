use crate::commands::Out;
use crate::views::{AppointmentRow, ListView};
use crate::{App, Result};

/// Every booked appointment, in booking order.
pub async fn list_appointments(app: &App) -> Result<Out<ListView<AppointmentRow>>> {
    let panel = app.admin_panel().await?;
    Ok(Out::new(
        format!("{} appointment(s) booked", panel.stats.appointment_count),
        panel.appointments,
    ))
}

pub async fn delete_appointment(app: &mut App, id: &str) -> Result<Out<usize>> {
    app.delete_appointment(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::BookArgs;
    use crate::commands::book;
    use crate::test::TestEnv;
    use crate::views::NO_APPOINTMENTS;

    #[tokio::test]
    async fn test_list_and_delete() {
        let env = TestEnv::new().await;
        let mut app = env.admin_app().await;
        let args = BookArgs {
            name: "Ana".into(),
            phone: "600111222".into(),
            email: Some("ana@example.com".into()),
            service_id: Some("pedicure".into()),
            date: "2025-06-01".into(),
            time: "16:30".into(),
            ..BookArgs::default()
        };
        book(&mut app, &args).await.unwrap();

        let out = list_appointments(&app).await.unwrap();
        assert_eq!(out.message(), "1 appointment(s) booked");
        let rows = out.structure().unwrap().rows();
        assert_eq!(rows[0].when, "June 1, 2025 at 16:30");
        assert_eq!(rows[0].price, "25€");
        let id = rows[0].id.clone();

        let out = delete_appointment(&mut app, &id).await.unwrap();
        assert_eq!(out.structure(), Some(&1));
        let out = list_appointments(&app).await.unwrap();
        assert_eq!(out.structure().unwrap().placeholder(), Some(NO_APPOINTMENTS));
    }

    #[tokio::test]
    async fn test_list_requires_admin() {
        let env = TestEnv::new().await;
        let app = env.app().await;
        assert!(list_appointments(&app).await.is_err());
    }
}
