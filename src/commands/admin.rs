//! The admin session and the admin panel.

use crate::commands::Out;
use crate::views::{PanelView, StatsView};
use crate::{App, Result};
use std::future::Future;
use tracing::debug;

pub async fn login(app: &mut App, password: &str) -> Result<Out<PanelView>> {
    app.login(password).await
}

pub async fn logout(app: &mut App) -> Result<Out<()>> {
    app.logout().await
}

/// The admin panel as it is right now.
pub async fn panel(app: &App) -> Result<Out<PanelView>> {
    let view = app.admin_panel().await?;
    Ok(Out::new("Admin panel", view))
}

/// Re-renders the admin panel each time `App::on_visible` yields a fresh one, until `shutdown`
/// completes or the admin session ends.
pub async fn follow_panel<F>(
    app: &mut App,
    shutdown: F,
    mut render: impl FnMut(&PanelView),
) -> Result<Out<usize>>
where
    F: Future<Output = ()>,
{
    render(&app.admin_panel().await?);
    tokio::pin!(shutdown);
    let mut refreshes = 0usize;
    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            view = app.on_visible() => match view {
                Some(view) => {
                    refreshes += 1;
                    debug!("Refresh {refreshes} of the admin panel");
                    render(&view);
                }
                None => {
                    return Ok(Out::new(
                        "The admin session ended, stopped following",
                        refreshes,
                    ))
                }
            },
        }
    }
    Ok(Out::new("Stopped following the admin panel", refreshes))
}

pub async fn stats(app: &App) -> Result<Out<StatsView>> {
    let view = app.admin_panel().await?;
    Ok(Out::new("Statistics", view.stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;
    use std::time::Duration;

    #[tokio::test]
    async fn test_panel_requires_login() {
        let env = TestEnv::new().await;
        let mut app = env.app().await;
        assert!(panel(&app).await.is_err());
        assert!(stats(&app).await.is_err());

        login(&mut app, "admin123").await.unwrap();
        assert!(panel(&app).await.is_ok());
        assert_eq!(stats(&app).await.unwrap().structure().unwrap().balance, "0.00€");

        logout(&mut app).await.unwrap();
        assert!(panel(&app).await.is_err());
    }

    #[tokio::test]
    async fn test_follow_panel_picks_up_changes() {
        let env = TestEnv::new().await;
        let mut app = env.admin_app().await;
        let mut incomes = Vec::new();

        let seeded = async {
            env.seed_transactions().await;
            tokio::time::sleep(Duration::from_millis(200)).await;
        };
        let out = follow_panel(&mut app, seeded, |view| {
            incomes.push(view.stats.total_income.clone())
        })
        .await
        .unwrap();

        assert!(*out.structure().unwrap() > 0);
        assert_eq!(incomes.first().map(String::as_str), Some("0.00€"));
        assert_eq!(incomes.last().map(String::as_str), Some("100.00€"));
    }

    #[tokio::test]
    async fn test_follow_panel_stops_on_logout() {
        let env = TestEnv::new().await;
        let mut app = env.admin_app().await;
        let mut other = env.app().await;
        let logout_elsewhere = async {
            logout(&mut other).await.unwrap();
            std::future::pending::<()>().await
        };

        let out = follow_panel(&mut app, logout_elsewhere, |_| {})
            .await
            .unwrap();
        assert_eq!(out.message(), "The admin session ended, stopped following");
        assert!(!app.is_admin().await);
    }
}
