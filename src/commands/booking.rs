//! The customer-facing commands: the service catalog and booking.

use crate::args::BookArgs;
use crate::commands::Out;
use crate::model::Appointment;
use crate::views::{BookingSummary, ServiceOption};
use crate::{App, Result};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// The service selector as printed by `salon services`.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct ServiceList(pub Vec<ServiceOption>);

impl Display for ServiceList {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (ix, option) in self.0.iter().enumerate() {
            if ix > 0 {
                writeln!(f)?;
            }
            write!(f, "{option}")?;
        }
        Ok(())
    }
}

pub fn services(app: &App) -> Out<ServiceList> {
    let options = app.service_options();
    Out::new(
        format!("{} service(s) available", options.len()),
        ServiceList(options),
    )
}

/// Selects a catalog service and returns the booking summary it produces.
pub fn select(app: &mut App, service_id: &str) -> Result<Out<BookingSummary>> {
    let summary = app.select_service(service_id)?;
    Ok(Out::new(format!("Selected '{}'", summary.service), summary))
}

/// Fills the booking form from `args` and submits it.
pub async fn book(app: &mut App, args: &BookArgs) -> Result<Out<Appointment>> {
    if let Some(id) = &args.service_id {
        let _ = app.select_service(id)?;
    }
    let form = app.booking_mut();
    form.name = args.name.clone();
    form.phone = args.phone.clone();
    form.email = args.email.clone().unwrap_or_default();
    if let Some(service) = &args.service {
        form.service = service.clone();
    }
    form.date = args.date.clone();
    form.time = args.time.clone();
    form.notes = args.notes.clone().unwrap_or_default();
    app.submit_booking().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    fn ana() -> BookArgs {
        BookArgs {
            name: "Ana".into(),
            phone: "600111222".into(),
            service_id: Some("manicure".into()),
            date: "2025-06-01".into(),
            time: "10:00".into(),
            ..BookArgs::default()
        }
    }

    #[tokio::test]
    async fn test_services() {
        let env = TestEnv::new().await;
        let app = env.app().await;
        let out = services(&app);
        let list = out.structure().unwrap();
        assert_eq!(list.0.len(), 5);
        assert!(list.to_string().contains("Manicure"));
    }

    #[tokio::test]
    async fn test_select() {
        let env = TestEnv::new().await;
        let mut app = env.app().await;
        let out = select(&mut app, "eyelash-extensions").unwrap();
        assert_eq!(out.structure().unwrap().duration, "90 minutes");
        assert!(select(&mut app, "nope").is_err());
    }

    #[tokio::test]
    async fn test_book() {
        let env = TestEnv::new().await;
        let mut app = env.app().await;
        let out = book(&mut app, &ana()).await.unwrap();
        assert_eq!(out.structure().unwrap().service(), "Manicure");
        assert_eq!(env.app().await.appointments().len(), 1);
    }

    #[tokio::test]
    async fn test_book_free_text_service() {
        let env = TestEnv::new().await;
        let mut app = env.app().await;
        let args = BookArgs {
            service_id: None,
            service: Some("Brow tint".into()),
            notes: Some("First visit".into()),
            ..ana()
        };
        let out = book(&mut app, &args).await.unwrap();
        let appointment = out.structure().unwrap();
        assert_eq!(appointment.service(), "Brow tint");
        assert!(appointment.price().is_zero());
        assert_eq!(appointment.notes(), Some("First visit"));
    }

    #[tokio::test]
    async fn test_book_missing_phone() {
        let env = TestEnv::new().await;
        let mut app = env.app().await;
        let args = BookArgs {
            phone: String::new(),
            ..ana()
        };
        assert!(book(&mut app, &args).await.is_err());
        assert!(app.appointments().is_empty());
    }
}
