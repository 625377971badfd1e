//! The application state and its command handlers.
//!
//! `App` owns the in-memory collections, the draft forms, the selected service and the
//! notification area. Every handler takes `&mut self`, so one event is fully handled before the
//! next one starts. Mutating handlers write the whole affected collection back to storage and
//! report their outcome through the `Notifier`.

use crate::commands::Out;
use crate::domain::{aggregate, append, remove_by_id, Placement};
use crate::error::{denied, error_type, invalid, ErrorType};
use crate::forms::{BookingForm, DateBounds, TransactionForm};
use crate::model::{Appointment, Service, Transaction};
use crate::notify::Notifier;
use crate::session::{AdminGate, Session};
use crate::store::{FileStorage, Store, APPOINTMENTS, TRANSACTIONS};
use crate::views::{
    appointment_list, service_options, transaction_list, AppointmentRow, BookingSummary,
    ListView, PanelView, ServiceOption, StatsView, TransactionRow,
};
use crate::{Config, Error, Result};
use chrono::{Local, NaiveDate, Utc};
use tracing::{debug, error};

/// Shown for failures that are not the user's to fix.
pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred";

#[derive(Debug)]
pub struct App {
    config: Config,
    store: Store,
    session: Session,
    gate: AdminGate,
    notifier: Notifier,
    transactions: Vec<Transaction>,
    appointments: Vec<Appointment>,
    booking: BookingForm,
    selected: Option<Service>,
    summary: BookingSummary,
    transaction_form: TransactionForm,
}

impl App {
    /// Opens the durable storage and session under the home directory described by `config`.
    pub async fn open(config: Config) -> Result<Self> {
        let store = Store::new(FileStorage::open(config.storage()).await?);
        let session = Session::new(FileStorage::open(config.session()).await?);
        Ok(Self::with_storage(config, store, session).await)
    }

    /// Builds the application over the given storage, loading both collections.
    pub async fn with_storage(config: Config, store: Store, session: Session) -> Self {
        let mut app = Self {
            gate: AdminGate::new(config.admin_password()),
            notifier: Notifier::new(config.notification_timeout()),
            transaction_form: TransactionForm::new(today()),
            config,
            store,
            session,
            transactions: Vec::new(),
            appointments: Vec::new(),
            booking: BookingForm::default(),
            selected: None,
            summary: BookingSummary::placeholder(),
        };
        app.reload().await;
        app
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Re-reads both collections from storage.
    pub async fn reload(&mut self) {
        self.transactions = self.store.load(TRANSACTIONS).await;
        self.appointments = self.store.load(APPOINTMENTS).await;
        debug!(
            "Loaded {} transaction(s) and {} appointment(s)",
            self.transactions.len(),
            self.appointments.len()
        );
    }

    fn succeed<T>(&self, out: Out<T>) -> Result<Out<T>>
    where
        T: serde::Serialize + Clone + std::fmt::Debug,
    {
        self.notifier.success(out.message());
        Ok(out)
    }

    /// Reports `e` in the notification area and hands it back.
    fn fail<T>(&self, e: Error) -> Result<T> {
        match error_type(&e) {
            ErrorType::Internal => {
                error!("Unexpected error: {e:#}");
                self.notifier.error(UNEXPECTED_ERROR);
            }
            _ => self.notifier.error(e.to_string()),
        }
        Err(e)
    }

    /// The dates the booking date picker offers.
    pub fn booking_bounds(&self) -> DateBounds {
        DateBounds::new(today(), self.config.booking_window_months())
    }

    pub fn booking(&self) -> &BookingForm {
        &self.booking
    }

    pub fn booking_mut(&mut self) -> &mut BookingForm {
        &mut self.booking
    }

    pub fn selected_service(&self) -> Option<&Service> {
        self.selected.as_ref()
    }

    pub fn summary(&self) -> &BookingSummary {
        &self.summary
    }

    pub fn service_options(&self) -> Vec<ServiceOption> {
        service_options(
            self.config.services(),
            self.selected.as_ref().map(Service::id),
            self.config.currency(),
        )
    }

    /// Marks the catalog service `id` as the chosen one and mirrors it into the booking form and
    /// the summary panel.
    pub fn select_service(&mut self, id: &str) -> Result<BookingSummary> {
        let Some(service) = self.config.services().iter().find(|s| s.id() == id).cloned() else {
            return self.fail(invalid(format!("There is no service '{id}'")));
        };
        self.booking.service = service.name().to_string();
        self.summary = BookingSummary::for_service(&service, self.config.currency());
        self.selected = Some(service);
        Ok(self.summary.clone())
    }

    /// Validates the booking form and stores the appointment. On failure the form, the selection
    /// and the collection are left as they were.
    pub async fn submit_booking(&mut self) -> Result<Out<Appointment>> {
        match self.try_submit_booking().await {
            Ok(out) => self.succeed(out),
            Err(e) => self.fail(e),
        }
    }

    async fn try_submit_booking(&mut self) -> Result<Out<Appointment>> {
        let appointment = self.booking.submit(self.selected.as_ref(), Utc::now())?;

        append(&mut self.appointments, appointment.clone(), Placement::Back);
        if let Err(e) = self.store.save(APPOINTMENTS, &self.appointments).await {
            let _ = self.appointments.pop();
            return Err(e);
        }

        self.booking.reset();
        self.selected = None;
        self.summary = BookingSummary::placeholder();
        Ok(Out::new(
            "Appointment booked! We will contact you soon.",
            appointment,
        ))
    }

    pub async fn is_admin(&self) -> bool {
        self.session.is_admin().await
    }

    async fn require_admin(&self) -> Result<()> {
        if self.is_admin().await {
            Ok(())
        } else {
            Err(denied("Admin access required, please log in"))
        }
    }

    /// Compares `password` with the configured one and, on a match, sets the session flag and
    /// returns the admin panel.
    pub async fn login(&mut self, password: &str) -> Result<Out<PanelView>> {
        if !self.gate.check(password) {
            return self.fail(denied("Incorrect password"));
        }
        if let Err(e) = self.session.set_admin().await {
            return self.fail(e);
        }
        self.succeed(Out::new("Access granted", self.panel()))
    }

    pub async fn logout(&mut self) -> Result<Out<()>> {
        match self.session.clear().await {
            Ok(()) => self.succeed(Out::new_message("Logged out")),
            Err(e) => self.fail(e),
        }
    }

    pub fn stats(&self) -> StatsView {
        StatsView::new(
            &aggregate(&self.transactions),
            self.appointments.len(),
            self.config.currency(),
        )
    }

    pub fn transaction_view(&self) -> ListView<TransactionRow> {
        transaction_list(
            &self.transactions,
            self.config.recent_transactions(),
            self.config.currency(),
            self.config.locale(),
        )
    }

    pub fn appointment_view(&self) -> ListView<AppointmentRow> {
        appointment_list(
            &self.appointments,
            self.config.currency(),
            self.config.locale(),
        )
    }

    pub fn panel(&self) -> PanelView {
        PanelView {
            stats: self.stats(),
            transactions: self.transaction_view(),
            appointments: self.appointment_view(),
        }
    }

    /// The admin panel, or an access error when the session flag is not set.
    pub async fn admin_panel(&self) -> Result<PanelView> {
        match self.require_admin().await {
            Ok(()) => Ok(self.panel()),
            Err(e) => self.fail(e),
        }
    }

    /// Called when the admin view comes back into view. After the configured delay, reloads the
    /// collections and re-derives the panel, provided the admin is still logged in.
    pub async fn on_visible(&mut self) -> Option<PanelView> {
        tokio::time::sleep(self.config.refresh_delay()).await;
        if !self.is_admin().await {
            return None;
        }
        self.reload().await;
        Some(self.panel())
    }

    pub fn transaction_form(&self) -> &TransactionForm {
        &self.transaction_form
    }

    pub fn transaction_form_mut(&mut self) -> &mut TransactionForm {
        &mut self.transaction_form
    }

    /// Validates the transaction form and stores the transaction as the newest entry. Returns the
    /// refreshed statistics.
    pub async fn submit_transaction(&mut self) -> Result<Out<StatsView>> {
        match self.try_submit_transaction().await {
            Ok(out) => self.succeed(out),
            Err(e) => self.fail(e),
        }
    }

    async fn try_submit_transaction(&mut self) -> Result<Out<StatsView>> {
        self.require_admin().await?;
        let transaction = self.transaction_form.submit(self.config.currency())?;

        append(&mut self.transactions, transaction, Placement::Front);
        if let Err(e) = self.store.save(TRANSACTIONS, &self.transactions).await {
            let _ = self.transactions.remove(0);
            return Err(e);
        }

        self.transaction_form.reset(today());
        Ok(Out::new("Transaction added", self.stats()))
    }

    /// Deletes the transaction `id`. An unknown id changes nothing and is not an error.
    pub async fn delete_transaction(&mut self, id: &str) -> Result<Out<usize>> {
        match self.try_delete_transaction(id).await {
            Ok(out) => self.succeed(out),
            Err(e) => self.fail(e),
        }
    }

    async fn try_delete_transaction(&mut self, id: &str) -> Result<Out<usize>> {
        self.require_admin().await?;
        let mut remaining = self.transactions.clone();
        let removed = remove_by_id(&mut remaining, id);
        if removed == 0 {
            return Ok(Out::new(format!("No transaction with id '{id}'"), 0));
        }
        self.store.save(TRANSACTIONS, &remaining).await?;
        self.transactions = remaining;
        Ok(Out::new("Transaction deleted", removed))
    }

    /// Deletes the appointment `id`. An unknown id changes nothing and is not an error.
    pub async fn delete_appointment(&mut self, id: &str) -> Result<Out<usize>> {
        match self.try_delete_appointment(id).await {
            Ok(out) => self.succeed(out),
            Err(e) => self.fail(e),
        }
    }

    async fn try_delete_appointment(&mut self, id: &str) -> Result<Out<usize>> {
        self.require_admin().await?;
        let mut remaining = self.appointments.clone();
        let removed = remove_by_id(&mut remaining, id);
        if removed == 0 {
            return Ok(Out::new(format!("No appointment with id '{id}'"), 0));
        }
        self.store.save(APPOINTMENTS, &remaining).await?;
        self.appointments = remaining;
        Ok(Out::new("Appointment deleted", removed))
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
