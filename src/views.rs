//! Projections of the collections into display fragments.
//!
//! Views own no state. Each one is built from the current collections and can be printed
//! (`Display`) or returned as structured output (`Serialize`).

use crate::domain::Totals;
use crate::gallery::GalleryItem;
use crate::model::{Appointment, Service, Transaction};
use chrono::{Locale, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const NO_TRANSACTIONS: &str = "No transactions recorded";
pub const NO_APPOINTMENTS: &str = "No appointments booked";
pub const NO_GALLERY_ITEMS: &str = "No work to show in this category";

const NOT_SELECTED: &str = "Not selected";
const NONE_MARK: &str = "-";

/// Selects month names and field order for formatted dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateLocale {
    #[default]
    #[serde(rename = "en_US")]
    EnUs,
    #[serde(rename = "es_ES")]
    EsEs,
}

impl DateLocale {
    /// Long month name with numeric day and year, e.g. `June 1, 2025` or `1 de junio de 2025`.
    /// Only for display, order by the `NaiveDate` itself.
    pub fn format(&self, date: NaiveDate) -> String {
        let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
        match self {
            DateLocale::EnUs => midnight
                .format_localized("%B %-d, %Y", Locale::en_US)
                .to_string(),
            DateLocale::EsEs => midnight
                .format_localized("%-d de %B de %Y", Locale::es_ES)
                .to_string(),
        }
    }

    fn at(&self) -> &'static str {
        match self {
            DateLocale::EnUs => "at",
            DateLocale::EsEs => "a las",
        }
    }
}

/// Either the rows of a list or the placeholder shown instead of an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ListView<T> {
    Empty { placeholder: String },
    Rows(Vec<T>),
}

impl<T> ListView<T> {
    fn new(rows: Vec<T>, placeholder: &str) -> Self {
        if rows.is_empty() {
            ListView::Empty {
                placeholder: placeholder.to_string(),
            }
        } else {
            ListView::Rows(rows)
        }
    }

    pub fn rows(&self) -> &[T] {
        match self {
            ListView::Empty { .. } => &[],
            ListView::Rows(rows) => rows,
        }
    }

    pub fn placeholder(&self) -> Option<&str> {
        match self {
            ListView::Empty { placeholder } => Some(placeholder),
            ListView::Rows(_) => None,
        }
    }
}

impl<T: Display> Display for ListView<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ListView::Empty { placeholder } => f.write_str(placeholder),
            ListView::Rows(rows) => {
                for (ix, row) in rows.iter().enumerate() {
                    if ix > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{row}")?;
                }
                Ok(())
            }
        }
    }
}

/// How the balance figure is drawn. Display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceState {
    NonNegative,
    Negative,
}

/// The statistics panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatsView {
    pub total_income: String,
    pub total_expense: String,
    pub balance: String,
    pub balance_state: BalanceState,
    pub appointment_count: usize,
}

impl StatsView {
    pub fn new(totals: &Totals, appointment_count: usize, currency: &str) -> Self {
        Self {
            total_income: totals.total_income.with_currency(currency),
            total_expense: totals.total_expense.with_currency(currency),
            balance: totals.balance.with_currency(currency),
            balance_state: if totals.balance.is_negative() {
                BalanceState::Negative
            } else {
                BalanceState::NonNegative
            },
            appointment_count,
        }
    }
}

impl Display for StatsView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let marker = match self.balance_state {
            BalanceState::NonNegative => "",
            BalanceState::Negative => " (negative)",
        };
        writeln!(f, "Income:       {:>12}", self.total_income)?;
        writeln!(f, "Expenses:     {:>12}", self.total_expense)?;
        writeln!(f, "Balance:      {:>12}{marker}", self.balance)?;
        write!(f, "Appointments: {:>12}", self.appointment_count)
    }
}

/// One line of the ledger list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionRow {
    pub id: String,
    pub category: String,
    pub description: String,
    pub date: String,
    pub amount: String,
}

impl Display for TransactionRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let indicator = if self.category == "income" { '▲' } else { '▼' };
        write!(
            f,
            "{indicator} {}  {}  {}  [{}]",
            self.description, self.date, self.amount, self.id
        )
    }
}

/// The most recent `limit` transactions, in collection order (newest first).
pub fn transaction_list(
    transactions: &[Transaction],
    limit: usize,
    currency: &str,
    locale: DateLocale,
) -> ListView<TransactionRow> {
    let rows = transactions
        .iter()
        .take(limit)
        .map(|t| TransactionRow {
            id: crate::model::Record::id(t).to_string(),
            category: t.category().to_string(),
            description: t.description().to_string(),
            date: locale.format(t.date()),
            amount: format!(
                "{}{}",
                t.category().sign(),
                t.amount().with_currency(currency)
            ),
        })
        .collect();
    ListView::new(rows, NO_TRANSACTIONS)
}

/// One entry of the appointment list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentRow {
    pub id: String,
    pub name: String,
    pub service: String,
    pub when: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub price: String,
}

impl Display for AppointmentRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{} - {}  {}  [{}]", self.name, self.service, self.price, self.id)?;
        write!(f, "    {}  tel. {}", self.when, self.phone)?;
        if let Some(email) = &self.email {
            write!(f, "  {email}")?;
        }
        Ok(())
    }
}

/// Every appointment, in collection order.
pub fn appointment_list(
    appointments: &[Appointment],
    currency: &str,
    locale: DateLocale,
) -> ListView<AppointmentRow> {
    let rows = appointments
        .iter()
        .map(|a| AppointmentRow {
            id: crate::model::Record::id(a).to_string(),
            name: a.name().to_string(),
            service: a.service().to_string(),
            when: format!(
                "{} {} {}",
                locale.format(a.date()),
                locale.at(),
                a.time().format("%H:%M")
            ),
            phone: a.phone().to_string(),
            email: a.email().map(str::to_string),
            price: format!("{}{currency}", a.price()),
        })
        .collect();
    ListView::new(rows, NO_APPOINTMENTS)
}

/// The booking summary panel next to the booking form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookingSummary {
    pub service: String,
    pub duration: String,
    pub price: String,
}

impl BookingSummary {
    /// The panel with nothing selected.
    pub fn placeholder() -> Self {
        Self {
            service: NOT_SELECTED.to_string(),
            duration: NONE_MARK.to_string(),
            price: NONE_MARK.to_string(),
        }
    }

    pub fn for_service(service: &Service, currency: &str) -> Self {
        Self {
            service: service.name().to_string(),
            duration: format!("{} minutes", service.duration()),
            price: format!("{}{currency}", service.price()),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }
}

impl Default for BookingSummary {
    fn default() -> Self {
        Self::placeholder()
    }
}

impl Display for BookingSummary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Service:  {}", self.service)?;
        writeln!(f, "Duration: {}", self.duration)?;
        write!(f, "Price:    {}", self.price)
    }
}

/// One option of the service selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceOption {
    pub id: String,
    pub name: String,
    pub duration: String,
    pub price: String,
    pub selected: bool,
}

impl Display for ServiceOption {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mark = if self.selected { '*' } else { ' ' };
        write!(
            f,
            "[{mark}] {:<20} {:<24} {:>8} {:>8}",
            self.id, self.name, self.duration, self.price
        )
    }
}

/// The service selector; at most one option is marked selected.
pub fn service_options(
    services: &[Service],
    selected: Option<&str>,
    currency: &str,
) -> Vec<ServiceOption> {
    services
        .iter()
        .map(|s| ServiceOption {
            id: s.id().to_string(),
            name: s.name().to_string(),
            duration: format!("{} min", s.duration()),
            price: format!("{}{currency}", s.price()),
            selected: selected == Some(s.id()),
        })
        .collect()
}

/// The admin panel: statistics followed by both lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub stats: StatsView,
    pub transactions: ListView<TransactionRow>,
    pub appointments: ListView<AppointmentRow>,
}

impl Display for PanelView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "== Summary ==")?;
        writeln!(f, "{}", self.stats)?;
        writeln!(f)?;
        writeln!(f, "== Recent transactions ==")?;
        writeln!(f, "{}", self.transactions)?;
        writeln!(f)?;
        writeln!(f, "== Appointments ==")?;
        write!(f, "{}", self.appointments)
    }
}

/// One visible gallery entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GalleryRow {
    pub title: String,
    pub category: String,
}

impl Display for GalleryRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.title, self.category)
    }
}

/// The gallery items left visible by a filter.
pub fn gallery_list<'a>(
    items: impl IntoIterator<Item = (&'a GalleryItem, bool)>,
) -> ListView<GalleryRow> {
    let rows = items
        .into_iter()
        .filter(|(_, visible)| *visible)
        .map(|(item, _)| GalleryRow {
            title: item.title().to_string(),
            category: item.category().to_string(),
        })
        .collect();
    ListView::new(rows, NO_GALLERY_ITEMS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregate;
    use crate::model::{Amount, AppointmentStatus, Category, RecordId};
    use rust_decimal::Decimal;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn txn(id: usize, category: Category, amount: &str) -> Transaction {
        Transaction::new(
            RecordId::new(id.to_string()),
            category,
            Amount::lenient(amount),
            format!("entry {id}"),
            date(2025, 6, 1),
        )
    }

    fn appointment(email: Option<&str>) -> Appointment {
        Appointment {
            id: RecordId::new("a1"),
            created_at: Utc.with_ymd_and_hms(2025, 5, 20, 9, 30, 0).unwrap(),
            name: "Ana".into(),
            phone: "600111222".into(),
            email: email.map(str::to_string),
            service: "Manicure".into(),
            price: Amount::new(Decimal::from(20)),
            date: date(2025, 6, 1),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            notes: None,
            status: AppointmentStatus::Pending,
        }
    }

    #[test]
    fn test_format_date_en() {
        assert_eq!(DateLocale::EnUs.format(date(2025, 6, 1)), "June 1, 2025");
        assert_eq!(DateLocale::EnUs.format(date(2024, 12, 31)), "December 31, 2024");
    }

    #[test]
    fn test_format_date_es() {
        assert_eq!(DateLocale::EsEs.format(date(2025, 6, 1)), "1 de junio de 2025");
    }

    #[test]
    fn test_date_locale_serde() {
        assert_eq!(serde_json::to_string(&DateLocale::EsEs).unwrap(), "\"es_ES\"");
        let l: DateLocale = serde_json::from_str("\"en_US\"").unwrap();
        assert_eq!(l, DateLocale::EnUs);
    }

    #[test]
    fn test_stats_view() {
        let transactions = vec![
            txn(1, Category::Income, "100"),
            txn(2, Category::Expense, "15.5"),
        ];
        let stats = StatsView::new(&aggregate(&transactions), 3, "€");
        assert_eq!(stats.total_income, "100.00€");
        assert_eq!(stats.total_expense, "15.50€");
        assert_eq!(stats.balance, "84.50€");
        assert_eq!(stats.balance_state, BalanceState::NonNegative);
        assert_eq!(stats.appointment_count, 3);
    }

    #[test]
    fn test_stats_view_negative_balance() {
        let transactions = vec![txn(1, Category::Expense, "5")];
        let stats = StatsView::new(&aggregate(&transactions), 0, "€");
        assert_eq!(stats.balance, "-5.00€");
        assert_eq!(stats.balance_state, BalanceState::Negative);
        assert!(stats.to_string().contains("(negative)"));
    }

    #[test]
    fn test_empty_transaction_list_has_placeholder() {
        let view = transaction_list(&[], 10, "€", DateLocale::EnUs);
        assert_eq!(view.placeholder(), Some(NO_TRANSACTIONS));
        assert_eq!(view.to_string(), NO_TRANSACTIONS);
        assert!(view.rows().is_empty());
    }

    #[test]
    fn test_transaction_list_truncates_to_most_recent() {
        let transactions: Vec<Transaction> = (0..15)
            .rev()
            .map(|i| txn(i, Category::Income, "1"))
            .collect();
        let view = transaction_list(&transactions, 10, "€", DateLocale::EnUs);
        assert_eq!(view.rows().len(), 10);
        assert_eq!(view.rows()[0].id, "14");
        assert_eq!(view.rows()[9].id, "5");
    }

    #[test]
    fn test_transaction_row_signed_amount() {
        let transactions = vec![
            txn(1, Category::Expense, "15.5"),
            txn(2, Category::Income, "100"),
        ];
        let view = transaction_list(&transactions, 10, "€", DateLocale::EnUs);
        assert_eq!(view.rows()[0].amount, "-15.50€");
        assert_eq!(view.rows()[1].amount, "+100.00€");
        assert_eq!(view.rows()[0].date, "June 1, 2025");
    }

    #[test]
    fn test_empty_appointment_list_has_placeholder() {
        let view = appointment_list(&[], "€", DateLocale::EnUs);
        assert_eq!(view.to_string(), NO_APPOINTMENTS);
    }

    #[test]
    fn test_appointment_row() {
        let view = appointment_list(&[appointment(Some("ana@example.com"))], "€", DateLocale::EnUs);
        let row = &view.rows()[0];
        assert_eq!(row.when, "June 1, 2025 at 10:00");
        assert_eq!(row.price, "20€");
        assert_eq!(row.email.as_deref(), Some("ana@example.com"));
        assert!(row.to_string().contains("ana@example.com"));
    }

    #[test]
    fn test_appointment_row_without_email() {
        let view = appointment_list(&[appointment(None)], "€", DateLocale::EsEs);
        let row = &view.rows()[0];
        assert_eq!(row.when, "1 de junio de 2025 a las 10:00");
        assert!(!row.to_string().contains('@'));
    }

    #[test]
    fn test_booking_summary() {
        let service = Service::new("manicure", "Manicure", Amount::new(Decimal::from(20)), 30);
        let summary = BookingSummary::for_service(&service, "€");
        assert_eq!(summary.service, "Manicure");
        assert_eq!(summary.duration, "30 minutes");
        assert_eq!(summary.price, "20€");
        assert!(!summary.is_placeholder());
        assert!(BookingSummary::default().is_placeholder());
        assert_eq!(BookingSummary::placeholder().service, "Not selected");
    }

    #[test]
    fn test_service_options_single_selection() {
        let services = Service::default_catalog();
        let options = service_options(&services, Some("pedicure"), "€");
        assert_eq!(options.iter().filter(|o| o.selected).count(), 1);
        assert!(options.iter().find(|o| o.id == "pedicure").unwrap().selected);
    }

    #[test]
    fn test_gallery_list_empty() {
        let items = GalleryItem::default_gallery();
        let view = gallery_list(crate::gallery::filter(
            &items,
            &crate::gallery::GalleryFilter::Category("hair".into()),
        ));
        assert_eq!(view.to_string(), NO_GALLERY_ITEMS);
    }
}
