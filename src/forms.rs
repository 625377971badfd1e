//! Form state and the validation that turns a submitted form into a record.
//!
//! Forms hold raw text the way the user typed it. `submit` either builds a complete record with a
//! fresh identifier or returns a validation error and leaves the form untouched.

use crate::error::invalid;
use crate::model::appointment::hh_mm;
use crate::model::{Amount, Appointment, AppointmentStatus, Category, RecordId, Service, Transaction};
use crate::{utils, Result};
use chrono::{DateTime, Months, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// The largest amount a single transaction may record.
const MAX_AMOUNT: i64 = 1_000_000_000;

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

fn missing_fields(fields: &[(&'static str, &str)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| *name)
        .collect()
}

/// The range of dates offered by the booking date picker, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateBounds {
    pub min: NaiveDate,
    pub max: NaiveDate,
}

impl DateBounds {
    /// From `today` through the same day `months` months later.
    pub fn new(today: NaiveDate, months: u32) -> Self {
        let max = today
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX);
        Self { min: today, max }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.min <= date && date <= self.max
    }
}

impl Display for DateBounds {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.min, self.max)
    }
}

/// The booking form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub name: String,
    pub phone: String,
    pub email: String,
    /// Free-text service name, used when no catalog option is selected.
    pub service: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub notes: String,
}

impl BookingForm {
    /// Builds an appointment from the form. A selected catalog service takes precedence over the
    /// free-text service field and supplies the price; without one the price is zero.
    ///
    /// The date is not checked against `DateBounds`, the picker is what keeps it in range.
    pub fn submit(&self, selected: Option<&Service>, now: DateTime<Utc>) -> Result<Appointment> {
        let (service, price) = match selected {
            Some(s) => (s.name().to_string(), s.price()),
            None => (self.service.trim().to_string(), Amount::ZERO),
        };

        let missing = missing_fields(&[
            ("name", &self.name),
            ("phone", &self.phone),
            ("service", &service),
            ("date", &self.date),
            ("time", &self.time),
        ]);
        if !missing.is_empty() {
            return Err(invalid(format!(
                "Please fill in all required fields: {}",
                missing.join(", ")
            )));
        }

        let date = parse_date(&self.date)
            .ok_or_else(|| invalid(format!("'{}' is not a valid date (YYYY-MM-DD)", self.date)))?;
        let time = hh_mm::parse(&self.time)
            .ok_or_else(|| invalid(format!("'{}' is not a valid time (HH:MM)", self.time)))?;

        Ok(Appointment {
            id: RecordId::new(utils::generate_id()),
            created_at: now,
            name: self.name.trim().to_string(),
            phone: self.phone.trim().to_string(),
            email: non_empty(&self.email),
            service,
            price,
            date,
            time,
            notes: non_empty(&self.notes),
            status: AppointmentStatus::Pending,
        })
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// The add-transaction form. The date field starts out as today.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    pub category: Category,
    pub amount: String,
    pub description: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            category: Category::default(),
            amount: String::new(),
            description: String::new(),
            date: today.format(DATE_FORMAT).to_string(),
        }
    }

    /// Builds a transaction. The amount must be a positive number, optionally written with
    /// `currency`, no larger than one billion. The description and the date must be present.
    pub fn submit(&self, currency: &str) -> Result<Transaction> {
        let missing = missing_fields(&[
            ("amount", &self.amount),
            ("description", &self.description),
            ("date", &self.date),
        ]);
        if !missing.is_empty() {
            return Err(invalid(format!(
                "Please fill in all fields: {}",
                missing.join(", ")
            )));
        }

        let amount = Amount::parse_with_currency(&self.amount, currency)
            .map_err(|_| invalid(format!("'{}' is not a number", self.amount.trim())))?;
        if amount.is_zero() || amount.is_negative() {
            return Err(invalid("The amount must be greater than zero"));
        }
        if amount.value() > Decimal::from(MAX_AMOUNT) {
            return Err(invalid(format!(
                "The amount must not exceed {}",
                Amount::new(Decimal::from(MAX_AMOUNT)).fixed()
            )));
        }
        let date = parse_date(&self.date)
            .ok_or_else(|| invalid(format!("'{}' is not a valid date (YYYY-MM-DD)", self.date)))?;

        Ok(Transaction::new(
            RecordId::new(utils::generate_id()),
            self.category,
            amount,
            self.description.trim(),
            date,
        ))
    }

    /// Clears the form, defaulting the date to `today` again.
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}
