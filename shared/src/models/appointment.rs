//! Appointment Model

use crate::util::{capitalize, non_empty};
use serde::{Deserialize, Deserializer, Serialize};

/// Appointment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// Parse a raw column value. Only the exact lowercase names match.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Unpaid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Unpaid => "unpaid",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "paid" => Some(Self::Paid),
            "unpaid" => Some(Self::Unpaid),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// The edit form stores status as free text, so rows may carry values
// outside the enumeration. Those read back as `None`.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<AppointmentStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(AppointmentStatus::parse))
}

fn lenient_payment<'de, D>(deserializer: D) -> Result<Option<PaymentStatus>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PaymentStatus::parse))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Appointment row (`appointments` table)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRecord {
    /// Assigned by the backend, immutable
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub service_name: Option<String>,
    /// Minutes
    #[serde(default)]
    pub service_duration: Option<i32>,
    #[serde(default)]
    pub service_price: Option<f64>,
    /// ISO 8601-like, e.g. `2024-06-10T08:00:00`
    #[serde(default, deserialize_with = "null_as_empty")]
    pub appointment_datetime: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, deserialize_with = "lenient_status")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, deserialize_with = "lenient_payment")]
    pub payment_status: Option<PaymentStatus>,
}

impl AppointmentRecord {
    /// Minimal record, mostly useful for fixtures.
    pub fn new(id: impl Into<String>, appointment_datetime: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            first_name: None,
            last_name: None,
            email: None,
            phone: None,
            service_name: None,
            service_duration: None,
            service_price: None,
            appointment_datetime: appointment_datetime.into(),
            message: None,
            status: None,
            payment_status: None,
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = Some(first.into());
        self.last_name = Some(last.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// `"{first} {last}"` with absent parts left empty, used for search.
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or_default(),
            self.last_name.as_deref().unwrap_or_default()
        )
    }

    pub fn display_name(&self) -> String {
        format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or("Unknown"),
            self.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    pub fn display_email(&self) -> &str {
        non_empty(self.email.as_deref()).unwrap_or("No Email")
    }

    pub fn display_phone(&self) -> &str {
        non_empty(self.phone.as_deref()).unwrap_or("No Phone")
    }

    pub fn display_service(&self) -> &str {
        non_empty(self.service_name.as_deref()).unwrap_or("Unknown Service")
    }

    pub fn display_duration(&self) -> String {
        match self.service_duration {
            Some(minutes) if minutes != 0 => format!("{} mins", minutes),
            _ => "Unknown Duration".to_string(),
        }
    }

    /// Empty when no price is set
    pub fn display_price(&self) -> String {
        match self.service_price {
            Some(price) if price != 0.0 => format!("{} Rs", price),
            _ => String::new(),
        }
    }

    pub fn status_label(&self) -> String {
        self.status
            .map(|s| capitalize(s.as_str()))
            .unwrap_or_else(|| "No Status".to_string())
    }

    pub fn payment_label(&self) -> String {
        self.payment_status
            .map(|s| capitalize(s.as_str()))
            .unwrap_or_else(|| "No Payment Info".to_string())
    }

    pub fn display_message(&self) -> &str {
        non_empty(self.message.as_deref()).unwrap_or("No additional message")
    }
}

/// Create appointment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentCreate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub service_name: String,
    pub service_duration: i32,
    pub service_price: f64,
    pub appointment_datetime: String,
    pub message: Option<String>,
    pub status: AppointmentStatus,
    pub payment_status: PaymentStatus,
}

/// Update appointment payload (partial, `None` fields are left alone)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppointmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_duration: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appointment_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
}

impl AppointmentUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the set fields onto a record, keeping its id.
    pub fn apply_to(&self, record: &mut AppointmentRecord) {
        if let Some(v) = &self.first_name {
            record.first_name = Some(v.clone());
        }
        if let Some(v) = &self.last_name {
            record.last_name = Some(v.clone());
        }
        if let Some(v) = &self.email {
            record.email = Some(v.clone());
        }
        if let Some(v) = &self.phone {
            record.phone = Some(v.clone());
        }
        if let Some(v) = &self.service_name {
            record.service_name = Some(v.clone());
        }
        if let Some(v) = self.service_duration {
            record.service_duration = Some(v);
        }
        if let Some(v) = self.service_price {
            record.service_price = Some(v);
        }
        if let Some(v) = &self.appointment_datetime {
            record.appointment_datetime = v.clone();
        }
        if let Some(v) = &self.message {
            record.message = Some(v.clone());
        }
        if let Some(v) = self.status {
            record.status = Some(v);
        }
        if let Some(v) = self.payment_status {
            record.payment_status = Some(v);
        }
    }
}

impl From<&AppointmentRecord> for AppointmentUpdate {
    /// Full replacement of every column the edited record carries.
    fn from(record: &AppointmentRecord) -> Self {
        Self {
            first_name: record.first_name.clone(),
            last_name: record.last_name.clone(),
            email: record.email.clone(),
            phone: record.phone.clone(),
            service_name: record.service_name.clone(),
            service_duration: record.service_duration,
            service_price: record.service_price,
            appointment_datetime: Some(record.appointment_datetime.clone()),
            message: record.message.clone(),
            status: record.status,
            payment_status: record.payment_status,
        }
    }
}
