//! Edit form helpers: service catalog, time slots and the form model

use chrono::{NaiveTime, Timelike};
use shared::models::AppointmentRecord;

use super::filter::parse_local_datetime;
use crate::validation::{FieldErrors, Rule, validate_all};

/// A bookable service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Service {
    pub name: &'static str,
    pub description: &'static str,
    pub duration_mins: i32,
    pub price: f64,
}

pub const SERVICES: [Service; 4] = [
    Service {
        name: "Comprehensive Eye Examination",
        description: "Complete vision and eye health assessment",
        duration_mins: 45,
        price: 120.0,
    },
    Service {
        name: "Contact Lens Fitting",
        description: "Professional fitting and consultation for contact lenses",
        duration_mins: 30,
        price: 90.0,
    },
    Service {
        name: "Frame Styling Session",
        description: "Personal consultation for frame selection",
        duration_mins: 30,
        price: 60.0,
    },
    Service {
        name: "Follow-up Consultation",
        description: "Review and adjust your prescription or fitting",
        duration_mins: 20,
        price: 45.0,
    },
];

pub fn find_service(name: &str) -> Option<&'static Service> {
    SERVICES.iter().find(|s| s.name == name)
}

pub const FIRST_SLOT_HOUR: u32 = 10;
pub const LAST_SLOT_HOUR: u32 = 21;

/// One-hour booking slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeSlot {
    /// `HH:00`
    pub start: String,
    /// e.g. `10:00 AM - 11:00 AM`
    pub label: String,
}

fn twelve_hour(hour: u32) -> String {
    // 24 wraps to midnight for the last slot's end
    let time = NaiveTime::from_hms_opt(hour % 24, 0, 0).unwrap_or(NaiveTime::MIN);
    time.format("%I:%M %p").to_string()
}

pub fn time_slots() -> Vec<TimeSlot> {
    (FIRST_SLOT_HOUR..=LAST_SLOT_HOUR)
        .map(|hour| TimeSlot {
            start: format!("{:02}:00", hour),
            label: format!("{} - {}", twelve_hour(hour), twelve_hour(hour + 1)),
        })
        .collect()
}

/// Editable copy of an appointment, with date and slot split out
#[derive(Debug, Clone, PartialEq)]
pub struct EditForm {
    pub record: AppointmentRecord,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:00`
    pub slot: String,
}

impl EditForm {
    /// Unparseable stored values leave date and slot empty.
    pub fn from_record(record: &AppointmentRecord) -> Self {
        let (date, slot) = match parse_local_datetime(&record.appointment_datetime) {
            Some(dt) => (
                dt.date().format("%Y-%m-%d").to_string(),
                format!("{:02}:00", dt.hour()),
            ),
            None => (String::new(), String::new()),
        };
        Self {
            record: record.clone(),
            date,
            slot,
        }
    }

    /// Pick a catalog service, copying its duration and price.
    /// Returns false for names outside the catalog.
    pub fn select_service(&mut self, name: &str) -> bool {
        match find_service(name) {
            Some(service) => {
                self.record.service_name = Some(service.name.to_string());
                self.record.service_duration = Some(service.duration_mins);
                self.record.service_price = Some(service.price);
                true
            }
            None => false,
        }
    }

    pub fn rules() -> Vec<(&'static str, Rule)> {
        vec![
            ("first_name", Rule::Required("First name is required")),
            ("last_name", Rule::Required("Last name is required")),
            ("email", Rule::Email),
            ("phone", Rule::Phone),
            ("date", Rule::Required("Please select a date")),
            ("slot", Rule::Required("Please select a time slot")),
        ]
    }

    fn field(&self, name: &str) -> &str {
        match name {
            "first_name" => self.record.first_name.as_deref().unwrap_or(""),
            "last_name" => self.record.last_name.as_deref().unwrap_or(""),
            "email" => self.record.email.as_deref().unwrap_or(""),
            "phone" => self.record.phone.as_deref().unwrap_or(""),
            "date" => &self.date,
            "slot" => &self.slot,
            _ => "",
        }
    }

    pub fn validate(&self) -> FieldErrors {
        validate_all(&Self::rules(), |name| self.field(name))
    }

    /// The edited record with `appointment_datetime` recomposed as
    /// `{date}T{slot}:00`
    pub fn into_record(self) -> AppointmentRecord {
        let mut record = self.record;
        record.appointment_datetime = format!("{}T{}:00", self.date, self.slot);
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_slots() {
        let slots = time_slots();
        assert_eq!(slots.len(), 12);
        assert_eq!(slots[0].start, "10:00");
        assert_eq!(slots[0].label, "10:00 AM - 11:00 AM");
        assert_eq!(slots[2].label, "12:00 PM - 01:00 PM");
        assert_eq!(slots[11].start, "21:00");
        assert_eq!(slots[11].label, "09:00 PM - 10:00 PM");
    }

    #[test]
    fn test_find_service() {
        let service = find_service("Contact Lens Fitting").unwrap();
        assert_eq!(service.duration_mins, 30);
        assert_eq!(service.price, 90.0);
        assert!(find_service("Laser Surgery").is_none());
    }

    #[test]
    fn test_form_round_trip() {
        let record = AppointmentRecord::new("a1", "2024-06-10T14:30:00").with_name("Jane", "Doe");
        let mut form = EditForm::from_record(&record);
        assert_eq!(form.date, "2024-06-10");
        assert_eq!(form.slot, "14:00");

        form.slot = "16:00".into();
        assert!(form.select_service("Frame Styling Session"));
        let edited = form.into_record();
        assert_eq!(edited.id, "a1");
        assert_eq!(edited.appointment_datetime, "2024-06-10T16:00:00");
        assert_eq!(edited.service_duration, Some(30));
        assert_eq!(edited.service_price, Some(60.0));
    }

    #[test]
    fn test_unknown_service_leaves_record() {
        let record = AppointmentRecord::new("a1", "2024-06-10T14:00:00");
        let mut form = EditForm::from_record(&record);
        assert!(!form.select_service("Nope"));
        assert_eq!(form.record, record);
    }

    #[test]
    fn test_form_validation() {
        let record = AppointmentRecord::new("a1", "garbage").with_email("not-an-email");
        let errors = EditForm::from_record(&record).validate();
        assert_eq!(errors.get("first_name"), Some("First name is required"));
        assert!(errors.get("email").is_some());
        assert_eq!(errors.get("date"), Some("Please select a date"));

        let mut ok = AppointmentRecord::new("a2", "2024-06-10T10:00:00")
            .with_name("Jane", "Doe")
            .with_email("jane@example.com");
        ok.phone = Some("+91 98765 43210".into());
        assert!(EditForm::from_record(&ok).validate().is_empty());
    }
}
