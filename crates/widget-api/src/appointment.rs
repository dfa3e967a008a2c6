//! Appointment request and confirmation types.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::catalog::{id_from_json, Price};

/// Body of `POST /appointments/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub business_unit: Option<String>,
    pub service: String,
    pub client_name: String,
    pub client_phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_email: Option<String>,
    /// Local date-time as entered, e.g. `2026-05-01T10:00`.
    pub start_at: String,
    pub end_at: String,
}

/// Payment state reported for a new appointment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Other(String),
}

impl PaymentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Other(s) => s,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self, PaymentStatus::Paid)
    }
}

impl From<&str> for PaymentStatus {
    fn from(value: &str) -> Self {
        match value {
            "paid" => PaymentStatus::Paid,
            "pending" | "" => PaymentStatus::Pending,
            other => PaymentStatus::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.as_deref().map(PaymentStatus::from).unwrap_or_default())
    }
}

#[derive(Deserialize)]
struct RawConfirmation {
    #[serde(default)]
    id: serde_json::Value,
    #[serde(default)]
    payment_status: PaymentStatus,
    #[serde(default)]
    total_price: Option<Price>,
    #[serde(default)]
    is_confirmed: bool,
    #[serde(default)]
    paid_at: Option<DateTime<FixedOffset>>,
}

/// The created appointment as echoed by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawConfirmation")]
pub struct AppointmentConfirmation {
    /// Absent when the backend does not echo the id.
    pub id: Option<String>,
    pub payment_status: PaymentStatus,
    pub total_price: Option<Price>,
    pub is_confirmed: bool,
    pub paid_at: Option<DateTime<FixedOffset>>,
}

impl TryFrom<RawConfirmation> for AppointmentConfirmation {
    type Error = String;

    fn try_from(raw: RawConfirmation) -> Result<Self, Self::Error> {
        let id = match raw.id {
            serde_json::Value::Null => None,
            ref value => Some(id_from_json(value)?),
        };
        Ok(AppointmentConfirmation {
            id,
            payment_status: raw.payment_status,
            total_price: raw.total_price,
            is_confirmed: raw.is_confirmed,
            paid_at: raw.paid_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_absent_optionals() {
        let request = AppointmentRequest {
            business_unit: None,
            service: "1".to_string(),
            client_name: "Anna".to_string(),
            client_phone: "+79990000000".to_string(),
            client_email: None,
            start_at: "2026-05-01T10:00".to_string(),
            end_at: "2026-05-01T10:00".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("business_unit").is_none());
        assert!(value.get("client_email").is_none());
        assert_eq!(value["service"], "1");
        assert_eq!(value["end_at"], value["start_at"]);
    }

    #[test]
    fn test_confirmation_paid() {
        let confirmation: AppointmentConfirmation = serde_json::from_value(json!({
            "id": 17,
            "payment_status": "paid",
            "total_price": "1500.00",
            "is_confirmed": true,
            "paid_at": "2026-05-01T10:00:00+03:00"
        }))
        .unwrap();
        assert_eq!(confirmation.id.as_deref(), Some("17"));
        assert!(confirmation.payment_status.is_paid());
        assert_eq!(confirmation.total_price.unwrap().as_str(), "1500");
        assert_eq!(
            confirmation.paid_at.unwrap().to_rfc3339(),
            "2026-05-01T10:00:00+03:00"
        );
    }

    #[test]
    fn test_confirmation_defaults_to_pending() {
        let confirmation: AppointmentConfirmation = serde_json::from_value(json!({})).unwrap();
        assert_eq!(confirmation.payment_status, PaymentStatus::Pending);
        assert!(confirmation.id.is_none());

        let confirmation: AppointmentConfirmation =
            serde_json::from_value(json!({"payment_status": null})).unwrap();
        assert_eq!(confirmation.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_unknown_payment_status_is_kept() {
        let confirmation: AppointmentConfirmation =
            serde_json::from_value(json!({"payment_status": "refunded"})).unwrap();
        assert_eq!(confirmation.payment_status.as_str(), "refunded");
        assert!(!confirmation.payment_status.is_paid());
    }
}
