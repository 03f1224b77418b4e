//! Wire types for the virtual-number API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Response envelope shared by every provider endpoint.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Convert the envelope into a Result for ergonomic error handling.
    pub fn into_result(self) -> Result<T, ProviderError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ProviderError::MissingData),
            (false, _) => Err(ProviderError::Api(
                self.error
                    .unwrap_or_else(|| "unknown provider error".to_string()),
            )),
        }
    }

    /// Success/failure only. Some endpoints acknowledge without a payload.
    pub fn ack(self) -> Result<(), ProviderError> {
        match self.into_result() {
            Ok(_) | Err(ProviderError::MissingData) => Ok(()),
            Err(e) => Err(e),
        }
    }
}

/// A country numbers can be purchased in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryListing {
    pub country_code: String,
    pub country_name: String,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub emoji: Option<String>,
}

/// Payload returned by a successful purchase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchasedNumberData {
    pub number_id: String,
    pub phone_number: String,
}

/// A single SMS received by a purchased number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmsMessage {
    pub sender: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Entry in the provider-side active set.
#[derive(Debug, Clone, Deserialize)]
pub struct ActiveNumber {
    pub number_id: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_success_with_data() {
        let json = r#"{
            "success": true,
            "data": {"number_id": "123", "phone_number": "+15550001111"}
        }"#;

        let envelope: ApiEnvelope<PurchasedNumberData> = serde_json::from_str(json).unwrap();
        let data = envelope.into_result().unwrap();
        assert_eq!(data.number_id, "123");
        assert_eq!(data.phone_number, "+15550001111");
    }

    #[test]
    fn envelope_failure_carries_error_text() {
        let json = r#"{"success": false, "error": "No numbers available"}"#;

        let envelope: ApiEnvelope<PurchasedNumberData> = serde_json::from_str(json).unwrap();
        match envelope.into_result() {
            Err(ProviderError::Api(text)) => assert_eq!(text, "No numbers available"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn envelope_success_without_data_is_missing() {
        let json = r#"{"success": true}"#;

        let envelope: ApiEnvelope<PurchasedNumberData> = serde_json::from_str(json).unwrap();
        assert!(matches!(
            envelope.into_result(),
            Err(ProviderError::MissingData)
        ));
    }

    #[test]
    fn ack_tolerates_missing_data() {
        let json = r#"{"success": true}"#;

        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        assert!(envelope.ack().is_ok());
    }

    #[test]
    fn ack_keeps_failure() {
        let json = r#"{"success": false, "error": "Cancellation failed"}"#;

        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(json).unwrap();
        match envelope.ack() {
            Err(ProviderError::Api(text)) => assert_eq!(text, "Cancellation failed"),
            other => panic!("expected Api error, got {:?}", other),
        }
    }

    #[test]
    fn sms_timestamp_parses_rfc3339() {
        let json = r#"{
            "sender": "WhatsApp",
            "message": "Your code is 123456",
            "timestamp": "2025-03-01T12:00:00Z"
        }"#;

        let sms: SmsMessage = serde_json::from_str(json).unwrap();
        assert_eq!(sms.sender, "WhatsApp");
        assert_eq!(sms.timestamp.to_rfc3339(), "2025-03-01T12:00:00+00:00");
    }
}
