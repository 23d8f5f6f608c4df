use serde::{Deserialize, Serialize};

/// Request payload for POST /api/auth/verify-pin
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyPinPayload {
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    pub pin: String,
}

/// Response for POST /api/auth/verify-pin
#[derive(Debug, Serialize, Deserialize)]
pub struct VerifyPinResponse {
    pub success: bool,
    pub message: String,
    /// Set when the verified PIN is still the shared default; the client must
    /// complete a PIN change before treating the session as signed in.
    #[serde(rename = "mustChangePin")]
    pub must_change_pin: bool,
}

/// Request payload for POST /api/auth/change-pin
#[derive(Debug, Serialize, Deserialize)]
pub struct ChangePinPayload {
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    #[serde(rename = "currentPin")]
    pub current_pin: String,
    #[serde(rename = "newPin")]
    pub new_pin: String,
    #[serde(rename = "confirmPin")]
    pub confirm_pin: String,
}

/// Request payload for POST /api/admin/reset-pin
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetPinPayload {
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    #[serde(rename = "newPin")]
    pub new_pin: Option<String>,
}

/// Standard success/failure body shared by all auth endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub success: bool,
    pub message: String,
}

impl ApiMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// One row of GET /api/admin/pin-status
#[derive(Debug, Serialize, Deserialize)]
pub struct PinStatusEntry {
    #[serde(rename = "employeeId")]
    pub employee_id: i32,
    #[serde(rename = "hasPin")]
    pub has_pin: bool,
    /// Null until a PIN has been set at least once.
    #[serde(rename = "lastUpdated")]
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
}

/// Response for GET /api/admin/pin-status
#[derive(Debug, Serialize, Deserialize)]
pub struct PinStatusResponse {
    pub success: bool,
    pub data: Vec<PinStatusEntry>,
}

/// One row of GET /api/employees, the sign-in picker
#[derive(Debug, Serialize, Deserialize)]
pub struct EmployeeEntry {
    pub id: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_pin_payload_deserialization() {
        let json = r#"{
            "employeeId": "42",
            "pin": "0042"
        }"#;

        let payload: VerifyPinPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.employee_id, "42");
        assert_eq!(payload.pin, "0042");
    }

    #[test]
    fn test_reset_pin_payload_defaults_pin_to_none() {
        let json = r#"{ "employeeId": "7" }"#;

        let payload: ResetPinPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.employee_id, "7");
        assert!(payload.new_pin.is_none());
    }

    #[test]
    fn test_verify_pin_response_serialization() {
        let response = VerifyPinResponse {
            success: true,
            message: "PIN verified successfully".to_string(),
            must_change_pin: true,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("mustChangePin"));
        assert!(json.contains("PIN verified successfully"));
    }

    #[test]
    fn test_pin_status_entry_serialization() {
        let entry = PinStatusEntry {
            employee_id: 3,
            has_pin: false,
            last_updated: None,
        };

        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("employeeId"));
        assert!(json.contains("hasPin"));
        assert!(json.contains("\"lastUpdated\":null"));
    }

    #[test]
    fn test_api_message_shape() {
        let json = serde_json::to_string(&ApiMessage::fail("Invalid PIN")).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("Invalid PIN"));
    }
}
