use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Auto-assigned identifier for a registered client (SQLite rowid).
pub type ClientId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaritalStatus {
    Single,
    Married,
    Divorced,
    Widowed,
    Other,
}

impl MaritalStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MaritalStatus::Single => "single",
            MaritalStatus::Married => "married",
            MaritalStatus::Divorced => "divorced",
            MaritalStatus::Widowed => "widowed",
            MaritalStatus::Other => "other",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "single" => Some(MaritalStatus::Single),
            "married" => Some(MaritalStatus::Married),
            "divorced" => Some(MaritalStatus::Divorced),
            "widowed" => Some(MaritalStatus::Widowed),
            "other" => Some(MaritalStatus::Other),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BabyGender {
    Male,
    Female,
    Unknown,
}

impl BabyGender {
    pub fn label(&self) -> &'static str {
        match self {
            BabyGender::Male => "male",
            BabyGender::Female => "female",
            BabyGender::Unknown => "unknown",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "male" => Some(BabyGender::Male),
            "female" => Some(BabyGender::Female),
            "unknown" => Some(BabyGender::Unknown),
            _ => None,
        }
    }
}

/// Registration payload. Every field is optional so mothers can share as much
/// or as little as they like; missing flags read as false once stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewClient {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_first_child: Option<bool>,
    #[serde(default)]
    pub is_breastfeeding: Option<bool>,
    #[serde(default)]
    pub baby_age_months: Option<i64>,
    #[serde(default)]
    pub baby_gender: Option<BabyGender>,
}

/// Stored registration attributes. Immutable once written; the service
/// offers no update path, only reads during evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientProfile {
    pub id: ClientId,
    pub name: Option<String>,
    pub age: Option<i64>,
    pub marital_status: Option<MaritalStatus>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_first_child: bool,
    pub is_breastfeeding: bool,
    pub baby_age_months: Option<i64>,
    pub baby_gender: Option<BabyGender>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marital_status_labels_round_trip() {
        for status in [
            MaritalStatus::Single,
            MaritalStatus::Married,
            MaritalStatus::Divorced,
            MaritalStatus::Widowed,
            MaritalStatus::Other,
        ] {
            assert_eq!(MaritalStatus::from_label(status.label()), Some(status));
        }
        assert_eq!(MaritalStatus::from_label("complicated"), None);
    }

    #[test]
    fn new_client_deserializes_from_empty_object() {
        let client: NewClient = serde_json::from_str("{}").expect("all fields optional");
        assert!(client.name.is_none());
        assert!(client.baby_gender.is_none());
    }

    #[test]
    fn new_client_accepts_enum_labels() {
        let client: NewClient = serde_json::from_value(serde_json::json!({
            "name": "Amal",
            "marital_status": "married",
            "baby_gender": "unknown",
            "is_breastfeeding": true
        }))
        .expect("valid registration");
        assert_eq!(client.marital_status, Some(MaritalStatus::Married));
        assert_eq!(client.baby_gender, Some(BabyGender::Unknown));
        assert_eq!(client.is_breastfeeding, Some(true));
    }
}
