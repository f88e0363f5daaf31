use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest<V: Serialize> {
    #[serde(rename = "operationName")]
    pub operation_name: &'static str,
    pub query: &'static str,
    pub variables: V,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphqlError>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GraphqlError {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserRef {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    #[serde(default)]
    pub suffix: Option<String>,
}

impl UserRef {
    pub fn display_name(&self) -> String {
        [
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.suffix.as_deref().unwrap_or_default(),
        ]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Milliseconds since the Unix epoch. The API sends either a JSON number or a
/// numeric string.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord)]
pub struct EpochMillis(pub i64);

impl EpochMillis {
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.0)
    }
}

impl<'de> Deserialize<'de> for EpochMillis {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(i64),
            Float(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(value) => Ok(EpochMillis(value)),
            Raw::Float(value) => Ok(EpochMillis(value as i64)),
            Raw::Text(text) => text
                .trim()
                .parse::<i64>()
                .map(EpochMillis)
                .map_err(|_| serde::de::Error::custom(format!("invalid epoch millis: {}", text))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OvertimeRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub date: EpochMillis,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub description: String,
    pub status: String,
    #[serde(default)]
    pub creator: Option<UserRef>,
    #[serde(default)]
    pub approver: Option<UserRef>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FetchUserData {
    #[serde(rename = "fetchUser")]
    pub fetch_user: Option<FetchUserPayload>,
    #[serde(default)]
    pub users: Option<Vec<UserRef>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct FetchUserPayload {
    pub user: Option<UserOvertimes>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct UserOvertimes {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "createdOvertimes", default)]
    pub created_overtimes: Option<Vec<OvertimeRecord>>,
    #[serde(rename = "assignedOvertimes", default)]
    pub assigned_overtimes: Option<Vec<OvertimeRecord>>,
}

/// Collections backing the overtime page for one user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserOvertimeData {
    pub owned: Vec<OvertimeRecord>,
    pub pending_approval: Vec<OvertimeRecord>,
    pub approvers: Vec<UserRef>,
}

impl From<FetchUserData> for UserOvertimeData {
    fn from(data: FetchUserData) -> Self {
        let user = data.fetch_user.and_then(|payload| payload.user).unwrap_or_default();
        Self {
            owned: user.created_overtimes.unwrap_or_default(),
            pending_approval: user.assigned_overtimes.unwrap_or_default(),
            approvers: data.users.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateOvertimeInput {
    pub date: String,
    #[serde(rename = "startTime")]
    pub start_time: String,
    #[serde(rename = "endTime")]
    pub end_time: String,
    pub duration: String,
    pub description: String,
    pub status: String,
    #[serde(rename = "approverId")]
    pub approver_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateOvertimeInput {
    pub id: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OvertimeIdInput {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteError {
    #[serde(default)]
    pub path: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum RemoteErrors {
    One(RemoteError),
    Many(Vec<RemoteError>),
}

impl RemoteErrors {
    pub fn message(&self) -> String {
        match self {
            RemoteErrors::One(err) => err.message.clone(),
            RemoteErrors::Many(errs) => errs
                .iter()
                .map(|err| err.message.as_str())
                .collect::<Vec<_>>()
                .join("; "),
        }
    }

    fn is_empty(&self) -> bool {
        matches!(self, RemoteErrors::Many(errs) if errs.is_empty())
    }
}

/// `{ ok, errors }` payload returned by every overtime mutation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct MutationOutcome {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub errors: Option<RemoteErrors>,
}

impl MutationOutcome {
    pub fn error_message(&self) -> Option<String> {
        self.errors
            .as_ref()
            .filter(|errors| !errors.is_empty())
            .map(RemoteErrors::message)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateOvertimeData {
    #[serde(rename = "createOvertime")]
    pub create_overtime: MutationOutcome,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOvertimeData {
    #[serde(rename = "updateOvertime")]
    pub update_overtime: MutationOutcome,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteOvertimeData {
    #[serde(rename = "deleteOvertime")]
    pub delete_overtime: MutationOutcome,
}

use leptos::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl IntoView for ApiError {
    fn into_view(self) -> View {
        self.error.into_view()
    }
}

impl ApiError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "VALIDATION_ERROR".to_string(),
            details: None,
        }
    }

    pub fn unknown(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "UNKNOWN".to_string(),
            details: None,
        }
    }

    pub fn request_failed(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "REQUEST_FAILED".to_string(),
            details: None,
        }
    }

    pub fn mutation_rejected(msg: impl Into<String>) -> Self {
        Self {
            error: msg.into(),
            code: "MUTATION_REJECTED".to_string(),
            details: None,
        }
    }

    pub fn graphql(errors: &[GraphqlError]) -> Self {
        let message = errors
            .iter()
            .map(|err| err.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Self {
            error: if message.is_empty() {
                "GraphQL request failed".to_string()
            } else {
                message
            },
            code: "GRAPHQL_ERROR".to_string(),
            details: serde_json::to_value(errors).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn serialize_create_input_uses_graphql_variable_names() {
        let input = CreateOvertimeInput {
            date: "2025-01-10T00:00:00Z".into(),
            start_time: "18:00".into(),
            end_time: "20:30".into(),
            duration: "2 Hr & 30 Min".into(),
            description: "release".into(),
            status: "Pending".into(),
            approver_id: "u-2".into(),
        };
        let v = serde_json::to_value(&input).unwrap();
        assert_eq!(v["startTime"], serde_json::json!("18:00"));
        assert_eq!(v["endTime"], serde_json::json!("20:30"));
        assert_eq!(v["approverId"], serde_json::json!("u-2"));
        assert_eq!(v["status"], serde_json::json!("Pending"));
    }

    #[wasm_bindgen_test]
    fn deserialize_epoch_millis_from_string_or_number() {
        let from_text: EpochMillis = serde_json::from_str("\"1736467200000\"").unwrap();
        let from_number: EpochMillis = serde_json::from_str("1736467200000").unwrap();
        assert_eq!(from_text, from_number);
        assert!(serde_json::from_str::<EpochMillis>("\"tomorrow\"").is_err());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use leptos::IntoView;
    use serde_json::json;

    #[test]
    fn api_error_helpers_set_expected_codes() {
        let validation = ApiError::validation("invalid payload");
        assert_eq!(validation.code, "VALIDATION_ERROR");
        assert_eq!(validation.error, "invalid payload");
        assert!(validation.details.is_none());

        assert_eq!(ApiError::unknown("something failed").code, "UNKNOWN");
        assert_eq!(ApiError::request_failed("network error").code, "REQUEST_FAILED");
        assert_eq!(
            ApiError::mutation_rejected("Entry not found").code,
            "MUTATION_REJECTED"
        );

        let graphql = ApiError::graphql(&[
            GraphqlError {
                message: "first".into(),
            },
            GraphqlError {
                message: "second".into(),
            },
        ]);
        assert_eq!(graphql.code, "GRAPHQL_ERROR");
        assert_eq!(graphql.error, "first; second");
        assert_eq!(ApiError::graphql(&[]).error, "GraphQL request failed");
    }

    #[test]
    fn api_error_display_matches_error_text() {
        let error = ApiError::unknown("boom");
        assert_eq!(format!("{}", error), "boom");
        assert_eq!(ApiError::validation("bad input").to_string(), "bad input");
        let _: View = ApiError::request_failed("request failed").into_view();
    }

    #[test]
    fn display_name_skips_missing_suffix() {
        let user = UserRef {
            id: Some("u1".into()),
            first_name: "Ana".into(),
            last_name: "Reyes".into(),
            suffix: None,
        };
        assert_eq!(user.display_name(), "Ana Reyes");

        let with_suffix = UserRef {
            suffix: Some("Jr.".into()),
            ..user
        };
        assert_eq!(with_suffix.display_name(), "Ana Reyes Jr.");
    }

    #[test]
    fn mutation_outcome_accepts_single_or_listed_errors() {
        let single: MutationOutcome = serde_json::from_value(json!({
            "ok": false,
            "errors": { "path": "approverId", "message": "Approver not found" }
        }))
        .unwrap();
        assert_eq!(single.error_message().as_deref(), Some("Approver not found"));

        let listed: MutationOutcome = serde_json::from_value(json!({
            "ok": false,
            "errors": [
                { "path": "date", "message": "Date is required" },
                { "path": "duration", "message": "Duration is required" }
            ]
        }))
        .unwrap();
        assert_eq!(
            listed.error_message().as_deref(),
            Some("Date is required; Duration is required")
        );

        let clean: MutationOutcome =
            serde_json::from_value(json!({ "ok": true, "errors": null })).unwrap();
        assert!(clean.ok);
        assert!(clean.error_message().is_none());

        let empty: MutationOutcome =
            serde_json::from_value(json!({ "ok": true, "errors": [] })).unwrap();
        assert!(empty.error_message().is_none());
    }

    #[test]
    fn user_data_treats_null_collections_as_empty() {
        let raw: FetchUserData = serde_json::from_value(json!({
            "fetchUser": {
                "user": {
                    "_id": "u1",
                    "createdOvertimes": null,
                    "assignedOvertimes": [{
                        "_id": "ot-9",
                        "date": "1736467200000",
                        "startTime": "18:00",
                        "endTime": "19:00",
                        "duration": "1 Hr & 0 Min",
                        "description": "hotfix",
                        "status": "Pending",
                        "creator": { "_id": "u2", "firstName": "Ben", "lastName": "Ito", "suffix": null }
                    }]
                }
            },
            "users": null
        }))
        .unwrap();
        let data = UserOvertimeData::from(raw);
        assert!(data.owned.is_empty());
        assert!(data.approvers.is_empty());
        assert_eq!(data.pending_approval.len(), 1);
        assert_eq!(data.pending_approval[0].date, EpochMillis(1_736_467_200_000));
        assert!(data.pending_approval[0].approver.is_none());
    }
}
