use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use leptos::*;
use thiserror::Error;

use crate::api::{ApiError, CreateOvertimeInput};
use crate::utils::time::{date_to_utc_rfc3339, format_time, parse_date_input, parse_time_input};

use super::types::{ApprovalDecision, OvertimeRow, OvertimeStatus};

pub const NEGATIVE_DURATION_MESSAGE: &str = "Negative duration is not allowed";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("Negative duration is not allowed")]
    NotPositive { hours: i64, minutes: i64 },
}

/// Whole hours and minutes between two instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OvertimeDuration {
    pub hours: i64,
    pub minutes: i64,
}

impl std::fmt::Display for OvertimeDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} Hr & {} Min", self.hours, self.minutes)
    }
}

/// Hours and minutes are the components of `end - start`; seconds are dropped.
/// Spans that are zero or negative are rejected.
pub fn calculate_duration(
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<OvertimeDuration, DurationError> {
    let elapsed = end - start;
    let hours = elapsed.num_hours();
    let minutes = elapsed.num_minutes() % 60;
    if elapsed.num_milliseconds() <= 0 {
        return Err(DurationError::NotPositive { hours, minutes });
    }
    Ok(OvertimeDuration { hours, minutes })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FormField {
    Date,
    StartTime,
    EndTime,
    Duration,
    Description,
    Approver,
}

impl FormField {
    pub fn required_message(self) -> &'static str {
        match self {
            FormField::Date => "Please select the date",
            FormField::StartTime => "Please select the start time",
            FormField::EndTime => "Please select the end time",
            FormField::Duration => "Duration is required",
            FormField::Description => "Please enter a description",
            FormField::Approver => "Please select an approver",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FormField, String>);

impl FormErrors {
    pub fn insert(&mut self, field: FormField, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: FormField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Snapshot of the raw form inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OvertimeFormValues {
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub duration: String,
    pub description: String,
    pub approver_id: String,
}

impl OvertimeFormValues {
    pub fn timestamps(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        // Both pickers share one calendar day; the date field defaults to a
        // fixed anchor until it is chosen.
        let day = parse_date_input(&self.date).unwrap_or(NaiveDate::MIN);
        let start = parse_time_input(&self.start_time)?;
        let end = parse_time_input(&self.end_time)?;
        Some((day.and_time(start), day.and_time(end)))
    }

    pub fn validate(&self, tz: Tz) -> Result<CreateOvertimeInput, FormErrors> {
        let mut errors = FormErrors::default();
        let date = parse_date_input(&self.date);
        let start = parse_time_input(&self.start_time);
        let end = parse_time_input(&self.end_time);
        let required = [
            (FormField::Date, date.is_some()),
            (FormField::StartTime, start.is_some()),
            (FormField::EndTime, end.is_some()),
            (FormField::Duration, !self.duration.trim().is_empty()),
            (FormField::Description, !self.description.trim().is_empty()),
            (FormField::Approver, !self.approver_id.trim().is_empty()),
        ];
        for (field, present) in required {
            if !present {
                errors.insert(field, field.required_message());
            }
        }
        if let Some((start_at, end_at)) = self.timestamps() {
            if calculate_duration(start_at, end_at).is_err() {
                errors.insert(FormField::Duration, NEGATIVE_DURATION_MESSAGE);
            }
        }

        match (date, start, end) {
            (Some(date), Some(start), Some(end)) if errors.is_empty() => Ok(CreateOvertimeInput {
                date: date_to_utc_rfc3339(date, tz),
                start_time: format_time(start),
                end_time: format_time(end),
                duration: self.duration.trim().to_string(),
                description: self.description.trim().to_string(),
                status: OvertimeStatus::Pending.as_str().to_string(),
                approver_id: self.approver_id.trim().to_string(),
            }),
            _ => Err(errors),
        }
    }
}

/// Controlled form state. Every input writes through a setter so the derived
/// duration and inline errors stay in step with the raw values.
#[derive(Clone, Copy)]
pub struct OvertimeFormState {
    date: RwSignal<String>,
    start_time: RwSignal<String>,
    end_time: RwSignal<String>,
    duration: RwSignal<String>,
    description: RwSignal<String>,
    approver_id: RwSignal<String>,
    errors: RwSignal<FormErrors>,
}

impl Default for OvertimeFormState {
    fn default() -> Self {
        Self {
            date: create_rw_signal(String::new()),
            start_time: create_rw_signal(String::new()),
            end_time: create_rw_signal(String::new()),
            duration: create_rw_signal(String::new()),
            description: create_rw_signal(String::new()),
            approver_id: create_rw_signal(String::new()),
            errors: create_rw_signal(FormErrors::default()),
        }
    }
}

impl OvertimeFormState {
    pub fn date(&self) -> Signal<String> {
        self.date.into()
    }

    pub fn start_time(&self) -> Signal<String> {
        self.start_time.into()
    }

    pub fn end_time(&self) -> Signal<String> {
        self.end_time.into()
    }

    pub fn duration(&self) -> Signal<String> {
        self.duration.into()
    }

    pub fn description(&self) -> Signal<String> {
        self.description.into()
    }

    pub fn approver_id(&self) -> Signal<String> {
        self.approver_id.into()
    }

    pub fn errors(&self) -> Signal<FormErrors> {
        self.errors.into()
    }

    pub fn set_date(&self, value: String) {
        self.date.set(value);
        self.clear_error(FormField::Date);
    }

    pub fn set_start_time(&self, value: String) -> Result<(), DurationError> {
        self.start_time.set(value);
        self.clear_error(FormField::StartTime);
        self.recalculate_duration()
    }

    pub fn set_end_time(&self, value: String) -> Result<(), DurationError> {
        self.end_time.set(value);
        self.clear_error(FormField::EndTime);
        self.recalculate_duration()
    }

    pub fn set_description(&self, value: String) {
        self.description.set(value);
        self.clear_error(FormField::Description);
    }

    pub fn set_approver(&self, value: String) {
        self.approver_id.set(value);
        self.clear_error(FormField::Approver);
    }

    fn clear_error(&self, field: FormField) {
        self.errors.update(|errors| errors.remove(field));
    }

    /// Recomputes the duration once both times are present. A non-positive
    /// span clears the field and marks it invalid.
    fn recalculate_duration(&self) -> Result<(), DurationError> {
        let Some((start, end)) = self.values_untracked().timestamps() else {
            return Ok(());
        };
        match calculate_duration(start, end) {
            Ok(duration) => {
                self.duration.set(duration.to_string());
                self.clear_error(FormField::Duration);
                Ok(())
            }
            Err(err) => {
                self.duration.set(String::new());
                self.errors
                    .update(|errors| errors.insert(FormField::Duration, err.to_string()));
                Err(err)
            }
        }
    }

    pub fn values_untracked(&self) -> OvertimeFormValues {
        OvertimeFormValues {
            date: self.date.get_untracked(),
            start_time: self.start_time.get_untracked(),
            end_time: self.end_time.get_untracked(),
            duration: self.duration.get_untracked(),
            description: self.description.get_untracked(),
            approver_id: self.approver_id.get_untracked(),
        }
    }

    /// Validates the current values, recording inline errors on failure.
    pub fn to_payload(&self, tz: Tz) -> Result<CreateOvertimeInput, ApiError> {
        match self.values_untracked().validate(tz) {
            Ok(payload) => {
                self.errors.set(FormErrors::default());
                Ok(payload)
            }
            Err(errors) => {
                let first = errors
                    .0
                    .values()
                    .next()
                    .cloned()
                    .unwrap_or_else(|| "Please correct the highlighted fields".into());
                self.errors.set(errors);
                Err(ApiError::validation(first))
            }
        }
    }

    pub fn reset(&self) {
        self.date.set(String::new());
        self.start_time.set(String::new());
        self.end_time.set(String::new());
        self.duration.set(String::new());
        self.description.set(String::new());
        self.approver_id.set(String::new());
        self.errors.set(FormErrors::default());
    }
}

#[derive(Clone, Default, Debug, PartialEq)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
    seq: u64,
}

impl MessageState {
    pub fn set_success(&mut self, msg: impl Into<String>) {
        self.success = Some(msg.into());
        self.error = None;
        self.seq = self.seq.wrapping_add(1);
    }

    pub fn set_error(&mut self, msg: ApiError) {
        self.error = Some(msg);
        self.success = None;
        self.seq = self.seq.wrapping_add(1);
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Clears the notice only if nothing newer replaced it.
    pub fn expire(&mut self, seq: u64) {
        if self.seq == seq {
            self.clear();
        }
    }
}

/// An action waiting for the user's yes/no.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmIntent {
    Delete { id: String },
    Decide { id: String, decision: ApprovalDecision },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub confirm_label: String,
    pub destructive: bool,
}

impl ConfirmIntent {
    pub fn delete(row: &OvertimeRow) -> Self {
        Self::Delete { id: row.id.clone() }
    }

    /// `None` when the row's status does not accept a decision.
    pub fn decide(row: &OvertimeRow, decision: ApprovalDecision) -> Option<Self> {
        row.status.accepts_decision().then(|| Self::Decide {
            id: row.id.clone(),
            decision,
        })
    }

    pub fn prompt(&self) -> ConfirmPrompt {
        match self {
            ConfirmIntent::Delete { .. } => ConfirmPrompt {
                title: "Are you sure you want to delete this entry?".into(),
                confirm_label: "Yes".into(),
                destructive: true,
            },
            ConfirmIntent::Decide { decision, .. } => ConfirmPrompt {
                title: format!("{} this overtime entry?", decision.verb()),
                confirm_label: "Yes".into(),
                destructive: false,
            },
        }
    }
}
