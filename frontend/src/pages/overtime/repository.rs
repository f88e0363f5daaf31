use crate::api::{ApiClient, ApiError, CreateOvertimeInput, MutationOutcome, UserOvertimeData};
use std::rc::Rc;

use super::types::ApprovalDecision;

pub const UNCONFIRMED_MUTATION_MESSAGE: &str = "The server did not confirm the change.";

#[derive(Clone)]
pub struct OvertimeRepository {
    client: Rc<ApiClient>,
}

/// Folds a mutation's `{ ok, errors }` payload into a `Result`. Remote
/// errors win over the `ok` flag.
pub fn confirm_outcome(outcome: MutationOutcome) -> Result<(), ApiError> {
    match outcome.error_message() {
        Some(message) => Err(ApiError::mutation_rejected(message)),
        None if outcome.ok => Ok(()),
        None => Err(ApiError::mutation_rejected(UNCONFIRMED_MUTATION_MESSAGE)),
    }
}

impl OvertimeRepository {
    pub fn new(api: ApiClient) -> Self {
        Self {
            client: Rc::new(api),
        }
    }

    pub async fn list_for_user(&self, user_id: &str) -> Result<UserOvertimeData, ApiError> {
        self.client.fetch_user_overtime(user_id).await
    }

    pub async fn submit(&self, payload: CreateOvertimeInput) -> Result<(), ApiError> {
        log::debug!("submitting overtime entry for {}", payload.date);
        let outcome = self.client.create_overtime(payload).await?;
        confirm_outcome(outcome)
    }

    pub async fn set_status(&self, id: &str, decision: ApprovalDecision) -> Result<(), ApiError> {
        log::debug!("{} overtime entry {}", decision.verb(), id);
        let status = decision.target_status();
        let outcome = self
            .client
            .update_overtime_status(id, status.as_str())
            .await?;
        confirm_outcome(outcome)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        log::debug!("deleting overtime entry {}", id);
        let outcome = self.client.delete_overtime(id).await?;
        confirm_outcome(outcome)
    }
}
