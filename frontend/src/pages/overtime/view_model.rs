use crate::api::{ApiClient, ApiError, CreateOvertimeInput, UserOvertimeData, UserRef};
use crate::pages::overtime::{
    repository::OvertimeRepository,
    types::{project_rows, ApprovalDecision, OvertimeRow, Pagination, ViewerRole},
    utils::{ConfirmIntent, FormField, MessageState, OvertimeFormState, NEGATIVE_DURATION_MESSAGE},
};
use crate::utils::{notice, time::app_time_zone};
use leptos::*;

pub const CREATED_MESSAGE: &str = "New entry has been added";
pub const DELETED_MESSAGE: &str = "Entry has been deleted";

#[derive(Clone, Copy)]
pub struct OvertimeViewModel {
    pub user_id: Signal<String>,
    pub form: OvertimeFormState,
    pub form_visible: RwSignal<bool>,
    pub message: RwSignal<MessageState>,
    pub confirm: RwSignal<Option<ConfirmIntent>>,
    pub owned_page: RwSignal<usize>,
    pub approval_page: RwSignal<usize>,
    reload: RwSignal<u32>,
    pub resource: Resource<(String, u32), Result<UserOvertimeData, ApiError>>,
    pub create_action: Action<CreateOvertimeInput, Result<(), ApiError>>,
    pub decision_action: Action<(String, ApprovalDecision), Result<ApprovalDecision, ApiError>>,
    pub delete_action: Action<String, Result<(), ApiError>>,
}

/// Replaces the current notice and schedules its dismissal.
fn post_notice(message: RwSignal<MessageState>, update: impl FnOnce(&mut MessageState)) {
    message.update(update);
    let seq = message.with_untracked(MessageState::seq);
    notice::schedule_dismiss(move || message.update(|msg| msg.expire(seq)));
}

fn invalidate(reload: RwSignal<u32>) {
    reload.update(|value| *value = value.wrapping_add(1));
}

fn report_failure(message: RwSignal<MessageState>, action: &str, err: ApiError) {
    log::warn!("{} failed: {} ({})", action, err.error, err.code);
    post_notice(message, |msg| msg.set_error(err));
}

fn apply_optional_create_result(
    result: Option<Result<(), ApiError>>,
    message: RwSignal<MessageState>,
    form: OvertimeFormState,
    form_visible: RwSignal<bool>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(_) => {
                post_notice(message, |msg| msg.set_success(CREATED_MESSAGE));
                form.reset();
                form_visible.set(false);
            }
            Err(err) => report_failure(message, "create", err),
        }
        invalidate(reload);
    }
}

fn apply_optional_decision_result(
    result: Option<Result<ApprovalDecision, ApiError>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(decision) => {
                let status = decision.target_status();
                post_notice(message, |msg| {
                    msg.set_success(format!("Entry has been {}", status.as_str()))
                });
            }
            Err(err) => report_failure(message, "status update", err),
        }
        invalidate(reload);
    }
}

fn apply_optional_delete_result(
    result: Option<Result<(), ApiError>>,
    message: RwSignal<MessageState>,
    reload: RwSignal<u32>,
) {
    if let Some(result) = result {
        match result {
            Ok(_) => post_notice(message, |msg| msg.set_success(DELETED_MESSAGE)),
            Err(err) => report_failure(message, "delete", err),
        }
        invalidate(reload);
    }
}

fn apply_confirmation<D, S>(intent: Option<ConfirmIntent>, accepted: bool, delete: D, decide: S)
where
    D: FnOnce(String),
    S: FnOnce(String, ApprovalDecision),
{
    match intent {
        Some(ConfirmIntent::Delete { id }) if accepted => delete(id),
        Some(ConfirmIntent::Decide { id, decision }) if accepted => decide(id, decision),
        _ => {}
    }
}

impl OvertimeViewModel {
    pub fn new(user_id: Signal<String>) -> Self {
        let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
        let repository = store_value(OvertimeRepository::new(api));

        let form = OvertimeFormState::default();
        let form_visible = create_rw_signal(false);
        let message = create_rw_signal(MessageState::default());
        let confirm = create_rw_signal(None::<ConfirmIntent>);
        let owned_page = create_rw_signal(1usize);
        let approval_page = create_rw_signal(1usize);
        let reload = create_rw_signal(0u32);

        let resource = create_resource(
            move || (user_id.get(), reload.get()),
            move |(user_id, _)| {
                let repo = repository.get_value();
                async move { repo.list_for_user(&user_id).await }
            },
        );

        let create_action = create_action(move |payload: &CreateOvertimeInput| {
            let repo = repository.get_value();
            let payload = payload.clone();
            async move { repo.submit(payload).await }
        });

        let decision_action = leptos::create_action(move |input: &(String, ApprovalDecision)| {
            let repo = repository.get_value();
            let (id, decision) = input.clone();
            async move { repo.set_status(&id, decision).await.map(|_| decision) }
        });

        let delete_action = leptos::create_action(move |id: &String| {
            let repo = repository.get_value();
            let id = id.clone();
            async move { repo.delete(&id).await }
        });

        // `create_effect` is inert under ssr; outcomes must apply on the host too.
        create_isomorphic_effect(move |_| {
            apply_optional_create_result(
                create_action.value().get(),
                message,
                form,
                form_visible,
                reload,
            );
        });

        create_isomorphic_effect(move |_| {
            apply_optional_decision_result(decision_action.value().get(), message, reload);
        });

        create_isomorphic_effect(move |_| {
            apply_optional_delete_result(delete_action.value().get(), message, reload);
        });

        Self {
            user_id,
            form,
            form_visible,
            message,
            confirm,
            owned_page,
            approval_page,
            reload,
            resource,
            create_action,
            decision_action,
            delete_action,
        }
    }

    /// Forces the user's collections to be fetched again.
    pub fn invalidate(&self) {
        invalidate(self.reload);
    }

    pub fn reload_key(&self) -> u32 {
        self.reload.get_untracked()
    }

    pub fn loading(&self) -> Signal<bool> {
        let resource = self.resource;
        Signal::derive(move || resource.loading().get())
    }

    pub fn open_form(&self) {
        self.form_visible.set(true);
    }

    pub fn close_form(&self) {
        self.form.reset();
        self.form_visible.set(false);
    }

    pub fn on_start_time(&self, value: String) {
        if let Err(err) = self.form.set_start_time(value) {
            post_notice(self.message, |msg| msg.set_error(ApiError::validation(err.to_string())));
        }
    }

    pub fn on_end_time(&self, value: String) {
        if let Err(err) = self.form.set_end_time(value) {
            post_notice(self.message, |msg| msg.set_error(ApiError::validation(err.to_string())));
        }
    }

    /// Validates and dispatches a create. Ignored while a create is in flight.
    pub fn submit_form(&self) {
        if self.create_action.pending().get_untracked() {
            return;
        }
        match self.form.to_payload(app_time_zone()) {
            Ok(payload) => self.create_action.dispatch(payload),
            Err(_) => {
                let negative = self.form.errors().with_untracked(|errors| {
                    errors.get(FormField::Duration) == Some(NEGATIVE_DURATION_MESSAGE)
                });
                if negative {
                    post_notice(self.message, |msg| {
                        msg.set_error(ApiError::validation(NEGATIVE_DURATION_MESSAGE))
                    });
                }
            }
        }
    }

    pub fn request_delete(&self, row: &OvertimeRow) {
        self.confirm.set(Some(ConfirmIntent::delete(row)));
    }

    pub fn request_decision(&self, row: &OvertimeRow, decision: ApprovalDecision) {
        if let Some(intent) = ConfirmIntent::decide(row, decision) {
            self.confirm.set(Some(intent));
        }
    }

    pub fn resolve_confirmation(&self, accepted: bool) {
        let intent = self.confirm.get_untracked();
        self.confirm.set(None);
        let delete_action = self.delete_action;
        let decision_action = self.decision_action;
        apply_confirmation(
            intent,
            accepted,
            |id| delete_action.dispatch(id),
            |id, decision| decision_action.dispatch((id, decision)),
        );
    }

    pub fn rows(&self, role: ViewerRole) -> Signal<Vec<OvertimeRow>> {
        let resource = self.resource;
        Signal::derive(move || {
            if resource.loading().get() {
                return Vec::new();
            }
            resource
                .get()
                .and_then(|result| result.ok())
                .map(|data| {
                    let records = match role {
                        ViewerRole::Owner => &data.owned,
                        ViewerRole::Approver => &data.pending_approval,
                    };
                    project_rows(records, role, app_time_zone())
                })
                .unwrap_or_default()
        })
    }

    pub fn pagination(&self, role: ViewerRole) -> Signal<Pagination> {
        let rows = self.rows(role);
        let page = self.page_signal(role);
        Signal::derive(move || Pagination::new(page.get(), rows.with(Vec::len)))
    }

    pub fn page_signal(&self, role: ViewerRole) -> RwSignal<usize> {
        match role {
            ViewerRole::Owner => self.owned_page,
            ViewerRole::Approver => self.approval_page,
        }
    }

    /// Approvers that can be assigned; users without an id are skipped.
    pub fn approvers(&self) -> Signal<Vec<UserRef>> {
        let resource = self.resource;
        Signal::derive(move || {
            resource
                .get()
                .and_then(|result| result.ok())
                .map(|data| {
                    data.approvers
                        .into_iter()
                        .filter(|user| user.id.as_deref().is_some_and(|id| !id.is_empty()))
                        .collect()
                })
                .unwrap_or_default()
        })
    }

    pub fn load_error(&self) -> Signal<Option<ApiError>> {
        let resource = self.resource;
        Signal::derive(move || resource.get().and_then(|result| result.err()))
    }
}

pub fn use_overtime_view_model(user_id: Signal<String>) -> OvertimeViewModel {
    match use_context::<OvertimeViewModel>() {
        Some(vm) => vm,
        None => {
            let vm = OvertimeViewModel::new(user_id);
            provide_context(vm);
            vm
        }
    }
}
