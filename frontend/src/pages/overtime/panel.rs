use crate::components::{
    confirm_dialog::ConfirmDialog,
    layout::{ErrorMessage, LoadingOverlay},
};
use crate::pages::overtime::{
    components::{form_dialog::OvertimeFormDialog, notice::NoticeBanner, table::OvertimeTable},
    layout::OvertimeLayout,
    types::{ApprovalDecision, OvertimeRow, ViewerRole},
    view_model::use_overtime_view_model,
};
use leptos::*;
use leptos_router::use_params_map;

/// Mounted at `/overtime/:user_id`.
#[component]
pub fn OvertimeRoute() -> impl IntoView {
    let params = use_params_map();
    let user_id = Signal::derive(move || params.with(|p| p.get("user_id").cloned().unwrap_or_default()));
    view! { <OvertimePage user_id=user_id /> }
}

#[component]
pub fn OvertimePage(#[prop(into)] user_id: Signal<String>) -> impl IntoView {
    let vm = use_overtime_view_model(user_id);
    let owned_rows = vm.rows(ViewerRole::Owner);
    let approval_rows = vm.rows(ViewerRole::Approver);
    let owned_pagination = vm.pagination(ViewerRole::Owner);
    let approval_pagination = vm.pagination(ViewerRole::Approver);
    let load_error = vm.load_error();

    let on_delete = Callback::new(move |row: OvertimeRow| vm.request_delete(&row));
    let on_decide = Callback::new(move |(row, decision): (OvertimeRow, ApprovalDecision)| {
        vm.request_decision(&row, decision)
    });

    let prompt = Signal::derive(move || vm.confirm.with(|intent| intent.as_ref().map(|i| i.prompt())));
    let confirm_open = Signal::derive(move || prompt.with(Option::is_some));
    let confirm_title = Signal::derive(move || prompt.get().map(|p| p.title).unwrap_or_default());
    let confirm_label = Signal::derive(move || {
        prompt.get().map(|p| p.confirm_label).unwrap_or_default()
    });
    let confirm_destructive = Signal::derive(move || prompt.get().is_some_and(|p| p.destructive));
    let has_approvals = move || approval_pagination.get().total > 0;

    view! {
        <OvertimeLayout>
            <LoadingOverlay active=vm.loading() label="Fetching data..." />
            <NoticeBanner message=vm.message />
            {move || load_error.get().map(|err| view! {
                <ErrorMessage message=err.error />
            })}
            <section class="space-y-3">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold text-gray-900">"My Overtime List :"</h2>
                    <button
                        type="button"
                        class="px-4 py-2 rounded bg-indigo-600 text-white"
                        on:click=move |_| vm.open_form()
                    >
                        "New Entry"
                    </button>
                </div>
                <OvertimeTable
                    role=ViewerRole::Owner
                    rows=owned_rows
                    pagination=owned_pagination
                    page=vm.owned_page
                    on_delete=on_delete
                />
            </section>
            <Show when=has_approvals>
                <section class="space-y-3">
                    <h2 class="text-xl font-semibold text-gray-900">"For My Approval :"</h2>
                    <OvertimeTable
                        role=ViewerRole::Approver
                        rows=approval_rows
                        pagination=approval_pagination
                        page=vm.approval_page
                        on_decide=on_decide
                    />
                </section>
            </Show>
            <OvertimeFormDialog vm=vm />
            <ConfirmDialog
                is_open=confirm_open
                title=confirm_title
                confirm_label=confirm_label
                destructive=confirm_destructive
                on_confirm=Callback::new(move |_| vm.resolve_confirmation(true))
                on_cancel=Callback::new(move |_| vm.resolve_confirmation(false))
            />
        </OvertimeLayout>
    }
}
