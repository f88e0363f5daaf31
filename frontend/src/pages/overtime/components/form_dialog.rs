use crate::pages::overtime::utils::FormField;
use crate::pages::overtime::view_model::OvertimeViewModel;
use leptos::*;

const INPUT_CLASS: &str = "mt-1 block w-full border border-gray-300 rounded px-2 py-1";

#[component]
fn FieldError(vm: OvertimeViewModel, field: FormField) -> impl IntoView {
    let errors = vm.form.errors();
    move || {
        errors.with(|errors| {
            errors
                .get(field)
                .map(|message| view! { <p class="mt-1 text-xs text-red-600">{message.to_string()}</p> })
        })
    }
}

#[component]
pub fn OvertimeFormDialog(vm: OvertimeViewModel) -> impl IntoView {
    let form = vm.form;
    let pending = vm.create_action.pending();
    let approvers = vm.approvers();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        vm.submit_form();
    };

    view! {
        <Show when=move || vm.form_visible.get()>
            <div class="fixed inset-0 z-[60] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-black/40"
                    on:click=move |_| vm.close_form()
                ></button>
                <div
                    class="relative z-[61] w-full max-w-lg rounded-lg bg-white shadow-xl p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                >
                    <h2 class="text-lg font-semibold text-gray-900">"New Overtime Entry"</h2>
                    <form class="space-y-4" on:submit=on_submit>
                        <div>
                            <label class="block text-sm font-medium text-gray-700">"Date"</label>
                            <input
                                type="date"
                                class=INPUT_CLASS
                                prop:value=move || form.date().get()
                                on:input=move |ev| form.set_date(event_target_value(&ev))
                            />
                            <FieldError vm=vm field=FormField::Date />
                        </div>
                        <div class="grid grid-cols-2 gap-4">
                            <div>
                                <label class="block text-sm font-medium text-gray-700">"Start Time"</label>
                                <input
                                    type="time"
                                    class=INPUT_CLASS
                                    prop:value=move || form.start_time().get()
                                    on:change=move |ev| vm.on_start_time(event_target_value(&ev))
                                />
                                <FieldError vm=vm field=FormField::StartTime />
                            </div>
                            <div>
                                <label class="block text-sm font-medium text-gray-700">"End Time"</label>
                                <input
                                    type="time"
                                    class=INPUT_CLASS
                                    prop:value=move || form.end_time().get()
                                    on:change=move |ev| vm.on_end_time(event_target_value(&ev))
                                />
                                <FieldError vm=vm field=FormField::EndTime />
                            </div>
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-gray-700">"Duration"</label>
                            <input
                                type="text"
                                readonly=true
                                class=format!("{} bg-gray-100", INPUT_CLASS)
                                prop:value=move || form.duration().get()
                            />
                            <FieldError vm=vm field=FormField::Duration />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-gray-700">"Description"</label>
                            <textarea
                                rows=3
                                class=INPUT_CLASS
                                prop:value=move || form.description().get()
                                on:input=move |ev| form.set_description(event_target_value(&ev))
                            ></textarea>
                            <FieldError vm=vm field=FormField::Description />
                        </div>
                        <div>
                            <label class="block text-sm font-medium text-gray-700">"Approver"</label>
                            <select
                                class=INPUT_CLASS
                                prop:value=move || form.approver_id().get()
                                on:change=move |ev| form.set_approver(event_target_value(&ev))
                            >
                                <option value="">"Select approver"</option>
                                <For
                                    each=move || approvers.get()
                                    key=|user| user.id.clone().unwrap_or_default()
                                    children=move |user| {
                                        let value = user.id.clone().unwrap_or_default();
                                        view! { <option value=value>{user.display_name()}</option> }
                                    }
                                />
                            </select>
                            <FieldError vm=vm field=FormField::Approver />
                        </div>
                        <div class="flex justify-end gap-2">
                            <button
                                type="button"
                                class="px-4 py-2 rounded bg-gray-100 text-gray-800"
                                on:click=move |_| vm.close_form()
                            >
                                "Cancel"
                            </button>
                            <button
                                type="submit"
                                class="px-4 py-2 rounded bg-indigo-600 text-white disabled:opacity-50"
                                disabled=move || pending.get()
                            >
                                {move || if pending.get() { "Submitting..." } else { "Submit" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::api::{ApiClient, UserOvertimeData, UserRef};
    use crate::test_support::ssr::render_to_string;

    fn dialog_html(prepare: impl FnOnce(OvertimeViewModel) + 'static) -> String {
        render_to_string(move || {
            provide_context(ApiClient::new_with_base_url("http://localhost:9/graphql"));
            let vm = OvertimeViewModel::new(Signal::derive(|| "u1".to_string()));
            vm.resource.set(Ok(UserOvertimeData {
                approvers: vec![UserRef {
                    id: Some("u2".into()),
                    first_name: "Mia".into(),
                    last_name: "Cruz".into(),
                    suffix: Some("Jr.".into()),
                }],
                ..UserOvertimeData::default()
            }));
            vm.open_form();
            prepare(vm);
            view! { <OvertimeFormDialog vm=vm /> }
        })
    }

    #[test]
    fn form_dialog_lists_approvers() {
        let html = dialog_html(|_| {});
        assert!(html.contains("New Overtime Entry"));
        assert!(html.contains("Mia Cruz Jr."));
        assert!(html.contains("value=\"u2\""));
        assert!(html.contains("Submit"));
    }

    #[test]
    fn form_dialog_shows_inline_errors() {
        let html = dialog_html(|vm| vm.submit_form());
        assert!(html.contains("Please select the date"));
        assert!(html.contains("Please select an approver"));
    }

    #[test]
    fn hidden_form_renders_nothing() {
        let html = dialog_html(|vm| vm.close_form());
        assert!(!html.contains("New Overtime Entry"));
    }
}
