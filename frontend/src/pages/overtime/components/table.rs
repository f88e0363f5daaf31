use crate::pages::overtime::components::{pagination::PaginationBar, status_tag::StatusTag};
use crate::pages::overtime::types::{
    Align, ApprovalDecision, OvertimeRow, OvertimeStatus, Pagination, ViewerRole,
};
use leptos::*;

fn align_class(align: Align) -> &'static str {
    match align {
        Align::Left => "text-left",
        Align::Center => "text-center",
    }
}

/// Rows are keyed by id and status so a status change redraws the row.
pub fn row_key(row: &OvertimeRow) -> (String, OvertimeStatus) {
    (row.id.clone(), row.status.clone())
}

/// Text cells preceding the status column, in column order.
pub fn text_cells(row: &OvertimeRow, role: ViewerRole) -> Vec<String> {
    match role {
        ViewerRole::Owner => vec![
            row.date.clone(),
            row.time_worked.clone(),
            row.duration.clone(),
            row.description.clone(),
            row.counterparty_name.clone(),
        ],
        ViewerRole::Approver => vec![
            row.counterparty_name.clone(),
            row.date.clone(),
            row.time_worked.clone(),
            row.duration.clone(),
            row.description.clone(),
        ],
    }
}

#[component]
pub fn OvertimeTable(
    role: ViewerRole,
    rows: Signal<Vec<OvertimeRow>>,
    pagination: Signal<Pagination>,
    page: RwSignal<usize>,
    #[prop(optional)] on_delete: Option<Callback<OvertimeRow>>,
    #[prop(optional)] on_decide: Option<Callback<(OvertimeRow, ApprovalDecision)>>,
) -> impl IntoView {
    let columns = role.columns();
    let visible_rows = Signal::derive(move || {
        let current = pagination.get();
        rows.with(|rows| current.slice(rows).to_vec())
    });

    view! {
        <div class="bg-white shadow rounded-lg">
            <div class="overflow-x-auto">
                <table class="min-w-full divide-y divide-gray-200">
                    <thead class="bg-gray-50">
                        <tr>
                            {columns
                                .iter()
                                .map(|column| {
                                    let class = format!(
                                        "px-6 py-3 {} text-xs font-medium text-gray-500 uppercase tracking-wider",
                                        align_class(column.align),
                                    );
                                    view! { <th class=class>{column.title}</th> }
                                })
                                .collect_view()}
                        </tr>
                    </thead>
                    <tbody class="bg-white divide-y divide-gray-200">
                        <For
                            each=move || visible_rows.get()
                            key=row_key
                            children=move |row: OvertimeRow| {
                                let cells = text_cells(&row, role)
                                    .into_iter()
                                    .zip(columns.iter())
                                    .map(|(text, column)| {
                                        let class = format!(
                                            "px-6 py-4 text-sm text-gray-900 {}",
                                            align_class(column.align),
                                        );
                                        view! { <td class=class>{text}</td> }
                                    })
                                    .collect_view();
                                let status = row.status.clone();
                                view! {
                                    <tr>
                                        {cells}
                                        <td class="px-6 py-4 text-center">
                                            <StatusTag status=status />
                                        </td>
                                        <td class="px-6 py-4 text-center text-sm">
                                            {action_cell(row, role, on_delete, on_decide)}
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
            <Show when=move || rows.with(Vec::is_empty)>
                <div class="px-6 py-4 text-sm text-gray-600">"No entries"</div>
            </Show>
            <PaginationBar pagination=pagination page=page />
        </div>
    }
}

fn action_cell(
    row: OvertimeRow,
    role: ViewerRole,
    on_delete: Option<Callback<OvertimeRow>>,
    on_decide: Option<Callback<(OvertimeRow, ApprovalDecision)>>,
) -> View {
    match role {
        ViewerRole::Owner => {
            let row = store_value(row);
            view! {
                <button
                    type="button"
                    class="text-red-600 hover:underline"
                    on:click=move |_| {
                        if let Some(on_delete) = on_delete {
                            on_delete.call(row.get_value());
                        }
                    }
                >
                    "Cancel"
                </button>
            }
            .into_view()
        }
        ViewerRole::Approver if row.status.accepts_decision() => {
            let row = store_value(row);
            let decide = move |decision: ApprovalDecision| {
                if let Some(on_decide) = on_decide {
                    on_decide.call((row.get_value(), decision));
                }
            };
            view! {
                <div class="flex justify-center gap-2">
                    <button
                        type="button"
                        class="text-green-700 hover:underline"
                        on:click=move |_| decide(ApprovalDecision::Approve)
                    >
                        "Approve"
                    </button>
                    <button
                        type="button"
                        class="text-red-600 hover:underline"
                        on:click=move |_| decide(ApprovalDecision::Reject)
                    >
                        "Reject"
                    </button>
                </div>
            }
            .into_view()
        }
        ViewerRole::Approver => view! { <span class="text-gray-400">"N/A"</span> }.into_view(),
    }
}
