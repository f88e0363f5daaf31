use crate::pages::overtime::types::OvertimeStatus;
use leptos::*;

#[component]
pub fn StatusTag(status: OvertimeStatus) -> impl IntoView {
    let class = format!(
        "inline-flex rounded border px-2 py-0.5 text-xs font-semibold {}",
        status.color().classes()
    );
    view! { <span class=class>{status.as_str().to_uppercase()}</span> }
}
