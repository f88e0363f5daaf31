use crate::components::layout::Layout;
use leptos::*;

#[component]
pub fn OvertimeLayout(children: Children) -> impl IntoView {
    view! {
        <Layout>
            <div class="relative space-y-6">{children()}</div>
        </Layout>
    }
}
