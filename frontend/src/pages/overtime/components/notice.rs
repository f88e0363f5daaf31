use crate::components::layout::{ErrorMessage, SuccessMessage};
use crate::pages::overtime::utils::MessageState;
use leptos::*;

#[component]
pub fn NoticeBanner(message: RwSignal<MessageState>) -> impl IntoView {
    view! {
        <div aria-live="polite">
            {move || {
                message.with(|msg| match (&msg.error, &msg.success) {
                    (Some(err), _) => view! { <ErrorMessage message=err.error.clone() /> }.into_view(),
                    (None, Some(text)) => view! { <SuccessMessage message=text.clone() /> }.into_view(),
                    (None, None) => ().into_view(),
                })
            }}
        </div>
    }
}
