use leptos::ev::KeyboardEvent;
use leptos::*;

#[component]
pub fn ConfirmDialog(
    is_open: Signal<bool>,
    #[prop(into)] title: MaybeSignal<String>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
    #[prop(optional, into)] message: MaybeSignal<String>,
    #[prop(optional, into)] confirm_label: MaybeSignal<String>,
    #[prop(optional, into)] cancel_label: MaybeSignal<String>,
    #[prop(optional, into)] destructive: MaybeSignal<bool>,
) -> impl IntoView {
    let confirm_button_class = move || {
        if destructive.get() {
            "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-red-600 text-white hover:bg-red-700"
        } else {
            "inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-indigo-600 text-white hover:bg-indigo-700"
        }
    };
    let title = Signal::derive(move || title.get());
    let message = Signal::derive(move || message.get());
    let confirm_text = Signal::derive(move || label_or(confirm_label.get(), "Yes"));
    let cancel_text = Signal::derive(move || label_or(cancel_label.get(), "No"));

    view! {
        <Show when=move || is_open.get()>
            <div class="fixed inset-0 z-[70] flex items-center justify-center p-4">
                <button
                    type="button"
                    aria-label="Close"
                    class="absolute inset-0 bg-black/40"
                    on:click=move |_| on_cancel.call(())
                ></button>
                <div
                    class="relative z-[71] w-full max-w-md rounded-lg bg-white shadow-xl border border-gray-200 p-6 space-y-4"
                    role="dialog"
                    aria-modal="true"
                    tabindex="-1"
                    on:keydown=move |ev: KeyboardEvent| {
                        if ev.key() == "Escape" {
                            ev.prevent_default();
                            on_cancel.call(());
                        }
                    }
                >
                    <h2 class="text-lg font-semibold text-gray-900">{move || title.get()}</h2>
                    <Show when=move || !message.get().is_empty()>
                        <p class="text-sm text-gray-600">{move || message.get()}</p>
                    </Show>
                    <div class="flex justify-end gap-2">
                        <button
                            type="button"
                            class="inline-flex items-center justify-center rounded-md px-4 py-2 text-sm font-semibold bg-gray-100 text-gray-800 hover:bg-gray-200"
                            on:click=move |_| on_cancel.call(())
                        >
                            {move || cancel_text.get()}
                        </button>
                        <button
                            type="button"
                            class=confirm_button_class
                            on:click=move |_| on_confirm.call(())
                        >
                            {move || confirm_text.get()}
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

fn label_or(text: String, fallback: &str) -> String {
    if text.trim().is_empty() {
        fallback.to_string()
    } else {
        text
    }
}
