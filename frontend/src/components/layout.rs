use leptos::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="bg-white shadow-sm border-b border-gray-200">
            <div class="max-w-7xl mx-auto px-4 sm:px-6 lg:px-8">
                <div class="flex items-center h-16">
                    <h1 class="text-xl font-semibold text-gray-900">"Overtime"</h1>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    view! {
        <div class="min-h-screen bg-gray-50">
            <Header/>
            <main class="max-w-7xl mx-auto py-6 px-4 sm:px-6 lg:px-8">{children()}</main>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-indigo-600"></div>
        </div>
    }
}

/// Covers the parent while `active` holds.
#[component]
pub fn LoadingOverlay(
    #[prop(into)] active: Signal<bool>,
    #[prop(into)] label: String,
) -> impl IntoView {
    view! {
        <Show when=move || active.get()>
            <div
                class="absolute inset-0 z-10 flex flex-col items-center justify-center bg-white/70"
                role="status"
                aria-live="polite"
            >
                <LoadingSpinner/>
                <span class="text-sm text-gray-600">{label.clone()}</span>
            </div>
        </Show>
    }
}

#[component]
pub fn ErrorMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div
            class="bg-red-50 border border-red-300 text-red-700 px-4 py-3 rounded mb-4"
            role="alert"
        >
            <p class="text-sm">{message}</p>
        </div>
    }
}

#[component]
pub fn SuccessMessage(#[prop(into)] message: String) -> impl IntoView {
    view! {
        <div
            class="bg-green-50 border border-green-300 text-green-700 px-4 py-3 rounded mb-4"
            role="status"
        >
            <p class="text-sm">{message}</p>
        </div>
    }
}
