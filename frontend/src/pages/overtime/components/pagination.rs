use crate::pages::overtime::types::Pagination;
use leptos::*;

#[component]
pub fn PaginationBar(pagination: Signal<Pagination>, page: RwSignal<usize>) -> impl IntoView {
    let go_to = move |target: usize| {
        let bounded = Pagination::new(target, pagination.get_untracked().total);
        page.set(bounded.page);
    };

    view! {
        <div class="flex items-center justify-between px-6 py-3 text-sm text-gray-600">
            <span>{move || format!("Total {} items", pagination.get().total)}</span>
            <div class="flex items-center gap-2">
                <button
                    type="button"
                    class="rounded border px-2 py-1 disabled:opacity-40"
                    aria-label="Previous page"
                    disabled=move || !pagination.get().has_previous()
                    on:click=move |_| go_to(pagination.get_untracked().page.saturating_sub(1))
                >
                    "‹"
                </button>
                <span>
                    {move || {
                        let current = pagination.get();
                        format!("{} / {}", current.page, current.page_count())
                    }}
                </span>
                <button
                    type="button"
                    class="rounded border px-2 py-1 disabled:opacity-40"
                    aria-label="Next page"
                    disabled=move || !pagination.get().has_next()
                    on:click=move |_| go_to(pagination.get_untracked().page + 1)
                >
                    "›"
                </button>
            </div>
        </div>
    }
}
