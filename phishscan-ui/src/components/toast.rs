//! Toast Notification Component
//!
//! Renders the global toast queue.

use leptos::*;

use phishscan::toast::Toast as ToastData;

use crate::state::global::GlobalState;

/// Toast notification container
#[component]
pub fn Toast() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let toasts = state.toasts;

    view! {
        <div class="toast-container fixed bottom-4 right-4 z-50 space-y-2">
            <For
                each=move || toasts.with(|queue| queue.active().to_vec())
                key=|toast| toast.id
                children=move |toast| {
                    view! { <ToastMessage toast=toast on_close=move |id| toasts.update(|q| q.dismiss(id)) /> }
                }
            />
        </div>
    }
}

#[component]
fn ToastMessage<F>(
    toast: ToastData,
    on_close: F,
) -> impl IntoView
where
    F: Fn(u64) + 'static,
{
    let id = toast.id;

    view! {
        <div class=format!(
            "toast {} flex items-center space-x-3 px-4 py-3 rounded-lg shadow-lg animate-slide-in",
            toast.kind.css_class()
        )>
            <span class="text-lg">{toast.kind.icon()}</span>
            <span class="text-sm font-medium">{toast.message}</span>
            <button class="toast-close" on:click=move |_| on_close(id)>"×"</button>
        </div>
    }
}
