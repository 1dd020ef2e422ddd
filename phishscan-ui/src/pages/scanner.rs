//! Scanner Page
//!
//! URL form, progress indicator and the verdict of the latest scan.

use leptos::*;
use leptos_router::*;

use phishscan::controller::scan_toast;
use phishscan::ScanError;

use crate::components::{InlineLoading, VerdictPanel};
use crate::state::global::GlobalState;

/// Scanner page component
#[component]
pub fn Scanner() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // `?url=` comes from the extension's context menu
    let query = use_query_map();
    let initial = query.with_untracked(|q| q.get("url").cloned().unwrap_or_default());

    let (input, set_input) = create_signal(initial);
    let (inline_error, set_inline_error) = create_signal(None::<String>);

    let scanning = state.scanning;
    let session = state.session;

    let state_for_submit = state.clone();
    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if scanning.get_untracked() {
            return;
        }

        let raw = input.get_untracked();
        let state = state_for_submit.clone();
        scanning.set(true);
        set_inline_error.set(None);

        spawn_local(async move {
            let result = state.scanner.submit(&raw).await;

            if let Err(ScanError::Validation(e)) = &result {
                // The page may be gone by now
                let _ = set_inline_error.try_set(Some(e.to_string()));
            }

            let (kind, message) = scan_toast(&result);
            state.notify(kind, &message);
            state.sync_session();
            scanning.set(false);
        });
    };

    view! {
        <div class="space-y-8 max-w-3xl mx-auto">
            <div>
                <h1 class="text-3xl font-bold">"URL Scanner"</h1>
                <p class="text-muted mt-1">"Paste a link to check it before you click"</p>
            </div>

            <form on:submit=on_submit class="card rounded-xl p-6 space-y-3">
                <div class="flex space-x-2">
                    <input
                        type="text"
                        placeholder="https://example.com"
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        class=move || {
                            if inline_error.get().is_some() {
                                "scan-input flex-1 rounded-lg px-4 py-3 input-invalid"
                            } else {
                                "scan-input flex-1 rounded-lg px-4 py-3"
                            }
                        }
                    />
                    <button
                        type="submit"
                        disabled=move || scanning.get()
                        class="btn btn-primary"
                    >
                        {move || if scanning.get() { "Scanning..." } else { "Scan" }}
                    </button>
                </div>

                {move || inline_error.get().map(|msg| view! {
                    <p class="input-error text-sm">{msg}</p>
                })}

                {move || scanning.get().then(|| view! {
                    <div class="scan-progress flex items-center space-x-2 text-sm">
                        <InlineLoading />
                        <span>"Analyzing URL..."</span>
                    </div>
                })}
            </form>

            {move || {
                session
                    .with(|s| s.verdict.clone())
                    .map(|verdict| view! { <VerdictPanel verdict=verdict /> })
            }}
        </div>
    }
}
