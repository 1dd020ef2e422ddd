//! Popup
//!
//! Scan form prefilled from the active tab, the verdict of the last scan and
//! the most recent entries of the extension's scan history.

use chrono::{DateTime, Local, TimeZone, Utc};
use leptos::*;
use std::rc::Rc;

use phishscan::history::ScanHistoryEntry;
use phishscan::popup::{
    prefill_url, resolve_api_base, PopupController, PopupView, RECENT_IN_POPUP,
};
use phishscan::verdict::{StatusStyle, VerdictView};
use phishscan::WebScanApi;

use crate::chrome;

type Controller = Rc<PopupController<WebScanApi>>;

#[component]
pub fn Popup() -> impl IntoView {
    let controller = store_value(None::<Controller>);
    let (url, set_url) = create_signal(String::new());
    let (busy, set_busy) = create_signal(false);
    let display = create_rw_signal(PopupView::default());
    let (recent, set_recent) = create_signal(Vec::<ScanHistoryEntry>::new());

    spawn_local(async move {
        let (controller_value, prefill) = open_popup().await;
        set_recent.set(controller_value.recent(RECENT_IN_POPUP));
        controller.set_value(Some(controller_value));
        if let Some(prefill) = prefill {
            // Keep anything typed while storage was loading
            set_url.update(|url| {
                if url.is_empty() {
                    *url = prefill;
                }
            });
        }
    });

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(popup) = controller.get_value() else {
            return;
        };
        if popup.is_busy() {
            return;
        }

        set_busy.set(true);
        let target = url.get();

        spawn_local(async move {
            let outcome = popup.scan(&target).await;
            display.update(|display| display.apply(&outcome));

            if outcome.is_ok() {
                if let Err(e) = chrome::save_history(&popup.history_entries()).await {
                    tracing::warn!(error = %e, "Saving scan history failed");
                }
                set_recent.set(popup.recent(RECENT_IN_POPUP));
            }
            set_busy.set(false);
        });
    };

    view! {
        <main class="popup">
            <header class="popup-header">
                <h1>"PhishScan"</h1>
            </header>

            <form class="popup-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder="https://example.com"
                    prop:value=move || url.get()
                    on:input=move |ev| set_url.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || busy.get()>
                    {move || if busy.get() { "Scanning..." } else { "Scan" }}
                </button>
            </form>

            {move || display.with(|d| d.error.clone()).map(|message| view! {
                <p class="popup-error">{message}</p>
            })}

            {move || {
                display
                    .with(|d| d.verdict.clone())
                    .map(|verdict| view! { <PopupVerdict verdict=verdict /> })
            }}

            <RecentScans entries=recent />
        </main>
    }
}

/// Load history, backend origin and the active tab's URL
async fn open_popup() -> (Controller, Option<String>) {
    let stored = chrome::load_history().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Ignoring unreadable scan history");
        Vec::new()
    });
    let api_base = chrome::load_api_base().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Reading apiBase failed, using default");
        None
    });
    let tab_url = chrome::active_tab_url().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Reading the active tab failed");
        None
    });

    let api = WebScanApi::new(&resolve_api_base(api_base.as_deref()));
    let controller = Rc::new(PopupController::new(api, stored));
    (controller, prefill_url(tab_url.as_deref()))
}

#[component]
fn PopupVerdict(verdict: VerdictView) -> impl IntoView {
    let class = verdict.panel_class();
    let icon = verdict.style.icon();
    let title = verdict.title();

    view! {
        <section class=class>
            <h2>{icon} " " {title}</h2>
            <p class="popup-confidence">"Confidence: " {verdict.confidence_text}</p>
            {(!verdict.message.is_empty()).then(move || view! { <p>{verdict.message}</p> })}
        </section>
    }
}

#[component]
fn RecentScans(entries: ReadSignal<Vec<ScanHistoryEntry>>) -> impl IntoView {
    view! {
        <section class="popup-history">
            <h3>"Recent scans"</h3>
            {move || {
                let entries = entries.get();
                if entries.is_empty() {
                    return view! { <p class="popup-empty">"No scans yet"</p> }.into_view();
                }
                entries
                    .into_iter()
                    .map(|entry| {
                        let class = StatusStyle::for_verdict(&entry.status).css_class();
                        let when = entry_time_label(&entry.timestamp, &Local);
                        let full_url = entry.url.clone();
                        view! {
                            <div class="popup-history-row">
                                <span class=format!("badge {}", class)>{entry.status.label()}</span>
                                <span class="popup-history-url" title=full_url>{entry.url}</span>
                                <span class="popup-history-time">{when}</span>
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </section>
    }
}

/// Compact local time for a history row
fn entry_time_label<Tz: TimeZone>(timestamp: &DateTime<Utc>, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    timestamp.with_timezone(tz).format("%b %d, %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_time_label() {
        let timestamp = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        assert_eq!(entry_time_label(&timestamp, &Utc), "Mar 09, 14:05");
    }
}
