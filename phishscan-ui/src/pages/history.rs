//! History Page
//!
//! Scans of this session with downloadable reports, and clearing the
//! backend history.

use leptos::*;
use wasm_bindgen::{JsCast, JsValue};

use phishscan::history::{ScanHistory, ScanHistoryEntry};
use phishscan::verdict::StatusStyle;

use crate::state::global::GlobalState;

/// One line of the history table
#[derive(Debug, Clone, PartialEq)]
struct HistoryRow {
    index: usize,
    url: String,
    status: &'static str,
    status_class: &'static str,
    time: String,
}

fn history_rows(history: &ScanHistory) -> Vec<HistoryRow> {
    history
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let style = StatusStyle::for_verdict(&entry.status);
            HistoryRow {
                index,
                url: entry.url.clone(),
                status: entry.status.label(),
                status_class: style.css_class(),
                time: entry
                    .timestamp
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            }
        })
        .collect()
}

/// Offer `text` as a file download
fn download_text(file_name: &str, text: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let blob = web_sys::Blob::new_with_str_sequence(&parts)?;
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    let anchor = document().create_element("a")?;
    anchor.set_attribute("href", &url)?;
    anchor.set_attribute("download", file_name)?;
    anchor.dyn_ref::<web_sys::HtmlElement>()
        .ok_or_else(|| JsValue::from_str("anchor is not an HtmlElement"))?
        .click();

    web_sys::Url::revoke_object_url(&url)
}

/// History page component
#[component]
pub fn History() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let session = state.session;

    let (clearing, set_clearing) = create_signal(false);

    let state_for_download = state.clone();
    let download_report = move |index: usize| {
        let entry: Option<ScanHistoryEntry> = session.with_untracked(|s| s.history.get(index).cloned());
        let Some(entry) = entry else {
            return;
        };

        let file_name = ScanHistoryEntry::report_file_name(index);
        match download_text(&file_name, &entry.report_text()) {
            Ok(()) => state_for_download.show_success("Report downloaded"),
            Err(e) => {
                tracing::error!(error = ?e, "Report download failed");
                state_for_download.show_error("Failed to create the report download");
            }
        }
    };

    let state_for_clear = state.clone();
    let clear_history = move |_| {
        set_clearing.set(true);

        let state = state_for_clear.clone();
        spawn_local(async move {
            match state.scanner.clear_history().await {
                Ok(response) if response.is_success() => {
                    state.show_success(response.message.as_deref().unwrap_or("History cleared"));
                }
                Ok(response) => {
                    state.show_error(response.message.as_deref().unwrap_or("Could not clear history"));
                }
                Err(e) => state.show_error(&e.user_message()),
            }
            state.sync_session();
            let _ = set_clearing.try_set(false);
        });
    };

    view! {
        <div class="space-y-8">
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Scan History"</h1>
                    <p class="text-muted mt-1">"The 50 most recent scans of this session"</p>
                </div>
                <button
                    on:click=clear_history
                    disabled=move || clearing.get()
                    class="btn btn-danger"
                >
                    {move || if clearing.get() { "Clearing..." } else { "Clear History" }}
                </button>
            </div>

            {move || {
                let rows = session.with(|s| history_rows(&s.history));
                if rows.is_empty() {
                    view! {
                        <div class="card rounded-xl p-8 text-center text-muted">
                            "No scans yet. Results will appear here after your first scan."
                        </div>
                    }.into_view()
                } else {
                    let download_report = download_report.clone();
                    view! {
                        <table class="history-table w-full">
                            <thead>
                                <tr>
                                    <th>"URL"</th>
                                    <th>"Status"</th>
                                    <th>"Time"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                {rows.into_iter().map(|row| {
                                    let download_report = download_report.clone();
                                    let index = row.index;
                                    view! {
                                        <tr>
                                            <td class="break-all">{row.url}</td>
                                            <td><span class=format!("status-badge {}", row.status_class)>{row.status}</span></td>
                                            <td class="text-muted">{row.time}</td>
                                            <td>
                                                <button
                                                    class="btn btn-small"
                                                    on:click=move |_| download_report(index)
                                                >
                                                    "Report"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                }).collect_view()}
                            </tbody>
                        </table>
                    }.into_view()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use phishscan::model::Verdict;

    #[test]
    fn test_history_rows_newest_first() {
        let mut history = ScanHistory::default();
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        history.record(ScanHistoryEntry::new("https://a.test", Verdict::Safe, at));
        history.record(ScanHistoryEntry::new("https://b.test", Verdict::Dangerous, at));

        let rows = history_rows(&history);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].url, "https://b.test");
        assert_eq!(rows[0].status_class, "status-dangerous");
        assert_eq!(rows[1].index, 1);
        assert_eq!(rows[1].status, Verdict::Safe.label());
    }
}
