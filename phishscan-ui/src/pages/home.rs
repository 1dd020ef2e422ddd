//! Home Dashboard
//!
//! Live counters from `/api/stats` and charts of the session's scans.

use leptos::*;
use leptos_router::*;

use phishscan::charts::{daily_series, short_day_label, VerdictCounts};
use phishscan::model::Stats;

use crate::components::{BarChart, DoughnutChart, LineChart};
use crate::state::global::GlobalState;

/// Dashboard page component
#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    // Fetch fresh stats on mount
    let state_for_mount = state.clone();
    spawn_local(async move {
        state_for_mount.refresh_stats().await;
    });

    let stats = state.stats;
    let session = state.session;

    let counts = Signal::derive(move || {
        let from_session = session.with(|s| s.counts);
        chart_counts(from_session, stats.get())
    });

    let activity = Signal::derive(move || {
        let timestamps = session.with(|s| s.history.timestamps());
        let today = chrono::Local::now().date_naive();
        daily_series(&timestamps, &chrono::Local, today, short_day_label)
    });

    view! {
        <div class="space-y-8">
            // Page header
            <div class="flex items-center justify-between">
                <div>
                    <h1 class="text-3xl font-bold">"Dashboard"</h1>
                    <p class="text-muted mt-1">"Scan activity at a glance"</p>
                </div>
                <A href="/scanner" class="btn btn-primary">"New Scan"</A>
            </div>

            // Counters
            <section class="grid grid-cols-1 md:grid-cols-3 gap-4">
                <StatCard
                    label="Total Scans"
                    value=Signal::derive(move || stats.get().map(|s| s.total_scans.to_string()))
                />
                <StatCard
                    label="Threats Blocked"
                    value=Signal::derive(move || stats.get().map(|s| s.threats_blocked.to_string()))
                />
                <StatCard
                    label="Safe Rate"
                    value=Signal::derive(move || stats.get().and_then(safe_rate_text))
                />
            </section>

            // Charts
            <section class="grid md:grid-cols-2 gap-6">
                <div class="card rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Verdicts"</h2>
                    <BarChart counts=counts />
                </div>
                <div class="card rounded-xl p-6">
                    <h2 class="text-xl font-semibold mb-4">"Threat Share"</h2>
                    <DoughnutChart counts=counts />
                </div>
            </section>

            <section class="card rounded-xl p-6">
                <h2 class="text-xl font-semibold mb-4">"Scans per Day"</h2>
                <LineChart series=activity />
            </section>
        </div>
    }
}

#[component]
fn StatCard(
    label: &'static str,
    #[prop(into)]
    value: Signal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="card stat-card rounded-xl p-4">
            <div class="text-sm text-muted">{label}</div>
            <div class="text-3xl font-bold mt-1">
                {move || value.get().unwrap_or_else(|| "—".to_string())}
            </div>
        </div>
    }
}

/// Session counts when this session has scanned, backend totals otherwise
fn chart_counts(session: VerdictCounts, stats: Option<Stats>) -> VerdictCounts {
    match stats {
        Some(stats) if session.total() == 0 => VerdictCounts::from_stats(&stats),
        _ => session,
    }
}

/// Share of scans that were not threats, e.g. `92.5%`
fn safe_rate_text(stats: Stats) -> Option<String> {
    if stats.total_scans == 0 {
        return None;
    }
    let safe = stats.total_scans.saturating_sub(stats.threats_blocked);
    Some(format!("{:.1}%", safe as f64 / stats.total_scans as f64 * 100.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_counts_prefers_session() {
        let stats = Stats {
            total_scans: 10,
            threats_blocked: 3,
        };

        let from_stats = chart_counts(VerdictCounts::default(), Some(stats));
        assert_eq!(from_stats.dangerous, 3);
        assert_eq!(from_stats.safe, 7);

        let session = VerdictCounts {
            safe: 1,
            suspicious: 1,
            dangerous: 0,
        };
        assert_eq!(chart_counts(session, Some(stats)), session);
        assert_eq!(chart_counts(VerdictCounts::default(), None).total(), 0);
    }

    #[test]
    fn test_safe_rate_text() {
        let stats = Stats {
            total_scans: 40,
            threats_blocked: 3,
        };
        assert_eq!(safe_rate_text(stats).as_deref(), Some("92.5%"));
        assert_eq!(safe_rate_text(Stats::default()), None);
    }
}
