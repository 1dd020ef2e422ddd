//! Verdict Panel
//!
//! Renders one `VerdictView`: status header, confidence, extracted features
//! and the per-feature SHAP contribution bars.

use leptos::*;

use phishscan::verdict::{FeatureRow, ShapBar, VerdictView};

/// Result of one scan
#[component]
pub fn VerdictPanel(verdict: VerdictView) -> impl IntoView {
    let VerdictView {
        url,
        style,
        message,
        confidence_text,
        features,
        shap_bars,
        ..
    } = verdict.clone();

    view! {
        <section class=verdict.panel_class()>
            <div class="verdict-header flex items-center space-x-3">
                <span class="verdict-icon text-3xl">{style.icon()}</span>
                <div>
                    <h2 class="verdict-title text-2xl font-bold">{verdict.title()}</h2>
                    <p class="verdict-url text-sm break-all">{url}</p>
                </div>
            </div>

            {(!message.is_empty()).then(move || view! { <p class="verdict-message mt-3">{message}</p> })}

            <div class="verdict-confidence mt-4">
                <span class="text-muted">"Confidence: "</span>
                <span class="font-semibold">{confidence_text}</span>
            </div>

            <FeatureList rows=features />
            <ShapBars bars=shap_bars />
        </section>
    }
}

#[component]
fn FeatureList(rows: Vec<FeatureRow>) -> impl IntoView {
    if rows.is_empty() {
        return view! {}.into_view();
    }

    view! {
        <div class="feature-list mt-6">
            <h3 class="text-lg font-semibold mb-2">"URL Features"</h3>
            <ul class="space-y-1">
                {rows.into_iter().map(|row| view! {
                    <li class="feature-row">
                        <span class="feature-name capitalize">{row.label}</span>
                        ": "
                        <span class="feature-value">{row.value}</span>
                    </li>
                }).collect_view()}
            </ul>
        </div>
    }
    .into_view()
}

/// Horizontal bars, width proportional to |value|
#[component]
pub fn ShapBars(bars: Vec<ShapBar>) -> impl IntoView {
    if bars.is_empty() {
        return view! {}.into_view();
    }

    view! {
        <div class="shap-chart mt-6">
            <h3 class="text-lg font-semibold mb-2">"Feature Contributions"</h3>
            {bars.into_iter().map(|bar| view! {
                <div class="shap-row flex items-center gap-3 mb-1">
                    <span class="shap-label w-40 truncate">{bar.label.clone()}</span>
                    <div class="shap-track flex-1">
                        <div
                            class=format!("shap-bar {}", bar.direction.css_class())
                            style=format!("width: {:.1}%", bar.width_pct)
                        />
                    </div>
                    <span class="shap-value w-16 text-right">{bar.value_text()}</span>
                </div>
            }).collect_view()}
        </div>
    }
    .into_view()
}
