//! Landing Page
//!
//! Introduction with links into the scanner and the dashboard, over its own
//! particle scene.

use leptos::*;
use leptos_router::*;

use crate::components::ParticleScene;

const HERO_PARTICLES: usize = 200;

/// Landing page component
#[component]
pub fn Landing() -> impl IntoView {
    view! {
        <div class="landing space-y-16">
            // Hero
            <section class="hero relative text-center py-16">
                <ParticleScene count=HERO_PARTICLES class="hero-scene" />
                <h1 class="text-5xl font-bold mb-4">"Spot phishing links before they spot you"</h1>
                <p class="text-xl text-muted mb-8">
                    "PhishScan checks a URL against a trained model and explains which "
                    "features drove the verdict."
                </p>
                <div class="flex justify-center space-x-4">
                    <A href="/scanner" class="btn btn-primary">"Scan a URL"</A>
                    <A href="/home" class="btn btn-secondary">"View Dashboard"</A>
                </div>
            </section>

            // Features
            <section class="grid md:grid-cols-3 gap-6">
                <FeatureCard
                    icon="⚡"
                    title="Instant verdicts"
                    text="Safe, suspicious or dangerous, with the model's confidence."
                />
                <FeatureCard
                    icon="📊"
                    title="Explained results"
                    text="See how each URL feature pushed the score up or down."
                />
                <FeatureCard
                    icon="🧩"
                    title="Browser extension"
                    text="Scan the current tab or any link from the context menu."
                />
            </section>
        </div>
    }
}

#[component]
fn FeatureCard(
    icon: &'static str,
    title: &'static str,
    text: &'static str,
) -> impl IntoView {
    view! {
        <div class="card p-6 rounded-xl">
            <div class="text-3xl mb-3">{icon}</div>
            <h3 class="text-lg font-semibold mb-2">{title}</h3>
            <p class="text-muted">{text}</p>
        </div>
    }
}
