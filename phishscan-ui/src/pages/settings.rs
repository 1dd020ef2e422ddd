//! Settings Page
//!
//! Appearance preferences and the backend connection.

use leptos::*;

use phishscan::ScanApi;

use crate::api;
use crate::components::ThemeToggle;
use crate::state::global::GlobalState;

/// Settings page component
#[component]
pub fn Settings() -> impl IntoView {
    view! {
        <div class="space-y-8">
            // Header
            <div>
                <h1 class="text-3xl font-bold">"Settings"</h1>
                <p class="text-muted mt-1">"Appearance and connection preferences"</p>
            </div>

            <AppearanceSettings />

            <ApiSettings />

            <AboutSection />
        </div>
    }
}

/// Theme and animation preferences
#[component]
fn AppearanceSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let animations_enabled = state.animations_enabled;

    let state_for_toggle = state.clone();
    let on_animations = move |ev| {
        state_for_toggle.set_animations_enabled(event_target_checked(&ev));
    };

    view! {
        <section class="card rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"Appearance"</h2>

            <div class="space-y-4">
                <div class="flex items-center justify-between">
                    <div>
                        <h3 class="font-medium">"Dark Mode"</h3>
                        <p class="text-sm text-muted">"Also shows the particle background"</p>
                    </div>
                    <ThemeToggle toggle=state.settings_toggle />
                </div>

                <div class="flex items-center justify-between">
                    <div>
                        <h3 class="font-medium">"Animations"</h3>
                        <p class="text-sm text-muted">"Loading screen and background motion"</p>
                    </div>
                    <label class="switch">
                        <input
                            type="checkbox"
                            prop:checked=move || animations_enabled.get()
                            on:change=on_animations
                        />
                        <span class="switch-slider" />
                    </label>
                </div>
            </div>
        </section>
    }
}

/// API connection settings
#[component]
fn ApiSettings() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let (api_url, set_api_url) = create_signal(api::get_api_base());
    let (testing, set_testing) = create_signal(false);
    let (test_result, set_test_result) = create_signal(None::<bool>);

    let state_for_test = state.clone();
    let test_connection = move |_| {
        set_testing.set(true);
        set_test_result.set(None);

        let state = state_for_test.clone();
        state.set_api_base(&api_url.get());

        spawn_local(async move {
            match state.scanner.api().stats().await {
                Ok(stats) => {
                    state.stats.set(Some(stats));
                    let _ = set_test_result.try_set(Some(true));
                    state.show_success("Connection successful!");
                }
                Err(e) => {
                    let _ = set_test_result.try_set(Some(false));
                    state.show_error(&format!("Connection failed: {}", e.user_message()));
                }
            }
            let _ = set_testing.try_set(false);
        });
    };

    let state_for_save = state;
    let save_url = move |_| {
        state_for_save.set_api_base(&api_url.get());
        state_for_save.show_success("API URL saved");
    };

    view! {
        <section class="card rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"API Connection"</h2>

            <div class="space-y-4">
                <div>
                    <label class="block text-sm text-muted mb-2">
                        "Scan backend URL (empty for this site)"
                    </label>
                    <div class="flex space-x-2">
                        <input
                            type="text"
                            placeholder="http://localhost:5000"
                            prop:value=move || api_url.get()
                            on:input=move |ev| set_api_url.set(event_target_value(&ev))
                            class="flex-1 rounded-lg px-4 py-3"
                        />
                        <button
                            on:click=test_connection
                            disabled=move || testing.get()
                            class="btn btn-secondary"
                        >
                            {move || if testing.get() { "Testing..." } else { "Test" }}
                        </button>
                        <button on:click=save_url class="btn btn-primary">
                            "Save"
                        </button>
                    </div>
                </div>

                // Connection status
                <div class="flex items-center space-x-2">
                    <span class="text-sm text-muted">"Status:"</span>
                    {move || {
                        match test_result.get() {
                            Some(true) => view! {
                                <span class="text-safe">"✓ Connected"</span>
                            }.into_view(),
                            Some(false) => view! {
                                <span class="text-dangerous">"✕ Failed"</span>
                            }.into_view(),
                            None => view! {
                                <span class="text-muted">"Not tested"</span>
                            }.into_view(),
                        }
                    }}
                </div>
            </div>
        </section>
    }
}

/// About section
#[component]
fn AboutSection() -> impl IntoView {
    view! {
        <section class="card rounded-xl p-6">
            <h2 class="text-xl font-semibold mb-4">"About PhishScan"</h2>

            <div class="space-y-4">
                <p>
                    "PhishScan classifies URLs as safe, suspicious or dangerous and shows "
                    "which features of the URL drove the verdict."
                </p>

                <p class="text-sm text-muted">
                    {format!("Version {} • Built with Rust and Leptos", env!("CARGO_PKG_VERSION"))}
                </p>
            </div>
        </section>
    }
}
