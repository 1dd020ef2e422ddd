//! App Root Component
//!
//! Main application component with routing and global providers.

use leptos::*;
use leptos_router::*;

use crate::components::{LoadingScreen, Nav, ParticleBackground, Toast};
use crate::pages::{History, Home, Landing, Scanner, Settings};
use crate::state::global::{provide_global_state, GlobalState};

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    // Provide global state to all components
    provide_global_state();

    // Initial stats for the dashboard counters
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    spawn_local(async move {
        state.refresh_stats().await;
    });

    view! {
        <Router>
            <div class="app-shell min-h-screen flex flex-col">
                // Decorative background, dark mode only
                <ParticleBackground />

                // Navigation header
                <Nav />

                // Main content area
                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path="/" view=Landing />
                        <Route path="/home" view=Home />
                        <Route path="/scanner" view=Scanner />
                        <Route path="/history" view=History />
                        <Route path="/settings" view=Settings />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                // Toast notifications
                <Toast />

                // First-visit loading overlay
                <LoadingScreen />
            </div>
        </Router>
    }
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <div class="text-6xl mb-4">"🔍"</div>
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-muted mb-6">"The page you're looking for doesn't exist."</p>
            <A href="/scanner" class="btn btn-primary">
                "Scan a URL"
            </A>
        </div>
    }
}
