//! Navigation Component
//!
//! Header navigation bar with logo, links and the theme toggle.

use leptos::*;
use leptos_router::*;

use phishscan::theme::ToggleId;

use crate::state::global::GlobalState;

/// Navigation header component
#[component]
pub fn Nav() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <nav class="nav-bar">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    // Logo and brand
                    <A href="/" class="flex items-center space-x-3">
                        <span class="text-2xl">"🛡️"</span>
                        <span class="text-xl font-bold">"PhishScan"</span>
                    </A>

                    // Navigation links
                    <div class="flex items-center space-x-1">
                        <NavLink href="/home" label="Dashboard" />
                        <NavLink href="/scanner" label="Scanner" />
                        <NavLink href="/history" label="History" />
                        <NavLink href="/settings" label="Settings" />
                        <ThemeToggle toggle=state.nav_toggle />
                    </div>
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(
    href: &'static str,
    label: &'static str,
) -> impl IntoView {
    view! {
        <A
            href=href
            class="nav-link px-4 py-2 rounded-lg transition-colors"
            active_class="nav-link-active"
        >
            {label}
        </A>
    }
}

/// Light/dark switch; checked means dark
///
/// Every instance displays the shared theme. Updating `checked` from the
/// signal does not fire `change`, so only the user's own click reaches
/// `toggle_theme`.
#[component]
pub fn ThemeToggle(
    toggle: ToggleId,
    #[prop(optional)]
    label: Option<&'static str>,
) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    let state_for_checked = state.clone();
    let on_change = move |ev| {
        state.toggle_theme(toggle, event_target_checked(&ev));
    };

    view! {
        <label class="theme-toggle" title="Toggle dark mode">
            <input
                type="checkbox"
                prop:checked=move || state_for_checked.is_dark_checked(toggle)
                on:change=on_change
            />
            <span class="theme-toggle-slider" />
            {label.map(|text| view! { <span class="ml-2">{text}</span> })}
        </label>
    }
}
