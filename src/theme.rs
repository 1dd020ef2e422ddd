//! Theme Application
//!
//! Keeps every theme toggle on the page in sync with the persisted theme.
//! A change coming from one control updates the others silently, so no
//! control ever sees its own change handler re-triggered.

use crate::prefs::{KeyValueStore, PreferenceStore, Theme};

/// Handle to a registered toggle control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ToggleId(usize);

#[derive(Debug, Clone)]
struct ThemeToggle {
    name: String,
    dark: bool,
}

/// Side effects the page must apply after a theme change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeChange {
    pub theme: Theme,
    /// Decorative particles are shown in dark mode only
    pub particles_visible: bool,
}

impl ThemeChange {
    fn for_theme(theme: Theme) -> Self {
        Self {
            theme,
            particles_visible: theme.is_dark(),
        }
    }
}

/// Owner of the current theme and the toggles that display it
#[derive(Debug)]
pub struct ThemeController<S> {
    prefs: PreferenceStore<S>,
    current: Theme,
    toggles: Vec<ThemeToggle>,
}

impl<S: KeyValueStore> ThemeController<S> {
    pub fn new(prefs: PreferenceStore<S>) -> Self {
        let current = prefs.theme();
        Self {
            prefs,
            current,
            toggles: Vec::new(),
        }
    }

    /// Register a toggle control; it starts out showing the current theme
    pub fn register(&mut self, name: impl Into<String>) -> ToggleId {
        self.toggles.push(ThemeToggle {
            name: name.into(),
            dark: self.current.is_dark(),
        });
        ToggleId(self.toggles.len() - 1)
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    /// What a toggle currently displays
    pub fn is_dark_checked(&self, id: ToggleId) -> bool {
        self.toggles.get(id.0).map(|t| t.dark).unwrap_or(false)
    }

    pub fn toggle_name(&self, id: ToggleId) -> Option<&str> {
        self.toggles.get(id.0).map(|t| t.name.as_str())
    }

    /// Effects to apply once on page load
    pub fn initial(&self) -> ThemeChange {
        ThemeChange::for_theme(self.current)
    }

    /// Handle a user change on one toggle
    ///
    /// Returns `None` when the change does not alter the theme, which is
    /// what a programmatic sync of the other controls produces.
    pub fn on_toggle(&mut self, source: ToggleId, dark_checked: bool) -> Option<ThemeChange> {
        if let Some(toggle) = self.toggles.get_mut(source.0) {
            toggle.dark = dark_checked;
        }
        self.apply(Theme::from_dark_checked(dark_checked))
    }

    /// Switch to `theme`, persisting it and syncing every control
    pub fn apply(&mut self, theme: Theme) -> Option<ThemeChange> {
        if theme == self.current {
            return None;
        }

        self.current = theme;
        for toggle in &mut self.toggles {
            toggle.dark = theme.is_dark();
        }
        self.prefs.set_theme(theme);
        tracing::debug!(theme = %theme, "Theme changed");

        Some(ThemeChange::for_theme(theme))
    }

    pub fn prefs(&self) -> &PreferenceStore<S> {
        &self.prefs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::MemoryStore;

    fn controller() -> ThemeController<MemoryStore> {
        ThemeController::new(PreferenceStore::new(MemoryStore::new()))
    }

    #[test]
    fn test_light_to_dark_syncs_both_toggles() {
        let mut themes = controller();
        let nav = themes.register("nav");
        let settings = themes.register("settings");
        assert!(!themes.is_dark_checked(nav));
        assert!(!themes.is_dark_checked(settings));

        let change = themes.on_toggle(nav, true).unwrap();
        assert_eq!(change.theme, Theme::Dark);
        assert!(change.particles_visible);

        assert!(themes.is_dark_checked(nav));
        assert!(themes.is_dark_checked(settings));
        assert_eq!(themes.prefs().theme(), Theme::Dark);
    }

    #[test]
    fn test_synced_control_does_not_retrigger() {
        let mut themes = controller();
        let nav = themes.register("nav");
        let settings = themes.register("settings");

        assert!(themes.on_toggle(nav, true).is_some());
        // The settings control now echoes the state it was given
        assert!(themes.on_toggle(settings, true).is_none());
        assert_eq!(themes.theme(), Theme::Dark);
    }

    #[test]
    fn test_back_to_light_hides_particles() {
        let mut themes = controller();
        let settings = themes.register("settings");
        themes.apply(Theme::Dark);

        let change = themes.on_toggle(settings, false).unwrap();
        assert_eq!(change.theme, Theme::Light);
        assert!(!change.particles_visible);
    }

    #[test]
    fn test_initial_reads_persisted_theme() {
        let store = MemoryStore::new();
        store.set(crate::prefs::THEME_KEY, "dark");
        let mut themes = ThemeController::new(PreferenceStore::new(store));
        let nav = themes.register("nav");

        assert_eq!(themes.initial().theme, Theme::Dark);
        assert!(themes.is_dark_checked(nav));
        assert_eq!(themes.toggle_name(nav), Some("nav"));
    }
}
