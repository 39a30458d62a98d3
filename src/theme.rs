//! Theme modes and their persistence.
//!
//! The mode is held as an explicit value; classes on the body and the hero
//! background are derived from it, never read back to decide the next mode.
//! The one exception is first load without a stored preference, where the
//! served markup's classes decide the starting mode.

use crate::storage::KeyValueStore;

const LIGHT_BACKGROUND_CLASS: &str = "light-bg";
const MODERN_BACKGROUND_CLASS: &str = "modern-bg";
const LIGHT_BODY_CLASS: &str = "light-theme";
const MODERN_BODY_CLASS: &str = "modern-theme";

const BODY_THEME_CLASSES: [&str; 2] = [LIGHT_BODY_CLASS, MODERN_BODY_CLASS];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
    Modern,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
            Self::Modern => "modern",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            "modern" => Some(Self::Modern),
            _ => None,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Modern,
            Self::Modern => Self::Dark,
        }
    }

    /// `aria-pressed` on the toggle: any non-default mode counts as pressed.
    pub fn pressed(self) -> bool {
        !matches!(self, Self::Dark)
    }

    pub fn toggle_label(self) -> String {
        let next = self.next().as_str();
        format!("Switch to {next} theme")
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Dark => "◑",
            Self::Light => "◐",
            Self::Modern => "◒",
        }
    }

    pub fn background_class(self) -> Option<&'static str> {
        match self {
            Self::Dark => None,
            Self::Light => Some(LIGHT_BACKGROUND_CLASS),
            Self::Modern => Some(MODERN_BACKGROUND_CLASS),
        }
    }

    pub fn body_class(self) -> Option<&'static str> {
        match self {
            Self::Dark => None,
            Self::Light => Some(LIGHT_BODY_CLASS),
            Self::Modern => Some(MODERN_BODY_CLASS),
        }
    }

    /// Theme body classes that must be removed when switching to this mode.
    pub fn stale_body_classes(self) -> impl Iterator<Item = &'static str> {
        let keep = self.body_class();
        BODY_THEME_CLASSES
            .into_iter()
            .filter(move |class| Some(*class) != keep)
    }

    /// Mode implied by classes already present in the markup.
    pub fn infer_from_classes<'a>(classes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut light = false;
        let mut modern = false;
        for class in classes {
            match class {
                LIGHT_BODY_CLASS | LIGHT_BACKGROUND_CLASS => light = true,
                MODERN_BODY_CLASS | MODERN_BACKGROUND_CLASS => modern = true,
                _ => {}
            }
        }

        if modern {
            Self::Modern
        } else if light {
            Self::Light
        } else {
            Self::Dark
        }
    }
}

pub struct ThemeController<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ThemeController<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Starting mode: the stored preference when present, otherwise whatever
    /// the markup classes imply.
    pub fn load<'a>(&self, markup_classes: impl IntoIterator<Item = &'a str>) -> ThemeMode {
        match self.store.get(&self.key) {
            Some(stored) => ThemeMode::parse(stored.trim()).unwrap_or_else(|| {
                log::warn!("ignoring unrecognized stored theme `{stored}`");
                ThemeMode::Dark
            }),
            None => ThemeMode::infer_from_classes(markup_classes),
        }
    }

    /// Advances the cycle and persists the result. A failed write is logged;
    /// the in-page mode still changes.
    pub fn toggle(&self, current: ThemeMode) -> ThemeMode {
        let next = current.next();
        if let Err(err) = self.store.set(&self.key, next.as_str()) {
            log::warn!("theme preference not persisted: {err}");
        }
        log::debug!("theme changed from {} to {}", current.as_str(), next.as_str());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PageError;
    use crate::storage::MemoryStore;

    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Option<String> {
            None
        }

        fn set(&self, key: &str, _value: &str) -> Result<(), PageError> {
            Err(PageError::Storage {
                key: key.to_string(),
                reason: "quota exceeded".to_string(),
            })
        }
    }

    fn active_flags(mode: ThemeMode) -> usize {
        usize::from(mode.background_class().is_some()) + usize::from(mode.body_class().is_some())
    }

    #[test]
    fn three_toggles_return_to_dark() {
        let controller = ThemeController::new(MemoryStore::default(), "pageTheme");
        let mut mode = ThemeMode::Dark;
        let mut seen = Vec::new();

        for _ in 0..3 {
            mode = controller.toggle(mode);
            seen.push(mode);
        }

        assert_eq!(seen, vec![ThemeMode::Light, ThemeMode::Modern, ThemeMode::Dark]);
    }

    #[test]
    fn persisted_value_tracks_active_mode() {
        let controller = ThemeController::new(MemoryStore::default(), "pageTheme");
        let mut mode = ThemeMode::Dark;

        for _ in 0..4 {
            mode = controller.toggle(mode);
            assert_eq!(controller.store.get("pageTheme").as_deref(), Some(mode.as_str()));
            assert_eq!(controller.load(std::iter::empty()), mode);
        }
    }

    #[test]
    fn exactly_one_mode_flag_set_is_active() {
        assert_eq!(active_flags(ThemeMode::Dark), 0);
        assert_eq!(ThemeMode::Light.background_class(), Some("light-bg"));
        assert_eq!(ThemeMode::Light.body_class(), Some("light-theme"));
        assert_eq!(ThemeMode::Modern.background_class(), Some("modern-bg"));
        assert_eq!(ThemeMode::Modern.body_class(), Some("modern-theme"));
        assert_ne!(ThemeMode::Light.body_class(), ThemeMode::Modern.body_class());
        assert_eq!(active_flags(ThemeMode::Light), 2);
        assert_eq!(active_flags(ThemeMode::Modern), 2);
    }

    #[test]
    fn switching_mode_removes_only_other_theme_classes() {
        let stale = |mode: ThemeMode| mode.stale_body_classes().collect::<Vec<_>>();

        assert_eq!(stale(ThemeMode::Dark), vec!["light-theme", "modern-theme"]);
        assert_eq!(stale(ThemeMode::Light), vec!["modern-theme"]);
        assert_eq!(stale(ThemeMode::Modern), vec!["light-theme"]);
    }

    #[test]
    fn pressed_reflects_non_default_mode() {
        assert!(!ThemeMode::Dark.pressed());
        assert!(ThemeMode::Light.pressed());
        assert!(ThemeMode::Modern.pressed());
    }

    #[test]
    fn load_defaults_to_dark_without_stored_value_or_classes() {
        let controller = ThemeController::new(MemoryStore::default(), "pageTheme");

        assert_eq!(controller.load(["hero", "page"]), ThemeMode::Dark);
    }

    #[test]
    fn load_infers_mode_from_markup_when_nothing_stored() {
        let controller = ThemeController::new(MemoryStore::default(), "pageTheme");

        assert_eq!(controller.load(["light-theme"]), ThemeMode::Light);
        assert_eq!(controller.load(["light-theme", "modern-theme"]), ThemeMode::Modern);
    }

    #[test]
    fn stored_value_wins_over_markup() {
        let store = MemoryStore::default();
        store.set("pageTheme", "modern").expect("memory store accepts writes");
        let controller = ThemeController::new(store, "pageTheme");

        assert_eq!(controller.load(["light-theme"]), ThemeMode::Modern);
    }

    #[test]
    fn unrecognized_stored_value_falls_back_to_dark() {
        let store = MemoryStore::default();
        store.set("pageTheme", "sepia").expect("memory store accepts writes");
        let controller = ThemeController::new(store, "pageTheme");

        assert_eq!(controller.load(["modern-theme"]), ThemeMode::Dark);
    }

    #[test]
    fn failed_write_still_advances_mode() {
        let controller = ThemeController::new(ReadOnlyStore, "pageTheme");

        assert_eq!(controller.toggle(ThemeMode::Light), ThemeMode::Modern);
    }

    #[test]
    fn toggle_label_names_next_mode() {
        assert_eq!(ThemeMode::Modern.toggle_label(), "Switch to dark theme");
        assert_eq!(ThemeMode::parse("light"), Some(ThemeMode::Light));
        assert_eq!(ThemeMode::parse("Light"), None);
    }
}
