//! One-shot entrance animations for cards.
//!
//! Every observed card carries a triggered flag. The first intersection flips
//! it and asks the caller to stop observing; later intersections are ignored.

use std::collections::BTreeMap;

pub const REVEAL_ID_ATTRIBUTE: &str = "data-reveal-id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Play the animation and unobserve the element.
    Animate,
    AlreadyRevealed,
    NotVisible,
    Untracked,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealTracker {
    triggered: BTreeMap<String, bool>,
}

impl RevealTracker {
    pub fn new(ids: impl IntoIterator<Item = String>) -> Self {
        let mut tracker = Self::default();
        for id in ids {
            tracker.observe(id);
        }
        tracker
    }

    pub fn observe(&mut self, id: String) {
        self.triggered.entry(id).or_insert(false);
    }

    pub fn on_intersection(&mut self, id: &str, is_intersecting: bool) -> RevealOutcome {
        let Some(triggered) = self.triggered.get_mut(id) else {
            return RevealOutcome::Untracked;
        };

        if *triggered {
            return RevealOutcome::AlreadyRevealed;
        }

        if !is_intersecting {
            return RevealOutcome::NotVisible;
        }

        *triggered = true;
        RevealOutcome::Animate
    }

    pub fn reveal_all(&mut self) {
        for triggered in self.triggered.values_mut() {
            *triggered = true;
        }
    }

    pub fn is_revealed(&self, id: &str) -> bool {
        self.triggered.get(id).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.triggered
            .iter()
            .filter(|(_, triggered)| !**triggered)
            .map(|(id, _)| id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> RevealTracker {
        RevealTracker::new(["skill-rust".to_string(), "project1".to_string()])
    }

    #[test]
    fn card_never_intersecting_never_animates() {
        let mut tracker = tracker();

        assert_eq!(tracker.on_intersection("project1", false), RevealOutcome::NotVisible);
        assert!(!tracker.is_revealed("project1"));
        assert_eq!(tracker.pending().count(), 2);
    }

    #[test]
    fn card_animates_exactly_once() {
        let mut tracker = tracker();

        assert_eq!(tracker.on_intersection("skill-rust", true), RevealOutcome::Animate);
        for _ in 0..3 {
            assert_eq!(tracker.on_intersection("skill-rust", false), RevealOutcome::AlreadyRevealed);
            assert_eq!(tracker.on_intersection("skill-rust", true), RevealOutcome::AlreadyRevealed);
        }
        assert!(tracker.is_revealed("skill-rust"));
        assert_eq!(tracker.pending().collect::<Vec<_>>(), vec!["project1"]);
    }

    #[test]
    fn unknown_card_is_untracked() {
        let mut tracker = tracker();

        assert_eq!(tracker.on_intersection("footer", true), RevealOutcome::Untracked);
        assert!(!tracker.is_revealed("footer"));
    }

    #[test]
    fn observing_twice_keeps_triggered_flag() {
        let mut tracker = tracker();
        tracker.on_intersection("project1", true);
        tracker.observe("project1".to_string());

        assert!(tracker.is_revealed("project1"));
    }

    #[test]
    fn reveal_all_marks_every_card() {
        let mut tracker = tracker();
        tracker.reveal_all();

        assert_eq!(tracker.pending().count(), 0);
    }
}
