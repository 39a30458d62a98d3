//! Project catalog and the detail modal.

#[derive(Debug, PartialEq, Eq)]
pub struct Project {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub description: &'static str,
    pub technologies: &'static [&'static str],
    pub features: &'static [&'static str],
    pub link: &'static str,
}

pub const PROJECTS: &[Project] = &[
    Project {
        id: "project1",
        title: "Weather Station Dashboard",
        summary: "Live sensor readings from a backyard weather station.",
        description: "A dashboard that ingests readings from a microcontroller weather station, \
            stores them as time series and renders rolling charts with daily highs and lows.",
        technologies: &["Rust", "Axum", "SQLite", "Chart.js"],
        features: &[
            "Ingests sensor readings every 30 seconds",
            "Rolling 24-hour and 7-day charts",
            "Alerting when temperature crosses a threshold",
        ],
        link: "https://github.com/portfolio-owner/weather-station",
    },
    Project {
        id: "project2",
        title: "Recipe Planner",
        summary: "Weekly meal planning with a generated shopping list.",
        description: "A meal planner that turns a week of chosen recipes into a consolidated \
            shopping list, merging quantities and grouping items by aisle.",
        technologies: &["TypeScript", "React", "PostgreSQL"],
        features: &[
            "Drag-and-drop weekly calendar",
            "Shopping list with merged quantities",
            "Recipe import from URLs",
        ],
        link: "https://github.com/portfolio-owner/recipe-planner",
    },
    Project {
        id: "project3",
        title: "Terminal Habit Tracker",
        summary: "Streak tracking from the command line.",
        description: "A small command-line tool for logging daily habits, showing streaks and a \
            calendar heatmap right in the terminal.",
        technologies: &["Rust", "Clap", "Ratatui"],
        features: &[
            "Calendar heatmap view",
            "Streak and completion statistics",
            "Plain-text data file that syncs anywhere",
        ],
        link: "https://github.com/portfolio-owner/habit-tracker",
    },
];

pub fn lookup(id: &str) -> Option<&'static Project> {
    PROJECTS.iter().find(|project| project.id == id)
}

/// Interactions the open modal reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModalInput {
    BackdropClick,
    ContentClick,
    CloseClick,
    Escape,
}

impl ModalInput {
    pub fn dismisses(self) -> bool {
        !matches!(self, Self::ContentClick)
    }
}

/// Visibility plus whatever was last written into the display slots.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    pub visible: bool,
    pub shown: Option<&'static Project>,
}

impl ModalState {
    /// Shows the modal for `id`. Unknown ids write nothing, so the previous
    /// project (if any) stays on screen. Returns whether the id was known.
    pub fn open(&mut self, id: &str) -> bool {
        let found = lookup(id);
        if let Some(project) = found {
            self.shown = Some(project);
        } else {
            log::warn!("unknown project `{id}`; modal keeps previous content");
        }
        self.visible = true;
        found.is_some()
    }

    pub fn close(&mut self) {
        self.visible = false;
    }

    /// Returns whether the input hid the modal.
    pub fn handle(&mut self, input: ModalInput) -> bool {
        if !self.visible || !input.dismisses() {
            return false;
        }
        self.close();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_total_for_known_ids() {
        for id in ["project1", "project2", "project3"] {
            let project = lookup(id).expect("known project id");
            assert_eq!(project.id, id);
            assert!(!project.technologies.is_empty());
            assert!(!project.features.is_empty());
        }
        assert!(lookup("project4").is_none());
    }

    #[test]
    fn opening_project2_fills_every_slot() {
        let mut modal = ModalState::default();

        assert!(modal.open("project2"));
        assert!(modal.visible);

        let shown = modal.shown.expect("slots populated");
        assert_eq!(shown.title, "Recipe Planner");
        assert!(shown.description.starts_with("A meal planner"));
        assert_eq!(shown.technologies, &["TypeScript", "React", "PostgreSQL"]);
        assert_eq!(shown.features.len(), 3);
        assert_eq!(shown.link, "https://github.com/portfolio-owner/recipe-planner");
    }

    #[test]
    fn unknown_id_keeps_previous_content_visible() {
        let mut modal = ModalState::default();
        modal.open("project1");
        modal.close();

        assert!(!modal.open("project9"));
        assert!(modal.visible);
        assert_eq!(modal.shown.map(|project| project.id), Some("project1"));
    }

    #[test]
    fn unknown_id_on_fresh_modal_shows_empty_slots() {
        let mut modal = ModalState::default();

        modal.open("");
        assert!(modal.visible);
        assert!(modal.shown.is_none());
    }

    #[test]
    fn backdrop_close_control_and_escape_dismiss() {
        for input in [ModalInput::BackdropClick, ModalInput::CloseClick, ModalInput::Escape] {
            let mut modal = ModalState::default();
            modal.open("project1");

            assert!(modal.handle(input), "{input:?} should dismiss");
            assert!(!modal.visible);
        }
    }

    #[test]
    fn content_click_keeps_modal_open() {
        let mut modal = ModalState::default();
        modal.open("project2");

        assert!(!modal.handle(ModalInput::ContentClick));
        assert!(modal.visible);
        assert_eq!(modal.shown.map(|project| project.id), Some("project2"));
    }

    #[test]
    fn input_on_hidden_modal_is_ignored() {
        let mut modal = ModalState::default();

        assert!(!modal.handle(ModalInput::BackdropClick));
        assert!(!modal.visible);
    }

    #[test]
    fn close_hides_without_clearing_slots() {
        let mut modal = ModalState::default();
        modal.open("project3");
        modal.close();

        assert!(!modal.visible);
        assert_eq!(modal.shown.map(|project| project.id), Some("project3"));
    }
}
