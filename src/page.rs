//! Single owner of the page's interactive state.
//!
//! Every event is folded in through `PageState::apply`; storage writes and
//! DOM mutations stay in the browser glue.

use crate::{
    menu::MenuState,
    projects::{ModalInput, ModalState},
    reveal::{RevealOutcome, RevealTracker},
    theme::ThemeMode,
};

#[derive(Clone, Debug, PartialEq)]
pub enum PageAction {
    SetTheme(ThemeMode),
    ToggleMenu,
    NavLinkClicked { narrow_viewport: bool },
    SetActiveSection(Option<String>),
    Reveal(String),
    RevealAll,
    OpenProject(String),
    Modal(ModalInput),
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageState {
    pub theme: ThemeMode,
    pub menu: MenuState,
    pub active_section: Option<String>,
    pub reveal: RevealTracker,
    pub modal: ModalState,
}

impl PageState {
    pub fn new(theme: ThemeMode, card_ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            theme,
            menu: MenuState::default(),
            active_section: None,
            reveal: RevealTracker::new(card_ids),
            modal: ModalState::default(),
        }
    }

    pub fn apply(&mut self, action: PageAction) {
        match action {
            PageAction::SetTheme(theme) => self.theme = theme,
            PageAction::ToggleMenu => self.menu = self.menu.toggled(),
            PageAction::NavLinkClicked { narrow_viewport } => {
                self.menu = self.menu.after_link_click(narrow_viewport);
            }
            PageAction::SetActiveSection(section) => self.active_section = section,
            PageAction::Reveal(id) => {
                if self.reveal.on_intersection(&id, true) == RevealOutcome::Untracked {
                    log::debug!("reveal requested for untracked card `{id}`");
                }
            }
            PageAction::RevealAll => self.reveal.reveal_all(),
            PageAction::OpenProject(id) => {
                self.modal.open(&id);
            }
            PageAction::Modal(input) => {
                self.modal.handle(input);
            }
        }
    }
}
