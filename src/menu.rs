#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    /// State after a nav-link click. Only the narrow layout collapses; the
    /// wide layout has no togglable panel.
    pub fn after_link_click(self, narrow_viewport: bool) -> Self {
        if narrow_viewport {
            Self::Closed
        } else {
            self
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }
}

pub fn is_narrow_viewport(width: f64, breakpoint_px: f64) -> bool {
    width <= breakpoint_px
}
