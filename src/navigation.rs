use crate::throttle::Throttle;

#[derive(Clone, Debug, PartialEq)]
pub struct SectionOffset<'a> {
    pub id: &'a str,
    pub top: f64,
}

/// Scans sections top to bottom; the last one whose threshold
/// (`top - lookahead`) has been reached wins.
pub fn active_section<'a>(
    scroll_y: f64,
    sections: &[SectionOffset<'a>],
    lookahead_px: f64,
) -> Option<&'a str> {
    let mut current = None;
    for section in sections {
        if scroll_y >= section.top - lookahead_px {
            current = Some(section.id);
        }
    }
    current
}

/// Section id targeted by an in-page link, `None` for anything that is not a
/// bare fragment.
pub fn fragment_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// What a nav link click should do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LinkFollow<'a> {
    /// Not an in-page link; the browser handles it.
    Browser,
    /// Suppress the jump and smooth-scroll to the section.
    Scroll(&'a str),
    /// Suppress the jump; the section is not on the page.
    MissingTarget(&'a str),
}

impl LinkFollow<'_> {
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::Browser)
    }
}

pub fn follow_link<'a>(href: &'a str, section_exists: impl Fn(&str) -> bool) -> LinkFollow<'a> {
    match fragment_target(href) {
        None => LinkFollow::Browser,
        Some(id) if section_exists(id) => LinkFollow::Scroll(id),
        Some(id) => {
            log::warn!("nav link `{href}` points at missing section `#{id}`");
            LinkFollow::MissingTarget(id)
        }
    }
}

pub fn link_is_active(href: &str, active: Option<&str>) -> bool {
    match (fragment_target(href), active) {
        (Some(target), Some(active)) => target == active,
        _ => false,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NavigationTracker {
    lookahead_px: f64,
    throttle: Throttle,
    active: Option<String>,
}

impl NavigationTracker {
    pub fn new(lookahead_px: f64, throttle_ms: u32) -> Self {
        Self {
            lookahead_px,
            throttle: Throttle::new(throttle_ms),
            active: None,
        }
    }

    /// Throttled scroll handler. Returns the new active id only when it
    /// differs from the last one reported.
    pub fn on_scroll(
        &mut self,
        now_ms: f64,
        scroll_y: f64,
        sections: &[SectionOffset<'_>],
    ) -> Option<Option<String>> {
        if !self.throttle.admit(now_ms) {
            return None;
        }

        let next = active_section(scroll_y, sections, self.lookahead_px).map(str::to_string);
        if next == self.active {
            return None;
        }

        self.active = next.clone();
        Some(next)
    }
}
