//! Runtime tuning for the interactive layer.
//!
//! Overrides are read from an optional JSON blob embedded in the page
//! (`<script type="application/json" id="site-config">`). Each value is kept
//! only when it lies inside its bounds; anything else falls back to the
//! default.

use log::Level;
use serde::Deserialize;

use crate::error::PageError;

pub const SITE_CONFIG_ELEMENT_ID: &str = "site-config";

const DEFAULT_PARALLAX_SPEED: f64 = 0.5;
const DEFAULT_PARALLAX_THROTTLE_MS: u32 = 16;
const DEFAULT_NAV_THROTTLE_MS: u32 = 100;
const DEFAULT_NAV_LOOKAHEAD_PX: f64 = 200.0;
const DEFAULT_MOBILE_BREAKPOINT_PX: f64 = 768.0;
const DEFAULT_REVEAL_THRESHOLD: f64 = 0.1;
const DEFAULT_REVEAL_BOTTOM_MARGIN_PX: u32 = 100;
const DEFAULT_THEME_STORAGE_KEY: &str = "pageTheme";
const DEFAULT_LOG_LEVEL: Level = Level::Info;

const PARALLAX_SPEED_BOUNDS: (f64, f64) = (0.0, 2.0);
const PARALLAX_THROTTLE_MS_BOUNDS: (u32, u32) = (1, 1_000);
const NAV_THROTTLE_MS_BOUNDS: (u32, u32) = (1, 2_000);
const NAV_LOOKAHEAD_PX_BOUNDS: (f64, f64) = (0.0, 2_000.0);
const MOBILE_BREAKPOINT_PX_BOUNDS: (f64, f64) = (240.0, 4_096.0);
const REVEAL_THRESHOLD_BOUNDS: (f64, f64) = (0.0, 1.0);
const REVEAL_BOTTOM_MARGIN_PX_BOUNDS: (u32, u32) = (0, 1_000);

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub parallax_speed: f64,
    pub parallax_throttle_ms: u32,
    pub nav_throttle_ms: u32,
    pub nav_lookahead_px: f64,
    pub mobile_breakpoint_px: f64,
    pub reveal_threshold: f64,
    pub reveal_bottom_margin_px: u32,
    pub theme_storage_key: String,
    pub log_level: Level,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            parallax_speed: DEFAULT_PARALLAX_SPEED,
            parallax_throttle_ms: DEFAULT_PARALLAX_THROTTLE_MS,
            nav_throttle_ms: DEFAULT_NAV_THROTTLE_MS,
            nav_lookahead_px: DEFAULT_NAV_LOOKAHEAD_PX,
            mobile_breakpoint_px: DEFAULT_MOBILE_BREAKPOINT_PX,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
            reveal_bottom_margin_px: DEFAULT_REVEAL_BOTTOM_MARGIN_PX,
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SiteConfigOverrides {
    parallax_speed: Option<f64>,
    parallax_throttle_ms: Option<u32>,
    nav_throttle_ms: Option<u32>,
    nav_lookahead_px: Option<f64>,
    mobile_breakpoint_px: Option<f64>,
    reveal_threshold: Option<f64>,
    reveal_bottom_margin_px: Option<u32>,
    theme_storage_key: Option<String>,
    log_level: Option<String>,
}

impl SiteConfig {
    /// Parse the embedded JSON blob. Blank input yields the defaults.
    pub fn from_json(raw: &str) -> Result<Self, PageError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let overrides: SiteConfigOverrides = serde_json::from_str(raw)?;
        Ok(Self::from_overrides(overrides))
    }

    fn from_overrides(overrides: SiteConfigOverrides) -> Self {
        Self {
            parallax_speed: f64_with_bounds(
                overrides.parallax_speed,
                DEFAULT_PARALLAX_SPEED,
                PARALLAX_SPEED_BOUNDS,
            ),
            parallax_throttle_ms: u32_with_bounds(
                overrides.parallax_throttle_ms,
                DEFAULT_PARALLAX_THROTTLE_MS,
                PARALLAX_THROTTLE_MS_BOUNDS,
            ),
            nav_throttle_ms: u32_with_bounds(
                overrides.nav_throttle_ms,
                DEFAULT_NAV_THROTTLE_MS,
                NAV_THROTTLE_MS_BOUNDS,
            ),
            nav_lookahead_px: f64_with_bounds(
                overrides.nav_lookahead_px,
                DEFAULT_NAV_LOOKAHEAD_PX,
                NAV_LOOKAHEAD_PX_BOUNDS,
            ),
            mobile_breakpoint_px: f64_with_bounds(
                overrides.mobile_breakpoint_px,
                DEFAULT_MOBILE_BREAKPOINT_PX,
                MOBILE_BREAKPOINT_PX_BOUNDS,
            ),
            reveal_threshold: f64_with_bounds(
                overrides.reveal_threshold,
                DEFAULT_REVEAL_THRESHOLD,
                REVEAL_THRESHOLD_BOUNDS,
            ),
            reveal_bottom_margin_px: u32_with_bounds(
                overrides.reveal_bottom_margin_px,
                DEFAULT_REVEAL_BOTTOM_MARGIN_PX,
                REVEAL_BOTTOM_MARGIN_PX_BOUNDS,
            ),
            theme_storage_key: overrides
                .theme_storage_key
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_THEME_STORAGE_KEY.to_string()),
            log_level: parse_log_level(overrides.log_level.as_deref(), DEFAULT_LOG_LEVEL),
        }
    }

    /// Root margin for the card observer: shrinks the viewport from below so
    /// cards trigger slightly before they would otherwise cross into view.
    pub fn reveal_root_margin(&self) -> String {
        format!("0px 0px -{}px 0px", self.reveal_bottom_margin_px)
    }
}

fn f64_with_bounds(value: Option<f64>, default: f64, bounds: (f64, f64)) -> f64 {
    value
        .filter(|value| value.is_finite())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn u32_with_bounds(value: Option<u32>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

fn parse_log_level(value: Option<&str>, default: Level) -> Level {
    value
        .and_then(|value| value.trim().parse::<Level>().ok())
        .unwrap_or(default)
}
