//! # Site Settings
//!
//! Every timing and geometry constant the page behaviour depends on. The
//! defaults are the values the portfolio ships with; a page may override any
//! subset by embedding a JSON block:
//!
//! ```html
//! <script type="application/json" id="folio-config">
//!   { "submit_delay_ms": 800, "mobile_breakpoint_px": 900 }
//! </script>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use folio_core::settings::SiteSettings;
//!
//! let settings = SiteSettings::from_json(r#"{ "header_offset_px": 64 }"#).unwrap();
//! assert_eq!(settings.header_offset_px, 64.0);
//! assert_eq!(settings.submit_delay_ms, 1500);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{FolioError, FolioResult};

/// Element id of the optional settings block in the host page
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Tunable page behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSettings {
    /// Space left above an anchor target after scrolling (fixed navbar height)
    pub header_offset_px: f64,

    /// How far above its top a section becomes the active one
    pub section_activation_offset_px: f64,

    /// Duration of the fallback smooth-scroll animation
    pub smooth_scroll_duration_ms: f64,

    /// Minimum interval between active-section recomputations
    pub scroll_throttle_ms: f64,

    /// Quiet period before a resize is acted on
    pub resize_debounce_ms: u32,

    /// Simulated network latency of the contact form
    pub submit_delay_ms: u32,

    /// How long the success banner stays visible
    pub success_banner_ms: u32,

    /// Fraction of an element that must be visible to reveal it
    pub reveal_threshold: f64,

    /// Intersection root margin for reveal animations (CSS margin syntax)
    pub reveal_root_margin: String,

    /// Selectors of elements that animate in on first visibility
    pub reveal_selectors: Vec<String>,

    /// Vertical parallax factor applied to the hero image
    pub parallax_factor: f64,

    /// Scroll distance after which the navbar gets its compact style
    pub navbar_scrolled_threshold_px: f64,

    /// Viewports wider than this never show the mobile menu
    pub mobile_breakpoint_px: f64,

    /// Image shown in place of a source that failed to load
    pub placeholder_image: String,

    /// Hostnames that count as development machines for logging
    pub development_hosts: Vec<String>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            header_offset_px: 80.0,
            section_activation_offset_px: 100.0,
            smooth_scroll_duration_ms: 800.0,
            scroll_throttle_ms: 100.0,
            resize_debounce_ms: 250,
            submit_delay_ms: 1500,
            success_banner_ms: 5000,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            reveal_selectors: [
                ".project-card",
                ".skill-card",
                ".timeline-item",
                ".about-content",
                ".contact-info",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            parallax_factor: -0.5,
            navbar_scrolled_threshold_px: 50.0,
            mobile_breakpoint_px: 768.0,
            placeholder_image: "images/placeholder.svg".to_string(),
            development_hosts: ["localhost", "127.0.0.1", "::1", ""]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SiteSettings {
    /// Parse settings from a JSON object, filling absent keys with defaults,
    /// and validate the result.
    pub fn from_json(json: &str) -> FolioResult<Self> {
        let settings: SiteSettings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject values no page could meaningfully use.
    pub fn validate(&self) -> FolioResult<()> {
        let non_negative = [
            ("header_offset_px", self.header_offset_px),
            ("section_activation_offset_px", self.section_activation_offset_px),
            ("smooth_scroll_duration_ms", self.smooth_scroll_duration_ms),
            ("scroll_throttle_ms", self.scroll_throttle_ms),
            ("navbar_scrolled_threshold_px", self.navbar_scrolled_threshold_px),
            ("mobile_breakpoint_px", self.mobile_breakpoint_px),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(FolioError::invalid_setting(
                    field,
                    value.to_string(),
                    "Must be a finite, non-negative number",
                ));
            }
        }

        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(FolioError::invalid_setting(
                "reveal_threshold",
                self.reveal_threshold.to_string(),
                "Must be within 0..=1",
            ));
        }

        if !is_root_margin(&self.reveal_root_margin) {
            return Err(FolioError::invalid_setting(
                "reveal_root_margin",
                self.reveal_root_margin.clone(),
                "Must be one to four <n>px or <n>% values",
            ));
        }

        if !self.parallax_factor.is_finite() {
            return Err(FolioError::invalid_setting(
                "parallax_factor",
                self.parallax_factor.to_string(),
                "Must be a finite number",
            ));
        }

        Ok(())
    }
}

/// CSS margin shorthand as `IntersectionObserver` accepts it: one to four
/// lengths, each in `px` or `%`.
fn is_root_margin(margin: &str) -> bool {
    let tokens: Vec<&str> = margin.split_whitespace().collect();
    (1..=4).contains(&tokens.len())
        && tokens.iter().all(|token| {
            token
                .strip_suffix("px")
                .or_else(|| token.strip_suffix('%'))
                .and_then(|n| n.parse::<f64>().ok())
                .is_some_and(f64::is_finite)
        })
}
