//! Visibility-driven helpers: reveal animations, lazy images, broken-image
//! fallback.

use crate::settings::SiteSettings;

/// Attribute holding the deferred source of a lazy image
pub const LAZY_SOURCE_ATTR: &str = "data-src";
/// Set on an image once it has been swapped to the placeholder
pub const FALLBACK_MARKER_ATTR: &str = "data-fallback";

/// Intersection observer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

impl ObserverOptions {
    /// Options for reveal-on-scroll targets
    pub fn reveal(settings: &SiteSettings) -> Self {
        ObserverOptions {
            threshold: settings.reveal_threshold,
            root_margin: settings.reveal_root_margin.clone(),
        }
    }

    /// Options for lazy images: load as soon as any pixel is visible
    pub fn lazy_images() -> Self {
        ObserverOptions {
            threshold: 0.0,
            root_margin: "0px".to_string(),
        }
    }
}

/// What to do with an observed reveal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealAction {
    /// Add the revealed class (idempotent, observation stays in place)
    Reveal,
    Ignore,
}

pub fn reveal_action(is_intersecting: bool) -> RevealAction {
    if is_intersecting {
        RevealAction::Reveal
    } else {
        RevealAction::Ignore
    }
}

/// What to do with an observed lazy image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LazyImageAction {
    /// Swap in the real source, drop the deferred attribute, stop observing
    Load { src: String },
    /// Deferred attribute is empty; just stop observing
    Discard,
    /// Not visible yet
    Wait,
}

pub fn lazy_image_action(is_intersecting: bool, deferred_src: Option<&str>) -> LazyImageAction {
    if !is_intersecting {
        return LazyImageAction::Wait;
    }
    match deferred_src.map(str::trim) {
        Some(src) if !src.is_empty() => LazyImageAction::Load {
            src: src.to_string(),
        },
        _ => LazyImageAction::Discard,
    }
}

/// Replacement source for an image that failed to load, or `None` if the
/// image already fell back once (the placeholder itself is broken).
pub fn fallback_source<'a>(already_fell_back: bool, placeholder: &'a str) -> Option<&'a str> {
    if already_fell_back || placeholder.is_empty() {
        None
    } else {
        Some(placeholder)
    }
}
