//! # Scroll Geometry
//!
//! Pure scroll calculations: which section is active, where an anchor
//! scrolls to, the fallback smooth-scroll animation, and the hero parallax.

use serde::{Deserialize, Serialize};

/// Measured position of a `section[id]` element, in document coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        SectionBounds {
            id: id.into(),
            top,
            height,
        }
    }

    /// Whether `scroll_y` falls in `[top - offset, top - offset + height)`.
    pub fn contains(&self, scroll_y: f64, offset: f64) -> bool {
        let start = self.top - offset;
        scroll_y >= start && scroll_y < start + self.height
    }
}

/// Id of the section the reader is in: the last section, in document order,
/// whose activation band contains `scroll_y`.
///
/// ```rust
/// use folio_core::scroll::{active_section, SectionBounds};
///
/// let sections = [
///     SectionBounds::new("inicio", 0.0, 600.0),
///     SectionBounds::new("proyectos", 600.0, 900.0),
/// ];
/// assert_eq!(active_section(550.0, &sections, 100.0), Some("proyectos"));
/// assert_eq!(active_section(2000.0, &sections, 100.0), None);
/// ```
pub fn active_section(scroll_y: f64, sections: &[SectionBounds], offset: f64) -> Option<&str> {
    sections
        .iter()
        .filter(|s| s.contains(scroll_y, offset))
        .last()
        .map(|s| s.id.as_str())
}

/// Extract the element id from an in-page link (`"#contacto"` → `"contacto"`).
///
/// Returns `None` for a bare `#` and for anything that is not a fragment.
pub fn anchor_fragment(href: &str) -> Option<&str> {
    let id = href.strip_prefix('#')?;
    (!id.is_empty()).then_some(id)
}

/// Scroll offset that leaves `header_offset` pixels above an anchor target.
pub fn anchor_scroll_target(target_top: f64, header_offset: f64) -> f64 {
    (target_top - header_offset).max(0.0)
}

/// Quadratic ease-in-out over `t ∈ [0, 1]`.
pub fn ease_in_out_quad(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// Vertical offset of the hero image for the current scroll position.
pub fn parallax_offset(scroll_y: f64, factor: f64) -> f64 {
    scroll_y * factor
}

/// One step of a [`ScrollAnimation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    /// Scroll offset to apply this frame
    pub y: f64,
    /// The animation has reached its target; request no further frames
    pub done: bool,
}

/// Frame-driven smooth scroll for hosts without native smooth scrolling.
///
/// The clock starts on the first frame, matching how animation-frame
/// timestamps arrive.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollAnimation {
    from: f64,
    to: f64,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl ScrollAnimation {
    pub fn new(from: f64, to: f64, duration_ms: f64) -> Self {
        ScrollAnimation {
            from,
            to,
            duration_ms,
            started_at: None,
        }
    }

    pub fn target(&self) -> f64 {
        self.to
    }

    /// Position for an animation-frame timestamp.
    pub fn frame(&mut self, now_ms: f64) -> ScrollFrame {
        let start = *self.started_at.get_or_insert(now_ms);
        if self.duration_ms <= 0.0 {
            return ScrollFrame { y: self.to, done: true };
        }
        let progress = ((now_ms - start) / self.duration_ms).clamp(0.0, 1.0);
        let y = self.from + (self.to - self.from) * ease_in_out_quad(progress);
        ScrollFrame {
            y,
            done: progress >= 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("inicio", 0.0, 700.0),
            SectionBounds::new("sobre-mi", 700.0, 500.0),
            SectionBounds::new("proyectos", 1200.0, 1000.0),
            SectionBounds::new("contacto", 2200.0, 600.0),
        ]
    }

    #[test]
    fn test_active_section_bands() {
        let sections = page();
        assert_eq!(active_section(0.0, &sections, 100.0), Some("inicio"));
        // 100px before a section's top it takes over
        assert_eq!(active_section(599.0, &sections, 100.0), Some("inicio"));
        assert_eq!(active_section(600.0, &sections, 100.0), Some("sobre-mi"));
        assert_eq!(active_section(2150.0, &sections, 100.0), Some("contacto"));
    }

    #[test]
    fn test_no_section_matches() {
        let sections = page();
        assert_eq!(active_section(5000.0, &sections, 100.0), None);
        assert_eq!(active_section(10.0, &[], 100.0), None);
    }

    #[test]
    fn test_last_overlapping_section_wins() {
        let sections = vec![
            SectionBounds::new("a", 0.0, 1000.0),
            SectionBounds::new("b", 200.0, 100.0),
        ];
        assert_eq!(active_section(150.0, &sections, 100.0), Some("b"));
    }

    #[test]
    fn test_anchor_fragment() {
        assert_eq!(anchor_fragment("#contacto"), Some("contacto"));
        assert_eq!(anchor_fragment("#"), None);
        assert_eq!(anchor_fragment(""), None);
        assert_eq!(anchor_fragment("https://example.com/#x"), None);
    }

    #[test]
    fn test_anchor_target_offset() {
        assert_eq!(anchor_scroll_target(1200.0, 80.0), 1120.0);
        assert_eq!(anchor_scroll_target(30.0, 80.0), 0.0);
    }

    #[test]
    fn test_easing_endpoints_and_symmetry() {
        assert_eq!(ease_in_out_quad(0.0), 0.0);
        assert_eq!(ease_in_out_quad(0.5), 0.5);
        assert_eq!(ease_in_out_quad(1.0), 1.0);
        assert!((ease_in_out_quad(0.25) + ease_in_out_quad(0.75) - 1.0).abs() < 1e-12);
        assert_eq!(ease_in_out_quad(2.0), 1.0);
    }

    #[test]
    fn test_animation_runs_to_target() {
        let mut anim = ScrollAnimation::new(0.0, 1000.0, 800.0);
        let first = anim.frame(5000.0);
        assert_eq!(first, ScrollFrame { y: 0.0, done: false });

        let mid = anim.frame(5400.0);
        assert!((mid.y - 500.0).abs() < 1e-9);
        assert!(!mid.done);

        let last = anim.frame(5800.0);
        assert_eq!(last, ScrollFrame { y: 1000.0, done: true });
    }

    #[test]
    fn test_animation_upwards() {
        let mut anim = ScrollAnimation::new(900.0, 100.0, 800.0);
        anim.frame(0.0);
        let quarter = anim.frame(200.0);
        // ease(0.25) = 0.125
        assert!((quarter.y - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let mut anim = ScrollAnimation::new(0.0, 300.0, 0.0);
        assert_eq!(anim.frame(1.0), ScrollFrame { y: 300.0, done: true });
    }

    #[test]
    fn test_parallax() {
        assert_eq!(parallax_offset(400.0, -0.5), -200.0);
        assert_eq!(parallax_offset(0.0, -0.5), 0.0);
    }
}
