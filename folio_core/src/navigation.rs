//! # Navigation Controller
//!
//! Mobile menu toggling, active-section highlighting, in-page anchor
//! scrolling, navbar and hero reactions to scroll, and closing the mobile
//! menu once the viewport grows past the mobile breakpoint.

use tracing::debug;

use crate::effects::{Effect, Target, TimerId, TimerKind};
use crate::scroll::{active_section, anchor_fragment, anchor_scroll_target, parallax_offset, SectionBounds};
use crate::settings::SiteSettings;
use crate::state::UiState;
use crate::timing::{Debounce, DebounceTicket, Throttle};
use crate::views::{ACTIVE_CLASS, SCROLLED_CLASS};

#[derive(Debug, Clone)]
pub struct NavController {
    header_offset: f64,
    activation_offset: f64,
    navbar_threshold: f64,
    parallax_factor: f64,
    mobile_breakpoint: f64,
    section_throttle: Throttle,
    resize: Debounce<f64>,
    navbar_scrolled: bool,
}

impl NavController {
    pub fn new(settings: &SiteSettings) -> Self {
        NavController {
            header_offset: settings.header_offset_px,
            activation_offset: settings.section_activation_offset_px,
            navbar_threshold: settings.navbar_scrolled_threshold_px,
            parallax_factor: settings.parallax_factor,
            mobile_breakpoint: settings.mobile_breakpoint_px,
            section_throttle: Throttle::new(settings.scroll_throttle_ms),
            resize: Debounce::new(settings.resize_debounce_ms),
            navbar_scrolled: false,
        }
    }

    /// Flip the mobile menu.
    pub fn toggle_menu(&mut self, state: &mut UiState) -> Vec<Effect> {
        state.is_menu_open = !state.is_menu_open;
        debug!(open = state.is_menu_open, "menu toggled");
        menu_effects(state)
    }

    /// Close the mobile menu if it is open.
    pub fn close_menu(&mut self, state: &mut UiState) -> Vec<Effect> {
        if state.is_menu_open {
            self.toggle_menu(state)
        } else {
            Vec::new()
        }
    }

    /// React to a scroll event. Navbar styling and parallax follow every
    /// event; section geometry is only requested when the throttle admits
    /// the tick, and answered through [`sections_measured`](Self::sections_measured).
    pub fn on_scroll(&mut self, state: &mut UiState, now_ms: f64, scroll_y: f64) -> Vec<Effect> {
        state.scroll_position = scroll_y;
        let mut effects = Vec::new();

        let scrolled = scroll_y > self.navbar_threshold;
        if scrolled != self.navbar_scrolled {
            self.navbar_scrolled = scrolled;
            effects.push(Effect::SetClass {
                target: Target::Navbar,
                class: SCROLLED_CLASS,
                enabled: scrolled,
            });
        }

        effects.push(Effect::TranslateY {
            target: Target::HeroImage,
            px: parallax_offset(scroll_y, self.parallax_factor),
        });

        if self.section_throttle.admit(now_ms) {
            effects.push(Effect::MeasureSections);
        }
        effects
    }

    /// The host measured the sections after an admitted scroll tick.
    pub fn sections_measured(&self, state: &mut UiState, scroll_y: f64, sections: &[SectionBounds]) -> Vec<Effect> {
        state.scroll_position = scroll_y;
        self.update_active_section(scroll_y, sections)
    }

    /// Highlight the nav link of the section containing `scroll_y`.
    pub fn update_active_section(&self, scroll_y: f64, sections: &[SectionBounds]) -> Vec<Effect> {
        let current = active_section(scroll_y, sections, self.activation_offset);
        vec![Effect::SetActiveLink(current.map(str::to_string))]
    }

    /// An in-page link was clicked. `target_top` is the document offset of
    /// the element the fragment names, or `None` if the page has no such
    /// element. Default navigation is always suppressed by the host.
    pub fn handle_anchor_click(
        &mut self,
        state: &mut UiState,
        href: &str,
        target_top: Option<f64>,
    ) -> Vec<Effect> {
        let mut effects = self.close_menu(state);
        match (anchor_fragment(href), target_top) {
            (Some(_), Some(top)) => effects.push(Effect::ScrollTo {
                y: anchor_scroll_target(top, self.header_offset),
            }),
            (Some(id), None) => debug!(id, "anchor target not found"),
            (None, _) => {}
        }
        effects
    }

    /// Record a resize; acted on once resizing stops.
    pub fn on_resize(&mut self, width: f64) -> Vec<Effect> {
        let mut effects = Vec::new();
        if self.resize.is_pending() {
            effects.push(Effect::CancelTimer(TimerId::new(
                TimerKind::ResizeSettle,
                self.resize.generation(),
            )));
        }
        let ticket = self.resize.call(width);
        effects.push(Effect::Schedule {
            timer: TimerId::new(TimerKind::ResizeSettle, ticket.generation()),
            delay_ms: self.resize.delay_ms(),
        });
        effects
    }

    /// The resize timer for `generation` elapsed.
    pub fn resize_settled(&mut self, state: &mut UiState, generation: u64) -> Vec<Effect> {
        match self.resize.fire(DebounceTicket::from_generation(generation)) {
            Some(width) if width > self.mobile_breakpoint => self.close_menu(state),
            _ => Vec::new(),
        }
    }
}

fn menu_effects(state: &UiState) -> Vec<Effect> {
    vec![
        Effect::SetClass {
            target: Target::NavMenu,
            class: ACTIVE_CLASS,
            enabled: state.is_menu_open,
        },
        Effect::SetClass {
            target: Target::Hamburger,
            class: ACTIVE_CLASS,
            enabled: state.is_menu_open,
        },
        Effect::LockScroll(state.scroll_locked()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> NavController {
        NavController::new(&SiteSettings::default())
    }

    fn sections() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("inicio", 0.0, 800.0),
            SectionBounds::new("proyectos", 800.0, 1200.0),
            SectionBounds::new("contacto", 2000.0, 600.0),
        ]
    }

    #[test]
    fn test_toggle_menu_twice() {
        let mut nav = controller();
        let mut state = UiState::default();

        let effects = nav.toggle_menu(&mut state);
        assert!(state.is_menu_open);
        assert!(effects.contains(&Effect::SetClass {
            target: Target::NavMenu,
            class: ACTIVE_CLASS,
            enabled: true
        }));
        assert!(effects.contains(&Effect::SetClass {
            target: Target::Hamburger,
            class: ACTIVE_CLASS,
            enabled: true
        }));
        assert!(effects.contains(&Effect::LockScroll(true)));

        let effects = nav.toggle_menu(&mut state);
        assert!(!state.is_menu_open);
        assert!(effects.contains(&Effect::LockScroll(false)));
    }

    #[test]
    fn test_menu_close_keeps_lock_while_modal_open() {
        let mut nav = controller();
        let mut state = UiState {
            is_menu_open: true,
            is_modal_open: true,
            ..Default::default()
        };
        let effects = nav.toggle_menu(&mut state);
        assert!(effects.contains(&Effect::LockScroll(true)));
    }

    #[test]
    fn test_close_menu_when_closed_is_noop() {
        let mut nav = controller();
        let mut state = UiState::default();
        assert!(nav.close_menu(&mut state).is_empty());
    }

    #[test]
    fn test_scroll_throttles_active_section() {
        let mut nav = controller();
        let mut state = UiState::default();
        let sections = sections();

        let first = nav.on_scroll(&mut state, 0.0, 750.0);
        assert!(first.contains(&Effect::MeasureSections));
        assert_eq!(
            nav.sections_measured(&mut state, 750.0, &sections),
            vec![Effect::SetActiveLink(Some("proyectos".to_string()))]
        );

        // Inside the window nothing is measured
        for now in [10.0, 40.0, 99.0] {
            let suppressed = nav.on_scroll(&mut state, now, 2000.0);
            assert!(!suppressed.contains(&Effect::MeasureSections));
        }
        assert_eq!(state.scroll_position, 2000.0);

        let later = nav.on_scroll(&mut state, 120.0, 2000.0);
        assert!(later.contains(&Effect::MeasureSections));
        assert_eq!(
            nav.sections_measured(&mut state, 2000.0, &sections),
            vec![Effect::SetActiveLink(Some("contacto".to_string()))]
        );
    }

    #[test]
    fn test_no_matching_section_clears_links() {
        let nav = controller();
        assert_eq!(
            nav.update_active_section(9000.0, &sections()),
            vec![Effect::SetActiveLink(None)]
        );
    }

    #[test]
    fn test_navbar_class_only_on_threshold_crossing() {
        let mut nav = controller();
        let mut state = UiState::default();

        let down = nav.on_scroll(&mut state, 0.0, 60.0);
        assert!(down.contains(&Effect::SetClass {
            target: Target::Navbar,
            class: SCROLLED_CLASS,
            enabled: true
        }));

        let further = nav.on_scroll(&mut state, 500.0, 300.0);
        assert!(!further
            .iter()
            .any(|e| matches!(e, Effect::SetClass { target: Target::Navbar, .. })));

        let top = nav.on_scroll(&mut state, 1000.0, 0.0);
        assert!(top.contains(&Effect::SetClass {
            target: Target::Navbar,
            class: SCROLLED_CLASS,
            enabled: false
        }));
    }

    #[test]
    fn test_parallax_on_every_scroll() {
        let mut nav = controller();
        let mut state = UiState::default();
        let effects = nav.on_scroll(&mut state, 0.0, 200.0);
        assert!(effects.contains(&Effect::TranslateY {
            target: Target::HeroImage,
            px: -100.0
        }));
    }

    #[test]
    fn test_anchor_click_scrolls_below_header() {
        let mut nav = controller();
        let mut state = UiState::default();
        let effects = nav.handle_anchor_click(&mut state, "#contacto", Some(2000.0));
        assert_eq!(effects, vec![Effect::ScrollTo { y: 1920.0 }]);
    }

    #[test]
    fn test_anchor_click_missing_target_is_noop() {
        let mut nav = controller();
        let mut state = UiState::default();
        assert!(nav.handle_anchor_click(&mut state, "#nada", None).is_empty());
        assert!(nav.handle_anchor_click(&mut state, "#", Some(10.0)).is_empty());
    }

    #[test]
    fn test_anchor_click_closes_open_menu() {
        let mut nav = controller();
        let mut state = UiState {
            is_menu_open: true,
            ..Default::default()
        };
        let effects = nav.handle_anchor_click(&mut state, "#proyectos", Some(800.0));
        assert!(!state.is_menu_open);
        assert_eq!(effects.last(), Some(&Effect::ScrollTo { y: 720.0 }));
    }

    #[test]
    fn test_resize_debounced_closes_menu_on_desktop() {
        let mut nav = controller();
        let mut state = UiState {
            is_menu_open: true,
            ..Default::default()
        };

        let first = nav.on_resize(500.0);
        assert_eq!(
            first,
            vec![Effect::Schedule {
                timer: TimerId::new(TimerKind::ResizeSettle, 1),
                delay_ms: 250
            }]
        );
        let second = nav.on_resize(1024.0);
        assert_eq!(
            second[0],
            Effect::CancelTimer(TimerId::new(TimerKind::ResizeSettle, 1))
        );

        // Stale timer does nothing
        assert!(nav.resize_settled(&mut state, 1).is_empty());
        assert!(state.is_menu_open);

        let effects = nav.resize_settled(&mut state, 2);
        assert!(!state.is_menu_open);
        assert!(effects.contains(&Effect::LockScroll(false)));
    }

    #[test]
    fn test_resize_to_mobile_keeps_menu() {
        let mut nav = controller();
        let mut state = UiState {
            is_menu_open: true,
            ..Default::default()
        };
        nav.on_resize(400.0);
        assert!(nav.resize_settled(&mut state, 1).is_empty());
        assert!(state.is_menu_open);
    }
}
