//! # Case Study Dialog
//!
//! Two-state controller (Closed, Open) for the project dialog. The open
//! state and the shown project live in [`UiState`]; this type only knows how
//! to move between the states and what the page must do for each move.
//!
//! Opening paths: a click on a project card. Closing paths: the close
//! control, a click on the overlay outside the dialog body, Escape.

use tracing::debug;

use crate::case_studies::CaseStudyCatalog;
use crate::effects::{Effect, Target};
use crate::state::UiState;
use crate::views::{self, ACTIVE_CLASS};

/// Key value that closes the dialog
pub const CLOSE_KEY: &str = "Escape";

#[derive(Debug, Clone)]
pub struct ModalController {
    catalog: CaseStudyCatalog,
}

impl ModalController {
    pub fn new(catalog: CaseStudyCatalog) -> Self {
        ModalController { catalog }
    }

    pub fn catalog(&self) -> &CaseStudyCatalog {
        &self.catalog
    }

    /// Show the case study for `project_id`. Unknown ids change nothing.
    ///
    /// Opening while already open swaps the content to the new project.
    pub fn open(&self, state: &mut UiState, project_id: &str) -> Vec<Effect> {
        let study = match self.catalog.require(project_id) {
            Ok(study) => study,
            Err(err) => {
                debug!(%err, "ignoring click");
                return Vec::new();
            }
        };

        state.current_project = Some(study.id.clone());
        state.is_modal_open = true;
        debug!(project_id, "case study opened");

        vec![
            Effect::SetClass {
                target: Target::Modal,
                class: ACTIVE_CLASS,
                enabled: true,
            },
            Effect::LockScroll(state.scroll_locked()),
            Effect::SetContent {
                target: Target::ModalContent,
                content: Some(views::case_study(study)),
            },
            Effect::Focus(Target::ModalClose),
        ]
    }

    /// Hide the dialog and drop its content. Closing a closed dialog is a
    /// no-op.
    pub fn close(&self, state: &mut UiState) -> Vec<Effect> {
        if !state.is_modal_open {
            return Vec::new();
        }
        state.is_modal_open = false;
        state.current_project = None;

        vec![
            Effect::SetClass {
                target: Target::Modal,
                class: ACTIVE_CLASS,
                enabled: false,
            },
            Effect::LockScroll(state.scroll_locked()),
            Effect::SetContent {
                target: Target::ModalContent,
                content: None,
            },
        ]
    }

    /// Keyboard handler: Escape closes an open dialog.
    pub fn on_key(&self, state: &mut UiState, key: &str) -> Vec<Effect> {
        if key == CLOSE_KEY && state.is_modal_open {
            self.close(state)
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ModalController {
        ModalController::new(CaseStudyCatalog::builtin().clone())
    }

    fn rendered(effects: &[Effect]) -> Option<&crate::markup::Node> {
        effects.iter().find_map(|e| match e {
            Effect::SetContent {
                target: Target::ModalContent,
                content,
            } => content.as_ref(),
            _ => None,
        })
    }

    #[test]
    fn test_open_known_project() {
        let modal = controller();
        let mut state = UiState::default();
        let effects = modal.open(&mut state, "fintech");

        assert!(state.is_modal_open);
        assert_eq!(state.current_project.as_deref(), Some("fintech"));
        assert!(effects.contains(&Effect::LockScroll(true)));
        assert_eq!(effects.last(), Some(&Effect::Focus(Target::ModalClose)));

        let content = rendered(&effects).unwrap();
        assert!(content.text_content().contains("App de finanzas personales"));
    }

    #[test]
    fn test_open_unknown_project_stays_closed() {
        let modal = controller();
        let mut state = UiState::default();
        let effects = modal.open(&mut state, "robotica");
        assert!(effects.is_empty());
        assert!(!state.is_modal_open);
        assert!(state.current_project.is_none());
    }

    #[test]
    fn test_open_then_close_clears_everything() {
        let modal = controller();
        let mut state = UiState::default();
        modal.open(&mut state, "salud");
        let effects = modal.close(&mut state);

        assert!(!state.is_modal_open);
        assert!(state.current_project.is_none());
        assert!(effects.contains(&Effect::SetContent {
            target: Target::ModalContent,
            content: None
        }));
        assert!(effects.contains(&Effect::LockScroll(false)));
        assert!(effects.contains(&Effect::SetClass {
            target: Target::Modal,
            class: ACTIVE_CLASS,
            enabled: false
        }));
    }

    #[test]
    fn test_close_is_idempotent() {
        let modal = controller();
        let mut state = UiState::default();
        assert!(modal.close(&mut state).is_empty());
        modal.open(&mut state, "viajes");
        assert!(!modal.close(&mut state).is_empty());
        assert!(modal.close(&mut state).is_empty());
    }

    #[test]
    fn test_escape_closes_only_when_open() {
        let modal = controller();
        let mut state = UiState::default();
        assert!(modal.on_key(&mut state, "Escape").is_empty());

        modal.open(&mut state, "educacion");
        assert!(modal.on_key(&mut state, "Enter").is_empty());
        assert!(state.is_modal_open);
        assert!(!modal.on_key(&mut state, "Escape").is_empty());
        assert!(!state.is_modal_open);
    }

    #[test]
    fn test_close_keeps_lock_while_menu_open() {
        let modal = controller();
        let mut state = UiState {
            is_menu_open: true,
            ..Default::default()
        };
        modal.open(&mut state, "restaurante");
        let effects = modal.close(&mut state);
        assert!(effects.contains(&Effect::LockScroll(true)));
    }

    #[test]
    fn test_reopen_swaps_project() {
        let modal = controller();
        let mut state = UiState::default();
        modal.open(&mut state, "ecommerce");
        let effects = modal.open(&mut state, "viajes");
        assert_eq!(state.current_project.as_deref(), Some("viajes"));
        assert!(rendered(&effects)
            .unwrap()
            .text_content()
            .contains("EcoRutas"));
    }
}
