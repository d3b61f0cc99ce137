//! UI state shared by the page controllers.

use serde::{Deserialize, Serialize};

/// Mutable page state.
///
/// One instance lives inside [`crate::app::Portfolio`]; controllers receive it
/// by `&mut` reference. Menu and modal are tracked independently and may both
/// be open at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiState {
    /// Mobile navigation panel is expanded
    pub is_menu_open: bool,

    /// Case-study dialog is showing
    pub is_modal_open: bool,

    /// Id of the case study currently rendered in the dialog
    pub current_project: Option<String>,

    /// Last observed vertical scroll offset
    pub scroll_position: f64,
}

impl UiState {
    /// Whether page scrolling should be locked.
    ///
    /// Derived from both overlays so closing one never unlocks the page while
    /// the other still covers it.
    pub fn scroll_locked(&self) -> bool {
        self.is_menu_open || self.is_modal_open
    }
}
