//! # Effects
//!
//! Everything a controller wants done to the page is returned as an
//! [`Effect`]. The host applies them in order; the core never touches the
//! DOM. Timers are effects too: a controller asks for a [`TimerId`] to be
//! scheduled and later receives it back through
//! [`Message::TimerElapsed`](crate::app::Message::TimerElapsed).

use crate::markup::Node;
use crate::validation::Field;

/// Fixed page elements an effect can address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Navbar,
    NavMenu,
    Hamburger,
    Modal,
    ModalContent,
    ModalClose,
    ContactForm,
    HeroImage,
}

/// Scheduled continuation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Simulated submission latency
    SubmitDelay,
    /// Auto-dismiss of the success banner
    SuccessDismiss,
    /// End of a resize burst
    ResizeSettle,
}

/// Handle of a scheduled continuation. A newer generation of the same kind
/// makes older ones stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId {
    pub kind: TimerKind,
    pub generation: u64,
}

impl TimerId {
    pub fn new(kind: TimerKind, generation: u64) -> Self {
        TimerId { kind, generation }
    }
}

/// A single change to apply to the page.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Add (`enabled`) or remove a class on a fixed element
    SetClass {
        target: Target,
        class: &'static str,
        enabled: bool,
    },
    /// Mark the nav link pointing at `#section` active and clear the rest;
    /// `None` clears every link
    SetActiveLink(Option<String>),
    /// Lock or unlock page scrolling
    LockScroll(bool),
    /// Replace an element's children; `None` empties it
    SetContent {
        target: Target,
        content: Option<Node>,
    },
    Focus(Target),
    /// Scroll the window to an absolute offset, smoothly
    ScrollTo { y: f64 },
    /// Measure every `section[id]` and answer with
    /// [`Message::SectionsMeasured`](crate::app::Message::SectionsMeasured)
    MeasureSections,
    /// Translate an element vertically
    TranslateY { target: Target, px: f64 },
    /// Replace the form's error block (prepended to the form)
    ShowFormErrors(Node),
    ClearFormErrors,
    /// Insert an inline message after a field and mark its border
    ShowFieldError { field: Field, content: Node },
    /// Remove a field's inline message and restore its border
    ClearFieldError(Field),
    /// Prepend the success banner to the form
    ShowSuccess(Node),
    HideSuccess,
    /// Disable the submit control and show the busy label, or restore it
    SetSubmitBusy(bool),
    /// Clear every form control
    ResetForm,
    Schedule { timer: TimerId, delay_ms: u32 },
    CancelTimer(TimerId),
}
