//! # Portfolio
//!
//! The single owner of page state. The host translates browser events into
//! [`Message`]s, calls [`Portfolio::update`], and applies the returned
//! [`Effect`]s in order.
//!
//! ## Example
//!
//! ```rust
//! use folio_core::app::{Message, Portfolio};
//! use folio_core::effects::Effect;
//!
//! let mut page = Portfolio::default();
//! let effects = page.update(Message::MenuToggled);
//! assert!(page.state().is_menu_open);
//! assert!(effects.contains(&Effect::LockScroll(true)));
//! ```

use tracing::info;

use crate::case_studies::CaseStudyCatalog;
use crate::effects::{Effect, TimerId, TimerKind};
use crate::form::FormController;
use crate::modal::ModalController;
use crate::navigation::NavController;
use crate::scroll::SectionBounds;
use crate::settings::SiteSettings;
use crate::state::UiState;
use crate::validation::{ContactFormData, Field};

/// Browser events, already reduced to the data the controllers need.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    /// Hamburger clicked
    MenuToggled,
    /// Window scrolled
    Scrolled { now_ms: f64, scroll_y: f64 },
    /// Answer to [`Effect::MeasureSections`]: the current `section[id]` bounds
    SectionsMeasured {
        scroll_y: f64,
        sections: Vec<SectionBounds>,
    },
    /// Window resized to `width` CSS pixels
    Resized { width: f64 },
    /// An `a[href^="#"]` was clicked; `target_top` is the document offset of
    /// the element it names, if the page has one
    AnchorClicked {
        href: String,
        target_top: Option<f64>,
    },
    /// A form control lost focus
    FieldBlurred { field: Field, value: String },
    /// The contact form was submitted
    FormSubmitted(ContactFormData),
    /// The error block's close control was pressed
    FormErrorsDismissed,
    /// A project card was clicked
    ProjectCardClicked { project_id: String },
    /// The dialog's close control was clicked
    ModalCloseClicked,
    /// The overlay outside the dialog body was clicked
    OverlayClicked,
    /// A key went down anywhere in the document
    KeyPressed { key: String },
    /// A scheduled continuation is due
    TimerElapsed(TimerId),
}

#[derive(Debug, Clone)]
pub struct Portfolio {
    settings: SiteSettings,
    state: UiState,
    nav: NavController,
    form: FormController,
    modal: ModalController,
}

impl Default for Portfolio {
    fn default() -> Self {
        Portfolio::new(SiteSettings::default(), CaseStudyCatalog::builtin().clone())
    }
}

impl Portfolio {
    pub fn new(settings: SiteSettings, catalog: CaseStudyCatalog) -> Self {
        info!(projects = catalog.len(), "portfolio initialized");
        Portfolio {
            nav: NavController::new(&settings),
            form: FormController::new(&settings),
            modal: ModalController::new(catalog),
            state: UiState::default(),
            settings,
        }
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn settings(&self) -> &SiteSettings {
        &self.settings
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn catalog(&self) -> &CaseStudyCatalog {
        self.modal.catalog()
    }

    /// Handle one message.
    pub fn update(&mut self, message: Message) -> Vec<Effect> {
        let state = &mut self.state;
        match message {
            Message::MenuToggled => self.nav.toggle_menu(state),
            Message::Scrolled { now_ms, scroll_y } => self.nav.on_scroll(state, now_ms, scroll_y),
            Message::SectionsMeasured { scroll_y, sections } => {
                self.nav.sections_measured(state, scroll_y, &sections)
            }
            Message::Resized { width } => self.nav.on_resize(width),
            Message::AnchorClicked { href, target_top } => {
                self.nav.handle_anchor_click(state, &href, target_top)
            }
            Message::FieldBlurred { field, value } => self.form.validate_field(field, &value),
            Message::FormSubmitted(data) => self.form.submit(data),
            Message::FormErrorsDismissed => self.form.dismiss_errors(),
            Message::ProjectCardClicked { project_id } => self.modal.open(state, &project_id),
            Message::ModalCloseClicked | Message::OverlayClicked => self.modal.close(state),
            Message::KeyPressed { key } => self.modal.on_key(state, &key),
            Message::TimerElapsed(timer) => match timer.kind {
                TimerKind::ResizeSettle => self.nav.resize_settled(state, timer.generation),
                TimerKind::SubmitDelay | TimerKind::SuccessDismiss => self.form.timer_elapsed(timer),
            },
        }
    }
}
