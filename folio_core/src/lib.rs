//! # folio_core - Portfolio Page Interactivity Engine
//!
//! `folio_core` holds everything about the portfolio page that does not need
//! a browser: UI state, contact form validation, the case-study catalog and
//! its views, throttle/debounce, scroll geometry, and the controllers that
//! turn page events into DOM effects.
//!
//! ## Design Philosophy
//!
//! - **Host-free**: controllers return [`Effect`]s; the `folio_web` crate applies them
//! - **Owned state**: one [`Portfolio`] owns the [`UiState`]; nothing is global
//! - **Typed markup**: views build element trees, never HTML strings
//! - **Explicit time**: timers are scheduled effects with generations, so
//!   superseded continuations are ignored
//!
//! ## Quick Start
//!
//! ```rust
//! use folio_core::{Message, Portfolio};
//!
//! let mut page = Portfolio::default();
//! page.update(Message::ProjectCardClicked { project_id: "salud".to_string() });
//! assert_eq!(page.state().current_project.as_deref(), Some("salud"));
//! ```
//!
//! ## Modules
//!
//! - [`app`] - Message hub owning state and controllers
//! - [`navigation`], [`form`], [`modal`] - Controllers
//! - [`validation`] - Contact form rules
//! - [`case_studies`] - Project content catalog
//! - [`markup`], [`views`] - Element trees and their builders
//! - [`timing`], [`scroll`], [`reveal`] - Performance and scroll helpers
//! - [`settings`], [`logger`], [`errors`] - Configuration, log policy, errors

pub mod app;
pub mod case_studies;
pub mod effects;
pub mod errors;
pub mod form;
pub mod logger;
pub mod markup;
pub mod modal;
pub mod navigation;
pub mod reveal;
pub mod scroll;
pub mod settings;
pub mod state;
pub mod timing;
pub mod validation;
pub mod views;

// Re-export commonly used types at crate root for convenience
pub use app::{Message, Portfolio};
pub use effects::{Effect, Target, TimerId, TimerKind};
pub use errors::{FolioError, FolioResult};
pub use settings::SiteSettings;
pub use state::UiState;
