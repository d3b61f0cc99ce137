//! # folio_web - Browser host for the portfolio page
//!
//! Loads [`SiteSettings`], installs console logging, resolves the page
//! elements and wires them to a [`Portfolio`]. All behaviour lives in
//! `folio_core`; this crate only reads the DOM and applies effects.
//!
//! Build with `wasm-pack build folio_web --target web` and load the module
//! from the page once the DOM is parsed.

pub mod dom;
pub mod events;
pub mod host;
pub mod logging;
pub mod observers;
pub mod render;
pub mod smooth_scroll;

use folio_core::case_studies::{CaseStudyCatalog, CATALOG_ELEMENT_ID};
use folio_core::errors::{FolioError, FolioResult};
use folio_core::logger::LogPolicy;
use folio_core::settings::{SiteSettings, CONFIG_ELEMENT_ID};
use folio_core::Portfolio;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

use crate::dom::DomCache;
use crate::host::Runtime;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = run() {
        web_sys::console::error_1(&JsValue::from_str(&format!(
            "portfolio failed to start: {err}"
        )));
    }
}

fn run() -> FolioResult<()> {
    let window = web_sys::window().ok_or_else(|| FolioError::missing_element("window"))?;
    let document = window
        .document()
        .ok_or_else(|| FolioError::missing_element("document"))?;

    // Logging needs the development hosts, so it starts before settings
    // errors can be reported
    let settings = load_settings(&document);
    let development_hosts = match &settings {
        Ok(settings) => settings.development_hosts.clone(),
        Err(_) => SiteSettings::default().development_hosts,
    };
    let policy = LogPolicy::for_host(&hostname(&window), &development_hosts);
    if let Err(err) = logging::init_logging(policy) {
        web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
    }

    let settings = or_degrade(settings, "settings", SiteSettings::default)?;
    let catalog = or_degrade(load_catalog(&document), "case studies", || {
        CaseStudyCatalog::builtin().clone()
    })?;

    let dom = DomCache::resolve()?;
    let app = Portfolio::new(settings, catalog);
    let runtime = Runtime::new(app, dom);

    events::wire(&runtime)?;
    observers::install(&runtime);

    info!("portfolio page ready");
    Ok(())
}

/// Settings from the page's `#folio-config` block, or defaults when absent.
fn load_settings(document: &Document) -> FolioResult<SiteSettings> {
    match document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) if !json.trim().is_empty() => SiteSettings::from_json(&json),
        _ => Ok(SiteSettings::default()),
    }
}

/// Case studies from the page's `#folio-case-studies` block, or the built-in
/// set when absent.
fn load_catalog(document: &Document) -> FolioResult<CaseStudyCatalog> {
    match document
        .get_element_by_id(CATALOG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    {
        Some(json) if !json.trim().is_empty() => CaseStudyCatalog::from_json(&json),
        _ => Ok(CaseStudyCatalog::builtin().clone()),
    }
}

/// Replace a degradable failure with `fallback`; anything else stops startup.
fn or_degrade<T>(result: FolioResult<T>, what: &str, fallback: impl FnOnce() -> T) -> FolioResult<T> {
    match result {
        Err(err) if err.is_degradable() => {
            warn!(%err, code = err.error_code(), "ignoring page {what}, using defaults");
            Ok(fallback())
        }
        other => other,
    }
}

fn hostname(window: &Window) -> String {
    window.location().hostname().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_page_settings_fall_back_to_defaults() {
        let broken = SiteSettings::from_json(r#"{ "reveal_root_margin": "not a margin" }"#);
        let settings = or_degrade(broken, "settings", SiteSettings::default).unwrap();
        assert_eq!(settings, SiteSettings::default());
    }

    #[test]
    fn test_duplicate_case_studies_fall_back_to_builtin() {
        let json = serde_json::json!([
            CaseStudyCatalog::builtin().get("salud").unwrap(),
            CaseStudyCatalog::builtin().get("salud").unwrap(),
        ])
        .to_string();
        let catalog = or_degrade(CaseStudyCatalog::from_json(&json), "case studies", || {
            CaseStudyCatalog::builtin().clone()
        })
        .unwrap();
        assert_eq!(catalog.len(), 6);
    }

    #[test]
    fn test_internal_errors_stop_startup() {
        let result: FolioResult<u32> = Err(FolioError::internal("listener failed"));
        let err = or_degrade(result, "settings", || 7).unwrap_err();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }
}
