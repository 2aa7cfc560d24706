//! WASM bindings for the well permit dossier review form
//!
//! All review state lives in Rust inside a `ReviewSession`; JavaScript only
//! handles DOM events, file reading and rendering.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { ReviewSession } from './pkg/pozocheck_wasm.js';
//!
//! await init();
//!
//! const session = new ReviewSession();
//! let report = JSON.parse(session.applyEdit(JSON.stringify({
//!     type: "setText", section: "technical", field: "annualVolume", value: "750000",
//! })));
//! renderFee(report.fee);
//!
//! try {
//!     session.importAnalysisCsv(await file.text());
//! } catch (e) {
//!     alert(e);
//! }
//! ```

pub mod review_panel;
pub mod session;
pub mod storage;

use review_engine::{classify_volume, Bundle, Registry, ReviewEngine};
use shared_types::{DocumentKind, Parameter, ReferenceLimits, SignatureKind};
use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use review_panel::{ParameterRow, ReviewPanel};
pub use session::ReviewSession;
pub use storage::{clear_saved_state, LocalStorage};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Get the library version
#[wasm_bindgen]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Stateless review of a `{ dossier, limits }` bundle
///
/// `registry_text` is an optional registry list export; when given, the
/// report includes the registration number check.
#[wasm_bindgen]
pub fn review_bundle_wasm(
    bundle_json: &str,
    registry_text: Option<String>,
) -> Result<String, JsValue> {
    review_bundle(bundle_json, registry_text.as_deref()).map_err(|e| JsValue::from_str(&e))
}

/// Fee category and amount for a volume under the given tier table
///
/// `limits_json` may be empty to use the built-in tiers.
#[wasm_bindgen]
pub fn classify_volume_wasm(limits_json: &str, volume: &str) -> Result<String, JsValue> {
    classify_volume_json(limits_json, volume).map_err(|e| JsValue::from_str(&e))
}

/// Built-in reference limits, used by the "restore defaults" button
#[wasm_bindgen]
pub fn get_default_limits() -> String {
    serde_json::to_string(&ReferenceLimits::default()).unwrap_or_default()
}

/// Parameter, document and signature catalogues for building the form
#[wasm_bindgen]
pub fn get_form_catalog() -> Result<String, JsValue> {
    let parameters: Vec<_> = Parameter::ALL
        .iter()
        .map(|p| {
            serde_json::json!({
                "key": p.key(),
                "label": p.label(),
                "unit": p.unit(),
                "microbiological": p.is_microbiological(),
                "requiresAbsence": p.requires_absence(),
            })
        })
        .collect();
    let documents: Vec<_> = DocumentKind::ALL
        .iter()
        .map(|d| serde_json::json!({ "kind": d, "label": d.label() }))
        .collect();
    let signatures: Vec<_> = SignatureKind::ALL
        .iter()
        .map(|s| serde_json::json!({ "kind": s, "label": s.label() }))
        .collect();

    let catalog = serde_json::json!({
        "parameters": parameters,
        "documents": documents,
        "signatures": signatures,
        "requiredApplicantFields": shared_types::Applicant::REQUIRED,
        "requiredTechnicalFields": shared_types::Technical::REQUIRED,
    });

    serde_json::to_string(&catalog)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize catalog: {}", e)))
}

fn review_bundle(bundle_json: &str, registry_text: Option<&str>) -> Result<String, String> {
    let bundle = Bundle::import_json(bundle_json).map_err(|e| e.to_string())?;
    let registry = match registry_text {
        Some(text) if !text.trim().is_empty() => {
            Some(Registry::parse(text).map_err(|e| e.to_string())?)
        }
        _ => None,
    };

    let report = ReviewEngine::new().review(&bundle.dossier, &bundle.limits, registry.as_ref());
    serde_json::to_string(&report).map_err(|e| format!("Failed to serialize report: {}", e))
}

fn classify_volume_json(limits_json: &str, volume: &str) -> Result<String, String> {
    let limits: ReferenceLimits = if limits_json.trim().is_empty() {
        ReferenceLimits::default()
    } else {
        serde_json::from_str(limits_json).map_err(|e| format!("Failed to parse limits: {}", e))?
    };
    let fee = classify_volume(&limits.tiers, volume);
    serde_json::to_string(&fee).map_err(|e| format!("Failed to serialize fee: {}", e))
}
