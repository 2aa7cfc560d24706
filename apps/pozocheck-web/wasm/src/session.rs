//! Stateful review session
//!
//! Holds the dossier, the reference limits and the loaded registry list in
//! Rust. JavaScript sends edits as JSON and re-renders from the returned
//! review report; every committed change is saved before returning.

use crate::review_panel::ReviewPanel;
use crate::storage::LocalStorage;
use review_engine::{
    parse_analysis_csv, validate_tiers, AppState, Bundle, Edit, KeyValueStore, Registry,
};
use shared_types::ReviewReport;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct ReviewSession {
    state: AppState,
    registry: Option<Registry>,
    store: Box<dyn KeyValueStore>,
}

#[wasm_bindgen]
impl ReviewSession {
    /// Open a session backed by the browser's localStorage
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ReviewSession, JsValue> {
        let storage = LocalStorage::open()?;
        let session = Self::with_store(Box::new(storage));
        web_sys::console::log_1(
            &format!(
                "Loaded review state for dossier '{}'",
                session.state.dossier.metadata.file_number
            )
            .into(),
        );
        Ok(session)
    }

    /// Apply an edit given as JSON, e.g. `{"type":"setDocument","kind":"labReport","present":true}`
    /// Returns the updated review report as JSON
    #[wasm_bindgen(js_name = applyEdit)]
    pub fn apply_edit(&mut self, edit_json: &str) -> Result<String, JsValue> {
        self.apply_edit_internal(edit_json)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Replace dossier and limits from an exported bundle
    /// On error the current state is left unchanged
    #[wasm_bindgen(js_name = importBundle)]
    pub fn import_bundle(&mut self, json: &str) -> Result<String, JsValue> {
        self.import_bundle_internal(json)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = exportBundle)]
    pub fn export_bundle(&self) -> Result<String, JsValue> {
        self.state
            .to_bundle()
            .export_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Overwrite analysis values from a header + data row CSV
    #[wasm_bindgen(js_name = importAnalysisCsv)]
    pub fn import_analysis_csv(&mut self, text: &str) -> Result<String, JsValue> {
        self.import_analysis_csv_internal(text)
            .map_err(|e| JsValue::from_str(&e))
    }

    /// Load the registry list; returns the number of registration numbers read
    #[wasm_bindgen(js_name = loadRegistry)]
    pub fn load_registry(&mut self, text: &str) -> Result<u32, JsValue> {
        self.load_registry_internal(text)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = clearRegistry)]
    pub fn clear_registry(&mut self) {
        self.registry = None;
    }

    #[wasm_bindgen(js_name = getReportJson)]
    pub fn get_report_json(&self) -> Result<String, JsValue> {
        self.report_json().map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = getReport)]
    pub fn get_report(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.report())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    #[wasm_bindgen(js_name = getDossierJson)]
    pub fn get_dossier_json(&self) -> String {
        serde_json::to_string(&self.state.dossier).unwrap_or_default()
    }

    #[wasm_bindgen(js_name = getLimitsJson)]
    pub fn get_limits_json(&self) -> String {
        serde_json::to_string(&self.state.limits).unwrap_or_default()
    }

    /// Gaps, overlaps and malformed entries in the fee tier table
    #[wasm_bindgen(js_name = getTierIssuesJson)]
    pub fn get_tier_issues_json(&self) -> String {
        serde_json::to_string(&validate_tiers(&self.state.limits.tiers)).unwrap_or_default()
    }

    /// Rows for the lab results table
    #[wasm_bindgen(js_name = buildPanel)]
    pub fn build_panel(&self) -> ReviewPanel {
        let mut panel = ReviewPanel::new();
        panel.refresh(&self.state.limits, &self.state.dossier.analysis);
        panel
    }
}

impl ReviewSession {
    /// Session over any key-value store (used by tests and native hosts)
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        let state = AppState::load(store.as_ref());
        Self {
            state,
            registry: None,
            store,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn report(&self) -> ReviewReport {
        self.state.review(self.registry.as_ref())
    }

    fn report_json(&self) -> Result<String, String> {
        serde_json::to_string(&self.report()).map_err(|e| format!("Serialization error: {}", e))
    }

    /// Apply, then save; the in-memory state keeps the edit even if saving fails
    fn commit(&mut self, edit: Edit) -> Result<String, String> {
        let current = std::mem::take(&mut self.state);
        self.state = current.apply(edit);
        self.state
            .save(self.store.as_mut())
            .map_err(|e| e.to_string())?;
        self.report_json()
    }

    fn apply_edit_internal(&mut self, edit_json: &str) -> Result<String, String> {
        let edit: Edit =
            serde_json::from_str(edit_json).map_err(|e| format!("Invalid edit: {}", e))?;
        self.commit(edit)
    }

    fn import_bundle_internal(&mut self, json: &str) -> Result<String, String> {
        let bundle = Bundle::import_json(json).map_err(|e| e.to_string())?;
        self.commit(Edit::Import { bundle })
    }

    fn import_analysis_csv_internal(&mut self, text: &str) -> Result<String, String> {
        let values = parse_analysis_csv(text).map_err(|e| e.to_string())?;
        self.commit(Edit::MergeAnalysis { values })
    }

    fn load_registry_internal(&mut self, text: &str) -> Result<u32, String> {
        let registry = Registry::parse(text).map_err(|e| e.to_string())?;
        let count = registry.len() as u32;
        self.registry = Some(registry);
        Ok(count)
    }
}
