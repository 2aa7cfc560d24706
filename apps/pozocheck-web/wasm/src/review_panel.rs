use review_engine::rules::limits::evaluate_analysis;
use serde::{Deserialize, Serialize};
use shared_types::{Analysis, AnalysisStatus, Bounds, Compliance, Parameter, ReferenceLimits};
use wasm_bindgen::prelude::*;

/// One row of the lab results table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParameterRow {
    pub parameter: Parameter,
    pub label: String,
    pub unit: String,
    pub value: String,
    pub bounds: Bounds,
    pub state: Compliance,
    pub microbiological: bool,
    pub is_highlighted: bool,
}

#[wasm_bindgen]
pub struct ReviewPanel {
    rows: Vec<ParameterRow>,
    status: AnalysisStatus,
    selected: Option<Parameter>,
}

impl Default for ReviewPanel {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            status: AnalysisStatus::NoData,
            selected: None,
        }
    }
}

impl ReviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the rows from the current analysis and limits
    pub fn refresh(&mut self, limits: &ReferenceLimits, analysis: &Analysis) {
        let evaluation = evaluate_analysis(limits, analysis);
        self.status = evaluation.status();
        self.rows = Parameter::ALL
            .iter()
            .map(|param| ParameterRow {
                parameter: *param,
                label: param.label().to_string(),
                unit: param.unit().to_string(),
                value: analysis.value(*param).to_string(),
                bounds: limits.bounds_for(*param),
                state: evaluation.state(*param),
                microbiological: param.is_microbiological(),
                is_highlighted: self.selected == Some(*param),
            })
            .collect();
    }

    pub fn rows(&self) -> &[ParameterRow] {
        &self.rows
    }

    pub fn filter_by_state(&self, state: Compliance) -> Vec<&ParameterRow> {
        self.rows.iter().filter(|row| row.state == state).collect()
    }

    fn count(&self, state: Compliance) -> u32 {
        self.rows.iter().filter(|row| row.state == state).count() as u32
    }

    pub fn status(&self) -> AnalysisStatus {
        self.status
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.rows).unwrap_or_default()
    }

    pub fn select(&mut self, key: &str) {
        for row in &mut self.rows {
            row.is_highlighted = false;
        }

        if let Some(row) = self.rows.iter_mut().find(|row| row.parameter.key() == key) {
            row.is_highlighted = true;
            self.selected = Some(row.parameter);
        } else {
            self.selected = None;
        }
    }

    pub fn get_selected(&self) -> Option<&ParameterRow> {
        self.selected
            .and_then(|param| self.rows.iter().find(|row| row.parameter == param))
    }
}

// WASM bindings
#[wasm_bindgen]
impl ReviewPanel {
    #[wasm_bindgen(constructor)]
    pub fn new_wasm() -> Self {
        Self::new()
    }

    /// Refresh from a `{ dossier, limits }` bundle JSON
    #[wasm_bindgen(js_name = refreshFromBundle)]
    pub fn refresh_from_bundle(&mut self, bundle_json: &str) -> Result<(), JsValue> {
        self.refresh_from_bundle_internal(bundle_json)
            .map_err(|e| JsValue::from_str(&e))
    }

    #[wasm_bindgen(js_name = getRowsJson)]
    pub fn get_rows_json(&self) -> String {
        self.to_json()
    }

    #[wasm_bindgen(js_name = getWithinCount)]
    pub fn get_within_count(&self) -> u32 {
        self.count(Compliance::WithinBounds)
    }

    #[wasm_bindgen(js_name = getOutOfBoundsCount)]
    pub fn get_out_of_bounds_count(&self) -> u32 {
        self.count(Compliance::OutOfBounds)
    }

    #[wasm_bindgen(js_name = getNoDataCount)]
    pub fn get_no_data_count(&self) -> u32 {
        self.count(Compliance::NoData)
    }

    #[wasm_bindgen(js_name = getStatusLabel)]
    pub fn get_status_label(&self) -> String {
        self.status().label().to_string()
    }

    #[wasm_bindgen(js_name = selectParameter)]
    pub fn select_wasm(&mut self, key: &str) {
        self.select(key);
    }

    #[wasm_bindgen(js_name = getSelectedJson)]
    pub fn get_selected_json(&self) -> Option<String> {
        self.get_selected()
            .and_then(|row| serde_json::to_string(row).ok())
    }

    #[wasm_bindgen(js_name = clearRows)]
    pub fn clear_rows(&mut self) {
        self.rows.clear();
        self.status = AnalysisStatus::NoData;
        self.selected = None;
    }
}

impl ReviewPanel {
    fn refresh_from_bundle_internal(&mut self, bundle_json: &str) -> Result<(), String> {
        let bundle =
            review_engine::Bundle::import_json(bundle_json).map_err(|e| e.to_string())?;
        self.refresh(&bundle.limits, &bundle.dossier.analysis);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Dossier;

    fn analysis(values: &[(Parameter, &str)]) -> Analysis {
        let mut analysis = Analysis::default();
        for (param, value) in values {
            analysis.set_value(*param, *value);
        }
        analysis
    }

    #[test]
    fn test_panel_creation() {
        let panel = ReviewPanel::new();
        assert!(panel.rows().is_empty());
        assert_eq!(panel.status(), AnalysisStatus::NoData);
    }

    #[test]
    fn test_refresh_builds_one_row_per_parameter() {
        let mut panel = ReviewPanel::new();
        panel.refresh(&ReferenceLimits::default(), &Analysis::default());
        assert_eq!(panel.rows().len(), Parameter::ALL.len());
        assert_eq!(panel.get_no_data_count(), Parameter::ALL.len() as u32);
    }

    #[test]
    fn test_filter_by_state() {
        let mut panel = ReviewPanel::new();
        panel.refresh(
            &ReferenceLimits::default(),
            &analysis(&[(Parameter::Ph, "7.0"), (Parameter::Arsenic, "0.02")]),
        );

        let within = panel.filter_by_state(Compliance::WithinBounds);
        let out = panel.filter_by_state(Compliance::OutOfBounds);
        assert_eq!(within.len(), 1);
        assert_eq!(within[0].parameter, Parameter::Ph);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].parameter, Parameter::Arsenic);
        assert_eq!(panel.status(), AnalysisStatus::PartiallyOutOfRange);
        assert_eq!(panel.get_status_label(), "Partially out of range");
    }

    #[test]
    fn test_selection_survives_refresh() {
        let mut panel = ReviewPanel::new();
        panel.refresh(&ReferenceLimits::default(), &Analysis::default());
        panel.select("eColi");
        assert_eq!(
            panel.get_selected().map(|row| row.parameter),
            Some(Parameter::EColi)
        );

        panel.refresh(
            &ReferenceLimits::default(),
            &analysis(&[(Parameter::EColi, "2")]),
        );
        let selected = panel.get_selected().unwrap();
        assert!(selected.is_highlighted);
        assert_eq!(selected.state, Compliance::OutOfBounds);
    }

    #[test]
    fn test_unknown_selection_clears() {
        let mut panel = ReviewPanel::new();
        panel.refresh(&ReferenceLimits::default(), &Analysis::default());
        panel.select("ph");
        panel.select("lead");
        assert!(panel.get_selected().is_none());
        assert!(panel.rows().iter().all(|row| !row.is_highlighted));
    }

    #[test]
    fn test_json_serialization() {
        let mut panel = ReviewPanel::new();
        panel.refresh(
            &ReferenceLimits::default(),
            &analysis(&[(Parameter::Ph, "7.0")]),
        );
        let json = panel.to_json();
        assert!(json.contains("\"parameter\":\"ph\""));
        assert!(json.contains("withinBounds"));
    }

    #[test]
    fn test_refresh_from_bundle() {
        let mut dossier = Dossier::default();
        dossier.analysis.set_value(Parameter::Nitrates, "80");
        let bundle = review_engine::Bundle::new(dossier, ReferenceLimits::default());
        let json = serde_json::to_string(&bundle).unwrap();

        let mut panel = ReviewPanel::new_wasm();
        panel.refresh_from_bundle_internal(&json).unwrap();
        assert_eq!(panel.get_out_of_bounds_count(), 1);

        assert!(panel.refresh_from_bundle_internal("nope").is_err());

        panel.clear_rows();
        assert!(panel.rows().is_empty());
    }
}
