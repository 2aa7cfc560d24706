//! The dossier ("expediente") under review and its sections

use crate::parameter::Parameter;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Read/write access to a section's text fields by name
///
/// Names are the camelCase JSON keys of the section. Unknown names read as
/// `None` and are rejected on write.
pub trait TextRecord {
    fn text_field(&self, name: &str) -> Option<&str>;

    /// Returns `false` if the section has no field with that name
    fn set_text_field(&mut self, name: &str, value: String) -> bool;
}

/// Generates the `TextRecord` impl for a struct of `String` fields
macro_rules! text_record {
    ($ty:ident { $($name:literal => $field:ident),+ $(,)? }) => {
        impl TextRecord for $ty {
            fn text_field(&self, name: &str) -> Option<&str> {
                match name {
                    $($name => Some(self.$field.as_str()),)+
                    _ => None,
                }
            }

            fn set_text_field(&mut self, name: &str, value: String) -> bool {
                match name {
                    $($name => {
                        self.$field = value;
                        true
                    })+
                    _ => false,
                }
            }
        }
    };
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Dossier {
    pub metadata: Metadata,
    pub applicant: Applicant,
    pub technical: Technical,
    pub documents: Documents,
    pub analysis: Analysis,
    pub signatures: Signatures,
}

/// Administrative data about the review itself
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Metadata {
    pub file_number: String,
    pub review_date: String,
    pub reviewer: String,
    pub plenary_date: String,
    pub notes: String,
}

text_record!(Metadata {
    "fileNumber" => file_number,
    "reviewDate" => review_date,
    "reviewer" => reviewer,
    "plenaryDate" => plenary_date,
    "notes" => notes,
});

/// Permit holder and site identification
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Applicant {
    pub holder_name: String,
    pub tax_id: String,
    pub address: String,
    pub locality: String,
    pub district: String,
    pub registration_number: String,
    pub water_use: String,
    pub contact_email: String,
    pub contact_phone: String,
}

text_record!(Applicant {
    "holderName" => holder_name,
    "taxId" => tax_id,
    "address" => address,
    "locality" => locality,
    "district" => district,
    "registrationNumber" => registration_number,
    "waterUse" => water_use,
    "contactEmail" => contact_email,
    "contactPhone" => contact_phone,
});

impl Applicant {
    pub const REQUIRED: &'static [&'static str] = &[
        "holderName",
        "taxId",
        "address",
        "locality",
        "registrationNumber",
        "waterUse",
    ];
}

/// Well construction and extraction parameters (numeric values kept as text)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Technical {
    pub depth: String,
    pub diameter: String,
    pub static_level: String,
    pub dynamic_level: String,
    pub flow_rate: String,
    /// Declared annual extraction volume in m³, drives the fee tier
    pub annual_volume: String,
    pub latitude: String,
    pub longitude: String,
    pub aquifer: String,
    pub pump_type: String,
}

text_record!(Technical {
    "depth" => depth,
    "diameter" => diameter,
    "staticLevel" => static_level,
    "dynamicLevel" => dynamic_level,
    "flowRate" => flow_rate,
    "annualVolume" => annual_volume,
    "latitude" => latitude,
    "longitude" => longitude,
    "aquifer" => aquifer,
    "pumpType" => pump_type,
});

impl Technical {
    pub const REQUIRED: &'static [&'static str] = &[
        "depth",
        "diameter",
        "staticLevel",
        "flowRate",
        "annualVolume",
        "latitude",
        "longitude",
    ];
}

/// Required documents of a dossier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentKind {
    ApplicationForm,
    PropertyTitle,
    LocationPlan,
    TechnicalReport,
    LabReport,
    FeeReceipt,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::ApplicationForm,
        DocumentKind::PropertyTitle,
        DocumentKind::LocationPlan,
        DocumentKind::TechnicalReport,
        DocumentKind::LabReport,
        DocumentKind::FeeReceipt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::ApplicationForm => "Signed application form",
            DocumentKind::PropertyTitle => "Property title or tenure deed",
            DocumentKind::LocationPlan => "Location plan",
            DocumentKind::TechnicalReport => "Well technical report",
            DocumentKind::LabReport => "Water quality lab report",
            DocumentKind::FeeReceipt => "Fee payment receipt",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Documents {
    pub application_form: bool,
    pub property_title: bool,
    pub location_plan: bool,
    pub technical_report: bool,
    pub lab_report: bool,
    pub fee_receipt: bool,
    /// Names of attached files, in upload order
    pub files: Vec<String>,
}

impl Documents {
    pub fn is_present(&self, kind: DocumentKind) -> bool {
        match kind {
            DocumentKind::ApplicationForm => self.application_form,
            DocumentKind::PropertyTitle => self.property_title,
            DocumentKind::LocationPlan => self.location_plan,
            DocumentKind::TechnicalReport => self.technical_report,
            DocumentKind::LabReport => self.lab_report,
            DocumentKind::FeeReceipt => self.fee_receipt,
        }
    }

    pub fn set_present(&mut self, kind: DocumentKind, present: bool) {
        let flag = match kind {
            DocumentKind::ApplicationForm => &mut self.application_form,
            DocumentKind::PropertyTitle => &mut self.property_title,
            DocumentKind::LocationPlan => &mut self.location_plan,
            DocumentKind::TechnicalReport => &mut self.technical_report,
            DocumentKind::LabReport => &mut self.lab_report,
            DocumentKind::FeeReceipt => &mut self.fee_receipt,
        };
        *flag = present;
    }

    pub fn flags(&self) -> impl Iterator<Item = bool> + '_ {
        DocumentKind::ALL.into_iter().map(move |kind| self.is_present(kind))
    }
}

/// Lab results; values are the raw text typed or imported
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Analysis {
    pub laboratory: String,
    pub sample_date: String,
    pub protocol_number: String,
    #[serde(deserialize_with = "deserialize_values")]
    pub values: BTreeMap<Parameter, String>,
}

/// Reads the value map, dropping keys that name no known parameter so one
/// stale entry does not discard the rest of a stored dossier
fn deserialize_values<'de, D>(deserializer: D) -> Result<BTreeMap<Parameter, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, value)| match Parameter::from_key(&key) {
            Some(param) => Some((param, value)),
            None => {
                tracing::warn!(key = %key, "Dropping value for unknown analysis parameter");
                None
            }
        })
        .collect())
}

impl Analysis {
    /// Raw value for a parameter; a parameter never entered reads as empty
    pub fn value(&self, param: Parameter) -> &str {
        self.values.get(&param).map(String::as_str).unwrap_or("")
    }

    pub fn set_value(&mut self, param: Parameter, value: impl Into<String>) {
        self.values.insert(param, value.into());
    }
}

text_record!(Analysis {
    "laboratory" => laboratory,
    "sampleDate" => sample_date,
    "protocolNumber" => protocol_number,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SignatureKind {
    Applicant,
    TechnicalDirector,
    Reviewer,
}

impl SignatureKind {
    pub const ALL: [SignatureKind; 3] = [
        SignatureKind::Applicant,
        SignatureKind::TechnicalDirector,
        SignatureKind::Reviewer,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SignatureKind::Applicant => "Permit holder",
            SignatureKind::TechnicalDirector => "Technical director",
            SignatureKind::Reviewer => "Reviewing officer",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Signatures {
    pub applicant: bool,
    pub technical_director: bool,
    pub reviewer: bool,
}

impl Signatures {
    pub fn is_signed(&self, kind: SignatureKind) -> bool {
        match kind {
            SignatureKind::Applicant => self.applicant,
            SignatureKind::TechnicalDirector => self.technical_director,
            SignatureKind::Reviewer => self.reviewer,
        }
    }

    pub fn set_signed(&mut self, kind: SignatureKind, signed: bool) {
        match kind {
            SignatureKind::Applicant => self.applicant = signed,
            SignatureKind::TechnicalDirector => self.technical_director = signed,
            SignatureKind::Reviewer => self.reviewer = signed,
        }
    }

    pub fn flags(&self) -> impl Iterator<Item = bool> + '_ {
        SignatureKind::ALL.into_iter().map(move |kind| self.is_signed(kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_record_read_write() {
        let mut applicant = Applicant::default();
        assert!(applicant.set_text_field("holderName", "Estancia La Paz".to_string()));
        assert_eq!(applicant.text_field("holderName"), Some("Estancia La Paz"));
        assert_eq!(applicant.holder_name, "Estancia La Paz");
    }

    #[test]
    fn test_text_record_unknown_field() {
        let mut technical = Technical::default();
        assert!(!technical.set_text_field("color", "blue".to_string()));
        assert_eq!(technical.text_field("color"), None);
    }

    #[test]
    fn test_required_fields_exist() {
        let applicant = Applicant::default();
        for name in Applicant::REQUIRED {
            assert!(applicant.text_field(name).is_some(), "missing {}", name);
        }
        let technical = Technical::default();
        for name in Technical::REQUIRED {
            assert!(technical.text_field(name).is_some(), "missing {}", name);
        }
    }

    #[test]
    fn test_document_flags() {
        let mut docs = Documents::default();
        docs.set_present(DocumentKind::LabReport, true);
        assert!(docs.lab_report);
        assert_eq!(docs.flags().filter(|f| *f).count(), 1);
    }

    #[test]
    fn test_missing_analysis_value_reads_empty() {
        let mut analysis = Analysis::default();
        assert_eq!(analysis.value(Parameter::Ph), "");
        analysis.set_value(Parameter::Ph, "7.1");
        assert_eq!(analysis.value(Parameter::Ph), "7.1");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r#"{"applicant":{"holderName":"Coop. Agua Norte"},"signatures":{"reviewer":true}}"#;
        let dossier: Dossier = serde_json::from_str(json).unwrap();
        assert_eq!(dossier.applicant.holder_name, "Coop. Agua Norte");
        assert!(dossier.signatures.reviewer);
        assert!(!dossier.signatures.applicant);
        assert!(dossier.documents.files.is_empty());
    }

    #[test]
    fn test_unknown_analysis_keys_are_dropped() {
        let json = r#"{"laboratory":"Lab Sur","values":{"ph":"7.1","lead":"0.01","eColi":"0"}}"#;
        let analysis: Analysis = serde_json::from_str(json).unwrap();
        assert_eq!(analysis.laboratory, "Lab Sur");
        assert_eq!(analysis.values.len(), 2);
        assert_eq!(analysis.value(Parameter::Ph), "7.1");
        assert_eq!(analysis.value(Parameter::EColi), "0");
    }

    #[test]
    fn test_analysis_values_serialize_with_parameter_keys() {
        let mut analysis = Analysis::default();
        analysis.set_value(Parameter::EColi, "0");
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["values"]["eColi"], "0");
    }
}
