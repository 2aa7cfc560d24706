//! Lab analysis parameters tracked on a dossier

use serde::{Deserialize, Serialize};

/// Physico-chemical and microbiological parameters reported by the lab
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Parameter {
    // Physico-chemical
    Ph,
    Turbidity,
    Conductivity,
    TotalDissolvedSolids,
    TotalHardness,
    Alkalinity,
    Chlorides,
    Sulfates,
    Nitrates,
    Nitrites,
    Ammonium,
    Fluoride,
    Arsenic,
    Iron,
    Manganese,
    // Microbiological
    TotalColiforms,
    EColi,
    Salmonella,
    Pseudomonas,
    AerobicMesophiles,
}

impl Parameter {
    /// Every tracked parameter, in form order
    pub const ALL: [Parameter; 20] = [
        Parameter::Ph,
        Parameter::Turbidity,
        Parameter::Conductivity,
        Parameter::TotalDissolvedSolids,
        Parameter::TotalHardness,
        Parameter::Alkalinity,
        Parameter::Chlorides,
        Parameter::Sulfates,
        Parameter::Nitrates,
        Parameter::Nitrites,
        Parameter::Ammonium,
        Parameter::Fluoride,
        Parameter::Arsenic,
        Parameter::Iron,
        Parameter::Manganese,
        Parameter::TotalColiforms,
        Parameter::EColi,
        Parameter::Salmonella,
        Parameter::Pseudomonas,
        Parameter::AerobicMesophiles,
    ];

    /// Stable key used in JSON documents and CSV headers
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Ph => "ph",
            Parameter::Turbidity => "turbidity",
            Parameter::Conductivity => "conductivity",
            Parameter::TotalDissolvedSolids => "totalDissolvedSolids",
            Parameter::TotalHardness => "totalHardness",
            Parameter::Alkalinity => "alkalinity",
            Parameter::Chlorides => "chlorides",
            Parameter::Sulfates => "sulfates",
            Parameter::Nitrates => "nitrates",
            Parameter::Nitrites => "nitrites",
            Parameter::Ammonium => "ammonium",
            Parameter::Fluoride => "fluoride",
            Parameter::Arsenic => "arsenic",
            Parameter::Iron => "iron",
            Parameter::Manganese => "manganese",
            Parameter::TotalColiforms => "totalColiforms",
            Parameter::EColi => "eColi",
            Parameter::Salmonella => "salmonella",
            Parameter::Pseudomonas => "pseudomonas",
            Parameter::AerobicMesophiles => "aerobicMesophiles",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Ph => "pH",
            Parameter::Turbidity => "Turbidity",
            Parameter::Conductivity => "Electrical conductivity",
            Parameter::TotalDissolvedSolids => "Total dissolved solids",
            Parameter::TotalHardness => "Total hardness",
            Parameter::Alkalinity => "Alkalinity",
            Parameter::Chlorides => "Chlorides",
            Parameter::Sulfates => "Sulfates",
            Parameter::Nitrates => "Nitrates",
            Parameter::Nitrites => "Nitrites",
            Parameter::Ammonium => "Ammonium",
            Parameter::Fluoride => "Fluoride",
            Parameter::Arsenic => "Arsenic",
            Parameter::Iron => "Iron",
            Parameter::Manganese => "Manganese",
            Parameter::TotalColiforms => "Total coliforms",
            Parameter::EColi => "Escherichia coli",
            Parameter::Salmonella => "Salmonella",
            Parameter::Pseudomonas => "Pseudomonas aeruginosa",
            Parameter::AerobicMesophiles => "Aerobic mesophiles",
        }
    }

    /// Measurement unit shown next to the value
    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Ph => "",
            Parameter::Turbidity => "NTU",
            Parameter::Conductivity => "µS/cm",
            Parameter::TotalHardness | Parameter::Alkalinity => "mg/L CaCO3",
            Parameter::TotalColiforms
            | Parameter::EColi
            | Parameter::Salmonella
            | Parameter::Pseudomonas => "in 100 mL",
            Parameter::AerobicMesophiles => "CFU/mL",
            _ => "mg/L",
        }
    }

    pub fn is_microbiological(&self) -> bool {
        matches!(
            self,
            Parameter::TotalColiforms
                | Parameter::EColi
                | Parameter::Salmonella
                | Parameter::Pseudomonas
                | Parameter::AerobicMesophiles
        )
    }

    /// Parameters that must be absent from the sample (count of exactly zero)
    pub fn requires_absence(&self) -> bool {
        self.is_microbiological() && *self != Parameter::AerobicMesophiles
    }

    /// Exact lookup by JSON key, e.g. `eColi`
    pub fn from_key(key: &str) -> Option<Parameter> {
        Parameter::ALL.iter().copied().find(|p| p.key() == key)
    }

    /// Look up a parameter from a CSV column header
    ///
    /// Matching is case-insensitive against the key and a few Spanish lab
    /// report spellings. Unknown headers return `None`.
    pub fn from_header(header: &str) -> Option<Parameter> {
        let normalized = header.trim().to_lowercase();
        if normalized.is_empty() {
            return None;
        }

        if let Some(param) = Parameter::ALL
            .iter()
            .find(|p| p.key().to_lowercase() == normalized)
        {
            return Some(*param);
        }

        let param = match normalized.as_str() {
            "turbiedad" => Parameter::Turbidity,
            "conductividad" => Parameter::Conductivity,
            "tds" | "solidos_disueltos" | "solidos_disueltos_totales" => {
                Parameter::TotalDissolvedSolids
            }
            "dureza" | "dureza_total" => Parameter::TotalHardness,
            "alcalinidad" => Parameter::Alkalinity,
            "cloruros" => Parameter::Chlorides,
            "sulfatos" => Parameter::Sulfates,
            "nitratos" => Parameter::Nitrates,
            "nitritos" => Parameter::Nitrites,
            "amonio" => Parameter::Ammonium,
            "fluor" | "fluoruro" | "fluoruros" => Parameter::Fluoride,
            "arsenico" => Parameter::Arsenic,
            "hierro" => Parameter::Iron,
            "manganeso" => Parameter::Manganese,
            "coliformes" | "coliformes_totales" => Parameter::TotalColiforms,
            "e_coli" | "ecoli" | "escherichia_coli" => Parameter::EColi,
            "pseudomonas_aeruginosa" => Parameter::Pseudomonas,
            "mesofilas" | "mesofilas_aerobias" | "bacterias_aerobias_mesofilas" => {
                Parameter::AerobicMesophiles
            }
            _ => return None,
        };
        Some(param)
    }
}

impl std::fmt::Display for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
