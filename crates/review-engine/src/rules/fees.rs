// Annual fee tier from the declared extraction volume
use crate::extractors::numeric::parse_volume;
use serde::{Deserialize, Serialize};
use shared_types::{FeeAssessment, FeeTier};

/// Finds the tier containing `volume`
///
/// Tiers are scanned in list order and the first half-open match
/// (`min <= volume < max`, open-ended when `max` is absent) wins. The list is
/// neither sorted nor validated here.
pub fn classify(tiers: &[FeeTier], volume: f64) -> FeeAssessment {
    if !volume.is_finite() || volume < 0.0 {
        return FeeAssessment::Unclassified;
    }

    match tiers.iter().find(|tier| tier.matches(volume)) {
        Some(tier) => FeeAssessment::Tier {
            category: tier.category.clone(),
            amount: tier.amount,
        },
        None => FeeAssessment::Unclassified,
    }
}

/// Classifies the volume as typed in the form
pub fn classify_volume(tiers: &[FeeTier], raw: &str) -> FeeAssessment {
    let assessment = match parse_volume(raw) {
        Some(volume) => classify(tiers, volume),
        None => FeeAssessment::Unclassified,
    };
    tracing::debug!(volume = raw, category = ?assessment.category(), "Classified annual volume");
    assessment
}

/// Problems found in an edited tier table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TierIssue {
    NoTiers,
    #[serde(rename_all = "camelCase")]
    InvertedRange { category: String },
    #[serde(rename_all = "camelCase")]
    NegativeAmount { category: String },
    /// An open-ended tier followed by more tiers, which can never match
    #[serde(rename_all = "camelCase")]
    UnboundedNotLast { category: String },
    #[serde(rename_all = "camelCase")]
    Gap { after: String, before: String, from: f64, to: f64 },
    #[serde(rename_all = "camelCase")]
    Overlap { after: String, before: String },
}

impl std::fmt::Display for TierIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TierIssue::NoTiers => f.write_str("No fee tiers defined"),
            TierIssue::InvertedRange { category } => {
                write!(f, "Tier {}: maximum volume is not above the minimum", category)
            }
            TierIssue::NegativeAmount { category } => {
                write!(f, "Tier {}: negative amount", category)
            }
            TierIssue::UnboundedNotLast { category } => {
                write!(f, "Tier {}: open-ended tier is not the last one", category)
            }
            TierIssue::Gap {
                after,
                before,
                from,
                to,
            } => write!(
                f,
                "Volumes from {} to {} fall between tiers {} and {}",
                from, to, after, before
            ),
            TierIssue::Overlap { after, before } => {
                write!(f, "Tiers {} and {} overlap", after, before)
            }
        }
    }
}

/// Reports gaps, overlaps and malformed tiers without changing anything
///
/// Classification keeps working on a table with issues; this is advisory
/// output for the limits editor.
pub fn validate_tiers(tiers: &[FeeTier]) -> Vec<TierIssue> {
    let mut issues = Vec::new();

    if tiers.is_empty() {
        issues.push(TierIssue::NoTiers);
        return issues;
    }

    for (idx, tier) in tiers.iter().enumerate() {
        if let Some(max) = tier.max_volume {
            if max <= tier.min_volume {
                issues.push(TierIssue::InvertedRange {
                    category: tier.category.clone(),
                });
            }
        } else if idx + 1 < tiers.len() {
            issues.push(TierIssue::UnboundedNotLast {
                category: tier.category.clone(),
            });
        }

        if tier.amount < 0.0 {
            issues.push(TierIssue::NegativeAmount {
                category: tier.category.clone(),
            });
        }
    }

    for pair in tiers.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        let Some(max) = current.max_volume else {
            continue;
        };
        if max < next.min_volume {
            issues.push(TierIssue::Gap {
                after: current.category.clone(),
                before: next.category.clone(),
                from: max,
                to: next.min_volume,
            });
        } else if max > next.min_volume {
            issues.push(TierIssue::Overlap {
                after: current.category.clone(),
                before: next.category.clone(),
            });
        }
    }

    issues
}
