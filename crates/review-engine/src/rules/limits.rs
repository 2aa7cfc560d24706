// Lab analysis values checked against the reference limits
use crate::extractors::numeric::parse_measurement;
use shared_types::{Analysis, AnalysisEvaluation, Bounds, Compliance, Parameter, ReferenceLimits};
use std::collections::BTreeMap;

/// Classifies one raw value against its bounds
pub fn evaluate_value(bounds: &Bounds, raw: &str) -> Compliance {
    match parse_measurement(raw) {
        None => Compliance::NoData,
        Some(value) if bounds.contains(value) => Compliance::WithinBounds,
        Some(_) => Compliance::OutOfBounds,
    }
}

/// Evaluates every tracked parameter of an analysis
///
/// Parameters without a value come out as `NoData`. Microbiological
/// presence/absence parameters are bounded to exactly zero by their limits,
/// so any nonzero count is out of bounds.
pub fn evaluate_analysis(limits: &ReferenceLimits, analysis: &Analysis) -> AnalysisEvaluation {
    let mut states = BTreeMap::new();
    let (mut present, mut ok, mut bad) = (0, 0, 0);

    for param in Parameter::ALL {
        let state = evaluate_value(&limits.bounds_for(param), analysis.value(param));
        match state {
            Compliance::WithinBounds => {
                present += 1;
                ok += 1;
            }
            Compliance::OutOfBounds => {
                present += 1;
                bad += 1;
            }
            Compliance::NoData => {}
        }
        states.insert(param, state);
    }

    tracing::debug!(present, ok, bad, "Evaluated lab analysis");

    AnalysisEvaluation {
        states,
        present,
        ok,
        bad,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AnalysisStatus;

    fn analysis_with(values: &[(Parameter, &str)]) -> Analysis {
        let mut analysis = Analysis::default();
        for (param, value) in values {
            analysis.set_value(*param, *value);
        }
        analysis
    }

    #[test]
    fn test_ph_within_default_bounds() {
        let limits = ReferenceLimits::default();
        let eval = evaluate_analysis(&limits, &analysis_with(&[(Parameter::Ph, "7.0")]));
        assert_eq!(eval.state(Parameter::Ph), Compliance::WithinBounds);
    }

    #[test]
    fn test_arsenic_above_max() {
        let limits = ReferenceLimits::default();
        let eval = evaluate_analysis(&limits, &analysis_with(&[(Parameter::Arsenic, "0.02")]));
        assert_eq!(eval.state(Parameter::Arsenic), Compliance::OutOfBounds);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        let bounds = Bounds::between(6.5, 8.5);
        assert_eq!(evaluate_value(&bounds, "6.5"), Compliance::WithinBounds);
        assert_eq!(evaluate_value(&bounds, "8.5"), Compliance::WithinBounds);
        assert_eq!(evaluate_value(&bounds, "6.49"), Compliance::OutOfBounds);
    }

    #[test]
    fn test_missing_side_is_unconstrained() {
        let upper_only = Bounds::at_most(500.0);
        assert_eq!(evaluate_value(&upper_only, "-3"), Compliance::WithinBounds);
        let lower_only = Bounds::new(Some(1.0), None);
        assert_eq!(evaluate_value(&lower_only, "1e9"), Compliance::WithinBounds);
        assert_eq!(evaluate_value(&Bounds::default(), "42"), Compliance::WithinBounds);
    }

    #[test]
    fn test_blank_and_garbage_are_no_data() {
        let bounds = Bounds::between(6.5, 8.5);
        assert_eq!(evaluate_value(&bounds, ""), Compliance::NoData);
        assert_eq!(evaluate_value(&bounds, "  "), Compliance::NoData);
        assert_eq!(evaluate_value(&bounds, "seven"), Compliance::NoData);
    }

    #[test]
    fn test_absence_parameters() {
        let limits = ReferenceLimits::default();
        let eval = evaluate_analysis(
            &limits,
            &analysis_with(&[
                (Parameter::TotalColiforms, "0"),
                (Parameter::EColi, "1"),
                (Parameter::Salmonella, "0.0"),
                (Parameter::Pseudomonas, "3"),
            ]),
        );
        assert_eq!(eval.state(Parameter::TotalColiforms), Compliance::WithinBounds);
        assert_eq!(eval.state(Parameter::EColi), Compliance::OutOfBounds);
        assert_eq!(eval.state(Parameter::Salmonella), Compliance::WithinBounds);
        assert_eq!(eval.state(Parameter::Pseudomonas), Compliance::OutOfBounds);
    }

    #[test]
    fn test_mesophiles_upper_bound_only() {
        let limits = ReferenceLimits::default();
        let eval = evaluate_analysis(
            &limits,
            &analysis_with(&[(Parameter::AerobicMesophiles, "120")]),
        );
        assert_eq!(
            eval.state(Parameter::AerobicMesophiles),
            Compliance::WithinBounds
        );
        let eval = evaluate_analysis(
            &limits,
            &analysis_with(&[(Parameter::AerobicMesophiles, "501")]),
        );
        assert_eq!(
            eval.state(Parameter::AerobicMesophiles),
            Compliance::OutOfBounds
        );
    }

    #[test]
    fn test_counts_and_status() {
        let limits = ReferenceLimits::default();

        let empty = evaluate_analysis(&limits, &Analysis::default());
        assert_eq!((empty.present, empty.ok, empty.bad), (0, 0, 0));
        assert_eq!(empty.status(), AnalysisStatus::NoData);
        assert_eq!(empty.states.len(), Parameter::ALL.len());

        let clean = evaluate_analysis(
            &limits,
            &analysis_with(&[(Parameter::Ph, "7.0"), (Parameter::Nitrates, "10")]),
        );
        assert_eq!((clean.present, clean.ok, clean.bad), (2, 2, 0));
        assert_eq!(clean.status(), AnalysisStatus::AllInRange);

        let mixed = evaluate_analysis(
            &limits,
            &analysis_with(&[
                (Parameter::Ph, "7.0"),
                (Parameter::Arsenic, "0.02"),
                (Parameter::Iron, "n/d"),
            ]),
        );
        assert_eq!((mixed.present, mixed.ok, mixed.bad), (2, 1, 1));
        assert_eq!(mixed.status(), AnalysisStatus::PartiallyOutOfRange);
        assert_eq!(mixed.out_of_bounds(), vec![Parameter::Arsenic]);
    }

    #[test]
    fn test_edited_limits_take_effect() {
        let mut limits = ReferenceLimits::default();
        limits
            .bounds
            .insert(Parameter::Arsenic, Bounds::at_most(0.05));
        let eval = evaluate_analysis(&limits, &analysis_with(&[(Parameter::Arsenic, "0.02")]));
        assert_eq!(eval.state(Parameter::Arsenic), Compliance::WithinBounds);
    }
}
