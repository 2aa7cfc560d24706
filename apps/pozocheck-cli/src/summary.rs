//! Plain-text rendering of a review report

use review_engine::TierIssue;
use shared_types::{Completeness, FeeAssessment, RegistryStatus, ReviewReport};
use std::fmt::Write;

fn section_line(out: &mut String, name: &str, section: &Completeness) {
    let _ = writeln!(
        out,
        "  {:<12} {:<10} ({}/{})",
        name,
        section.status.label(),
        section.filled,
        section.required
    );
}

/// Render the report the way a reviewer reads the checklist
pub fn render(report: &ReviewReport, tier_issues: &[TierIssue]) -> String {
    let mut out = String::new();

    let file_number = if report.file_number.trim().is_empty() {
        "(no file number)"
    } else {
        report.file_number.as_str()
    };
    let _ = writeln!(out, "Dossier {}", file_number);

    out.push_str("Sections:\n");
    section_line(&mut out, "Applicant", &report.applicant);
    section_line(&mut out, "Technical", &report.technical);
    section_line(&mut out, "Documents", &report.documents);
    section_line(&mut out, "Signatures", &report.signatures);

    let analysis = &report.analysis;
    let _ = writeln!(
        out,
        "Analysis: {} ({} loaded, {} within, {} out of range)",
        report.analysis_status.label(),
        analysis.present,
        analysis.ok,
        analysis.bad
    );
    for param in analysis.out_of_bounds() {
        let _ = writeln!(out, "  out of range: {} [{}]", param.label(), param.unit());
    }

    match &report.fee {
        FeeAssessment::Tier { category, amount } => {
            let _ = writeln!(out, "Fee: category {} ({:.2})", category, amount);
        }
        FeeAssessment::Unclassified => out.push_str("Fee: unclassified\n"),
    }
    for issue in tier_issues {
        let _ = writeln!(out, "  tier table: {}", issue);
    }

    let registry = match report.registry {
        RegistryStatus::Registered => "registered",
        RegistryStatus::NotRegistered => "NOT in registry",
        RegistryStatus::MissingNumber => "no registration number",
        RegistryStatus::NotChecked => "not checked",
    };
    let _ = writeln!(out, "Registry: {}", registry);

    if report.verdict.approved {
        out.push_str("Verdict: APPROVED\n");
    } else {
        out.push_str("Verdict: NOT APPROVED\n");
        for blocker in &report.verdict.blockers {
            let _ = writeln!(out, "  - {}", blocker);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use review_engine::{validate_tiers, ReviewEngine};
    use shared_types::{Dossier, FeeTier, Parameter, ReferenceLimits};

    #[test]
    fn test_render_empty_dossier() {
        let report =
            ReviewEngine::new().review(&Dossier::default(), &ReferenceLimits::default(), None);
        let text = render(&report, &[]);

        assert!(text.starts_with("Dossier (no file number)"));
        assert!(text.contains("Fee: unclassified"));
        assert!(text.contains("Registry: not checked"));
        assert!(text.contains("Verdict: NOT APPROVED"));
        assert!(text.contains("  - No lab analysis data"));
    }

    #[test]
    fn test_render_lists_out_of_range_and_fee() {
        let mut dossier = Dossier::default();
        dossier.metadata.file_number = "EXP-77".to_string();
        dossier.technical.annual_volume = "20000000".to_string();
        dossier.analysis.set_value(Parameter::Arsenic, "0.02");

        let report = ReviewEngine::new().review(&dossier, &ReferenceLimits::default(), None);
        let text = render(&report, &[]);

        assert!(text.starts_with("Dossier EXP-77"));
        assert!(text.contains("out of range: Arsenic"));
        assert!(text.contains("Fee: category V"));
    }

    #[test]
    fn test_render_tier_issues() {
        let tiers = vec![
            FeeTier::new("I", 0.0, Some(100.0), 1.0),
            FeeTier::new("II", 200.0, None, 2.0),
        ];
        let issues = validate_tiers(&tiers);
        let report =
            ReviewEngine::new().review(&Dossier::default(), &ReferenceLimits::default(), None);

        let text = render(&report, &issues);
        assert!(text.contains("tier table:"));
    }
}
