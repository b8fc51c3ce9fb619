//! Formatted terminal output for single results, batches and catalog audits.
//!
//! We keep formatting code in one place so:
//! - the scoring code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::catalog::CatalogAudit;
use crate::domain::{Axis, Big5Trait, EngineResult, NineType};
use crate::plot;
use crate::report::BatchReport;

/// Number of nine-type candidates listed in a summary.
const TOP_CANDIDATES: usize = 3;

/// Format the full single-result summary.
pub fn format_result_summary(result: &EngineResult, plot_width: Option<usize>) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== im - assessment summary ({}) ===\n", result.engine_version));
    out.push_str(&format!("Generated: {}\n", result.generated_at.to_rfc3339()));
    out.push_str(&format!("Fingerprint: {}\n", short_fingerprint(&result.fingerprint)));
    if result.fallback {
        out.push_str("NOTE: scoring failed validation; showing the neutral fallback.\n");
    }

    out.push_str(&format!(
        "\nBig5 (overall confidence {:.2}):\n",
        result.big5.confidence.overall
    ));
    out.push_str(&format!("{:<18} {:>5} {:>10}\n", "trait", "score", "confidence"));
    out.push_str(&format!("{:-<18} {:-<5} {:-<10}\n", "", "", ""));
    for t in Big5Trait::ALL {
        out.push_str(&format!(
            "{:<18} {:>5} {:>10.2}\n",
            t.display_name(),
            result.big5.scores.get(t),
            result.big5.confidence.traits.get(t)
        ));
    }

    let typology = &result.typology;
    out.push_str(&format!("\nType code: {}", typology.code));
    if let Some(alt) = typology.alternative_code() {
        out.push_str(&format!(" (alternatives: {alt})"));
    }
    out.push_str(&format!(" | overall confidence {:.2}\n", typology.confidence.overall));
    out.push_str(&format!("{:<6} {:>5} {:>10} {:<8}\n", "axis", "value", "confidence", "boundary"));
    out.push_str(&format!("{:-<6} {:-<5} {:-<10} {:-<8}\n", "", "", "", ""));
    for axis in Axis::ALL {
        let boundary = if *typology.confidence.boundary.get(axis) { "yes" } else { "" };
        out.push_str(
            format!(
                "{:<6} {:>5} {:>10.2} {:<8}\n",
                axis.display_name(),
                typology.axis100.get(axis),
                typology.confidence.axes.get(axis),
                boundary
            )
            .trim_end(),
        );
        out.push('\n');
    }

    let nine = &result.nine_type;
    out.push_str(&format!(
        "\nNine-type: {} (p={:.3})\n",
        nine.wing_label(),
        nine.prob_top
    ));
    for c in nine.top_candidates(TOP_CANDIDATES) {
        out.push_str(&format!("- type {} p={:.3} [{}]\n", c.nine_type, c.p, c.tier));
    }

    out.push_str("\nInner9:\n");
    for (dim, score) in result.inner9.iter() {
        out.push_str(&format!("{:<12} {:>3}\n", dim.display_name(), score));
    }

    if let Some(width) = plot_width {
        out.push('\n');
        out.push_str(&plot::render_big5_bars(&result.big5.scores, width));
        out.push('\n');
        out.push_str(&plot::render_axis_bars(&typology.axis100, width));
        out.push('\n');
        out.push_str(&plot::render_nine_type_bars(nine, width));
        out.push('\n');
        out.push_str(&plot::render_inner9_bars(&result.inner9, width));
    }

    out
}

/// Format a batch overview.
pub fn format_batch_report(report: &BatchReport, plot_height: Option<usize>) -> String {
    let mut out = String::new();
    let s = &report.summary;

    out.push_str("=== im - batch summary ===\n");
    out.push_str(&format!(
        "Inputs: {} | scored={} fallback={} rejected={}\n",
        s.total, s.scored, s.fallbacks, s.rejected
    ));

    out.push_str("\nMean Big5:\n");
    for t in Big5Trait::ALL {
        out.push_str(&format!("{:<18} {:>6.1}\n", t.display_name(), report.big5_means.get(t)));
    }

    if let Some(inner9) = &report.inner9_means {
        out.push_str("\nMean Inner9:\n");
        for (dim, score) in inner9.iter() {
            out.push_str(&format!("{:<12} {:>3}\n", dim.display_name(), score));
        }
    }

    out.push_str(&format!(
        "\nBoundary share: {:.1}%\n",
        report.boundary_share * 100.0
    ));
    out.push_str("Type codes:\n");
    for (code, n) in &report.code_counts {
        out.push_str(&format!("- {code} {n}\n"));
    }

    out.push_str("\nPrimary nine-types:\n");
    for t in NineType::ALL {
        let n = report.primary_counts.get(t);
        if *n > 0 {
            out.push_str(&format!("- type {t}: {n}\n"));
        }
    }

    if let Some(height) = plot_height {
        out.push('\n');
        out.push_str(&plot::render_column_chart("Primary type", &report.primary_count_rows(), height));
    }

    out
}

/// Format a catalog coverage audit.
pub fn format_catalog_audit(audit: &CatalogAudit) -> String {
    let mut out = String::new();

    out.push_str("=== im - catalog audit ===\n");
    out.push_str(&format!(
        "Items: {} | reverse-keyed: {} ({:.1}%)\n",
        audit.total_items,
        audit.reverse_items,
        audit.reverse_ratio * 100.0
    ));

    out.push_str("\nItems per trait:\n");
    for (t, n) in audit.items_per_trait.iter() {
        out.push_str(&format!("{:<18} {n:>3}\n", t.display_name()));
    }
    out.push_str("\nItems per axis:\n");
    for (axis, n) in audit.items_per_axis.iter() {
        out.push_str(&format!("{:<18} {n:>3}\n", axis.display_name()));
    }
    out.push_str("\nItems per nine-type:\n");
    for (t, n) in audit.items_per_type.iter() {
        out.push_str(&format!("type {:<13} {n:>3}\n", t.to_string()));
    }

    if audit.warnings.is_empty() {
        out.push_str("\nNo coverage warnings.\n");
    } else {
        out.push_str("\nWarnings:\n");
        for w in &audit.warnings {
            out.push_str(&format!("- {w}\n"));
        }
    }

    out
}

fn short_fingerprint(fp: &str) -> &str {
    fp.get(..12).unwrap_or(fp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCatalog;
    use crate::domain::ResponseSet;
    use crate::engine::run_default;
    use crate::report::summarize_batch;

    #[test]
    fn result_summary_mentions_every_section() {
        let result = run_default(&ResponseSet::from_positional(&[4; 62])).unwrap();
        let text = format_result_summary(&result, Some(20));
        assert!(text.contains("Type code: ENTJ (alternatives: E/IN/ST/FJ/P)"));
        assert!(text.contains("Openness"));
        assert!(text.contains("Nine-type:"));
        assert!(text.contains("[high]"));
        assert!(text.contains("growth"));
        assert!(text.contains("Axes\n"));
        assert!(!text.contains("NOTE"));
    }

    #[test]
    fn batch_report_lists_codes() {
        let results = vec![run_default(&ResponseSet::from_positional(&[4; 62]))];
        let text = format_batch_report(&summarize_batch(&results), Some(4));
        assert!(text.contains("scored=1"));
        assert!(text.contains("- ENTJ 1"));
        assert!(text.contains("Mean Inner9:"));
        assert!(text.contains("Primary type (max=1)"));
    }

    #[test]
    fn audit_report_has_no_warnings_for_default_catalog() {
        let text = format_catalog_audit(&ItemCatalog::default_catalog().audit());
        assert!(text.contains("Items: 62"));
        assert!(text.contains("No coverage warnings."));
    }
}
