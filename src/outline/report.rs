use std::collections::BTreeMap;

use super::*;

const RULE: &str = "----------------------------------------";
const BANNER: &str = "============================================================";

pub fn render_error_report(document: &SpecDocument) -> String {
    let mut lines = vec![
        format!("ERROR REPORT - {}", document.extraction_timestamp),
        format!("Source: {}", document.source_file),
        BANNER.to_string(),
        String::new(),
    ];

    push_numbering_fixes(&mut lines, &document.numbering_fixes);
    push_validation(&mut lines, &document.validation_results);
    push_errors(&mut lines, &document.errors);
    push_summary(&mut lines, document);

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn push_numbering_fixes(lines: &mut Vec<String>, fixes: &[NumberingFix]) {
    if fixes.is_empty() {
        return;
    }

    lines.push(format!("LIST NUMBERING FIXES ({} found):", fixes.len()));
    lines.push(RULE.to_string());
    for (position, fix) in fixes.iter().enumerate() {
        lines.push(format!("{}. Line {}: {}", position + 1, fix.line_number, fix.text));
        lines.push(format!(
            "   Detected: {}, Corrected: {} ({})",
            fix.detected_number,
            fix.correct_number,
            plausibility_label(fix.plausibility)
        ));
        lines.push(format!(
            "   Numbering ID: {}, Level: {}",
            fix.numbering_id, fix.numbering_level
        ));
        lines.push(String::new());
    }
}

fn push_validation(lines: &mut Vec<String>, report: &ValidationReport) {
    let summary = &report.validation_summary;

    lines.push("LEVEL CONSISTENCY VALIDATION:".to_string());
    lines.push(RULE.to_string());
    lines.push(format!("Total blocks: {}", summary.total_blocks));
    lines.push(format!("Hierarchical blocks: {}", summary.hierarchical_blocks));
    lines.push(format!("Inconsistencies found: {}", summary.inconsistencies_found));
    lines.push(format!("Corrections applied: {}", summary.corrections_applied));
    lines.push(format!("Level transitions: {}", summary.level_transitions));
    lines.push(format!(
        "Validation iterations: {} (cap reached: {})",
        summary.validation_iterations,
        yes_no(summary.hit_iteration_cap)
    ));

    let analysis = &summary.transition_analysis;
    if !analysis.patterns.is_empty() {
        lines.push(String::new());
        lines.push("Transition patterns:".to_string());
        for (transition_type, count) in &analysis.patterns {
            lines.push(format!("  {}: {}", transition_type.as_str(), count));
        }
        lines.push(format!(
            "  Irregular transitions: {}",
            analysis.irregular_transitions
        ));
        for transition in &analysis.irregular_details {
            lines.push(format!(
                "    block {} -> {}: level {} -> {} ({})",
                transition.from_block,
                transition.to_block,
                transition.from_level,
                transition.to_level,
                transition.transition_type.as_str()
            ));
        }
    }
    lines.push(String::new());

    if !report.inconsistencies_found.is_empty() {
        lines.push(format!(
            "LEVEL INCONSISTENCIES FOUND ({}):",
            report.inconsistencies_found.len()
        ));
        lines.push(RULE.to_string());
        for (position, item) in report.inconsistencies_found.iter().enumerate() {
            lines.push(format!(
                "{}. Block {} (pass {}): {}",
                position + 1,
                item.block_index,
                item.iteration,
                item.text
            ));
            lines.push(format!(
                "   Type: {} (level {})",
                item.level_type.as_str(),
                level_label(item.current_level)
            ));
            lines.push(format!(
                "   Suggested: {} (level {})",
                item.suggested_level_type.as_str(),
                item.suggested_level
            ));
            lines.push(format!("   Rule: {}", item.rule.as_str()));
            lines.push(format!("   Reason: {}", item.reason));
            lines.push(format!(
                "   Correction applied: {}",
                yes_no(item.correction_applied)
            ));
            lines.push(String::new());
        }
    }

    if !report.corrections_made.is_empty() {
        lines.push(format!(
            "LEVEL CORRECTIONS APPLIED ({}):",
            report.corrections_made.len()
        ));
        lines.push(RULE.to_string());
        for (position, correction) in report.corrections_made.iter().enumerate() {
            lines.push(format!(
                "{}. Block {} (pass {}): {}",
                position + 1,
                correction.block_index,
                correction.iteration,
                correction.text
            ));
            lines.push(format!(
                "   Type: {} -> {}",
                correction.old_level_type.as_str(),
                correction.new_level_type.as_str()
            ));
            lines.push(format!(
                "   Level: {} -> {}",
                level_label(correction.old_level),
                correction.new_level
            ));
            if correction.old_numbering_level != correction.new_numbering_level {
                lines.push(format!(
                    "   Numbering level: {} -> {}",
                    level_label(correction.old_numbering_level),
                    level_label(correction.new_numbering_level)
                ));
            }
            lines.push(format!("   Reason: {}", correction.reason));
            lines.push(String::new());
        }
    }

    if !report.review_flags.is_empty() {
        lines.push(format!("REVIEW FLAGS ({}):", report.review_flags.len()));
        lines.push(RULE.to_string());
        for (position, flag) in report.review_flags.iter().enumerate() {
            lines.push(format!(
                "{}. Block {}: {}",
                position + 1,
                flag.block_index,
                flag.text
            ));
            lines.push(format!(
                "   {} jumps from level {} to {}",
                flag.level_type.as_str(),
                flag.from_level,
                flag.to_level
            ));
            lines.push(String::new());
        }
    }
}

fn push_errors(lines: &mut Vec<String>, errors: &[ErrorEntry]) {
    if errors.is_empty() {
        lines.push("No errors found during extraction.".to_string());
        lines.push(String::new());
        return;
    }

    for (error_type, entries) in group_errors(errors) {
        lines.push(format!(
            "{} ERRORS ({} found):",
            error_type.to_uppercase(),
            entries.len()
        ));
        lines.push(RULE.to_string());
        for (position, entry) in entries.iter().enumerate() {
            lines.push(format!(
                "{}. Line {}: {}",
                position + 1,
                entry.line_number,
                entry.message
            ));
            if !entry.context.is_empty() {
                lines.push(format!("   Context: {}", entry.context));
            }
            if let Some(expected) = &entry.expected {
                lines.push(format!("   Expected: {expected}"));
            }
            if let Some(found) = &entry.found {
                lines.push(format!("   Found: {found}"));
            }
        }
        lines.push(String::new());
    }
}

fn push_summary(lines: &mut Vec<String>, document: &SpecDocument) {
    let report = &document.validation_results;

    lines.push("SUMMARY:".to_string());
    lines.push("--------------------".to_string());
    lines.push(format!("Total errors: {}", document.errors.len()));
    lines.push(format!(
        "List numbering fixes: {}",
        document.numbering_fixes.len()
    ));
    lines.push(format!(
        "Level inconsistencies: {}",
        report.inconsistencies_found.len()
    ));
    lines.push(format!(
        "Level corrections: {}",
        report.corrections_made.len()
    ));
    lines.push(format!("Review flags: {}", report.review_flags.len()));
    for (error_type, entries) in group_errors(&document.errors) {
        lines.push(format!("{}: {} errors", error_type, entries.len()));
    }
}

fn group_errors(errors: &[ErrorEntry]) -> BTreeMap<&str, Vec<&ErrorEntry>> {
    let mut grouped: BTreeMap<&str, Vec<&ErrorEntry>> = BTreeMap::new();
    for entry in errors {
        grouped
            .entry(entry.error_type.as_str())
            .or_default()
            .push(entry);
    }
    grouped
}

fn plausibility_label(plausibility: Plausibility) -> &'static str {
    match plausibility {
        Plausibility::Confirmed => "plausible",
        Plausibility::Implausible => "implausible",
        Plausibility::Unknown => "unverified",
    }
}

fn level_label(level: Option<u32>) -> String {
    level
        .map(|value| value.to_string())
        .unwrap_or_else(|| "none".to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}
