use std::cmp::Ordering;

use super::*;

const IRREGULAR_DETAIL_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
    pub max_iterations: usize,
    pub auto_correct: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_VALIDATION_ITERATIONS,
            auto_correct: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    pub rule: ConsistencyRule,
    pub level_type: LevelType,
    pub level_number: u32,
    pub reset_numbering_level: bool,
    pub reason: String,
}

#[derive(Debug, Default)]
struct PassOutcome {
    corrections: usize,
    transitions: Vec<LevelTransition>,
    review_flags: Vec<ReviewFlag>,
}

pub fn validate_consistency(
    blocks: &mut [ContentBlock],
    options: &ValidationOptions,
) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut iteration = 0usize;
    let mut pending = !blocks.is_empty();
    let mut last_pass = PassOutcome::default();

    while pending && iteration < options.max_iterations {
        iteration += 1;
        last_pass = run_pass(blocks, iteration, options.auto_correct, &mut report);
        pending = last_pass.corrections > 0;
        debug!(
            iteration,
            corrections = last_pass.corrections,
            "consistency pass complete"
        );
    }

    let hit_iteration_cap = pending && has_outstanding_repairs(blocks);
    if hit_iteration_cap {
        warn!(
            iterations = iteration,
            max_iterations = options.max_iterations,
            "consistency validation stopped at iteration cap with corrections pending"
        );
    }

    let hierarchical_blocks = blocks
        .iter()
        .filter(|block| !block.level_type.is_section_marker())
        .count();

    report.review_flags = last_pass.review_flags;
    report.validation_summary = ValidationSummary {
        total_blocks: blocks.len(),
        hierarchical_blocks,
        inconsistencies_found: report.inconsistencies_found.len(),
        corrections_applied: report.corrections_made.len(),
        level_transitions: last_pass.transitions.len(),
        transition_analysis: analyze_transitions(&last_pass.transitions),
        validation_iterations: iteration,
        hit_iteration_cap,
    };

    report
}

fn run_pass(
    blocks: &mut [ContentBlock],
    iteration: usize,
    auto_correct: bool,
    report: &mut ValidationReport,
) -> PassOutcome {
    let mut outcome = PassOutcome::default();
    let mut last_level: Option<(usize, u32)> = None;

    for index in 0..blocks.len() {
        if blocks[index].level_type.is_section_marker() {
            continue;
        }

        if let Some(repair) = check_type_level_agreement(index, blocks) {
            apply_repair(
                &mut blocks[index],
                index,
                repair,
                iteration,
                auto_correct,
                report,
                &mut outcome,
            );
        }

        let skip_jump_rule = match check_consecutive_top_level(index, blocks) {
            Some(repair) => {
                apply_repair(
                    &mut blocks[index],
                    index,
                    repair,
                    iteration,
                    auto_correct,
                    report,
                    &mut outcome,
                );
                true
            }
            None => false,
        };

        if !skip_jump_rule {
            if let Some(repair) = check_subsection_to_list_jump(index, blocks) {
                apply_repair(
                    &mut blocks[index],
                    index,
                    repair,
                    iteration,
                    auto_correct,
                    report,
                    &mut outcome,
                );
            } else if let Some(flag) = review_unrepaired_jump(index, blocks) {
                outcome.review_flags.push(flag);
            }
        }

        if let Some(level) = blocks[index].level_number {
            if let Some((from_block, from_level)) = last_level {
                outcome.transitions.push(LevelTransition {
                    from_block,
                    to_block: index,
                    from_level,
                    to_level: level,
                    transition_type: classify_transition(from_level, level),
                });
            }
            last_level = Some((index, level));
        }
    }

    outcome
}

pub fn check_type_level_agreement(index: usize, blocks: &[ContentBlock]) -> Option<Repair> {
    let block = &blocks[index];
    let expected = canonical_depth(block.level_type)?;
    if block.level_number == Some(expected) {
        return None;
    }

    Some(Repair {
        rule: ConsistencyRule::TypeLevelAgreement,
        level_type: block.level_type,
        level_number: expected,
        reset_numbering_level: false,
        reason: format!(
            "{} belongs at level {}, found {}",
            block.level_type.as_str(),
            expected,
            describe_level(block.level_number)
        ),
    })
}

pub fn check_consecutive_top_level(index: usize, blocks: &[ContentBlock]) -> Option<Repair> {
    let current = blocks[index].level_number?;
    let previous = previous_level(index, blocks)?;
    if current != 0 || previous != 0 {
        return None;
    }

    Some(Repair {
        rule: ConsistencyRule::ConsecutiveTopLevel,
        level_type: LevelType::SubsectionTitle,
        level_number: 1,
        reset_numbering_level: false,
        reason: "two level 0 blocks in sequence, the second belongs at level 1".to_string(),
    })
}

pub fn check_subsection_to_list_jump(index: usize, blocks: &[ContentBlock]) -> Option<Repair> {
    let current = blocks[index].level_number?;
    let previous = previous_level(index, blocks)?;
    if previous != 1 || current < 3 {
        return None;
    }

    Some(Repair {
        rule: ConsistencyRule::SubsectionToListJump,
        level_type: LevelType::Item,
        level_number: 2,
        reset_numbering_level: true,
        reason: format!("jump from level {previous} to {current} without an item, treated as item"),
    })
}

fn review_unrepaired_jump(index: usize, blocks: &[ContentBlock]) -> Option<ReviewFlag> {
    let block = &blocks[index];
    let current = block.level_number?;
    let previous = previous_level(index, blocks)?;
    if current <= previous.saturating_add(1) {
        return None;
    }

    Some(ReviewFlag {
        block_index: index,
        text: truncate_context(&block.text, CONTEXT_CHARS),
        level_type: block.level_type,
        from_level: previous,
        to_level: current,
        reason: format!("jump from level {previous} to {current} left for review"),
    })
}

fn has_outstanding_repairs(blocks: &[ContentBlock]) -> bool {
    (0..blocks.len())
        .filter(|index| !blocks[*index].level_type.is_section_marker())
        .any(|index| {
            check_type_level_agreement(index, blocks).is_some()
                || check_consecutive_top_level(index, blocks).is_some()
                || check_subsection_to_list_jump(index, blocks).is_some()
        })
}

fn previous_level(index: usize, blocks: &[ContentBlock]) -> Option<u32> {
    blocks[..index]
        .iter()
        .rev()
        .find(|block| !block.level_type.is_section_marker())
        .and_then(|block| block.level_number)
}

fn apply_repair(
    block: &mut ContentBlock,
    index: usize,
    repair: Repair,
    iteration: usize,
    auto_correct: bool,
    report: &mut ValidationReport,
    outcome: &mut PassOutcome,
) {
    let text = truncate_context(&block.text, CONTEXT_CHARS);

    report.inconsistencies_found.push(Inconsistency {
        block_index: index,
        iteration,
        rule: repair.rule,
        text: text.clone(),
        level_type: block.level_type,
        current_level: block.level_number,
        suggested_level_type: repair.level_type,
        suggested_level: repair.level_number,
        reason: repair.reason.clone(),
        correction_applied: auto_correct,
    });

    if !auto_correct {
        return;
    }

    let old_level_type = block.level_type;
    let old_level = block.level_number;
    let old_numbering_level = block.numbering_level;

    block.level_type = repair.level_type;
    block.level_number = Some(repair.level_number);
    block.bwa_level_name = style_label(repair.level_type).map(ToOwned::to_owned);
    if repair.reset_numbering_level {
        block.numbering_level = Some(0);
    }
    block.used_fallback_styling = true;

    debug!(
        block = index,
        rule = repair.rule.as_str(),
        from = old_level_type.as_str(),
        to = repair.level_type.as_str(),
        "applied consistency correction"
    );

    report.corrections_made.push(Correction {
        block_index: index,
        iteration,
        rule: repair.rule,
        text,
        old_level_type,
        new_level_type: repair.level_type,
        old_level,
        new_level: repair.level_number,
        old_numbering_level,
        new_numbering_level: block.numbering_level,
        reason: repair.reason,
    });
    outcome.corrections += 1;
}

pub fn classify_transition(from_level: u32, to_level: u32) -> TransitionType {
    match to_level.cmp(&from_level) {
        Ordering::Equal => TransitionType::SameLevel,
        Ordering::Greater if to_level == from_level + 1 => TransitionType::IncreaseByOne,
        Ordering::Greater => TransitionType::JumpUp,
        Ordering::Less if to_level + 1 == from_level => TransitionType::DecreaseByOne,
        Ordering::Less => TransitionType::JumpDown,
    }
}

fn analyze_transitions(transitions: &[LevelTransition]) -> TransitionAnalysis {
    let mut analysis = TransitionAnalysis {
        total_transitions: transitions.len(),
        ..TransitionAnalysis::default()
    };

    for transition in transitions {
        *analysis
            .patterns
            .entry(transition.transition_type)
            .or_insert(0) += 1;

        if transition.transition_type.is_irregular() {
            analysis.irregular_transitions += 1;
            if analysis.irregular_details.len() < IRREGULAR_DETAIL_LIMIT {
                analysis.irregular_details.push(transition.clone());
            }
        }
    }

    analysis
}

fn describe_level(level: Option<u32>) -> String {
    level
        .map(|value| value.to_string())
        .unwrap_or_else(|| "none".to_string())
}
