use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelType {
    Section,
    Title,
    EndOfSection,
    Part,
    PartTitle,
    Subsection,
    SubsectionTitle,
    Item,
    List,
    SubList,
    Content,
    Empty,
}

impl LevelType {
    pub fn as_str(self) -> &'static str {
        match self {
            LevelType::Section => "section",
            LevelType::Title => "title",
            LevelType::EndOfSection => "end_of_section",
            LevelType::Part => "part",
            LevelType::PartTitle => "part_title",
            LevelType::Subsection => "subsection",
            LevelType::SubsectionTitle => "subsection_title",
            LevelType::Item => "item",
            LevelType::List => "list",
            LevelType::SubList => "sub_list",
            LevelType::Content => "content",
            LevelType::Empty => "empty",
        }
    }

    pub fn is_section_marker(self) -> bool {
        matches!(
            self,
            LevelType::Section | LevelType::Title | LevelType::EndOfSection
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    #[default]
    Pattern,
    NativeList,
    Heuristic,
    Fallback,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParagraphStyling {
    #[serde(default)]
    pub font_name: Option<String>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub font_bold: Option<bool>,
    #[serde(default)]
    pub font_italic: Option<bool>,
    #[serde(default)]
    pub font_underline: Option<String>,
    #[serde(default)]
    pub font_color: Option<String>,
    #[serde(default)]
    pub font_strike: Option<bool>,
    #[serde(default)]
    pub font_small_caps: Option<bool>,
    #[serde(default)]
    pub font_all_caps: Option<bool>,
    #[serde(default)]
    pub paragraph_alignment: Option<String>,
    #[serde(default)]
    pub paragraph_indent_left: Option<f64>,
    #[serde(default)]
    pub paragraph_indent_right: Option<f64>,
    #[serde(default)]
    pub paragraph_indent_first_line: Option<f64>,
    #[serde(default)]
    pub paragraph_spacing_before: Option<f64>,
    #[serde(default)]
    pub paragraph_spacing_after: Option<f64>,
    #[serde(default)]
    pub paragraph_line_spacing: Option<f64>,
    #[serde(default)]
    pub paragraph_line_spacing_rule: Option<String>,
    #[serde(default)]
    pub paragraph_keep_with_next: Option<bool>,
    #[serde(default)]
    pub paragraph_keep_lines_together: Option<bool>,
    #[serde(default)]
    pub paragraph_page_break_before: Option<bool>,
    #[serde(default)]
    pub paragraph_widow_control: Option<bool>,
    #[serde(default)]
    pub paragraph_dont_add_space_between_same_style: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListPosition {
    #[serde(default)]
    pub number_alignment: Option<String>,
    #[serde(default)]
    pub aligned_at: Option<f64>,
    #[serde(default)]
    pub text_indent_at: Option<f64>,
    #[serde(default)]
    pub follow_number_with: Option<String>,
    #[serde(default)]
    pub add_tab_stop_at: Option<f64>,
    #[serde(default)]
    pub link_level_to_style: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParagraphRecord {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "deserialize_numbering_id")]
    pub numbering_id: Option<String>,
    #[serde(default)]
    pub numbering_level: Option<u32>,
    #[serde(default)]
    pub style_name: Option<String>,
    #[serde(flatten)]
    pub styling: ParagraphStyling,
}

#[cfg(test)]
impl ParagraphRecord {
    pub fn new(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn numbered(text: &str, numbering_id: &str, numbering_level: u32) -> Self {
        Self {
            text: Some(text.to_string()),
            numbering_id: Some(numbering_id.to_string()),
            numbering_level: Some(numbering_level),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ParagraphSource {
    Document {
        #[serde(default)]
        source_file: Option<String>,
        paragraphs: Vec<ParagraphRecord>,
    },
    Paragraphs(Vec<ParagraphRecord>),
}

impl ParagraphSource {
    pub fn into_parts(self) -> (Option<String>, Vec<ParagraphRecord>) {
        match self {
            ParagraphSource::Document {
                source_file,
                paragraphs,
            } => (source_file, paragraphs),
            ParagraphSource::Paragraphs(paragraphs) => (None, paragraphs),
        }
    }
}

fn deserialize_numbering_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawNumberingId {
        Text(String),
        Number(i64),
    }

    let raw = Option::<RawNumberingId>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        RawNumberingId::Text(text) => text,
        RawNumberingId::Number(number) => number.to_string(),
    }))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    pub text: String,
    pub level_type: LevelType,
    pub number: Option<String>,
    pub content: String,
    pub level_number: Option<u32>,
    pub bwa_level_name: Option<String>,
    pub numbering_id: Option<String>,
    pub numbering_level: Option<u32>,
    #[serde(default)]
    pub style_name: Option<String>,
    #[serde(default)]
    pub classification_confidence: Confidence,
    #[serde(flatten)]
    pub styling: ParagraphStyling,
    #[serde(flatten)]
    pub list_position: ListPosition,
    #[serde(default)]
    pub used_fallback_styling: bool,
}

impl ContentBlock {
    pub fn new(text: &str, level_type: LevelType, level_number: Option<u32>) -> Self {
        Self {
            text: text.to_string(),
            level_type,
            number: None,
            content: text.to_string(),
            level_number,
            bwa_level_name: None,
            numbering_id: None,
            numbering_level: None,
            style_name: None,
            classification_confidence: Confidence::Pattern,
            styling: ParagraphStyling::default(),
            list_position: ListPosition::default(),
            used_fallback_styling: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub line_number: usize,
    pub error_type: String,
    pub message: String,
    pub context: String,
    #[serde(default)]
    pub expected: Option<String>,
    #[serde(default)]
    pub found: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Plausibility {
    Confirmed,
    Implausible,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberingFix {
    pub line_number: usize,
    pub text: String,
    pub detected_number: String,
    pub correct_number: String,
    pub numbering_id: String,
    pub numbering_level: u32,
    pub plausibility: Plausibility,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsistencyRule {
    TypeLevelAgreement,
    ConsecutiveTopLevel,
    SubsectionToListJump,
}

impl ConsistencyRule {
    pub fn as_str(self) -> &'static str {
        match self {
            ConsistencyRule::TypeLevelAgreement => "type_level_agreement",
            ConsistencyRule::ConsecutiveTopLevel => "consecutive_top_level",
            ConsistencyRule::SubsectionToListJump => "subsection_to_list_jump",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inconsistency {
    pub block_index: usize,
    pub iteration: usize,
    pub rule: ConsistencyRule,
    pub text: String,
    pub level_type: LevelType,
    pub current_level: Option<u32>,
    pub suggested_level_type: LevelType,
    pub suggested_level: u32,
    pub reason: String,
    pub correction_applied: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub block_index: usize,
    pub iteration: usize,
    pub rule: ConsistencyRule,
    pub text: String,
    pub old_level_type: LevelType,
    pub new_level_type: LevelType,
    pub old_level: Option<u32>,
    pub new_level: u32,
    pub old_numbering_level: Option<u32>,
    pub new_numbering_level: Option<u32>,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewFlag {
    pub block_index: usize,
    pub text: String,
    pub level_type: LevelType,
    pub from_level: u32,
    pub to_level: u32,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionType {
    SameLevel,
    IncreaseByOne,
    DecreaseByOne,
    JumpUp,
    JumpDown,
}

impl TransitionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransitionType::SameLevel => "same_level",
            TransitionType::IncreaseByOne => "increase_by_one",
            TransitionType::DecreaseByOne => "decrease_by_one",
            TransitionType::JumpUp => "jump_up",
            TransitionType::JumpDown => "jump_down",
        }
    }

    pub fn is_irregular(self) -> bool {
        matches!(self, TransitionType::JumpUp | TransitionType::JumpDown)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTransition {
    pub from_block: usize,
    pub to_block: usize,
    pub from_level: u32,
    pub to_level: u32,
    pub transition_type: TransitionType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionAnalysis {
    pub total_transitions: usize,
    pub patterns: BTreeMap<TransitionType, usize>,
    pub irregular_transitions: usize,
    pub irregular_details: Vec<LevelTransition>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub total_blocks: usize,
    pub hierarchical_blocks: usize,
    pub inconsistencies_found: usize,
    pub corrections_applied: usize,
    pub level_transitions: usize,
    pub transition_analysis: TransitionAnalysis,
    pub validation_iterations: usize,
    pub hit_iteration_cap: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub inconsistencies_found: Vec<Inconsistency>,
    pub corrections_made: Vec<Correction>,
    pub review_flags: Vec<ReviewFlag>,
    pub validation_summary: ValidationSummary,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateLevel {
    pub level_number: u32,
    #[serde(default, deserialize_with = "deserialize_numbering_id")]
    pub numbering_id: Option<String>,
    #[serde(default)]
    pub abstract_num_id: Option<String>,
    #[serde(default)]
    pub level_text: Option<String>,
    #[serde(default)]
    pub number_format: Option<String>,
    #[serde(default)]
    pub start_value: Option<String>,
    #[serde(default)]
    pub suffix: Option<String>,
    #[serde(default)]
    pub justification: Option<String>,
    #[serde(default)]
    pub style_name: Option<String>,
    #[serde(default)]
    pub bwa_label: Option<String>,
    #[serde(default)]
    pub indent_left_twips: Option<f64>,
    #[serde(default)]
    pub indent_first_line_twips: Option<f64>,
    #[serde(default)]
    pub tab_stop_twips: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateLevels {
    #[serde(default)]
    pub template_path: Option<String>,
    pub levels: BTreeMap<String, TemplateLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplateAnalysisSummary {
    pub template_path: Option<String>,
    pub total_levels: usize,
    pub level_labels: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecDocument {
    pub source_file: String,
    #[serde(default)]
    pub source_hash: Option<String>,
    pub extraction_timestamp: String,
    pub section_number: String,
    pub section_title: String,
    pub end_of_section: String,
    pub content_blocks: Vec<ContentBlock>,
    #[serde(default)]
    pub numbering_fixes: Vec<NumberingFix>,
    #[serde(default)]
    pub errors: Vec<ErrorEntry>,
    #[serde(default)]
    pub validation_results: ValidationReport,
    #[serde(default)]
    pub template_analysis: TemplateAnalysisSummary,
}
