use super::*;

const PART_TITLE_NAMES: [&str; 4] = ["DESCRIPTION", "PRODUCTS", "EXECUTION", "GENERAL"];
const STRUCTURAL_PREFIXES: [&str; 7] = ["SECTION", "PART", "GENERAL", "1.", "2.", "A.", "B."];
const CONTENT_INDICATORS: [&str; 9] = [
    "shall", "will", "must", "should", "note:", "example:", ":", ".", ";",
];
const SUBSECTION_TITLE_MAX_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierRule {
    Empty,
    SectionHeader,
    SectionTitle,
    EndOfSection,
    Part,
    PartTitle,
    Subsection,
    Item,
    List,
    SubList,
    SubsectionTitle,
}

pub const CLASSIFIER_PRECEDENCE: [ClassifierRule; 11] = [
    ClassifierRule::Empty,
    ClassifierRule::SectionHeader,
    ClassifierRule::SectionTitle,
    ClassifierRule::EndOfSection,
    ClassifierRule::Part,
    ClassifierRule::PartTitle,
    ClassifierRule::Subsection,
    ClassifierRule::Item,
    ClassifierRule::List,
    ClassifierRule::SubList,
    ClassifierRule::SubsectionTitle,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClassifierContext {
    pub section_header_seen: bool,
    pub section_title_seen: bool,
    pub parts_seen: usize,
}

impl ClassifierContext {
    pub fn observe(&mut self, level_type: LevelType) {
        match level_type {
            LevelType::Section => self.section_header_seen = true,
            LevelType::Title => self.section_title_seen = true,
            LevelType::Part => self.parts_seen += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationIssue {
    DuplicateSectionHeader,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub level_type: LevelType,
    pub number: Option<String>,
    pub content: String,
    pub confidence: Confidence,
    pub issue: Option<ClassificationIssue>,
}

impl Classification {
    fn matched(level_type: LevelType, number: Option<&str>, content: &str) -> Self {
        Self {
            level_type,
            number: number.map(ToOwned::to_owned),
            content: content.to_string(),
            confidence: Confidence::Pattern,
            issue: None,
        }
    }

    fn content(text: &str) -> Self {
        Self {
            level_type: LevelType::Content,
            number: None,
            content: text.to_string(),
            confidence: Confidence::Fallback,
            issue: None,
        }
    }
}

#[derive(Debug)]
pub struct ParagraphClassifier {
    section_header: Regex,
    end_of_section: Regex,
    part: Regex,
    part_titles: Vec<(&'static str, Regex)>,
    subsection: Regex,
    subsection_alt: Regex,
    item: Regex,
    list: Regex,
    sub_list: Regex,
}

impl ParagraphClassifier {
    pub fn new() -> Result<Self, ExtractError> {
        let part_titles = PART_TITLE_NAMES
            .iter()
            .map(|name| {
                Regex::new(&format!(r"^(?:PART\s*)?(\d+)(?:\.0?)?\s*-?\s*{name}$"))
                    .map(|pattern| (*name, pattern))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            section_header: Regex::new(r"(?i)^SECTION\s+(.+)$")?,
            end_of_section: Regex::new(r"(?i)^END\s+OF\s+SECTION\s*(.+)?$")?,
            part: Regex::new(r"^(\d+\.0)\s+(.+)$")?,
            part_titles,
            subsection: Regex::new(r"^(\d+\.\d{2})\s+(.+)$")?,
            subsection_alt: Regex::new(r"^(\d+\.\d)\s+(.+)$")?,
            item: Regex::new(r"^([A-Z])\.\s+(.+)$")?,
            list: Regex::new(r"^(\d+)\.\s+(.+)$")?,
            sub_list: Regex::new(r"^([a-z])\.\s+(.+)$")?,
        })
    }

    pub fn classify(&self, text: &str, context: &ClassifierContext) -> Classification {
        let text = text.trim();

        CLASSIFIER_PRECEDENCE
            .iter()
            .find_map(|rule| self.apply(*rule, text, context))
            .unwrap_or_else(|| Classification::content(text))
    }

    fn apply(
        &self,
        rule: ClassifierRule,
        text: &str,
        context: &ClassifierContext,
    ) -> Option<Classification> {
        match rule {
            ClassifierRule::Empty => text.is_empty().then(|| Classification {
                level_type: LevelType::Empty,
                number: None,
                content: String::new(),
                confidence: Confidence::Pattern,
                issue: None,
            }),
            ClassifierRule::SectionHeader => self.match_section_header(text, context),
            ClassifierRule::SectionTitle => (context.section_header_seen
                && !context.section_title_seen)
                .then(|| Classification::matched(LevelType::Title, None, text)),
            ClassifierRule::EndOfSection => {
                if !starts_with_ignore_case(text, "END OF SECTION") {
                    return None;
                }
                let captures = self.end_of_section.captures(text)?;
                let suffix = captures
                    .get(1)
                    .map(|value| value.as_str().trim())
                    .unwrap_or_default();
                Some(Classification::matched(
                    LevelType::EndOfSection,
                    None,
                    suffix,
                ))
            }
            ClassifierRule::Part => capture_pair(&self.part, text)
                .map(|(number, rest)| Classification::matched(LevelType::Part, Some(number), rest)),
            ClassifierRule::PartTitle => self.match_part_title(text, context),
            ClassifierRule::Subsection => capture_pair(&self.subsection, text)
                .or_else(|| capture_pair(&self.subsection_alt, text))
                .map(|(number, rest)| {
                    Classification::matched(LevelType::Subsection, Some(number), rest)
                }),
            ClassifierRule::Item => capture_pair(&self.item, text)
                .map(|(number, rest)| Classification::matched(LevelType::Item, Some(number), rest)),
            ClassifierRule::List => capture_pair(&self.list, text)
                .map(|(number, rest)| Classification::matched(LevelType::List, Some(number), rest)),
            ClassifierRule::SubList => capture_pair(&self.sub_list, text).map(|(number, rest)| {
                Classification::matched(LevelType::SubList, Some(number), rest)
            }),
            ClassifierRule::SubsectionTitle => {
                looks_like_subsection_title(text).then(|| Classification {
                    level_type: LevelType::SubsectionTitle,
                    number: None,
                    content: text.to_string(),
                    confidence: Confidence::Heuristic,
                    issue: None,
                })
            }
        }
    }

    fn match_section_header(
        &self,
        text: &str,
        context: &ClassifierContext,
    ) -> Option<Classification> {
        if !starts_with_ignore_case(text, "SECTION") {
            return None;
        }

        if context.section_header_seen {
            let mut classification = Classification::content(text);
            classification.issue = Some(ClassificationIssue::DuplicateSectionHeader);
            return Some(classification);
        }

        let captures = self.section_header.captures(text)?;
        let number = captures.get(1)?.as_str().trim();
        Some(Classification::matched(LevelType::Section, Some(number), ""))
    }

    fn match_part_title(&self, text: &str, context: &ClassifierContext) -> Option<Classification> {
        let upper = text.to_uppercase();

        for (name, pattern) in &self.part_titles {
            if let Some(captures) = pattern.captures(&upper) {
                let number = format!("{}.0", &captures[1]);
                return Some(Classification::matched(
                    LevelType::PartTitle,
                    Some(number.as_str()),
                    name,
                ));
            }

            if upper.trim() == *name {
                let number = format!("{}.0", context.parts_seen + 1);
                return Some(Classification::matched(
                    LevelType::PartTitle,
                    Some(number.as_str()),
                    name,
                ));
            }
        }

        None
    }
}

fn capture_pair<'t>(pattern: &Regex, text: &'t str) -> Option<(&'t str, &'t str)> {
    let captures = pattern.captures(text)?;
    Some((captures.get(1)?.as_str(), captures.get(2)?.as_str()))
}

fn starts_with_ignore_case(text: &str, prefix: &str) -> bool {
    text.get(..prefix.len())
        .map(|head| head.eq_ignore_ascii_case(prefix))
        .unwrap_or(false)
}

fn looks_like_subsection_title(text: &str) -> bool {
    if text.chars().count() >= SUBSECTION_TITLE_MAX_CHARS {
        return false;
    }

    if !(is_upper_case(text) || is_title_case(text)) {
        return false;
    }

    let upper = text.to_uppercase();
    if STRUCTURAL_PREFIXES
        .iter()
        .any(|prefix| upper.starts_with(prefix))
    {
        return false;
    }

    let lower = text.to_lowercase();
    !CONTENT_INDICATORS
        .iter()
        .any(|indicator| lower.contains(indicator))
}

fn is_upper_case(text: &str) -> bool {
    let mut has_cased = false;
    for ch in text.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

fn is_title_case(text: &str) -> bool {
    if !text.chars().any(char::is_alphabetic) {
        return false;
    }

    let mut previous_is_letter = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            let expected_upper = !previous_is_letter;
            if expected_upper && ch.is_lowercase() {
                return false;
            }
            if !expected_upper && ch.is_uppercase() {
                return false;
            }
            previous_is_letter = true;
        } else {
            previous_is_letter = false;
        }
    }

    true
}
