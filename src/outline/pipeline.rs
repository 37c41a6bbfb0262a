use super::*;

const FIX_CONTEXT_CHARS: usize = 50;
const MIN_CONTENT_BLOCKS: usize = 3;

#[derive(Debug, Clone, Default)]
pub struct ExtractOptions {
    pub validation: ValidationOptions,
    pub template: Option<TemplateLevels>,
}

struct ExtractionState<'a> {
    context: ClassifierContext,
    counters: NumberingCounters,
    blocks: Vec<ContentBlock>,
    fixes: Vec<NumberingFix>,
    errors: Vec<ErrorEntry>,
    template: Option<&'a TemplateLevels>,
}

impl<'a> ExtractionState<'a> {
    fn new(template: Option<&'a TemplateLevels>) -> Self {
        Self {
            context: ClassifierContext::default(),
            counters: NumberingCounters::new(),
            blocks: Vec::new(),
            fixes: Vec::new(),
            errors: Vec::new(),
            template,
        }
    }

    fn process(
        &mut self,
        classifier: &ParagraphClassifier,
        line_number: usize,
        text: &str,
        paragraph: &ParagraphRecord,
    ) {
        let classification = classifier.classify(text, &self.context);
        if classification.level_type == LevelType::Empty {
            return;
        }

        if classification.issue == Some(ClassificationIssue::DuplicateSectionHeader) {
            warn!(line = line_number, text = %text, "multiple section headers found");
            self.errors.push(ErrorEntry {
                line_number,
                error_type: "Structure Error".to_string(),
                message: "Multiple section headers found".to_string(),
                context: truncate_context(text, CONTEXT_CHARS),
                expected: None,
                found: None,
            });
        }
        self.context.observe(classification.level_type);

        let numbering_id = paragraph.numbering_id.as_deref();
        let numbering_level = paragraph.numbering_level;

        let level_type = correct_level_type(classification.level_type, numbering_id, numbering_level);
        let confidence = if level_type == classification.level_type {
            classification.confidence
        } else {
            Confidence::NativeList
        };

        let reconciled = self.counters.reconcile(
            numbering_id,
            numbering_level,
            classification.number.as_deref(),
        );
        if reconciled.was_corrected {
            let detected_number = classification.number.clone().unwrap_or_default();
            let plausibility = assess_numbering(&detected_number, level_type, self.blocks.last());
            debug!(
                line = line_number,
                detected = %detected_number,
                corrected = ?reconciled.number,
                "numbering fix recorded"
            );
            self.fixes.push(NumberingFix {
                line_number,
                text: truncate_context(text, FIX_CONTEXT_CHARS),
                detected_number,
                correct_number: reconciled.number.clone().unwrap_or_default(),
                numbering_id: numbering_id.unwrap_or_default().to_string(),
                numbering_level: numbering_level.unwrap_or_default(),
                plausibility,
            });
        }

        let (mut level_number, label) = map_level(level_type);
        if level_number.is_none() && !level_type.is_section_marker() {
            level_number = numbering_level;
        }

        let mut block = ContentBlock::new(text, level_type, level_number);
        block.number = reconciled.number;
        block.content = classification.content;
        block.bwa_level_name = label.map(ToOwned::to_owned);
        block.numbering_id = paragraph.numbering_id.clone();
        block.numbering_level = numbering_level;
        block.style_name = paragraph.style_name.clone();
        block.classification_confidence = confidence;
        block.styling = paragraph.styling.clone();
        block.list_position = label
            .map(|label| list_position(label, self.template))
            .unwrap_or_default();

        self.blocks.push(block);
    }
}

pub fn extract_document(
    source_file: &str,
    paragraphs: &[ParagraphRecord],
    options: &ExtractOptions,
) -> Result<SpecDocument, ExtractError> {
    if paragraphs.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    let mut lines = Vec::with_capacity(paragraphs.len());
    for (index, paragraph) in paragraphs.iter().enumerate() {
        let text = paragraph
            .text
            .as_deref()
            .ok_or(ExtractError::MissingText { index })?
            .trim();
        if !text.is_empty() {
            lines.push((text, paragraph));
        }
    }

    if lines.is_empty() {
        return Err(ExtractError::EmptyDocument);
    }

    let classifier = ParagraphClassifier::new()?;
    let section_patterns = SectionNumberPatterns::new()?;
    let mut state = ExtractionState::new(options.template.as_ref());

    for (index, (text, paragraph)) in lines.into_iter().enumerate() {
        state.process(&classifier, index + 1, text, paragraph);
    }

    let ExtractionState {
        mut blocks,
        fixes,
        mut errors,
        ..
    } = state;

    let section_number = blocks
        .iter()
        .find(|block| block.level_type == LevelType::Section)
        .and_then(|block| block.number.as_deref())
        .map(|raw| section_patterns.normalize(raw))
        .unwrap_or_default();
    let section_title = find_content(&blocks, LevelType::Title);
    let end_of_section = find_content(&blocks, LevelType::EndOfSection);

    check_document_structure(&blocks, &mut errors);

    let validation_results = validate_consistency(&mut blocks, &options.validation);

    info!(
        source = %source_file,
        blocks = blocks.len(),
        numbering_fixes = fixes.len(),
        errors = errors.len(),
        corrections = validation_results.validation_summary.corrections_applied,
        iterations = validation_results.validation_summary.validation_iterations,
        "extraction completed"
    );

    Ok(SpecDocument {
        source_file: source_file.to_string(),
        source_hash: None,
        extraction_timestamp: now_utc_string(),
        section_number,
        section_title,
        end_of_section,
        content_blocks: blocks,
        numbering_fixes: fixes,
        errors,
        validation_results,
        template_analysis: summarize_template(options.template.as_ref()),
    })
}

fn find_content(blocks: &[ContentBlock], level_type: LevelType) -> String {
    blocks
        .iter()
        .find(|block| block.level_type == level_type)
        .map(|block| block.content.clone())
        .unwrap_or_default()
}

fn check_document_structure(blocks: &[ContentBlock], errors: &mut Vec<ErrorEntry>) {
    if blocks.len() < MIN_CONTENT_BLOCKS {
        errors.push(ErrorEntry {
            line_number: 0,
            error_type: "insufficient_content".to_string(),
            message: "Document has insufficient content blocks".to_string(),
            context: format!(
                "Found {} blocks, minimum {} required",
                blocks.len(),
                MIN_CONTENT_BLOCKS
            ),
            expected: Some(format!("{MIN_CONTENT_BLOCKS}+ content blocks")),
            found: Some(blocks.len().to_string()),
        });
    }

    if !blocks
        .iter()
        .any(|block| block.level_type == LevelType::Section)
    {
        errors.push(ErrorEntry {
            line_number: 0,
            error_type: "missing_section_header".to_string(),
            message: "Document has no SECTION header".to_string(),
            context: String::new(),
            expected: Some("SECTION <number>".to_string()),
            found: None,
        });
    }
}

fn summarize_template(template: Option<&TemplateLevels>) -> TemplateAnalysisSummary {
    match template {
        Some(template) => TemplateAnalysisSummary {
            template_path: template.template_path.clone(),
            total_levels: template.levels.len(),
            level_labels: template.levels.keys().cloned().collect(),
            error: None,
        },
        None => TemplateAnalysisSummary {
            template_path: None,
            total_levels: 0,
            level_labels: Vec::new(),
            error: Some("No template analysis available".to_string()),
        },
    }
}
