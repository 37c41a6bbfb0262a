#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("document has no paragraphs with text")]
    EmptyDocument,
    #[error("paragraph record {index} has no text field")]
    MissingText { index: usize },
    #[error("failed to compile classifier pattern: {0}")]
    Pattern(#[from] regex::Error),
}
