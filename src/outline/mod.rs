use std::collections::HashMap;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::model::{
    Confidence, ConsistencyRule, ContentBlock, Correction, ErrorEntry, Inconsistency,
    LevelTransition, LevelType, ListPosition, NumberingFix, ParagraphRecord, Plausibility,
    ReviewFlag, SpecDocument, TemplateAnalysisSummary, TemplateLevels, TransitionAnalysis,
    TransitionType, ValidationReport, ValidationSummary,
};
use crate::util::{now_utc_string, truncate_context};

pub const DEFAULT_MAX_VALIDATION_ITERATIONS: usize = 10;
const CONTEXT_CHARS: usize = 100;

mod classify;
mod consistency;
mod correct;
mod error;
mod level_map;
mod pipeline;
mod plausibility;
mod reconcile;
mod report;
mod section;

use classify::*;
use consistency::*;
use correct::*;
use level_map::*;
use plausibility::*;
use reconcile::*;
use section::*;

pub use consistency::{ValidationOptions, validate_consistency};
pub use error::ExtractError;
pub use pipeline::{ExtractOptions, extract_document};
pub use report::render_error_report;
