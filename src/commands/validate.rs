use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::model::SpecDocument;
use crate::outline::{ValidationOptions, render_error_report, validate_consistency};
use crate::util::{read_json, write_json_pretty, write_text};

pub fn run(args: ValidateArgs) -> Result<()> {
    if args.max_validation_iterations == 0 {
        bail!("--max-validation-iterations must be at least 1");
    }

    let mut document: SpecDocument = read_json(&args.input)?;
    info!(
        input = %args.input.display(),
        blocks = document.content_blocks.len(),
        "validation started"
    );

    let options = ValidationOptions {
        max_iterations: args.max_validation_iterations,
        auto_correct: true,
    };
    document.validation_results = validate_consistency(&mut document.content_blocks, &options);

    let summary = &document.validation_results.validation_summary;
    if summary.hit_iteration_cap {
        warn!(
            iterations = summary.validation_iterations,
            "document still has pending corrections"
        );
    }

    let output = args.output.clone().unwrap_or_else(|| args.input.clone());
    write_json_pretty(&output, &document)?;

    let report_path = match &args.report_path {
        Some(path) => path.clone(),
        None => default_report_path(&output)?,
    };
    write_text(&report_path, &render_error_report(&document))?;

    info!(
        output = %output.display(),
        report = %report_path.display(),
        corrections = summary.corrections_applied,
        review_flags = document.validation_results.review_flags.len(),
        "validate completed"
    );

    Ok(())
}

fn default_report_path(output: &Path) -> Result<PathBuf> {
    let stem = output
        .file_stem()
        .and_then(|stem| stem.to_str())
        .with_context(|| format!("invalid output file name: {}", output.display()))?;
    let stem = stem.strip_suffix("_spec").unwrap_or(stem);

    Ok(output.with_file_name(format!("{stem}_errors.txt")))
}
