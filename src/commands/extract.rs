use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::cli::ExtractArgs;
use crate::model::{ParagraphSource, SpecDocument, TemplateLevels};
use crate::outline::{ExtractOptions, ValidationOptions, extract_document, render_error_report};
use crate::util::{read_json, sha256_file, write_json_pretty, write_text};

pub fn run(args: ExtractArgs) -> Result<()> {
    if args.max_validation_iterations == 0 {
        bail!("--max-validation-iterations must be at least 1");
    }

    let source: ParagraphSource = read_json(&args.input)?;
    let (source_file, paragraphs) = source.into_parts();
    let source_file = source_file.unwrap_or_else(|| args.input.display().to_string());

    let template = match &args.template_levels {
        Some(path) => Some(
            read_json::<TemplateLevels>(path)
                .with_context(|| format!("failed to load template levels: {}", path.display()))?,
        ),
        None => None,
    };

    info!(
        input = %args.input.display(),
        paragraphs = paragraphs.len(),
        template = template.is_some(),
        "extraction started"
    );

    let options = ExtractOptions {
        validation: ValidationOptions {
            max_iterations: args.max_validation_iterations,
            auto_correct: !args.no_auto_correct,
        },
        template,
    };

    let mut document = extract_document(&source_file, &paragraphs, &options)
        .with_context(|| format!("failed to extract {}", args.input.display()))?;
    document.source_hash = Some(sha256_file(&args.input)?);

    let stem = output_stem(&args.input)?;
    let written = write_outputs(&document, &args.output_dir, &stem, args.modular)?;

    for path in &written {
        info!(path = %path.display(), "wrote output");
    }
    info!(
        blocks = document.content_blocks.len(),
        errors = document.errors.len(),
        numbering_fixes = document.numbering_fixes.len(),
        "extract completed"
    );

    Ok(())
}

fn output_stem(input: &Path) -> Result<String> {
    input
        .file_stem()
        .and_then(|stem| stem.to_str())
        .map(ToOwned::to_owned)
        .with_context(|| format!("invalid input file name: {}", input.display()))
}

fn write_outputs(
    document: &SpecDocument,
    output_dir: &Path,
    stem: &str,
    modular: bool,
) -> Result<Vec<PathBuf>> {
    let spec_path = output_dir.join(format!("{stem}_spec.json"));
    write_json_pretty(&spec_path, document)?;

    let report_path = output_dir.join(format!("{stem}_errors.txt"));
    write_text(&report_path, &render_error_report(document))?;

    let mut written = vec![spec_path, report_path];

    if modular {
        let blocks_path = output_dir.join(format!("{stem}_content_blocks.json"));
        write_json_pretty(&blocks_path, &document.content_blocks)?;

        let template_path = output_dir.join(format!("{stem}_template_analysis.json"));
        write_json_pretty(&template_path, &document.template_analysis)?;

        written.push(blocks_path);
        written.push(template_path);
    }

    Ok(written)
}
