//! Extract command handler

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use seapay::cli::ExtractArgs;
use seapay::config::OutputFormat;
use seapay::{Config, Document, DocumentReport, Engine, ScanContext};

use super::ships::load_reference;

/// Process every file in parallel and print the reports in argument order.
///
/// A file that cannot be read is reported on stderr and does not stop the
/// others; the command still fails at the end.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: &ExtractArgs) -> Result<()> {
    let config = Config::load()?;
    let mut engine_config = config.engine.clone();
    if let Some(gap) = args.merge_gap {
        engine_config.merge_gap_days = gap;
    }

    let reference = load_reference(args.ships.as_deref(), &config)?;
    let engine = Engine::new(engine_config, reference).context("Invalid engine configuration")?;
    let format = args.format.unwrap_or(config.output.format);

    let outcomes: Vec<(&PathBuf, Result<DocumentReport>)> = args
        .files
        .par_iter()
        .map(|path| (path, process_file(&engine, path, args)))
        .collect();

    let mut reports = Vec::with_capacity(outcomes.len());
    let mut failed = 0;
    for (path, outcome) in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                failed += 1;
                eprintln!("{}: {:#}", path.display(), e);
            }
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            let texts: Vec<String> = reports.iter().map(DocumentReport::render_text).collect();
            print!("{}", texts.join("\n"));
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} files could not be processed", failed, args.files.len());
    }
    Ok(())
}

fn process_file(engine: &Engine, path: &Path, args: &ExtractArgs) -> Result<DocumentReport> {
    let document = Document::load(path)?;
    let ctx = ScanContext::new(args.sailor.as_deref(), args.year.or(document.year));

    let span = tracing::info_span!("document", source = %document.source);
    let _guard = span.enter();
    let result = engine.process(&document.lines, ctx);

    Ok(DocumentReport::new(document.source, &result))
}
