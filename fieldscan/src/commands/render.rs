// fieldscan/src/commands/render.rs
//! `fieldscan render <REPORT>`: one report, written once.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::io::{self, Write};

use fieldscan_core::{FieldscanError, MarkupMode, RegexEngine, ReportGenerator, ScanConfig};

use crate::cli::RenderCommand;
use crate::store::FileStore;

pub fn run(config: &ScanConfig, args: &RenderCommand) -> Result<()> {
    let mut definition = config
        .report(&args.report)
        .cloned()
        .ok_or_else(|| FieldscanError::UnknownReport(args.report.clone()))?;
    if args.legacy {
        definition.markup = MarkupMode::Legacy;
    }

    let store = FileStore::load(&args.store.store, &args.store.base_url)?;
    let engine = RegexEngine::new(&config.rules_for(&definition))?;
    let html = ReportGenerator::new(&store, &store, &store).render(&definition, &engine)?;

    match &args.output {
        Some(path) => {
            fs::write(path, &html)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report '{}' written to {}", definition.name, path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(html.as_bytes())?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
