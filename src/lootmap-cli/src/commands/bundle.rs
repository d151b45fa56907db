//! Bundle command - wraps a report for offline use by the viewer

use anyhow::{Context, Result};
use lootmap::{render_data_js, ConsolidatedReport};
use std::path::Path;

pub fn handle(report_path: &Path, output: &Path) -> Result<()> {
    let report = ConsolidatedReport::load(report_path)
        .with_context(|| format!("Failed to load report {}", report_path.display()))?;

    let js = render_data_js(&report)?;
    std::fs::write(output, js).with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "Bundled {} prefabs ({} chests) into {}",
        report.prefabs.len(),
        report.total_chests(),
        output.display()
    );
    Ok(())
}
