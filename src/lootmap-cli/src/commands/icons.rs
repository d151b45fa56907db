//! Icons command - resolves item ids to icon files and writes the lookup table

use anyhow::{Context, Result};
use lootmap::{
    ConsolidatedReport, IconCatalog, IconMappings, ResolveOutcome, Resolver, ResolverSettings,
    Rule,
};
use std::path::Path;

use crate::cli::OutputFormat;

/// Inputs for [`handle`]
pub struct IconsArgs<'a> {
    pub report: &'a Path,
    pub icon_dir: &'a Path,
    /// Icon folder as written into the artifact
    pub icon_prefix: &'a str,
    pub extension: &'a str,
    pub output: &'a Path,
    pub format: OutputFormat,
    pub settings: ResolverSettings,
    pub show_rules: bool,
}

/// Resolve every item id in the report and write the lookup artifact
pub fn handle(args: IconsArgs<'_>) -> Result<()> {
    let report = ConsolidatedReport::load(args.report)
        .with_context(|| format!("Failed to load report {}", args.report.display()))?;
    let catalog = IconCatalog::scan(args.icon_dir, args.extension)?;

    let ids = report.item_ids();
    println!(
        "Resolving {} items against {} icons in {}",
        ids.len(),
        catalog.len(),
        args.icon_dir.display()
    );

    tracing::debug!(
        "cutoff {}, suffix {:?}, {} aliases",
        args.settings.cutoff,
        args.settings.instance_suffix,
        args.settings.aliases.len()
    );
    let resolver = Resolver::new(catalog, args.settings)?;
    let outcome = resolver.resolve_all(&ids);

    let mappings = IconMappings::new(outcome.mappings.clone())
        .with_paths(args.icon_prefix, args.extension);
    let content = match args.format {
        OutputFormat::Js => mappings.render_js(),
        OutputFormat::Json => mappings.to_json_pretty()?,
    };

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(args.output, content)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    print_summary(&outcome, args.show_rules);
    println!("Wrote {}", args.output.display());

    Ok(())
}

fn print_summary(outcome: &ResolveOutcome, show_rules: bool) {
    println!("Generated mappings for {} items.", outcome.mappings.len());
    println!(
        "  {} exact, {} alias, {} suffix, {} fuzzy ({} need no mapping)",
        outcome.count(Rule::Exact),
        outcome.count(Rule::Alias),
        outcome.count(Rule::Suffix),
        outcome.count(Rule::Fuzzy),
        outcome.implicit
    );

    if show_rules {
        println!();
        println!("{:<40} {:<40} {}", "Item", "Icon", "Rule");
        println!("{}", "-".repeat(88));
        for (id, icon) in &outcome.mappings {
            let rule = outcome.rules.get(id).map(ToString::to_string).unwrap_or_default();
            println!("{:<40} {:<40} {}", id, icon, rule);
        }
        println!();
    }

    println!("Missing items: {}", outcome.missing.len());
    for id in &outcome.missing {
        println!("Missing: {}", id);
    }
}
