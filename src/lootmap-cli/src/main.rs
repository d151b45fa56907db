mod cli;
mod commands;
mod config;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::*;
use config::Config;

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "lootmap=debug,lootmap_cli=debug"
    } else {
        "lootmap=info,lootmap_cli=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Configure { show, init, force } => {
            commands::configure::handle(config_path, show, init, force)?;
        }

        Commands::Extract {
            loot_tables,
            prefabs,
            output,
        } => {
            let config = Config::load(config_path)?;
            commands::extract::handle(
                &config.loot_table_dir(loot_tables),
                &config.prefab_dir(prefabs),
                &config.report_path(output),
            )?;
        }

        Commands::Icons {
            report,
            icons,
            icon_prefix,
            output,
            format,
            cutoff,
            show_rules,
        } => {
            let config = Config::load(config_path)?;
            let mut settings = config.resolver.clone();
            if let Some(cutoff) = cutoff {
                settings.cutoff = cutoff;
            }

            let report = config.report_path(report);
            let icon_dir = config.icon_dir(icons);
            let icon_prefix = config.icon_prefix(icon_prefix);
            let output = output.unwrap_or_else(|| format.default_output());
            commands::icons::handle(commands::icons::IconsArgs {
                report: &report,
                icon_dir: &icon_dir,
                icon_prefix: &icon_prefix,
                extension: config.icon_extension(),
                output: &output,
                format,
                settings,
                show_rules,
            })?;
        }

        Commands::Bundle { report, output } => {
            let config = Config::load(config_path)?;
            commands::bundle::handle(&config.report_path(report), &output)?;
        }

        Commands::Lookup { ids, mappings } => {
            commands::lookup::handle(&ids, &mappings)?;
        }
    }

    Ok(())
}
