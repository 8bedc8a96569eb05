use clap::{Parser, ValueEnum, builder::styling};
use eyre::Result;
use n8n_workflow_sync::cli;
use owo_colors::OwoColorize;

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// n8n Workflow Sync: re-upload exported workflow files to their live server counterparts
#[derive(Parser)]
#[command(name = "n8n-sync", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source N8N_URL and N8N_APIKEY from
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Project directory containing a workflows/ export folder
    project: String,

    /// What to do with the mapped workflows
    #[arg(value_enum, default_value = "list")]
    mode: Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Mode {
    /// Show the original→current ID mappings only
    List,
    /// Update all mapped workflows
    All,
    /// Select workflows to update one at a time
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    // A missing dotenv file is fine when the variables come from the shell
    dotenvy::from_filename(&cli.env).ok();

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    log::info!("Workflow sync for project: {}", cli.project.bright_black());

    match cli.mode {
        Mode::List => {
            let count = cli::list_mappings(&cli.project).await?;
            log::info!("{} workflow(s) mapped", count.green());
            log::info!("Usage options:");
            log::info!(
                "  n8n-sync {} all          # Update all workflows",
                cli.project
            );
            log::info!(
                "  n8n-sync {} interactive  # Interactive selection",
                cli.project
            );
            log::info!(
                "  n8n-sync {} list         # Show ID mappings only",
                cli.project
            );
        }
        Mode::All => {
            let summary = cli::update_all(&cli.project).await?;
            log::info!(
                "✓ Updated {}, ✗ failed {}",
                summary.updated.green(),
                summary.failed.red()
            );
        }
        Mode::Interactive => {
            let summary = cli::update_interactive(&cli.project).await?;
            log::info!(
                "✓ Updated {}, ✗ failed {}, skipped {}",
                summary.updated.green(),
                summary.failed.red(),
                summary.skipped
            );
        }
    }

    Ok(())
}
