use std::io::IsTerminal;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Editor, Input};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sprint_core::models::{Capture, EntrySource};
use sprint_core::DocumentAdapter;
use sprint_hub::google::GoogleAdapter;
use sprint_hub::setup::TerminalPrompter;
use sprint_hub::{commands, dashboard, input, Settings};

#[derive(Parser)]
#[command(name = "sprint")]
#[command(about = "Capture, label and push assessment findings into report documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a sprint and make it active
    Init {
        /// Sprint name, e.g. sprint-11
        #[arg(long)]
        name: String,

        /// Google Sheets or Docs URL to register right away
        #[arg(long)]
        url: Option<String>,
    },
    /// Register another destination under the active sprint
    Add {
        #[arg(long)]
        url: String,

        /// Chapter the destination belongs to (default: after the latest one)
        #[arg(long)]
        chapter: Option<u32>,
    },
    /// Capture piped input (or the clipboard) into the buffer
    Capture {
        #[arg(long)]
        from_clipboard: bool,

        /// Use this label instead of the suggestion
        #[arg(long)]
        label: Option<String>,

        /// Command that produced the output, used for the suggestion
        #[arg(long)]
        command: Option<String>,

        /// Accept the suggested label without asking
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove an entry from the buffer
    Remove { label: String },
    /// Rename a buffer entry
    Relabel { old_label: String, new_label: String },
    /// Edit a buffer entry in $EDITOR
    Edit { label: String },
    /// List buffer entries
    List,
    /// Push every buffer entry to its mapped destination
    Push,
    /// Route a label to a spreadsheet cell
    MapCell {
        label: String,
        /// Spreadsheet id
        #[arg(long)]
        doc: String,
        #[arg(long)]
        sheet: String,
        #[arg(long)]
        cell: String,
    },
    /// Route a label to the end of a document heading
    MapHeading {
        label: String,
        /// Document id
        #[arg(long)]
        doc: String,
        #[arg(long)]
        heading: String,
    },
    /// Open the interactive dashboard
    Hub,
}

/// Initialize tracing on stderr, leaving stdout for command output.
///
/// The dashboard owns the terminal, so it logs nothing unless `RUST_LOG`
/// asks for it.
fn init_tracing(quiet_by_default: bool) {
    let filter = match std::env::var("RUST_LOG") {
        Ok(directives) => tracing_subscriber::EnvFilter::new(directives),
        Err(_) if quiet_by_default => tracing_subscriber::EnvFilter::new("off"),
        Err(_) => tracing_subscriber::EnvFilter::new("sprint_hub=info,sprint_core=info"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(matches!(cli.command, Commands::Hub));

    let settings = Settings::from_env()?;
    let workspace = settings.workspace();
    let connect = || {
        GoogleAdapter::from_settings(&settings).map(|a| Box::new(a) as Box<dyn DocumentAdapter>)
    };

    match cli.command {
        Commands::Init { name, url } => {
            let prompter = TerminalPrompter::new();
            let config = commands::init(&workspace, &name, url.as_deref(), connect, &prompter)?;
            println!("Initialized {}", config.name);
            println!("  {} destination(s), {} capture(s)", config.docs.len(), config.captures.len());
            println!("Active sprint: {}", config.name);
        }
        Commands::Add { url, chapter } => {
            let prompter = TerminalPrompter::new();
            let (active, doc) = commands::add_destination(&workspace, &url, chapter, connect, &prompter)?;
            println!(
                "Added {} '{}' (chapter {}) to {}",
                doc.kind.as_str(),
                doc.label,
                doc.added_chapter,
                active
            );
        }
        Commands::Capture {
            from_clipboard,
            label,
            command,
            yes,
        } => {
            let (content, source) = if from_clipboard {
                (input::read_clipboard()?, EntrySource::Clipboard)
            } else {
                match input::read_stdin()? {
                    Some(content) => (content, EntrySource::Pipe),
                    None => anyhow::bail!("No input. Pipe something or use --from-clipboard."),
                }
            };

            let label = match label {
                Some(label) => label,
                None => {
                    let suggested = commands::suggest_label(&workspace, &content, command.as_deref());
                    if yes || !std::io::stdin().is_terminal() {
                        suggested
                    } else {
                        Input::<String>::with_theme(&ColorfulTheme::default())
                            .with_prompt("Label")
                            .default(suggested)
                            .interact_text()?
                    }
                }
            };

            let captured = commands::capture(&workspace, &content, source, &label)?;
            let verb = if captured.replaced { "Replaced" } else { "Captured" };
            println!("{} → {} ({} lines)", verb, captured.label, captured.lines);
        }
        Commands::Remove { label } => {
            commands::remove(&workspace, &label)?;
            println!("Removed '{}'", label);
        }
        Commands::Relabel {
            old_label,
            new_label,
        } => {
            commands::relabel(&workspace, &old_label, &new_label)?;
            println!("Relabeled '{}' → '{}'", old_label, new_label);
        }
        Commands::Edit { label } => {
            let content = commands::entry_content(&workspace, &label)?;
            match Editor::new().edit(&content)? {
                Some(edited) if edited != content => {
                    commands::update_content(&workspace, &label, &edited)?;
                    println!("Updated '{}'", label);
                }
                _ => println!("Unchanged."),
            }
        }
        Commands::List => {
            let (active, buffer) = commands::list(&workspace)?;
            if buffer.is_empty() {
                println!("Buffer for {} is empty.", active);
            } else {
                println!("Buffer for {} ({} entries):", active, buffer.len());
                for entry in buffer.entries() {
                    println!("  {:<20} {}", entry.label, entry.preview(60));
                }
            }
        }
        Commands::Push => {
            let (active, buffer) = commands::list(&workspace)?;
            if buffer.is_empty() {
                println!("Buffer for {} is empty. Nothing to push.", active);
                return Ok(());
            }
            let adapter = connect()?;
            let report = commands::push(&workspace, adapter.as_ref())?;
            for result in &report.results {
                println!("  {:<20} {}", result.label, result.outcome);
            }
            println!(
                "Done: {} pushed, {} errors.",
                report.ok_count(),
                report.failed_count()
            );
            if !report.all_ok() {
                std::process::exit(1);
            }
        }
        Commands::MapCell {
            label,
            doc,
            sheet,
            cell,
        } => {
            let capture = Capture::spreadsheet(doc, sheet, cell)?;
            let target = capture.target();
            let active = commands::map_capture(&workspace, &label, capture)?;
            println!("Mapped '{}' → {} in {}", label, target, active);
        }
        Commands::MapHeading {
            label,
            doc,
            heading,
        } => {
            let capture = Capture::document(doc, heading)?;
            let target = capture.target();
            let active = commands::map_capture(&workspace, &label, capture)?;
            println!("Mapped '{}' → {} in {}", label, target, active);
        }
        Commands::Hub => dashboard::run(&settings)?,
    }

    Ok(())
}
