use clap::Parser;
use serde_json::Value;
use std::process;
use tlp_highlight::cli::format::{self, OpenReport};
use tlp_highlight::cli::{Cli, Commands, OutputFormat, SettingsAction};
use tlp_highlight::dispatch::{Highlighter, Outcome};
use tlp_highlight::host::FileOpenListener;
use tlp_highlight::note::Vault;
use tlp_highlight::storage::{FileStorage, SettingsStorage, SettingsStore, StorageError};
use tlp_highlight::{classification, Settings, Workbench};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "tlp_highlight=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("\x1b[31merror\x1b[0m: {}", message);
    process::exit(2);
}

fn load_store(cli: &Cli) -> SettingsStore<FileStorage> {
    SettingsStore::load(FileStorage::new(&cli.settings_file)).unwrap_or_else(|e| fail(e))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Open {
            file,
            vault,
            format: output_format,
        } => {
            let store = load_store(&cli);
            let mut vault = Vault::new(vault);
            let note = vault.open_note(file).unwrap_or_else(|e| fail(e));

            let mut bench = Workbench::new();
            let outcome = {
                let mut highlighter = Highlighter::new(store.settings(), &vault, &mut bench);
                highlighter.on_file_open(Some(&note));
                highlighter.last_outcome().cloned()
            };
            let Some(outcome) = outcome else {
                fail("file-open notification was not handled");
            };

            let classes = match &outcome {
                Outcome::Applied {
                    surface,
                    surface_found: true,
                    ..
                } => Some(bench.classes(*surface)),
                _ => None,
            };
            let report = OpenReport {
                note: &note,
                outcome: &outcome,
                classes,
            };

            match output_format {
                OutputFormat::Pretty => format::print_pretty(&report),
                OutputFormat::Json => format::print_json(&report),
                OutputFormat::Compact => format::print_compact(&report),
            }
        }

        Commands::Resolve { value } => {
            let store = load_store(&cli);
            let raw = Value::String(value.clone());
            match classification::resolve(Some(&raw), &store.settings().tlp_values) {
                Some(level) => {
                    println!(
                        "{} (TLP:{}, class {})",
                        level,
                        level.pretty_name(),
                        level.class_name()
                    );
                }
                None => {
                    eprintln!("\x1b[90mno classification matches '{}'\x1b[0m", value);
                    process::exit(1);
                }
            }
        }

        Commands::Settings(args) => run_settings(&cli, &args.action),
    }
}

fn run_settings(cli: &Cli, action: &SettingsAction) {
    if let SettingsAction::Init { force } = action {
        let path = &cli.settings_file;
        if path.exists() && !force {
            fail(format_args!(
                "'{}' already exists (use --force to overwrite)",
                path.display()
            ));
        }
        let mut storage = FileStorage::new(path);
        storage
            .save(&Settings::default())
            .unwrap_or_else(|e| fail(e));
        eprintln!("\x1b[32m✓\x1b[0m Created {}", path.display());
        return;
    }

    let mut store = load_store(cli);
    let result: Result<(), StorageError> = match action {
        SettingsAction::Show | SettingsAction::Init { .. } => Ok(()),
        SettingsAction::Surface { surface } => store.set_surface(*surface),
        SettingsAction::ToggleFrontmatter => store.toggle_frontmatter_highlight().map(|_| ()),
        SettingsAction::TogglePath => store.toggle_path_highlight().map(|_| ()),
        SettingsAction::Attribute { name } => store.set_frontmatter_attribute(name),
        SettingsAction::Value { level, text } => store.set_classification_value(*level, text),
        SettingsAction::Path { substring } => store.set_path_to_highlight(substring),
    };
    if let Err(e) = result {
        fail(e);
    }

    if !matches!(action, SettingsAction::Show) {
        eprintln!(
            "\x1b[32m✓\x1b[0m Saved {}",
            store.storage().path().display()
        );
    }
    format::print_settings(store.settings());
}
