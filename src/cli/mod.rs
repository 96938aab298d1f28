pub mod format;

use crate::classification::Classification;
use crate::config::Surface;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "tlp-highlight",
    version,
    about = "Highlight notes by their Traffic Light Protocol classification"
)]
pub struct Cli {
    /// Path to the settings file (.json or .toml)
    #[arg(short = 's', long = "settings", global = true, default_value = "data.json")]
    pub settings_file: PathBuf,

    /// Log classification decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open a note and show how it would be highlighted
    Open {
        /// Note to open
        file: PathBuf,

        /// Vault root the note's path is taken relative to
        #[arg(long, default_value = ".")]
        vault: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
        format: OutputFormat,
    },

    /// Show which classification a frontmatter value resolves to
    Resolve {
        /// Frontmatter value, as it would appear in the note
        value: String,
    },

    /// Inspect or change the highlighter settings
    Settings(SettingsArgs),
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the effective settings
    Show,

    /// Write the default settings
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Choose the UI element to highlight
    Surface {
        #[arg(value_parser = parse_surface)]
        surface: Surface,
    },

    /// Turn frontmatter highlighting on or off
    ToggleFrontmatter,

    /// Turn path highlighting on or off
    TogglePath,

    /// Set the frontmatter attribute that holds the classification
    Attribute { name: String },

    /// Set the text that maps to a classification level (empty restores the default)
    Value {
        #[arg(value_parser = parse_classification)]
        level: Classification,
        #[arg(default_value = "")]
        text: String,
    },

    /// Set the path substring that marks notes as red
    Path {
        #[arg(default_value = "")]
        substring: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    Pretty,
    Json,
    Compact,
}

fn parse_surface(s: &str) -> Result<Surface, String> {
    s.parse().map_err(|e: crate::config::UnknownSurface| e.to_string())
}

fn parse_classification(s: &str) -> Result<Classification, String> {
    s.parse()
        .map_err(|e: crate::classification::UnknownClassification| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_defaults() {
        let cli = Cli::try_parse_from(["tlp-highlight", "open", "Private/secret.md"]).unwrap();
        assert_eq!(cli.settings_file, PathBuf::from("data.json"));
        match cli.command {
            Commands::Open { file, vault, format } => {
                assert_eq!(file, PathBuf::from("Private/secret.md"));
                assert_eq!(vault, PathBuf::from("."));
                assert!(matches!(format, OutputFormat::Pretty));
            }
            _ => panic!("expected open"),
        }
    }

    #[test]
    fn settings_value_parses_level() {
        let cli = Cli::try_parse_from([
            "tlp-highlight",
            "settings",
            "value",
            "amber-strict",
            "need-to-know",
            "--settings",
            "tlp.toml",
        ])
        .unwrap();
        assert_eq!(cli.settings_file, PathBuf::from("tlp.toml"));
        match cli.command {
            Commands::Settings(SettingsArgs {
                action: SettingsAction::Value { level, text },
            }) => {
                assert_eq!(level, Classification::AmberStrict);
                assert_eq!(text, "need-to-know");
            }
            _ => panic!("expected settings value"),
        }
    }

    #[test]
    fn unknown_surface_is_rejected() {
        let parse = |surface: &str| {
            Cli::try_parse_from(["tlp-highlight", "settings", "surface", surface])
        };
        assert!(parse("sidebar").is_err());
        assert!(parse("view-header").is_ok());
    }
}
