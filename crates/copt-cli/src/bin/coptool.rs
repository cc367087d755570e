use std::path::PathBuf;

use clap::{Parser, Subcommand};

use copt_cli::commands::corpus_ops::{CaseFilter, CheckOptions};
use copt_cli::commands::translit_ops::TranslitOptions;
use copt_cli::commands::{config_ops, corpus_ops, load_settings, translit_ops};
use copt_cli::trace_init::init_tracing;
use copt_core::Method;

#[derive(Parser)]
#[command(name = "coptool", about = "Coptic to Latin transliteration tool")]
struct Cli {
    /// Settings TOML replacing the embedded defaults
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Log debug events
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Write JSON-lines trace logs to this directory instead of stderr
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate text (argument, --file, or stdin)
    Translit {
        /// Coptic text
        text: Option<String>,
        /// Read input from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<String>,
        /// Write output to a file, or to the default file name inside a directory
        #[arg(short, long)]
        output: Option<String>,
        /// rule-based or hybrid
        #[arg(short, long, default_value = "rule-based")]
        method: Method,
        /// Print the full result as JSON
        #[arg(long)]
        json: bool,
        /// Character map TOML replacing the embedded one
        #[arg(long)]
        charmap: Option<String>,
        /// Rules TOML replacing the embedded one
        #[arg(long)]
        rules: Option<String>,
    },
    /// Run a regression corpus and report mismatches
    Check {
        /// Corpus TOML file
        corpus_file: String,
        /// Filter by tag (only run cases with this tag)
        #[arg(long)]
        tag: Option<String>,
        /// Filter by category (only run cases in this category)
        #[arg(long)]
        category: Option<String>,
        /// Show passing cases too
        #[arg(long = "show-pass")]
        show_pass: bool,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Character map TOML replacing the embedded one
        #[arg(long)]
        charmap: Option<String>,
        /// Rules TOML replacing the embedded one
        #[arg(long)]
        rules: Option<String>,
    },
    /// Print the embedded character map TOML
    CharmapExport,
    /// Validate a character map TOML file
    CharmapValidate {
        /// TOML file to validate
        file: String,
    },
    /// Print the embedded rules TOML
    RulesExport,
    /// Validate a rules TOML file
    RulesValidate {
        /// TOML file to validate
        file: String,
    },
    /// Print the embedded settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// TOML file to validate
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.log_dir.as_deref());

    if let Some(ref path) = cli.settings {
        if let Err(e) = load_settings(path) {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }

    match cli.command {
        Command::Translit {
            text,
            file,
            output,
            method,
            json,
            charmap,
            rules,
        } => translit_ops::translit_cmd(&TranslitOptions {
            text: text.as_deref(),
            file: file.as_deref(),
            output: output.as_deref(),
            method,
            json,
            charmap: charmap.as_deref(),
            rules: rules.as_deref(),
        }),
        Command::Check {
            corpus_file,
            tag,
            category,
            show_pass,
            json,
            charmap,
            rules,
        } => corpus_ops::check_cmd(
            &corpus_file,
            &CheckOptions {
                filter: CaseFilter {
                    tag: tag.as_deref(),
                    category: category.as_deref(),
                },
                verbose: show_pass,
                json,
                charmap: charmap.as_deref(),
                rules: rules.as_deref(),
            },
        ),
        Command::CharmapExport => config_ops::charmap_export(),
        Command::CharmapValidate { file } => config_ops::charmap_validate(&file),
        Command::RulesExport => config_ops::rules_export(),
        Command::RulesValidate { file } => config_ops::rules_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
