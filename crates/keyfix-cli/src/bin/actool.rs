use clap::{Parser, Subcommand};

use keyfix_cli::commands::{config_ops, dict_ops, sim_ops};
use keyfix_cli::trace_init::init_tracing;

#[derive(Parser)]
#[command(name = "actool", about = "Autocorrect dictionary tool")]
struct Cli {
    /// Settings TOML to use instead of the built-in defaults
    #[arg(long, global = true)]
    settings: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a text dictionary into a .kfac file
    Compile {
        /// Minimum typo length (defaults to settings)
        #[arg(long)]
        min_len: Option<usize>,
        /// Maximum typo length (defaults to settings)
        #[arg(long)]
        max_len: Option<usize>,
        /// Input text file (`typo -> correction` per line)
        input: String,
        /// Output .kfac file
        output: String,
    },
    /// Generate a firmware C header from a text dictionary or .kfac file
    Header {
        /// Minimum typo length (defaults to settings)
        #[arg(long)]
        min_len: Option<usize>,
        /// Maximum typo length (defaults to settings)
        #[arg(long)]
        max_len: Option<usize>,
        /// Text dictionary or .kfac file
        input: String,
        /// Output header (stdout if omitted)
        output: Option<String>,
    },
    /// Show dictionary info and entries (format auto-detected by magic bytes)
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Text dictionary or .kfac file
        file: String,
    },
    /// Look up a typo (`:word`, `word:` for boundary-anchored entries)
    Lookup {
        /// Text dictionary or .kfac file
        file: String,
        /// Typo to look up
        typo: String,
    },
    /// Type text through an autocorrect session and print the result
    Simulate {
        /// Print as JSON
        #[arg(long)]
        json: bool,
        /// Text dictionary or .kfac file
        file: String,
        /// Text to type
        text: String,
    },
    /// Print default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// Settings TOML file
        file: String,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Some(file) = &cli.settings {
        config_ops::settings_load(file);
    }

    match cli.command {
        Command::Compile {
            min_len,
            max_len,
            input,
            output,
        } => dict_ops::compile(&input, &output, min_len, max_len),
        Command::Header {
            min_len,
            max_len,
            input,
            output,
        } => dict_ops::header(&input, output.as_deref(), min_len, max_len),
        Command::Info { json, file } => dict_ops::info(&file, json),
        Command::Lookup { file, typo } => dict_ops::lookup(&file, &typo),
        Command::Simulate { json, file, text } => sim_ops::simulate(&file, &text, json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
