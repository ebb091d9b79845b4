use clap::{Parser, Subcommand};

use combo_cli::commands::{replay_ops, settings_ops};

#[derive(Parser)]
#[command(name = "combotool", about = "Autocomplete widget diagnostics")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect widget settings files
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Replay a JSON-lines event script and print the widget state per event
    Replay {
        /// Options file (one option per line)
        options_file: String,
        /// Event script (one JSON event per line)
        script_file: String,
        /// Settings TOML file (optional, defaults otherwise)
        #[arg(long)]
        settings: Option<String>,
        /// Output one JSON snapshot per line instead of text
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Export default settings as TOML
    Export,
    /// Validate a custom settings TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();

    combo_engine::init_tracing(std::path::Path::new("."));

    match cli.command {
        Command::Settings { action } => match action {
            SettingsAction::Export => settings_ops::settings_export(),
            SettingsAction::Validate { file } => settings_ops::settings_validate(&file),
        },
        Command::Replay {
            options_file,
            script_file,
            settings,
            json,
        } => replay_ops::replay_cmd(&options_file, &script_file, settings.as_deref(), json),
    }
}
