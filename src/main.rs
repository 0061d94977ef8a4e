//! launchman - Terminal Launch Item Manager
//!
//! Browse, search, preview and delete macOS launch-agent and launch-daemon definitions.

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use launchman::config::{Settings, ThemeChoice};
use launchman::input::InputService;
use launchman::render::ui::{ColorTheme, TerminalUI};
use launchman::Application;
use std::fs::File;
use std::path::PathBuf;

fn cli() -> Command {
    let command = Command::new("launchman")
        .version(launchman::VERSION)
        .about("A terminal manager for macOS launch agents and daemons")
        .long_about(
            "launchman lists the .plist files in the user and system LaunchAgents and \
             LaunchDaemons folders, searches them by name, previews their contents converted \
             with plutil, and deletes selected files after confirmation.",
        )
        .arg(
            Arg::new("dir")
                .long("dir")
                .value_name("PATH")
                .action(ArgAction::Append)
                .value_parser(clap::value_parser!(PathBuf))
                .help("Folder to manage instead of the standard launch folders (repeatable)"),
        )
        .arg(
            Arg::new("converter")
                .long("converter")
                .value_name("PROGRAM")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Property-list converter to run (default: plutil)"),
        )
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("THEME")
                .value_parser(clap::builder::PossibleValuesParser::new([
                    "default",
                    "monochrome",
                    "high-contrast",
                ]))
                .help("Color theme"),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("PATH")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Write diagnostic logs to this file"),
        );

    #[cfg(feature = "config")]
    let command = command.arg(
        Arg::new("config")
            .long("config")
            .value_name("FILE")
            .value_parser(clap::value_parser!(PathBuf))
            .help("Read settings from a TOML file"),
    );

    command
}

/// Logs go to a file when one is given; the terminal belongs to the UI.
fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let mut builder = match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            let mut builder =
                env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            builder
        }
        None => env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")),
    };
    builder.init();
    Ok(())
}

fn settings_from(matches: &ArgMatches) -> Result<Settings> {
    #[cfg(feature = "config")]
    let settings = match matches.get_one::<PathBuf>("config") {
        Some(path) => Settings::from_toml_file(path)?,
        None => Settings::default(),
    };
    #[cfg(not(feature = "config"))]
    let settings = Settings::default();

    let mut settings = settings.with_directories(
        matches
            .get_many::<PathBuf>("dir")
            .map(|dirs| dirs.cloned().collect())
            .unwrap_or_default(),
    );
    if let Some(converter) = matches.get_one::<PathBuf>("converter") {
        settings = settings.with_converter(converter.clone());
    }
    if let Some(theme) = matches.get_one::<String>("theme") {
        settings = settings.with_theme(theme.parse::<ThemeChoice>()?);
    }

    settings.validate()?;
    Ok(settings)
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_logging(matches.get_one::<PathBuf>("log-file"))?;

    let settings = settings_from(&matches)?;
    log::info!(
        "starting launchman {} with {} folder(s)",
        launchman::VERSION,
        settings.directories.len()
    );

    let ui_renderer = Box::new(TerminalUI::with_theme(ColorTheme::from_choice(
        settings.theme,
    ))?);
    let mut app = Application::from_settings(&settings, ui_renderer)?;
    let mut input = InputService::new();

    app.run(&mut input).await?;

    Ok(())
}
