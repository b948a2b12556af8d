//! Dynamic Sections - terminal demo of a sectioned list
//!
//! Each section decides its own rows; some of them follow a shared counter
//! that the reload key bumps. Only those sections are reloaded.

mod config;
mod core;
mod data;
mod frontend;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use crate::config::Config;
use crate::core::input_router::{builtin_action, canonical_binding};
use crate::core::{route_input, AppAction, Controller};
use crate::data::{RecordingView, Section};
use crate::frontend::{Frontend, TuiFrontend};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(ClapParser)]
#[command(name = "dynamic-sections")]
#[command(about = "Sectioned list whose sections react to a shared counter", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.dynamic-sections)
    /// Can also be set via DYNAMIC_SECTIONS_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the list, trigger reloads and print it again after each one
    Dump {
        /// Number of reloads to trigger
        #[arg(short, long, default_value_t = 3)]
        reloads: usize,
    },
    /// Validate a config file
    ValidateConfig {
        /// Config file to validate (defaults to --config or the data directory)
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set before logging so the log file lands in the custom directory
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }

    init_logging()?;
    if let Some(data_dir) = &cli.data_dir {
        tracing::info!("Using custom data directory: {:?}", data_dir);
    }

    match cli.command {
        Some(Commands::ValidateConfig { config }) => {
            let path = config.or(cli.config);
            let ok = validate_config(path.as_deref());
            if !ok {
                std::process::exit(1);
            }
            Ok(())
        }
        Some(Commands::Dump { reloads }) => {
            let config = load_config(cli.config.as_deref())?;
            run_dump(&config, reloads, &mut std::io::stdout().lock())
        }
        None => {
            let config = load_config(cli.config.as_deref())?;
            run_tui(config)
        }
    }
}

/// Initialize logging to file (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
/// TUI apps can't log to stdout, so we write to a file
fn init_logging() -> Result<()> {
    let log_path = Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    }
}

fn run_tui(config: Config) -> Result<()> {
    let mut controller = Controller::from_config(&config);
    let mut frontend = TuiFrontend::new(&config.ui)?;

    let (width, height) = frontend.size();
    tracing::info!(
        "Starting TUI ({}x{}) with {} sections",
        width,
        height,
        controller.number_of_sections()
    );

    let result = event_loop(&mut controller, &mut frontend, &config);
    frontend.cleanup()?;

    tracing::info!("Exiting at counter {}", controller.counter().value());
    result
}

fn event_loop(
    controller: &mut Controller,
    frontend: &mut TuiFrontend,
    config: &Config,
) -> Result<()> {
    loop {
        // Render every frame so reload highlights fade out on their own
        frontend.render(controller)?;

        for event in frontend.poll_events()? {
            let Some(action) = route_input(&event, &config.keybinds) else {
                continue;
            };
            match action {
                AppAction::Reload => {
                    controller.trigger_reload(frontend.list_view());
                }
                AppAction::Quit => return Ok(()),
                AppAction::ScrollUp => frontend.list_mut().scroll_up(1),
                AppAction::ScrollDown => frontend.list_mut().scroll_down(1),
                AppAction::PageUp => {
                    let list = frontend.list_mut();
                    list.scroll_up(list.page_size());
                }
                AppAction::PageDown => {
                    let list = frontend.list_mut();
                    list.scroll_down(list.page_size());
                }
                AppAction::Redraw => {}
            }
        }
    }
}

fn run_dump(config: &Config, reloads: usize, out: &mut impl Write) -> Result<()> {
    let mut controller = Controller::from_config(config);
    let mut view = RecordingView::new();

    write_table(&controller, out)?;
    for _ in 0..reloads {
        view.clear();
        let plan = controller.trigger_reload(&mut view);

        writeln!(out)?;
        writeln!(out, "reload -> counter {}", controller.counter().value())?;
        if plan.is_empty() {
            writeln!(out, "  empty batch ({} batch call)", view.batch_count())?;
        }
        for reload in &plan.reloads {
            writeln!(
                out,
                "  reloaded section {} ({} -> {} rows)",
                reload.index, reload.previous_rows, reload.rows
            )?;
        }
        write_table(&controller, out)?;
    }
    Ok(())
}

fn write_table(controller: &Controller, out: &mut impl Write) -> Result<()> {
    for index in 0..controller.number_of_sections() {
        let section = controller.registry().section(index)?;
        writeln!(
            out,
            "{} [{}]",
            controller.header_title(index),
            section.kind().display_name()
        )?;
        if let Section::RandomNumber(random) = section {
            tracing::trace!("Section {} random draw (not displayed): {}", index, random.number());
        }

        let rows = controller.number_of_rows(index)?;
        if rows == 0 {
            writeln!(out, "  (no rows)")?;
        }
        for row in 0..rows {
            let cell = controller.content(index, row)?;
            writeln!(out, "  {} | {}", cell.title, cell.detail)?;
        }
    }
    Ok(())
}

/// Problems found in a loaded config
#[derive(Debug, Default)]
struct ConfigReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ConfigReport {
    fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

fn check_config(config: &Config) -> ConfigReport {
    let mut report = ConfigReport::default();

    if config.sections.is_empty() {
        report.errors.push("No sections defined".to_string());
    } else if !config
        .sections
        .iter()
        .any(|kind| Section::from(*kind).uses_counter())
    {
        report
            .warnings
            .push("No section uses the counter, reload will do nothing".to_string());
    }

    if config.ui.row_height == 0 {
        report
            .warnings
            .push("ui.row_height is 0, using 1".to_string());
    }

    let bindings = [
        ("reload", &config.keybinds.reload, AppAction::Reload),
        ("quit", &config.keybinds.quit, AppAction::Quit),
    ];
    for (name, binding, action) in &bindings {
        let key = canonical_binding(binding);
        if key.is_empty() {
            report
                .errors
                .push(format!("keybinds.{} '{}' is not a valid key", name, binding));
            continue;
        }
        if let Some(builtin) = builtin_action(&key) {
            if builtin != *action {
                report.errors.push(format!(
                    "keybinds.{} '{}' shadows the built-in {:?} key",
                    name, binding, builtin
                ));
            }
        }
    }

    let reload = canonical_binding(&config.keybinds.reload);
    if !reload.is_empty() && reload == canonical_binding(&config.keybinds.quit) {
        report
            .errors
            .push(format!("reload and quit share the key '{}'", reload));
    }

    report
}

/// Load and check a config, printing a report. Returns false on errors.
fn validate_config(path: Option<&Path>) -> bool {
    match path {
        Some(path) => println!("Validating config file: {:?}", path),
        None => println!("Validating default config"),
    }

    let config = match load_config(path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("✗ Failed to load config: {:#}", e);
            return false;
        }
    };
    println!("✓ Config loaded successfully");
    println!("  {} sections defined", config.sections.len());

    let report = check_config(&config);
    for error in &report.errors {
        eprintln!("✗ Error: {}", error);
    }
    for warning in &report.warnings {
        println!("⚠ Warning: {}", warning);
    }

    if report.errors.is_empty() && report.warnings.is_empty() {
        println!("✓ Config is valid with no issues");
    } else {
        if !report.errors.is_empty() {
            eprintln!("\n✗ Found {} error(s)", report.errors.len());
        }
        if !report.warnings.is_empty() {
            println!("⚠ Found {} warning(s)", report.warnings.len());
        }
    }

    report.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::SectionKind;

    fn config_with(sections: &[SectionKind]) -> Config {
        Config {
            sections: sections.to_vec(),
            ..Config::default()
        }
    }

    fn dump(config: &Config, reloads: usize) -> String {
        let mut out = Vec::new();
        run_dump(config, reloads, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_default_config_is_clean() {
        let report = check_config(&Config::default());
        assert!(report.is_ok());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_empty_sections_is_error() {
        let report = check_config(&config_with(&[]));
        assert!(!report.is_ok());
        assert!(report.errors[0].contains("No sections"));
    }

    #[test]
    fn test_static_only_is_warning() {
        let report = check_config(&config_with(&[SectionKind::Static]));
        assert!(report.is_ok());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].contains("counter"));
    }

    #[test]
    fn test_reload_equal_to_quit_is_error() {
        let mut config = Config::default();
        config.keybinds.reload = "q".to_string();
        let report = check_config(&config);
        assert!(!report.is_ok());
        assert!(report.errors.iter().any(|e| e.contains("share the key")));

        // Same key spelled differently
        config.keybinds.reload = "Q".to_string();
        config.keybinds.quit = "shift+q".to_string();
        assert!(!check_config(&config).is_ok());
    }

    #[test]
    fn test_reload_on_builtin_key_is_error() {
        for key in ["esc", "ctrl+c", "Down"] {
            let mut config = Config::default();
            config.keybinds.reload = key.to_string();
            let report = check_config(&config);
            assert!(!report.is_ok(), "reload = {}", key);
            assert!(report.errors.iter().any(|e| e.contains("shadows")));
        }
    }

    #[test]
    fn test_quit_on_builtin_quit_key_is_allowed() {
        let mut config = Config::default();
        config.keybinds.quit = "esc".to_string();
        assert!(check_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_binding_is_error() {
        let mut config = Config::default();
        config.keybinds.reload = "hyper+r".to_string();
        let report = check_config(&config);
        assert!(report.errors.iter().any(|e| e.contains("not a valid key")));
    }

    #[test]
    fn test_dump_default_layout() {
        let output = dump(&Config::default(), 1);

        assert!(output.starts_with("Section 0 [random number]\n"));
        assert!(output.contains("Section 2 [increasing]\n  (no rows)\n"));
        assert!(output.contains("reload -> counter 1"));
        assert!(output.contains("  reloaded section 0 (1 -> 1 rows)"));
        assert!(output.contains("  reloaded section 2 (0 -> 1 rows)"));
        assert!(!output.contains("reloaded section 1"));
        assert!(output.contains("  This is a cell | The number is 1"));
        assert!(output.contains("  This is a cell | This is cell 0"));
    }

    #[test]
    fn test_dump_static_only_reports_empty_batch() {
        let output = dump(&config_with(&[SectionKind::Static]), 2);

        assert_eq!(output.matches("empty batch (1 batch call)").count(), 2);
        assert!(!output.contains("reloaded section"));
        assert_eq!(
            output.matches("  This is a cell | This is a static section").count(),
            3
        );
    }
}
