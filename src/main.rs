//! Icon Actions
//!
//! Command-line driver: runs one action on an icon described by a JSON file
//! and manages the recent-icons history.

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use icon_actions::actions::{ActionKind, Dispatcher};
use icon_actions::config::{get_config, get_secrets};
use icon_actions::icon::{Color, DownloadOptions, IconRecord, ImageFormat};
use icon_actions::storage::RecentIcons;

const USAGE: &str = "\
Usage:
  icon-actions <action> <icon.json|-> [--format FMT] [--color HEX] [--path DIR] [--size PX]
  icon-actions recent
  icon-actions forget <icon-id>
  icon-actions clear-recent

Actions: view, open, copy-svg, copy-url, download-svg, download";

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}\n\n{}", e, USAGE);
            ExitCode::from(2)
        }
    }
}

fn run(args: &[String]) -> Result<ExitCode, String> {
    let command = args.first().ok_or("Missing command")?;
    let config = get_config();
    let recent = Arc::new(RecentIcons::open(&config.recent.path, config.recent.limit));

    match command.as_str() {
        "recent" => {
            for icon in recent.load() {
                let meta = icon.meta();
                println!("{}\t{}\t{}", meta.id, meta.name, meta.link);
            }
            Ok(ExitCode::SUCCESS)
        }
        "forget" => {
            let id = args.get(1).ok_or("Missing icon id")?;
            let removed = recent.remove(id).map_err(|e| e.to_string())?;
            if !removed {
                log::warn!("Icon {} is not in the recent list", id);
            }
            Ok(ExitCode::SUCCESS)
        }
        "clear-recent" => {
            recent.clear().map_err(|e| e.to_string())?;
            Ok(ExitCode::SUCCESS)
        }
        "-h" | "--help" | "help" => {
            println!("{}", USAGE);
            Ok(ExitCode::SUCCESS)
        }
        action => {
            let kind: ActionKind = action.parse()?;
            let icon = read_icon(args.get(1).ok_or("Missing icon file")?)?;
            let options = parse_options(&args[2..])?;

            let dispatcher = Dispatcher::from_config(config, get_secrets(), recent)
                .map_err(|e| e.to_string())?;

            log::info!("{}: {}", kind.title(&options), icon.meta().name);
            let mut outcome = dispatcher.run(kind, icon, &options);
            outcome.wait_for_history();

            if let Some(path) = &outcome.saved_to {
                println!("{}", path.display());
            }
            Ok(if outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Read an icon record from a JSON file, or stdin for `-`
fn read_icon(source: &str) -> Result<IconRecord, String> {
    let content = if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| format!("Failed to read stdin: {}", e))?;
        buffer
    } else {
        std::fs::read_to_string(source).map_err(|e| format!("Failed to read {}: {}", source, e))?
    };

    serde_json::from_str(&content).map_err(|e| format!("Invalid icon JSON: {}", e))
}

/// Apply `--flag value` overrides on top of the configured defaults
fn parse_options(args: &[String]) -> Result<DownloadOptions, String> {
    let mut options = get_config().download.to_options();

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let value = iter
            .next()
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--format" => {
                options.format = value.parse::<ImageFormat>().map_err(|e| {
                    let supported: Vec<&str> = ImageFormat::all().iter().map(|f| f.as_str()).collect();
                    format!("{} (supported: {})", e, supported.join(", "))
                })?;
            }
            "--color" => {
                options.color = Some(value.parse::<Color>().map_err(|e| e.to_string())?);
            }
            "--path" => options.path = PathBuf::from(value),
            "--size" => {
                options.size = value
                    .parse()
                    .map_err(|_| format!("Invalid size: {}", value))?;
            }
            other => return Err(format!("Unknown option: {}", other)),
        }
    }

    Ok(options)
}
