use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{get_config_path, Config, ThemeChoice};
use crate::scoring::{validate_rules, RuleConfig};

/// Prompt user with a message and return their trimmed input.
fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    std::io::stdout()
        .flush()
        .context("Failed to flush stdout")?;
    let mut input = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut input)
        .context("Failed to read input")?;
    Ok(input.trim().to_string())
}

/// Prompt user with a message and a default value. Returns default if input is empty.
fn prompt_with_default(message: &str, default: &str) -> Result<String> {
    let input = prompt(&format!("{} [{}]: ", message, default))?;
    if input.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(input)
    }
}

/// Prompt user with a yes/no question. Returns bool based on input and default.
pub fn prompt_yes_no(message: &str, default_yes: bool) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let input = prompt(&format!("{} [{}]: ", message, hint))?;
    let input = input.to_lowercase();
    if input.is_empty() {
        Ok(default_yes)
    } else {
        Ok(input == "y" || input == "yes")
    }
}

/// Parse four whitespace- or comma-separated uma values, e.g. "30 10 -10 -30".
fn parse_uma(input: &str) -> Result<[f64; 4], String> {
    let values = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().map_err(|_| format!("'{}' is not a number", s)))
        .collect::<Result<Vec<_>, _>>()?;

    <[f64; 4]>::try_from(values)
        .map_err(|v| format!("expected 4 values, got {}", v.len()))
}

fn format_uma(uma: &[f64; 4]) -> String {
    uma.iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the interactive init wizard to create a config file.
///
/// If `default_path` is Some, uses that as the config file path.
/// Otherwise, prompts the user with the default config path.
pub fn run_init_wizard(default_path: Option<PathBuf>) -> Result<()> {
    println!();
    println!("tenbo configuration");
    println!("===================");
    println!();

    // 1. Seat names
    println!("Who usually sits at the table? Names are how games are matched up in the history,");
    println!("so use the same spelling every time.");
    let defaults = Config::default().seat_names();
    let mut players = Vec::with_capacity(4);
    for (i, fallback) in defaults.iter().enumerate() {
        let name = prompt_with_default(&format!("Seat {} name", i + 1), fallback)?;
        players.push(name);
    }

    // 2. Rules
    println!();
    let rule_defaults = RuleConfig::default();
    let customize = prompt_yes_no(
        "Customize rules? (n keeps 25000 start, 30000 return, uma 30/10/-10/-30, oka 20)",
        false,
    )?;

    let rules = if customize {
        loop {
            let uma = loop {
                let input = prompt_with_default("Uma for 1st..4th", &format_uma(&rule_defaults.uma))?;
                match parse_uma(&input) {
                    Ok(uma) => break uma,
                    Err(e) => println!("  Invalid: {}. Try again.", e),
                }
            };

            let oka = loop {
                let input = prompt_with_default("Oka (pool bonus for the top score)", "20")?;
                match input.parse::<f64>() {
                    Ok(v) => break v,
                    Err(_) => println!("  Invalid: must be a number. Try again."),
                }
            };

            let tobi_bonus = loop {
                let input = prompt_with_default("Tobi bonus per busted player", "10")?;
                match input.parse::<f64>() {
                    Ok(v) => break v,
                    Err(_) => println!("  Invalid: must be a number. Try again."),
                }
            };

            let candidate = RuleConfig {
                uma,
                oka,
                tobi_bonus,
                ..rule_defaults.clone()
            };
            match validate_rules(&candidate) {
                Ok(()) => break candidate,
                Err(errors) => {
                    for error in errors {
                        println!("  {}", error);
                    }
                    println!("  Let's try that again.");
                }
            }
        }
    } else {
        rule_defaults
    };

    // 3. Theme
    println!();
    let theme = loop {
        let input = prompt_with_default("Theme (auto, dark, light)", "auto")?;
        match input.to_lowercase().as_str() {
            "auto" => break ThemeChoice::Auto,
            "dark" => break ThemeChoice::Dark,
            "light" => break ThemeChoice::Light,
            _ => println!("  Invalid: pick auto, dark or light."),
        }
    };

    // 4. Config path
    let default_config_path = match default_path {
        Some(p) => p,
        None => get_config_path()?,
    };
    println!();
    let path_str = prompt_with_default(
        "Where should the config be saved?",
        &default_config_path.display().to_string(),
    )?;
    let config_path = PathBuf::from(&path_str);

    // Check if file already exists
    if config_path.exists() {
        let overwrite = prompt_yes_no(
            &format!(
                "Config already exists at {}. Overwrite?",
                config_path.display()
            ),
            false,
        )?;
        if !overwrite {
            println!("Aborted.");
            return Ok(());
        }
    }

    // 5. Write config
    let config = Config {
        players,
        rules,
        theme,
        history_path: None,
    };

    let yaml = serde_saphyr::to_string(&config)
        .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

    // Create parent directories
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    std::fs::write(&config_path, &yaml)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!();
    println!("Config written to {}", config_path.display());
    println!("Run `tenbo` to start keeping score.");

    Ok(())
}
