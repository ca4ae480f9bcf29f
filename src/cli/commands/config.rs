//! Config command - show or edit configuration

use crate::cli::args::{ConfigAction, ConfigArgs};
use crate::config::{Config, ConfigManager};
use crate::error::{TexPngError, TexPngResult};
use console::style;
use std::path::PathBuf;

/// Execute the config command
pub async fn execute(args: ConfigArgs, config: &Config, manager: &ConfigManager) -> TexPngResult<()> {
    match args.action {
        None | Some(ConfigAction::Show) => show_config(config),
        Some(ConfigAction::Path) => show_path(manager),
        Some(ConfigAction::Init { force }) => init_config(manager, force).await?,
        Some(ConfigAction::Set { key, value }) => set_value(manager, config, &key, &value).await?,
    }

    Ok(())
}

fn show_config(config: &Config) {
    let toml =
        toml::to_string_pretty(config).unwrap_or_else(|_| "Error serializing config".to_string());
    println!("{}", toml);
}

fn show_path(manager: &ConfigManager) {
    println!("{}", manager.path().display());
}

async fn init_config(manager: &ConfigManager, force: bool) -> TexPngResult<()> {
    let path = manager.path();

    if path.exists() && !force {
        println!(
            "{} Config already exists at {} (use --force to overwrite)",
            style("!").yellow(),
            path.display()
        );
        return Ok(());
    }

    let config = Config::default();
    manager.save(&config).await?;

    println!(
        "{} Configuration initialized at {}",
        style("✓").green(),
        path.display()
    );

    Ok(())
}

async fn set_value(
    manager: &ConfigManager,
    config: &Config,
    key: &str,
    value: &str,
) -> TexPngResult<()> {
    let mut config = config.clone();

    let parts: Vec<&str> = key.split('.').collect();
    match parts.as_slice() {
        ["general", "verbose"] => config.general.verbose = parse_bool(value)?,
        ["general", "log_format"] => config.general.log_format = value.to_string(),

        ["tools", "latex"] => config.tools.latex = PathBuf::from(value),
        ["tools", "dvipng"] => config.tools.dvipng = PathBuf::from(value),
        ["tools", "timeout_secs"] => {
            config.tools.timeout_secs = if value.is_empty() {
                None
            } else {
                Some(parse_u64(value)?)
            }
        }

        ["render", "density"] => config.render.density = parse_u32(value)?,
        ["render", "work_dir"] => config.render.work_dir = PathBuf::from(value),
        ["render", "packages"] => {
            config.render.packages = value
                .split(';')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }

        _ => {
            eprintln!("{} Unknown config key: {}", style("✗").red(), key);
            eprintln!("Valid keys:");
            print_valid_keys();
            return Ok(());
        }
    }

    manager.save(&config).await?;
    println!("{} Set {} = {}", style("✓").green(), key, value);

    Ok(())
}

fn parse_bool(value: &str) -> TexPngResult<bool> {
    match value.to_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(TexPngError::User(format!(
            "Invalid boolean value: {}. Use true/false",
            value
        ))),
    }
}

fn parse_u32(value: &str) -> TexPngResult<u32> {
    value
        .parse()
        .map_err(|_| TexPngError::User(format!("Invalid number: {}", value)))
}

fn parse_u64(value: &str) -> TexPngResult<u64> {
    value
        .parse()
        .map_err(|_| TexPngError::User(format!("Invalid number: {}", value)))
}

fn print_valid_keys() {
    let keys = [
        "general.verbose",
        "general.log_format",
        "tools.latex",
        "tools.dvipng",
        "tools.timeout_secs",
        "render.density",
        "render.work_dir",
        "render.packages (semicolon-separated)",
    ];

    for key in keys {
        eprintln!("  {}", key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_bool_accepts_variants() {
        assert!(parse_bool("true").unwrap());
        assert!(parse_bool("YES").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn parse_u32_rejects_garbage() {
        assert_eq!(parse_u32("155").unwrap(), 155);
        assert!(parse_u32("fast").is_err());
    }
}
