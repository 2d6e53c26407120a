//! Configuration management commands.

use console::style;

use crate::cli::icons::{dim_arrow, error};
use crate::config::{Config, Settings};

/// Print the effective configuration as TOML.
pub fn cmd_config_show(settings: &Settings, config: &Config) -> anyhow::Result<()> {
    match config.source_path {
        Some(ref path) => eprintln!("{} Config file: {}", dim_arrow(), path.display()),
        None => eprintln!("{} No config file found, using defaults", dim_arrow()),
    }
    eprintln!(
        "{} Data directory: {}",
        dim_arrow(),
        style(settings.data_dir.display()).bold()
    );
    eprintln!("{} Public URL: {}", dim_arrow(), settings.public_base_url);

    let effective = effective_config(settings, config).redacted();
    print!("{}", toml::to_string_pretty(&effective)?);
    Ok(())
}

/// Get a config value by dotted path.
pub fn cmd_config_get(config: &Config, setting: &str) -> anyhow::Result<()> {
    let value = serde_json::to_value(config.redacted())?;
    let result = navigate_json(&value, setting)?;

    match result {
        serde_json::Value::String(s) => println!("{}", s),
        serde_json::Value::Null => println!("null"),
        other => println!("{}", serde_json::to_string_pretty(other)?),
    }
    Ok(())
}

/// Config reflecting resolved settings (file, environment and flags).
fn effective_config(settings: &Settings, config: &Config) -> Config {
    Config {
        data_dir: Some(settings.data_dir.display().to_string()),
        public_base_url: Some(settings.public_base_url.clone()),
        bind: settings.bind.clone(),
        admin_password: settings.admin_password.clone(),
        cache_max_age_secs: Some(settings.cache_max_age_secs),
        llm: settings.llm.clone(),
        source_path: config.source_path.clone(),
    }
}

/// Navigate a JSON value using dot notation.
fn navigate_json<'a>(
    value: &'a serde_json::Value,
    path: &str,
) -> anyhow::Result<&'a serde_json::Value> {
    if path.is_empty() {
        return Ok(value);
    }

    let mut current = value;
    for part in path.split('.') {
        current = match current {
            serde_json::Value::Object(map) => map
                .get(part)
                .ok_or_else(|| anyhow::anyhow!("{} Setting '{}' not found", error(), path))?,
            serde_json::Value::Array(arr) => {
                let idx: usize = part
                    .parse()
                    .map_err(|_| anyhow::anyhow!("{} Invalid array index: {}", error(), part))?;
                arr.get(idx).ok_or_else(|| {
                    anyhow::anyhow!("{} Array index out of bounds: {}", error(), idx)
                })?
            }
            _ => anyhow::bail!(
                "{} Cannot navigate into non-object/array at '{}'",
                error(),
                part
            ),
        };
    }
    Ok(current)
}
