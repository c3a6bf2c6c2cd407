//! Configuration commands.
//!
//! - `config show`: Display current configuration
//! - `config get`: Print one value
//! - `config set`: Validate and store one value

use owo_colors::OwoColorize;
use serde_json::json;

use super::{AppContext, CommandOutput, color_enabled};
use crate::config::{CONFIG_KEYS, Config};
use crate::error::Result;

pub fn cmd_config_show(json: bool) -> Result<()> {
    let ctx = AppContext::load()?;
    let color = color_enabled();
    let config = &ctx.config;

    let mut values = serde_json::Map::new();
    for &key in CONFIG_KEYS {
        values.insert(key.to_string(), json!(config.get(key)?));
    }
    let effective_url = config.base_url()?;
    let config_file = Config::config_path(&ctx.config_dir);

    let json_output = json!({
        "config": values,
        "effective_base_url": effective_url.as_str(),
        "signed_in": ctx.session.is_authenticated(),
        "config_file": config_file.to_string_lossy(),
    });

    let key = |k: &str| if color { k.cyan().to_string() } else { k.to_string() };
    let mut text = String::new();
    for &k in CONFIG_KEYS {
        let value = config.get(k)?;
        let value = if value.is_empty() { "(not set)".to_string() } else { value };
        text.push_str(&format!("{}: {}\n", key(k), value));
    }
    if effective_url.as_str().trim_end_matches('/') != config.api.base_url.trim_end_matches('/') {
        text.push_str(&format!("{}: {}\n", key("effective base_url"), effective_url));
    }
    let session = if ctx.session.is_authenticated() {
        "signed in"
    } else {
        "not signed in"
    };
    text.push_str(&format!("{}: {}\n\n", key("session"), session));
    let footer = format!("Config file: {}", config_file.display());
    text.push_str(&if color { footer.dimmed().to_string() } else { footer });

    CommandOutput::new(json_output).with_text(text).print(json)
}

pub fn cmd_config_get(key: &str, json: bool) -> Result<()> {
    let ctx = AppContext::load()?;
    let value = ctx.config.get(key)?;
    CommandOutput::new(json!({ "key": key, "value": value }))
        .with_text(value)
        .print(json)
}

pub fn cmd_config_set(key: &str, value: &str, json: bool) -> Result<()> {
    let ctx = AppContext::load()?;
    let mut config = ctx.config;
    config.set(key, value)?;
    config.save_to(&ctx.config_dir)?;

    let stored = config.get(key)?;
    let label = if color_enabled() { key.cyan().to_string() } else { key.to_string() };
    CommandOutput::new(json!({
        "action": "config_set",
        "key": key,
        "value": stored,
        "success": true,
    }))
    .with_text(format!("Set {label} to {stored}"))
    .print(json)
}
