//! `login` / `logout`.

use std::io::{self, BufRead};

use serde_json::json;

use super::{AppContext, CommandOutput, color_enabled};
use crate::error::{HotelDeskError, Result};
use crate::list::Toast;
use crate::session::FileSessionStore;

/// Store a bearer token. Reads one line from stdin when `token` is omitted.
pub fn cmd_login(token: Option<String>, json: bool) -> Result<()> {
    let token = match token {
        Some(token) => token,
        None => {
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
            line
        }
    };
    if token.trim().is_empty() {
        return Err(HotelDeskError::InvalidInput(
            "no token given (pass it as an argument or on stdin)".to_string(),
        ));
    }

    let ctx = AppContext::load()?;
    ctx.session.login(&token)?;
    let path = FileSessionStore::in_dir(&ctx.config_dir).path().to_path_buf();
    let message = format!("Signed in. Token saved to {}", path.display());

    CommandOutput::new(json!({
        "action": "login",
        "session_file": path.to_string_lossy(),
        "success": true,
    }))
    .with_text(Toast::success(message).render(color_enabled()))
    .print(json)
}

pub fn cmd_logout(json: bool) -> Result<()> {
    let ctx = AppContext::load()?;
    ctx.session.logout()?;

    CommandOutput::new(json!({
        "action": "logout",
        "success": true,
    }))
    .with_text(Toast::success("Signed out").render(color_enabled()))
    .print(json)
}
