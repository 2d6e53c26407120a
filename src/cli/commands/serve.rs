//! Web server command.

use console::style;

use crate::cli::icons::{dim_arrow, info, success, warn};
use crate::config::{Settings, DEFAULT_PORT};
use crate::server::{self, AppState};

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str, ephemeral: bool) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    let store = settings.blob_store(ephemeral)?;
    if ephemeral {
        println!("{} Using in-memory storage (data is lost on exit)", warn());
    } else {
        println!(
            "{} Storing data in {}",
            success(),
            style(settings.blobs_dir.display()).bold()
        );
    }

    let state = AppState::new(settings, store)?;
    if settings.admin_password.is_none() {
        println!(
            "{} ADMIN_PASSWORD is not set; admin endpoints are locked",
            warn()
        );
    }
    if state.brief.is_none() {
        println!(
            "  {} Brief generation disabled (set GEMINI_API_KEY to enable)",
            dim_arrow()
        );
    }

    println!("{} Starting vidfolio at http://{}:{}", info(), host, port);
    println!("  Press Ctrl+C to stop");

    server::serve(state, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3030
/// - Host and port: "0.0.0.0:3030" -> 0.0.0.0:3030
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    let bind = bind.trim();
    if bind.is_empty() {
        anyhow::bail!("Empty bind address");
    }

    // Try parsing as just a port number
    if let Ok(port) = bind.parse::<u16>() {
        return Ok(("127.0.0.1".to_string(), port));
    }

    // Try parsing as host:port
    if let Some((host, port_str)) = bind.rsplit_once(':') {
        if let Ok(port) = port_str.parse::<u16>() {
            return Ok((host.to_string(), port));
        }
    }

    // Must be just a host, use default port
    Ok((bind.to_string(), DEFAULT_PORT))
}
