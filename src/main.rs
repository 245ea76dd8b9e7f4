//! slirc - terminal IRC client.
//!
//! Usage: `slirc [config.toml] [server-name]`

use slirc_client::config::{Config, ConfigError, validate};
use slirc_client::input::{StdioTerminal, Terminal, stream_input, timestamped};
use slirc_client::network::Connection;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().unwrap_or_else(|| "config.toml".to_string());
    let requested = args.next();

    let config = Config::load(&config_path).map_err(|e| {
        error!(path = %config_path, error = %e, "Failed to load config");
        e
    })?;

    if let Err(errors) = validate(&config) {
        for e in &errors {
            error!(path = %config_path, error = %e, "Invalid config");
        }
        return Err(ConfigError::Invalid(errors).into());
    }

    let mut terminal = StdioTerminal::new();

    if config.servers.is_empty() {
        terminal.println("no servers!");
        return Ok(());
    }

    let name = match requested {
        Some(name) => name,
        None => {
            let names = config.server_names().collect::<Vec<_>>().join(", ");
            terminal.println(&format!("servers: {names}"));
            match terminal.input("server > ").await {
                Some(name) => name.trim().to_string(),
                None => return Ok(()),
            }
        }
    };

    let Some(server) = config.server(&name) else {
        terminal.println(&format!("unable to find data on host {name}"));
        return Ok(());
    };

    info!(server = %server.name, host = %server.host, port = server.port, "Starting slirc");

    let mut conn = Connection::new(server.clone(), config.client.clone());
    conn.set_on_info(|text| println!("{}", timestamped(text)));
    conn.info("connecting . . .");

    if let Err(e) = conn.connect().await {
        warn!(error = %e, "Connect failed");
    }

    if !conn.ready() {
        terminal.println("server status:");
        terminal.println(&conn.status());
        return Ok(());
    }

    conn.info(&format!("logged in as {} ({})", conn.nickname(), conn.username()));

    let channel = config.client.default_channel.clone();
    conn.send_command("JOIN", &[channel.as_str()], "").await?;

    let joined = conn
        .wait_for(
            |s| s.current_channel.eq_ignore_ascii_case(&channel),
            config.client.join_timeout(),
        )
        .await;
    if !joined {
        conn.info(&format!("welp you're not in {channel}"));
    }

    if !config.client.greeting.is_empty() {
        conn.send_message(&config.client.greeting).await?;
    }

    stream_input(&conn, &mut terminal).await;
    conn.disconnect().await;
    info!("Disconnected");

    Ok(())
}
