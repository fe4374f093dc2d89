//! deskmate terminal frontend.
//!
//! Minimal stand-in for the desktop shell: loads config, connects the link,
//! prints events, and turns stdin lines into chat turns.
//!
//! Commands: `/new` starts a fresh session, `/config` requests the runtime
//! settings, `/quit` exits.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{fmt, EnvFilter};

use deskmate_client::client::Client;
use deskmate_client::config::{self, ClientConfig};
use deskmate_client::dispatch::ClientEvent;
use deskmate_client::settings::MemorySettings;

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let cfg = match config::load_from_file("deskmate.yaml") {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "config not loaded, using defaults");
            ClientConfig::default()
        }
    };
    tracing::info!(url = %cfg.connection.server_url, "deskmate starting");

    let settings = Arc::new(MemorySettings::default());
    let (client, mut events) = Client::new(&cfg, settings);

    if let Err(e) = client.connect().await {
        eprintln!("connect failed: {e}");
        return;
    }
    let _ = client.request_config().await;

    let printer = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                ClientEvent::Connected => println!("-- connected"),
                ClientEvent::Disconnected => {
                    println!("-- disconnected");
                    break;
                }
                ClientEvent::ChatReply(text) => println!("<< {text}"),
                ClientEvent::ConfigResponse(r) => {
                    println!("-- config {}: {}", r.status, r.message)
                }
                ClientEvent::StatusUpdate(s) => println!("-- cpu {}% {}", s.current_cpu, s.status),
                ClientEvent::Error(msg) => eprintln!("!! {msg}"),
            }
        }
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        match line {
            "" => continue,
            "/quit" => break,
            "/new" => {
                client.new_session().await;
                println!("-- session {}", client.session_id().await);
            }
            "/config" => {
                if let Err(e) = client.request_config().await {
                    eprintln!("!! {e}");
                }
            }
            text => {
                if let Err(e) = client.send_chat(text).await {
                    eprintln!("!! {e}");
                }
            }
        }
    }

    let _ = client.disconnect().await;
    printer.abort();
}
