use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `TOURIST_SERVER__PORT=8000`.
pub const ENV_PREFIX: &str = "TOURIST";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Chat endpoint used by the terminal widget
    #[arg(long, env = "CHAT_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Intent catalog (JSON)
    #[arg(long, env = "INTENTS_FILE")]
    pub intents: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve the widget page and the /chat backend
    Serve,
    /// Chat from the terminal against a /chat endpoint
    Chat,
}

/// What the binary does once configured.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Serve,
    Chat,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub mode: Mode,
    pub server: ServerConfig,
    pub collaborator: CollaboratorConfig,
    pub intents: IntentsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollaboratorConfig {
    pub endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct IntentsConfig {
    pub path: String,
    pub threshold: f64,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Priority: CLI flag (or its env var) > `TOURIST_*` env > config file > defaults.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("mode", "serve")?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 5000)?
            .set_default("server.request_timeout_secs", 30)?
            .set_default("collaborator.endpoint", "http://127.0.0.1:5000/chat")?
            .set_default("intents.path", "data/intents.json")?
            .set_default("intents.threshold", crate::intents::DEFAULT_THRESHOLD)?;

        // Explicit file must exist; ./config.{yaml,toml,json} is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(command) = cli.command {
            let mode = match command {
                Command::Serve => "serve",
                Command::Chat => "chat",
            };
            builder = builder.set_override("mode", mode)?;
        }
        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(endpoint) = cli.endpoint {
            builder = builder.set_override("collaborator.endpoint", endpoint)?;
        }
        if let Some(intents) = cli.intents {
            builder = builder.set_override("intents.path", intents)?;
        }

        builder.build()?.try_deserialize()
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
