use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Secret friend draws with private reveal links
#[derive(Parser, Debug)]
#[command(name = "amigo-secreto")]
#[command(version)]
pub struct Cli {
    /// JSON file holding the group records
    #[arg(
        long,
        env = "AMIGO_SECRETO_TABLE",
        default_value = "GrupoAmigoSecreto.json",
        global = true
    )]
    pub table: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve draw, link and reveal requests over HTTP
    Serve(ServeArgs),
    /// Create a group, or reset an existing one with a new participant list
    Register(RegisterArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, env = "AMIGO_SECRETO_BIND", default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Public URL of the service, used in reveal links. Defaults to
    /// `https://<Host header>` of each request.
    #[arg(long, env = "AMIGO_SECRETO_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct RegisterArgs {
    /// Group id
    pub group: String,

    /// Participant names
    #[arg(required = true, num_args = 1..)]
    pub participants: Vec<String>,
}

impl ServeArgs {
    /// Base URL reveal links of a request received with `host` should use.
    pub fn base_url_for(&self, host: Option<&str>) -> String {
        match &self.base_url {
            Some(base_url) => base_url.trim_end_matches('/').to_string(),
            None => format!("https://{}", host.unwrap_or("localhost")),
        }
    }
}
