use clap::Subcommand;
use serde_json::json;

use crate::cli::{config, utils, OutputFormat};

#[derive(Subcommand)]
pub enum ServerCommands {
    #[command(about = "Show the configured server and session state")]
    Show,

    #[command(about = "Set the API server base URL")]
    Set {
        #[arg(help = "Base URL, e.g. http://localhost:4000/api")]
        url: String,
    },

    #[command(about = "Store or clear the session token for protected endpoints")]
    Token {
        #[arg(help = "Bearer token issued by the auth service")]
        token: Option<String>,
        #[arg(long, help = "Forget the stored token")]
        clear: bool,
    },
}

pub async fn handle(cmd: ServerCommands, output_format: OutputFormat) -> anyhow::Result<()> {
    match cmd {
        ServerCommands::Show => {
            let cfg = config::load_config()?;
            utils::output_success(
                &output_format,
                &format!("Server: {}", cfg.server_url),
                Some(json!({
                    "server_url": cfg.server_url,
                    "has_token": cfg.token.is_some(),
                })),
            )
        }

        ServerCommands::Set { url } => {
            let mut cfg = config::load_config()?;
            cfg.server_url = url.trim_end_matches('/').to_string();
            config::save_config(&cfg)?;
            utils::output_success(
                &output_format,
                &format!("Server set to {}", cfg.server_url),
                None,
            )
        }

        ServerCommands::Token { token, clear } => {
            let mut cfg = config::load_config()?;
            if clear {
                cfg.token = None;
            } else if let Some(token) = token {
                cfg.token = Some(token);
            } else {
                utils::output_error(&output_format, "Provide a token or pass --clear", None)?;
                std::process::exit(1);
            }
            config::save_config(&cfg)?;

            let message = if cfg.token.is_some() { "Token stored" } else { "Token cleared" };
            utils::output_success(&output_format, message, None)
        }
    }
}
