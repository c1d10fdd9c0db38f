//! Handles a single request CGI-style: method and path from the environment,
//! body on stdin, response on stdout.

use anyhow::Result;
use dotenvy::dotenv;
use log::error;
use std::env;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use iconmaker::serverless::{handle_once, router_from_env, DEFAULT_PATH};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let method = env::var("REQUEST_METHOD").unwrap_or_else(|_| "POST".to_string());
    let path = env::var("PATH_INFO").unwrap_or_else(|_| DEFAULT_PATH.to_string());

    let mut body = Vec::new();
    tokio::io::stdin().read_to_end(&mut body).await?;

    let response = match handle_once(router_from_env()?, &method, &path, body).await {
        Ok(response) => response,
        Err(e) => {
            error!("❌ Request failed: {}", e);
            return Err(e);
        }
    };

    let mut stdout = tokio::io::stdout();
    stdout.write_all(&response.to_cgi()).await?;
    stdout.flush().await?;

    Ok(())
}
