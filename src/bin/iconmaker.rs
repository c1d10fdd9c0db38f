use anyhow::{anyhow, Result};
use clap::Parser;
use dotenvy::dotenv;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use iconmaker::client::{find_icon, render_error, render_grid, IconClient, IconForm, DEFAULT_API_URL};
use iconmaker::styles::{format_styles_list, DEFAULT_STYLE};

/// Generate a consistent set of four icons from a theme
#[derive(Parser, Debug)]
#[command(name = "iconmaker", version)]
struct Cli {
    /// Icon set theme, e.g. "Toys", "Space", "Nature"
    #[arg(required_unless_present = "list_styles")]
    theme: Option<String>,

    /// Style preset
    #[arg(short, long, default_value = DEFAULT_STYLE)]
    style: String,

    /// Brand color (hex or name), up to 3
    #[arg(short, long = "color")]
    colors: Vec<String>,

    /// Generation API base URL
    #[arg(long, env = "ICONMAKER_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Download a single icon by its number (1-4)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=4), conflicts_with = "download_all")]
    download: Option<u8>,

    /// Download all four icons
    #[arg(long)]
    download_all: bool,

    /// Directory downloads are written to
    #[arg(short, long, default_value = ".")]
    out: PathBuf,

    /// Don't offer to retry after a failure
    #[arg(long)]
    no_retry: bool,

    /// List the style presets and exit
    #[arg(long)]
    list_styles: bool,
}

fn ask_retry() -> Result<bool> {
    print!("↻ Try again? [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::init();

    let cli = Cli::parse();

    let client = IconClient::new(&cli.api_url);

    if cli.list_styles {
        match client.list_styles().await {
            Ok(styles) => {
                for style in styles {
                    println!("{:<12} {}", style.id, style.description);
                }
            }
            Err(e) => {
                error!("Could not fetch styles from {}: {}", cli.api_url, e);
                print!("{}", format_styles_list());
            }
        }
        return Ok(());
    }

    let request = IconForm::new(cli.theme.unwrap_or_default(), cli.style, cli.colors).into_request()?;

    let response = loop {
        println!("⏳ Generating icons for '{}' in {} style...", request.theme, request.style);
        match client.generate_icons(&request).await {
            Ok(response) => break response,
            Err(e) => {
                error!("Generation failed: {}", e);
                eprint!("{}", render_error(&e.to_string()));
                if cli.no_retry || !ask_retry()? {
                    return Err(e);
                }
            }
        }
    };

    print!("{}", render_grid(&response));

    if cli.download_all {
        let summary = client.download_all(&response, &cli.out).await;
        for path in &summary.saved {
            println!("💾 Saved: {}", path.display());
        }
        for (index, e) in &summary.failed {
            eprintln!("❌ Icon {}: {}", index, e);
        }
        if !summary.is_complete() {
            return Err(anyhow!(
                "{} of {} icons failed to download",
                summary.failed.len(),
                response.icons.len()
            ));
        }
    } else if let Some(number) = cli.download {
        let icon = find_icon(&response, number as usize)?;
        let path = client
            .download_icon(icon, &response.metadata.theme, &cli.out)
            .await?;
        println!("💾 Saved: {}", path.display());
    }

    info!("Done");
    Ok(())
}
