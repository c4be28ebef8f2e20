use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

mod cli;
mod config;
mod error;
mod models;
mod parsers;
mod pipeline;
mod poster;
mod registry;
mod render;
mod utils;

use crate::cli::Cli;
use crate::config::{EnvDefaults, FileSettings, StdinPrompt};
use crate::models::Message;
use crate::poster::OsaScriptPoster;
use crate::registry::EmojiRegistry;
use crate::render::ImageMagickRenderer;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("slackmoji=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let file = FileSettings::load().context("Failed to read slackmoji config file")?;
    let env = EnvDefaults::load()?;
    let settings = config::resolve(cli, env, file, &mut StdinPrompt)?;

    let registry = EmojiRegistry::for_team(&settings.team_name, &settings.cookie)?;
    info!("Using emoji registry at {}", registry.url());

    let renderer = ImageMagickRenderer::new(settings.render.clone(), &settings.out_dir);
    let poster = OsaScriptPoster::new(settings.script.clone());
    let message = Message::parse(&settings.message);

    let summary = pipeline::run_batch(&registry, &renderer, &poster, &message)
        .await
        .context("Failed to read existing emoji")?;

    println!("\n{}", summary);
    Ok(())
}
