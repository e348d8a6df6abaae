//! CourseBuddy - Main CLI Entry Point

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use clap::Parser;
use colored::Colorize;
use std::path::Path;
use std::sync::Arc;

use coursebuddy::{
    cli::{Args, Commands, Config},
    knowledge::KnowledgeStore,
    rag::AnswerPipeline,
    server, telemetry,
    types::Answer,
};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    telemetry::init(args.verbosity(&config));

    match &args.command {
        Commands::Serve { .. } => {
            let store = Arc::new(KnowledgeStore::load(&config.snapshot_path()));
            server::start(&config, store).await?;
        }
        Commands::Ask {
            question,
            image_file,
            json,
        } => {
            ask(&config, question, image_file.as_deref(), *json)?;
        }
        Commands::Stats => {
            show_stats(&config);
        }
        Commands::Config => {
            show_config(&config)?;
        }
    }

    Ok(())
}

fn ask(config: &Config, question: &str, image_file: Option<&Path>, json: bool) -> Result<()> {
    let image = match image_file {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("Failed to read image file {}", path.display()))?;
            Some(STANDARD.encode(bytes))
        }
        None => None,
    };

    let store = Arc::new(KnowledgeStore::load(&config.snapshot_path()));
    let pipeline = AnswerPipeline::with_config(store, config.pipeline_config());
    let answer = pipeline.answer_question(question, image.as_deref())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        print_answer(&answer);
    }

    Ok(())
}

fn print_answer(answer: &Answer) {
    println!("{}", answer.answer);

    if !answer.links.is_empty() {
        println!();
        println!("{}", "Links:".bold());
        for link in &answer.links {
            println!("  {} {}", link.text.cyan(), link.url.dimmed());
        }
    }
}

fn show_stats(config: &Config) {
    let path = config.snapshot_path();
    let summary = KnowledgeStore::load(&path).summary();

    println!("{}", "Knowledge snapshot".bold());
    println!("  Path:            {}", path.display());
    println!("  Course documents: {}", summary.course_documents);
    println!("  Forum posts:      {}", summary.forum_documents);
    match summary.created_at {
        Some(ts) => println!("  Created:          {}", ts.format("%Y-%m-%d %H:%M:%S")),
        None => println!("  Created:          {}", "unknown".dimmed()),
    }
}

fn show_config(config: &Config) -> Result<()> {
    if let Some(path) = Config::default_path() {
        println!("{} {}", "# default location:".dimmed(), path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}
