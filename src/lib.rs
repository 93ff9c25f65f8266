pub mod cli;
pub mod collection;
pub mod diary;
pub mod emotion;
pub mod error;
pub mod generator;
pub mod llm;
pub mod models;
pub mod settings;
pub mod sources;
pub mod utils;
pub mod writer;

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Local;
use clap::Parser;

use cli::{Cli, Commands};
use diary::DiaryApp;
use llm::OpenAiCompatibleClient;
use settings::Settings;

pub async fn run() -> Result<()> {
    // Initialize logging (reads RUST_LOG env var)
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Generate { date: None });

    if let Commands::Init { force } = command {
        if cli.config.exists() && !force {
            bail!("{} already exists (use --force to overwrite)", cli.config.display());
        }
        Settings::default().persist(&cli.config)?;
        log::info!("Wrote default settings to {}", cli.config.display());
        return Ok(());
    }

    let settings = Settings::load(&cli.config)?;
    let model = Arc::new(OpenAiCompatibleClient::from_env(
        settings.generation.base_url.as_deref(),
    )?);
    let app = DiaryApp::new(&settings, cli.diary, model)?;

    match command {
        Commands::Generate { date } => report_generated(app.generate(date).await?),
        Commands::Weekly { date } => report_generated(app.weekly(date).await?),
        Commands::Monthly { month } => report_generated(app.monthly(month).await?),
        Commands::Show { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            match app.show(date)? {
                Some(entry) => {
                    let rule = "=".repeat(60);
                    println!("\n{rule}\n{}\n{rule}\n", entry.content);
                }
                None => log::warn!("No diary for {date}"),
            }
        }
        Commands::Search { keyword } => {
            let results = app.search(&keyword)?;
            if results.is_empty() {
                log::info!("No diaries mention '{keyword}'");
            } else {
                println!("\n{} result(s):\n", results.len());
                for (index, entry) in results.iter().enumerate() {
                    println!("{}. {} - {}", index + 1, entry.date, entry.title);
                    println!("   {}\n", entry.content.replace('\n', " "));
                }
            }
        }
        Commands::Stats => {
            let stats = app.stats()?;
            println!("Storage: {}", app.writer().storage_path().display());
            println!("Daily entries: {}", stats.total);
            if let (Some(first), Some(last)) = (stats.first, stats.last) {
                println!("Range: {first} .. {last}");
            }
            for (month, count) in &stats.by_month {
                println!("  {month}: {count}");
            }
        }
        Commands::Init { .. } => {}
    }

    Ok(())
}

fn report_generated(entry: Option<models::DiaryEntry>) {
    match entry {
        Some(entry) => log::info!("{} {}", entry.mood, entry.title),
        None => log::info!("Nothing to write"),
    }
}
