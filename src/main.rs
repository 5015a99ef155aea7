mod config;
mod content;
mod error;
mod fetcher;
mod github;
mod models;
mod page;
mod stats;
mod svg;

use anyhow::Context;
use chrono::Utc;
use config::Config;
use fetcher::{fetch_activity, fetch_profile_state};
use github::GithubClient;
use page::PageSnapshot;
use stats::Aggregate;
use std::fs;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.token.is_none() {
        log::warn!("No GitHub token configured; GitHub sections will report an error");
    }

    let client = GithubClient::new(&config);
    let username = config.username.as_str();

    // Cancel in-flight requests on Ctrl-C.
    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let (state, activity) = tokio::join!(
        fetch_profile_state(&client, username, config.language_policy, &cancel),
        fetch_activity(&client, username, &cancel),
    );

    let aggregate = Aggregate::derive(&state, &activity);

    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("Failed to create {}", config.output_dir.display()))?;

    let snapshot = PageSnapshot::assemble(username, &state, &aggregate, Utc::now());
    let json_path = config.output_dir.join("portfolio.json");
    fs::write(&json_path, snapshot.to_json()?)
        .with_context(|| format!("Failed to write {}", json_path.display()))?;

    for theme in [svg::Theme::Dark, svg::Theme::Light] {
        let path = config.output_dir.join(theme.file_name());
        fs::write(&path, svg::generate_svg(&state, &aggregate, username, theme))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    println!(
        "Generated portfolio.json, dark_mode.svg and light_mode.svg for {username} ({} skills, {} contributions).",
        aggregate.skills.len(),
        aggregate.total_contributions
    );

    Ok(())
}
