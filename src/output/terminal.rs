// Colored terminal output for the dashboard.
//
// This module handles all terminal-specific formatting: colors, tables,
// gauges. The main.rs commands delegate here.

use chrono::{Local, Utc};
use colored::{ColoredString, Colorize};

use super::{format_age, truncate_chars};
use crate::dashboard::{DashboardSnapshot, DataOrigin, Phase};
use crate::interactions::{Interaction, Sentiment};
use crate::metrics::{participant_name, AggregateMetrics, RankingEntry};

/// Interactions shown in the feed section.
const FEED_ROWS: usize = 5;

/// Width of the sentiment gauge in characters.
const GAUGE_WIDTH: usize = 40;

/// Render a full dashboard snapshot.
pub fn display_dashboard(snapshot: &DashboardSnapshot) {
    let title = format!("=== Instagram {} dashboard ===", snapshot.kind);
    println!("\n{}", title.bold());

    let origin = match snapshot.origin {
        Some(DataOrigin::Live) => "live".green(),
        Some(DataOrigin::Sample) => "sample data".yellow(),
        None => "no data yet".dimmed(),
    };
    let search = if snapshot.filters.query.trim().is_empty() {
        "-".to_string()
    } else {
        snapshot.filters.query.clone()
    };
    let sentiment = snapshot
        .filters
        .sentiment
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| "all".to_string());
    println!(
        "  Source: {}  |  Period: {}  |  Sentiment: {}  |  Search: {}",
        origin, snapshot.filters.period, sentiment, search
    );
    println!(
        "  {} of {} interactions match",
        snapshot.view.interactions.len(),
        snapshot.raw_count
    );

    if snapshot.phase == Phase::Loading && snapshot.last_updated.is_none() {
        println!("\n  {}", "Loading data...".dimmed());
        return;
    }

    if let Some(hint) = empty_view_hint(snapshot) {
        println!("  {}", hint.yellow());
    }

    display_kpis(&snapshot.view.metrics);
    display_gauge(snapshot.view.metrics.sentiment_index);
    display_topics(&snapshot.view.topics);
    display_feed(&snapshot.view.interactions);
    display_ranking(&snapshot.view.ranking);

    match snapshot.last_updated {
        Some(at) => println!(
            "\n  {}",
            format!(
                "Last updated: {} ({})",
                at.with_timezone(&Local).format("%H:%M:%S"),
                format_age(at, Utc::now())
            )
            .dimmed()
        ),
        None => println!("\n  {}", "Last updated: never".dimmed()),
    }
}

/// Explain an empty view when sample rows exist but the period hides them.
pub fn empty_view_hint(snapshot: &DashboardSnapshot) -> Option<&'static str> {
    let hidden_samples = snapshot.origin == Some(DataOrigin::Sample)
        && snapshot.raw_count > 0
        && snapshot.view.interactions.is_empty()
        && snapshot.filters.period.days().is_some();
    hidden_samples.then_some(
        "Sample data is older than the selected period. Use --period all to see it.",
    )
}

/// Headline cards: most active voice and per-sentiment counts.
pub fn display_kpis(metrics: &AggregateMetrics) {
    println!();
    let (voice, count) = match &metrics.most_active {
        Some(p) => (p.display_name(), p.count),
        None => ("N/A".to_string(), 0),
    };
    println!(
        "  Most active: {} ({} interactions)",
        voice.magenta().bold(),
        count
    );
    println!(
        "  {} {}   {} {}   {} {}",
        "Positive".green(),
        metrics.positive,
        "Neutral".cyan(),
        metrics.neutral,
        "Negative".red(),
        metrics.negative,
    );
}

/// Horizontal gauge for the 0-100 sentiment index.
pub fn display_gauge(index: f64) {
    let clamped = index.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * GAUGE_WIDTH as f64).round() as usize;
    let bar = format!(
        "{}{}",
        "#".repeat(filled),
        "-".repeat(GAUGE_WIDTH - filled)
    );
    let colored_bar = match clamped {
        s if s >= 70.0 => bar.green(),
        s if s >= 40.0 => bar.yellow(),
        _ => bar.red(),
    };
    println!("\n  Sentiment index [{}] {:.1}/100", colored_bar, clamped);
}

/// Most frequent words.
pub fn display_topics(topics: &[String]) {
    if topics.is_empty() {
        println!("\n  Topics: {}", "none".dimmed());
    } else {
        println!("\n  Topics: {}", topics.join(", ").bold());
    }
}

fn colorize_sentiment(sentiment: Option<Sentiment>) -> ColoredString {
    match sentiment {
        Some(Sentiment::Positive) => "POS".green(),
        Some(Sentiment::Neutral) => "NEU".cyan(),
        Some(Sentiment::Negative) => "NEG".red(),
        None => "---".dimmed(),
    }
}

/// The first few filtered interactions.
pub fn display_feed(interactions: &[Interaction]) {
    println!("\n  {}", "Recent interactions".bold());
    if interactions.is_empty() {
        println!("    {}", "No interactions match the current filters.".dimmed());
        return;
    }
    for interaction in interactions.iter().take(FEED_ROWS) {
        println!(
            "    {}  {:<22} {}",
            colorize_sentiment(interaction.sentiment),
            truncate_chars(&participant_name(interaction.handle(), &interaction.profile_id), 20),
            truncate_chars(&interaction.text, 60)
        );
    }
}

/// Top participants table.
pub fn display_ranking(ranking: &[RankingEntry]) {
    println!("\n  {}", "Top participants".bold());
    if ranking.is_empty() {
        println!("    {}", "Nobody yet.".dimmed());
        return;
    }

    println!(
        "    {:>4}  {:<24} {:>6}  {:>6}  {:<16}",
        "Rank".dimmed(),
        "Participant".dimmed(),
        "Total".dimmed(),
        "% Pos".dimmed(),
        "Last".dimmed(),
    );
    println!("    {}", "-".repeat(64).dimmed());

    for (i, entry) in ranking.iter().enumerate() {
        let name = participant_name(entry.handle.as_deref(), &entry.profile_id);
        let last = entry
            .last_interaction
            .map(|at| at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "    {:>4}. {:<24} {:>6}  {:>5.1}%  {:<16}",
            i + 1,
            truncate_chars(&name, 22),
            entry.total_interactions,
            entry.positive_pct,
            last
        );
    }
}
