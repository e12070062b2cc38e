//! dreamlog - Dream journal CLI
//!
//! Record dreams and get sentiment, pattern and trend insights about them.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use dreamlog_core::analytics::{
    build_emotion_timeline, build_sleep_quality_series, recent, search, theme_weights,
    AnalysisReport, InsightGenerator, SentimentClassifier, NO_INSIGHTS_MESSAGE,
};
use dreamlog_core::format::format_days_ago;
use dreamlog_core::store::{add_dream, delete_dream, find_dream};
use dreamlog_core::{parse_tags, Config, DreamRecord, DreamStore, JsonFileStore, NewDream};

#[derive(Parser, Debug)]
#[command(name = "dreamlog")]
#[command(about = "Dream journal with sentiment, pattern and trend insights")]
#[command(version)]
struct Args {
    /// Journal file to use instead of the configured one
    #[arg(long, global = true)]
    journal: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Record a new dream
    Add {
        /// Dream title
        #[arg(short, long)]
        title: String,

        /// What happened in the dream
        #[arg(short, long)]
        description: String,

        /// Main emotion (see `dreamlog emotions`)
        #[arg(short, long)]
        emotion: String,

        /// The dream was lucid
        #[arg(long)]
        lucid: bool,

        /// Comma-separated tags (e.g. "flying, water")
        #[arg(long, default_value = "")]
        tags: String,

        /// Sleep quality from 1 to 10
        #[arg(short, long, default_value_t = 5)]
        sleep_quality: u8,
    },

    /// List recorded dreams, newest first
    List {
        /// Maximum number of dreams to show
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Show one dream in full
    Show {
        /// Dream id (a unique prefix is enough)
        id: String,
    },

    /// Search titles, descriptions and tags
    Search {
        /// Text to look for (case-insensitive)
        query: String,
    },

    /// Delete a dream
    Delete {
        /// Dream id (a unique prefix is enough)
        id: String,
    },

    /// Print the full analysis
    Stats,

    /// Print insights only
    Insights,

    /// Print a time series for charting
    Timeline {
        #[arg(value_enum, default_value_t = Series::Emotion)]
        series: Series,
    },

    /// Print theme words with weights (word-cloud input)
    Themes {
        /// Number of words (default: analysis.theme_words from config)
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Export the analysis
    Export {
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Text)]
        format: ExportFormat,
    },

    /// List the configured emotion labels
    Emotions,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Series {
    Emotion,
    Sleep,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormat {
    Text,
    Md,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = dreamlog_core::logging::init(&config.logging).ok();

    let journal_path = args.journal.clone().unwrap_or_else(|| config.journal_path());
    let store = JsonFileStore::new(journal_path);
    tracing::debug!(journal = %store.path().display(), command = ?args.command, "Starting");

    match args.command {
        Command::Add {
            title,
            description,
            emotion,
            lucid,
            tags,
            sleep_quality,
        } => {
            let Some(emotion) = config.emotions.resolve(&emotion) else {
                anyhow::bail!(
                    "Unknown emotion '{}'. Choose one of: {}",
                    emotion,
                    config.emotions.labels.join(", ")
                );
            };
            let new = NewDream::new(title, description, emotion)
                .lucid(lucid)
                .tags(parse_tags(&tags))
                .sleep_quality(sleep_quality);
            let classifier = SentimentClassifier::from_config(&config.sentiment);
            let record = add_dream(&store, new, &classifier).context("failed to save dream")?;
            println!("Dream saved successfully!");
            println!(
                "  id: {}  sentiment: {} ({:+.2})",
                record.id(),
                record.sentiment_label(),
                record.sentiment_polarity()
            );
        }
        Command::List { limit } => {
            let records = load(&store)?;
            if records.is_empty() {
                println!("No dreams recorded yet. Start by adding some dreams!");
            } else {
                print_dreams(&recent(&records, limit), "Dreams:");
            }
        }
        Command::Show { id } => {
            let records = load(&store)?;
            let record = find_dream(&records, &id)?;
            print_dream_detail(record);
        }
        Command::Search { query } => {
            let records = load(&store)?;
            let results = search(&records, &query);
            print_dreams(&results, &format!("Search results for '{}':", query));
        }
        Command::Delete { id } => {
            let records = load(&store)?;
            let id = find_dream(&records, &id)?.id().to_string();
            let removed = delete_dream(&store, &id).context("failed to delete dream")?;
            println!("Deleted \"{}\" ({})", removed.title(), removed.id());
        }
        Command::Stats => {
            let report = build_report(&config, &load(&store)?);
            println!("{}", report.render_text());
        }
        Command::Insights => {
            let records = load(&store)?;
            let report = build_report(&config, &records);
            if report.insights.is_empty() {
                println!("• {}", NO_INSIGHTS_MESSAGE);
            }
            for insight in &report.insights {
                println!("• {}", insight.message);
            }
        }
        Command::Timeline { series } => {
            let records = load(&store)?;
            match series {
                Series::Emotion => {
                    for point in build_emotion_timeline(&records) {
                        println!("{}\t{}", point.timestamp.to_rfc3339(), point.value);
                    }
                }
                Series::Sleep => {
                    for point in build_sleep_quality_series(&records) {
                        println!("{}\t{}", point.timestamp.to_rfc3339(), point.value);
                    }
                }
            }
        }
        Command::Themes { limit } => {
            let records = load(&store)?;
            let limit = limit.unwrap_or(config.analysis.theme_words);
            for (word, weight) in theme_weights(&records, limit) {
                println!("{:<20} {}", word, weight);
            }
        }
        Command::Export { format } => {
            let report = build_report(&config, &load(&store)?);
            match format {
                ExportFormat::Text => {
                    println!("DREAM JOURNAL ANALYSIS EXPORT");
                    println!(
                        "Generated on: {}",
                        report.generated_at.format("%Y-%m-%d %H:%M:%S")
                    );
                    println!("{}", "=".repeat(60));
                    println!();
                    println!("{}", report.render_text());
                }
                ExportFormat::Md => print!("{}", report.render_markdown()),
                ExportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Command::Emotions => {
            for label in &config.emotions.labels {
                println!("{}", label);
            }
        }
    }

    Ok(())
}

fn load(store: &JsonFileStore) -> Result<Vec<DreamRecord>> {
    store
        .load_all()
        .with_context(|| format!("failed to load journal {}", store.path().display()))
}

fn build_report(config: &Config, records: &[DreamRecord]) -> AnalysisReport {
    let generator = InsightGenerator::new(config.insights.clone());
    AnalysisReport::build(records, &config.analysis, &generator, Utc::now())
}

fn print_dreams(dreams: &[&DreamRecord], header: &str) {
    println!("{}", header);
    if dreams.is_empty() {
        println!("  No dreams found.");
        return;
    }
    let now = Utc::now();
    for (i, dream) in dreams.iter().enumerate() {
        println!(
            "{:>3}. {}  {:<30} {:<10} {}{}",
            i + 1,
            short_id(dream.id()),
            dream.title(),
            dream.emotion(),
            format_days_ago(dream.timestamp(), now),
            if dream.is_lucid() { "  (lucid)" } else { "" }
        );
    }
}

/// First eight characters of an id, cut on a char boundary.
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}

fn print_dream_detail(dream: &DreamRecord) {
    let tags = if dream.tags().is_empty() {
        "None".to_string()
    } else {
        dream.tags().join(", ")
    };
    println!("{}", dream.title());
    println!("{}", "─".repeat(dream.title().chars().count().max(10)));
    println!("Id:            {}", dream.id());
    println!("Date:          {}", dream.date_display());
    println!("Emotion:       {}", dream.emotion());
    println!("Tags:          {}", tags);
    println!("Sleep Quality: {}/10", dream.sleep_quality());
    println!("Lucid:         {}", if dream.is_lucid() { "Yes" } else { "No" });
    println!(
        "Sentiment:     {} ({:+.2})",
        dream.sentiment_label().display_name(),
        dream.sentiment_polarity()
    );
    println!();
    println!("{}", dream.description());
}
