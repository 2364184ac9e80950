//! # AskDesk — Support-Chat Answer Engine
//!
//! Resolves visitor questions about the institute through layered strategies:
//! conversational short-circuits, keyword rules, fuzzy dataset search, and an
//! optional generative fallback.
//!
//! Usage:
//!   askdesk                      # Interactive chat loop
//!   askdesk ask "jee coaching"   # One-shot question
//!   askdesk suggest neet         # Suggestions only
//!   askdesk unresolved           # List questions the engine could not answer

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use askdesk_core::config::AskDeskConfig;
use askdesk_core::types::{ChatHistory, ChatMessage, FeedbackVerdict, Sender, new_message_id};
use askdesk_engine::Engine;
use askdesk_feedback::FeedbackStore;
use askdesk_search::fetch;
use askdesk_search::store::DatasetStore;

#[derive(Parser)]
#[command(
    name = "askdesk",
    version,
    about = "📚 AskDesk — support-chat answer engine"
)]
struct Cli {
    /// Config file path (default: ~/.askdesk/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Dataset JSON file, overriding the configured source
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat loop (the default)
    Chat,
    /// Resolve a single question and exit
    Ask { question: String },
    /// Print suggested questions for a query (or the defaults)
    Suggest { query: Option<String> },
    /// List recorded unresolved questions
    Unresolved,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "askdesk=debug,askdesk_engine=debug,askdesk_search=debug"
    } else {
        "askdesk=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let config = match &cli.config {
        Some(path) => AskDeskConfig::load_from(path)?,
        None => AskDeskConfig::load()?,
    };

    let feedback = if config.feedback.enabled {
        Some(FeedbackStore::open(&config.feedback.resolved_db_path())?)
    } else {
        None
    };

    if let Some(Commands::Unresolved) = cli.command {
        return list_unresolved(feedback.as_ref());
    }

    let store = Arc::new(DatasetStore::new(
        config.search.strict_threshold,
        config.search.lenient_threshold,
    ));
    load_dataset(&config, cli.data.as_deref(), &store).await;

    let provider = askdesk_providers::create_provider(&config)?;
    let engine = Engine::new(&config, Arc::clone(&store), provider);

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => chat_loop(&config, &engine, feedback.as_ref()).await,
        Commands::Ask { question } => {
            let answer = engine.resolve(&question, &ChatHistory::default()).await;
            println!("{}", answer.text);
            record_if_unresolved(feedback.as_ref(), &question, answer.is_unresolved());
            print_suggestions(&engine.suggest(&question));
            Ok(())
        }
        Commands::Suggest { query } => {
            print_suggestions(&engine.suggest(query.as_deref().unwrap_or_default()));
            Ok(())
        }
        Commands::Unresolved => unreachable!("handled before engine setup"),
    }
}

/// Load the dataset from the CLI override, the configured file, or the
/// configured URL — in that order. A missing source is not fatal: the engine
/// runs on an empty index and answers with defaults until a dataset lands.
async fn load_dataset(config: &AskDeskConfig, override_path: Option<&std::path::Path>, store: &DatasetStore) {
    let result = if let Some(path) = override_path {
        fetch::load_file(path)
    } else if !config.dataset.path.is_empty() {
        fetch::load_file(std::path::Path::new(&config.dataset.path))
    } else if !config.dataset.url.is_empty() {
        fetch::fetch_url(&config.dataset.url).await
    } else {
        tracing::warn!("no dataset source configured, starting with an empty index");
        return;
    };

    match result {
        Ok(dataset) => store.replace(dataset),
        Err(e) => tracing::error!(error = %e, "failed to load dataset"),
    }
}

async fn chat_loop(
    config: &AskDeskConfig,
    engine: &Engine,
    feedback: Option<&FeedbackStore>,
) -> Result<()> {
    println!("📚 AskDesk — ask me anything about {}", config.institute_name);
    if let Some(reminder) = engine.date_reminder() {
        println!("{reminder}");
    }
    println!("Type 'exit' to quit.\n");

    let mut history = ChatHistory::default();
    let stdin = std::io::stdin();
    loop {
        print!("you> ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            break;
        };
        let question = line?.trim().to_string();
        if question.is_empty() {
            continue;
        }
        if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
            break;
        }

        record_implicit_feedback(feedback, &history, &question);

        let answer = engine.resolve(&question, &history).await;
        println!("\n{}\n", answer.text);
        record_if_unresolved(feedback, &question, answer.is_unresolved());

        let suggestions = engine.suggest(&question);
        print_suggestions(&suggestions);

        history.messages.push(ChatMessage {
            id: new_message_id(),
            text: question,
            sender: Sender::User,
            timestamp: chrono::Utc::now(),
        });
        history.messages.push(ChatMessage {
            id: new_message_id(),
            text: answer.text,
            sender: Sender::Bot,
            timestamp: chrono::Utc::now(),
        });
    }

    println!("👋 Bye!");
    Ok(())
}

/// A clearly positive or negative follow-up message counts as feedback on the
/// previous exchange. Neutral messages record nothing.
fn record_implicit_feedback(feedback: Option<&FeedbackStore>, history: &ChatHistory, message: &str) {
    let Some(store) = feedback else {
        return;
    };
    let mut turns = history.messages.iter().rev();
    let (Some(bot), Some(user)) = (turns.next(), turns.next()) else {
        return;
    };
    if bot.sender != Sender::Bot || user.sender != Sender::User {
        return;
    }

    let verdict = match askdesk_engine::sentiment::detect(message) {
        askdesk_engine::Sentiment::Positive => FeedbackVerdict::Positive,
        askdesk_engine::Sentiment::Negative => FeedbackVerdict::Negative,
        askdesk_engine::Sentiment::Neutral => return,
    };
    let reason = matches!(verdict, FeedbackVerdict::Negative).then_some(message);
    if let Err(e) = store.save_feedback(&user.text, &bot.text, verdict, reason) {
        tracing::warn!(error = %e, "failed to record feedback");
    }
}

fn record_if_unresolved(feedback: Option<&FeedbackStore>, question: &str, unresolved: bool) {
    if !unresolved {
        return;
    }
    if let Some(store) = feedback {
        if let Err(e) = store.save_unresolved(question) {
            tracing::warn!(error = %e, "failed to record unresolved question");
        }
    }
}

fn print_suggestions(suggestions: &[String]) {
    if suggestions.is_empty() {
        return;
    }
    println!("You could also ask:");
    for s in suggestions {
        println!("  • {s}");
    }
    println!();
}

fn list_unresolved(feedback: Option<&FeedbackStore>) -> Result<()> {
    let Some(store) = feedback else {
        println!("Feedback sink is disabled in the config.");
        return Ok(());
    };
    let rows = store.list_unresolved().map_err(anyhow::Error::from)?;
    if rows.is_empty() {
        println!("No unresolved questions recorded.");
        return Ok(());
    }
    for row in &rows {
        println!("{}  {}", row.created_at, row.question);
    }
    println!("\n{} unresolved question(s).", rows.len());
    Ok(())
}
