use anyhow::Result;
use chrono::{Duration, Utc};
use colloquy_context::{ConversationMemory, MemoryConfig};
use colloquy_llm::{ClientFactory, ProviderConfig};
use colloquy_persist::{DBMessage, InMemoryPersistenceClient, MessageType};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const THREAD_ID: &str = "demo-thread";

const SCRIPT: &[(&str, &str)] = &[
    ("What is the market size for premium coffee subscriptions in Brazil?", "Roughly R$1.2B, growing about 15% a year."),
    ("Can you break the market into MECE segments?", "Sure: office, home enthusiasts, gifting and hospitality."),
    ("How should we think about pricing against competitors?", "Competitors cluster around R$90 per month; a tiered price works best."),
    ("Run a SWOT on our position.", "Strength is sourcing, weakness is brand awareness, the threat is price wars."),
    ("Show me a bar chart of segment sizes.", "Here is the chart of segment sizes."),
    ("What about revenue in the first year?", "Around R$4M if we reach 3,500 subscribers."),
];

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    println!("Colloquy - Simple Example");
    println!("=========================\n");

    // 1. Configuration and engine
    let config = MemoryConfig::load()?.with_recent_window_size(6);
    let engine = match ProviderConfig::from_env() {
        Some(provider) => Some(ClientFactory::create_client(provider)?),
        None => {
            println!("OPENAI_API_KEY not set, summaries will use the keyword heuristic\n");
            None
        }
    };

    let store = Arc::new(InMemoryPersistenceClient::new());
    let memory = ConversationMemory::new(store, engine, config)?;
    let session = memory.session(THREAD_ID)?;

    // 2. Record a short conversation
    println!("1. Recording {} turns...", SCRIPT.len() * 2);
    let start = Utc::now() - Duration::minutes(30);
    for (i, (question, answer)) in SCRIPT.iter().enumerate() {
        let at = start + Duration::minutes(i as i64 * 2);
        session
            .record_message(DBMessage::user(THREAD_ID, *question).at(at))
            .await?;

        let mut reply = DBMessage::assistant(THREAD_ID, *answer).at(at + Duration::seconds(30));
        if answer.contains("chart") {
            reply = reply.with_type(MessageType::Chart);
        }
        let metadata = session.record_message(reply).await?;
        info!(turn = i, tags = ?metadata.tags, "turn recorded");
    }
    println!("   ✓ Stored\n");

    // 3. Bounded context for the next turn
    println!("2. Building context window...");
    let package = session.build_context().await?;
    println!("   Messages kept: {}", package.messages.len());
    println!("   Estimated tokens: {}", package.total_estimated_tokens);
    if let Some(summary) = &package.summary {
        println!("   Summary: {}", summary);
    }
    println!();

    // 4. Structured thread summary
    println!("3. Refreshing thread summary...");
    let summary = session.ensure_fresh_summary(false).await?;
    println!("   Topics: {:?}", summary.key_topics);
    println!("   Frameworks: {:?}", summary.frameworks_used);
    println!("   Decisions: {:?}", summary.decisions_made);
    println!("   Covers {} messages\n", summary.message_count);

    // 5. Retrieval by tag
    println!("4. Messages tagged 'pricing':");
    for message in session.messages_by_tag("pricing").await? {
        println!("   - [{:?}] {}", message.role, message.content);
    }

    Ok(())
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(env_filter);

    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }
}
