//! plantbot CLI: chat about plant care with retrieval over the local
//! knowledge base. Config from env (and .env); conversation state is
//! in-process and lost on exit.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use chat::ChatService;
use conversation::ConversationStore;
use embedding::{EmbeddingConfig, EnvEmbeddingConfig};
use knowledge::KnowledgeStore;
use llm_client::{CompletionConfig, EnvCompletionConfig, OpenAICompletion};
use openai_embedding::OpenAIEmbedding;
use retrieval::{ContextRetriever, IndexBuilder};
use vector_index::InMemoryVectorIndex;

#[derive(Parser)]
#[command(name = "plantbot")]
#[command(about = "Plant care assistant: chat, ask, list", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat session (state lives for the session only).
    Chat {
        /// Owner recorded on conversations started in this session.
        #[arg(short, long)]
        owner: Option<String>,
    },
    /// Send a single message and print the reply.
    Ask {
        message: String,
        #[arg(short, long)]
        owner: Option<String>,
    },
    /// List conversation summaries for an owner.
    ///
    /// Conversation state is process-local, so this only sees conversations
    /// from the current process.
    List {
        #[arg(short, long, default_value = conversation::DEFAULT_OWNER)]
        owner: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    plantbot_core::init_tracing("plantbot.log")?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { owner } => {
            let service = build_service().await?;
            run_repl(&service, owner).await
        }
        Commands::Ask { message, owner } => {
            let service = build_service().await?;
            let reply = service
                .send_message(&message, None, owner)
                .await
                .context("Failed to send message")?;
            println!("{}", reply.response);
            if !reply.success {
                anyhow::bail!(reply.error.unwrap_or_else(|| "Chat failed".to_string()));
            }
            Ok(())
        }
        Commands::List { owner } => {
            let store = ConversationStore::new();
            let summaries = store.list_by_owner(&owner).await;
            if summaries.is_empty() {
                println!("No conversations for owner '{}' in this process.", owner);
            }
            for summary in summaries {
                println!(
                    "{}  messages={}  last_activity={}",
                    summary.id, summary.message_count, summary.last_activity_at
                );
            }
            Ok(())
        }
    }
}

/// Builds the full stack from env: completion client, embedding service,
/// in-memory vector index populated from the knowledge catalogue.
///
/// Index bootstrap failure degrades to chat without retrieval; a missing
/// completion API key is fatal.
async fn build_service() -> Result<ChatService> {
    let completion_config = EnvCompletionConfig::from_env()?;
    let completion = Arc::new(
        OpenAICompletion::with_base_url(
            completion_config.api_key().to_string(),
            completion_config.base_url().to_string(),
        )
        .with_model(completion_config.model().to_string()),
    );

    let retriever = match build_retriever().await {
        Ok(retriever) => Some(retriever),
        Err(e) => {
            warn!(error = %e, "Knowledge index unavailable, chatting without retrieval");
            eprintln!("Note: plant knowledge base unavailable ({e}); answers will not use it.");
            None
        }
    };

    Ok(ChatService::new(ConversationStore::new(), completion, retriever))
}

async fn build_retriever() -> Result<Arc<ContextRetriever>> {
    let embedding_config = EnvEmbeddingConfig::from_env()?;
    embedding_config.validate()?;

    let embedding = Arc::new(OpenAIEmbedding::new_with_base_url(
        embedding_config.api_key().to_string(),
        embedding_config
            .model()
            .unwrap_or(openai_embedding::DEFAULT_EMBEDDING_MODEL)
            .to_string(),
        embedding_config.base_url(),
    ));
    let index = Arc::new(InMemoryVectorIndex::new());
    let knowledge = KnowledgeStore::from_env();

    let builder = IndexBuilder::new(knowledge, embedding.clone(), index.clone());
    builder.ensure_index().await?;

    Ok(Arc::new(ContextRetriever::new(embedding, index)))
}

/// Reads messages from stdin and prints replies until EOF or "exit".
async fn run_repl(service: &ChatService, owner: Option<String>) -> Result<()> {
    println!("plantbot: ask about plant care. Type 'exit' to quit.");

    let stdin = io::stdin();
    let mut conversation_id = None;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message.eq_ignore_ascii_case("exit") || message.eq_ignore_ascii_case("quit") {
            break;
        }

        match service
            .send_message(message, conversation_id, owner.clone())
            .await
        {
            Ok(reply) => {
                conversation_id = Some(reply.conversation_id);
                println!("{}", reply.response);
                if let Some(error) = reply.error {
                    eprintln!("({})", error);
                }
            }
            Err(e) => eprintln!("Error: {}", e),
        }
    }

    Ok(())
}
