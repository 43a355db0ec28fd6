use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use app::api::{self, ApiState, handlers::progress::ProgressResponse};
use app::config::{
    DEFAULT_BIND, DEFAULT_DATA_DIR, DEFAULT_DB_URL, DEFAULT_LOG_FILTER, ProgressMode,
    normalize_sqlite_url, prepare_sqlite_file,
};
use clap::{Parser, Subcommand};
use learn_core::model::LessonId;
use services::AppServices;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "app", about = "Self-hosted learning site")]
struct Cli {
    /// SQLite database URL
    #[arg(long = "db", env = "LEARN_DB_URL", default_value = DEFAULT_DB_URL, global = true)]
    db_url: String,

    /// Where lesson completion is stored
    #[arg(long, env = "LEARN_PROGRESS", value_enum, default_value_t = ProgressMode::Local, global = true)]
    progress: ProgressMode,

    /// Directory for the local progress record
    #[arg(long, env = "LEARN_DATA_DIR", default_value = DEFAULT_DATA_DIR, global = true)]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Address to bind
        #[arg(long, env = "LEARN_BIND", default_value = DEFAULT_BIND)]
        bind: String,
    },
    /// Replace the curriculum with the starter module and clear progress
    ///
    /// A server that is already running keeps its cached module list until a
    /// request for a removed lesson misses, then reloads it.
    Seed,
    /// Inspect or change lesson progress
    Progress {
        #[command(subcommand)]
        action: ProgressAction,
    },
}

#[derive(Subcommand)]
enum ProgressAction {
    /// Print progress as JSON
    Show,
    /// Mark a lesson as completed
    Complete { id: LessonId },
    /// Mark a lesson as not completed
    Incomplete { id: LessonId },
    /// Forget all completed lessons
    Reset,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let db_url = normalize_sqlite_url(&cli.db_url);
    prepare_sqlite_file(&db_url)?;
    let services = AppServices::new_sqlite(&db_url, cli.progress.backend(&cli.data_dir))
        .await
        .with_context(|| format!("failed to open {db_url}"))?;

    match cli.command {
        None => serve(services, DEFAULT_BIND).await,
        Some(Commands::Serve { bind }) => serve(services, &bind).await,
        Some(Commands::Seed) => {
            let report = services.seed().await?;
            println!(
                "Seeded \"{}\" (module {}) with {} lessons",
                storage::seed::MODULE_TITLE,
                report.module_id,
                report.lesson_count()
            );
            for id in &report.lesson_ids {
                println!("  lesson {id}");
            }
            Ok(())
        }
        Some(Commands::Progress { action }) => progress(&services, action).await,
    }
}

async fn serve(services: AppServices, bind: &str) -> anyhow::Result<()> {
    let state = Arc::new(ApiState::new(services));
    api::serve(state, bind).await
}

async fn progress(services: &AppServices, action: ProgressAction) -> anyhow::Result<()> {
    let tracker = services.progress();
    let mut tracker = tracker.write().await;

    match action {
        ProgressAction::Show => {}
        ProgressAction::Complete { id } => {
            match services.content().get_lesson(id).await {
                Ok(_) => {}
                Err(e) if e.is_not_found() => anyhow::bail!("lesson {id} not found"),
                Err(e) => return Err(e.into()),
            }
            tracker.mark_complete(id).await?;
        }
        ProgressAction::Incomplete { id } => {
            tracker.mark_incomplete(id).await?;
        }
        ProgressAction::Reset => tracker.reset().await?,
    }

    let modules = services.content().list_modules().await?;
    let response = ProgressResponse::from_tracker(&tracker, &modules);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
