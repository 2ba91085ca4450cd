//! parley - entry point.
//!
//! Startup order:
//! 1. Load and validate configuration from the environment.
//! 2. Initialise tracing (JSON in production, human-readable otherwise,
//!    plus an optional daily-rolling log file).
//! 3. Open the message store selected by `database.backend`.
//! 4. Build the response generator selected by `ai.generator`.
//! 5. Wire the conversation service and serve the router until shutdown.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use parley::adapters::http::{app_router, ChatAppState};
use parley::adapters::{
    CannedResponseGenerator, InMemoryMessageStore, MarkupStripper, OpenAIConfig,
    OpenAIResponseGenerator, PostgresMessageStore,
};
use parley::application::{ConversationService, RetentionPolicy};
use parley::config::{
    AiConfig, AppConfig, ConfigError, DatabaseConfig, GeneratorKind, ServerConfig,
    StorageBackend,
};
use parley::domain::foundation::ValidationError;
use parley::ports::{GenerationError, MessageStore, ResponseGenerator, StoreError};

/// Failures that abort startup or end the server.
#[derive(Debug, Error)]
enum StartupError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] parley::config::ValidationError),

    #[error("retention policy: {0}")]
    Retention(#[from] ValidationError),

    #[error("log filter: {0}")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),

    #[error("log file: {0}")]
    LogFile(#[from] tracing_appender::rolling::InitError),

    #[error("tracing already initialised: {0}")]
    Tracing(#[from] tracing_subscriber::util::TryInitError),

    #[error("message store: {0}")]
    Store(#[from] StoreError),

    #[error("response generator: {0}")]
    Generator(#[from] GenerationError),

    #[error("server: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    let _log_guard = init_tracing(&config.server)?;
    info!(version = env!("CARGO_PKG_VERSION"), "parley starting");

    let store = open_store(&config.database).await?;
    let generator = build_generator(&config.ai)?;
    let retention = RetentionPolicy::new(config.chat.max_messages)?;
    info!(
        generator = generator.name(),
        max_messages = retention.max_messages(),
        "conversation service ready"
    );

    let service = ConversationService::new(
        store,
        generator,
        Arc::new(MarkupStripper::new()),
        retention,
    );
    let app = app_router(ChatAppState::new(Arc::new(service)), &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("parley stopped");
    Ok(())
}

/// Installs the global subscriber.
///
/// The returned guard flushes the log file on drop and must live as long
/// as the process.
fn init_tracing(config: &ServerConfig) -> Result<Option<WorkerGuard>, StartupError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)?,
    };

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let (writer, guard) = tracing_appender::non_blocking(file_appender(path)?);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);
    if config.is_production() {
        registry
            .with(fmt::layer().json().with_target(true).with_thread_ids(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }

    Ok(guard)
}

fn file_appender(path: &str) -> Result<RollingFileAppender, StartupError> {
    let path = Path::new(path);
    let directory = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let prefix = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "parley.log".to_string());

    Ok(RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .build(directory)?)
}

async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn MessageStore>, StartupError> {
    match config.backend {
        StorageBackend::Memory => {
            warn!("using in-memory message store; history is lost on restart");
            Ok(Arc::new(InMemoryMessageStore::new()))
        }
        StorageBackend::Postgres => {
            let store = PostgresMessageStore::connect(config).await?;
            info!("database connection established");
            Ok(Arc::new(store))
        }
    }
}

fn build_generator(config: &AiConfig) -> Result<Arc<dyn ResponseGenerator>, StartupError> {
    match config.generator {
        GeneratorKind::Canned => Ok(Arc::new(CannedResponseGenerator::new())),
        GeneratorKind::OpenAI => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or(parley::config::ValidationError::MissingRequired("OPENAI_API_KEY"))?;
            let openai = OpenAIConfig::new(api_key)
                .with_model(config.model.clone())
                .with_base_url(config.base_url.clone())
                .with_timeout(config.timeout());
            Ok(Arc::new(OpenAIResponseGenerator::new(openai)?))
        }
    }
}

/// Resolves when SIGINT (Ctrl-C) or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to install CTRL+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received; starting graceful shutdown");
}
