//! Axum-based gateway for Electra Bot. Config-driven via CoreConfig.

mod handlers;

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Router,
};
use axum::http::Method;
use electra_core::{CoreConfig, Engine, FallbackProvider, KnowledgeBase, Role};
use electra_skills::ModelRouter;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::field::Visit;
use tracing_subscriber::layer::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Captures the "message" field from a tracing event.
struct MessageCollector<'a>(&'a mut String);

impl Visit for MessageCollector<'_> {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            *self.0 = value.to_string();
        }
    }
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            *self.0 = format!("{:?}", value);
        }
    }
}

/// Sends each tracing event as a line to a broadcast channel for SSE log streaming.
#[derive(Clone)]
struct LogBroadcastLayer {
    tx: broadcast::Sender<String>,
}

impl<S> tracing_subscriber::Layer<S> for LogBroadcastLayer
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        event.record(&mut MessageCollector(&mut message));
        let line = format!(
            "{} [{}] {}",
            event.metadata().level(),
            event.metadata().target(),
            message
        );
        // No subscribers is the common case.
        let _ = self.tx.send(line);
    }
}

/// Pre-flight check: config loads, knowledge base parses, port is available.
fn run_verify() -> Result<(), String> {
    let config = CoreConfig::load().map_err(|e| format!("Config load failed: {}", e))?;

    print!("Checking knowledge base {}... ", config.knowledge_path);
    let kb = KnowledgeBase::load(&config.knowledge_path).map_err(|e| e.to_string())?;
    println!(
        "OK ({} categories, {} past events, {} upcoming, {} roles assigned)",
        kb.categories.len(),
        kb.events.past.len(),
        kb.events.upcoming.len(),
        kb.members.assigned_count()
    );

    let port = config.port;
    print!("Checking port {}... ", port);
    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], port));
    match std::net::TcpListener::bind(addr) {
        Ok(listener) => {
            drop(listener);
            println!("OK (available)");
        }
        Err(e) => {
            return Err(format!("Port {} BLOCKED: {}", port, e));
        }
    }

    println!("\nSUCCESS: Ready to start {}.", config.app_name);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[electra-gateway] .env not loaded: {} (using system environment)", e);
    }

    if std::env::args().any(|a| a == "--verify") {
        match run_verify() {
            Ok(()) => std::process::exit(0),
            Err(e) => {
                eprintln!("PRE-FLIGHT FAILED: {}", e);
                std::process::exit(1);
            }
        }
    }

    let (log_tx, _) = broadcast::channel(1000);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(LogBroadcastLayer { tx: log_tx.clone() })
        .init();

    let config = Arc::new(CoreConfig::load()?);
    let knowledge = Arc::new(KnowledgeBase::load(&config.knowledge_path)?);
    tracing::info!(
        path = %config.knowledge_path,
        roles_assigned = knowledge.members.assigned_count(),
        "Knowledge base loaded"
    );

    let fallback: Arc<dyn FallbackProvider> = Arc::new(ModelRouter::from_config(&config)?);
    tracing::info!(
        mode = %config.llm_mode,
        model = %config.llm_model,
        url = %config.llm_api_url,
        "Fallback provider ready"
    );

    let app = build_app(AppState {
        config: Arc::clone(&config),
        engine: Arc::new(Engine::new(knowledge)),
        fallback,
        log_tx,
    });

    let addr = std::net::SocketAddr::from(([127, 0, 0, 1], config.port));
    tracing::info!("{} running at http://{}", config.app_name, addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn frontend_root_dir(config: &CoreConfig) -> PathBuf {
    // Relative paths resolve against the working directory first, then the workspace root.
    let configured = PathBuf::from(&config.frontend_dir);
    if configured.is_absolute() || configured.exists() {
        return configured;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join(configured)
}

fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    let frontend_enabled = state.config.frontend_enabled;
    let frontend_dir = frontend_root_dir(&state.config);

    let mut app = Router::new()
        .route("/chat", post(handlers::chat::chat))
        .route("/voice", post(handlers::chat::voice))
        .route("/v1/status", get(status))
        .route("/api/v1/health", get(health))
        .route("/api/v1/logs", get(logs_stream))
        .with_state(state);

    if frontend_enabled {
        // `/` -> index.html; every other unmatched path is looked up as a static file.
        app = app
            .route_service("/", ServeFile::new(frontend_dir.join("index.html")))
            .fallback_service(ServeDir::new(frontend_dir));
    }

    app.layer(cors)
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) engine: Arc<Engine>,
    pub(crate) fallback: Arc<dyn FallbackProvider>,
    pub(crate) log_tx: broadcast::Sender<String>,
}

/// GET /api/v1/health – liveness check for UI and scripts.
async fn health() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({ "status": "ok" }))
}

/// GET /v1/status – app identity, fallback mode, and knowledge base summary.
async fn status(State(state): State<AppState>) -> axum::Json<serde_json::Value> {
    let kb = state.engine.knowledge();
    let unassigned: Vec<&str> = Role::all()
        .into_iter()
        .filter(|r| kb.members.get(*r).map_or(true, |n| n.trim().is_empty()))
        .map(|r| r.key())
        .collect();
    axum::Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "llm_mode": state.config.llm_mode,
        "fallback": state.fallback.name(),
        "knowledge": {
            "categories": kb.categories.len(),
            "past_events": kb.events.past.len(),
            "upcoming_events": kb.events.upcoming.len(),
            "roles_assigned": kb.members.assigned_count(),
            "unassigned_roles": unassigned,
        },
    }))
}

/// GET /api/v1/logs – Server-Sent Events stream of gateway logs (tracing output).
async fn logs_stream(
    State(state): State<AppState>,
) -> Sse<impl futures_util::Stream<Item = Result<Event, std::convert::Infallible>> + Send + 'static> {
    use async_stream::stream;
    let mut rx = state.log_tx.subscribe();
    let stream = stream! {
        loop {
            match rx.recv().await {
                Ok(line) => yield Ok(Event::default().data(line)),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    yield Ok(Event::default().data(format!("... {} log lines dropped", n)));
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    };
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keepalive"),
    )
}
