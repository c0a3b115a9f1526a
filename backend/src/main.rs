use axum::{
    extract::ws::{Message, WebSocket, WebSocketUpgrade},
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tributary_core::{TributaryConfig, TributaryError, TributaryInput, TributaryReport};
use uuid::Uuid;

/// Format an error as a JSON message for the frontend
fn format_error(code: &str, message: &str, severity: &str) -> String {
    format!("ERROR_UPDATE:{}", json!({
        "code": code,
        "message": message,
        "severity": severity
    }))
}

/// Stable machine-readable code for a pipeline error.
fn error_code(err: &TributaryError) -> &'static str {
    match err {
        TributaryError::NoClosedBoundary { .. } => "NO_CLOSED_BOUNDARY",
        TributaryError::InvalidInput(_) => "INVALID_INPUT",
        TributaryError::InvalidConfig(_) => "INVALID_CONFIG",
        TributaryError::Malformed(_) => "MALFORMED_INPUT",
        TributaryError::Kernel(_) => "KERNEL_ERROR",
    }
}

// Application State
struct AppState {
    /// Configuration every new session starts from
    defaults: TributaryConfig,
}

/// Per-connection state.
#[derive(Default)]
struct Session {
    input: Option<TributaryInput>,
    config: TributaryConfig,
    report: Option<(Uuid, TributaryReport)>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let shared_state = Arc::new(AppState {
        defaults: TributaryConfig::default(),
    });

    let app = Router::new()
        .route("/", get(root))
        .route("/ws", get(ws_handler))
        .route("/api/tributary", post(compute_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(shared_state);

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn root() -> &'static str {
    "Tributary area service"
}

/// Run the pipeline on the blocking pool.
async fn compute(input: TributaryInput, config: TributaryConfig) -> Result<TributaryReport, (String, String)> {
    match tokio::task::spawn_blocking(move || tributary_core::run(&input, &config)).await {
        Ok(Ok(report)) => Ok(report),
        Ok(Err(e)) => Err((error_code(&e).to_string(), e.to_string())),
        Err(e) => Err(("INTERNAL".to_string(), format!("Tributary task failed: {}", e))),
    }
}

#[derive(Deserialize)]
struct TributaryRequest {
    input: TributaryInput,
    #[serde(default)]
    config: Option<TributaryConfig>,
}

async fn compute_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TributaryRequest>,
) -> Result<Json<TributaryReport>, (StatusCode, Json<Value>)> {
    let config = request.config.unwrap_or_else(|| state.defaults.clone());
    match compute(request.input, config).await {
        Ok(report) => {
            info!(
                "HTTP run: {} regions, slab area {:.3}",
                report.regions.len(),
                report.diagnostics.slab_area
            );
            Ok(Json(report))
        }
        Err((code, message)) => {
            warn!("HTTP run failed: {}", message);
            let status = if code == "INTERNAL" {
                StatusCode::INTERNAL_SERVER_ERROR
            } else {
                StatusCode::UNPROCESSABLE_ENTITY
            };
            Err((status, Json(json!({ "code": code, "message": message }))))
        }
    }
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Messages describing a finished run.
fn report_messages(run_id: &Uuid, report: &TributaryReport) -> Vec<String> {
    let regions = json!({ "run_id": run_id, "regions": report.regions });
    let ranking = json!({
        "run_id": run_id,
        "unit": report.unit,
        "ranking": report.ranking,
        "summary": report.summary_lines(),
    });
    let diagnostics = json!({
        "run_id": run_id,
        "outline": report.outline,
        "envelope": report.envelope,
        "diagnostics": report.diagnostics,
    });
    vec![
        format!("REGIONS_UPDATE:{}", regions),
        format!("RANKING_UPDATE:{}", ranking),
        format!("DIAGNOSTICS_UPDATE:{}", diagnostics),
    ]
}

async fn send_all(socket: &mut WebSocket, messages: Vec<String>) -> bool {
    for msg in messages {
        if socket.send(Message::Text(msg)).await.is_err() {
            return false;
        }
    }
    true
}

async fn handle_socket(mut socket: WebSocket, state: Arc<AppState>) {
    info!("Client connected");

    let session = Arc::new(RwLock::new(Session {
        config: state.defaults.clone(),
        ..Default::default()
    }));

    // Send initial configuration
    {
        let json = serde_json::to_string(&session.read().await.config).unwrap_or("{}".to_string());
        if socket.send(Message::Text(format!("CONFIG_UPDATE:{}", json))).await.is_err() {
            return;
        }
    }

    while let Some(msg) = socket.recv().await {
        let msg = if let Ok(msg) = msg {
            msg
        } else {
            return;
        };

        if let Message::Text(text) = msg {
            info!("Received message: {}", text.chars().take(80).collect::<String>());

            if text.starts_with("LOAD_INPUT:") {
                let json_str = text.trim_start_matches("LOAD_INPUT:");
                match TributaryInput::from_json(json_str) {
                    Ok(input) => {
                        let summary = json!({
                            "points": input.points.len(),
                            "boundaries": input.boundaries.len(),
                        });
                        info!("Loaded {} points, {} boundary primitives", input.points.len(), input.boundaries.len());
                        {
                            let mut session = session.write().await;
                            session.input = Some(input);
                            session.report = None;
                        }
                        if socket.send(Message::Text(format!("INPUT_UPDATE:{}", summary))).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("Failed to parse input: {}", e);
                        let error_msg = format_error(error_code(&e), &e.to_string(), "error");
                        let _ = socket.send(Message::Text(error_msg)).await;
                    }
                }

            } else if text.starts_with("SET_CONFIG:") {
                let json_str = text.trim_start_matches("SET_CONFIG:");
                let parsed = serde_json::from_str::<TributaryConfig>(json_str)
                    .map_err(TributaryError::from)
                    .and_then(|config| config.validate().map(|_| config));
                match parsed {
                    Ok(config) => {
                        let json = serde_json::to_string(&config).unwrap_or("{}".to_string());
                        {
                            let mut session = session.write().await;
                            session.config = config;
                            session.report = None;
                        }
                        info!("Configuration updated");
                        if socket.send(Message::Text(format!("CONFIG_UPDATE:{}", json))).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("Rejected configuration: {}", e);
                        let error_msg = format_error(error_code(&e), &e.to_string(), "error");
                        let _ = socket.send(Message::Text(error_msg)).await;
                    }
                }

            } else if text == "COMPUTE" {
                let (input, config) = {
                    let session = session.read().await;
                    (session.input.clone(), session.config.clone())
                };
                let Some(input) = input else {
                    let error_msg = format_error("NO_INPUT", "Load input with LOAD_INPUT before COMPUTE", "warning");
                    let _ = socket.send(Message::Text(error_msg)).await;
                    continue;
                };

                let run_id = Uuid::new_v4();
                info!("Starting run {}", run_id);
                match compute(input, config).await {
                    Ok(report) => {
                        info!(
                            "Run {} finished: {} regions, partition error {:.3e}",
                            run_id,
                            report.regions.len(),
                            report.diagnostics.partition_error
                        );
                        let messages = report_messages(&run_id, &report);
                        session.write().await.report = Some((run_id, report));
                        if !send_all(&mut socket, messages).await {
                            return;
                        }
                    }
                    Err((code, message)) => {
                        warn!("Run {} failed: {}", run_id, message);
                        let error_msg = format_error(&code, &message, "error");
                        let _ = socket.send(Message::Text(error_msg)).await;
                    }
                }

            } else if text == "GET_REPORT" {
                let messages = {
                    let session = session.read().await;
                    session
                        .report
                        .as_ref()
                        .map(|(run_id, report)| report_messages(run_id, report))
                };
                match messages {
                    Some(messages) => {
                        if !send_all(&mut socket, messages).await {
                            return;
                        }
                    }
                    None => {
                        let error_msg = format_error("NO_REPORT", "No finished run in this session", "warning");
                        let _ = socket.send(Message::Text(error_msg)).await;
                    }
                }

            } else {
                warn!("Unknown command: {}", text.chars().take(40).collect::<String>());
                let error_msg = format_error("UNKNOWN_COMMAND", "Unknown command", "warning");
                let _ = socket.send(Message::Text(error_msg)).await;
            }
        }
    }

    info!("Client disconnected");
}
