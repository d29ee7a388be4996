//! HTTP + WebSocket API for Choreo
//!
//! Endpoints:
//! - POST /session/new - Create new session
//! - GET /session/{id} - Get session status
//! - POST /session/{id}/event - Apply an input event
//! - POST /session/{id}/frames - Feed frame timing samples
//! - POST /session/{id}/visibility - Suspend/resume telemetry
//! - GET /session/{id}/handoff - Get captured handoff payload
//! - WS /ws/{id} - Live updates
//! - GET /health - Health check

use axum::{
    extract::{
        ws::{Message, WebSocket},
        Path, State, WebSocketUpgrade,
    },
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

use crate::core::{
    ChoreographyEngine, Clock, FrameTelemetry, QualityClassifier, ResolutionController,
    SystemClock,
};
use crate::types::{
    DeviceSignals, HandoffPayload, InputEvent, NormPoint, Phase, PillarRegistry, Tier,
};

/// Session state
pub struct Session {
    pub id: String,
    pub clock: SystemClock,
    pub engine: ChoreographyEngine,
    pub telemetry: FrameTelemetry,
    pub controller: ResolutionController,
    pub tier: Tier,
    pub device_pixel_ratio: f64,
    pub update_tx: broadcast::Sender<SessionUpdate>,
}

/// Live update message
#[derive(Debug, Clone, Serialize)]
pub struct SessionUpdate {
    pub phase: String,
    pub selected_id: Option<String>,
    pub dive_progress: f64,
    pub hold_progress: f64,
    pub scale: f64,
    pub handoff_ready: bool,
}

/// App state
pub struct AppState {
    pub sessions: RwLock<HashMap<String, Session>>,
}

/// Create new session request
#[derive(Debug, Default, Deserialize)]
pub struct NewSessionRequest {
    /// Static capability signals, read once
    pub signals: Option<DeviceSignals>,
    /// Initial device pixel ratio (default 1.0)
    pub device_pixel_ratio: Option<f64>,
    /// Pillar id → tint table
    pub pillars: Option<HashMap<String, String>>,
}

/// Create new session response
#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
    pub websocket_url: String,
    pub tier: Tier,
    pub scale: f64,
}

/// Session status response
#[derive(Debug, Serialize)]
pub struct SessionStatusResponse {
    pub session_id: String,
    pub phase: Phase,
    pub hovered_id: Option<String>,
    pub selected_id: Option<String>,
    pub rupture_origin: Option<NormPoint>,
    pub dive_progress: f64,
    pub hold_progress: f64,
    pub tier: Tier,
    pub scale: f64,
    pub handoff_ready: bool,
    pub update_count: u64,
}

/// Feed frames request
#[derive(Debug, Deserialize)]
pub struct FramesRequest {
    /// Frame durations in milliseconds
    pub samples_ms: Vec<f64>,
    /// Current pixel ratio, if it moved since session creation
    pub device_pixel_ratio: Option<f64>,
}

/// Visibility request
#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub visible: bool,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub sessions_active: usize,
}

/// Create the API router
pub fn create_router() -> Router {
    let state = Arc::new(AppState {
        sessions: RwLock::new(HashMap::new()),
    });

    Router::new()
        .route("/health", get(health))
        .route("/session/new", post(create_session))
        .route("/session/:id", get(get_session))
        .route("/session/:id/event", post(post_event))
        .route("/session/:id/frames", post(post_frames))
        .route("/session/:id/visibility", post(post_visibility))
        .route("/session/:id/handoff", get(get_handoff))
        .route("/ws/:id", get(websocket_handler))
        .with_state(state)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let sessions = state.sessions.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        sessions_active: sessions.len(),
    })
}

/// Create new session
async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(req): Json<NewSessionRequest>,
) -> Result<Json<NewSessionResponse>, StatusCode> {
    let session_id = generate_session_id();
    let (tx, _) = broadcast::channel(100);

    let mut registry = PillarRegistry::new();
    for (id, tint) in req.pillars.unwrap_or_default() {
        registry.insert(id, tint);
    }

    let mut classifier = QualityClassifier::new();
    let tier = classifier.classify(&req.signals.unwrap_or_default());
    let dpr = req.device_pixel_ratio.unwrap_or(1.0);
    let controller = ResolutionController::new(tier, dpr);
    let scale = controller.scale();

    let session = Session {
        id: session_id.clone(),
        clock: SystemClock::new(),
        engine: ChoreographyEngine::new(registry),
        telemetry: FrameTelemetry::new(),
        controller,
        tier,
        device_pixel_ratio: dpr,
        update_tx: tx,
    };

    let mut sessions = state.sessions.write().await;
    sessions.insert(session_id.clone(), session);

    Ok(Json(NewSessionResponse {
        session_id: session_id.clone(),
        websocket_url: format!("/ws/{}", session_id),
        tier,
        scale,
    }))
}

/// Get session status
async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<SessionStatusResponse>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    // Drive pending auto-advance before reporting
    session.engine.tick();
    let output = session.engine.current_output();

    Ok(Json(SessionStatusResponse {
        session_id: id,
        phase: output.phase,
        hovered_id: output.hovered_id,
        selected_id: output.selected_id,
        rupture_origin: output.rupture_origin,
        dive_progress: output.dive_progress,
        hold_progress: output.hold_progress,
        tier: session.tier,
        scale: session.controller.scale(),
        handoff_ready: output.handoff_ready,
        update_count: session.engine.update_count(),
    }))
}

/// Apply an input event to a session
async fn post_event(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(event): Json<InputEvent>,
) -> Result<Json<crate::types::PhaseOutput>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    session.engine.tick();
    let output = session.engine.apply(event);

    broadcast_update(session);
    Ok(Json(output))
}

/// Feed frame timing samples and run one controller update
async fn post_frames(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<FramesRequest>,
) -> Result<Json<crate::types::QualityOutput>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    if let Some(dpr) = req.device_pixel_ratio {
        session.device_pixel_ratio = dpr;
    }
    for sample in req.samples_ms {
        session.telemetry.record_sample(sample);
    }

    // Ceiling re-derived from the tier and the *current* pixel ratio
    let ceiling = session.tier.max_scale(session.device_pixel_ratio);
    let history = session.telemetry.history_vec();
    let now = session.clock.now_ms();
    let output = session.controller.update(&history, now, ceiling);

    broadcast_update(session);
    Ok(Json(output))
}

/// Suspend or resume telemetry sampling with context visibility
async fn post_visibility(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<VisibilityRequest>,
) -> Result<StatusCode, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    session.telemetry.set_visible(req.visible);
    Ok(StatusCode::NO_CONTENT)
}

/// Get the captured handoff payload for a session
async fn get_handoff(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<HandoffPayload>, StatusCode> {
    let mut sessions = state.sessions.write().await;
    let session = sessions.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;

    session.engine.tick();
    let payload = session.engine.handoff().ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(payload.clone()))
}

/// WebSocket handler for live updates
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    ws: WebSocketUpgrade,
) -> Result<impl IntoResponse, StatusCode> {
    let sessions = state.sessions.read().await;
    let session = sessions.get(&id).ok_or(StatusCode::NOT_FOUND)?;
    let rx = session.update_tx.subscribe();
    drop(sessions);

    Ok(ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    }))
}

/// Handle WebSocket connection
async fn handle_websocket(socket: WebSocket, mut rx: broadcast::Receiver<SessionUpdate>) {
    let (mut sender, mut receiver) = socket.split();
    loop {
        tokio::select! {
            update = rx.recv() => {
                let Ok(update) = update else { break };
                let json = serde_json::to_string(&update).unwrap_or_default();
                if sender.send(Message::Text(json)).await.is_err() {
                    break;
                }
            }
            msg = receiver.next() => {
                // Client messages carry nothing; close or error ends the stream
                match msg {
                    Some(Ok(_)) => {}
                    _ => break,
                }
            }
        }
    }
}

/// Send the current session snapshot to websocket listeners
fn broadcast_update(session: &Session) {
    let update = SessionUpdate {
        phase: session.engine.phase().to_string(),
        selected_id: session.engine.state().selected_id.clone(),
        dive_progress: session.engine.dive_progress(),
        hold_progress: session.engine.hold_progress(),
        scale: session.controller.scale(),
        handoff_ready: session.engine.handoff().is_some(),
    };
    let _ = session.update_tx.send(update);
}

/// Generate session ID
fn generate_session_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("session_{:x}", nanos as u64)
}

/// Run the API server
pub async fn run_server(addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = create_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("🌀 Choreo API running on {}", addr);
    println!("  POST /session/new             - Create session");
    println!("  GET  /session/:id             - Get status");
    println!("  POST /session/:id/event       - Apply input event");
    println!("  POST /session/:id/frames      - Feed frame samples");
    println!("  POST /session/:id/visibility  - Suspend/resume telemetry");
    println!("  GET  /session/:id/handoff     - Get handoff payload");
    println!("  WS   /ws/:id                  - Live updates");
    println!("  GET  /health                  - Health check");
    axum::serve(listener, router).await?;
    Ok(())
}
