use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use ghl_mcp_core::config::{AllowedOrigins, AppConfig};
use ghl_mcp_core::{DESCRIPTION, DISPLAY_NAME, SERVER_NAME, VERSION};
use ghl_mcp_tools::registry::{DispatchError, ToolRegistry};
use ghl_mcp_tools::resources::{list_resources, read_resource};
use ghl_mcp_tools::ToolInvocationResult;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
struct AppState {
    registry: Arc<ToolRegistry>,
}

pub struct Gateway {
    registry: Arc<ToolRegistry>,
    bind_addr: String,
    allowed_origins: AllowedOrigins,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    server: &'static str,
}

/// Body of `POST /tools/{tool_name}`. The path decides which tool runs.
#[derive(Deserialize)]
struct CallToolRequest {
    #[serde(default)]
    arguments: Map<String, Value>,
}

#[derive(Deserialize)]
struct McpCallToolRequest {
    tool_name: String,
    #[serde(default)]
    arguments: Map<String, Value>,
}

#[derive(Deserialize)]
struct ReadResourceRequest {
    uri: String,
}

type ApiError = (StatusCode, Json<Value>);

fn not_found(detail: String) -> ApiError {
    (StatusCode::NOT_FOUND, Json(json!({ "detail": detail })))
}

impl Gateway {
    pub fn new(config: &AppConfig, registry: Arc<ToolRegistry>) -> Self {
        Self {
            registry,
            bind_addr: config.bind_addr(),
            allowed_origins: config.allowed_origins(),
        }
    }

    pub fn router(&self) -> Router {
        router(self.registry.clone(), &self.allowed_origins)
    }

    pub async fn start(&self) -> anyhow::Result<()> {
        let app = self.router();

        let listener = TcpListener::bind(self.bind_addr.as_str()).await?;
        info!("Gateway listening on {}", listener.local_addr()?);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Gateway stopped");
        Ok(())
    }
}

pub fn router(registry: Arc<ToolRegistry>, allowed_origins: &AllowedOrigins) -> Router {
    let state = AppState { registry };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/tools", get(list_tools))
        .route("/tools/:tool_name", post(call_tool))
        .route("/mcp/call_tool", post(mcp_call_tool))
        .route("/mcp/list_tools", get(mcp_list_tools))
        .route("/mcp/list_resources", get(mcp_list_resources))
        .route("/mcp/read_resource", post(mcp_read_resource))
        .layer(cors_layer(allowed_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(allowed: &AllowedOrigins) -> CorsLayer {
    match allowed {
        AllowedOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        AllowedOrigins::List(origins) => {
            let origins: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|o| match HeaderValue::from_str(o) {
                    Ok(v) => Some(v),
                    Err(_) => {
                        warn!(origin = %o, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            // Credentials rule out wildcards, so methods and headers mirror the request.
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(AllowMethods::mirror_request())
                .allow_headers(AllowHeaders::mirror_request())
                .allow_credentials(true)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn root(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "name": DISPLAY_NAME,
        "version": VERSION,
        "description": DESCRIPTION,
        "available_tools": state.registry.names(),
        "status": "running",
    }))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        server: SERVER_NAME,
    })
}

async fn list_tools(State(state): State<AppState>) -> Json<Value> {
    let tools: Vec<Value> = state
        .registry
        .descriptors()
        .iter()
        .map(|d| d.to_listing())
        .collect();
    Json(json!({ "tools": tools }))
}

async fn dispatch(
    state: &AppState,
    tool_name: &str,
    arguments: Map<String, Value>,
) -> Result<Json<ToolInvocationResult>, ApiError> {
    match state.registry.invoke(tool_name, arguments).await {
        Ok(result) => Ok(Json(result)),
        Err(e @ DispatchError::ToolNotFound(_)) => Err(not_found(e.to_string())),
    }
}

/// An unknown name is a 404 whatever the body looks like.
async fn call_tool(
    State(state): State<AppState>,
    Path(tool_name): Path<String>,
    body: Result<Json<CallToolRequest>, JsonRejection>,
) -> Result<Json<ToolInvocationResult>, Response> {
    if !state.registry.contains(&tool_name) {
        warn!(tool = %tool_name, "Unknown tool requested");
        return Err(not_found(format!("Tool '{}' not found", tool_name)).into_response());
    }
    let Json(req) = body.map_err(IntoResponse::into_response)?;
    dispatch(&state, &tool_name, req.arguments)
        .await
        .map_err(IntoResponse::into_response)
}

async fn mcp_call_tool(
    State(state): State<AppState>,
    Json(req): Json<McpCallToolRequest>,
) -> Result<Json<ToolInvocationResult>, ApiError> {
    dispatch(&state, &req.tool_name, req.arguments).await
}

async fn mcp_list_tools(State(state): State<AppState>) -> Json<Value> {
    let tools: Vec<Value> = state
        .registry
        .descriptors()
        .iter()
        .map(|d| d.to_mcp())
        .collect();
    Json(json!({ "tools": tools }))
}

async fn mcp_list_resources() -> Json<Value> {
    Json(json!({ "resources": list_resources() }))
}

async fn mcp_read_resource(Json(req): Json<ReadResourceRequest>) -> Result<Json<Value>, ApiError> {
    let text = read_resource(&req.uri).map_err(|e| not_found(e.to_string()))?;
    Ok(Json(json!({ "uri": req.uri, "text": text })))
}
