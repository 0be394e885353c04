use std::{collections::HashMap, net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    AllocationOutcome, AvailabilityConfig, DistributionError, DistributionResult, MemberWeight,
    SchedulableTask, TaskStatus, WeeklyAvailability, WeeklyPlan, allocate, distribute,
    sort_for_allocation,
};

/// In-memory per-user records the service layer keeps between calls: the
/// raw availability strings and the last generated plan.
#[derive(Default)]
struct UserStore {
    availability: HashMap<i32, AvailabilityConfig>,
    plans: HashMap<i32, WeeklyPlan>,
}

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<UserStore>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(UserStore::default())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    NotFound(String),
    Invalid(String),
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl From<DistributionError> for ApiError {
    fn from(value: DistributionError) -> Self {
        ApiError::Invalid(value.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NotFound(message) => {
                let body = Json(ErrorBody {
                    error: "not_found",
                    message,
                });
                (StatusCode::NOT_FOUND, body).into_response()
            }
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/availability/:user_id",
            get(get_availability).put(put_availability),
        )
        .route("/plan/generate", post(generate_plan))
        .route("/plan/:user_id", get(get_plan))
        .route("/distribute", post(distribute_tasks))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr) -> std::io::Result<()> {
    let app = router(AppState::new());
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_availability(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<AvailabilityConfig>, ApiError> {
    let store = state.store.read();
    store
        .availability
        .get(&user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no availability stored for user {user_id}")))
}

async fn put_availability(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(config): Json<AvailabilityConfig>,
) -> Json<AvailabilityConfig> {
    let mut store = state.store.write();
    store.availability.insert(user_id, config.clone());
    Json(config)
}

#[derive(Debug, Deserialize)]
struct GeneratePlanPayload {
    #[serde(default)]
    user_id: Option<i32>,
    tasks: Vec<SchedulableTask>,
    #[serde(default)]
    availability: Option<AvailabilityConfig>,
}

#[derive(Debug, Serialize)]
struct GeneratePlanResponse {
    plan: WeeklyPlan,
    unassigned_tasks: Vec<String>,
}

async fn generate_plan(
    State(state): State<AppState>,
    Json(payload): Json<GeneratePlanPayload>,
) -> Result<Json<GeneratePlanResponse>, ApiError> {
    let config = match payload.availability {
        Some(config) => config,
        None => {
            let user_id = payload
                .user_id
                .ok_or_else(|| ApiError::invalid("either availability or user_id is required"))?;
            let store = state.store.read();
            store.availability.get(&user_id).cloned().ok_or_else(|| {
                ApiError::not_found(format!("no availability stored for user {user_id}"))
            })?
        }
    };

    // The engine expects the caller to pre-filter and pre-sort; that caller
    // is this handler.
    let mut tasks: Vec<SchedulableTask> = payload
        .tasks
        .into_iter()
        .filter(|task| task.status == TaskStatus::InProgress)
        .collect();
    sort_for_allocation(&mut tasks);

    let mut availability = WeeklyAvailability::from_config(&config);
    let AllocationOutcome { plan, unassigned } = allocate(&tasks, &mut availability);
    tracing::debug!(
        tasks = tasks.len(),
        chunks = plan.total_assignments(),
        unassigned = unassigned.len(),
        "generated weekly plan"
    );

    if let Some(user_id) = payload.user_id {
        let mut store = state.store.write();
        store.plans.insert(user_id, plan.clone());
    }

    Ok(Json(GeneratePlanResponse {
        plan,
        unassigned_tasks: unassigned,
    }))
}

async fn get_plan(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
) -> Result<Json<WeeklyPlan>, ApiError> {
    let store = state.store.read();
    store
        .plans
        .get(&user_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::not_found(format!("no plan stored for user {user_id}")))
}

#[derive(Debug, Deserialize)]
struct DistributePayload {
    tasks: Vec<SchedulableTask>,
    members: Vec<MemberWeight>,
}

async fn distribute_tasks(
    Json(payload): Json<DistributePayload>,
) -> Result<Json<DistributionResult>, ApiError> {
    let now = chrono::Utc::now().naive_utc();
    let result = distribute(&payload.tasks, &payload.members, now)?;
    tracing::debug!(
        tasks = result.len(),
        members = payload.members.len(),
        "distributed group tasks"
    );
    Ok(Json(result))
}
