// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;
mod notify;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use leave_engine_api::{
    ApiError, AuditEventInfo, AuthenticatedActor, BalanceInfo, CategoryInfo,
    CreateCategoryRequest, CreateEmployeeRequest, CreateOrganizationRequest, CreatePolicyRequest,
    DecideLeaveRequest, EmployeeInfo, EngineConfig, LeaveRequestInfo, LeaveTransitionResponse,
    ListBalancesResponse, ListLeaveRequestsResponse, OrganizationInfo, PolicyInfo,
    PreviewDurationRequest, PreviewDurationResponse, Role, RolloverReport, RolloverRequest,
    SetActiveRequest, SubmitLeaveRequest, cancel_leave_request, create_category, create_employee,
    create_organization, create_policy, decide_leave_request, get_balance, get_leave_request,
    list_balances, list_employee_audit_events, list_leave_requests, list_request_audit_events,
    preview_duration, run_annual_rollover, set_category_active, set_employee_active,
    submit_leave_request,
};
use leave_engine_audit::Cause;
use leave_engine_persistence::Persistence;
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use notify::BackgroundNotifier;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Leave Engine Server - HTTP server for leave accounting and approval
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// How many times an operation is retried after a busy or locked database
    #[arg(long = "max-retries", default_value_t = leave_engine_api::DEFAULT_MAX_TRANSIENT_RETRIES)]
    max_retries: u32,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, one connection shared by all handlers.
    persistence: Arc<Mutex<Persistence>>,
    /// Engine tunables.
    config: EngineConfig,
    /// Live event stream.
    live: Arc<LiveEventBroadcaster>,
    /// Delivers decision notices to the live stream off the request path.
    notifier: BackgroundNotifier,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.live)
    }
}

/// Who is acting and why, carried by every mutating request.
///
/// Authentication happens upstream; the server trusts these fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorContext {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// API request for submitting leave.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct SubmitLeaveApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    #[serde(flatten)]
    request: SubmitLeaveRequest,
}

/// API request for deciding a leave request.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DecideLeaveApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    #[serde(flatten)]
    request: DecideLeaveRequest,
}

/// API request for running the annual rollover.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RolloverApiRequest {
    #[serde(flatten)]
    context: ActorContext,
    #[serde(flatten)]
    request: RolloverRequest,
}

/// Query parameters selecting a ledger year.
#[derive(Debug, Clone, Copy, Deserialize)]
struct YearQuery {
    /// The ledger year.
    year: i32,
}

/// Generic write response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Whether the operation succeeded.
    success: bool,
    /// A human-readable message.
    message: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Stable error kind for programmatic handling.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// Stable error kind.
    kind: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, kind): (StatusCode, &'static str) = match &err {
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::PolicyViolation { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "policy_violation")
            }
            ApiError::InsufficientBalance { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "insufficient_balance")
            }
            ApiError::StateConflict { .. } => (StatusCode::CONFLICT, "state_conflict"),
            ApiError::ResourceNotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::Transient { .. } => (StatusCode::SERVICE_UNAVAILABLE, "transient"),
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        Self {
            status,
            kind,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "employee" => Ok(Role::Employee),
        "manager" => Ok(Role::Manager),
        "admin" | "administrator" => Ok(Role::Administrator),
        "system" => Ok(Role::System),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            kind: "invalid_input",
            message: format!(
                "Invalid role: '{role_str}'. Must be 'employee', 'manager', 'administrator' or 'system'"
            ),
        }),
    }
}

/// Splits an actor context into the actor and the audit cause.
fn actor_and_cause(context: ActorContext) -> Result<(AuthenticatedActor, Cause), HttpError> {
    let role: Role = parse_role(&context.actor_role)?;
    Ok((
        AuthenticatedActor::new(context.actor_id, role),
        Cause::new(context.cause_id, context.cause_description),
    ))
}

// ============================================================================
// Leave requests
// ============================================================================

/// Handler for POST `/leave_requests` endpoint.
async fn handle_submit_leave(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SubmitLeaveApiRequest>,
) -> Result<Json<LeaveTransitionResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        employee_id = req.request.employee_id,
        category_id = req.request.category_id,
        "Handling submit_leave request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = actor_and_cause(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveTransitionResponse = submit_leave_request(
        &mut persistence,
        &app_state.config,
        &req.request,
        &actor,
        &cause,
    )?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::LeaveSubmitted {
        request_id: response.request.request_id,
        employee_id: response.request.employee_id,
        total_days: response.request.total_days,
    });

    Ok(Json(response))
}

/// Handler for GET `/leave_requests/{request_id}` endpoint.
async fn handle_get_leave_request(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
) -> Result<Json<LeaveRequestInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveRequestInfo = get_leave_request(&mut persistence, request_id)?;
    Ok(Json(response))
}

/// Handler for POST `/leave_requests/{request_id}/decision` endpoint.
///
/// The decision notice is scheduled for background delivery to the live
/// event stream after commit.
async fn handle_decide_leave(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(req): Json<DecideLeaveApiRequest>,
) -> Result<Json<LeaveTransitionResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        request_id,
        decision = %req.request.decision,
        "Handling decide_leave request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = actor_and_cause(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveTransitionResponse = decide_leave_request(
        &mut persistence,
        &app_state.config,
        &app_state.notifier,
        request_id,
        &req.request,
        &actor,
        &cause,
    )?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/leave_requests/{request_id}/cancel` endpoint.
async fn handle_cancel_leave(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(context): Json<ActorContext>,
) -> Result<Json<LeaveTransitionResponse>, HttpError> {
    info!(
        actor_id = %context.actor_id,
        request_id,
        "Handling cancel_leave request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = actor_and_cause(context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveTransitionResponse = cancel_leave_request(
        &mut persistence,
        &app_state.config,
        request_id,
        &actor,
        &cause,
    )?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::LeaveCancelled {
        request_id,
        employee_id: response.request.employee_id,
    });

    Ok(Json(response))
}

/// Handler for GET `/leave_requests/{request_id}/audit` endpoint.
async fn handle_get_request_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<AuditEventInfo> = list_request_audit_events(&mut persistence, request_id)?;
    Ok(Json(events))
}

/// Handler for GET `/employees/{employee_id}/leave_requests` endpoint.
async fn handle_list_leave_requests(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<ListLeaveRequestsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListLeaveRequestsResponse = list_leave_requests(&mut persistence, employee_id)?;
    Ok(Json(response))
}

// ============================================================================
// Balances and rollover
// ============================================================================

/// Handler for GET `/employees/{employee_id}/balances?year=` endpoint.
async fn handle_list_balances(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Query(query): Query<YearQuery>,
) -> Result<Json<ListBalancesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: ListBalancesResponse = list_balances(&mut persistence, employee_id, query.year)?;
    Ok(Json(response))
}

/// Handler for GET `/employees/{employee_id}/balances/{category_id}?year=` endpoint.
async fn handle_get_balance(
    AxumState(app_state): AxumState<AppState>,
    Path((employee_id, category_id)): Path<(i64, i64)>,
    Query(query): Query<YearQuery>,
) -> Result<Json<BalanceInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: BalanceInfo = get_balance(&mut persistence, employee_id, category_id, query.year)?;
    Ok(Json(response))
}

/// Handler for GET `/employees/{employee_id}/audit` endpoint.
async fn handle_get_employee_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let events: Vec<AuditEventInfo> = list_employee_audit_events(&mut persistence, employee_id)?;
    Ok(Json(events))
}

/// Handler for POST `/rollover` endpoint.
async fn handle_rollover(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RolloverApiRequest>,
) -> Result<Json<RolloverReport>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        year = req.request.year,
        organization_id = ?req.request.organization_id,
        "Handling rollover request"
    );
    let (actor, cause): (AuthenticatedActor, Cause) = actor_and_cause(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let report: RolloverReport = run_annual_rollover(
        &mut persistence,
        &app_state.config,
        &req.request,
        &actor,
        &cause,
    )?;
    drop(persistence);

    app_state.live.broadcast(&LiveEvent::YearInitialized {
        year: report.year,
        initialized: report.initialized,
        failed: report.failed,
    });

    Ok(Json(report))
}

/// Handler for POST `/duration/preview` endpoint.
async fn handle_preview_duration(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PreviewDurationRequest>,
) -> Result<Json<PreviewDurationResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: PreviewDurationResponse = preview_duration(&mut persistence, &req)?;
    Ok(Json(response))
}

// ============================================================================
// Configuration
// ============================================================================

/// Handler for POST `/organizations` endpoint.
async fn handle_create_organization(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateOrganizationRequest>,
) -> Result<Json<OrganizationInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: OrganizationInfo = create_organization(&mut persistence, &req)?;
    Ok(Json(response))
}

/// Handler for POST `/employees` endpoint.
async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: EmployeeInfo = create_employee(&mut persistence, &req)?;
    Ok(Json(response))
}

/// Handler for PUT `/employees/{employee_id}/active` endpoint.
async fn handle_set_employee_active(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    set_employee_active(&mut persistence, employee_id, req.is_active)?;
    Ok(Json(WriteResponse {
        success: true,
        message: format!("Employee {employee_id} active: {}", req.is_active),
    }))
}

/// Handler for POST `/categories` endpoint.
async fn handle_create_category(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> Result<Json<CategoryInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: CategoryInfo = create_category(&mut persistence, &req)?;
    Ok(Json(response))
}

/// Handler for PUT `/categories/{category_id}/active` endpoint.
async fn handle_set_category_active(
    AxumState(app_state): AxumState<AppState>,
    Path(category_id): Path<i64>,
    Json(req): Json<SetActiveRequest>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    set_category_active(&mut persistence, category_id, req.is_active)?;
    Ok(Json(WriteResponse {
        success: true,
        message: format!("Category {category_id} active: {}", req.is_active),
    }))
}

/// Handler for POST `/policies` endpoint.
async fn handle_create_policy(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreatePolicyRequest>,
) -> Result<Json<PolicyInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response: PolicyInfo = create_policy(&mut persistence, &req)?;
    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/organizations", post(handle_create_organization))
        .route("/employees", post(handle_create_employee))
        .route(
            "/employees/{employee_id}/active",
            put(handle_set_employee_active),
        )
        .route(
            "/employees/{employee_id}/leave_requests",
            get(handle_list_leave_requests),
        )
        .route(
            "/employees/{employee_id}/balances",
            get(handle_list_balances),
        )
        .route(
            "/employees/{employee_id}/balances/{category_id}",
            get(handle_get_balance),
        )
        .route("/employees/{employee_id}/audit", get(handle_get_employee_audit))
        .route("/categories", post(handle_create_category))
        .route(
            "/categories/{category_id}/active",
            put(handle_set_category_active),
        )
        .route("/policies", post(handle_create_policy))
        .route("/leave_requests", post(handle_submit_leave))
        .route("/leave_requests/{request_id}", get(handle_get_leave_request))
        .route(
            "/leave_requests/{request_id}/decision",
            post(handle_decide_leave),
        )
        .route(
            "/leave_requests/{request_id}/cancel",
            post(handle_cancel_leave),
        )
        .route(
            "/leave_requests/{request_id}/audit",
            get(handle_get_request_audit),
        )
        .route("/rollover", post(handle_rollover))
        .route("/duration/preview", post(handle_preview_duration))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Leave Engine Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let live: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
    let notifier: BackgroundNotifier = BackgroundNotifier::new(Arc::clone(&live) as _)?;
    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        config: EngineConfig::with_max_transient_retries(args.max_retries),
        live,
        notifier,
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode as HttpStatusCode},
    };
    use leave_engine_api::{DecisionNotice, NotificationError, NotificationSink};
    use leave_engine_domain::Days;
    use serde_json::{Value, json};
    use std::time::Duration;
    use tower::ServiceExt;

    /// Helper to create test app state with in-memory persistence.
    fn create_test_app_state() -> AppState {
        let live: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
        create_test_app_state_with_sink(Arc::clone(&live), live)
    }

    /// Test app state whose decision notices go to `sink` instead of the live stream.
    fn create_test_app_state_with_sink(
        live: Arc<LiveEventBroadcaster>,
        sink: Arc<dyn NotificationSink>,
    ) -> AppState {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            config: EngineConfig::default(),
            live,
            notifier: BackgroundNotifier::new(sink).expect("Tests run inside a tokio runtime"),
        }
    }

    /// Panics on every delivery.
    struct PanickingSink;

    impl NotificationSink for PanickingSink {
        fn notify(&self, _notice: &DecisionNotice) -> Result<(), NotificationError> {
            panic!("mail client crashed");
        }
    }

    fn actor(actor_id: &str, role: &str) -> Value {
        json!({
            "actor_id": actor_id,
            "actor_role": role,
            "cause_id": "test-cause",
            "cause_description": "Test request",
        })
    }

    fn with_actor(mut body: Value, actor_id: &str, role: &str) -> Value {
        if let (Some(target), Value::Object(context)) = (body.as_object_mut(), actor(actor_id, role))
        {
            target.extend(context);
        }
        body
    }

    /// Sends a request and returns the status and JSON body.
    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (HttpStatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(value) => builder
                .body(Body::from(serde_json::to_string(&value).unwrap()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = app.clone().oneshot(request).await.unwrap();
        let status: HttpStatusCode = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, value)
    }

    /// Seeds an organization, employee and 20-day category, and initializes 2026.
    /// Returns `(employee_id, category_id)`.
    async fn seed(app: &Router) -> (i64, i64) {
        let (status, organization) = send(
            app,
            "POST",
            "/organizations",
            Some(json!({ "name": "Acme" })),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let organization_id: i64 = organization["organization_id"].as_i64().unwrap();

        let (_, employee) = send(
            app,
            "POST",
            "/employees",
            Some(json!({ "organization_id": organization_id, "name": "Ada Lovelace" })),
        )
        .await;
        let (_, category) = send(
            app,
            "POST",
            "/categories",
            Some(json!({
                "organization_id": organization_id,
                "name": "Paid Leave",
                "annual_allocation": 20,
                "allows_carry_over": true,
                "carry_over_max": 5,
                "requires_approval": true,
            })),
        )
        .await;

        let (status, report) = send(
            app,
            "POST",
            "/rollover",
            Some(with_actor(json!({ "year": 2026 }), "hr-admin", "admin")),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(report["initialized"], 1);

        (
            employee["employee_id"].as_i64().unwrap(),
            category["category_id"].as_i64().unwrap(),
        )
    }

    async fn submit_week(app: &Router, employee_id: i64, category_id: i64) -> (HttpStatusCode, Value) {
        send(
            app,
            "POST",
            "/leave_requests",
            Some(with_actor(
                json!({
                    "employee_id": employee_id,
                    "category_id": category_id,
                    "start_date": "2026-03-02",
                    "end_date": "2026-03-06",
                }),
                "emp-1",
                "employee",
            )),
        )
        .await
    }

    #[tokio::test]
    async fn test_submit_and_approve_over_http() {
        let app_state: AppState = create_test_app_state();
        let mut live_rx = app_state.live.subscribe();
        let app: Router = build_router(app_state);
        let (employee_id, category_id) = seed(&app).await;

        let (status, submitted) = submit_week(&app, employee_id, category_id).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(submitted["request"]["status"], "PENDING");
        let request_id: i64 = submitted["request"]["request_id"].as_i64().unwrap();

        let (status, decided) = send(
            &app,
            "POST",
            &format!("/leave_requests/{request_id}/decision"),
            Some(with_actor(json!({ "decision": "approve" }), "mgr-9", "manager")),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(decided["request"]["status"], "APPROVED");

        let (status, balance) = send(
            &app,
            "GET",
            &format!("/employees/{employee_id}/balances/{category_id}?year=2026"),
            None,
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        let balance: BalanceInfo = serde_json::from_value(balance).unwrap();
        assert_eq!(balance.used, Days::whole(5));
        assert_eq!(balance.remaining, Days::whole(15));

        // The notice is delivered in the background, after the response.
        let decided_event: LiveEvent = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let event: LiveEvent = live_rx.recv().await.expect("Live stream closed");
                if matches!(event, LiveEvent::LeaveDecided { .. }) {
                    return event;
                }
            }
        })
        .await
        .expect("No decision event within timeout");
        match decided_event {
            LiveEvent::LeaveDecided {
                request_id: id,
                outcome,
                ..
            } => {
                assert_eq!(id, request_id);
                assert_eq!(outcome, "APPROVED");
            }
            other => panic!("Expected LeaveDecided, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_panicking_sink_does_not_fail_decision() {
        let live: Arc<LiveEventBroadcaster> = Arc::new(LiveEventBroadcaster::new());
        let app: Router = build_router(create_test_app_state_with_sink(
            live,
            Arc::new(PanickingSink),
        ));
        let (employee_id, category_id) = seed(&app).await;
        let (_, submitted) = submit_week(&app, employee_id, category_id).await;
        let request_id: i64 = submitted["request"]["request_id"].as_i64().unwrap();

        let (status, decided) = send(
            &app,
            "POST",
            &format!("/leave_requests/{request_id}/decision"),
            Some(with_actor(json!({ "decision": "approve" }), "mgr-9", "manager")),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(decided["request"]["status"], "APPROVED");

        // The server keeps answering after the sink blew up.
        let (status, stored) = send(&app, "GET", &format!("/leave_requests/{request_id}"), None).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(stored["status"], "APPROVED");
    }

    #[tokio::test]
    async fn test_reject_without_reason_is_bad_request() {
        let app: Router = build_router(create_test_app_state());
        let (employee_id, category_id) = seed(&app).await;
        let (_, submitted) = submit_week(&app, employee_id, category_id).await;
        let request_id: i64 = submitted["request"]["request_id"].as_i64().unwrap();

        let (status, body) = send(
            &app,
            "POST",
            &format!("/leave_requests/{request_id}/decision"),
            Some(with_actor(json!({ "decision": "reject" }), "mgr-9", "manager")),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "invalid_input");
    }

    #[tokio::test]
    async fn test_second_decision_is_conflict() {
        let app: Router = build_router(create_test_app_state());
        let (employee_id, category_id) = seed(&app).await;
        let (_, submitted) = submit_week(&app, employee_id, category_id).await;
        let request_id: i64 = submitted["request"]["request_id"].as_i64().unwrap();
        let uri: String = format!("/leave_requests/{request_id}/cancel");

        let (first, _) = send(&app, "POST", &uri, Some(actor("emp-1", "employee"))).await;
        let (second, body) = send(&app, "POST", &uri, Some(actor("emp-1", "employee"))).await;

        assert_eq!(first, HttpStatusCode::OK);
        assert_eq!(second, HttpStatusCode::CONFLICT);
        assert_eq!(body["kind"], "state_conflict");
    }

    #[tokio::test]
    async fn test_insufficient_balance_is_unprocessable() {
        let app: Router = build_router(create_test_app_state());
        let (employee_id, category_id) = seed(&app).await;

        let (status, body) = send(
            &app,
            "POST",
            "/leave_requests",
            Some(with_actor(
                json!({
                    "employee_id": employee_id,
                    "category_id": category_id,
                    "start_date": "2026-03-02",
                    "end_date": "2026-04-03",
                }),
                "emp-1",
                "employee",
            )),
        )
        .await;

        assert_eq!(status, HttpStatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["kind"], "insufficient_balance");
    }

    #[tokio::test]
    async fn test_unknown_request_is_not_found() {
        let app: Router = build_router(create_test_app_state());

        let (status, body) = send(&app, "GET", "/leave_requests/404", None).await;

        assert_eq!(status, HttpStatusCode::NOT_FOUND);
        assert_eq!(body["error"], true);
    }

    #[tokio::test]
    async fn test_invalid_role_is_rejected() {
        let app: Router = build_router(create_test_app_state());
        let (employee_id, category_id) = seed(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            "/leave_requests",
            Some(with_actor(
                json!({
                    "employee_id": employee_id,
                    "category_id": category_id,
                    "start_date": "2026-03-02",
                    "end_date": "2026-03-06",
                }),
                "emp-1",
                "overlord",
            )),
        )
        .await;

        assert_eq!(status, HttpStatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_preview_duration_over_http() {
        let app: Router = build_router(create_test_app_state());
        let (_, organization) = send(
            &app,
            "POST",
            "/organizations",
            Some(json!({ "name": "Acme", "working_days": [1, 2, 3, 4, 5] })),
        )
        .await;

        let (status, preview) = send(
            &app,
            "POST",
            "/duration/preview",
            Some(json!({
                "organization_id": organization["organization_id"],
                "start_date": "2026-03-02",
                "end_date": "2026-03-06",
                "half_day_end": true,
            })),
        )
        .await;

        assert_eq!(status, HttpStatusCode::OK);
        let preview: PreviewDurationResponse = serde_json::from_value(preview).unwrap();
        assert_eq!(preview.total_days, Days::from_half_days(9));
    }
}
