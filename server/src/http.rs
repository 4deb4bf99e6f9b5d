use std::net::{IpAddr, SocketAddr};
use std::sync::{Arc, RwLock};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{self, HeaderName, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use chrono::Utc;
use entity::{Department, Employee};
use platform_storage::{PersistedState, StateBackend};
use products_hr::{
    AgeBand, DepartmentStat, Headline, HistoryPoint, HrStore, NewEmployee, ValidationErrors,
    age_histogram, department_stats, headline, performance_history,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    store: Arc<RwLock<HrStore>>,
    backend: Arc<dyn StateBackend>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: HrStore, backend: Arc<dyn StateBackend>, config: Arc<AppConfig>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            backend,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn read<R>(&self, f: impl FnOnce(&HrStore) -> R) -> R {
        let guard = match self.store.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&guard)
    }

    /// Runs a mutation and then persists the resulting state. Saves are
    /// best-effort: a failure is logged and the request still succeeds,
    /// matching the durability contract of browser local storage.
    fn mutate<R>(&self, f: impl FnOnce(&mut HrStore) -> R) -> R {
        let (result, snapshot) = {
            let mut guard = match self.store.write() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            let result = f(&mut guard);
            let snapshot = PersistedState {
                employees: guard.employees().to_vec(),
                filters: guard.filters().clone(),
            };
            (result, snapshot)
        };
        if let Err(err) = self.backend.save(&snapshot) {
            warn!(error = %err, "failed to persist dashboard state");
        }
        result
    }

    /// Full roster swap, used by the one-shot seed task.
    pub fn replace_employees(&self, employees: Vec<Employee>) {
        self.mutate(|store| store.replace_all(employees));
    }
}

#[derive(Clone, Debug)]
pub struct ServeConfig {
    addr: SocketAddr,
}

impl ServeConfig {
    pub fn new(host: IpAddr, port: u16) -> Self {
        Self {
            addr: SocketAddr::from((host, port)),
        }
    }
}

pub async fn serve(config: ServeConfig, state: AppState) -> anyhow::Result<()> {
    let router = build_router(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("failed to bind {}", config.addr))?;

    info!(%config.addr, "staffboard server listening");
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;
    Ok(())
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();
    let allow_origin = if allowed.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(allowed)
    };
    CorsLayer::new()
        .allow_headers([http::header::CONTENT_TYPE])
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_origin(allow_origin)
}

pub fn build_router(state: AppState) -> Router {
    let request_id = MakeRequestUuid;
    let header_name = HeaderName::from_static("x-request-id");
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/employees", get(list_employees).post(create_employee))
        .route("/api/employees/{id}", get(get_employee))
        .route("/api/employees/{id}/history", get(employee_history))
        .route("/api/employees/{id}/bookmark", post(toggle_bookmark))
        .route("/api/employees/{id}/promote", post(promote_employee))
        .route("/api/bookmarks", get(list_bookmarks))
        .route("/api/query", put(update_query))
        .route("/api/analytics", get(analytics))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(header_name.clone(), request_id))
                .layer(PropagateRequestIdLayer::new(header_name))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(&state.config.cors_allowed_origins)),
        )
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    employees: usize,
    version: &'static str,
}

#[instrument(name = "http.health", skip_all)]
async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let employees = state.read(|store| store.employees().len());
    Json(HealthResponse {
        ok: true,
        employees,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[instrument(name = "http.employees.list", skip_all)]
async fn list_employees(State(state): State<AppState>) -> impl IntoResponse {
    let page_size = state.config.page_size;
    Json(state.read(|store| store.current_page(page_size)))
}

/// Partial query update. Provided fields replace the stored value verbatim;
/// search and filter changes reset the page cursor, and an explicit page
/// (applied last) overrides the reset.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryUpdate {
    search: Option<String>,
    departments: Option<Vec<Department>>,
    ratings: Option<Vec<u8>>,
    page: Option<usize>,
}

#[instrument(name = "http.query.update", skip_all)]
async fn update_query(
    State(state): State<AppState>,
    Json(update): Json<QueryUpdate>,
) -> impl IntoResponse {
    let page_size = state.config.page_size;
    Json(state.mutate(|store| {
        if let Some(search) = update.search {
            store.set_search(search);
        }
        if let Some(departments) = update.departments {
            store.set_departments(departments);
        }
        if let Some(ratings) = update.ratings {
            store.set_ratings(ratings);
        }
        if let Some(page) = update.page {
            store.set_page(page);
        }
        store.current_page(page_size)
    }))
}

#[instrument(name = "http.employees.create", skip_all)]
async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<NewEmployee>,
) -> HttpResult<(StatusCode, Json<Employee>)> {
    let created = state
        .mutate(|store| {
            let id = store.next_id();
            let employee = input.into_employee(id, &mut rand::thread_rng())?;
            store.append(employee.clone());
            Ok::<_, ValidationErrors>(employee)
        })
        .map_err(HttpError::validation)?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[instrument(name = "http.employees.get", skip_all)]
async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> HttpResult<Json<Employee>> {
    state
        .read(|store| store.find(id).cloned())
        .map(Json)
        .ok_or_else(|| HttpError::new(StatusCode::NOT_FOUND, "employee not found"))
}

#[instrument(name = "http.employees.history", skip_all)]
async fn employee_history(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> HttpResult<Json<Vec<HistoryPoint>>> {
    if !state.read(|store| store.find(id).is_some()) {
        return Err(HttpError::new(StatusCode::NOT_FOUND, "employee not found"));
    }
    let series = performance_history(&mut rand::thread_rng(), Utc::now().date_naive());
    Ok(Json(series))
}

// Unknown identifiers are deliberately silent no-ops, so both mutation
// endpoints answer 204 regardless.

#[instrument(name = "http.employees.bookmark", skip_all)]
async fn toggle_bookmark(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    state.mutate(|store| store.toggle_bookmark(id));
    StatusCode::NO_CONTENT
}

#[instrument(name = "http.employees.promote", skip_all)]
async fn promote_employee(State(state): State<AppState>, Path(id): Path<u64>) -> StatusCode {
    state.mutate(|store| store.promote(id));
    StatusCode::NO_CONTENT
}

#[instrument(name = "http.bookmarks", skip_all)]
async fn list_bookmarks(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.read(|store| store.bookmarked()))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnalyticsResponse {
    headline: Headline,
    departments: Vec<DepartmentStat>,
    age_histogram: Vec<AgeBand>,
}

#[instrument(name = "http.analytics", skip_all)]
async fn analytics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.read(|store| {
        let employees = store.employees();
        AnalyticsResponse {
            headline: headline(employees),
            departments: department_stats(employees),
            age_histogram: age_histogram(employees),
        }
    }))
}

type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    body: serde_json::Value,
}

impl HttpError {
    fn new(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: json!({ "error": message }),
        }
    }

    fn validation(errors: ValidationErrors) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            body: json!({ "errors": errors.fields }),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        signal(SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
