//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use tracing::{error, warn};

use crate::catalog::{SearchError, expanded_ids};
use crate::domain::Category;
use crate::remote::{CreateMeetupRequest, CreateMeetupResponse, RemoteError};
use crate::storage::{KeyValueStore, StorageError};
use crate::transfers::{DEFAULT_BADGE_LIMIT, TransferResolver, group_by_company};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router<S>(state: AppState<S>) -> Router
where
    S: KeyValueStore + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/routes/:name", get(lookup_route::<S>))
        .route("/api/stations/search", get(search_stations::<S>))
        .route("/api/transfers", post(resolve_transfers::<S>))
        .route(
            "/api/categories",
            get(list_categories::<S>).post(upsert_category::<S>),
        )
        .route("/api/categories/order", put(reorder_categories::<S>))
        .route("/api/categories/:id", delete(delete_category::<S>))
        .route("/api/meetups", post(create_meetup::<S>))
        .route("/api/meetups/:share_id/refresh", post(refresh_meetup::<S>))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Look up the descriptor of a route by name.
async fn lookup_route<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Path(name): Path<String>,
) -> Result<Json<RouteLookupResponse>, AppError> {
    let (operator, descriptor) =
        state
            .routes
            .lookup_with_operator(&name)
            .ok_or_else(|| AppError::NotFound {
                message: format!("Unknown route: {name}"),
            })?;

    Ok(Json(RouteLookupResponse {
        operator: operator.to_string(),
        route_name: name,
        descriptor: descriptor.clone(),
    }))
}

/// Search stations by name or reading.
async fn search_stations<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let sections = if req.literal {
        state.stations.search_literal(&req.q)
    } else {
        state.stations.search(&req.q)?
    };
    let expanded = expanded_ids(&req.q, &sections);

    Ok(Json(StationSearchResponse { sections, expanded }))
}

/// Resolve a station's transfers for display.
async fn resolve_transfers<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(req): Json<TransferRequest>,
) -> Json<TransferResponse> {
    let resolver = TransferResolver::new(&state.routes);
    let routes = resolver.resolve(
        &req.routes,
        req.home_company.as_deref(),
        req.home_route.as_deref(),
    );
    let badges = resolver.badges(&routes, req.limit.unwrap_or(DEFAULT_BADGE_LIMIT));
    let companies = group_by_company(&routes);

    Json(TransferResponse {
        routes,
        companies,
        badges,
    })
}

async fn list_categories<S: KeyValueStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.preferences.categories().await?))
}

/// Create or replace a category.
async fn upsert_category<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(input): Json<CategoryInput>,
) -> Result<Json<Category>, AppError> {
    let category = state.preferences.upsert_category(input.into()).await?;
    Ok(Json(category))
}

async fn delete_category<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.preferences.delete_category(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound {
            message: format!("Unknown category: {id}"),
        })
    }
}

async fn reorder_categories<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(req): Json<CategoryOrderRequest>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(state.preferences.reorder_categories(&req.ids).await?))
}

/// Create a meetup through the remote functions.
async fn create_meetup<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Json(req): Json<CreateMeetupRequest>,
) -> Result<Json<CreateMeetupResponse>, AppError> {
    let remote = state.remote.as_ref().ok_or(AppError::Unavailable)?;
    Ok(Json(remote.create_meetup(&req).await?))
}

async fn refresh_meetup<S: KeyValueStore>(
    State(state): State<AppState<S>>,
    Path(share_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let remote = state.remote.as_ref().ok_or(AppError::Unavailable)?;
    remote.refresh_meetup(&share_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    /// The remote functions are not configured.
    Unavailable,
    /// The remote functions failed.
    Upstream { message: String },
    Internal { message: String },
}

impl From<SearchError> for AppError {
    fn from(e: SearchError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Invalid(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<RemoteError> for AppError {
    fn from(e: RemoteError) -> Self {
        AppError::Upstream {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Meetup functions are not configured".to_string(),
            ),
            AppError::Upstream { message } => (StatusCode::BAD_GATEWAY, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
