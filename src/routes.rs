use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::error::ApiError;
use crate::extract;
use crate::models::{Contact, ContactFilter, SearchQuery};
use crate::service::ContactService;

#[derive(Clone)]
pub struct AppState {
    pub contacts: ContactService,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/contacts", get(list_contacts).post(create_contact))
        .route("/api/contacts/info", get(find_contact))
        .route("/api/contacts/search", get(search_contacts))
        .route(
            "/api/contacts/:id",
            get(get_contact).put(update_contact).delete(delete_contact),
        )
        .with_state(state)
        // Mirrors origin, methods and headers so credentials can be allowed.
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "OK"
}

async fn list_contacts(State(state): State<AppState>) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts.list().await?))
}

async fn get_contact(
    State(state): State<AppState>,
    extract::Path(id): extract::Path<i32>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.get(id).await?))
}

async fn find_contact(
    State(state): State<AppState>,
    extract::Query(filter): extract::Query<ContactFilter>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.find_one(filter).await?))
}

async fn search_contacts(
    State(state): State<AppState>,
    extract::Query(params): extract::Query<SearchQuery>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    Ok(Json(state.contacts.search(params.query.as_deref()).await?))
}

async fn create_contact(
    State(state): State<AppState>,
    extract::Json(payload): extract::Json<Contact>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.contacts.create(payload).await?;
    let location = format!("/api/contacts/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

async fn update_contact(
    State(state): State<AppState>,
    extract::Path(id): extract::Path<i32>,
    extract::Json(payload): extract::Json<Contact>,
) -> Result<StatusCode, ApiError> {
    state.contacts.update(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn delete_contact(
    State(state): State<AppState>,
    extract::Path(id): extract::Path<i32>,
) -> Result<Json<Contact>, ApiError> {
    Ok(Json(state.contacts.delete(id).await?))
}
