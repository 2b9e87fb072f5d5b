use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::{Map, Value};
use validator::Validate;
use crate::models::{DataResponse, Destination, NewDestinations};
use crate::routes::extract::require_admin;
use crate::routes::{ApiError, AppState};

/// Configure the content-management routes
///
/// Reads are public; every write goes through the admin secret gate.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/admin/destinations", web::get().to(list_destinations))
        .route("/admin/destinations", web::post().to(create_destinations))
        .route("/admin/destinations/{id}", web::get().to(get_destination))
        .route("/admin/destinations/{id}", web::patch().to(update_destination))
        .route("/admin/destinations/{id}", web::delete().to(delete_destination));
}

async fn list_destinations(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let summaries = state.backend.list_destination_summaries().await?;
    Ok(HttpResponse::Ok().json(DataResponse { data: summaries }))
}

async fn get_destination(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let destination = state.backend.get_destination(&id).await?;
    Ok(HttpResponse::Ok().json(DataResponse { data: destination }))
}

/// Fill in server-assigned fields on a destination about to be inserted
pub fn prepare_new_destination(mut destination: Destination, now: chrono::DateTime<chrono::Utc>) -> Destination {
    if destination.id.trim().is_empty() {
        destination.id = uuid::Uuid::new_v4().to_string();
    }
    destination.created_at.get_or_insert(now);
    destination.updated_at = Some(now);
    destination
}

/// Create one destination or a batch
///
/// POST /api/admin/destinations
///
/// Every item must carry a name and a location; nothing is inserted otherwise.
async fn create_destinations(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    body: web::Json<NewDestinations>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&http_req, &state)?;

    let items = body.into_inner().into_vec();
    if items.is_empty() {
        return Err(ApiError::BadRequest("No destinations provided".to_string()));
    }

    for (index, item) in items.iter().enumerate() {
        item.validate().map_err(|errors| {
            ApiError::BadRequest(format!("Destination {} is invalid: {}", index, errors))
        })?;
    }

    let now = chrono::Utc::now();
    let prepared: Vec<Destination> = items
        .into_iter()
        .map(|item| prepare_new_destination(item, now))
        .collect();

    let inserted = state.backend.insert_destinations(&prepared).await.map_err(|e| {
        tracing::error!("Failed to insert {} destinations: {}", prepared.len(), e);
        e
    })?;

    tracing::info!("Created {} destinations", inserted.len());

    Ok(HttpResponse::Created().json(DataResponse { data: inserted }))
}

/// Partially update a destination
///
/// PATCH /api/admin/destinations/{id}
async fn update_destination(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    id: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&http_req, &state)?;

    let mut patch = body.into_inner();
    if patch.is_empty() {
        return Err(ApiError::BadRequest("No update fields provided".to_string()));
    }
    patch.insert(
        "updated_at".to_string(),
        Value::String(chrono::Utc::now().to_rfc3339()),
    );

    let updated = state.backend.update_destination(&id, &patch).await?;

    tracing::info!("Updated destination {} ({} fields)", id, patch.len() - 1);

    Ok(HttpResponse::Ok().json(DataResponse { data: updated }))
}

/// DELETE /api/admin/destinations/{id}
async fn delete_destination(
    state: web::Data<AppState>,
    http_req: HttpRequest,
    id: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&http_req, &state)?;

    let deleted = state.backend.delete_destination(&id).await?;

    tracing::info!("Deleted destination {}", id);

    Ok(HttpResponse::Ok().json(DataResponse { data: deleted }))
}
