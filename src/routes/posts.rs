use actix_web::{web, HttpResponse};
use crate::models::DataResponse;
use crate::routes::{ApiError, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/posts", web::get().to(list_posts))
        .route("/posts/{slug}", web::get().to(get_post));
}

async fn list_posts(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let posts = state.backend.list_posts().await.map_err(|e| {
        tracing::error!("Failed to fetch posts: {}", e);
        e
    })?;

    Ok(HttpResponse::Ok().json(DataResponse { data: posts }))
}

async fn get_post(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let post = state.backend.get_post(&slug).await?;
    Ok(HttpResponse::Ok().json(DataResponse { data: post }))
}
