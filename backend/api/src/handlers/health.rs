/// Health check endpoint
use crate::db::pool::check_connection;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// GET /health
pub async fn health(pool: web::Data<PgPool>) -> HttpResponse {
    match check_connection(&pool).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({
            "status": "ok",
            "service": "nexus-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
        Err(e) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "error": format!("PostgreSQL connection failed: {}", e),
            "service": "nexus-api"
        })),
    }
}
