/// User directory, registration, and login endpoints
use crate::db::user_repo;
use crate::error::{AppError, Result};
use crate::models::{base64_bytes, User};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashSet;

#[derive(Debug, Deserialize)]
pub struct AddUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default, with = "base64_bytes")]
    pub image: Option<Vec<u8>>,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub id: i32,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// List every user, unordered and unpaginated.
/// GET /users
pub async fn list_users(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let users = user_repo::list_all(&pool).await?;
    Ok(HttpResponse::Ok().json(users))
}

/// Drop users already seen by id, preserving first-seen order.
fn dedup_by_id(users: Vec<User>) -> Vec<User> {
    let mut seen = HashSet::new();
    users.into_iter().filter(|u| seen.insert(u.id)).collect()
}

/// Substring user search.
///
/// The query is split on whitespace; each token matches users whose name
/// contains it case-insensitively (OR semantics across tokens). The union is
/// deduplicated by id. 404 when nothing matches.
/// GET /user/{name}
pub async fn search_users(
    pool: web::Data<PgPool>,
    query: web::Path<String>,
) -> Result<HttpResponse> {
    let mut found = Vec::new();
    for token in query.split_whitespace() {
        let matches = user_repo::search_by_name_fragment(&pool, token).await?;
        found.extend(matches);
    }

    let found = dedup_by_id(found);

    if found.is_empty() {
        return Err(AppError::NotFound("no users found".into()));
    }

    Ok(HttpResponse::Ok().json(found))
}

/// Administrative user creation, returning the inserted row.
/// POST /users/add
pub async fn add_user(
    pool: web::Data<PgPool>,
    req: web::Json<AddUserRequest>,
) -> Result<HttpResponse> {
    let user = user_repo::insert(
        &pool,
        &req.name,
        &req.email,
        &req.password,
        req.image.as_deref(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(user))
}

/// Self-registration.
///
/// Inserts the row, then re-queries the generated id by email. Any failure,
/// constraint violations included, collapses to a bare 409 with no body;
/// that status is the one contractual non-500 failure of this endpoint.
/// POST /register
pub async fn register(pool: web::Data<PgPool>, req: web::Json<RegisterRequest>) -> HttpResponse {
    let outcome = async {
        user_repo::insert_registration(&pool, &req.name, &req.email, &req.password, &req.phone)
            .await?;
        user_repo::find_id_by_email(&pool, &req.email)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
    .await;

    match outcome {
        Ok(id) => HttpResponse::Created().json(RegisterResponse {
            name: req.name.clone(),
            email: req.email.clone(),
            phone: req.phone.clone(),
            id,
        }),
        Err(e) => {
            tracing::warn!(email = %req.email, "registration failed: {}", e);
            HttpResponse::Conflict().finish()
        }
    }
}

/// Credential login.
///
/// Exact cleartext email+password comparison; the 200 body is the full user
/// row, password column included. Both are the inherited contract of this
/// system and are flagged as defects in DESIGN.md, not behavior to rely on.
/// POST /login
pub async fn login(pool: web::Data<PgPool>, req: web::Json<LoginRequest>) -> Result<HttpResponse> {
    match user_repo::find_by_credentials(&pool, &req.email, &req.password).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::Unauthorized("invalid email or password".into())),
    }
}

/// Serve a user's profile image.
///
/// Always labeled image/jpeg regardless of the actual bytes; unlike the
/// post-media path, no sniffing is applied here, preserving the observable
/// behavior of the original contract.
/// GET /user-img/{id}
pub async fn user_image(pool: web::Data<PgPool>, id: web::Path<i32>) -> Result<HttpResponse> {
    let image = user_repo::find_image_by_id(&pool, *id).await?.flatten();

    match image {
        Some(bytes) => Ok(HttpResponse::Ok()
            .content_type(mime::IMAGE_JPEG.as_ref())
            .body(bytes)),
        None => Err(AppError::NotFound("image not found".into())),
    }
}
