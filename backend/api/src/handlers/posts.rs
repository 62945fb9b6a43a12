/// Post feed, creation, and media endpoints
use crate::db::post_repo;
use crate::error::{AppError, Result};
use crate::mediatype;
use crate::models::FeedEntry;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use futures_util::StreamExt;
use sqlx::PgPool;

/// Reverse-chronological feed, capped at 50 entries.
///
/// Each media-bearing row gets a `mime` label sniffed from its bytes
/// ("unknown" when no signature matches); media-less rows get `mime: null`.
/// GET /posts
pub async fn feed(pool: web::Data<PgPool>) -> Result<HttpResponse> {
    let rows = post_repo::fetch_feed(&pool).await?;

    let entries: Vec<FeedEntry> = rows
        .into_iter()
        .map(|row| {
            let mime = row
                .midia
                .as_deref()
                .map(|bytes| mediatype::sniff(bytes).unwrap_or("unknown").to_string());
            FeedEntry::from_row(row, mime)
        })
        .collect();

    Ok(HttpResponse::Ok().json(entries))
}

/// Accumulated multipart fields of a post-creation request.
#[derive(Default)]
struct PostUpload {
    midia: Option<Vec<u8>>,
    description: Option<String>,
    user_id: Option<i32>,
}

/// An empty description field counts as absent, so a post carrying only an
/// empty string still hits the 400 branch.
fn parse_description(buf: &[u8]) -> Option<String> {
    if buf.is_empty() {
        None
    } else {
        Some(String::from_utf8_lossy(buf).into_owned())
    }
}

async fn read_post_upload(mut payload: Multipart) -> Result<PostUpload> {
    let mut upload = PostUpload::default();

    // The whole body is buffered in memory with no size cap, per contract.
    while let Some(item) = payload.next().await {
        let mut field =
            item.map_err(|e| AppError::BadRequest(format!("multipart error: {}", e)))?;

        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        let mut buf = Vec::new();
        while let Some(chunk) = field.next().await {
            let data =
                chunk.map_err(|e| AppError::BadRequest(format!("multipart read error: {}", e)))?;
            buf.extend_from_slice(&data);
        }

        match name.as_str() {
            "midia" => upload.midia = Some(buf),
            "description" => upload.description = parse_description(&buf),
            "user_id" => {
                let raw = String::from_utf8_lossy(&buf).trim().to_string();
                let id = raw
                    .parse::<i32>()
                    .map_err(|_| AppError::BadRequest(format!("invalid user_id: {}", raw)))?;
                upload.user_id = Some(id);
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Create a post from a multipart upload.
///
/// Fields: `midia` (file, optional), `description` (text, optional),
/// `user_id` (required). At least one of media and description must be
/// present; the insert shape branches on which ones are. The timestamp is
/// assigned server-side at insert time.
/// POST /posts
pub async fn create_post(pool: web::Data<PgPool>, payload: Multipart) -> Result<HttpResponse> {
    let upload = read_post_upload(payload).await?;

    let user_id = upload
        .user_id
        .ok_or_else(|| AppError::BadRequest("user_id is required".into()))?;

    if upload.midia.is_none() && upload.description.is_none() {
        return Err(AppError::BadRequest(
            "no media or description received".into(),
        ));
    }

    post_repo::insert(
        &pool,
        upload.midia.as_deref(),
        upload.description.as_deref(),
        user_id,
        Utc::now(),
    )
    .await?;

    Ok(HttpResponse::Created().body("post created"))
}

/// Serve a post's media with its sniffed content type.
///
/// 404 when the post or its media is absent, 400 when the bytes match no
/// known signature.
/// GET /midia-post/{id}
pub async fn post_media(pool: web::Data<PgPool>, id: web::Path<i32>) -> Result<HttpResponse> {
    let media = post_repo::find_media_by_id(&pool, *id).await?.flatten();

    let Some(bytes) = media else {
        return Err(AppError::NotFound("media not found".into()));
    };

    let Some(mime) = mediatype::sniff(&bytes) else {
        return Err(AppError::BadRequest("unrecognized media type".into()));
    };

    Ok(HttpResponse::Ok().content_type(mime).body(bytes))
}
