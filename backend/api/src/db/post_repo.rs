/// Post repository - handles all database operations for posts
use crate::models::FeedRow;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Maximum number of rows the feed ever returns.
pub const FEED_LIMIT: i64 = 50;

/// Insert a post with a server-assigned timestamp.
///
/// The insert shape depends on which of {media, description} are present;
/// callers must pass at least one (the handler enforces the 400 branch).
pub async fn insert(
    pool: &PgPool,
    midia: Option<&[u8]>,
    description: Option<&str>,
    user_id: i32,
    created_at: DateTime<Utc>,
) -> Result<(), sqlx::Error> {
    match (midia, description) {
        (Some(media), Some(text)) => {
            sqlx::query(
                r#"
                INSERT INTO posts (midia, description, created_at, user_id)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(media)
            .bind(text)
            .bind(created_at)
            .bind(user_id)
            .execute(pool)
            .await?;
        }
        (Some(media), None) => {
            sqlx::query(
                r#"
                INSERT INTO posts (midia, created_at, user_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(media)
            .bind(created_at)
            .bind(user_id)
            .execute(pool)
            .await?;
        }
        (None, Some(text)) => {
            sqlx::query(
                r#"
                INSERT INTO posts (description, created_at, user_id)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(text)
            .bind(created_at)
            .bind(user_id)
            .execute(pool)
            .await?;
        }
        (None, None) => {
            return Err(sqlx::Error::Protocol(
                "post insert requires media or description".into(),
            ));
        }
    }

    Ok(())
}

/// Fetch the feed: newest posts first, capped, with author name and image
/// surfaced through a LEFT JOIN so orphaned posts survive.
pub async fn fetch_feed(pool: &PgPool) -> Result<Vec<FeedRow>, sqlx::Error> {
    sqlx::query_as::<_, FeedRow>(
        r#"
        SELECT p.id, p.midia, p.description, p.created_at, p.user_id, u.name, u.image
        FROM posts p
        LEFT JOIN users u ON p.user_id = u.id
        ORDER BY p.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(FEED_LIMIT)
    .fetch_all(pool)
    .await
}

/// Load a post's media column. Outer `None` means no such post; inner `None`
/// means the post has no media.
pub async fn find_media_by_id(
    pool: &PgPool,
    post_id: i32,
) -> Result<Option<Option<Vec<u8>>>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<Vec<u8>>>("SELECT midia FROM posts WHERE id = $1")
        .bind(post_id)
        .fetch_optional(pool)
        .await
}
