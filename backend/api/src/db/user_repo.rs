/// User repository - handles all database operations for users
use crate::models::User;
use sqlx::PgPool;

const USER_COLUMNS: &str = "id, name, email, password, phone, image";

/// Fetch every user row, unordered and unfiltered.
///
/// Unbounded by contract; pagination is a known gap of this API.
pub async fn list_all(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {} FROM users", USER_COLUMNS))
        .fetch_all(pool)
        .await
}

/// Case-insensitive substring search against the name column.
pub async fn search_by_name_fragment(
    pool: &PgPool,
    fragment: &str,
) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE name ILIKE $1",
        USER_COLUMNS
    ))
    .bind(format!("%{}%", fragment))
    .fetch_all(pool)
    .await
}

/// Insert a user with an optional profile image, returning the created row.
pub async fn insert(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    image: Option<&[u8]>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (name, email, password, image)
        VALUES ($1, $2, $3, $4)
        RETURNING {}
        "#,
        USER_COLUMNS
    ))
    .bind(name)
    .bind(email)
    .bind(password)
    .bind(image)
    .fetch_one(pool)
    .await
}

/// Insert a self-registered user (name, email, password, phone).
pub async fn insert_registration(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
    phone: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (name, email, password, phone)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(password)
    .bind(phone)
    .execute(pool)
    .await?;

    Ok(())
}

/// Look up the generated id for an email.
///
/// With duplicate emails this collapses to whichever row the query returns
/// first; the registration flow accepts that ambiguity by contract.
pub async fn find_id_by_email(pool: &PgPool, email: &str) -> Result<Option<i32>, sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
        .bind(email)
        .fetch_optional(pool)
        .await
}

/// Match a user by exact email AND exact password.
///
/// Cleartext comparison, inherited contract. See DESIGN.md.
pub async fn find_by_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = $1 AND password = $2",
        USER_COLUMNS
    ))
    .bind(email)
    .bind(password)
    .fetch_optional(pool)
    .await
}

/// Load a user's image column. Outer `None` means no such user; inner `None`
/// means the user has no image.
pub async fn find_image_by_id(
    pool: &PgPool,
    user_id: i32,
) -> Result<Option<Option<Vec<u8>>>, sqlx::Error> {
    sqlx::query_scalar::<_, Option<Vec<u8>>>("SELECT image FROM users WHERE id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}
