/// Data models for the Nexus API
///
/// Binary columns (`bytea`) are carried through JSON as base64 strings via
/// the [`base64_bytes`] serde helper.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Serde helper for optional binary columns, encoded as base64 in JSON.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match bytes {
            Some(b) => serializer.serialize_some(&STANDARD.encode(b)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(s) => STANDARD
                .decode(s.as_bytes())
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// A registered user.
///
/// The password column is stored in cleartext and returned verbatim by the
/// login endpoint. That is the inherited contract of this system, not a
/// recommendation; see DESIGN.md before exposing this API anywhere real.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    #[serde(with = "base64_bytes")]
    pub image: Option<Vec<u8>>,
}

/// One row of the feed query: post columns plus the author's name and image
/// surfaced through a LEFT JOIN. Orphaned posts keep null author columns.
#[derive(Debug, Clone, FromRow)]
pub struct FeedRow {
    pub id: i32,
    pub midia: Option<Vec<u8>>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<i32>,
    pub name: Option<String>,
    pub image: Option<Vec<u8>>,
}

/// A feed entry as serialized to clients: the joined row plus the sniffed
/// `mime` label. `mime` is null for media-less posts and `"unknown"` when the
/// media bytes match no known signature.
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    pub id: i32,
    #[serde(with = "base64_bytes")]
    pub midia: Option<Vec<u8>>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<i32>,
    pub name: Option<String>,
    #[serde(with = "base64_bytes")]
    pub image: Option<Vec<u8>>,
    pub mime: Option<String>,
}

impl FeedEntry {
    /// Combine a feed row with the MIME label sniffed from its media.
    pub fn from_row(row: FeedRow, mime: Option<String>) -> Self {
        Self {
            id: row.id,
            midia: row.midia,
            description: row.description,
            created_at: row.created_at,
            user_id: row.user_id,
            name: row.name,
            image: row.image,
            mime,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_image_round_trips_as_base64() {
        let user = User {
            id: 1,
            name: "Ana Silva".into(),
            email: "ana@x.com".into(),
            password: "p1".into(),
            phone: Some("123".into()),
            image: Some(vec![0xFF, 0xD8, 0xFF]),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["image"], "/9j/");

        let back: User = serde_json::from_value(json).unwrap();
        assert_eq!(back.image, Some(vec![0xFF, 0xD8, 0xFF]));
    }

    #[test]
    fn absent_image_serializes_as_null() {
        let user = User {
            id: 2,
            name: "Bruno".into(),
            email: "b@x.com".into(),
            password: "p2".into(),
            phone: None,
            image: None,
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json["image"].is_null());
        assert!(json["phone"].is_null());
    }

    #[test]
    fn feed_entry_without_media_has_null_mime() {
        let row = FeedRow {
            id: 7,
            midia: None,
            description: Some("text only".into()),
            created_at: Utc::now(),
            user_id: Some(1),
            name: Some("Ana Silva".into()),
            image: None,
        };

        let entry = FeedEntry::from_row(row, None);
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json["mime"].is_null());
        assert!(json["midia"].is_null());
    }
}
