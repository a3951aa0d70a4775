use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line-art coloring page from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    /// SVG source of the outline drawn under the user's strokes.
    pub svg: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerTemplate {
    pub id: String,
    pub name: String,
    pub svg: String,
}

/// A saved snapshot, as stored by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artwork {
    pub id: String,
    pub page_id: String,
    /// Base64 PNG, without a data URI prefix.
    pub image_data: String,
    #[serde(default)]
    pub title: Option<String>,
    pub completed_at: DateTime<Utc>,
}

impl Artwork {
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }
}

/// Body of the create-artwork request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewArtwork {
    pub page_id: String,
    pub image_data: String,
    pub title: String,
}
