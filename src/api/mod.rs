//! Client side of the remote page/sticker/artwork API.
//!
//! The editor, catalog and gallery only talk to [`RemoteStore`]; [`HttpStore`]
//! is the production implementation over JSON/HTTP.

mod http;
pub mod models;

use std::future::Future;

use thiserror::Error;

pub use http::HttpStore;
pub use models::{Artwork, NewArtwork, Page, StickerTemplate};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request could not be sent: {0}")]
    Transport(String),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("response could not be decoded: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ApiError::Status(status.as_u16())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote collaborator owning pages, stickers and saved artworks.
///
/// Every call is a single request: no retries, no caching.
pub trait RemoteStore {
    fn list_pages(&self, category: Option<&str>) -> impl Future<Output = ApiResult<Vec<Page>>>;

    fn get_page(&self, id: &str) -> impl Future<Output = ApiResult<Page>>;

    fn list_stickers(&self) -> impl Future<Output = ApiResult<Vec<StickerTemplate>>>;

    fn create_artwork(&self, artwork: &NewArtwork) -> impl Future<Output = ApiResult<Artwork>>;

    fn list_artworks(&self) -> impl Future<Output = ApiResult<Vec<Artwork>>>;

    fn delete_artwork(&self, id: &str) -> impl Future<Output = ApiResult<()>>;
}
