use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{ApiError, ApiResult, Artwork, NewArtwork, Page, RemoteStore, StickerTemplate};

/// [`RemoteStore`] over JSON/HTTP. Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn send(&self, request: RequestBuilder) -> ApiResult<reqwest::Response> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} -> {}", response.url(), status);
        if !status.is_success() {
            warn!("request to {} failed with {}", response.url(), status);
            return Err(ApiError::Status(status.as_u16()));
        }
        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> ApiResult<T> {
        let response = self.send(request).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

impl RemoteStore for HttpStore {
    async fn list_pages(&self, category: Option<&str>) -> ApiResult<Vec<Page>> {
        let mut request = self.client.get(self.url("pages"));
        if let Some(category) = category {
            request = request.query(&[("category", category)]);
        }
        self.fetch_json(request).await
    }

    async fn get_page(&self, id: &str) -> ApiResult<Page> {
        self.fetch_json(self.client.get(self.url(&format!("pages/{id}"))))
            .await
    }

    async fn list_stickers(&self) -> ApiResult<Vec<StickerTemplate>> {
        self.fetch_json(self.client.get(self.url("stickers"))).await
    }

    async fn create_artwork(&self, artwork: &NewArtwork) -> ApiResult<Artwork> {
        debug!(
            "uploading artwork for page {} ({} bytes of image data)",
            artwork.page_id,
            artwork.image_data.len()
        );
        self.fetch_json(self.client.post(self.url("artworks")).json(artwork))
            .await
    }

    async fn list_artworks(&self) -> ApiResult<Vec<Artwork>> {
        self.fetch_json(self.client.get(self.url("artworks"))).await
    }

    async fn delete_artwork(&self, id: &str) -> ApiResult<()> {
        self.send(self.client.delete(self.url(&format!("artworks/{id}"))))
            .await
            .map(|_| ())
    }
}
