use image::DynamicImage;
use reqwest::blocking::Client;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ReelError, ReelResult};
use crate::net::ensure_success;
use crate::scene::background::ImageSource;

const UNSPLASH_API: &str = "https://api.unsplash.com";

/// Random photo matching a query from the Unsplash API.
pub struct UnsplashSource {
    client: Client,
    access_key: String,
    base_url: String,
}

impl UnsplashSource {
    pub fn new(client: Client, access_key: impl Into<String>) -> Self {
        Self {
            client,
            access_key: access_key.into(),
            base_url: UNSPLASH_API.to_owned(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(serde::Deserialize)]
struct RandomPhoto {
    urls: PhotoUrls,
}

#[derive(serde::Deserialize)]
struct PhotoUrls {
    regular: String,
}

impl ImageSource for UnsplashSource {
    fn fetch(&self, query: &str, canvas: Canvas) -> ReelResult<DynamicImage> {
        let url = format!("{}/photos/random", self.base_url.trim_end_matches('/'));
        let res = self
            .client
            .get(url)
            .query(&[("query", query), ("client_id", self.access_key.as_str())])
            .send()
            .map_err(|e| ReelError::service(format!("unsplash request failed: {e}")))?;
        let photo: RandomPhoto = ensure_success(res, "unsplash photos/random")?
            .json()
            .map_err(|e| ReelError::service(format!("unsplash response parse failed: {e}")))?;

        tracing::debug!(query, url = %photo.urls.regular, ?canvas, "downloading background");
        let res = self
            .client
            .get(&photo.urls.regular)
            .send()
            .map_err(|e| ReelError::service(format!("image download failed: {e}")))?;
        let bytes = ensure_success(res, "image download")?
            .bytes()
            .map_err(|e| ReelError::service(format!("failed to read image body: {e}")))?;

        image::load_from_memory(&bytes)
            .map_err(|e| ReelError::service(format!("failed to decode image: {e}")))
    }
}
