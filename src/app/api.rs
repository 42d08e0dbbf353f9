// src/app/api.rs
use std::time::Duration;

use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use thiserror::Error;
use tracing::debug;

use super::data::{Film, FilmId};
use crate::config::{normalize_base_url, AppConfig};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("API error ({0})")]
    Status(u16),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// HTTP status for rejected requests; `None` when the server never answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status(code) => Some(*code),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

/// The remote films resource.
pub trait FilmApi: Send {
    fn list(&self) -> Result<Vec<Film>, ApiError>;
    fn create(&self, film: &Film) -> Result<Film, ApiError>;
    fn update(&self, id: FilmId, film: &Film) -> Result<Film, ApiError>;
    fn delete(&self, id: FilmId) -> Result<(), ApiError>;
}

pub struct HttpFilmApi {
    client: Client,
    base_url: String,
}

impl HttpFilmApi {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        // reqwest's blocking client times out after 30s unless told otherwise.
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, ApiError> {
        Self::new(&cfg.api_base_url, cfg.request_timeout)
    }

    pub fn collection_url(&self) -> &str {
        &self.base_url
    }

    pub fn item_url(&self, id: FilmId) -> String {
        format!("{}{}/", self.base_url, id)
    }

    fn send_json(&self, req: reqwest::blocking::RequestBuilder, film: &Film) -> Result<Film, ApiError> {
        let body = serde_json::to_vec(film)?;
        let resp = req.header(CONTENT_TYPE, "application/json").body(body).send()?;
        decode(ensure_ok(resp)?)
    }
}

fn ensure_ok(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ApiError::Status(status.as_u16()));
    }
    Ok(resp)
}

fn decode<T: serde::de::DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let bytes = resp.bytes()?;
    Ok(serde_json::from_slice(&bytes)?)
}

impl FilmApi for HttpFilmApi {
    fn list(&self) -> Result<Vec<Film>, ApiError> {
        debug!("GET {}", self.collection_url());
        let resp = self.client.get(self.collection_url()).send()?;
        decode(ensure_ok(resp)?)
    }

    fn create(&self, film: &Film) -> Result<Film, ApiError> {
        debug!("POST {}", self.collection_url());
        self.send_json(self.client.post(self.collection_url()), film)
    }

    fn update(&self, id: FilmId, film: &Film) -> Result<Film, ApiError> {
        let url = self.item_url(id);
        debug!("PUT {url}");
        self.send_json(self.client.put(&url), film)
    }

    fn delete(&self, id: FilmId) -> Result<(), ApiError> {
        let url = self.item_url(id);
        debug!("DELETE {url}");
        ensure_ok(self.client.delete(&url).send()?)?;
        Ok(())
    }
}
