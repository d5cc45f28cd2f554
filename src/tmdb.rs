use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{AppError, AppResult};

pub struct TmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        if api_key.trim().is_empty() {
            tracing::warn!("no TMDB_API_KEY provided, metadata lookups will fail");
        }

        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, base_url, limiter }
    }

    /// Fetches the raw single-movie payload by external id. The payload is
    /// handed to the mapper as-is; this client only distinguishes "no such
    /// movie" from transport failure.
    pub async fn get_movie(&self, external_id: &str) -> AppResult<Value> {
        self.limiter.until_ready().await;

        let url = format!(
            "{}/movie/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(external_id)
        );

        tracing::debug!(external_id = %external_id, "fetching movie metadata");

        let resp = self
            .client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        if resp.status() == StatusCode::NOT_FOUND {
            return Err(AppError::UpstreamDataMissing);
        }

        let payload: Value = resp.error_for_status()?.json().await?;
        if payload.is_null() {
            return Err(AppError::UpstreamDataMissing);
        }
        Ok(payload)
    }
}
