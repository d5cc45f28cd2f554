use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub tmdb_api_key: String,
    pub tmdb_base_url: String,
    pub index_url: String,
    pub index_name: String,
    pub http_timeout_secs: u64,
    pub tmdb_rps: u32,
    pub search_result_limit: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().context("PORT")?;

        let tmdb_api_key = std::env::var("TMDB_API_KEY").unwrap_or_else(|_| "".to_string());
        let tmdb_base_url = std::env::var("TMDB_BASE_URL")
            .unwrap_or_else(|_| "https://api.themoviedb.org/3".to_string());

        let index_url = std::env::var("INDEX_URL")
            .unwrap_or_else(|_| "http://localhost:20220".to_string());
        let index_name = std::env::var("INDEX_NAME").unwrap_or_else(|_| "movies".to_string());

        let http_timeout_secs: u64 =
            std::env::var("HTTP_TIMEOUT_SECS").ok().and_then(|s| s.parse().ok()).unwrap_or(10);

        let tmdb_rps: u32 =
            std::env::var("TMDB_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(4);

        let search_result_limit: usize =
            std::env::var("SEARCH_RESULT_LIMIT").ok().and_then(|s| s.parse().ok()).unwrap_or(50);

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            tmdb_api_key,
            tmdb_base_url,
            index_url,
            index_name,
            http_timeout_secs,
            tmdb_rps,
            search_result_limit,
        })
    }
}
