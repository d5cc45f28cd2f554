use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::{
    error::AppResult,
    mapper::IndexPayload,
    query::RangeFilter,
};

pub struct IndexClient {
    client: reqwest::Client,
    base_url: String,
    index_name: String,
}

#[derive(Clone, Copy, Debug)]
pub struct SearchOptions<'a> {
    /// Exact field set to fetch back for each hit.
    pub fetch_fields: &'a [&'a str],
    pub range: Option<RangeFilter>,
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<BTreeMap<String, Value>>,
}

impl IndexClient {
    pub fn new(client: reqwest::Client, base_url: String, index_name: String) -> Self {
        Self { client, base_url, index_name }
    }

    /// Upserts a document under `key`. Re-adding the same key overwrites the
    /// prior document; the index imposes no insert-only semantics and
    /// neither do we.
    pub async fn add(&self, key: &str, payload: &IndexPayload) -> AppResult<()> {
        let url = format!("{}/docs", self.index_base());

        let variables: BTreeMap<String, f64> =
            payload.variables.iter().map(|(k, v)| (k.to_string(), *v)).collect();

        debug!(docid = %key, "adding document to index");

        self.client
            .put(url)
            .json(&json!({
                "docid": key,
                "fields": payload.fields,
                "variables": variables,
            }))
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }

    /// Runs a field-conjunction query. No matches is an empty list, never an
    /// error.
    pub async fn search(
        &self,
        expression: &str,
        opts: &SearchOptions<'_>,
    ) -> AppResult<Vec<BTreeMap<String, String>>> {
        let url = format!("{}/search", self.index_base());

        let mut params: Vec<(String, String)> = vec![
            ("q".to_string(), expression.to_string()),
            ("fetch".to_string(), opts.fetch_fields.join(",")),
            ("len".to_string(), opts.limit.to_string()),
        ];
        if let Some(range) = opts.range {
            params.push((format!("filter_docvar{}", range.variable), render_range(&range)));
        }

        debug!(q = %expression, "searching index");

        let resp: SearchResponse = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(hits = resp.results.len(), "search completed");

        Ok(resp.results.into_iter().map(flatten).collect())
    }

    fn index_base(&self) -> String {
        format!(
            "{}/v1/indexes/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.index_name)
        )
    }
}

/// `min:*` / `min:max` docvar range syntax.
fn render_range(range: &RangeFilter) -> String {
    match range.max {
        Some(max) => format!("{}:{}", range.min, max),
        None => format!("{}:*", range.min),
    }
}

/// Index hits arrive as loosely typed JSON; the mapper wants flat strings.
/// Nulls are dropped, scalars stringified, anything structured ignored.
fn flatten(doc: BTreeMap<String, Value>) -> BTreeMap<String, String> {
    doc.into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((key, text))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_renders_open_and_closed_bounds() {
        assert_eq!(render_range(&RangeFilter { variable: 0, min: 90.0, max: None }), "90:*");
        assert_eq!(
            render_range(&RangeFilter { variable: 0, min: 60.0, max: Some(120.0) }),
            "60:120"
        );
    }

    #[test]
    fn flatten_keeps_scalars_and_drops_the_rest() {
        let doc: BTreeMap<String, Value> = serde_json::from_value(serde_json::json!({
            "name": "Alien",
            "year": 1979,
            "all": true,
            "thumb_url": null,
            "extra": {"nested": 1}
        }))
        .unwrap();
        let flat = flatten(doc);
        assert_eq!(flat.get("name").map(String::as_str), Some("Alien"));
        assert_eq!(flat.get("year").map(String::as_str), Some("1979"));
        assert_eq!(flat.get("all").map(String::as_str), Some("true"));
        assert!(!flat.contains_key("thumb_url"));
        assert!(!flat.contains_key("extra"));
    }

    #[test]
    fn empty_results_deserialize_to_empty_list() {
        let resp: SearchResponse = serde_json::from_str(r#"{"matches": 0}"#).unwrap();
        assert!(resp.results.is_empty());
    }
}
