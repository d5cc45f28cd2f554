use std::sync::Arc;

use axum::{
    extract::{Form, Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::warn;

use crate::{
    AppState,
    error::{AppError, AppResult},
    index::SearchOptions,
    mapper,
    models::{ATTRIBUTE_FIELDS, MovieRecord, SearchFilter},
    query, templates,
};

pub async fn index() -> Html<String> {
    Html(templates::index_page())
}

/// Raw query-string form of a search. Everything arrives as optional text;
/// normalization into a [`SearchFilter`] happens here, per request — no
/// filter state survives the request.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    year: Option<String>,
    name: Option<String>,
    external_id: Option<String>,
    genre: Option<String>,
    duration: Option<String>,
    all: Option<String>,
}

impl SearchParams {
    fn into_filter(self) -> SearchFilter {
        SearchFilter {
            year: trimmed(self.year).and_then(|s| s.parse().ok()),
            name_contains: trimmed(self.name),
            external_id: trimmed(self.external_id),
            genre: trimmed(self.genre),
            match_all: matches!(self.all.as_deref(), Some("on" | "true" | "1")),
            duration_minutes: trimmed(self.duration).and_then(|s| s.parse().ok()),
        }
    }
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> AppResult<Html<String>> {
    let filter = params.into_filter();
    let (expression, range) = query::build(&filter);

    let opts = SearchOptions {
        fetch_fields: &ATTRIBUTE_FIELDS,
        range,
        limit: state.config.search_result_limit,
    };

    let mut movies: Vec<MovieRecord> = match state.index.search(&expression, &opts).await {
        Ok(docs) => docs.iter().map(mapper::from_index_document).collect(),
        Err(err) if err.is_upstream() => {
            // Degrade to an empty result set rather than an error page.
            warn!(error = %err, q = %expression, "index search failed");
            Vec::new()
        },
        Err(err) => return Err(err),
    };

    sort_by_name(&mut movies);

    Ok(Html(templates::results_page(&filter, &movies)))
}

/// Display order for every route that renders a result list.
fn sort_by_name(movies: &mut [MovieRecord]) {
    movies.sort_by(|a, b| a.name.cmp(&b.name));
}

/// Upstream faults during a metadata lookup degrade to the search/add form,
/// the same place a missing movie lands. Anything else stays an error.
fn lookup_redirect(err: AppError) -> AppResult<Redirect> {
    if err.is_upstream() {
        warn!(error = %err, "metadata lookup failed");
        Ok(Redirect::to("/"))
    } else {
        Err(err)
    }
}

pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(external_id): Path<String>,
) -> AppResult<Response> {
    let payload = match state.tmdb.get_movie(&external_id).await {
        Ok(payload) => payload,
        Err(err) => return lookup_redirect(err).map(IntoResponse::into_response),
    };
    let movie = mapper::from_metadata(&payload)?;
    Ok(Html(templates::detail_page(&movie)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct AddRequest {
    pub external_id: String,
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    Form(req): Form<AddRequest>,
) -> AppResult<Response> {
    let external_id = req.external_id.trim().to_string();
    if external_id.is_empty() {
        return Err(anyhow::anyhow!("an external id is required").into());
    }

    let payload = match state.tmdb.get_movie(&external_id).await {
        Ok(payload) => payload,
        Err(err) => return lookup_redirect(err).map(IntoResponse::into_response),
    };
    let movie = mapper::from_metadata(&payload)?;
    let doc = mapper::to_index_payload(&movie);

    state.index.add(&movie.external_id, &doc).await?;

    tracing::info!(external_id = %movie.external_id, name = %movie.name, "movie added to index");

    let location = format!("/movies/{}", urlencoding::encode(&movie.external_id));
    Ok(Redirect::to(&location).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_normalize_into_a_filter() {
        let params = SearchParams {
            year: Some(" 2010 ".to_string()),
            name: Some("Matrix".to_string()),
            external_id: Some(String::new()),
            genre: None,
            duration: Some("90".to_string()),
            all: Some("on".to_string()),
        };
        let filter = params.into_filter();
        assert_eq!(filter.year, Some(2010));
        assert_eq!(filter.name_contains.as_deref(), Some("Matrix"));
        assert_eq!(filter.external_id, None);
        assert_eq!(filter.duration_minutes, Some(90));
        assert!(filter.match_all);
    }

    #[test]
    fn results_sort_by_name_ascending() {
        let mut movies = vec![
            MovieRecord { name: "Zodiac".to_string(), ..Default::default() },
            MovieRecord { name: "Alien".to_string(), ..Default::default() },
            MovieRecord { name: "Heat".to_string(), ..Default::default() },
        ];
        sort_by_name(&mut movies);
        let names: Vec<&str> = movies.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Alien", "Heat", "Zodiac"]);
    }

    #[test]
    fn upstream_lookup_faults_redirect_to_the_form() {
        // Timeouts and outages send the user back to the form instead of
        // surfacing an error page.
        assert!(lookup_redirect(AppError::UpstreamTimeout).is_ok());

        // A missing movie keeps its own recoverable path (the error's
        // response is already a redirect), and programmer errors stay fatal.
        assert!(matches!(
            lookup_redirect(AppError::UpstreamDataMissing),
            Err(AppError::UpstreamDataMissing)
        ));
        assert!(matches!(
            lookup_redirect(AppError::UnsupportedQueryField("overview".to_string())),
            Err(AppError::UnsupportedQueryField(_))
        ));
    }

    #[test]
    fn unparsable_numbers_drop_out_of_the_filter() {
        let params = SearchParams {
            year: Some("nineteen-eighty".to_string()),
            duration: Some("long".to_string()),
            ..Default::default()
        };
        let filter = params.into_filter();
        assert_eq!(filter.year, None);
        assert_eq!(filter.duration_minutes, None);
        assert!(filter.is_empty());
    }
}
