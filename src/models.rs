use crate::error::{AppError, AppResult};

/// Canonical attribute schema shared by the mapper and the index client.
/// `fetch` lists sent to the index are derived from this, never from
/// enumerating struct fields at runtime.
pub const ATTRIBUTE_FIELDS: [&str; 11] = [
    "name",
    "overview",
    "language",
    "cover_url",
    "thumb_url",
    "year",
    "external_id",
    "alternate_id",
    "duration_minutes",
    "certification",
    "genres",
];

/// In-memory movie entity. Built transiently from a metadata lookup or an
/// index document; immutable after construction. Its only durable form is
/// the document persisted to the search index under `external_id`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct MovieRecord {
    pub name: String,
    pub overview: String,
    pub language: String,
    pub cover_url: Option<String>,
    pub thumb_url: Option<String>,
    pub year: Option<i16>,
    pub external_id: String,
    pub alternate_id: Option<String>,
    pub duration_minutes: Option<u32>,
    pub certification: Option<String>,
    /// Comma-and-space joined, alphabetically sorted. Kept as a single flat
    /// string to match the index's field model.
    pub genres: Option<String>,
}

/// One search request's worth of filters. Constructed per request from the
/// query string, consumed once by the query builder. Never stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchFilter {
    pub year: Option<i16>,
    pub name_contains: Option<String>,
    pub external_id: Option<String>,
    pub genre: Option<String>,
    pub match_all: bool,
    pub duration_minutes: Option<u32>,
}

impl SearchFilter {
    pub fn is_empty(&self) -> bool {
        self.year.is_none()
            && self.name_contains.is_none()
            && self.external_id.is_none()
            && self.genre.is_none()
            && !self.match_all
            && self.duration_minutes.is_none()
    }
}

/// The closed set of queryable index fields.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum QueryField {
    Year,
    Name,
    ExternalId,
    Genre,
    All,
}

impl QueryField {
    pub fn as_str(self) -> &'static str {
        match self {
            QueryField::Year => "year",
            QueryField::Name => "name",
            QueryField::ExternalId => "external_id",
            QueryField::Genre => "genres",
            QueryField::All => "all",
        }
    }

    pub fn parse(name: &str) -> AppResult<Self> {
        match name {
            "year" => Ok(QueryField::Year),
            "name" => Ok(QueryField::Name),
            "external_id" => Ok(QueryField::ExternalId),
            "genres" => Ok(QueryField::Genre),
            "all" => Ok(QueryField::All),
            other => Err(AppError::UnsupportedQueryField(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_field_round_trips_through_names() {
        for field in [
            QueryField::Year,
            QueryField::Name,
            QueryField::ExternalId,
            QueryField::Genre,
            QueryField::All,
        ] {
            assert_eq!(QueryField::parse(field.as_str()).unwrap(), field);
        }
    }

    #[test]
    fn query_field_rejects_unknown_selector() {
        assert!(matches!(
            QueryField::parse("certification"),
            Err(AppError::UnsupportedQueryField(_))
        ));
    }

    #[test]
    fn default_filter_is_empty() {
        assert!(SearchFilter::default().is_empty());
        let filter = SearchFilter { match_all: true, ..Default::default() };
        assert!(!filter.is_empty());
    }
}
