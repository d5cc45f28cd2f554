//! Builds search-index query expressions from a [`SearchFilter`].

use crate::{
    mapper::DURATION_VARIABLE,
    models::{QueryField, SearchFilter},
};

/// Numeric docvar constraint attached to a search. `max` of `None` means
/// unbounded above ("at least `min`").
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeFilter {
    pub variable: u32,
    pub min: f64,
    pub max: Option<f64>,
}

/// Renders the filter as a space-joined `field:value` conjunction plus an
/// optional duration range filter.
///
/// When `match_all` is set, or when no clause field is present, the
/// expression collapses to `all:true`, matching the marker field written at
/// persist time. A duration constraint never contributes a clause of its
/// own: it rides along as a range filter on whatever expression results, so
/// a duration-only filter still queries `all:true`.
pub fn build(filter: &SearchFilter) -> (String, Option<RangeFilter>) {
    let mut clauses = Vec::new();

    if !filter.match_all {
        if let Some(year) = filter.year {
            clauses.push(clause(QueryField::Year, &year.to_string()));
        }
        if let Some(name) = present(&filter.name_contains) {
            clauses.push(clause(QueryField::Name, name));
        }
        if let Some(id) = present(&filter.external_id) {
            clauses.push(clause(QueryField::ExternalId, id));
        }
        if let Some(genre) = present(&filter.genre) {
            clauses.push(clause(QueryField::Genre, genre));
        }
    }

    let expression = if clauses.is_empty() {
        clause(QueryField::All, "true")
    } else {
        clauses.join(" ")
    };

    let range = filter.duration_minutes.map(|minutes| RangeFilter {
        variable: DURATION_VARIABLE,
        min: f64::from(minutes),
        max: None,
    });

    (expression, range)
}

fn clause(field: QueryField, value: &str) -> String {
    format!("{}:{}", field.as_str(), value)
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_filters_falls_back_to_all_true() {
        let (expr, range) = build(&SearchFilter::default());
        assert_eq!(expr, "all:true");
        assert_eq!(range, None);
    }

    #[test]
    fn clauses_render_in_fixed_order() {
        let filter = SearchFilter {
            name_contains: Some("Matrix".to_string()),
            year: Some(2010),
            ..Default::default()
        };
        let (expr, range) = build(&filter);
        assert_eq!(expr, "year:2010 name:Matrix");
        assert_eq!(range, None);
    }

    #[test]
    fn all_clause_fields_in_order() {
        let filter = SearchFilter {
            year: Some(1999),
            name_contains: Some("Matrix".to_string()),
            external_id: Some("603".to_string()),
            genre: Some("Action".to_string()),
            ..Default::default()
        };
        let (expr, _) = build(&filter);
        assert_eq!(expr, "year:1999 name:Matrix external_id:603 genres:Action");
    }

    #[test]
    fn duration_only_keeps_fallback_expression_with_range() {
        let filter = SearchFilter { duration_minutes: Some(90), ..Default::default() };
        let (expr, range) = build(&filter);
        assert_eq!(expr, "all:true");
        assert_eq!(range, Some(RangeFilter { variable: 0, min: 90.0, max: None }));
    }

    #[test]
    fn match_all_overrides_present_fields() {
        let filter = SearchFilter {
            match_all: true,
            genre: Some("Horror".to_string()),
            ..Default::default()
        };
        let (expr, range) = build(&filter);
        assert_eq!(expr, "all:true");
        assert_eq!(range, None);
    }

    #[test]
    fn empty_strings_do_not_produce_clauses() {
        let filter = SearchFilter {
            name_contains: Some(String::new()),
            genre: Some(String::new()),
            duration_minutes: Some(120),
            ..Default::default()
        };
        let (expr, range) = build(&filter);
        assert_eq!(expr, "all:true");
        assert_eq!(range, Some(RangeFilter { variable: 0, min: 120.0, max: None }));
    }
}
