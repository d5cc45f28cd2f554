use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The metadata provider returned no usable movie payload (unknown id).
    /// Recoverable: callers send the user back to the search/add form.
    #[error("movie not found upstream")]
    UpstreamDataMissing,

    /// An outbound call exceeded its bound.
    #[error("upstream request timed out")]
    UpstreamTimeout,

    /// An outbound call failed in transport or returned a server error.
    #[error("upstream unavailable: {0}")]
    UpstreamUnavailable(#[source] reqwest::Error),

    /// A query selector outside the fixed field set. Programmer error, not
    /// user input: the filter fields are a closed enumeration.
    #[error("unsupported query field: {0}")]
    UnsupportedQueryField(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Upstream faults degrade to "no results" rather than an error page.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            AppError::UpstreamTimeout | AppError::UpstreamUnavailable(_)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::UpstreamTimeout
        } else {
            AppError::UpstreamUnavailable(err)
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::UpstreamDataMissing => Redirect::to("/").into_response(),
            other => {
                let body = crate::templates::error_page(other.to_string());
                (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
            },
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
