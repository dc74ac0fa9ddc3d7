use std::fmt;

mod checker;
mod fetcher;
mod github;
mod relation;
mod render;

pub use checker::*;
pub use fetcher::*;
pub use github::*;
pub use relation::*;
pub use render::*;

// Re-exports
pub use reqwest::StatusCode;

/// Default GitHub REST api base url
pub const API_URL: &str = "https://api.github.com";
/// Profile url prefix used when an entry carries no `html_url`
pub const PROFILE_URL: &str = "https://github.com/";
/// Number of entries requested per page
pub const PAGE_SIZE: u32 = 100;

/// Crate error
#[derive(Debug)]
pub enum Error {
    /// Non-success response to a page request
    Status {
        kind: RelationKind,
        status: StatusCode,
    },
    /// The request did not complete, or the page body was not a list of entries
    Http {
        kind: RelationKind,
        error: reqwest::Error,
    },
    /// A non-empty page was returned past the configured page ceiling
    PageLimit { kind: RelationKind, limit: u32 },
    /// Client configuration
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status { kind, status } => {
                let reason = status.canonical_reason().unwrap_or(status.as_str());
                write!(f, "Error fetching {kind}: {reason}")
            }
            Self::Http { kind, error } => write!(f, "Error fetching {kind}: {error}"),
            Self::PageLimit { kind, limit } => {
                write!(f, "Error fetching {kind}: more than {limit} pages")
            }
            Self::Config(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http { error, .. } => Some(error),
            _ => None,
        }
    }
}
