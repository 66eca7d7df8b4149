//! Wire-format helpers shared by the REST payloads

use serde::{Deserialize, Deserializer, Serialize};

/// List endpoints answer either with a bare array or with a page envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Bare(Vec<T>),
    Page {
        results: Vec<T>,
        #[serde(default)]
        count: Option<u64>,
        #[serde(default)]
        next: Option<String>,
        #[serde(default)]
        previous: Option<String>,
    },
}

impl<T> ListResponse<T> {
    /// Flatten either shape into a plain list
    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Page { results, .. } => results,
            ListResponse::Bare(items) => items,
        }
    }

    /// URL of the following page, if the backend paginates
    pub fn next_page(&self) -> Option<&str> {
        match self {
            ListResponse::Page { next, .. } => next.as_deref(),
            ListResponse::Bare(_) => None,
        }
    }
}

/// Backend ids may arrive as JSON numbers or strings
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(i64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    })
}
