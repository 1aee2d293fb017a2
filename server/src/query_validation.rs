use anyhow::{Result, anyhow};
use std::collections::HashMap;

/// Validated pagination parameters for the query-listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQueriesParams {
    pub limit: u64,
    pub offset: u64,
    pub descending: bool,
}

/// Validate and normalize the raw query string of the listing endpoint.
/// Unrecognized parameters are rejected outright, before any storage access.
pub struct ListQueriesValidator {
    default_limit: u64,
    max_limit: u64,
}

impl ListQueriesValidator {
    pub fn new(default_limit: u64, max_limit: u64) -> Self {
        Self {
            default_limit,
            max_limit,
        }
    }

    pub fn validate(&self, raw: &HashMap<String, String>) -> Result<ListQueriesParams> {
        for key in raw.keys() {
            if !matches!(key.as_str(), "limit" | "offset" | "descending") {
                return Err(anyhow!("Unrecognized query parameter: '{}'", key));
            }
        }

        let limit = match raw.get("limit") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| anyhow!("'limit' must be a positive integer"))?,
            None => self.default_limit,
        };
        if limit < 1 || limit > self.max_limit {
            return Err(anyhow!("'limit' must be between 1 and {}", self.max_limit));
        }

        let offset = match raw.get("offset") {
            Some(value) => value
                .parse::<u64>()
                .map_err(|_| anyhow!("'offset' must be a non-negative integer"))?,
            None => 0,
        };

        let descending = match raw.get("descending") {
            Some(value) => {
                parse_bool(value).ok_or_else(|| anyhow!("'descending' must be a boolean"))?
            }
            None => false,
        };

        Ok(ListQueriesParams {
            limit,
            offset,
            descending,
        })
    }
}

// The usual query-string bool spellings.
fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
