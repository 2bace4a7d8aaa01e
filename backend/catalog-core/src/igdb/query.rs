//! Apicalypse query bodies for IGDB.
//!
//! IGDB takes its query as a plain-text POST body:
//!
//! ```text
//! search "zelda"; fields name, category; where category != (1,2,6,7); limit 35;
//! ```

use crate::error::CatalogError;

/// IGDB rejects limits above this.
pub const IGDB_MAX_LIMIT: usize = 500;

/// Builder for a validated Apicalypse query body.
#[derive(Debug, Default)]
pub struct IgdbQueryBuilder {
    search: Option<String>,
    fields: Vec<String>,
    filters: Vec<String>,
    limit: Option<usize>,
}

impl IgdbQueryBuilder {
    /// Free-text search. Quotes and backslashes are escaped.
    pub fn with_search(mut self, term: impl AsRef<str>) -> Self {
        self.search = Some(escape_search_term(term.as_ref()));
        self
    }

    pub fn with_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Add a `where` clause; multiple filters are joined with `&`.
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filters.push(filter.into());
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build the body with validation.
    #[track_caller]
    pub fn build(self) -> Result<String, CatalogError> {
        if self.fields.is_empty() {
            return Err(CatalogError::internal("IGDB query needs at least one field"));
        }

        if let Some(limit) = self.limit {
            if limit == 0 || limit > IGDB_MAX_LIMIT {
                return Err(CatalogError::internal(format!(
                    "IGDB query limit must be 1-{IGDB_MAX_LIMIT}, got {limit}"
                )));
            }
        }

        let mut body = String::new();

        if let Some(term) = &self.search {
            body.push_str(&format!("search \"{term}\"; "));
        }

        body.push_str(&format!("fields {}; ", self.fields.join(", ")));

        if !self.filters.is_empty() {
            body.push_str(&format!("where {}; ", self.filters.join(" & ")));
        }

        if let Some(limit) = self.limit {
            body.push_str(&format!("limit {limit};"));
        }

        Ok(body.trim_end().to_string())
    }
}

/// Escape a user search term for use inside an Apicalypse string literal.
pub fn escape_search_term(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' | '\r' | '\t' => escaped.push(' '),
            other => escaped.push(other),
        }
    }
    escaped
}
