//! List and search authors.
//!
//! `GET /authors/`
//!
//! `/authors/?search={term}` matches on first or last name, case-insensitive
//! on the server side.

use crate::{
    client::{Method, PubTracker, Query, build_request, expect_json},
    error::Result,
    record::{AuthorRecord, normalize_author_record},
};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthorListParam {
    search: Option<String>,
}

impl AuthorListParam {
    /// List all authors.
    pub fn all() -> Self {
        Self::default()
    }

    /// Search authors by name fragment.
    pub fn search(term: &str) -> Self {
        Self {
            search: Some(term.to_owned()),
        }
    }
}

impl Query for AuthorListParam {
    type Response = Vec<AuthorRecord>;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let mut req_builder = build_request(client, Method::Get, "/authors/");
        if let Some(ref search) = self.search
            && !search.is_empty()
        {
            req_builder = req_builder.query(&[("search", search)]);
        }
        let resp = req_builder.send().await?;
        let raw: Vec<Value> = expect_json(resp).await?;
        Ok(raw.iter().map(normalize_author_record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_author_record_normalization() {
        let raw = json!({
            "id": 5,
            "first_name": "Jane",
            "last_name": "Doe",
            "research_group": {"id": 2, "name": "Bioinformatics"},
            "scopus_id": "12345",
            "scholar_id": null,
            "orcid_id": "0000-0001-2345-6789",
            "staff_url": "https://staff.example.edu/jdoe"
        });
        let record = normalize_author_record(&raw);
        assert_eq!(record.display_name(), "Jane Doe");
        assert_eq!(record.group.as_ref().unwrap().name, "Bioinformatics");
        assert_eq!(record.scopus_id.as_deref(), Some("12345"));
        assert_eq!(record.scholar_id, None);
        assert_eq!(record.orcid_id.as_deref(), Some("0000-0001-2345-6789"));
    }
}
