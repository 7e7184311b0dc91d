//! List and search publications.
//!
//! `GET /publications/`
//!
//! Group, author, and source filters are applied server-side; keyword
//! substring, since-date, and multi-group filters are applied client-side on
//! the normalized records, since the server does not expose them.

use crate::{
    client::{Method, PubTracker, Query, build_request, expect_json},
    error::Result,
    record::{
        AuthorRecord, GroupRef, PublicationRecord, Source, normalize, normalize_author_record,
        normalize_group,
    },
};
use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

/// Query parameters for the publication search
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationSearchParam {
    group: Option<String>,
    author: Option<String>,
    source: Option<Source>,
    keyword: Option<String>,
    since: Option<NaiveDate>,
    multi_group_only: bool,
}

/// Builder for the publication search parameters
#[derive(Debug, Clone, Default)]
pub struct PublicationSearchParamBuilder {
    group: Option<String>,
    author: Option<String>,
    source: Option<Source>,
    keyword: Option<String>,
    since: Option<NaiveDate>,
    multi_group_only: bool,
}

impl PublicationSearchParamBuilder {
    /// Restrict to publications with an author in the given research group.
    pub fn group(&mut self, group_id: &str) -> &mut Self {
        self.group = Some(group_id.to_owned());
        self
    }

    /// Restrict to publications by the given author.
    pub fn author(&mut self, author_id: &str) -> &mut Self {
        self.author = Some(author_id.to_owned());
        self
    }

    /// Restrict to publications harvested from the given source.
    pub fn source(&mut self, source: Source) -> &mut Self {
        self.source = Some(source);
        self
    }

    /// Keep only publications whose keyword field contains the substring,
    /// case-insensitive. Applied client-side.
    pub fn keyword(&mut self, keyword: &str) -> &mut Self {
        self.keyword = Some(keyword.to_owned());
        self
    }

    /// Keep only publications dated strictly after `since`. Applied
    /// client-side; unknown-date records are dropped by this filter.
    pub fn since(&mut self, since: NaiveDate) -> &mut Self {
        self.since = Some(since);
        self
    }

    /// Keep only publications whose authors span two or more groups.
    pub fn multi_group_only(&mut self) -> &mut Self {
        self.multi_group_only = true;
        self
    }

    pub fn build(&self) -> PublicationSearchParam {
        PublicationSearchParam {
            group: self.group.clone(),
            author: self.author.clone(),
            source: self.source.clone(),
            keyword: self.keyword.clone(),
            since: self.since,
            multi_group_only: self.multi_group_only,
        }
    }
}

/// Everything the publications endpoint returns in one response: the
/// filtered publications plus the full group and author lists the dashboard
/// uses to populate its filter dropdowns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PublicationBundle {
    pub publications: Vec<PublicationRecord>,
    pub research_groups: Vec<GroupRef>,
    pub authors: Vec<AuthorRecord>,
}

impl PublicationSearchParam {
    fn keep(&self, record: &PublicationRecord) -> bool {
        if let Some(ref keyword) = self.keyword {
            let needle = keyword.to_lowercase();
            let matched = record
                .keywords
                .as_deref()
                .is_some_and(|keywords| keywords.to_lowercase().contains(&needle));
            if !matched {
                return false;
            }
        }
        if let Some(since) = self.since {
            match record.date.known() {
                Some(date) if date > since => (),
                _ => return false,
            }
        }
        if self.multi_group_only && !record.is_multi_group() {
            return false;
        }
        true
    }
}

impl Query for PublicationSearchParam {
    type Response = PublicationBundle;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let mut req_builder = build_request(client, Method::Get, "/publications/");
        if let Some(ref group) = self.group {
            req_builder = req_builder.query(&[("group", group)]);
        }
        if let Some(ref author) = self.author {
            req_builder = req_builder.query(&[("author", author)]);
        }
        if let Some(ref source) = self.source {
            req_builder = req_builder.query(&[("source", &source.to_string())]);
        }

        let resp = req_builder.send().await?;
        let body: Value = expect_json(resp).await?;

        let fetched = body
            .get("publications")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(normalize);
        let publications: Vec<PublicationRecord> =
            fetched.filter(|record| self.keep(record)).collect();
        debug!(kept = publications.len(), "publication search completed");

        let research_groups = body
            .get("research_groups")
            .and_then(Value::as_array)
            .map(|groups| groups.iter().filter_map(normalize_group).collect())
            .unwrap_or_default();
        let authors = body
            .get("authors")
            .and_then(Value::as_array)
            .map(|authors| authors.iter().map(normalize_author_record).collect())
            .unwrap_or_default();

        Ok(PublicationBundle {
            publications,
            research_groups,
            authors,
        })
    }
}
