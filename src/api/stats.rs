//! Dashboard statistics endpoints.
//!
//! All aggregate payloads come back as duck-typed JSON maps; each query
//! normalizes into the same types the local aggregators produce, so a page
//! can switch between server-computed and locally-computed views without
//! caring which it got.

use crate::{
    aggregate::{GroupAuthorMatrix, GroupTotals, KeywordCount, KeywordCountMap, MultiGroupPapers},
    client::{Method, PubTracker, Query, build_request, expect_json},
    error::{Error, Result},
    record::{PublicationRecord, normalize},
};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

/// Dashboard landing-page summary.
///
/// `GET /index/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SummaryParam;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SummaryCounts {
    pub authors_count: u64,
    pub publications_count: u64,
    pub research_groups_count: u64,
    pub author_publications_count: u64,
}

impl Query for SummaryParam {
    type Response = SummaryCounts;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let resp = build_request(client, Method::Get, "/index/").send().await?;
        expect_json(resp).await
    }
}

/// Publications newer than a given date.
///
/// `GET /stats/new-papers/?since=YYYY-MM-DD`
///
/// The server rejects a missing `since`; the builder rejects it first, so
/// the orchestrator never enters Loading for an invalid request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewPublicationsParam {
    since: NaiveDate,
}

impl NewPublicationsParam {
    pub fn new(since: Option<NaiveDate>) -> Result<Self> {
        match since {
            Some(since) => Ok(Self { since }),
            None => Err(Error::Validation(
                "missing 'since' date (format: YYYY-MM-DD)".to_owned(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPublications {
    pub count: u64,
    pub since: NaiveDate,
    pub papers: Vec<PublicationRecord>,
}

impl Query for NewPublicationsParam {
    type Response = NewPublications;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let req_builder = build_request(client, Method::Get, "/stats/new-papers/")
            .query(&[("since", self.since.format("%Y-%m-%d").to_string())]);
        let resp = req_builder.send().await?;
        let body: Value = expect_json(resp).await?;
        let papers: Vec<PublicationRecord> = body
            .get("papers")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(normalize)
            .collect();
        let count = body
            .get("count")
            .and_then(Value::as_u64)
            .unwrap_or(papers.len() as u64);
        Ok(NewPublications {
            count,
            since: self.since,
            papers,
        })
    }
}

/// Keyword counts, optionally restricted to publications after a date.
///
/// `GET /stats/keywords/[?since=YYYY-MM-DD]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordCountsParam {
    since: Option<NaiveDate>,
}

impl KeywordCountsParam {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn since(since: NaiveDate) -> Self {
        Self { since: Some(since) }
    }
}

impl Query for KeywordCountsParam {
    type Response = KeywordCountMap;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let mut req_builder = build_request(client, Method::Get, "/stats/keywords/");
        if let Some(since) = self.since {
            req_builder = req_builder.query(&[("since", since.format("%Y-%m-%d").to_string())]);
        }
        let resp = req_builder.send().await?;
        let body: Value = expect_json(resp).await?;
        let map = body
            .get("keywords")
            .ok_or_else(|| Error::MalformedResponse("missing 'keywords' map".to_owned()))?;
        Ok(keyword_map_from_wire(map))
    }
}

/// Keyword counts partitioned by research group.
///
/// `GET /stats/keywords-per-group/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeywordCountsPerGroupParam;

impl Query for KeywordCountsPerGroupParam {
    type Response = IndexMap<String, KeywordCountMap>;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let resp = build_request(client, Method::Get, "/stats/keywords-per-group/")
            .send()
            .await?;
        let body: Value = expect_json(resp).await?;
        let groups = body
            .as_object()
            .ok_or_else(|| Error::MalformedResponse("expected a per-group map".to_owned()))?;
        Ok(groups
            .iter()
            .map(|(group, counts)| (group.clone(), keyword_map_from_wire(counts)))
            .collect())
    }
}

/// Publications spanning multiple research groups.
///
/// `GET /stats/multi-group-papers/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MultiGroupStatsParam;

impl Query for MultiGroupStatsParam {
    type Response = MultiGroupPapers;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let resp = build_request(client, Method::Get, "/stats/multi-group-papers/")
            .send()
            .await?;
        let body: Value = expect_json(resp).await?;
        let publications: Vec<PublicationRecord> = body
            .get("publications")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(normalize)
            .collect();
        let count = body
            .get("count")
            .and_then(Value::as_u64)
            .map(|count| count as usize)
            .unwrap_or(publications.len());
        Ok(MultiGroupPapers {
            count,
            publications,
        })
    }
}

/// Per-group, per-author multi-group paper counts.
///
/// `GET /stats/group-author-multi-group/`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupAuthorStatsParam;

impl Query for GroupAuthorStatsParam {
    type Response = GroupAuthorMatrix;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let resp = build_request(client, Method::Get, "/stats/group-author-multi-group/")
            .send()
            .await?;
        let body: Value = expect_json(resp).await?;
        let data = body
            .get("data")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::MalformedResponse("missing 'data' map".to_owned()))?;
        let mut matrix = GroupAuthorMatrix::new();
        for (group, authors) in data {
            let mut counts: IndexMap<String, u64> = IndexMap::new();
            if let Some(authors) = authors.as_object() {
                for (author, count) in authors {
                    counts.insert(author.clone(), count.as_u64().unwrap_or(0));
                }
            }
            matrix.insert(group.clone(), counts);
        }
        Ok(matrix)
    }
}

/// Every publication, partitioned by research group.
///
/// `GET /stats/total-papers-per-group/`
///
/// Record lists are normalized and retained so chart selections resolve
/// locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GroupTotalsParam;

impl Query for GroupTotalsParam {
    type Response = GroupTotals;

    async fn query(&self, client: &PubTracker) -> Result<Self::Response> {
        let resp = build_request(client, Method::Get, "/stats/total-papers-per-group/")
            .send()
            .await?;
        let body: Value = expect_json(resp).await?;
        let data = body
            .get("data")
            .and_then(Value::as_object)
            .ok_or_else(|| Error::MalformedResponse("missing 'data' map".to_owned()))?;
        let mut partitions: IndexMap<String, Vec<PublicationRecord>> = IndexMap::new();
        for (group, publications) in data {
            let records = publications
                .as_array()
                .map(Vec::as_slice)
                .unwrap_or_default()
                .iter()
                .map(normalize)
                .collect();
            partitions.insert(group.clone(), records);
        }
        Ok(GroupTotals::from_partitions(partitions))
    }
}

/// The server lowercases keyword keys before counting, so the wire key
/// doubles as both the grouping key and the display label. Keys that still
/// collide after normalization are summed, first-seen casing winning the
/// label, same as the local counter.
fn keyword_map_from_wire(raw: &Value) -> KeywordCountMap {
    let mut counts = KeywordCountMap::new();
    if let Some(map) = raw.as_object() {
        for (keyword, count) in map {
            let count = count.as_u64().unwrap_or(0);
            counts
                .entry(keyword.trim().to_lowercase())
                .and_modify(|kw| kw.count += count)
                .or_insert_with(|| KeywordCount {
                    label: keyword.trim().to_owned(),
                    count,
                });
        }
    }
    counts
}
