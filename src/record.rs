//! Normalization boundary between raw API JSON and typed records.
//!
//! Every list endpoint returns duck-typed JSON; nothing downstream of this
//! module ever sees a raw [`Value`]. Normalization never fails: missing
//! optional fields become `None` and unparseable dates become
//! [`PublicationDate::Unknown`].

use chrono::NaiveDate;
use serde_json::Value;

/// Partition name for records whose authors carry no research group.
pub const UNASSIGNED_GROUP: &str = "Unassigned";

/// A publication date that survived (or failed) parsing.
///
/// `Unknown` records stay in keyword, group, and multi-group aggregation but
/// are excluded from time-series bucketing, with the exclusion counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationDate {
    Known(NaiveDate),
    Unknown,
}

impl PublicationDate {
    /// Parse a wire date in `YYYY-MM-DD` format; anything else is `Unknown`.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
            .map(PublicationDate::Known)
            .unwrap_or(PublicationDate::Unknown)
    }

    pub fn known(&self) -> Option<NaiveDate> {
        match self {
            PublicationDate::Known(date) => Some(*date),
            PublicationDate::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, PublicationDate::Known(_))
    }
}

/// Where a publication record was harvested from. An open set: unrecognized
/// sources are carried through verbatim rather than dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Scopus,
    GoogleScholar,
    Orcid,
    Other(String),
}

impl Source {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Scopus" => Source::Scopus,
            "Google Scholar" => Source::GoogleScholar,
            "ORCID" => Source::Orcid,
            other => Source::Other(other.to_owned()),
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Scopus => write!(f, "Scopus"),
            Source::GoogleScholar => write!(f, "Google Scholar"),
            Source::Orcid => write!(f, "ORCID"),
            Source::Other(name) => write!(f, "{}", name),
        }
    }
}

/// A research group reference: id plus display name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRef {
    pub id: String,
    pub name: String,
}

/// Non-owning author reference as embedded in a publication record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub group: Option<GroupRef>,
}

impl AuthorRef {
    /// "First Last", matching how the dashboard labels chart series.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// Full author row with external identifiers, as returned by the authors
/// endpoint. Each identifier is independently optional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub group: Option<GroupRef>,
    pub scopus_id: Option<String>,
    pub scholar_id: Option<String>,
    pub orcid_id: Option<String>,
    pub staff_url: Option<String>,
}

impl AuthorRecord {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// A normalized publication. `id` is unique within one dataset snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicationRecord {
    pub id: String,
    pub title: String,
    pub date: PublicationDate,
    /// Free-text keyword field, comma-delimited; `None` when absent or blank.
    pub keywords: Option<String>,
    pub abstract_: Option<String>,
    pub url: Option<String>,
    pub source: Option<Source>,
    pub authors: Vec<AuthorRef>,
    /// Explicit group assignment, when the API supplies one directly.
    pub group: Option<GroupRef>,
}

impl PublicationRecord {
    /// Partition key for per-group reports: the explicit group, else the
    /// first author's group, else [`UNASSIGNED_GROUP`].
    pub fn group_name(&self) -> &str {
        if let Some(ref group) = self.group {
            return &group.name;
        }
        self.authors
            .iter()
            .find_map(|author| author.group.as_ref().map(|g| g.name.as_str()))
            .unwrap_or(UNASSIGNED_GROUP)
    }

    /// Distinct author group names, in first-seen order.
    pub fn distinct_group_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for author in &self.authors {
            if let Some(ref group) = author.group
                && !names.contains(&group.name.as_str())
            {
                names.push(&group.name);
            }
        }
        names
    }

    /// A publication is multi-group when its authors span at least two
    /// distinct research groups. Derived, never stored.
    pub fn is_multi_group(&self) -> bool {
        self.distinct_group_names().len() >= 2
    }
}

/// Normalize one raw publication object.
pub fn normalize(raw: &Value) -> PublicationRecord {
    PublicationRecord {
        id: coerce_id(raw.get("id")),
        title: string_field(raw, "title").unwrap_or_default(),
        date: PublicationDate::parse(raw.get("publication_date").and_then(Value::as_str)),
        keywords: string_field(raw, "keywords"),
        abstract_: string_field(raw, "abstract"),
        url: string_field(raw, "url"),
        source: raw
            .get("source")
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(Source::parse),
        authors: raw
            .get("authors")
            .and_then(Value::as_array)
            .map(|authors| authors.iter().map(normalize_author_ref).collect())
            .unwrap_or_default(),
        group: raw.get("research_group").and_then(normalize_group),
    }
}

/// Normalize a whole response list in one pass.
pub fn normalize_all(values: &[Value]) -> Vec<PublicationRecord> {
    values.iter().map(normalize).collect()
}

pub fn normalize_author_ref(raw: &Value) -> AuthorRef {
    AuthorRef {
        id: coerce_id(raw.get("id")),
        first_name: string_field(raw, "first_name").unwrap_or_default(),
        last_name: string_field(raw, "last_name").unwrap_or_default(),
        group: raw.get("research_group").and_then(normalize_group),
    }
}

pub fn normalize_author_record(raw: &Value) -> AuthorRecord {
    AuthorRecord {
        id: coerce_id(raw.get("id")),
        first_name: string_field(raw, "first_name").unwrap_or_default(),
        last_name: string_field(raw, "last_name").unwrap_or_default(),
        group: raw.get("research_group").and_then(normalize_group),
        scopus_id: string_field(raw, "scopus_id"),
        scholar_id: string_field(raw, "scholar_id"),
        orcid_id: string_field(raw, "orcid_id"),
        staff_url: string_field(raw, "staff_url"),
    }
}

pub fn normalize_group(raw: &Value) -> Option<GroupRef> {
    let name = string_field(raw, "name")?;
    Some(GroupRef {
        id: coerce_id(raw.get("id")),
        name,
    })
}

/// The wire sends ids as either numbers or strings, depending on endpoint.
fn coerce_id(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

/// Non-blank string field, trimmed of surrounding whitespace-only noise.
fn string_field(raw: &Value, key: &str) -> Option<String> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_owned)
}
