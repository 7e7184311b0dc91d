//! Drill-down selection state.
//!
//! Tracks the facet a user clicked on (keyword, author, or group) together
//! with the publications behind it, resolved from data already in hand so no
//! follow-up fetch is needed.

use crate::aggregate::GroupTotals;
use crate::record::PublicationRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet {
    Keyword(String),
    /// Author id.
    Author(String),
    Group(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub facet: Facet,
    pub records: Vec<PublicationRecord>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    current: Option<Selection>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Selection> {
        self.current.as_ref()
    }

    /// Select a group from a cached [`GroupTotals`] aggregate. Returns
    /// `false` (selection unchanged) when the group does not exist.
    pub fn select_group(&mut self, totals: &GroupTotals, name: &str) -> bool {
        match totals.records_for(name) {
            Some(records) => {
                self.current = Some(Selection {
                    facet: Facet::Group(name.to_owned()),
                    records: records.to_vec(),
                });
                true
            }
            None => false,
        }
    }

    /// Select every record whose keyword field contains `keyword` as a
    /// token, compared case-insensitively after trimming.
    pub fn select_keyword(&mut self, records: &[PublicationRecord], keyword: &str) {
        let needle = keyword.trim().to_lowercase();
        let matched = records
            .iter()
            .filter(|record| {
                record.keywords.as_deref().is_some_and(|keywords| {
                    keywords
                        .split(',')
                        .any(|token| token.trim().to_lowercase() == needle)
                })
            })
            .cloned()
            .collect();
        self.current = Some(Selection {
            facet: Facet::Keyword(keyword.to_owned()),
            records: matched,
        });
    }

    /// Select every record with the given author id among its authors.
    pub fn select_author(&mut self, records: &[PublicationRecord], author_id: &str) {
        let matched = records
            .iter()
            .filter(|record| record.authors.iter().any(|author| author.id == author_id))
            .cloned()
            .collect();
        self.current = Some(Selection {
            facet: Facet::Author(author_id.to_owned()),
            records: matched,
        });
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}
