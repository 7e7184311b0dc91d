//! Per-group publication totals with drill-down.

use crate::record::PublicationRecord;
use indexmap::IndexMap;

/// Partition of the input records by research group, in first-seen order.
///
/// The record lists are retained so a chart click can resolve back to the
/// underlying publications without a second fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTotals {
    partitions: IndexMap<String, Vec<PublicationRecord>>,
}

/// One bar or slice of a per-group totals chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTotalRow {
    pub name: String,
    pub total: usize,
}

/// Assign every record to exactly one group partition (its own group name or
/// [`crate::record::UNASSIGNED_GROUP`]). No record is dropped or duplicated.
pub fn total_papers_per_group(records: &[PublicationRecord]) -> GroupTotals {
    let mut partitions: IndexMap<String, Vec<PublicationRecord>> = IndexMap::new();
    for record in records {
        partitions
            .entry(record.group_name().to_owned())
            .or_default()
            .push(record.clone());
    }
    GroupTotals { partitions }
}

impl GroupTotals {
    pub(crate) fn from_partitions(partitions: IndexMap<String, Vec<PublicationRecord>>) -> Self {
        Self { partitions }
    }

    /// Chartable `{name, total}` rows, one per group, in partition order.
    pub fn chart_rows(&self) -> Vec<GroupTotalRow> {
        self.partitions
            .iter()
            .map(|(name, records)| GroupTotalRow {
                name: name.clone(),
                total: records.len(),
            })
            .collect()
    }

    /// The publications behind one chart entry, if the group exists.
    pub fn records_for(&self, name: &str) -> Option<&[PublicationRecord]> {
        self.partitions.get(name).map(Vec::as_slice)
    }

    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.partitions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PublicationRecord])> {
        self.partitions
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.partitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{UNASSIGNED_GROUP, normalize};
    use serde_json::json;

    fn sample() -> Vec<PublicationRecord> {
        vec![
            json!({"id": 1, "title": "p1", "authors": [
                {"id": 1, "first_name": "A", "last_name": "A",
                 "research_group": {"id": 1, "name": "G1"}}]}),
            json!({"id": 2, "title": "p2"}),
            json!({"id": 3, "title": "p3", "authors": [
                {"id": 1, "first_name": "A", "last_name": "A",
                 "research_group": {"id": 1, "name": "G1"}}]}),
        ]
        .iter()
        .map(normalize)
        .collect()
    }

    #[test]
    fn test_partition_is_exhaustive_and_disjoint() {
        let records = sample();
        let totals = total_papers_per_group(&records);

        let mut partitioned_ids: Vec<String> = totals
            .iter()
            .flat_map(|(_, records)| records.iter().map(|r| r.id.clone()))
            .collect();
        partitioned_ids.sort();
        let mut input_ids: Vec<String> = records.iter().map(|r| r.id.clone()).collect();
        input_ids.sort();
        assert_eq!(partitioned_ids, input_ids);
    }

    #[test]
    fn test_chart_rows() {
        let totals = total_papers_per_group(&sample());
        let rows = totals.chart_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "G1");
        assert_eq!(rows[0].total, 2);
        assert_eq!(rows[1].name, UNASSIGNED_GROUP);
        assert_eq!(rows[1].total, 1);
    }

    #[test]
    fn test_selection_resolves_without_refetch() {
        let totals = total_papers_per_group(&sample());
        let g1 = totals.records_for("G1").unwrap();
        assert_eq!(g1.len(), 2);
        assert_eq!(g1[0].id, "1");
        assert!(totals.records_for("missing").is_none());
    }
}
