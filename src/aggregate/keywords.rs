//! Keyword counting, flat and partitioned by research group.

use crate::record::PublicationRecord;
use indexmap::IndexMap;

/// Count for one normalized keyword token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    /// First-seen original casing, used as the display label.
    pub label: String,
    pub count: u64,
}

/// Keyed by the normalized (trimmed, lowercased) token. Iteration order is
/// the token's first occurrence in the input, which is what the dashboard
/// displays.
pub type KeywordCountMap = IndexMap<String, KeywordCount>;

/// Count keyword tokens across all records.
///
/// The keyword field is split on commas, tokens are trimmed, empties dropped,
/// and grouping is case-insensitive. Records without a keyword field
/// contribute nothing; there is no "unknown" bucket.
pub fn count_keywords(records: &[PublicationRecord]) -> KeywordCountMap {
    let mut counts = KeywordCountMap::new();
    for record in records {
        tally_keywords(&mut counts, record);
    }
    counts
}

/// Same counting, partitioned on the record's group name. Records without a
/// group land in the explicit [`crate::record::UNASSIGNED_GROUP`] partition.
pub fn count_keywords_by_group(
    records: &[PublicationRecord],
) -> IndexMap<String, KeywordCountMap> {
    let mut partitions: IndexMap<String, KeywordCountMap> = IndexMap::new();
    for record in records {
        let counts = partitions.entry(record.group_name().to_owned()).or_default();
        tally_keywords(counts, record);
    }
    partitions
}

fn tally_keywords(counts: &mut KeywordCountMap, record: &PublicationRecord) {
    let Some(ref keywords) = record.keywords else {
        return;
    };
    for token in keywords.split(',') {
        let label = token.trim();
        if label.is_empty() {
            continue;
        }
        counts
            .entry(label.to_lowercase())
            .and_modify(|kw| kw.count += 1)
            .or_insert_with(|| KeywordCount {
                label: label.to_owned(),
                count: 1,
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::normalize;
    use serde_json::json;

    fn records(raws: Vec<serde_json::Value>) -> Vec<PublicationRecord> {
        raws.iter().map(normalize).collect()
    }

    #[test]
    fn test_count_keywords_scenario() {
        let records = records(vec![
            json!({"id": 1, "publication_date": "2023-01-05", "keywords": "AI, ml"}),
            json!({"id": 2, "publication_date": "2023-01-05", "keywords": "ai"}),
            json!({"id": 3, "publication_date": "bad-date", "keywords": ""}),
        ]);
        let counts = count_keywords(&records);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["ai"].count, 2);
        assert_eq!(counts["ai"].label, "AI");
        assert_eq!(counts["ml"].count, 1);
        let total: u64 = counts.values().map(|kw| kw.count).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_insertion_order_not_alphabetical() {
        let records = records(vec![
            json!({"id": 1, "keywords": "zebra, apple"}),
            json!({"id": 2, "keywords": "mango"}),
        ]);
        let counts = count_keywords(&records);
        let order: Vec<&str> = counts.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn test_whitespace_and_empty_tokens_dropped() {
        let records = records(vec![json!({"id": 1, "keywords": " ai ,, ,  ml "})]);
        let counts = count_keywords(&records);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts["ai"].count, 1);
        assert_eq!(counts["ml"].count, 1);
    }

    #[test]
    fn test_count_conservation() {
        let records = records(vec![
            json!({"id": 1, "keywords": "a, b, c"}),
            json!({"id": 2, "keywords": "b"}),
            json!({"id": 3}),
        ]);
        let counts = count_keywords(&records);
        let total: u64 = counts.values().map(|kw| kw.count).sum();
        // 4 non-empty tokens across all records
        assert_eq!(total, 4);
    }

    #[test]
    fn test_count_keywords_by_group() {
        let g1_author = json!({"id": 1, "first_name": "A", "last_name": "A",
            "research_group": {"id": 1, "name": "G1"}});
        let records = records(vec![
            json!({"id": 1, "keywords": "ai", "authors": [g1_author]}),
            json!({"id": 2, "keywords": "ml"}),
        ]);
        let by_group = count_keywords_by_group(&records);
        assert_eq!(by_group.len(), 2);
        assert_eq!(by_group["G1"]["ai"].count, 1);
        assert_eq!(by_group["Unassigned"]["ml"].count, 1);
    }
}
