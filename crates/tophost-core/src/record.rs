//! DNS record model
//!
//! `DnsRecord` is the structured form of one row of the panel's DNS
//! management table. Records are produced fresh on every scrape and live only
//! for the duration of one reconciliation pass. Nothing is cached between
//! runs or between passes.

use serde::{Deserialize, Serialize};

/// One DNS record as scraped from the management page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    /// The panel's internal row identifier (with the `tr-` prefix stripped)
    pub id: String,
    /// Record name (e.g. "@" or "www")
    pub name: String,
    /// Record type (e.g. "A", "MX")
    #[serde(rename = "type")]
    pub record_type: String,
    /// Current record value
    pub value: String,
    /// Current record priority (empty for types without one)
    pub priority: String,
}

/// Update form payload for one record
///
/// Serializes to `application/x-www-form-urlencoded` in exactly this field
/// order, matching what the panel's own form submits. `priority` and
/// `priorityo` are always empty: priority is not managed by this tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordUpdate {
    /// The target row identifier
    pub record: String,
    /// New record value
    pub value: String,
    /// Previous record value, as scraped
    pub valueo: String,
    pub priority: String,
    pub priorityo: String,
}

impl RecordUpdate {
    /// Build the payload that replaces `record`'s value with `new_value`
    pub fn replace_value(record: &DnsRecord, new_value: &str) -> Self {
        Self {
            record: record.id.clone(),
            value: new_value.to_string(),
            valueo: record.value.clone(),
            priority: String::new(),
            priorityo: String::new(),
        }
    }
}

/// Select the record a requested name refers to
///
/// Returns the first record whose name matches exactly and whose type is
/// `"A"`. There is no fallback to other record types.
pub fn find_a_record<'a>(records: &'a [DnsRecord], name: &str) -> Option<&'a DnsRecord> {
    records
        .iter()
        .find(|record| record.name == name && record.record_type == "A")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, name: &str, record_type: &str, value: &str) -> DnsRecord {
        DnsRecord {
            id: id.to_string(),
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            priority: String::new(),
        }
    }

    #[test]
    fn selection_requires_exact_name_and_type_a() {
        let records = vec![
            record("1", "www", "CNAME", "host.example.com."),
            record("2", "www", "A", "1.2.3.4"),
            record("3", "www", "A", "5.6.7.8"),
        ];

        // Skips the CNAME, picks the first A record
        let found = find_a_record(&records, "www").unwrap();
        assert_eq!(found.id, "2");

        assert!(find_a_record(&records, "ww").is_none());
        assert!(find_a_record(&records, "wwww").is_none());
    }

    #[test]
    fn selection_has_no_type_fallback() {
        let records = vec![record("7", "mail", "MX", "mx.example.com.")];
        assert!(find_a_record(&records, "mail").is_none());
    }

    #[test]
    fn replace_value_carries_old_value_and_empty_priority() {
        let scraped = record("5", "www", "A", "1.2.3.4");
        let update = RecordUpdate::replace_value(&scraped, "5.6.7.8");

        assert_eq!(update.record, "5");
        assert_eq!(update.value, "5.6.7.8");
        assert_eq!(update.valueo, "1.2.3.4");
        assert_eq!(update.priority, "");
        assert_eq!(update.priorityo, "");
    }

    #[test]
    fn record_type_round_trips_through_json_as_type() {
        let scraped = record("5", "www", "A", "1.2.3.4");
        let json = serde_json::to_value(&scraped).unwrap();
        assert_eq!(json["type"], "A");

        let back: DnsRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, scraped);
    }
}
