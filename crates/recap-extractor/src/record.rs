//! Record assembly
//!
//! Maps scanned hits onto the fixed output schema. The record always
//! carries exactly the 37 schema fields in schema order; fields with
//! no hit hold empty value and comment rather than being absent, so
//! downstream fixed-column output never sees a missing key.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::scanner::Hit;
use crate::schema::KeywordIndex;

/// One field of the output record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordField {
    pub name: String,
    /// Extracted value, verbatim from the source; empty if not found
    pub value: String,
    /// The justifying sentence(s); empty if not found
    pub comment: String,
}

/// The fixed-schema output for one document, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    fields: Vec<RecordField>,
}

impl Record {
    /// All fields, in schema order
    pub fn fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&RecordField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of fields with a non-empty value
    pub fn matched_count(&self) -> usize {
        self.fields.iter().filter(|f| !f.value.is_empty()).count()
    }
}

/// Assemble the final record from the scanned hits.
///
/// Pure transformation: values and comments are copied verbatim from
/// the hits, and every schema field appears exactly once.
pub fn build(hits: &[Hit], index: &KeywordIndex) -> Record {
    let by_field: HashMap<&str, &Hit> = hits.iter().map(|h| (h.field, h)).collect();

    let fields = index
        .fields()
        .iter()
        .map(|spec| match by_field.get(spec.name) {
            Some(hit) => RecordField {
                name: spec.name.to_string(),
                value: hit.value.clone(),
                comment: hit.context.clone(),
            },
            None => RecordField {
                name: spec.name.to_string(),
                value: String::new(),
                comment: String::new(),
            },
        })
        .collect();

    Record { fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FIELD_COUNT;

    fn hit(field: &'static str, value: &str, context: &str) -> Hit {
        Hit {
            field,
            sentence_index: 0,
            value: value.to_string(),
            trigger: String::new(),
            context: context.to_string(),
        }
    }

    #[test]
    fn test_all_keys_present_with_no_hits() {
        let index = KeywordIndex::standard();
        let record = build(&[], &index);

        assert_eq!(record.fields().len(), FIELD_COUNT);
        assert!(record
            .fields()
            .iter()
            .all(|f| f.value.is_empty() && f.comment.is_empty()));
    }

    #[test]
    fn test_hits_copied_verbatim() {
        let index = KeywordIndex::standard();
        let hits = vec![hit(
            "Current Salary",
            "12,50,000 INR per annum",
            "Salary: 12,50,000 INR per annum.",
        )];

        let record = build(&hits, &index);
        let field = record.get("Current Salary").unwrap();
        assert_eq!(field.value, "12,50,000 INR per annum");
        assert_eq!(field.comment, "Salary: 12,50,000 INR per annum.");
        assert_eq!(record.matched_count(), 1);
    }

    #[test]
    fn test_schema_order_preserved() {
        let index = KeywordIndex::standard();
        let record = build(&[], &index);

        let record_names: Vec<&str> = record.fields().iter().map(|f| f.name.as_str()).collect();
        let schema_names: Vec<&str> = index.fields().iter().map(|f| f.name).collect();
        assert_eq!(record_names, schema_names);
    }

    #[test]
    fn test_record_serializes_in_order() {
        let index = KeywordIndex::standard();
        let record = build(&[], &index);

        let json = serde_json::to_string(&record).unwrap();
        let full_name = json.find("Full Name").unwrap();
        let availability = json.find("Availability").unwrap();
        assert!(full_name < availability);
    }
}
