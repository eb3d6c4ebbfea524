//! Inventory record type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use stackline_core::Label;

/// JSON field holding a record's bucket label.
pub const LABEL_FIELD: &str = "bucketLabel";

/// One flat inventory row.
///
/// `category` and `total_units` drive aggregation; every other field of the
/// source row (color group, season, bestseller, warehouse location, ...) is
/// carried in `attributes` and passes through unchanged.
///
/// The bucket label is private: it is written once by
/// [`tag`](crate::tagging::tag) and is read-only afterwards.
///
/// Rows deserialize from any JSON object. `totalUnits` is also accepted
/// under its lowercase spelling `totalunits`.
///
/// The bucket label is written to JSON under [`LABEL_FIELD`] and restored
/// from it, so serialized records round-trip with their tag. That name is
/// reserved. Any other field, including one called `label`, is an ordinary
/// attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Map<String, Value>")]
pub struct Record {
    /// Category name. Absent or non-string values deserialize to `None`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Units held for this row.
    #[serde(rename = "totalUnits")]
    pub total_units: i64,

    #[serde(rename = "bucketLabel", skip_serializing_if = "Option::is_none")]
    label: Option<Label>,

    /// Pass-through attributes.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Record {
    /// Creates an untagged record.
    #[must_use]
    pub fn new(category: impl Into<String>, total_units: i64) -> Self {
        Self {
            category: Some(category.into()),
            total_units,
            label: None,
            attributes: Map::new(),
        }
    }

    /// Creates an untagged record with no category.
    #[must_use]
    pub fn uncategorized(total_units: i64) -> Self {
        Self {
            category: None,
            total_units,
            label: None,
            attributes: Map::new(),
        }
    }

    /// Adds a pass-through attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Returns a pass-through attribute by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }

    /// Returns the category if it is usable (present and not blank).
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }

    /// Returns the bucket label, if the record has been tagged.
    #[must_use]
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Returns true if the record has been tagged.
    #[must_use]
    pub fn is_tagged(&self) -> bool {
        self.label.is_some()
    }

    pub(crate) fn assign_label(&mut self, label: &Label) {
        if self.label.is_none() {
            self.label = Some(label.clone());
        }
    }
}

impl TryFrom<Map<String, Value>> for Record {
    type Error = String;

    fn try_from(mut fields: Map<String, Value>) -> Result<Self, Self::Error> {
        let category = match fields.remove("category") {
            Some(Value::String(s)) => Some(s),
            _ => None,
        };

        let primary = fields.remove("totalUnits");
        let lowercase = fields.remove("totalunits");
        let total_units = match primary.or(lowercase) {
            None | Some(Value::Null) => 0,
            Some(value) => value
                .as_i64()
                .ok_or_else(|| format!("totalUnits must be an integer, got {value}"))?,
        };

        let label = match fields.remove(LABEL_FIELD) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(Label::new(s)),
            Some(other) => return Err(format!("{LABEL_FIELD} must be a string, got {other}")),
        };

        Ok(Self {
            category,
            total_units,
            label,
            attributes: fields,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_usable_category() {
        assert_eq!(Record::new("Shirt", 25).category(), Some("Shirt"));
        assert_eq!(Record::new("   ", 25).category(), None);
        assert_eq!(Record::uncategorized(25).category(), None);
    }

    #[test]
    fn test_deserialize_upstream_row() {
        let record: Record = serde_json::from_value(json!({
            "colorgroup": "Prussian Blue",
            "bestseller": "ss19",
            "season": "aw18",
            "totalunits": 25,
            "category": "Shirt",
            "warehouselocation": "Amazon-SF"
        }))
        .unwrap();

        assert_eq!(record.category(), Some("Shirt"));
        assert_eq!(record.total_units, 25);
        assert!(!record.is_tagged());
        assert_eq!(record.attribute("season"), Some(&json!("aw18")));
        assert_eq!(record.attributes.len(), 4);
    }

    #[test]
    fn test_non_string_category_is_tolerated() {
        let record: Record =
            serde_json::from_value(json!({ "category": 7, "totalUnits": 3 })).unwrap();
        assert_eq!(record.category, None);
        assert_eq!(record.total_units, 3);
    }

    #[test]
    fn test_fractional_units_rejected() {
        let result =
            serde_json::from_value::<Record>(json!({ "category": "Shirt", "totalUnits": 2.5 }));
        assert!(result.is_err());
    }

    #[test]
    fn test_round_trip_keeps_label() {
        let mut record = Record::new("Shirt", 25).with_attribute("season", "aw18");
        record.assign_label(&Label::from("Jan"));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""bucketLabel":"Jan""#));
        let parsed: Record = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_upstream_label_is_an_attribute() {
        let record: Record = serde_json::from_value(json!({
            "category": "Shirt",
            "totalUnits": 25,
            "label": "promo"
        }))
        .unwrap();
        assert!(!record.is_tagged());
        assert_eq!(record.attribute("label"), Some(&json!("promo")));

        let record: Record =
            serde_json::from_value(json!({ "category": "Shirt", "label": { "id": 3 } })).unwrap();
        assert_eq!(record.attribute("label"), Some(&json!({ "id": 3 })));
    }

    #[test]
    fn test_tagged_record_keeps_upstream_label() {
        let mut record = Record::new("Shirt", 25).with_attribute("label", "promo");
        record.assign_label(&Label::from("Jan"));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "category": "Shirt",
                "totalUnits": 25,
                "bucketLabel": "Jan",
                "label": "promo"
            })
        );
        let parsed: Record = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_attributes_pass_through() {
        let record = Record::new("T-Shirt", 10).with_attribute("season", "ss18");
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({ "category": "T-Shirt", "totalUnits": 10, "season": "ss18" })
        );
    }

    #[test]
    fn test_label_is_written_once() {
        let mut record = Record::new("Shirt", 1);
        record.assign_label(&Label::from("Jan"));
        record.assign_label(&Label::from("Feb"));
        assert_eq!(record.label(), Some(&Label::from("Jan")));
    }
}
