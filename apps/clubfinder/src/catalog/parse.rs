//! Catalog boundary parsing: positional JSON rows into typed `ClubEntry` records.
//!
//! The bundled catalog is hand-edited, so row-level problems degrade (skip or default)
//! with a warning. Only a wrong top-level shape is an error.

use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::models::{Activity, Catalog, ClubEntry, EligibilityCode};

const NAME_FIELD: usize = 0;
const CONTACT_FIELD: usize = 1;
const DESCRIPTION_FIELD: usize = 2;
const EMAIL_FIELD: usize = 3;

pub fn parse_catalog_str(raw: &str) -> Result<Catalog, AppError> {
    let value: Value = serde_json::from_str(raw)?;
    parse_catalog_value(&value)
}

pub fn parse_catalog_slice(raw: &[u8]) -> Result<Catalog, AppError> {
    let value: Value = serde_json::from_slice(raw)?;
    parse_catalog_value(&value)
}

/// Parses `[{tag: [[name, contact, description?, email?, code?], ...]}, ...]`.
pub fn parse_catalog_value(value: &Value) -> Result<Catalog, AppError> {
    let records = value.as_array().ok_or_else(|| {
        AppError::Catalog("top-level catalog value must be an array".to_string())
    })?;

    let mut activities = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let object = record.as_object().ok_or_else(|| {
            AppError::Catalog(format!("catalog record {index} is not an object"))
        })?;

        let mut activity = Activity::default();
        for (tag, rows) in object {
            let Some(rows) = rows.as_array() else {
                warn!(record = index, tag = %tag, "Skipping tag whose rows are not an array");
                continue;
            };
            let entries = rows
                .iter()
                .enumerate()
                .filter_map(|(row_index, row)| parse_row(tag, row_index, row))
                .collect();
            activity.tags.insert(tag.clone(), entries);
        }
        activities.push(activity);
    }

    Ok(Catalog::new(activities))
}

/// Parses a single positional row. Returns `None` (and logs) for rows that cannot name a club.
pub fn parse_row(tag: &str, row_index: usize, row: &Value) -> Option<ClubEntry> {
    let Some(fields) = row.as_array() else {
        warn!(tag = %tag, row = row_index, "Skipping catalog row that is not an array");
        return None;
    };

    let Some(name) = fields.get(NAME_FIELD).and_then(Value::as_str) else {
        warn!(tag = %tag, row = row_index, "Skipping catalog row without a club name");
        return None;
    };

    let contact = fields
        .get(CONTACT_FIELD)
        .and_then(Value::as_str)
        .unwrap_or_default();

    // Whatever its position, the last field restricts the row if it is one of the exact
    // markers. It still fills its positional slot.
    let eligibility = fields
        .last()
        .and_then(Value::as_str)
        .and_then(EligibilityCode::from_code);

    let optional_text = |position: usize| -> Option<String> {
        fields
            .get(position)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    };

    Some(ClubEntry {
        name: name.to_string(),
        contact: contact.to_string(),
        description: optional_text(DESCRIPTION_FIELD),
        email: optional_text(EMAIL_FIELD),
        eligibility,
    })
}
