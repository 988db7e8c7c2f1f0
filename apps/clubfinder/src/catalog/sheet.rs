//! Builds the bundled catalog from the club spreadsheet export (CSV).
//!
//! Sheet layout: one row per club. `Club`, `Instagram`, `Email` and `Original Description`
//! are info columns; `women` / `men` / `other` mark a restricted club with `x`; every
//! other column is a tag, and an `x` cell lists the club under that tag.

use std::io::Read;

use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::{Activity, Catalog, ClubEntry, EligibilityCode};

const CLUB_COLUMN: &str = "Club";
const CONTACT_COLUMN: &str = "Instagram";
const EMAIL_COLUMN: &str = "Email";
const DESCRIPTION_COLUMN: &str = "Original Description";

/// Checked in this order; the first marked column wins.
const ELIGIBILITY_COLUMNS: &[(&str, EligibilityCode)] = &[
    ("women", EligibilityCode::GroupB),
    ("men", EligibilityCode::GroupA),
    ("other", EligibilityCode::Other),
];

const INFO_COLUMNS: &[&str] = &[CLUB_COLUMN, CONTACT_COLUMN, EMAIL_COLUMN, DESCRIPTION_COLUMN];

/// Reads a sheet export and returns one activity per tag, in order of first use.
pub fn build_catalog_from_csv<R: Read>(reader: R) -> Result<Catalog, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| AppError::Catalog(format!("failed to read sheet header: {e}")))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();

    let column = |name: &str| headers.iter().position(|h| h == name);
    let club_idx = column(CLUB_COLUMN)
        .ok_or_else(|| AppError::Catalog(format!("sheet has no '{CLUB_COLUMN}' column")))?;
    let contact_idx = column(CONTACT_COLUMN);
    let email_idx = column(EMAIL_COLUMN);
    let description_idx = column(DESCRIPTION_COLUMN);
    let eligibility_idx: Vec<(usize, EligibilityCode)> = ELIGIBILITY_COLUMNS
        .iter()
        .filter_map(|(name, code)| column(*name).map(|idx| (idx, *code)))
        .collect();

    let tag_columns: Vec<(usize, &str)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.is_empty())
        .filter(|(_, h)| !INFO_COLUMNS.contains(&h.as_str()))
        .filter(|(_, h)| !ELIGIBILITY_COLUMNS.iter().any(|(name, _)| *name == h.as_str()))
        .map(|(idx, h)| (idx, h.as_str()))
        .collect();

    // (tag, entries) in first-use order
    let mut by_tag: Vec<(String, Vec<ClubEntry>)> = Vec::new();

    for (line, record) in csv_reader.records().enumerate() {
        let record =
            record.map_err(|e| AppError::Catalog(format!("bad sheet row {}: {e}", line + 2)))?;
        let cell = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or_default();

        let name = cell(Some(club_idx));
        if name.is_empty() {
            warn!(row = line + 2, "Skipping sheet row without a club name");
            continue;
        }

        let mut entry = ClubEntry::new(name, cell(contact_idx));
        let description = cell(description_idx);
        if !description.is_empty() {
            entry.description = Some(description.to_string());
        }
        let email = cell(email_idx);
        if !email.is_empty() {
            entry.email = Some(email.to_string());
        }
        entry.eligibility = eligibility_idx
            .iter()
            .find(|(idx, _)| is_marked(cell(Some(*idx))))
            .map(|(_, code)| *code);

        for &(idx, tag) in &tag_columns {
            if !is_marked(cell(Some(idx))) {
                continue;
            }
            match by_tag.iter_mut().find(|(t, _)| t.as_str() == tag) {
                Some((_, entries)) => entries.push(entry.clone()),
                None => by_tag.push((tag.to_string(), vec![entry.clone()])),
            }
        }
    }

    info!(tags = by_tag.len(), "Processed sheet into catalog");

    Ok(Catalog::new(
        by_tag
            .into_iter()
            .map(|(tag, entries)| Activity::single(tag, entries))
            .collect(),
    ))
}

fn is_marked(cell: &str) -> bool {
    cell.eq_ignore_ascii_case("x")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SHEET: &str = "\u{feff}Club,Instagram,Email,Original Description,women,men,other,music,gaming,running\n\
        Band,@band,band@uni.edu,We play,,,,x,,\n\
        Chess Society,@chess,,Weekly games,,,,,X,\n\
        Sisters Run,@srun,,,x,,,,,x\n\
        ,@ghost,,,,,,x,x,x\n\
        Jam,@jam,,,,,,x,x,\n";

    #[test]
    fn test_tags_in_first_use_order() {
        let catalog = build_catalog_from_csv(SHEET.as_bytes()).unwrap();
        let tags: Vec<&str> = catalog
            .activities
            .iter()
            .flat_map(|a| a.tags.keys().map(String::as_str))
            .collect();
        assert_eq!(tags, vec!["music", "gaming", "running"]);
    }

    #[test]
    fn test_club_listed_under_every_marked_tag() {
        let catalog = build_catalog_from_csv(SHEET.as_bytes()).unwrap();
        let music = catalog.activities[0].entries_for("music").unwrap();
        let gaming = catalog.activities[1].entries_for("gaming").unwrap();
        assert_eq!(music.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(), vec!["Band", "Jam"]);
        assert_eq!(
            gaming.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
            vec!["Chess Society", "Jam"]
        );
    }

    #[test]
    fn test_eligibility_columns_become_codes_not_tags() {
        let catalog = build_catalog_from_csv(SHEET.as_bytes()).unwrap();
        let running = catalog.activities[2].entries_for("running").unwrap();
        assert_eq!(running[0].name, "Sisters Run");
        assert_eq!(running[0].eligibility, Some(EligibilityCode::GroupB));
        assert!(catalog
            .activities
            .iter()
            .all(|a| !a.tags.contains_key("women")));
    }

    #[test]
    fn test_rows_without_name_skipped() {
        let catalog = build_catalog_from_csv(SHEET.as_bytes()).unwrap();
        assert!(catalog
            .activities
            .iter()
            .flat_map(|a| a.tags.values().flatten())
            .all(|e| e.contact != "@ghost"));
    }

    #[test]
    fn test_output_matches_bundled_json_layout() {
        let catalog = build_catalog_from_csv(SHEET.as_bytes()).unwrap();
        let json = catalog.to_json_value();
        assert_eq!(json[0]["music"][0], json!(["Band", "@band", "We play", "band@uni.edu"]));
        assert_eq!(json[2]["running"][0], json!(["Sisters Run", "@srun", "", "", "**"]));
    }

    #[test]
    fn test_missing_club_column_is_error() {
        let err = build_catalog_from_csv("Name,music\nBand,x\n".as_bytes()).unwrap_err();
        assert!(matches!(err, AppError::Catalog(_)));
    }
}
