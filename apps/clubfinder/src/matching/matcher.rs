use std::collections::HashSet;

use tracing::debug;

use crate::models::result::NO_DESCRIPTION;
use crate::models::{Catalog, EligibilityCode, MatchResult};

/// Filters the catalog by tag and eligibility and deduplicates clubs.
///
/// Algorithm:
/// 1. For each activity (catalog order), for each requested tag (caller order):
///    skip tags the activity does not list
/// 2. For each row under that tag: skip it if it is restricted to a different code
/// 3. Emit the row unless its `name|contact` key was already emitted
///
/// Output is first-occurrence order. The caller must pass at least one tag;
/// unknown tags simply contribute nothing.
pub fn match_clubs<S: AsRef<str>>(
    catalog: &Catalog,
    tags: &[S],
    eligibility: EligibilityCode,
) -> Vec<MatchResult> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut results = Vec::new();
    let mut skipped_ineligible = 0usize;
    let mut skipped_duplicate = 0usize;

    for activity in &catalog.activities {
        for tag in tags {
            let Some(entries) = activity.entries_for(tag.as_ref()) else {
                continue;
            };

            for entry in entries {
                if !entry.is_visible_to(eligibility) {
                    skipped_ineligible += 1;
                    continue;
                }

                if !seen.insert(entry.dedup_key()) {
                    skipped_duplicate += 1;
                    continue;
                }

                results.push(MatchResult {
                    name: entry.name.clone(),
                    contact: entry.contact.clone(),
                    description: entry
                        .description
                        .clone()
                        .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                    email: entry.email.clone().unwrap_or_default(),
                });
            }
        }
    }

    debug!(
        tags = tags.len(),
        %eligibility,
        matched = results.len(),
        skipped_ineligible,
        skipped_duplicate,
        "Club search complete"
    );

    results
}
