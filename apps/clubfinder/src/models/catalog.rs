use std::collections::BTreeMap;

use serde_json::Value;

use crate::models::eligibility::EligibilityCode;

/// One club listed under one tag. Built from a positional catalog row by `catalog::parse`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClubEntry {
    pub name: String,
    pub contact: String,
    pub description: Option<String>,
    pub email: Option<String>,
    /// `None` means the club is open to everyone.
    pub eligibility: Option<EligibilityCode>,
}

impl ClubEntry {
    pub fn new(name: impl Into<String>, contact: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact: contact.into(),
            description: None,
            email: None,
            eligibility: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_eligibility(mut self, code: EligibilityCode) -> Self {
        self.eligibility = Some(code);
        self
    }

    pub fn is_visible_to(&self, code: EligibilityCode) -> bool {
        self.eligibility.map_or(true, |restriction| restriction == code)
    }

    /// `name|contact`, exact and case-sensitive.
    pub fn dedup_key(&self) -> String {
        format!("{}|{}", self.name, self.contact)
    }

    /// Positional row in the bundled `activities.json` layout:
    /// `[name, contact, description, email, (eligibility)]`.
    pub fn to_row(&self) -> Value {
        let mut row = vec![
            Value::String(self.name.clone()),
            Value::String(self.contact.clone()),
            Value::String(self.description.clone().unwrap_or_default()),
            Value::String(self.email.clone().unwrap_or_default()),
        ];
        if let Some(code) = self.eligibility {
            row.push(Value::String(code.as_code().to_string()));
        }
        Value::Array(row)
    }
}

/// One catalog record: tag name → rows listed under that tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Activity {
    pub tags: BTreeMap<String, Vec<ClubEntry>>,
}

impl Activity {
    pub fn single(tag: impl Into<String>, entries: Vec<ClubEntry>) -> Self {
        let mut tags = BTreeMap::new();
        tags.insert(tag.into(), entries);
        Self { tags }
    }

    pub fn entries_for(&self, tag: &str) -> Option<&[ClubEntry]> {
        self.tags.get(tag).map(Vec::as_slice)
    }
}

/// The read-only activity catalog. Order matters: it is the inner order of match results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    pub activities: Vec<Activity>,
}

impl Catalog {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.activities
            .iter()
            .flat_map(|a| a.tags.values())
            .map(Vec::len)
            .sum()
    }

    /// Serializes back into the list-of-objects layout the popup bundles.
    pub fn to_json_value(&self) -> Value {
        Value::Array(
            self.activities
                .iter()
                .map(|activity| {
                    let map = activity
                        .tags
                        .iter()
                        .map(|(tag, entries)| {
                            (
                                tag.clone(),
                                Value::Array(entries.iter().map(ClubEntry::to_row).collect()),
                            )
                        })
                        .collect();
                    Value::Object(map)
                })
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unrestricted_entry_visible_to_everyone() {
        let entry = ClubEntry::new("ClubY", "@y").with_description("desc");
        for code in EligibilityCode::ALL {
            assert!(entry.is_visible_to(code));
        }
    }

    #[test]
    fn test_restricted_entry_visible_only_to_its_code() {
        let entry = ClubEntry::new("ClubX", "@x").with_eligibility(EligibilityCode::GroupB);
        assert!(entry.is_visible_to(EligibilityCode::GroupB));
        assert!(!entry.is_visible_to(EligibilityCode::GroupA));
        assert!(!entry.is_visible_to(EligibilityCode::Other));
    }

    #[test]
    fn test_dedup_key_is_case_sensitive() {
        let a = ClubEntry::new("Chess", "@chess");
        let b = ClubEntry::new("chess", "@chess");
        assert_eq!(a.dedup_key(), "Chess|@chess");
        assert_ne!(a.dedup_key(), b.dedup_key());
    }

    #[test]
    fn test_to_row_appends_code_only_when_restricted() {
        let open = ClubEntry::new("A", "@a").with_email("a@uni.edu");
        assert_eq!(open.to_row(), json!(["A", "@a", "", "a@uni.edu"]));

        let restricted = ClubEntry::new("B", "@b").with_eligibility(EligibilityCode::GroupA);
        assert_eq!(restricted.to_row(), json!(["B", "@b", "", "", "***"]));
    }

    #[test]
    fn test_row_count_spans_activities_and_tags() {
        let mut first = Activity::single("music", vec![ClubEntry::new("Band", "@band")]);
        first
            .tags
            .insert("gaming".to_string(), vec![ClubEntry::new("Chess", "@c")]);
        let second = Activity::single("running", vec![ClubEntry::new("Run", "@r")]);
        let catalog = Catalog::new(vec![first, second]);
        assert_eq!(catalog.row_count(), 3);
        assert!(!catalog.is_empty());
    }
}
