//! Resume tag extraction: pluggable, trait-based scorer that maps free text to interest tags.
//!
//! Default: `KeywordTagExtractor` (keyword dictionary from the taxonomy, deterministic).
//!
//! `AppState` holds an `Arc<dyn TagExtractor>`.

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::taxonomy::KeywordCategory;

pub const DEFAULT_MAX_TAGS: usize = 4;
pub const DEFAULT_MIN_SCORE: u32 = 1;

// ────────────────────────────────────────────────────────────────────────────
// Output data models
// ────────────────────────────────────────────────────────────────────────────

/// Score of one keyword category against a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagScore {
    pub tag: String,
    pub group: Option<String>,
    pub score: u32,
    /// keyword → occurrences, only keywords that matched
    pub hits: BTreeMap<String, u32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap extraction backends without touching the session host.
pub trait TagExtractor: Send + Sync {
    /// Ranked tags, best first. Empty means "fall back to the quiz", not an error.
    fn extract_tags(&self, text: &str) -> Vec<String>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordTagExtractor
// ────────────────────────────────────────────────────────────────────────────

struct CompiledKeyword {
    keyword: String,
    lowered: String,
    /// `\bkeyword`, case-insensitive. No trailing boundary: "volunteer" counts in "volunteering".
    pattern: Regex,
}

struct CompiledCategory {
    tag: String,
    group: Option<String>,
    keywords: Vec<CompiledKeyword>,
}

/// Keyword-count scorer.
///
/// Algorithm:
/// 1. Normalize text (dash variants → `-`, whitespace runs → one space)
/// 2. Per keyword: count `\bkeyword` matches; if none, count raw substrings instead
/// 3. Category score = sum of its keyword counts
/// 4. Keep scores ≥ `min_score` (and > 0), sort descending (stable), take `max_tags`
pub struct KeywordTagExtractor {
    categories: Vec<CompiledCategory>,
    max_tags: usize,
    min_score: u32,
}

impl KeywordTagExtractor {
    pub fn new(categories: &[KeywordCategory]) -> Self {
        Self::with_limits(categories, DEFAULT_MAX_TAGS, DEFAULT_MIN_SCORE)
    }

    pub fn with_limits(categories: &[KeywordCategory], max_tags: usize, min_score: u32) -> Self {
        let categories = categories
            .iter()
            .map(|category| CompiledCategory {
                tag: category.tag.clone(),
                group: category.group.clone(),
                keywords: category
                    .keywords
                    .iter()
                    .filter_map(|k| compile_keyword(k))
                    .collect(),
            })
            .collect();

        Self {
            categories,
            max_tags,
            min_score,
        }
    }

    /// Every category's score, ranked: score descending, dictionary order on ties.
    pub fn score_categories(&self, text: &str) -> Vec<TagScore> {
        let normalized = normalize(text);
        let lowered = normalized.to_lowercase();

        let mut scores: Vec<TagScore> = self
            .categories
            .iter()
            .map(|category| {
                let mut hits = BTreeMap::new();
                for keyword in &category.keywords {
                    let count = count_occurrences(keyword, &normalized, &lowered);
                    if count > 0 {
                        *hits.entry(keyword.keyword.clone()).or_insert(0) += count;
                    }
                }
                TagScore {
                    tag: category.tag.clone(),
                    group: category.group.clone(),
                    score: hits.values().sum(),
                    hits,
                }
            })
            .collect();

        // sort_by is stable, which keeps dictionary order for equal scores
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        scores
    }

    /// The selected top categories with their scores.
    pub fn top_scores(&self, text: &str) -> Vec<TagScore> {
        let min_score = self.min_score.max(1);
        self.score_categories(text)
            .into_iter()
            .filter(|s| s.score >= min_score)
            .take(self.max_tags)
            .collect()
    }
}

impl TagExtractor for KeywordTagExtractor {
    fn extract_tags(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let top = self.top_scores(text);
        debug!(
            selected = ?top.iter().map(|s| (&s.tag, s.score)).collect::<Vec<_>>(),
            "Resume tags extracted"
        );
        top.into_iter().map(|s| s.tag).collect()
    }
}

fn compile_keyword(keyword: &str) -> Option<CompiledKeyword> {
    let trimmed = keyword.trim();
    if trimmed.is_empty() {
        return None;
    }
    let pattern = RegexBuilder::new(&format!(r"\b{}", regex::escape(trimmed)))
        .case_insensitive(true)
        .build()
        .ok()?;
    Some(CompiledKeyword {
        keyword: trimmed.to_string(),
        lowered: trimmed.to_lowercase(),
        pattern,
    })
}

fn count_occurrences(keyword: &CompiledKeyword, normalized: &str, lowered: &str) -> u32 {
    let bounded = keyword.pattern.find_iter(normalized).count();
    let count = if bounded > 0 {
        bounded
    } else {
        // Extraction artifacts (glued words, odd code points) can hide word boundaries.
        lowered.matches(keyword.lowered.as_str()).count()
    };
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Folds dash variants to `-` and collapses whitespace runs.
pub fn normalize(text: &str) -> String {
    let folded: String = text
        .chars()
        .map(|c| match c {
            '\u{2010}'..='\u{2014}' => '-',
            other => other,
        })
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::defaults::builtin_keywords;

    fn category(tag: &str, keywords: &[&str]) -> KeywordCategory {
        KeywordCategory {
            tag: tag.to_string(),
            group: None,
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn two_categories() -> Vec<KeywordCategory> {
        vec![
            category("volunteering", &["volunteer"]),
            category("mentorship", &["mentor"]),
        ]
    }

    #[test]
    fn test_ranks_by_score() {
        let extractor = KeywordTagExtractor::new(&two_categories());
        let text = "I mentor students. Volunteer weekly, volunteer monthly, volunteer yearly.";
        assert_eq!(extractor.extract_tags(text), vec!["volunteering", "mentorship"]);
    }

    #[test]
    fn test_prefix_match_counts_longer_words() {
        let extractor = KeywordTagExtractor::new(&two_categories());
        let scores = extractor.score_categories("Volunteering at the shelter; volunteered twice.");
        assert_eq!(scores[0].tag, "volunteering");
        assert_eq!(scores[0].score, 2);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let extractor = KeywordTagExtractor::new(&two_categories());
        assert_eq!(extractor.extract_tags("MENTOR"), vec!["mentorship"]);
    }

    #[test]
    fn test_leading_boundary_required_when_boundary_matches_exist() {
        let extractor = KeywordTagExtractor::new(&[category("art", &["art"])]);
        // "art" once as a word; "party" and "start" are not counted
        let scores = extractor.score_categories("art party start");
        assert_eq!(scores[0].score, 1);
    }

    #[test]
    fn test_substring_fallback_when_no_boundary_match() {
        let extractor = KeywordTagExtractor::new(&[category("volunteering", &["volunteer"])]);
        // glued extraction artifact: no word boundary before the keyword
        let scores = extractor.score_categories("Experience:communityvolunteer,xvolunteer");
        assert_eq!(scores[0].score, 2);
    }

    #[test]
    fn test_ties_keep_dictionary_order() {
        let extractor = KeywordTagExtractor::new(&[
            category("b-first", &["alpha"]),
            category("a-second", &["beta"]),
        ]);
        assert_eq!(extractor.extract_tags("beta alpha"), vec!["b-first", "a-second"]);
    }

    #[test]
    fn test_truncates_to_max_tags() {
        let categories: Vec<_> = ["one", "two", "three", "four", "five"]
            .iter()
            .map(|w| category(w, &[w]))
            .collect();
        let extractor = KeywordTagExtractor::new(&categories);
        let tags = extractor.extract_tags("five five five five five four four four four three three three two two one");
        assert_eq!(tags, vec!["five", "four", "three", "two"]);
    }

    #[test]
    fn test_fewer_than_max_when_few_match() {
        let extractor = KeywordTagExtractor::new(&builtin_keywords());
        let tags = extractor.extract_tags("I programmed in python.");
        assert_eq!(tags, vec!["computing"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let extractor = KeywordTagExtractor::new(&two_categories());
        assert!(extractor.extract_tags("Barista at a coffee shop").is_empty());
        assert!(extractor.extract_tags("").is_empty());
        assert!(extractor.extract_tags("   \n\t").is_empty());
    }

    #[test]
    fn test_zero_score_categories_excluded_even_with_zero_min() {
        let extractor = KeywordTagExtractor::with_limits(&two_categories(), 4, 0);
        assert_eq!(extractor.extract_tags("mentor"), vec!["mentorship"]);
    }

    #[test]
    fn test_min_score_threshold() {
        let extractor = KeywordTagExtractor::with_limits(&two_categories(), 4, 2);
        assert_eq!(
            extractor.extract_tags("volunteer volunteer mentor"),
            vec!["volunteering"]
        );
    }

    #[test]
    fn test_hits_record_matching_keywords() {
        let extractor =
            KeywordTagExtractor::new(&[category("business", &["startup", "pitch", "scaled"])]);
        let scores = extractor.score_categories("Pitched my startup. Another pitch.");
        assert_eq!(scores[0].score, 3);
        assert_eq!(scores[0].hits.get("pitch"), Some(&2));
        assert_eq!(scores[0].hits.get("startup"), Some(&1));
        assert!(!scores[0].hits.contains_key("scaled"));
    }

    #[test]
    fn test_multiword_and_hyphen_keywords() {
        let extractor = KeywordTagExtractor::new(&[category("business", &["start up", "start-up"])]);
        // en dash is folded to a hyphen, double space collapsed
        let scores = extractor.score_categories("Joined a start\u{2013}up after a start  up weekend");
        assert_eq!(scores[0].score, 2);
    }

    #[test]
    fn test_empty_keywords_ignored() {
        let extractor = KeywordTagExtractor::new(&[category("blank", &["", "  "])]);
        assert!(extractor.extract_tags("anything at all").is_empty());
    }

    #[test]
    fn test_regex_metacharacters_are_literal() {
        let extractor = KeywordTagExtractor::new(&[category("computing", &["c++"])]);
        let scores = extractor.score_categories("Wrote C++ and c++ tools, not cpp");
        assert_eq!(scores[0].score, 2);
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a\u{2014}b \n\t c"), "a-b c");
    }
}
