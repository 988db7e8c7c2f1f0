// Club matching: tag + eligibility filtering with name|contact dedup.
// Pure function of (catalog, tags, code); results are never cached.

pub mod matcher;

pub use matcher::match_clubs;
