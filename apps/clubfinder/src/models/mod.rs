pub mod catalog;
pub mod eligibility;
pub mod result;

pub use catalog::{Activity, Catalog, ClubEntry};
pub use eligibility::EligibilityCode;
pub use result::MatchResult;
