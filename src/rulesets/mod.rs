pub mod ruleset;

pub use ruleset::{RuleSetTable, FINAL_RULE};
