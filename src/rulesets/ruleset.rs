use std::collections::HashMap;

use log::debug;

/// Catch-all rule appended after every custom and predefined rule.
pub const FINAL_RULE: &str = "MATCH,漏网之鱼";

/// Predefined rule sets as `(id, rule lines)`.
const PREDEFINED_RULE_SETS: &[(&str, &[&str])] = &[
    ("Lan", &["FINAL,DIRECT,dns-failed"]),
    ("Apple", &["RULE-SET,apple,DIRECT"]),
    ("Microsoft", &["RULE-SET,microsoft,DIRECT"]),
    ("Google", &["RULE-SET,google,🚀 PROXY"]),
    ("Proxy", &["RULE-SET,proxy,🚀 PROXY"]),
    ("Cn", &["RULE-SET,cn,DIRECT"]),
    ("Telegram", &["RULE-SET,telegram,🚀 PROXY"]),
    ("Private", &["RULE-SET,private,DIRECT"]),
    ("Domestic", &["RULE-SET,domestic,DIRECT"]),
    ("Ads", &["RULE-SET,ads,REJECT"]),
];

/// Immutable table of selectable rule sets, keyed by identifier.
///
/// Built once at start-up and handed to the compilers.
#[derive(Debug, Clone)]
pub struct RuleSetTable {
    rule_sets: HashMap<String, Vec<String>>,
}

impl RuleSetTable {
    /// The fixed table every profile selects from.
    pub fn predefined() -> Self {
        let rule_sets = PREDEFINED_RULE_SETS
            .iter()
            .map(|(id, lines)| {
                (
                    id.to_string(),
                    lines.iter().map(|line| line.to_string()).collect(),
                )
            })
            .collect();
        Self { rule_sets }
    }

    /// Rule lines of `id`; empty for an unknown identifier.
    pub fn lines(&self, id: &str) -> &[String] {
        self.rule_sets.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.rule_sets.contains_key(id)
    }

    /// Assembles a profile's rule list: custom rules verbatim, then the lines
    /// of every selected rule set in selection order, then [`FINAL_RULE`].
    pub fn assemble(&self, custom_rules: &[String], selected: &[String]) -> Vec<String> {
        let mut rules: Vec<String> = custom_rules.to_vec();
        for id in selected {
            if !self.contains(id) {
                debug!("Ignoring unknown rule set: {}", id);
                continue;
            }
            rules.extend_from_slice(self.lines(id));
        }
        rules.push(FINAL_RULE.to_string());
        rules
    }
}

impl Default for RuleSetTable {
    fn default() -> Self {
        Self::predefined()
    }
}
