//! Duty classifier.
//!
//! Classification from free-text trade descriptions is fuzzy, so the
//! classifier is tiered: confident hard-coded checks first, then keyword
//! category rules, then the caller-supplied rule list, and finally a 0%
//! default. It is a total function over any description, including the
//! empty string.
//!
//! Precedence is data, not code order: the shims and category rules live in
//! ordered lists on the `Classifier`, so the priority of every tier is
//! inspectable and testable. Note the long-standing quirk that the generic
//! BOX category rule runs before caller-supplied rules and can shadow a
//! more specific user mapping; that ordering is intentional until domain
//! owners say otherwise.

use crate::types::{DutyRule, RawLineItem};
use tracing::debug;

/// One description-keyword category: a disjunction of substring tests
/// against the upper-cased description.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub duty_percent: u32,
}

/// Tokens too generic to count as a match when splitting rule keywords.
const STOP_WORDS: [&str; 4] = ["THE", "AND", "FOR", "WITH"];

/// Historical tariff codes that occasionally appear in the item code
/// column; kept as a compatibility shim for old invoices.
const CODE_SHIMS: [(&str, u32); 5] = [
    ("481920", 10),
    ("711790", 20),
    ("701810", 20),
    ("580610", 22),
    ("621430", 30),
];

/// Built-in category rules, evaluated in order. First match wins.
const CATEGORY_RULES: [CategoryRule; 6] = [
    CategoryRule {
        name: "packaging",
        keywords: &["POLYBAG", "OPP BAG", "PACKING"],
        duty_percent: 0,
    },
    CategoryRule {
        name: "textile accessories",
        keywords: &["SCARF", "SHAWL", "RIBBON"],
        duty_percent: 30,
    },
    CategoryRule {
        name: "bead findings",
        keywords: &["BEAD FINDINGS", "FINDINGS"],
        duty_percent: 15,
    },
    CategoryRule {
        name: "boxes",
        keywords: &["COLOUR BOX", "COLOR BOX", "BOX"],
        duty_percent: 10,
    },
    CategoryRule {
        name: "tassels",
        keywords: &["TASSEL"],
        duty_percent: 22,
    },
    CategoryRule {
        name: "fimo",
        keywords: &["FIMO"],
        duty_percent: 15,
    },
];

/// Tiered duty classifier with explicit, ordered precedence.
#[derive(Debug, Clone)]
pub struct Classifier {
    code_shims: Vec<(String, u32)>,
    categories: Vec<CategoryRule>,
}

impl Default for Classifier {
    fn default() -> Self {
        Self {
            code_shims: CODE_SHIMS
                .iter()
                .map(|(code, duty)| ((*code).to_string(), *duty))
                .collect(),
            categories: CATEGORY_RULES.to_vec(),
        }
    }
}

impl Classifier {
    /// A classifier with no built-in tiers; only the supplied rule list and
    /// the 0% default apply.
    pub fn bare() -> Self {
        Self {
            code_shims: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// The built-in category tier, in evaluation order.
    pub fn categories(&self) -> &[CategoryRule] {
        &self.categories
    }

    /// The historical code shims, in evaluation order.
    pub fn code_shims(&self) -> &[(String, u32)] {
        &self.code_shims
    }

    /// Classify a line item into a duty percent. Ordered, first match wins,
    /// case-insensitive substring semantics throughout. Never fails.
    pub fn classify(&self, item: &RawLineItem, rules: &[DutyRule]) -> u32 {
        let code = item.code.to_uppercase();
        let description = item.description.to_uppercase();

        // Tier 1: known historical codes.
        for (shim_code, duty) in &self.code_shims {
            if !code.is_empty() && code.contains(shim_code.as_str()) {
                debug!(code = %item.code, duty, "matched code shim");
                return *duty;
            }
        }

        // Tier 2: built-in keyword categories.
        for category in &self.categories {
            if category.keywords.iter().any(|kw| description.contains(kw)) {
                debug!(
                    description = %item.description,
                    category = category.name,
                    duty = category.duty_percent,
                    "matched category rule"
                );
                return category.duty_percent;
            }
        }

        // Tier 3: caller-supplied rules (user-declared or worksheet-extracted).
        for rule in rules {
            let keyword = rule.keyword.to_uppercase();
            let token_hit = keyword
                .split_whitespace()
                .filter(|t| t.len() > 2 && !STOP_WORDS.contains(t))
                .any(|t| description.contains(t));
            if token_hit || (!keyword.is_empty() && description.contains(&keyword)) {
                debug!(
                    description = %item.description,
                    keyword = %rule.keyword,
                    duty = rule.duty_percent,
                    "matched supplied rule"
                );
                return rule.duty_percent;
            }
        }

        debug!(description = %item.description, "no duty match, defaulting to 0%");
        0
    }
}
