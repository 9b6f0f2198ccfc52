//! # Calculator Catalog
//!
//! Metadata for every calculator: display name, device parameter code,
//! categories, search keywords and formula. The catalog drives the CLI's
//! `list` and `search` commands and the generated RELATIONS.md reference.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::catalog::{search, Calculator, Category};
//! use calc_core::relations::RelationId;
//!
//! let hits = search("E57E", Category::All);
//! assert_eq!(hits, vec![Calculator::Relation(RelationId::FrequencyDivider)]);
//!
//! let meta = RelationId::CurrentLimit.metadata();
//! assert_eq!(meta.parameter_code, Some("06-11"));
//! ```

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::relations::{RelationId, ALL_RELATIONS};

// ============================================================================
// Categories
// ============================================================================

/// Filter categories for the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Category {
    /// Matches every calculator
    #[default]
    All,
    Motor,
    Inverter,
    Speed,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::All,
        Category::Motor,
        Category::Inverter,
        Category::Speed,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Motor => "Motor",
            Category::Inverter => "Inverter",
            Category::Speed => "Speed",
        }
    }

    /// Case-insensitive parse of a display name
    pub fn parse(text: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.display_name().eq_ignore_ascii_case(text.trim()))
    }

    /// Whether a calculator tagged with `tags` passes this filter
    pub fn admits(&self, tags: &[Category]) -> bool {
        *self == Category::All || tags.contains(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

// ============================================================================
// Calculators
// ============================================================================

/// Anything listed in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Calculator {
    /// An inverse relation solved by [`crate::solver`]
    Relation(RelationId),
    /// The 04-XX speed profile table
    SpeedProfile,
}

/// Every calculator, in catalog order.
pub static ALL_CALCULATORS: Lazy<Vec<Calculator>> = Lazy::new(|| {
    std::iter::once(Calculator::SpeedProfile)
        .chain(ALL_RELATIONS.iter().copied().map(Calculator::Relation))
        .collect()
});

static BY_SLUG: Lazy<HashMap<&'static str, Calculator>> =
    Lazy::new(|| ALL_CALCULATORS.iter().map(|c| (c.slug(), *c)).collect());

/// Descriptive metadata for a calculator.
#[derive(Debug, Clone, Serialize)]
pub struct CalculatorMetadata {
    /// Display name
    pub name: &'static str,
    /// What the calculator computes
    pub description: &'static str,
    /// Inverter parameter or register this value is written to
    pub parameter_code: Option<&'static str>,
    /// Filter categories
    pub categories: &'static [Category],
    /// Extra search terms, including the field crews' Chinese terms
    pub keywords: &'static [&'static str],
    /// Plain-text formula
    pub formula: &'static str,
    /// Rules applied to inputs or outputs
    pub notes: &'static [&'static str],
}

impl Calculator {
    /// Stable kebab-case name
    pub fn slug(&self) -> &'static str {
        match self {
            Calculator::Relation(id) => id.slug(),
            Calculator::SpeedProfile => "speed-profile",
        }
    }

    /// Look up a calculator by slug
    pub fn from_slug(slug: &str) -> Option<Calculator> {
        BY_SLUG.get(slug.trim()).copied()
    }

    pub fn metadata(&self) -> CalculatorMetadata {
        match self {
            Calculator::SpeedProfile => CalculatorMetadata {
                name: "Speed Profile",
                description: "Multi-step speed frequencies derived from the full-speed frequency",
                parameter_code: Some("04-01…04-07"),
                categories: &[Category::Speed],
                keywords: &["speed", "profile", "frequency", "04-XX", "長短階速度", "頻率"],
                formula: "step Hz = full-speed Hz ÷ divisor(rated class)",
                notes: &["04-01 is always 0", "Rated speed class is 30, 45 or 60 m/min"],
            },
            Calculator::Relation(id) => relation_metadata(*id),
        }
    }

    /// Whether the calculator matches a search term and category filter.
    ///
    /// The term is matched case-insensitively against the name, slug,
    /// parameter code and keywords. An empty term matches everything.
    pub fn matches(&self, term: &str, category: Category) -> bool {
        let meta = self.metadata();
        if !category.admits(meta.categories) {
            return false;
        }
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        std::iter::once(meta.name)
            .chain(std::iter::once(self.slug()))
            .chain(meta.parameter_code)
            .chain(meta.keywords.iter().copied())
            .any(|text| text.to_lowercase().contains(&needle))
    }
}

impl RelationId {
    /// Catalog metadata for this relation
    pub fn metadata(&self) -> CalculatorMetadata {
        relation_metadata(*self)
    }
}

fn relation_metadata(id: RelationId) -> CalculatorMetadata {
    match id {
        RelationId::PoleAngle => CalculatorMetadata {
            name: "Magnetic Pole Angle",
            description: "Pole offset parameter from the angle measured in a pole-position tune",
            parameter_code: Some("08-09"),
            categories: &[Category::Motor],
            keywords: &["pole", "angle", "offset", "degree", "磁極角調整"],
            formula: "offset = angle − 90 if angle > 90, else 360 − (90 − angle)",
            notes: &["Result normalized into [0, 360) and rounded to 0.1°"],
        },
        RelationId::CurrentLimit => CalculatorMetadata {
            name: "Current Limit",
            description: "Inverter current limit as a share of inverter rated current",
            parameter_code: Some("06-11"),
            categories: &[Category::Inverter],
            keywords: &["current", "limit", "motor", "inverter", "電流限制", "馬達", "變頻器"],
            formula: "limit % = (motor A ÷ inverter A) × 200",
            notes: &["06-11 is rounded to a whole percent"],
        },
        RelationId::TractionSpeed => CalculatorMetadata {
            name: "Traction Machine Speed",
            description: "Car speed from motor RPM, sheave diameter, gear and roping ratios",
            parameter_code: None,
            categories: &[Category::Motor, Category::Speed],
            keywords: &[
                "machine",
                "rpm",
                "sheave",
                "wheel",
                "gear",
                "roping",
                "主機速度計算",
                "輪徑",
                "減速比",
                "吊掛比",
            ],
            formula: "speed = (RPM × 3.14 × (diameter ÷ 1000)) ÷ (gear × roping)",
            notes: &["π is taken as 3.14", "Ratios accept A:B text"],
        },
        RelationId::FrequencyDivider => CalculatorMetadata {
            name: "Frequency Divider",
            description: "Encoder feedback divider written as a 16-bit hex value",
            parameter_code: Some("E57E/E57F"),
            categories: &[Category::Inverter, Category::Speed],
            keywords: &["divider", "hex", "delta vl", "ppr", "encoder", "除頻數"],
            formula: "divider = (4096 × m/min × 1000) ÷ (RPM × PPR × 0.75)",
            notes: &[
                "Rated speed below 60 m/min is computed as 60",
                "Delta VL: computed divider ÷ 10, known divider × 10",
                "E57F takes the high byte, E57E the low byte",
            ],
        },
        RelationId::MotorRpm => CalculatorMetadata {
            name: "Motor RPM",
            description: "Synchronous speed from supply frequency and pole count",
            parameter_code: None,
            categories: &[Category::Motor],
            keywords: &["rpm", "frequency", "poles", "hz", "馬達轉速", "頻率", "極數"],
            formula: "RPM = 120 × Hz ÷ poles",
            notes: &[],
        },
        RelationId::PhaseConverter => CalculatorMetadata {
            name: "Phase Converter",
            description: "Phase converter rating for a motor load",
            parameter_code: None,
            categories: &[Category::Inverter],
            keywords: &["phase", "converter", "kw", "變相器規格"],
            formula: "rating = kW × 22.371",
            notes: &[],
        },
        RelationId::OhmsLaw => CalculatorMetadata {
            name: "Ohm's Law",
            description: "Voltage, current, resistance and power from any two of them",
            parameter_code: None,
            categories: &[Category::Inverter, Category::Motor],
            keywords: &["ohm", "voltage", "current", "resistance", "power", "watt", "歐姆"],
            formula: "V = A × R, W = V × A",
            notes: &["Exactly two values given; the other two are solved together"],
        },
    }
}

// ============================================================================
// Search
// ============================================================================

/// Calculators matching a search term and category, in catalog order.
pub fn search(term: &str, category: Category) -> Vec<Calculator> {
    ALL_CALCULATORS
        .iter()
        .filter(|c| c.matches(term, category))
        .copied()
        .collect()
}

// ============================================================================
// Reference Document
// ============================================================================

/// Generate the RELATIONS.md reference from the catalog and relation tables.
///
/// ```rust
/// use calc_core::catalog::generate_relations_markdown;
///
/// let markdown = generate_relations_markdown();
/// assert!(markdown.contains("# Liftcalc Relations Reference"));
/// assert!(markdown.contains("## Frequency Divider"));
/// ```
pub fn generate_relations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(
        r#"# Liftcalc Relations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-relations`

Each relation is solved by leaving exactly the unknown field(s) empty. The
solver picks the matching rearrangement below and never overwrites a value
that was entered.

---

"#,
    );

    for calculator in ALL_CALCULATORS.iter() {
        let meta = calculator.metadata();

        output.push_str(&format!("## {}\n\n", meta.name));
        output.push_str(&format!("{}\n\n", meta.description));
        output.push_str(&format!("- **Command name:** `{}`\n", calculator.slug()));
        if let Some(code) = meta.parameter_code {
            output.push_str(&format!("- **Parameter:** {}\n", code));
        }
        let categories: Vec<_> = meta.categories.iter().map(|c| c.display_name()).collect();
        output.push_str(&format!("- **Categories:** {}\n\n", categories.join(", ")));
        output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula));

        if let Calculator::Relation(id) = calculator {
            let relation = id.relation();

            output.push_str("**Variables:**\n\n");
            output.push_str("| Name | Label | Unit | Entry |\n");
            output.push_str("|------|-------|------|-------|\n");
            for var in relation.variables {
                output.push_str(&format!(
                    "| `{}` | {} | {} | {} |\n",
                    var.name,
                    var.label,
                    var.unit.name(),
                    var.encoding.display_name()
                ));
            }
            output.push('\n');

            output.push_str(&format!(
                "**Rearrangements** ({} of {} values known):\n\n",
                relation.required_known,
                relation.variables.len()
            ));
            for r in relation.rearrangements {
                output.push_str(&format!("- `{}`\n", r.formula));
            }
            output.push('\n');
        }

        if !meta.notes.is_empty() {
            output.push_str("**Notes:**\n");
            for note in meta.notes {
                output.push_str(&format!("- {}\n", note));
            }
            output.push('\n');
        }

        output.push_str("---\n\n");
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Calculators:** {}\n- **Relations:** {}\n",
        ALL_CALCULATORS.len(),
        ALL_RELATIONS.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_and_slugs() {
        assert_eq!(ALL_CALCULATORS.len(), ALL_RELATIONS.len() + 1);
        assert_eq!(ALL_CALCULATORS[0], Calculator::SpeedProfile);
        for calc in ALL_CALCULATORS.iter() {
            assert_eq!(Calculator::from_slug(calc.slug()), Some(*calc));
        }
        assert_eq!(Calculator::from_slug("nope"), None);
    }

    #[test]
    fn test_search_by_parameter_code() {
        assert_eq!(
            search("06-11", Category::All),
            vec![Calculator::Relation(RelationId::CurrentLimit)]
        );
        assert_eq!(
            search("08-09", Category::All),
            vec![Calculator::Relation(RelationId::PoleAngle)]
        );
    }

    #[test]
    fn test_search_case_insensitive() {
        let hits = search("rpm", Category::All);
        assert!(hits.contains(&Calculator::Relation(RelationId::MotorRpm)));
        assert!(hits.contains(&Calculator::Relation(RelationId::TractionSpeed)));
        assert_eq!(hits, search("RPM", Category::All));
    }

    #[test]
    fn test_search_chinese_keyword() {
        assert_eq!(
            search("磁極", Category::All),
            vec![Calculator::Relation(RelationId::PoleAngle)]
        );
    }

    #[test]
    fn test_category_filter() {
        let speed = search("", Category::Speed);
        assert_eq!(
            speed,
            vec![
                Calculator::SpeedProfile,
                Calculator::Relation(RelationId::TractionSpeed),
                Calculator::Relation(RelationId::FrequencyDivider),
            ]
        );
        assert_eq!(search("", Category::All).len(), ALL_CALCULATORS.len());
        assert!(search("divider", Category::Motor).is_empty());
    }

    #[test]
    fn test_category_parse() {
        assert_eq!(Category::parse("inverter"), Some(Category::Inverter));
        assert_eq!(Category::parse("ALL"), Some(Category::All));
        assert_eq!(Category::parse("doors"), None);
    }

    #[test]
    fn test_every_calculator_has_metadata() {
        for calc in ALL_CALCULATORS.iter() {
            let meta = calc.metadata();
            assert!(!meta.name.is_empty());
            assert!(!meta.formula.is_empty());
            assert!(!meta.categories.is_empty(), "{:?} has no category", calc);
        }
    }

    #[test]
    fn test_generate_relations_markdown() {
        let markdown = generate_relations_markdown();

        assert!(markdown.contains("Auto-generated from source code"));
        assert!(markdown.contains("## Speed Profile"));
        assert!(markdown.contains("## Ohm's Law"));
        assert!(markdown.contains("| `divider` | Divider | register count | hexadecimal |"));
        assert!(markdown.contains("- **Parameter:** E57E/E57F"));
        assert!(markdown.contains("(2 of 4 values known)"));
        assert!(markdown.contains("**Relations:** 7"));
    }
}
