//! Ingredient line parsing.
//!
//! A line is tried against an ordered list of [`MatchRule`]s; the first rule
//! that produces an ingredient wins and is reported alongside the result, so
//! the chosen rule can be inspected and tested on its own. A line no rule
//! accepts becomes a bare name with quantity 1.
//!
//! Fractions are not understood: `"2 1/4 cups flour"` reads as quantity 2 of
//! `"1/4 cups flour"`, and `"3/4 cup sugar"` reads as a bare name.

use once_cell::sync::Lazy;
use regex::Regex;

use super::units::{FixedVocabulary, UnitNormalizer};
use crate::models::Ingredient;

/// Bullet (`•`, `-`, `*`) or numbered-list marker (`1.`, `2)`).
static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[•*\-]\s*|\d+[.)]\s+)").expect("marker pattern"));

/// `<number> <optional unit word> <rest>`
static QUANTITY_UNIT_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+\.?\d*)\s*([a-zA-Z]+)?\s+(.+)$").expect("quantity pattern")
});

/// `<name> (<notes>)`, notes optional.
static NAME_NOTES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([^(]+)(?:\(([^)]+)\))?").expect("name/notes pattern"));

/// `<label>: <value>`
static LABEL_VALUE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-zA-Z][a-zA-Z\s]*?)\s*:\s*(.+)$").expect("label pattern"));

/// `<number> <optional unit word> <anything>` inside a label's value.
static VALUE_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+\.?\d*)\s*([a-zA-Z]+)?\s*(.*)$").expect("value amount pattern")
});

/// A named way of reading an ingredient line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchRule {
    /// `2 cups flour (sifted)`
    QuantityUnitName,
    /// `Flour: 2 cups`, `Salt: to taste`
    LabelValue,
    /// Anything else; the whole line is the name.
    Bare,
}

impl MatchRule {
    /// Rules tried in order before falling back to [`MatchRule::Bare`].
    pub const PRIORITY: [MatchRule; 2] = [MatchRule::QuantityUnitName, MatchRule::LabelValue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QuantityUnitName => "quantity_unit_name",
            Self::LabelValue => "label_value",
            Self::Bare => "bare",
        }
    }

    /// Apply this rule alone to an already-stripped line.
    pub fn apply(self, line: &str, units: &dyn UnitNormalizer) -> Option<Ingredient> {
        match self {
            Self::QuantityUnitName => quantity_unit_name(line, units),
            Self::LabelValue => label_value(line, units),
            Self::Bare => Some(Ingredient::bare(line)),
        }
    }
}

/// An ingredient together with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedIngredient {
    pub rule: MatchRule,
    pub ingredient: Ingredient,
}

/// Parses single ingredient lines against a unit vocabulary.
#[derive(Debug, Clone, Default)]
pub struct IngredientParser<U = FixedVocabulary> {
    units: U,
}

impl IngredientParser<FixedVocabulary> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<U: UnitNormalizer> IngredientParser<U> {
    pub fn with_units(units: U) -> Self {
        Self { units }
    }

    pub fn units(&self) -> &U {
        &self.units
    }

    /// Parse one line. Returns `None` when nothing is left once the list
    /// marker is stripped.
    pub fn parse_line(&self, line: &str) -> Option<ParsedIngredient> {
        let line = strip_marker(line.trim());
        if line.is_empty() {
            return None;
        }

        let parsed = MatchRule::PRIORITY
            .iter()
            .find_map(|&rule| {
                rule.apply(line, &self.units)
                    .map(|ingredient| ParsedIngredient { rule, ingredient })
            })
            .unwrap_or_else(|| ParsedIngredient {
                rule: MatchRule::Bare,
                ingredient: Ingredient::bare(line),
            });

        Some(parsed)
    }

    pub fn parse(&self, line: &str) -> Option<Ingredient> {
        self.parse_line(line).map(|p| p.ingredient)
    }
}

/// Remove a leading bullet or `<digits>.`/`<digits>)` list marker.
pub fn strip_marker(line: &str) -> &str {
    match MARKER.find(line) {
        Some(m) => line[m.end()..].trim_start(),
        None => line,
    }
}

fn quantity_unit_name(line: &str, units: &dyn UnitNormalizer) -> Option<Ingredient> {
    let caps = QUANTITY_UNIT_NAME.captures(line)?;
    let quantity: f64 = caps[1].parse().ok()?;
    let token = caps.get(2).map_or("", |m| m.as_str());
    let rest = &caps[3];

    let (mut name, notes) = match NAME_NOTES.captures(rest) {
        Some(nc) => (
            nc[1].trim().to_string(),
            nc.get(2).map_or("", |m| m.as_str()).to_string(),
        ),
        None => (rest.trim().to_string(), String::new()),
    };

    let unit = match units.normalize(token) {
        Some(unit) => unit,
        None => {
            if !token.is_empty() {
                name = format!("{} {}", token, name).trim().to_string();
            }
            String::new()
        }
    };

    if name.is_empty() {
        return None;
    }

    Some(Ingredient {
        name,
        quantity,
        unit,
        notes,
    })
}

fn label_value(line: &str, units: &dyn UnitNormalizer) -> Option<Ingredient> {
    let caps = LABEL_VALUE.captures(line)?;
    let name = caps[1].trim().to_string();
    let value = caps[2].trim();

    if let Some(amount) = VALUE_AMOUNT.captures(value) {
        let quantity: f64 = amount[1].parse().ok()?;
        let token = amount.get(2).map_or("", |m| m.as_str());
        let tail = amount[3].trim();

        let (unit, notes) = match units.normalize(token) {
            Some(unit) => (unit, tail.to_string()),
            None => (
                String::new(),
                format!("{} {}", token, tail).trim().to_string(),
            ),
        };
        return Some(Ingredient {
            name,
            quantity,
            unit,
            notes,
        });
    }

    let ingredient = match units.normalize(value) {
        Some(unit) => Ingredient::new(name, 1.0, unit),
        None => Ingredient::bare(name).with_notes(value),
    };
    Some(ingredient)
}
