//! Priority-ordered text classification of reconciled orders.
//!
//! Each record's descriptive fields are concatenated into one uppercase
//! string and matched against an ordered rule table. The first matching rule
//! wins; records nothing matches fall into [`Category::Miscellaneous`].

use regex::{Regex, RegexBuilder};
use serde::{Serialize, Serializer};

use crate::constants::classify::{
    DIAMOND_GRADE_PATTERN, ENGINEER_GRADE_PATTERN, FLAT_WRAP_PATTERN, GENERIC_VINYL_PATTERN,
    GUIDEWAY_MARKER, HIGH_INTENSITY_PATTERN, LEXAN_MARKER, ROLL_UP_MARKER, TEXT_FIELDS,
    TEXT_SEPARATOR,
};
use crate::data::Record;
use crate::errors::OrderNestError;
use crate::reconcile::JoinedRecord;
use crate::types::CategoryId;

/// Work category assigned to each reconciled order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// `ROLL UP` marker.
    RollUp,
    /// `LEXAN` marker.
    Lexan,
    /// `GUIDEWAYS` marker.
    KiewitGuideway,
    /// High intensity grade reflective sheeting.
    HighIntensityGrade,
    /// Diamond grade reflective sheeting.
    DiamondGrade,
    /// Engineer grade reflective sheeting.
    EngineerGrade,
    /// Generic (print) vinyl.
    GenericVinyl,
    /// Flat wrap.
    FlatWrap,
    /// Catch-all for records no rule matched.
    Miscellaneous,
}

impl Category {
    /// Every category, in rule-table order.
    pub const ALL: [Category; 9] = [
        Category::RollUp,
        Category::Lexan,
        Category::KiewitGuideway,
        Category::HighIntensityGrade,
        Category::DiamondGrade,
        Category::EngineerGrade,
        Category::GenericVinyl,
        Category::FlatWrap,
        Category::Miscellaneous,
    ];

    /// Internal identifier. Section ties are broken by comparing these bytewise.
    pub fn id(self) -> CategoryId {
        match self {
            Category::RollUp => "__ROLL_UP__",
            Category::Lexan => "__LEXAN__",
            Category::KiewitGuideway => "__KIEWIT_GUIDEWAY__",
            Category::HighIntensityGrade => "High Intensity Grade Reflective",
            Category::DiamondGrade => "DIAMOND GRADE REFLECTIVE",
            Category::EngineerGrade => "Engineer Grade Reflective",
            Category::GenericVinyl => "Generic Vinyl",
            Category::FlatWrap => "Flat Wrap",
            Category::Miscellaneous => "__MISC__",
        }
    }

    /// Section title shown in the report.
    pub fn title(self) -> &'static str {
        match self {
            Category::RollUp => "Roll Up",
            Category::Lexan => "Lexan",
            Category::KiewitGuideway => "Kiewit Guideway",
            Category::Miscellaneous => "Miscellaneous",
            other => other.id(),
        }
    }

    /// True for the category that collects unmatched records.
    pub fn is_catch_all(self) -> bool {
        self == Category::Miscellaneous
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.id())
    }
}

/// How a rule tests the classification text.
#[derive(Clone, Debug)]
pub enum RuleMatcher {
    /// Substring test against the uppercased text.
    Literal(&'static str),
    /// Case-insensitive regex search anywhere in the text.
    Pattern(Regex),
}

impl RuleMatcher {
    fn matches(&self, text: &str) -> bool {
        match self {
            RuleMatcher::Literal(marker) => text.contains(marker),
            RuleMatcher::Pattern(regex) => regex.is_match(text),
        }
    }
}

/// One `(matcher, category)` entry of the rule table.
#[derive(Clone, Debug)]
pub struct ClassificationRule {
    /// Test applied to the classification text.
    pub matcher: RuleMatcher,
    /// Category assigned on a match.
    pub category: Category,
}

impl ClassificationRule {
    /// Substring rule; `marker` must already be uppercase.
    pub fn literal(marker: &'static str, category: Category) -> Self {
        Self {
            matcher: RuleMatcher::Literal(marker),
            category,
        }
    }

    /// Compile `pattern` case-insensitively.
    pub fn pattern(pattern: &str, category: Category) -> Result<Self, OrderNestError> {
        let regex = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self {
            matcher: RuleMatcher::Pattern(regex),
            category,
        })
    }
}

/// A reconciled order with its assigned category.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedRecord {
    /// Assigned category.
    pub category: Category,
    /// The reconciled order.
    pub joined: JoinedRecord,
}

/// Ordered, first-match-wins rule table.
#[derive(Clone, Debug)]
pub struct Classifier {
    rules: Vec<ClassificationRule>,
}

impl Classifier {
    /// Build a classifier from an explicit rule table.
    ///
    /// Rules targeting [`Category::Miscellaneous`] are rejected; the catch-all
    /// is implicit.
    pub fn from_rules(rules: Vec<ClassificationRule>) -> Result<Self, OrderNestError> {
        if rules.iter().any(|rule| rule.category.is_catch_all()) {
            return Err(OrderNestError::Configuration(
                "classification rules must not target the catch-all category".to_string(),
            ));
        }
        Ok(Self { rules })
    }

    /// The production rule table: dedicated markers, then grade patterns.
    pub fn standard() -> Result<Self, OrderNestError> {
        Self::from_rules(vec![
            ClassificationRule::literal(ROLL_UP_MARKER, Category::RollUp),
            ClassificationRule::literal(LEXAN_MARKER, Category::Lexan),
            ClassificationRule::literal(GUIDEWAY_MARKER, Category::KiewitGuideway),
            ClassificationRule::pattern(HIGH_INTENSITY_PATTERN, Category::HighIntensityGrade)?,
            ClassificationRule::pattern(DIAMOND_GRADE_PATTERN, Category::DiamondGrade)?,
            ClassificationRule::pattern(ENGINEER_GRADE_PATTERN, Category::EngineerGrade)?,
            ClassificationRule::pattern(GENERIC_VINYL_PATTERN, Category::GenericVinyl)?,
            ClassificationRule::pattern(FLAT_WRAP_PATTERN, Category::FlatWrap)?,
        ])
    }

    /// Rules in evaluation order.
    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// Category for already-extracted classification text.
    pub fn classify_text(&self, text: &str) -> Category {
        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(text))
            .map_or(Category::Miscellaneous, |rule| rule.category)
    }

    /// Category for one record's descriptive fields.
    pub fn classify(&self, record: &Record) -> Category {
        self.classify_text(&classification_text(record))
    }

    /// Classify every joined row, preserving input order.
    pub fn classify_all(&self, rows: Vec<JoinedRecord>) -> Vec<ClassifiedRecord> {
        rows.into_iter()
            .map(|joined| ClassifiedRecord {
                category: self.classify(&joined.order),
                joined,
            })
            .collect()
    }
}

/// Uppercased descriptive text: non-blank values of the descriptive fields,
/// in fixed order, joined by `" || "`.
pub fn classification_text(record: &Record) -> String {
    TEXT_FIELDS
        .iter()
        .map(|field| record.get(field))
        .filter(|value| !value.is_blank())
        .filter_map(|value| value.as_text())
        .collect::<Vec<_>>()
        .join(TEXT_SEPARATOR)
        .to_uppercase()
}
