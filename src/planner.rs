//! Grouping and ordering of classified records into report sections.

use indexmap::IndexMap;

use crate::classify::{Category, ClassifiedRecord};
use crate::constants::display::DUE_DATE_FIELD;
use crate::dates::DueKey;

/// A titled group of records sharing one category, sorted by due date.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    /// Category shared by every record.
    pub category: Category,
    /// Display title (see [`Category::title`]).
    pub title: String,
    /// Records sorted by due date, stable for ties.
    pub records: Vec<ClassifiedRecord>,
}

impl Section {
    /// Earliest due key in the section (`Undated` when nothing parses).
    pub fn min_due(&self) -> DueKey {
        self.records
            .iter()
            .map(due_key)
            .min()
            .unwrap_or(DueKey::Undated)
    }
}

/// Due-date sort key of a classified record.
pub fn due_key(record: &ClassifiedRecord) -> DueKey {
    DueKey::from_cell(record.joined.order.get(DUE_DATE_FIELD))
}

/// Group `records` by category and order the resulting sections.
///
/// - Categories with no records produce no section.
/// - Sections are ordered by their earliest due date (undated last), ties by
///   category id; the catch-all section always comes last.
/// - Records inside a section are stably sorted by due date.
pub fn plan_sections(records: Vec<ClassifiedRecord>) -> Vec<Section> {
    let mut groups: IndexMap<Category, Vec<(DueKey, ClassifiedRecord)>> = IndexMap::new();
    for record in records {
        let key = due_key(&record);
        groups
            .entry(record.category)
            .or_default()
            .push((key, record));
    }

    let mut ordered: Vec<(Category, DueKey, Vec<(DueKey, ClassifiedRecord)>)> = groups
        .into_iter()
        .map(|(category, mut entries)| {
            entries.sort_by_key(|(key, _)| *key);
            let min = entries.first().map_or(DueKey::Undated, |(key, _)| *key);
            (category, min, entries)
        })
        .collect();

    ordered.sort_by(|(a_cat, a_min, _), (b_cat, b_min, _)| {
        a_cat
            .is_catch_all()
            .cmp(&b_cat.is_catch_all())
            .then_with(|| a_min.cmp(b_min))
            .then_with(|| a_cat.id().cmp(b_cat.id()))
    });

    ordered
        .into_iter()
        .map(|(category, _, entries)| Section {
            category,
            title: category.title().to_string(),
            records: entries.into_iter().map(|(_, record)| record).collect(),
        })
        .collect()
}
