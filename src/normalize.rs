//! Join-key canonicalization.

use crate::data::CellValue;
use crate::types::OrderKey;

/// Canonical join key: `uppercase(trim(stringify(value)))`.
///
/// Missing and blank values normalize to the empty string, which callers must
/// treat as "never joins".
pub fn normalize_key(value: &CellValue) -> OrderKey {
    value
        .as_text()
        .map(|text| normalize_key_str(&text))
        .unwrap_or_default()
}

/// String form of [`normalize_key`].
pub fn normalize_key_str(raw: &str) -> OrderKey {
    raw.trim().to_uppercase()
}
