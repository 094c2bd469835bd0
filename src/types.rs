/// Column/field name as it appears in a trimmed CSV header.
/// Examples: `Sales Order`, `Due Date`, `Graphics Completed`
pub type FieldName = String;
/// Canonical join key derived from an order identifier.
/// Examples: `SO-1042`, `Q88`
pub type OrderKey = String;
/// Internal category identifier used for grouping and tie-breaking.
/// Examples: `__ROLL_UP__`, `DIAMOND GRADE REFLECTIVE`, `__MISC__`
pub type CategoryId = &'static str;
/// Human-facing section title.
/// Examples: `Roll Up`, `Generic Vinyl`
pub type SectionTitle = String;
/// Display-ready cell text for a rendered table.
/// Examples: `03/01/24`, `DIAMOND GRADE sign`, `` (empty)
pub type CellText = String;
/// CSS-style hex colour used by renderers.
/// Example: `#2563EB`
pub type HexColor = String;
