/// Constants used by order/plan reconciliation.
pub mod reconcile {
    /// Default zero-based position of the completion-marker column in plan exports.
    pub const DEFAULT_COMPLETION_COLUMN_INDEX: usize = 9;
    /// Table label used for the sales order set in errors and logs.
    pub const ORDERS_TABLE: &str = "sales orders";
    /// Table label used for the production plan set in errors and logs.
    pub const PLAN_TABLE: &str = "production plan";
}

/// Constants used by text classification.
pub mod classify {
    /// Descriptive fields concatenated (in this order) into classification text.
    pub const TEXT_FIELDS: [&str; 4] = ["Item", "Info", "Client", "Customer Name"];
    /// Separator placed between descriptive field values.
    pub const TEXT_SEPARATOR: &str = " || ";

    /// Literal marker for roll-up banner stands.
    pub const ROLL_UP_MARKER: &str = "ROLL UP";
    /// Literal marker for polycarbonate (Lexan) work.
    pub const LEXAN_MARKER: &str = "LEXAN";
    /// Literal marker for Kiewit guideway signage.
    pub const GUIDEWAY_MARKER: &str = "GUIDEWAYS";

    /// High-intensity reflective sheeting.
    pub const HIGH_INTENSITY_PATTERN: &str = r"HIGH\s*INTENSITY";
    /// Diamond-grade reflective sheeting.
    pub const DIAMOND_GRADE_PATTERN: &str = r"DIAMOND\s*GRADE";
    /// Engineer-grade reflective sheeting.
    pub const ENGINEER_GRADE_PATTERN: &str = r"ENGINEER\s*GRADE";
    /// Generic print vinyl, including a bare `GENERIC` description.
    pub const GENERIC_VINYL_PATTERN: &str = r"GENERIC\s*(PRINT)?\s*VINYL|^GENERIC$| GENERIC[^\w]?";
    /// Flat vehicle wraps.
    pub const FLAT_WRAP_PATTERN: &str = r"FLAT\s*WRAP";
}

/// Constants used when projecting records onto report rows.
pub mod display {
    /// Header the order key column is renamed to in the report.
    pub const ORDER_KEY_HEADER: &str = "Sales Order";
    /// Due-date column name.
    pub const DUE_DATE_FIELD: &str = "Due Date";
    /// Preferred report headers, in display order; absent ones are skipped.
    pub const PREFERRED_HEADERS: [&str; 7] = [
        "Sales Order",
        "Quote Number",
        "Client",
        "Item",
        "Info",
        "Quantity",
        "Due Date",
    ];
    /// `chrono` format for due dates shown in report tables (`MM/DD/YY`).
    pub const DUE_DATE_DISPLAY_FORMAT: &str = "%m/%d/%y";
    /// Text values rendered as blank cells.
    pub const MISSING_TEXT_SENTINELS: [&str; 1] = ["nan"];
}

/// Constants used while reading CSV exports.
pub mod ingest {
    /// Cell spellings read as missing, matched exactly after trimming.
    /// Same set as the default `na_values` of pandas' `read_csv`.
    pub const NA_VALUES: [&str; 18] = [
        "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
        "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ];
    /// Prefix for blank header cells; the column position is appended.
    pub const UNNAMED_HEADER_PREFIX: &str = "Unnamed: ";
}

/// Constants used by due-date parsing.
pub mod dates {
    /// Date-only formats tried in order.
    ///
    /// Two-digit-year variants come first: `%Y` would otherwise accept `24`
    /// as the year 0024.
    pub const DATE_FORMATS: [&str; 10] = [
        "%m/%d/%y",
        "%m/%d/%Y",
        "%m-%d-%y",
        "%m-%d-%Y",
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d-%b-%Y",
        "%b %d, %Y",
        "%B %d, %Y",
        "%b %d %Y",
    ];
    /// Date-time formats tried in order; the time part is discarded.
    pub const DATETIME_FORMATS: [&str; 5] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%m/%d/%y %H:%M",
        "%m/%d/%Y %H:%M",
        "%m/%d/%Y %I:%M %p",
    ];
}

/// Constants used by the document renderer.
pub mod render {
    /// Default document title shown on the cover page.
    pub const DEFAULT_TITLE: &str = "Order Nest";
    /// Cover date format (for example `March 01, 2024`).
    pub const COVER_DATE_FORMAT: &str = "%B %d, %Y";
    /// Placeholder shown when no section survives reconciliation.
    pub const EMPTY_PLACEHOLDER: &str = "No matching rows to display";
    /// Section colours, cycled per rendered section.
    pub const VIBRANT_PALETTE: [&str; 8] = [
        "#2563EB", "#059669", "#DC2626", "#7C3AED", "#EA580C", "#0EA5E9", "#D946EF", "#16A34A",
    ];
    /// Column width (inches) used for headers without an explicit width.
    pub const DEFAULT_COLUMN_WIDTH_IN: f32 = 0.9;
    /// Explicit column widths (inches) per header.
    pub const COLUMN_WIDTHS_IN: [(&str, f32); 7] = [
        ("Sales Order", 0.9),
        ("Quote Number", 0.9),
        ("Client", 1.2),
        ("Item", 1.9),
        ("Info", 1.9),
        ("Quantity", 0.7),
        ("Due Date", 0.7),
    ];
    /// Vertical space before the cover title (inches).
    pub const COVER_TOP_SPACE_IN: f32 = 2.0;
    /// Space between a section title bar and its table (inches).
    pub const TITLE_BAR_GAP_IN: f32 = 0.1;
    /// US letter page width in inches.
    pub const PAGE_WIDTH_IN: f32 = 8.5;
    /// US letter page height in inches.
    pub const PAGE_HEIGHT_IN: f32 = 11.0;
    /// Left/right page margin in inches.
    pub const SIDE_MARGIN_IN: f32 = 0.5;
    /// Top/bottom page margin in inches.
    pub const VERTICAL_MARGIN_IN: f32 = 0.6;
    /// Characters per inch used to size text-renderer columns.
    pub const TEXT_CHARS_PER_INCH: f32 = 12.0;
    /// Page separator emitted by the plain-text renderer.
    pub const TEXT_PAGE_BREAK: &str = "\u{000C}\n";
}

/// Constants used by the command-line front end.
pub mod cli {
    /// Default output file stem.
    pub const DEFAULT_OUTPUT_STEM: &str = "Order_Nest_Today";
}
