//! # Record Normalizer
//!
//! Maps raw tabular rows (arbitrary, possibly missing fields) to
//! [`CanonicalRecord`]s with typed, defaulted fields. The mapping is
//! total: malformed input degrades to a display sentinel, it never
//! fails a row.
//!
//! Column headers vary by deployment (English or Hebrew), so every
//! field carries an alias table. Spreadsheet exports use the literal
//! string "nan" for missing cells; that sentinel and empty-after-trim
//! values are both treated as absent.

use crate::error::EtiquetaError;
use std::sync::Arc;

/// Display sentinel for absent string and numeric fields.
const NA: &str = "N/A";

/// Strings that parse as `true` for boolean flags (case-insensitive).
const TRUTHY: &[&str] = &["yes", "true", "1"];

/// Maximum number of size/price tier slot pairs scanned per row.
pub const MAX_TIERS: usize = 4;

/// Named fields of a product row, each with its header aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Model,
    Color,
    Price,
    SoleThickness,
    Brand,
    Vegan,
    Grounded,
    Discount,
}

impl Field {
    /// Header aliases, English first, Hebrew second.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Model => &["Model", "דגם"],
            Field::Color => &["Color", "צבע"],
            Field::Price => &["Price", "מחיר"],
            Field::SoleThickness => &["Sole Thickness", "עובי"],
            Field::Brand => &["Brand", "מותג"],
            Field::Vegan => &["Vegan", "טבעוני"],
            Field::Grounded => &["Grounded", "הארקה"],
            Field::Discount => &["Discount", "הנחה"],
        }
    }
}

/// Header aliases for the numbered tier slots: (size, price) per slot.
const TIER_ALIASES: [(&[&str], &[&str]); MAX_TIERS] = [
    (&["Size 1", "מידה 1"], &["Price 1", "מחיר 1"]),
    (&["Size 2", "מידה 2"], &["Price 2", "מחיר 2"]),
    (&["Size 3", "מידה 3"], &["Price 3", "מחיר 3"]),
    (&["Size 4", "מידה 4"], &["Price 4", "מחיר 4"]),
];

/// One row of the input table, keyed by the table's header row.
#[derive(Debug, Clone)]
pub struct RawRow {
    headers: Arc<Vec<String>>,
    values: Vec<String>,
}

impl RawRow {
    /// Build a row from explicit header/value pairs. Used by tests and
    /// by callers that already hold a parsed table.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            headers: Arc::new(pairs.iter().map(|(h, _)| h.to_string()).collect()),
            values: pairs.iter().map(|(_, v)| v.to_string()).collect(),
        }
    }

    /// Look up a value by any of the given header aliases.
    ///
    /// Returns `None` when the column is missing, the value trims to
    /// empty, or the value is the "nan" missing-cell sentinel.
    fn lookup(&self, aliases: &[&str]) -> Option<&str> {
        let idx = self.headers.iter().position(|h| {
            let h = h.trim();
            aliases.iter().any(|a| h.eq_ignore_ascii_case(a))
        })?;
        let value = self.values.get(idx)?.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("nan") {
            None
        } else {
            Some(value)
        }
    }

    fn get(&self, field: Field) -> Option<&str> {
        self.lookup(field.aliases())
    }
}

/// Parse the uploaded CSV blob into rows.
///
/// This is the only fallible step of input handling: a blob that cannot
/// be read as a table aborts the whole operation. Individual cell
/// problems are left for [`normalize`] to absorb.
pub fn parse_table(csv_text: &str) -> Result<Vec<RawRow>, EtiquetaError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes());

    let headers: Arc<Vec<String>> = Arc::new(
        reader
            .headers()
            .map_err(|e| EtiquetaError::Csv(format!("Failed to read header row: {e}")))?
            .iter()
            .map(str::to_string)
            .collect(),
    );

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| EtiquetaError::Csv(format!("Failed to read row: {e}")))?;
        rows.push(RawRow {
            headers: headers.clone(),
            values: record.iter().map(str::to_string).collect(),
        });
    }
    Ok(rows)
}

/// A numeric field that keeps its raw text when parsing fails.
///
/// Downstream formatting (currency grouping, one-decimal thickness)
/// only applies to `Parsed` values; `Unparsed` values display verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum NumericField {
    Parsed(f64),
    Unparsed(String),
}

impl NumericField {
    /// Total parse: absent becomes the "N/A" sentinel, a value that is
    /// not a decimal number keeps its raw text as the display form.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None => NumericField::Unparsed(NA.to_string()),
            Some(s) => match s.replace(',', "").parse::<f64>() {
                Ok(v) => NumericField::Parsed(v),
                Err(_) => NumericField::Unparsed(s.to_string()),
            },
        }
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, NumericField::Parsed(_))
    }

    /// Currency-style display: thousands grouping with two decimals for
    /// parsed values, raw text otherwise.
    pub fn display_grouped(&self) -> String {
        match self {
            NumericField::Parsed(v) => group_thousands(*v),
            NumericField::Unparsed(s) => s.clone(),
        }
    }

    /// Measurement-style display: one decimal place for parsed values,
    /// raw text otherwise.
    pub fn display_fixed1(&self) -> String {
        match self {
            NumericField::Parsed(v) => format!("{v:.1}"),
            NumericField::Unparsed(s) => s.clone(),
        }
    }
}

/// Format a number as `1,234.50`.
fn group_thousands(value: f64) -> String {
    let formatted = format!("{:.2}", value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((&formatted, "00"));
    let mut grouped = String::new();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// One size-range/price pair of the mini price table.
#[derive(Debug, Clone, PartialEq)]
pub struct Tier {
    pub size_label: String,
    pub price: NumericField,
}

/// One normalized product row, ready for layout and rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalRecord {
    /// Headline text, uppercased. "N/A" when absent.
    pub model_name: String,
    /// Headline text, uppercased. "N/A" when absent.
    pub color: String,
    pub price: NumericField,
    pub sole_thickness_mm: NumericField,
    /// Resolves a brand logo resource by name; rendered as text when
    /// the resource is missing.
    pub brand_name: Option<String>,
    pub is_vegan: bool,
    pub is_grounded: bool,
    /// Present iff the discount field holds a non-negative number.
    pub discount_percent: Option<u32>,
    /// Up to [`MAX_TIERS`] pairs, in slot order.
    pub size_price_tiers: Vec<Tier>,
}

/// Map a raw row to a canonical record. Total: never fails, every
/// missing or malformed field degrades to its sentinel.
pub fn normalize(row: &RawRow) -> CanonicalRecord {
    CanonicalRecord {
        model_name: headline(row.get(Field::Model)),
        color: headline(row.get(Field::Color)),
        price: NumericField::parse(row.get(Field::Price)),
        sole_thickness_mm: NumericField::parse(row.get(Field::SoleThickness)),
        brand_name: row.get(Field::Brand).map(str::to_string),
        is_vegan: is_truthy(row.get(Field::Vegan)),
        is_grounded: is_truthy(row.get(Field::Grounded)),
        discount_percent: parse_discount(row.get(Field::Discount)),
        size_price_tiers: collect_tiers(row),
    }
}

/// String fields rendered as headline text: uppercase, "N/A" default.
fn headline(raw: Option<&str>) -> String {
    raw.map(str::to_uppercase).unwrap_or_else(|| NA.to_string())
}

/// Case-insensitive truthy parse. Absent is false.
fn is_truthy(raw: Option<&str>) -> bool {
    raw.is_some_and(|s| TRUTHY.iter().any(|t| s.eq_ignore_ascii_case(t)))
}

/// Discount is present iff the field parses as a non-negative number;
/// the fractional part is discarded.
fn parse_discount(raw: Option<&str>) -> Option<u32> {
    let value = raw?.parse::<f64>().ok()?;
    if value.is_nan() || value < 0.0 {
        return None;
    }
    Some(value.trunc() as u32)
}

/// Scan the fixed tier slots. A pair is included iff both the size
/// label and the price survive the missing-value filter.
fn collect_tiers(row: &RawRow) -> Vec<Tier> {
    let mut tiers = Vec::new();
    for (size_aliases, price_aliases) in TIER_ALIASES {
        let (Some(size), Some(price)) = (row.lookup(size_aliases), row.lookup(price_aliases))
        else {
            continue;
        };
        tiers.push(Tier {
            size_label: size.to_string(),
            price: NumericField::parse(Some(price)),
        });
    }
    tiers
}
