use serde::{Deserialize, Deserializer};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names of the source file (matched after lower-casing)
// ---------------------------------------------------------------------------

pub const COL_AGE: &str = "edad";
pub const COL_MONTHS: &str = "meses_cotizados";
pub const COL_SEX: &str = "sexo";
pub const COL_PENSIONER: &str = "pensionado";
pub const COL_BENEFIT: &str = "consultara_beneficio";

/// Every column a [`Record`] is populated from.
pub const REQUIRED_COLUMNS: [&str; 5] = [COL_AGE, COL_MONTHS, COL_SEX, COL_PENSIONER, COL_BENEFIT];

/// Display labels of the two clean outcome categories, in sorted order (0, 1).
pub const OUTCOME_LABELS: [&str; 2] = ["No Reciben", "Reciben"];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("missing required column '{column}'")]
    MissingColumn { column: &'static str },
    #[error("'{value}' is not an integer")]
    InvalidNumber { value: String },
}

// ---------------------------------------------------------------------------
// Record – one row of the source file
// ---------------------------------------------------------------------------

/// A single pension-benefit record.
///
/// Flags are kept as the raw integers found in the file: the dashboard only
/// ever compares them to `1` or sums them, so values outside `{0, 1}` load
/// untouched.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    #[serde(rename = "edad", deserialize_with = "de_int")]
    pub age: i64,
    #[serde(rename = "meses_cotizados", deserialize_with = "de_int")]
    pub months_contributed: i64,
    #[serde(rename = "sexo", deserialize_with = "de_sex")]
    pub sex: String,
    #[serde(rename = "pensionado", deserialize_with = "de_int")]
    pub is_pensioner: i64,
    #[serde(rename = "consultara_beneficio", deserialize_with = "de_int")]
    pub will_request_benefit: i64,
}

impl Record {
    pub fn is_pensioner(&self) -> bool {
        self.is_pensioner == 1
    }

    /// The outcome variable (whether the person will request the benefit).
    pub fn outcome(&self) -> i64 {
        self.will_request_benefit
    }
}

/// Upper-case and trim a `sexo` cell. Values other than `F`/`M` pass through.
pub fn normalize_sex(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// Coerce a cell into an integer: plain integers, or floats with no
/// fractional part (`"70.0"`), surrounded by optional whitespace.
pub fn coerce_int(raw: &str) -> Result<i64, DatasetError> {
    let s = raw.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Ok(f as i64),
        _ => Err(DatasetError::InvalidNumber {
            value: raw.to_string(),
        }),
    }
}

fn de_int<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    let raw = String::deserialize(de)?;
    coerce_int(&raw).map_err(serde::de::Error::custom)
}

fn de_sex<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    let raw = String::deserialize(de)?;
    Ok(normalize_sex(&raw))
}

/// Label used for an outcome value on chart axes and legends.
pub fn outcome_label(value: i64) -> String {
    match value {
        0 | 1 => OUTCOME_LABELS[value as usize].to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded file
// ---------------------------------------------------------------------------

/// The full, immutable dataset. Row order matches the source file.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Normalized (trimmed, lower-cased) header of the source file.
    pub columns: Vec<String>,
}

impl Dataset {
    pub fn new(records: Vec<Record>, columns: Vec<String>) -> Self {
        Dataset { records, columns }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coerces_integral_cells() {
        assert_eq!(coerce_int("42").unwrap(), 42);
        assert_eq!(coerce_int("  7 ").unwrap(), 7);
        assert_eq!(coerce_int("70.0").unwrap(), 70);
        assert_eq!(coerce_int("-3").unwrap(), -3);
    }

    #[test]
    fn rejects_non_integral_cells() {
        assert!(coerce_int("").is_err());
        assert!(coerce_int("abc").is_err());
        assert!(coerce_int("65.5").is_err());
        assert!(coerce_int("NaN").is_err());
    }

    #[test]
    fn sex_is_trimmed_and_uppercased() {
        assert_eq!(normalize_sex(" f "), "F");
        assert_eq!(normalize_sex("m"), "M");
        assert_eq!(normalize_sex(" otro"), "OTRO");
    }

    #[test]
    fn outcome_labels_follow_sorted_category_order() {
        assert_eq!(outcome_label(0), "No Reciben");
        assert_eq!(outcome_label(1), "Reciben");
        assert_eq!(outcome_label(2), "2");
    }
}
