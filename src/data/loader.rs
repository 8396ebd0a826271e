use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use super::model::{Dataset, DatasetError, Record, REQUIRED_COLUMNS};

/// Fixed location of the input file, relative to the working directory.
pub const DATA_PATH: &str = "resumen_beneficio_afp.csv";

/// Separators tried by [`detect_delimiter`], in tie-break order.
const CANDIDATE_DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// How many non-empty lines the delimiter sniffer inspects.
const SNIFF_LINES: usize = 20;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Result of a load attempt as seen by the UI: a dataset (empty on failure)
/// plus the message to show when loading went wrong.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub dataset: Arc<Dataset>,
    pub error: Option<String>,
}

impl LoadOutcome {
    /// Whether the rest of the dashboard should be rendered at all.
    pub fn is_renderable(&self) -> bool {
        self.error.is_none() && !self.dataset.is_empty()
    }
}

/// Load the dataset, turning any failure into a user-visible message and an
/// empty dataset. Never fails.
pub fn load_or_report(path: &Path) -> LoadOutcome {
    match load_file(path) {
        Ok(dataset) => LoadOutcome {
            dataset: Arc::new(dataset),
            error: None,
        },
        Err(e) => {
            log::error!("Failed to load {}: {e:#}", path.display());
            LoadOutcome {
                dataset: Arc::new(Dataset::default()),
                error: Some(format!("Error cargando el archivo CSV: {e:#}")),
            }
        }
    }
}

/// Read and parse a delimited text file into a [`Dataset`].
pub fn load_file(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let (dataset, delimiter) = parse_with_delimiter(&text)?;
    log::info!(
        "Loaded {} records from {} (delimiter {:?}, columns {:?})",
        dataset.len(),
        path.display(),
        delimiter as char,
        dataset.columns
    );
    Ok(dataset)
}

/// Parse delimited text (header row first) into a [`Dataset`].
///
/// The separator is sniffed, header names are trimmed and lower-cased, and
/// the required columns are checked before any row is read.
pub fn parse_text(text: &str) -> Result<Dataset> {
    parse_with_delimiter(text).map(|(dataset, _)| dataset)
}

/// [`parse_text`], also returning the separator that was detected.
fn parse_with_delimiter(text: &str) -> Result<(Dataset, u8)> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let delimiter = detect_delimiter(text);

    // Whitespace-only lines carry no fields; the csv reader would see them
    // as one-field records and reject the whole file.
    let body: String = text
        .lines()
        .filter(|l| !is_blank_line(l))
        .flat_map(|l| [l, "\n"])
        .collect();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_reader(body.as_bytes());

    let headers: csv::StringRecord = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(normalize_header)
        .collect();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DatasetError::MissingColumn { column }.into());
        }
    }
    reader.set_headers(headers.clone());

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<Record>().enumerate() {
        let record = result.with_context(|| format!("CSV row {}", row_no + 1))?;
        records.push(record);
    }

    let columns = headers.iter().map(str::to_string).collect();
    Ok((Dataset::new(records, columns), delimiter))
}

fn is_blank_line(line: &str) -> bool {
    line.trim().is_empty()
}

fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase()
}

// ---------------------------------------------------------------------------
// Delimiter sniffing
// ---------------------------------------------------------------------------

/// Guess the field separator among comma, semicolon and tab.
///
/// A candidate that appears the same non-zero number of times on every
/// sampled line wins; among those the highest per-line count wins. Without a
/// consistent candidate the header line decides, and a file with none of the
/// candidates is read as single-column comma-separated.
pub fn detect_delimiter(text: &str) -> u8 {
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !is_blank_line(l))
        .take(SNIFF_LINES)
        .collect();

    let Some(header) = lines.first() else {
        return b',';
    };

    let mut best: Option<(u8, usize)> = None;
    for &delim in &CANDIDATE_DELIMITERS {
        let first = count_unquoted(header, delim);
        if first == 0 {
            continue;
        }
        let consistent = lines.iter().all(|l| count_unquoted(l, delim) == first);
        if consistent && best.map_or(true, |(_, n)| first > n) {
            best = Some((delim, first));
        }
    }
    if let Some((delim, _)) = best {
        return delim;
    }

    CANDIDATE_DELIMITERS
        .iter()
        .map(|&d| (d, count_unquoted(header, d)))
        .filter(|&(_, n)| n > 0)
        .fold(None, |acc: Option<(u8, usize)>, (d, n)| match acc {
            Some((_, m)) if m >= n => acc,
            _ => Some((d, n)),
        })
        .map_or(b',', |(d, _)| d)
}

/// Count occurrences of `delim` in `line` that are not inside double quotes.
fn count_unquoted(line: &str, delim: u8) -> usize {
    let mut in_quotes = false;
    let mut count = 0;
    for &b in line.as_bytes() {
        if b == b'"' {
            in_quotes = !in_quotes;
        } else if b == delim && !in_quotes {
            count += 1;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMA: &str = "edad,meses_cotizados,sexo,pensionado,consultara_beneficio\n\
                         70,120,F,1,1\n\
                         20,10,m ,0,0\n";

    #[test]
    fn detects_common_separators() {
        assert_eq!(detect_delimiter(COMMA), b',');
        assert_eq!(detect_delimiter("a;b;c\n1;2;3\n"), b';');
        assert_eq!(detect_delimiter("a\tb\tc\n1\t2\t3\n"), b'\t');
    }

    #[test]
    fn decimal_commas_do_not_fool_the_sniffer() {
        let text = "edad;monto\n70;1,5\n65;2,25\n";
        assert_eq!(detect_delimiter(text), b';');
    }

    #[test]
    fn quoted_separators_are_ignored() {
        let text = "nombre;edad\n\"Perez, Ana\";70\n\"Soto, Luis\";65\n";
        assert_eq!(detect_delimiter(text), b';');
    }

    #[test]
    fn single_column_falls_back_to_comma() {
        assert_eq!(detect_delimiter("edad\n70\n"), b',');
        assert_eq!(detect_delimiter(""), b',');
    }

    #[test]
    fn parses_and_normalizes() {
        let ds = parse_text(COMMA).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].age, 70);
        assert_eq!(ds.records[0].sex, "F");
        assert_eq!(ds.records[1].sex, "M");
        assert_eq!(ds.records[1].will_request_benefit, 0);
    }

    #[test]
    fn header_names_are_case_and_space_insensitive() {
        let text = " EDAD ;Meses_Cotizados;SEXO; Pensionado;Consultara_Beneficio ;extra\n\
                    80;300; f;1;0;x\n";
        let ds = parse_text(text).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].months_contributed, 300);
        assert_eq!(ds.records[0].sex, "F");
        assert!(ds.columns.iter().any(|c| c == "extra"));
    }

    #[test]
    fn unknown_sex_values_pass_through_normalized() {
        let text = "edad,meses_cotizados,sexo,pensionado,consultara_beneficio\n40,5, x ,0,1\n";
        let ds = parse_text(text).unwrap();
        assert_eq!(ds.records[0].sex, "X");
    }

    #[test]
    fn missing_column_is_named() {
        let text = "edad,meses_cotizados,sexo,pensionado\n70,120,F,1\n";
        let err = parse_text(text).unwrap_err();
        match err.downcast_ref::<DatasetError>() {
            Some(DatasetError::MissingColumn { column }) => {
                assert_eq!(*column, "consultara_beneficio")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_numeric_age_fails_the_load() {
        let text = "edad,meses_cotizados,sexo,pensionado,consultara_beneficio\nsetenta,120,F,1,1\n";
        let err = parse_text(text).unwrap_err();
        assert!(format!("{err:#}").contains("CSV row 1"));
    }

    #[test]
    fn whitespace_only_lines_are_skipped() {
        let text = "edad;meses_cotizados;sexo;pensionado;consultara_beneficio\n\
                    70;120;F;1;1\n   \n\t\n65;200;M;1;0\n  \n";
        let ds = parse_text(text).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].age, 65);
    }

    #[test]
    fn byte_order_mark_and_crlf_are_tolerated() {
        let text = "\u{feff}Edad,meses_cotizados,sexo,pensionado,consultara_beneficio\r\n\
                    70,120,F,1,1\r\n\
                    20,10,M,0,0\r\n";
        assert_eq!(detect_delimiter(text.trim_start_matches('\u{feff}')), b',');
        let ds = parse_text(text).unwrap();
        assert_eq!(ds.columns[0], "edad");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[1].sex, "M");
        assert_eq!(ds.records[1].will_request_benefit, 0);
    }

    #[test]
    fn detected_delimiter_is_reported() {
        let (ds, delimiter) =
            parse_with_delimiter("edad\tmeses_cotizados\tsexo\tpensionado\tconsultara_beneficio\n70\t120\tF\t1\t1\n")
                .unwrap();
        assert_eq!(delimiter, b'\t');
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn header_only_file_is_an_empty_dataset() {
        let ds = parse_text("edad,meses_cotizados,sexo,pensionado,consultara_beneficio\n").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn missing_file_is_reported_not_raised() {
        let outcome = load_or_report(Path::new("does/not/exist.csv"));
        assert!(outcome.dataset.is_empty());
        assert!(!outcome.is_renderable());
        let msg = outcome.error.unwrap();
        assert!(msg.starts_with("Error cargando el archivo CSV"));
    }
}
