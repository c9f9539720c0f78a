use std::io::{self, BufRead, Write};

use super::{BenchmarkError, Case, Summary};

/// Column header of the CSV report.
pub const CSV_HEADER: &str = "language,case_type,size,mean_time_sec,std_dev_sec";

/// One row of the benchmark report.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkRecord {
    /// Implementation label (`rust`, or an external program's label).
    pub language: String,
    /// Input shape.
    pub case: Case,
    /// Number of elements sorted.
    pub size: usize,
    /// Mean sort time in seconds.
    pub mean_sec: f64,
    /// Sample standard deviation in seconds.
    pub std_dev_sec: f64,
}

impl BenchmarkRecord {
    /// Build a record from a timing summary.
    pub fn new(language: impl Into<String>, case: Case, size: usize, summary: &Summary) -> Self {
        Self {
            language: language.into(),
            case,
            size,
            mean_sec: summary.mean,
            std_dev_sec: summary.std_dev,
        }
    }
}

/// Write the header followed by one line per record.
pub fn write_csv<W: Write>(mut out: W, records: &[BenchmarkRecord]) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for record in records {
        writeln!(
            out,
            "{},{},{},{},{}",
            escape_field(&record.language),
            record.case,
            record.size,
            record.mean_sec,
            record.std_dev_sec
        )?;
    }
    out.flush()
}

/// Read a report produced by [`write_csv`].
///
/// The header must match [`CSV_HEADER`]; blank lines are skipped.
pub fn read_csv<R: BufRead>(reader: R) -> Result<Vec<BenchmarkRecord>, BenchmarkError> {
    let mut lines = reader.lines().enumerate();

    let header = match lines.next() {
        Some((_, line)) => line?,
        None => return Err(malformed(1, "empty report")),
    };
    if header.trim_end() != CSV_HEADER {
        return Err(malformed(1, "unexpected header"));
    }

    let mut records = Vec::new();
    for (idx, line) in lines {
        let line = line?;
        let line_no = idx + 1;
        if line.trim().is_empty() {
            continue;
        }

        let fields = split_fields(line.trim_end())
            .ok_or_else(|| malformed(line_no, "unterminated quote"))?;
        let [language, case, size, mean, std_dev] = fields.as_slice() else {
            let reason = format!("expected 5 fields, found {}", fields.len());
            return Err(malformed(line_no, reason));
        };

        records.push(BenchmarkRecord {
            language: language.clone(),
            case: case.parse().map_err(|e| malformed(line_no, format!("{e}")))?,
            size: size
                .parse()
                .map_err(|_| malformed(line_no, format!("invalid size '{size}'")))?,
            mean_sec: mean
                .parse()
                .map_err(|_| malformed(line_no, format!("invalid mean '{mean}'")))?,
            std_dev_sec: std_dev
                .parse()
                .map_err(|_| malformed(line_no, format!("invalid std dev '{std_dev}'")))?,
        });
    }

    Ok(records)
}

fn malformed(line: usize, reason: impl Into<String>) -> BenchmarkError {
    BenchmarkError::MalformedReport {
        line,
        reason: reason.into(),
    }
}

/// Split one CSV line, undoing the quoting applied by `escape_field`.
fn split_fields(line: &str) -> Option<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut quoted = false;

    while let Some(c) = chars.next() {
        match (quoted, c) {
            (true, '"') if chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            (true, '"') => quoted = false,
            (false, '"') if current.is_empty() => quoted = true,
            (false, ',') => fields.push(std::mem::take(&mut current)),
            (_, c) => current.push(c),
        }
    }

    if quoted {
        return None;
    }
    fields.push(current);
    Some(fields)
}

fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
