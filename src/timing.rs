//! Wall-clock timing of the sort and the single-value output sink.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crate::heap::heap_sort;

/// Sort `seq` in place and return how long the sort alone took.
///
/// The interval brackets only the [`heap_sort`] call; reading input and
/// writing the report are outside it.
pub fn time_sort<T: Ord>(seq: &mut [T]) -> Duration {
    let start = Instant::now();
    heap_sort(seq);
    let elapsed = start.elapsed();

    tracing::debug!(len = seq.len(), elapsed_ns = elapsed.as_nanos() as u64, "heapsort finished");
    elapsed
}

/// Significant digits of the reported duration.
pub const REPORT_PRECISION: usize = 6;

/// Write `elapsed` as floating-point seconds followed by a newline.
///
/// Uses general notation with [`REPORT_PRECISION`] significant digits, e.g.
/// `0.0123457` or `1.74e-07`.
pub fn report_seconds<W: Write>(mut out: W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "{}", format_general(elapsed.as_secs_f64(), REPORT_PRECISION))?;
    out.flush()
}

/// Format `value` like printf's `%g`: `precision` significant digits,
/// scientific notation when the exponent is below -4 or not below
/// `precision`, trailing zeros removed.
pub fn format_general(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let precision = precision.max(1);
    // The exponent after rounding to `precision` digits decides the notation.
    let scientific = format!("{:.*e}", precision - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= precision as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (precision as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(digits: &str) -> &str {
    if digits.contains('.') {
        digits.trim_end_matches('0').trim_end_matches('.')
    } else {
        digits
    }
}
