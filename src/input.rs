//! Integer input provider
//!
//! Scans `[+-]?digits` integers separated by whitespace, the way formatted
//! stream extraction does, until the stream ends or the next non-blank byte
//! does not start an `i32`. A valid prefix is kept: `12abc` yields `12` and
//! then stops at `abc`, and `3.5` yields `3` then stops at `.5`. Integers
//! need not be whitespace-separated, so `12-3` yields `12` and `-3`.
//!
//! Termination is not an error: everything parsed before it is kept.

use std::io::{self, BufRead};

use thiserror::Error;

/// Errors raised while reading the input stream.
#[derive(Debug, Error)]
pub enum InputError {
    /// Underlying reader failed.
    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Why reading stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The stream was exhausted.
    EndOfInput,
    /// The input did not start an integer (or the integer overflowed `i32`);
    /// it and everything after it were ignored.
    InvalidToken {
        /// Zero-based index the failed value would have had.
        token_index: usize,
    },
}

/// Values read from a stream together with the reason reading stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOutcome {
    /// Parsed values, in input order.
    pub values: Vec<i32>,
    /// Terminating condition.
    pub stop: StopReason,
}

/// Read integers from `reader` until end of input or the first malformed token.
pub fn read_sequence<R: BufRead>(reader: R) -> Result<Vec<i32>, InputError> {
    read_sequence_with_outcome(reader).map(|outcome| outcome.values)
}

/// Like [`read_sequence`], but also reports why reading stopped.
pub fn read_sequence_with_outcome<R: BufRead>(mut reader: R) -> Result<ReadOutcome, InputError> {
    let mut values = Vec::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            return Ok(ReadOutcome {
                values,
                stop: StopReason::EndOfInput,
            });
        }

        let mut pos = 0;
        loop {
            while pos < line.len() && line[pos].is_ascii_whitespace() {
                pos += 1;
            }
            if pos == line.len() {
                break;
            }

            match scan_integer(&line[pos..]) {
                Some((value, consumed)) => {
                    values.push(value);
                    pos += consumed;
                }
                None => {
                    let token_index = values.len();
                    return Ok(ReadOutcome {
                        values,
                        stop: StopReason::InvalidToken { token_index },
                    });
                }
            }
        }
    }
}

/// Parse a leading `[+-]?digits` integer, returning it with the number of
/// bytes consumed. `None` when there is no digit or the value overflows.
fn scan_integer(bytes: &[u8]) -> Option<(i32, usize)> {
    let (negative, start) = match bytes.first() {
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        _ => (false, 0),
    };

    let digits = bytes[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }

    let mut magnitude: i64 = 0;
    for &b in &bytes[start..start + digits] {
        magnitude = magnitude
            .checked_mul(10)?
            .checked_add(i64::from(b - b'0'))?;
    }
    let value = if negative { -magnitude } else { magnitude };

    Some((i32::try_from(value).ok()?, start + digits))
}
