//! Parser for one line of a free-form target catalog
//!
//! Catalog lines look like
//!
//! ```text
//! Orion KL   05 35 14.5  -05 22 30  RJ
//! IRAS16293  16:32:22.9  -24:28:36  J2000
//! HH211      03 43 56.8  32 00 50   1986
//! ```
//!
//! Columns are not fixed. The name runs until the first token without a
//! letter; after that a single left-to-right scan sorts tokens into right
//! ascension and declination fields using their shape, and stops at the
//! first token naming the frame or epoch. The scan rules, in priority
//! order:
//!
//! 1. `RB`, `RJ` or `RG` (any case) sets the frame and ends the scan.
//! 2. A bare `B` or `J`, optionally with an attached epoch (`J2000`), sets
//!    the frame; an epoch may also be the following token. Ends the scan.
//! 3. A plain number between 1900 and 2099.99 is an epoch on its own:
//!    Besselian before 1976, Julian from then on. Ends the scan.
//! 4. A token starting with `+` or `-` marks the start of the declination.
//! 5. A token starting with a digit is a coordinate field, RA before the
//!    sign and Dec after it. At most six such fields are kept.
//! 6. Anything else is ignored.
//!
//! Without a sign the RA/Dec boundary is guessed by splitting the fields in
//! half, which is impossible for an odd count.
//!
//! A bare `G` token does not select the galactic frame; only `RG` does.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    B1950_EPOCH, BESSELIAN_CUTOFF, EPOCH_MAX, EPOCH_MIN, J2000_EPOCH, MAX_NUMERIC_FIELDS,
};

lazy_static! {
    static ref FRAME_TOKEN: Regex = Regex::new(r"(?i)^R([BJG])").unwrap();
    static ref EQUINOX_TOKEN: Regex = Regex::new(r"(?i)^([BJ])(\d+(?:\.\d*)?)?$").unwrap();
    static ref PLAIN_NUMBER: Regex = Regex::new(r"^\d+(?:\.\d*)?$").unwrap();
}

/// Fields read from one catalog line, still as text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawFields {
    /// Target name, possibly several words
    pub name: String,
    /// Right ascension (or galactic longitude), colon separated
    pub ra: String,
    /// Declination (or galactic latitude), colon separated, `-` kept
    pub dec: String,
    /// Lower-cased frame tag: `j2000`, `b1950`, `j1986`, `galactic`, ...
    pub coordsys: String,
}

/// Line-level parse failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No sign marks the declination and the fields cannot be halved
    #[error("cannot split {fields} unsigned coordinate fields into RA and Dec")]
    Ambiguous { fields: usize },
}

/// Accumulated state of the field scan
#[derive(Debug, Default)]
struct FieldScan {
    ra_acc: Vec<String>,
    dec_acc: Vec<String>,
    sign: &'static str,
    after_sign: bool,
    numeric_fields: usize,
    equinox: Option<char>,
    epoch: Option<f64>,
}

impl FieldScan {
    fn push_numeric(&mut self, field: &str) {
        if self.numeric_fields >= MAX_NUMERIC_FIELDS {
            return;
        }
        if self.after_sign {
            self.dec_acc.push(field.to_string());
        } else {
            self.ra_acc.push(field.to_string());
        }
        self.numeric_fields += 1;
    }
}

/// A plain number inside the accepted epoch range
fn epoch_value(token: &str) -> Option<f64> {
    if !PLAIN_NUMBER.is_match(token) {
        return None;
    }
    token
        .parse::<f64>()
        .ok()
        .filter(|v| *v > EPOCH_MIN && *v < EPOCH_MAX)
}

fn join_fields(fields: &[String]) -> String {
    fields.join(":").trim_end_matches(':').to_string()
}

/// Parse one catalog line into name, position fields and frame tag.
///
/// Callers are expected to skip comment lines first and to check that the
/// returned RA and Dec are not empty.
pub fn parse_line(line: &str) -> Result<RawFields, ParseError> {
    let tokens: Vec<&str> = line.trim_start().split_whitespace().collect();

    // Name: first token plus any following tokens containing letters
    let mut name_parts: Vec<&str> = tokens.iter().take(1).copied().collect();
    let mut rest = tokens.iter().skip(1).copied().peekable();
    while let Some(token) = rest.next_if(|t| t.chars().any(|c| c.is_alphabetic())) {
        name_parts.push(token);
    }

    let mut scan = FieldScan::default();
    while let Some(token) = rest.next() {
        if let Some(caps) = FRAME_TOKEN.captures(token) {
            scan.equinox = caps[1].chars().next().map(|c| c.to_ascii_uppercase());
            break;
        }

        if let Some(caps) = EQUINOX_TOKEN.captures(token) {
            scan.equinox = caps[1].chars().next().map(|c| c.to_ascii_uppercase());
            scan.epoch = caps.get(2).and_then(|digits| epoch_value(digits.as_str()));
            if scan.epoch.is_none() {
                scan.epoch = rest.next_if(|next| epoch_value(next).is_some()).and_then(epoch_value);
            }
            break;
        }

        if scan.equinox.is_none() {
            if let Some(epoch) = epoch_value(token) {
                scan.equinox = Some(if epoch < BESSELIAN_CUTOFF { 'B' } else { 'J' });
                scan.epoch = Some(epoch);
                break;
            }
        }

        if token.starts_with('+') || token.starts_with('-') {
            if token.starts_with('-') {
                scan.sign = "-";
            }
            scan.after_sign = true;
            let unsigned = &token[1..];
            if unsigned.starts_with(|c: char| c.is_ascii_digit()) {
                scan.push_numeric(unsigned);
            }
        } else if token.starts_with(|c: char| c.is_ascii_digit()) {
            scan.push_numeric(token);
        }
    }

    let mut ra = join_fields(&scan.ra_acc);
    let mut dec = join_fields(&scan.dec_acc);

    if !scan.after_sign {
        let fields: Vec<&str> = if ra.is_empty() {
            Vec::new()
        } else {
            ra.split(':').collect()
        };
        if fields.len() % 2 == 1 {
            return Err(ParseError::Ambiguous {
                fields: fields.len(),
            });
        }
        let half = fields.len() / 2;
        dec = fields[half..].join(":");
        ra = fields[..half].join(":");
    }

    let coordsys = match scan.equinox.unwrap_or('J') {
        'G' => "galactic".to_string(),
        'B' => format!("b{}", scan.epoch.unwrap_or(B1950_EPOCH)),
        _ => format!("j{}", scan.epoch.unwrap_or(J2000_EPOCH)),
    };

    Ok(RawFields {
        name: name_parts.join(" "),
        ra,
        dec: format!("{}{}", scan.sign, dec),
        coordsys,
    })
}
