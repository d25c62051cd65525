//! # Angle Representation Module
//!
//! Exact angle storage plus the sexagesimal text forms used by target lists.
//!
//! Values are kept in degrees. Target positions are exchanged as
//! colon-separated sexagesimal strings, so this module also parses and
//! renders `hh:mm:ss.ss` (right ascension) and `±dd:mm:ss.s` (declination,
//! galactic longitude and latitude).
//!
//! ## Examples
//!
//! ```rust
//! use skytargets::coordinates::angle::Angle;
//!
//! let ra = Angle::from_sexagesimal_hours("05:30:00").unwrap();
//! assert_eq!(ra.to_degrees(), 82.5);
//! assert_eq!(ra.to_sexagesimal_hours(), "05:30:00.00");
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::DEG_PER_HOUR;
use crate::{ResolverError, Result};

/// An angular measurement in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Angle {
    degrees: f64,
}

impl Angle {
    /// Creates an angle from a value in degrees
    pub fn from_degrees(degrees: f64) -> Self {
        Angle { degrees }
    }

    /// Creates an angle from a value in hours of right ascension
    pub fn from_hours(hours: f64) -> Self {
        Self::from_degrees(hours * DEG_PER_HOUR)
    }

    /// Parse a sexagesimal string in degrees, e.g. `-23:42:06.5`
    pub fn from_sexagesimal_degrees(text: &str) -> Result<Self> {
        parse_sexagesimal(text).map(Self::from_degrees)
    }

    /// Parse a sexagesimal string in hours, e.g. `05:06:23.4`
    pub fn from_sexagesimal_hours(text: &str) -> Result<Self> {
        parse_sexagesimal(text).map(Self::from_hours)
    }

    /// Returns the angle value in degrees
    pub fn to_degrees(&self) -> f64 {
        self.degrees
    }

    /// Returns the angle value in hours
    pub fn to_hours(&self) -> f64 {
        self.degrees / DEG_PER_HOUR
    }

    /// True when the stored value is exactly zero
    pub fn is_zero(&self) -> bool {
        self.degrees == 0.0
    }

    /// Render as right ascension, `HH:MM:SS.ss`, wrapped into 0..24h
    pub fn to_sexagesimal_hours(&self) -> String {
        to_sexagesimal(self.to_hours().rem_euclid(24.0), 2)
    }

    /// Render as signed degrees, `[-]DD:MM:SS.s`
    pub fn to_sexagesimal_degrees(&self) -> String {
        to_sexagesimal(self.to_degrees(), 1)
    }
}

/// Parse up to three colon-separated components into a decimal value.
///
/// The sign is taken from the first component only, so `-00:30:00` is
/// negative half a unit.
fn parse_sexagesimal(text: &str) -> Result<f64> {
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let parts: Vec<&str> = unsigned.split(':').collect();
    if unsigned.is_empty() || parts.len() > 3 {
        return Err(ResolverError::InvalidAngle(text.to_string()));
    }

    let mut value = 0.0;
    let mut scale = 1.0;
    for part in parts {
        let component = part
            .parse::<f64>()
            .map_err(|_| ResolverError::InvalidAngle(text.to_string()))?;
        if component < 0.0 {
            return Err(ResolverError::InvalidAngle(text.to_string()));
        }
        value += component / scale;
        scale *= 60.0;
    }

    Ok(if negative { -value } else { value })
}

fn to_sexagesimal(value: f64, decimals: u32) -> String {
    let scale = 10u64.pow(decimals);
    let total = (value.abs() * 3600.0 * scale as f64).round() as u64;
    let sign = if value < 0.0 && total > 0 { "-" } else { "" };

    let whole_seconds = total / scale;
    let fraction = total % scale;
    let units = whole_seconds / 3600;
    let minutes = (whole_seconds / 60) % 60;
    let seconds = whole_seconds % 60;

    format!(
        "{sign}{units:02}:{minutes:02}:{seconds:02}.{fraction:0width$}",
        width = decimals as usize
    )
}
