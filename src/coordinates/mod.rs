//! Coordinate frames and target positions

pub mod angle;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{B1950_EPOCH, J2000_EPOCH};
use crate::planetlib::Body;
use crate::Result;
use angle::Angle;

/// Reference frame family of a target position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordFrame {
    /// Julian equatorial frame (J2000 and other Julian epochs)
    Julian,
    /// Besselian equatorial frame (B1950 and other Besselian epochs)
    Besselian,
    /// Galactic longitude and latitude, no epoch
    Galactic,
}

impl CoordFrame {
    /// Interpret a lower-cased coordinate system tag such as `j2000`,
    /// `b1950`, `j1986` or `galactic`.
    ///
    /// Returns the frame and its epoch. Missing or unreadable epochs fall
    /// back to the frame default.
    pub fn from_coordsys(tag: &str) -> (Self, Option<f64>) {
        let tag = tag.trim().to_lowercase();
        if tag.starts_with('g') {
            return (CoordFrame::Galactic, None);
        }

        let (frame, default_epoch) = if tag.starts_with('b') {
            (CoordFrame::Besselian, B1950_EPOCH)
        } else {
            (CoordFrame::Julian, J2000_EPOCH)
        };
        let epoch = tag
            .get(1..)
            .and_then(|rest| rest.parse::<f64>().ok())
            .unwrap_or(default_epoch);
        (frame, Some(epoch))
    }

    /// Render the coordinate system tag for this frame and epoch
    pub fn coordsys(&self, epoch: Option<f64>) -> String {
        match self {
            CoordFrame::Galactic => "galactic".to_string(),
            CoordFrame::Julian => format!("j{}", epoch.unwrap_or(J2000_EPOCH)),
            CoordFrame::Besselian => format!("b{}", epoch.unwrap_or(B1950_EPOCH)),
        }
    }

    /// Default epoch of the frame
    pub fn default_epoch(&self) -> Option<f64> {
        match self {
            CoordFrame::Julian => Some(J2000_EPOCH),
            CoordFrame::Besselian => Some(B1950_EPOCH),
            CoordFrame::Galactic => None,
        }
    }
}

impl fmt::Display for CoordFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.coordsys(self.default_epoch()))
    }
}

/// Sky position of a target
///
/// Equatorial and galactic positions are kept as the sexagesimal strings
/// they were read or rendered as. Planets carry no coordinates until an
/// ephemeris locates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Position {
    Equatorial { ra: String, dec: String },
    Galactic { long: String, lat: String },
    Deferred { body: Body },
}

impl Position {
    /// Build a position from two coordinate fields, using long/lat naming
    /// for the galactic frame and ra/dec otherwise.
    pub fn from_fields(frame: CoordFrame, first: String, second: String) -> Self {
        match frame {
            CoordFrame::Galactic => Position::Galactic {
                long: first,
                lat: second,
            },
            _ => Position::Equatorial {
                ra: first,
                dec: second,
            },
        }
    }

    /// The two rendered coordinate strings, if the position is known
    pub fn fields(&self) -> Option<(&str, &str)> {
        match self {
            Position::Equatorial { ra, dec } => Some((ra.as_str(), dec.as_str())),
            Position::Galactic { long, lat } => Some((long.as_str(), lat.as_str())),
            Position::Deferred { .. } => None,
        }
    }

    /// True for planet positions still waiting on an ephemeris
    pub fn is_deferred(&self) -> bool {
        matches!(self, Position::Deferred { .. })
    }

    /// Convert to decimal degrees.
    ///
    /// Right ascension is read as hours; galactic longitude, latitude and
    /// declination as degrees. Returns `None` for deferred positions.
    pub fn to_degrees(&self) -> Result<Option<(f64, f64)>> {
        match self {
            Position::Equatorial { ra, dec } => Ok(Some((
                Angle::from_sexagesimal_hours(ra)?.to_degrees(),
                Angle::from_sexagesimal_degrees(dec)?.to_degrees(),
            ))),
            Position::Galactic { long, lat } => Ok(Some((
                Angle::from_sexagesimal_degrees(long)?.to_degrees(),
                Angle::from_sexagesimal_degrees(lat)?.to_degrees(),
            ))),
            Position::Deferred { .. } => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_frame_from_coordsys() {
        assert_eq!(
            CoordFrame::from_coordsys("j2000"),
            (CoordFrame::Julian, Some(2000.0))
        );
        assert_eq!(
            CoordFrame::from_coordsys("b1950"),
            (CoordFrame::Besselian, Some(1950.0))
        );
        assert_eq!(
            CoordFrame::from_coordsys("j1986"),
            (CoordFrame::Julian, Some(1986.0))
        );
        assert_eq!(
            CoordFrame::from_coordsys("galactic"),
            (CoordFrame::Galactic, None)
        );
        assert_eq!(CoordFrame::from_coordsys("b"), (CoordFrame::Besselian, Some(1950.0)));
    }

    #[test]
    fn test_coordsys_rendering() {
        assert_eq!(CoordFrame::Julian.coordsys(Some(2000.0)), "j2000");
        assert_eq!(CoordFrame::Julian.coordsys(Some(1986.5)), "j1986.5");
        assert_eq!(CoordFrame::Besselian.coordsys(None), "b1950");
        assert_eq!(CoordFrame::Galactic.coordsys(Some(2000.0)), "galactic");
        assert_eq!(CoordFrame::Besselian.to_string(), "b1950");
    }

    #[test]
    fn test_position_naming_follows_frame() {
        let galactic = Position::from_fields(CoordFrame::Galactic, "120".into(), "-5".into());
        assert_eq!(
            galactic,
            Position::Galactic {
                long: "120".into(),
                lat: "-5".into()
            }
        );
        assert_eq!(galactic.fields(), Some(("120", "-5")));

        let eq = Position::from_fields(CoordFrame::Besselian, "01".into(), "02".into());
        assert!(matches!(eq, Position::Equatorial { .. }));
    }

    #[test]
    fn test_position_to_degrees() {
        let pos = Position::Equatorial {
            ra: "06:00:00".into(),
            dec: "-30:30".into(),
        };
        let (ra, dec) = pos.to_degrees().unwrap().unwrap();
        assert_relative_eq!(ra, 90.0);
        assert_relative_eq!(dec, -30.5);

        let deferred = Position::Deferred { body: Body::Mars };
        assert!(deferred.is_deferred());
        assert!(deferred.to_degrees().unwrap().is_none());
        assert!(deferred.fields().is_none());
    }
}
