//! Target descriptors produced by every selection method

pub mod user;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalogs::grammar::RawFields;
use crate::catalogs::DedupKey;
use crate::constants::{J2000_EPOCH, NONAME_STEM, TELESCOPE_UNKNOWN};
use crate::coordinates::{CoordFrame, Position};
use crate::planetlib::{Body, Ephemeris};
use crate::Result;

pub use user::normalize;

/// A fully specified target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Target name, never empty
    pub name: String,
    /// Coordinate frame family
    pub frame: CoordFrame,
    /// Equinox of the frame; `None` for galactic positions
    pub epoch: Option<f64>,
    /// Sky position
    pub position: Position,
    /// Telescope the target list was built for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub telescope: Option<String>,
}

impl TargetSpec {
    /// Create a target with no telescope attached
    pub fn new(name: String, frame: CoordFrame, epoch: Option<f64>, position: Position) -> Self {
        Self {
            name,
            frame,
            epoch,
            position,
            telescope: None,
        }
    }

    /// Build a target from parsed catalog fields
    pub fn from_raw(raw: RawFields) -> Self {
        let (frame, epoch) = CoordFrame::from_coordsys(&raw.coordsys);
        let position = Position::from_fields(frame, raw.ra, raw.dec);
        Self::new(raw.name, frame, epoch, position)
    }

    /// A planet whose position is left to an ephemeris
    pub fn planet(body: Body) -> Self {
        Self::new(
            body.name().to_string(),
            CoordFrame::Julian,
            Some(J2000_EPOCH),
            Position::Deferred { body },
        )
    }

    /// Attach a telescope unless it is absent or the unknown sentinel
    pub fn with_telescope(mut self, telescope: Option<&str>) -> Self {
        if let Some(tel) = telescope.filter(|t| *t != TELESCOPE_UNKNOWN) {
            self.telescope = Some(tel.to_string());
        }
        self
    }

    /// Coordinate system tag, e.g. `j2000` or `galactic`
    pub fn coordsys(&self) -> String {
        self.frame.coordsys(self.epoch)
    }

    /// Key used to spot duplicates; `None` for deferred positions
    pub fn dedup_key(&self) -> Option<DedupKey> {
        self.position
            .fields()
            .map(|(first, second)| DedupKey::new(&self.name, first, second))
    }

    /// Resolve a deferred planet position at the given time.
    ///
    /// Targets with known coordinates are returned unchanged.
    pub fn locate(&self, ephemeris: &dyn Ephemeris, at: &DateTime<Utc>) -> Result<TargetSpec> {
        match self.position {
            Position::Deferred { body } => {
                let position = ephemeris.planet_position(body, at)?;
                Ok(TargetSpec {
                    position,
                    ..self.clone()
                })
            }
            _ => Ok(self.clone()),
        }
    }
}

/// A requested object, by name and optionally with coordinates.
///
/// Catalog and database selection only look at the name; user selection
/// reads the coordinates too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectSpec {
    pub name: String,
    #[serde(default)]
    pub ra: Option<String>,
    #[serde(default)]
    pub dec: Option<String>,
    #[serde(default)]
    pub coordsys: Option<String>,
}

impl ObjectSpec {
    /// An object request by name only
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// An object with explicit coordinates
    pub fn with_coordinates(name: &str, ra: &str, dec: &str, coordsys: &str) -> Self {
        Self {
            name: name.to_string(),
            ra: Some(ra.to_string()),
            dec: Some(dec.to_string()),
            coordsys: Some(coordsys.to_string()),
        }
    }
}

/// Hands out `noname1`, `noname2`, ... for targets without a name
#[derive(Debug, Default)]
pub struct NonameCounter {
    issued: usize,
}

impl NonameCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next synthetic name
    pub fn next_name(&mut self) -> String {
        self.issued += 1;
        format!("{}{}", NONAME_STEM, self.issued)
    }

    /// How many names were issued so far
    pub fn issued(&self) -> usize {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::angle::Angle;

    struct FixedEphemeris;

    impl Ephemeris for FixedEphemeris {
        fn planet_position(&self, body: Body, _at: &DateTime<Utc>) -> Result<Position> {
            assert_eq!(body, Body::Jupiter);
            Ok(Position::Equatorial {
                ra: Angle::from_hours(3.5).to_sexagesimal_hours(),
                dec: Angle::from_degrees(18.25).to_sexagesimal_degrees(),
            })
        }
    }

    #[test]
    fn test_from_raw_galactic() {
        let raw = RawFields {
            name: "G34.3".to_string(),
            ra: "34:15:00".to_string(),
            dec: "00:09:00".to_string(),
            coordsys: "galactic".to_string(),
        };
        let target = TargetSpec::from_raw(raw);
        assert_eq!(target.frame, CoordFrame::Galactic);
        assert_eq!(target.epoch, None);
        assert_eq!(
            target.position,
            Position::Galactic {
                long: "34:15:00".to_string(),
                lat: "00:09:00".to_string()
            }
        );
        assert_eq!(target.coordsys(), "galactic");
    }

    #[test]
    fn test_telescope_sentinel_is_dropped() {
        let target = TargetSpec::planet(Body::Mars);
        assert_eq!(target.clone().with_telescope(Some("TELUNKNOWN")).telescope, None);
        assert_eq!(target.clone().with_telescope(None).telescope, None);
        assert_eq!(
            target.with_telescope(Some("JCMT")).telescope.as_deref(),
            Some("JCMT")
        );
    }

    #[test]
    fn test_planet_has_no_dedup_key() {
        let target = TargetSpec::planet(Body::Venus);
        assert_eq!(target.name, "Venus");
        assert!(target.dedup_key().is_none());
    }

    #[test]
    fn test_locate_fills_deferred_position() {
        let at = Utc::now();
        let jupiter = TargetSpec::planet(Body::Jupiter);
        let located = jupiter.locate(&FixedEphemeris, &at).unwrap();
        assert_eq!(located.name, "Jupiter");
        assert_eq!(
            located.position,
            Position::Equatorial {
                ra: "03:30:00.00".to_string(),
                dec: "18:15:00.0".to_string()
            }
        );
    }

    #[test]
    fn test_noname_counter() {
        let mut counter = NonameCounter::new();
        assert_eq!(counter.next_name(), "noname1");
        assert_eq!(counter.next_name(), "noname2");
        assert_eq!(counter.issued(), 2);
    }
}
