//! Normalisation of targets typed in directly by the user
//!
//! User input is taken at face value: there is no filtering and no
//! duplicate removal. Only the formatting of the coordinates and the frame
//! name are tidied up.

use log::debug;

use super::{NonameCounter, ObjectSpec, TargetSpec};
use crate::coordinates::{CoordFrame, Position};

/// Turn user supplied objects into targets, one per object, in input order
pub fn normalize(objects: &[ObjectSpec]) -> Vec<TargetSpec> {
    let mut noname = NonameCounter::new();

    objects
        .iter()
        .map(|object| {
            let name = match object.name.trim() {
                "" => noname.next_name(),
                name => name.to_string(),
            };
            let frame = frame_from_user(object.coordsys.as_deref());
            let ra = collapse_whitespace(object.ra.as_deref().unwrap_or_default());
            let dec = collapse_whitespace(object.dec.as_deref().unwrap_or_default());
            debug!("User target {} ({}) at {} {}", name, frame, ra, dec);

            TargetSpec::new(
                name,
                frame,
                frame.default_epoch(),
                Position::from_fields(frame, ra, dec),
            )
        })
        .collect()
}

/// Map the loose frame names accepted from users.
///
/// `RJ*` is J2000, `RB*` is B1950 and anything starting with `G` is
/// galactic. Other values starting with `B` are read as B1950; everything
/// else, including no value at all, is J2000.
pub fn frame_from_user(coordsys: Option<&str>) -> CoordFrame {
    let tag = coordsys.unwrap_or_default().trim().to_uppercase();
    if tag.starts_with("RJ") {
        CoordFrame::Julian
    } else if tag.starts_with("RB") {
        CoordFrame::Besselian
    } else if tag.starts_with('G') {
        CoordFrame::Galactic
    } else if tag.starts_with('B') {
        CoordFrame::Besselian
    } else {
        CoordFrame::Julian
    }
}

/// Trim and join whitespace separated fields with `:`
fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(":")
}
