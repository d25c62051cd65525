//! Solar system bodies recognised by name in target requests
//!
//! Planets never come from catalogs or the observation database. When a
//! requested object name is one of the bodies below, the target is emitted
//! with a deferred position and an [`Ephemeris`] computes where it is at
//! observing time.

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::coordinates::Position;
use crate::targets::ObjectSpec;
use crate::Result;

lazy_static! {
    /// Map from lowercase body names to bodies
    static ref BODY_NAMES: HashMap<&'static str, Body> = {
        let mut m = HashMap::new();
        for body in Body::ALL {
            m.insert(body.key(), body);
        }
        m
    };
}

/// The solar system bodies with ephemeris support
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Every recognised body
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Moon,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    fn key(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Moon => "moon",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    /// Look a body up by name, ignoring case and surrounding whitespace
    pub fn from_name(name: &str) -> Option<Body> {
        BODY_NAMES.get(name.trim().to_lowercase().as_str()).copied()
    }
}

/// Source of solar system body positions
pub trait Ephemeris {
    /// Apparent position of `body` at time `at`
    fn planet_position(&self, body: Body, at: &DateTime<Utc>) -> Result<Position>;
}

/// Separate planet requests from ordinary object requests.
///
/// Each body is reported once, in order of first mention. The remaining
/// objects keep their original order.
pub fn split_planets(objects: &[ObjectSpec]) -> (Vec<Body>, Vec<ObjectSpec>) {
    let mut planets = Vec::new();
    let mut remaining = Vec::new();

    for object in objects {
        match Body::from_name(&object.name) {
            Some(body) => {
                if !planets.contains(&body) {
                    planets.push(body);
                }
            }
            None => remaining.push(object.clone()),
        }
    }

    (planets, remaining)
}
