//! Targets from the observation database
//!
//! Science programs are fetched from an external [`ScienceProgramSource`].
//! Each program holds MSBs (minimum schedulable blocks), each MSB holds
//! observations, and each observation may carry a target. Positions arrive
//! already structured, so no text parsing happens here; only the MSB mode,
//! name filter, project prefix and duplicate rules apply.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::catalogs::{apply_prefix, project_prefix, DedupSet, ObjectFilter, ProjectFilter};
use crate::coordinates::angle::Angle;
use crate::coordinates::{CoordFrame, Position};
use crate::targets::{NonameCounter, TargetSpec};
use crate::{ResolverError, Result};

/// Which MSBs to take targets from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MsbMode {
    /// Every MSB
    #[default]
    All,
    /// MSBs with repeats remaining
    Active,
    /// MSBs with nothing remaining
    Completed,
}

impl MsbMode {
    /// Whether an MSB with this many remaining repeats is selected
    pub fn selects(&self, remaining: i32) -> bool {
        match self {
            MsbMode::All => true,
            MsbMode::Active => remaining > 0,
            MsbMode::Completed => remaining <= 0,
        }
    }
}

impl FromStr for MsbMode {
    type Err = ResolverError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(MsbMode::All),
            "active" => Ok(MsbMode::Active),
            "completed" => Ok(MsbMode::Completed),
            other => Err(ResolverError::InvalidOption(format!(
                "msbmode must be all, active or completed, not {}",
                other
            ))),
        }
    }
}

impl fmt::Display for MsbMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MsbMode::All => "all",
            MsbMode::Active => "active",
            MsbMode::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Target attached to an observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DbTarget {
    /// `None` when the database has no name field at all
    pub name: Option<String>,
    pub frame: CoordFrame,
    #[serde(default)]
    pub epoch: Option<f64>,
    /// Right ascension, or galactic longitude
    pub ra: Angle,
    /// Declination, or galactic latitude
    pub dec: Angle,
}

impl DbTarget {
    /// Position `(0, 0)` means the coordinates were never filled in
    pub fn is_unset(&self) -> bool {
        self.ra.is_zero() && self.dec.is_zero()
    }

    /// Sexagesimal rendering: RA in hours, everything else in degrees
    pub fn rendered_position(&self) -> Position {
        let first = match self.frame {
            CoordFrame::Galactic => self.ra.to_sexagesimal_degrees(),
            _ => self.ra.to_sexagesimal_hours(),
        };
        Position::from_fields(self.frame, first, self.dec.to_sexagesimal_degrees())
    }
}

/// A single observation within an MSB
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    #[serde(default)]
    pub target: Option<DbTarget>,
}

/// Minimum schedulable block
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Msb {
    /// Repeats still to be observed; zero or less means completed
    pub remaining: i32,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

/// A project's science program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScienceProgram {
    pub project_id: String,
    #[serde(default)]
    pub msbs: Vec<Msb>,
}

/// Access to stored science programs
pub trait ScienceProgramSource {
    /// Fetch the science program of one project
    fn fetch_science_program(&self, project: &str) -> Result<ScienceProgram>;

    /// Fetch several programs. A project that fails to fetch is logged and
    /// left out; the others are still returned.
    fn fetch_science_programs(&self, projects: &ProjectFilter) -> Vec<ScienceProgram> {
        projects
            .ids()
            .iter()
            .filter_map(|project| match self.fetch_science_program(project) {
                Ok(program) => Some(program),
                Err(e) => {
                    let err = ResolverError::ExternalFetch {
                        project: project.clone(),
                        reason: e.to_string(),
                    };
                    warn!("{}", err);
                    None
                }
            })
            .collect()
    }
}

/// Collect targets from science programs.
///
/// Unnamed targets (name present but empty) are called `noname1`,
/// `noname2`, ... in the order met. With more than one program the
/// targets are prefixed with their program's project.
pub fn extract(
    programs: &[ScienceProgram],
    objects: &ObjectFilter,
    msb_mode: MsbMode,
    telescope: Option<&str>,
) -> Vec<TargetSpec> {
    let rename = programs.len() > 1;
    let mut noname = NonameCounter::new();
    let mut seen = DedupSet::new();
    let mut targets = Vec::new();

    for program in programs {
        let prefix = project_prefix(&program.project_id);
        let msbs = program
            .msbs
            .iter()
            .filter(|msb| msb_mode.selects(msb.remaining));

        for msb in msbs {
            for db_target in msb.observations.iter().filter_map(|o| o.target.as_ref()) {
                let Some(name) = db_target.name.as_deref() else {
                    continue;
                };
                let name = if name.is_empty() {
                    noname.next_name()
                } else {
                    name.to_string()
                };

                if db_target.is_unset() {
                    debug!("Skipping {} in {}: position not set", name, program.project_id);
                    continue;
                }

                if !objects.allows(&name) {
                    continue;
                }

                let name = if rename {
                    apply_prefix(&name, &prefix)
                } else {
                    name
                };
                let epoch = match db_target.frame {
                    CoordFrame::Galactic => None,
                    frame => db_target.epoch.or(frame.default_epoch()),
                };
                let target = TargetSpec::new(
                    name,
                    db_target.frame,
                    epoch,
                    db_target.rendered_position(),
                );

                if seen.insert(&target) {
                    targets.push(target.with_telescope(telescope));
                }
            }
        }
    }

    info!(
        "Database gave {} targets from {} programs ({} unnamed)",
        targets.len(),
        programs.len(),
        noname.issued()
    );
    targets
}
