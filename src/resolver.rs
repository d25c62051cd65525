//! Target selection front end
//!
//! [`TargetResolver::resolve`] picks out planets first, then hands the rest
//! of the request to the catalog, database or user-input path and joins the
//! results, planets first.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::catalogs::{self, ObjectFilter, ProjectFilter};
use crate::constants::TELESCOPE_UNKNOWN;
use crate::database::{self, MsbMode, ScienceProgramSource};
use crate::planetlib::split_planets;
use crate::targets::{self, ObjectSpec, TargetSpec};
use crate::{ResolverError, Result};

/// Where targets come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// The observation database (`omp`)
    Database,
    /// A text catalog file (`catalog`)
    Catalog,
    /// Coordinates given with the request (`user`)
    User,
}

impl FromStr for Method {
    type Err = ResolverError;

    /// Matched on the first letter: `o`mp, `c`atalog or `u`ser, any case
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().chars().next().map(|c| c.to_ascii_lowercase()) {
            Some('o') => Ok(Method::Database),
            Some('c') => Ok(Method::Catalog),
            Some('u') => Ok(Method::User),
            _ => Err(ResolverError::UnknownMethod(s.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Database => "omp",
            Method::Catalog => "catalog",
            Method::User => "user",
        };
        f.write_str(name)
    }
}

/// Options for one resolution.
///
/// Deserializes from the option keys `msbmode`, `telescope`, `debug` and
/// `catalog`; every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// MSB selection for database targets
    #[serde(rename = "msbmode")]
    pub msb_mode: MsbMode,
    /// Telescope attached to every target
    pub telescope: Option<String>,
    /// Log diagnostics while resolving
    pub debug: bool,
    /// Catalog file, required for catalog selection
    pub catalog: Option<PathBuf>,
}

impl ResolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read options from a JSON object
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ResolverError::InvalidOption(e.to_string()))
    }

    pub fn with_msb_mode(mut self, msb_mode: MsbMode) -> Self {
        self.msb_mode = msb_mode;
        self
    }

    pub fn with_telescope(mut self, telescope: &str) -> Self {
        self.telescope = Some(telescope.to_string());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_catalog<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.catalog = Some(path.as_ref().to_path_buf());
        self
    }

    /// The telescope to attach, ignoring the unknown sentinel
    pub fn telescope(&self) -> Option<&str> {
        self.telescope
            .as_deref()
            .filter(|t| !t.is_empty() && *t != TELESCOPE_UNKNOWN)
    }
}

/// Resolves target requests against the configured sources
#[derive(Default)]
pub struct TargetResolver<'a> {
    database: Option<&'a dyn ScienceProgramSource>,
}

impl<'a> TargetResolver<'a> {
    /// A resolver without database access
    pub fn new() -> Self {
        Self { database: None }
    }

    /// Use `database` for [`Method::Database`] requests
    pub fn with_database(mut self, database: &'a dyn ScienceProgramSource) -> Self {
        self.database = Some(database);
        self
    }

    /// Resolve a request given the method as text
    pub fn resolve_str(
        &self,
        method: &str,
        projects: &ProjectFilter,
        objects: &[ObjectSpec],
        options: &ResolveOptions,
    ) -> Result<Vec<TargetSpec>> {
        self.resolve(method.parse()?, projects, objects, options)
    }

    /// Resolve a target request.
    ///
    /// Planet names among `objects` become deferred planet targets. If no
    /// more other objects remain than planets were found, the object list
    /// is dropped and every target of the projects is returned alongside
    /// the planets.
    pub fn resolve(
        &self,
        method: Method,
        projects: &ProjectFilter,
        objects: &[ObjectSpec],
        options: &ResolveOptions,
    ) -> Result<Vec<TargetSpec>> {
        let telescope = options.telescope();
        let (planets, mut remaining) = split_planets(objects);

        if remaining.len() <= planets.len() {
            if options.debug && !remaining.is_empty() {
                debug!(
                    "Ignoring object filter of {} names next to {} planets",
                    remaining.len(),
                    planets.len()
                );
            }
            remaining.clear();
        }

        if options.debug {
            debug!(
                "Resolving via {} for projects {:?}: {} planets, {} objects",
                method,
                projects.ids(),
                planets.len(),
                remaining.len()
            );
        }

        let mut resolved: Vec<TargetSpec> = planets
            .into_iter()
            .map(|body| TargetSpec::planet(body).with_telescope(telescope))
            .collect();

        let filter = ObjectFilter::from_objects(&remaining);
        let found = match method {
            Method::Catalog => {
                let path = options
                    .catalog
                    .as_ref()
                    .ok_or(ResolverError::MissingCatalog)?;
                catalogs::extract(path, projects, &filter, telescope)?
            }
            Method::Database => {
                let source = self.database.ok_or(ResolverError::NoDatabase)?;
                let programs = source.fetch_science_programs(projects);
                database::extract(&programs, &filter, options.msb_mode, telescope)
            }
            Method::User => targets::normalize(&remaining)
                .into_iter()
                .map(|target| target.with_telescope(telescope))
                .collect(),
        };

        if options.debug {
            debug!("{} returned {} targets", method, found.len());
        }

        resolved.extend(found);
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::angle::Angle;
    use crate::coordinates::{CoordFrame, Position};
    use crate::database::{DbTarget, Msb, Observation, ScienceProgram};
    use crate::planetlib::Body;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CATALOG: &str = "\
# name ra dec
Target1 05 06 23.4 -23 42 06.5 RJ
Target2 12 20 15.0 +16 32 22.5 RB
";

    fn catalog_file() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", CATALOG).unwrap();
        file
    }

    fn names(targets: &[TargetSpec]) -> Vec<&str> {
        targets.iter().map(|t| t.name.as_str()).collect()
    }

    struct OneProgram;

    impl ScienceProgramSource for OneProgram {
        fn fetch_science_program(&self, project: &str) -> Result<ScienceProgram> {
            if project != "M12AU34" {
                return Err(ResolverError::IoError(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "database offline",
                )));
            }
            Ok(ScienceProgram {
                project_id: project.to_string(),
                msbs: vec![Msb {
                    remaining: 1,
                    observations: vec![Observation {
                        target: Some(DbTarget {
                            name: Some("Orion".to_string()),
                            frame: CoordFrame::Julian,
                            epoch: None,
                            ra: Angle::from_hours(5.5),
                            dec: Angle::from_degrees(-5.5),
                        }),
                    }],
                }],
            })
        }
    }

    #[test]
    fn test_method_prefixes() {
        assert_eq!("omp".parse::<Method>().unwrap(), Method::Database);
        assert_eq!("O".parse::<Method>().unwrap(), Method::Database);
        assert_eq!("Catalog".parse::<Method>().unwrap(), Method::Catalog);
        assert_eq!("cat".parse::<Method>().unwrap(), Method::Catalog);
        assert_eq!("USER".parse::<Method>().unwrap(), Method::User);
        assert!(matches!(
            "".parse::<Method>(),
            Err(ResolverError::UnknownMethod(_))
        ));
        assert!(matches!(
            "xyz".parse::<Method>(),
            Err(ResolverError::UnknownMethod(_))
        ));
    }

    #[test]
    fn test_options_from_json() {
        let options = ResolveOptions::from_json(
            r#"{"msbmode": "active", "telescope": "JCMT", "debug": true, "catalog": "/tmp/x.cat"}"#,
        )
        .unwrap();
        assert_eq!(options.msb_mode, MsbMode::Active);
        assert_eq!(options.telescope(), Some("JCMT"));
        assert!(options.debug);
        assert_eq!(options.catalog, Some(PathBuf::from("/tmp/x.cat")));

        let defaults = ResolveOptions::from_json("{}").unwrap();
        assert_eq!(defaults, ResolveOptions::default());
        assert_eq!(defaults.msb_mode, MsbMode::All);

        assert!(ResolveOptions::from_json(r#"{"msbmode": "sometimes"}"#).is_err());
    }

    #[test]
    fn test_unknown_telescope_not_attached() {
        let options = ResolveOptions::new().with_telescope("TELUNKNOWN");
        assert_eq!(options.telescope(), None);
    }

    #[test]
    fn test_planet_only_request_returns_whole_catalog() {
        let file = catalog_file();
        let options = ResolveOptions::new().with_catalog(file.path());
        let targets = TargetResolver::new()
            .resolve(
                Method::Catalog,
                &ProjectFilter::default(),
                &[ObjectSpec::named("Mars")],
                &options,
            )
            .unwrap();

        assert_eq!(names(&targets), vec!["Mars", "Target1", "Target2"]);
        assert_eq!(targets[0].position, Position::Deferred { body: Body::Mars });
    }

    #[test]
    fn test_one_planet_one_name_still_falls_back() {
        let file = catalog_file();
        let options = ResolveOptions::new().with_catalog(file.path());
        let objects = [ObjectSpec::named("jupiter"), ObjectSpec::named("Target2")];
        let targets = TargetResolver::new()
            .resolve(Method::Catalog, &ProjectFilter::default(), &objects, &options)
            .unwrap();

        assert_eq!(names(&targets), vec!["Jupiter", "Target1", "Target2"]);
    }

    #[test]
    fn test_object_filter_applies_when_names_outnumber_planets() {
        let file = catalog_file();
        let options = ResolveOptions::new().with_catalog(file.path());
        let objects = [
            ObjectSpec::named("Moon"),
            ObjectSpec::named("Target2"),
            ObjectSpec::named("Missing"),
        ];
        let targets = TargetResolver::new()
            .resolve(Method::Catalog, &ProjectFilter::default(), &objects, &options)
            .unwrap();

        assert_eq!(names(&targets), vec!["Moon", "Target2"]);
    }

    #[test]
    fn test_catalog_requires_path() {
        let result = TargetResolver::new().resolve(
            Method::Catalog,
            &ProjectFilter::default(),
            &[],
            &ResolveOptions::new(),
        );
        assert!(matches!(result, Err(ResolverError::MissingCatalog)));
    }

    #[test]
    fn test_database_requires_source() {
        let result = TargetResolver::new().resolve_str(
            "omp",
            &ProjectFilter::new(["M12AU34"]),
            &[],
            &ResolveOptions::new(),
        );
        assert!(matches!(result, Err(ResolverError::NoDatabase)));
    }

    #[test]
    fn test_database_survives_failed_fetch() {
        let source = OneProgram;
        let options = ResolveOptions::new().with_telescope("UKIRT").with_debug(true);
        let targets = TargetResolver::new()
            .with_database(&source)
            .resolve(
                Method::Database,
                &ProjectFilter::new(["M12AU34", "M12AN07"]),
                &[],
                &options,
            )
            .unwrap();

        assert_eq!(names(&targets), vec!["Orion"]);
        assert_eq!(targets[0].telescope.as_deref(), Some("UKIRT"));
    }

    #[test]
    fn test_user_targets_with_planet() {
        let objects = [
            ObjectSpec::named("Saturn"),
            ObjectSpec::with_coordinates("A", "01 00 00", "+10 00 00", "RJ"),
            ObjectSpec::with_coordinates("B", "02 00 00", "-10 00 00", "RB"),
        ];
        let targets = TargetResolver::new()
            .resolve(
                Method::User,
                &ProjectFilter::default(),
                &objects,
                &ResolveOptions::new().with_telescope("JCMT"),
            )
            .unwrap();

        assert_eq!(names(&targets), vec!["Saturn", "A", "B"]);
        assert_eq!(targets[2].frame, CoordFrame::Besselian);
        assert!(targets.iter().all(|t| t.telescope.as_deref() == Some("JCMT")));
    }
}
