//! Free-form text target catalogs
//!
//! One target per line, comment lines start with `#`, `%`, `!` or `*`.
//! Lines are parsed with [`parse_line`]; lines that cannot be parsed are
//! reported and skipped without failing the whole catalog.

use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::grammar::parse_line;
use super::{apply_prefix, is_comment, project_prefix, DedupSet, ObjectFilter, ProjectFilter};
use crate::targets::TargetSpec;
use crate::{ResolverError, Result};

/// Read targets from a catalog file.
///
/// Failing to open the file is an error; problems with individual lines
/// are logged and those lines skipped.
pub fn extract<P: AsRef<Path>>(
    path: P,
    projects: &ProjectFilter,
    objects: &ObjectFilter,
    telescope: Option<&str>,
) -> Result<Vec<TargetSpec>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ResolverError::CatalogOpen {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Reading target catalog {}", path.display());
    Ok(extract_from_reader(
        BufReader::new(file),
        projects,
        objects,
        telescope,
    ))
}

/// Read targets from any line source.
///
/// With project ids given, only lines mentioning one of them are used.
/// When more than one project is requested the target names get the
/// project prefix so that targets of different projects stay apart.
pub fn extract_from_reader<R: BufRead>(
    reader: R,
    projects: &ProjectFilter,
    objects: &ObjectFilter,
    telescope: Option<&str>,
) -> Vec<TargetSpec> {
    let rename = projects.len() > 1;
    let mut seen = DedupSet::new();
    let mut targets = Vec::new();
    let mut skipped_lines = 0;
    let mut duplicates = 0;

    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                warn!("Error reading catalog line {}: {}", line_number, e);
                skipped_lines += 1;
                continue;
            }
        };

        if is_comment(&line) {
            continue;
        }

        let prefix = if projects.is_empty() {
            None
        } else {
            match projects.find_in(&line) {
                Some(project) => Some(project_prefix(project)),
                None => continue,
            }
        };

        let raw = match parse_line(&line) {
            Ok(raw) => raw,
            Err(e) => {
                let err = ResolverError::from(e);
                warn!("Skipping catalog line {}: {}: {}", line_number, err, line.trim());
                skipped_lines += 1;
                continue;
            }
        };

        if raw.ra.is_empty() || raw.dec.is_empty() {
            warn!(
                "Skipping catalog line {}: no position found: {}",
                line_number,
                line.trim()
            );
            skipped_lines += 1;
            continue;
        }

        if !objects.allows(&raw.name) {
            continue;
        }

        let mut target = TargetSpec::from_raw(raw);
        if let Some(prefix) = prefix.filter(|_| rename) {
            target.name = apply_prefix(&target.name, &prefix);
        }

        if !seen.insert(&target) {
            debug!("Dropping duplicate target {} on line {}", target.name, line_number);
            duplicates += 1;
            continue;
        }

        targets.push(target.with_telescope(telescope));
    }

    info!(
        "Catalog gave {} targets ({} lines skipped, {} duplicates dropped)",
        targets.len(),
        skipped_lines,
        duplicates
    );
    targets
}
