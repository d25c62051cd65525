//! Target catalogs
//!
//! This module holds the free-form text catalog reader together with the
//! selection rules shared by every extractor: the object allow-list, the
//! project prefix used when several projects share one target list, and
//! duplicate removal.

pub mod grammar;
pub mod text_catalog;

pub use grammar::{parse_line, ParseError, RawFields};
pub use text_catalog::{extract, extract_from_reader};

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

use crate::constants::{COMMENT_CHARS, PROJECT_SEPARATOR};
use crate::targets::{ObjectSpec, TargetSpec};

lazy_static! {
    /// Leading semester code of a project id, e.g. `M12A`
    static ref SEMESTER_CODE: Regex = Regex::new(r"(?i)^M\d\d[AB]").unwrap();
}

/// Identity of a target for duplicate removal: name plus both rendered
/// coordinate strings, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    name: String,
    first: String,
    second: String,
}

impl DedupKey {
    pub fn new(name: &str, first: &str, second: &str) -> Self {
        Self {
            name: name.to_string(),
            first: first.to_string(),
            second: second.to_string(),
        }
    }
}

/// Targets already emitted during one extraction
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<DedupKey>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a target, returning `true` the first time its key is seen.
    ///
    /// Targets without coordinates have no key and are always new.
    pub fn insert(&mut self, target: &TargetSpec) -> bool {
        match target.dedup_key() {
            Some(key) => self.seen.insert(key),
            None => true,
        }
    }
}

/// Allow-list of lower-cased target names. Empty lets everything through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectFilter {
    names: HashSet<String>,
}

impl ObjectFilter {
    /// Build from plain names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| n.as_ref().trim().to_lowercase())
                .filter(|n| !n.is_empty())
                .collect(),
        }
    }

    /// Build from requested objects, using their names only
    pub fn from_objects(objects: &[ObjectSpec]) -> Self {
        Self::new(objects.iter().map(|o| o.name.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether a target of this name passes the filter
    pub fn allows(&self, name: &str) -> bool {
        self.is_empty() || self.names.contains(&name.to_lowercase())
    }
}

/// Ordered list of project ids, compared without regard to case.
/// Empty means no restriction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProjectFilter {
    ids: Vec<String>,
}

impl ProjectFilter {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            ids: ids
                .into_iter()
                .map(|id| id.as_ref().trim().to_string())
                .filter(|id| !id.is_empty())
                .collect(),
        }
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// First project id occurring anywhere in `text`, ignoring case
    pub fn find_in(&self, text: &str) -> Option<&str> {
        let lowered = text.to_lowercase();
        self.ids
            .iter()
            .find(|id| lowered.contains(&id.to_lowercase()))
            .map(String::as_str)
    }
}

/// Prefix used to tell apart targets of different projects: the project id
/// without its leading semester code, followed by `@`.
///
/// `M12AU34` becomes `U34@`.
pub fn project_prefix(project: &str) -> String {
    let stripped = SEMESTER_CODE.replace(project.trim(), "");
    format!("{}{}", stripped, PROJECT_SEPARATOR)
}

/// Prepend `prefix` unless the name already carries it (ignoring case)
pub fn apply_prefix(name: &str, prefix: &str) -> String {
    if name.to_lowercase().starts_with(&prefix.to_lowercase()) {
        name.to_string()
    } else {
        format!("{}{}", prefix, name)
    }
}

/// Blank lines and lines whose first non-blank character is a comment
/// character carry no target
pub fn is_comment(line: &str) -> bool {
    match line.trim_start().chars().next() {
        None => true,
        Some(first) => COMMENT_CHARS.contains(&first),
    }
}
