//! Constants used while resolving targets

// Epochs
/// Lower bound (exclusive) for a token to be read as an epoch
pub const EPOCH_MIN: f64 = 1900.0;
/// Upper bound (exclusive) for a token to be read as an epoch
pub const EPOCH_MAX: f64 = 2099.99;
/// Bare epochs before this year are Besselian, later ones Julian
pub const BESSELIAN_CUTOFF: f64 = 1976.0;
/// Default Julian epoch
pub const J2000_EPOCH: f64 = 2000.0;
/// Default Besselian epoch
pub const B1950_EPOCH: f64 = 1950.0;

// Catalog text
/// Leading characters marking a catalog comment line
pub const COMMENT_CHARS: [char; 4] = ['#', '%', '!', '*'];
/// Maximum number of numeric fields collected from one catalog line
pub const MAX_NUMERIC_FIELDS: usize = 6;

// Naming
/// Telescope value meaning "no telescope"
pub const TELESCOPE_UNKNOWN: &str = "TELUNKNOWN";
/// Stem of the synthetic name given to unnamed targets
pub const NONAME_STEM: &str = "noname";
/// Separator between a project prefix and a target name
pub const PROJECT_SEPARATOR: char = '@';

// Angles
/// Degrees per hour of right ascension
pub const DEG_PER_HOUR: f64 = 15.0;
