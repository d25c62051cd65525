//! Target List Tool
//!
//! Resolves a target request against a text catalog or user supplied
//! coordinates and prints the resulting target list.
//!
//! Usage:
//!   cargo run --bin target_list -- --catalog targets.cat -p M12AU34 -p M12AN07
//!   cargo run --bin target_list -- -m user -o "W3 02:27:03.8 +61:52:25 RJ"

use std::path::PathBuf;

use clap::{ArgAction, Parser};
use skytargets::catalogs::ProjectFilter;
use skytargets::{MsbMode, ObjectSpec, ResolveOptions, TargetResolver, TargetSpec};

/// Type alias for the error type used throughout this module
type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Target List Tool
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Builds a deduplicated target list from a catalog or user input",
    long_about = None
)]
struct Args {
    /// Selection method: catalog, user or omp (prefixes allowed)
    #[arg(short, long, default_value = "catalog")]
    method: String,

    /// Catalog file for catalog selection
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Project id to select; repeat for several projects
    #[arg(short = 'p', long = "project")]
    projects: Vec<String>,

    /// Object to select. For user selection give "name ra dec [frame]"
    #[arg(short = 'o', long = "object")]
    objects: Vec<String>,

    /// MSB selection: all, active or completed
    #[arg(long, default_value = "all")]
    msbmode: MsbMode,

    /// Telescope to attach to every target
    #[arg(short, long)]
    telescope: Option<String>,

    /// Display detailed debugging information
    #[arg(short, long, action = ArgAction::SetTrue)]
    debug: bool,

    /// Print the targets as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

/// Read an `--object` argument.
///
/// A bare name is a name filter; with user selection the words after the
/// name are the coordinates, split evenly into RA and Dec, with an optional
/// trailing frame word.
fn object_from_arg(arg: &str) -> ObjectSpec {
    let words: Vec<&str> = arg.split_whitespace().collect();
    let Some((name, rest)) = words.split_first() else {
        return ObjectSpec::named("");
    };
    if rest.is_empty() {
        return ObjectSpec::named(name);
    }

    let (fields, frame) = match rest.last() {
        Some(last) if last.chars().any(|c| c.is_alphabetic()) => (&rest[..rest.len() - 1], *last),
        _ => (rest, "RJ"),
    };
    let half = fields.len().div_ceil(2);
    ObjectSpec::with_coordinates(
        name,
        &fields[..half].join(" "),
        &fields[half..].join(" "),
        frame,
    )
}

fn print_table(targets: &[TargetSpec]) {
    println!("{:<24} {:<10} {:<14} {:<14} Telescope", "Name", "Frame", "RA/Long", "Dec/Lat");
    println!("-------------------------------------------------------------------------");
    for target in targets {
        let (first, second) = target.position.fields().unwrap_or(("(ephemeris)", ""));
        println!(
            "{:<24} {:<10} {:<14} {:<14} {}",
            target.name,
            target.coordsys(),
            first,
            second,
            target.telescope.as_deref().unwrap_or("-")
        );
    }
    println!("\n{} targets", targets.len());
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let mut options = ResolveOptions::new()
        .with_msb_mode(args.msbmode)
        .with_debug(args.debug);
    if let Some(catalog) = &args.catalog {
        options = options.with_catalog(catalog);
    }
    if let Some(telescope) = &args.telescope {
        options = options.with_telescope(telescope);
    }

    let projects = ProjectFilter::new(&args.projects);
    let objects: Vec<ObjectSpec> = args.objects.iter().map(|o| object_from_arg(o)).collect();

    let targets = TargetResolver::new().resolve_str(&args.method, &projects, &objects, &options)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&targets)?);
    } else {
        print_table(&targets);
    }

    Ok(())
}
