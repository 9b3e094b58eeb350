//! # Infill Beam CLI
//!
//! Interactive front end for `beam_core`:
//!
//! 1. Name a beam (first argument, or prompted)
//! 2. Load `beams/<name>.json`, or build a new definition section by section
//!    and save it there
//! 3. Enter end loads and print the analysis report followed by its JSON
//!
//! Lengths are entered in millimeters and stored in meters.

mod prompt;
mod report;

use std::io::{self, BufRead, Write};
use std::path::Path;

use beam_core::calculations::{analyze, EndLoads};
use beam_core::definition::{BeamDefinition, SectionRecord};
use beam_core::errors::{CalcError, CalcResult};
use beam_core::file_io::{definition_path, load_definition, save_definition};
use beam_core::materials::{InfillPattern, MaterialDb, MaterialProvider, PrintOverrides};
use beam_core::units::{Meters, Millimeters};

use prompt::Prompter;
use report::render_report;

/// Directory, relative to the working directory, holding definition files
const BEAMS_DIR: &str = "beams";

fn main() {
    println!("Infill Beam - Composite Cantilever Calculator");
    println!("=============================================");
    println!();

    let name_arg = std::env::args().nth(1);
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    let outcome = std::env::current_dir()
        .map_err(|e| CalcError::file_error("resolve", "current directory", e.to_string()))
        .and_then(|cwd| run(&mut prompter, name_arg, &cwd.join(BEAMS_DIR)));

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        if let Ok(json) = serde_json::to_string_pretty(&e) {
            eprintln!();
            eprintln!("Error JSON:");
            eprintln!("{}", json);
        }
        std::process::exit(1);
    }
}

fn run<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    name_arg: Option<String>,
    beams_dir: &Path,
) -> CalcResult<()> {
    let db = MaterialDb::builtin()?;

    let name = match name_arg {
        Some(name) => name.trim().to_string(),
        None => p.line("Please enter the name of the beam: ")?,
    };
    if name.is_empty() {
        return Err(CalcError::invalid_input("beam_name", "\"\"", "No beam name provided"));
    }

    let path = definition_path(beams_dir, &name)?;
    let existing = if path.exists() {
        load_existing(p, &name, &path)?
    } else {
        None
    };

    let definition = match existing {
        Some(definition) => definition,
        None => {
            let definition = create_definition(p, &name, db)?;
            save_definition(&definition, &path)?;
            p.say(&format!("Saved new beam to: {}", path.display()))?;
            definition
        }
    };

    let beam = definition.build(db)?;

    if !p.yes_no("Do you want to run analysis now? [Y/n]: ", true)? {
        return Ok(());
    }

    p.say("Enter load values. Leave blank to use 0.")?;
    let loads = EndLoads::new(
        p.number_or("  Moment M (N·m): ", 0.0)?,
        p.number_or("  Transverse force F (N): ", 0.0)?,
        p.number_or("  Torque T (N·m): ", 0.0)?,
        p.number_or("  Tensile force TF (N): ", 0.0)?,
    );

    let result = analyze(&beam, &loads)?;

    p.say("")?;
    p.show(&render_report(&definition.name, &beam, &result))?;
    p.say("")?;
    p.say("JSON Output:")?;
    let json = serde_json::to_string_pretty(&result).map_err(|e| CalcError::SerializationError {
        reason: e.to_string(),
    })?;
    p.say(&json)?;
    Ok(())
}

/// Offer to load an existing definition. `None` means build a new one.
fn load_existing<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    name: &str,
    path: &Path,
) -> CalcResult<Option<BeamDefinition>> {
    p.say(&format!("Beam '{}' already exists at: {}", name, path.display()))?;
    if !p.yes_no("Load existing beam? [Y/n]: ", true)? {
        p.say("Creating a new beam; the existing file will be overwritten.")?;
        return Ok(None);
    }

    match load_definition(path) {
        Ok(definition) => {
            p.say(&format!(
                "Loaded beam '{}' with {} sections.",
                name,
                definition.sections.len()
            ))?;
            Ok(Some(definition))
        }
        Err(e) => {
            p.say(&format!("Failed to load existing beam file: {}", e))?;
            p.say("Proceeding with a new beam instead.")?;
            Ok(None)
        }
    }
}

/// Build a new definition interactively.
fn create_definition<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    name: &str,
    db: &MaterialDb,
) -> CalcResult<BeamDefinition> {
    p.say("Let's create a new beam definition.")?;
    p.say(&format!("Available materials: {}", db.names().join(", ")))?;

    let use_global = p.yes_no(
        "Do you want to set global properties (material, infill pattern, infill density, wall count, line width)? [Y/n]: ",
        true,
    )?;
    let defaults = if use_global {
        prompt_overrides(p, "", db)?
    } else {
        PrintOverrides::default()
    };

    let mut definition = BeamDefinition::new(name, defaults);
    while p.yes_no("Do you want to add a new section? [Y/n]: ", true)? {
        p.say("Enter section geometry (mm):")?;
        let length = millimeters(p.number("  Length: ")?);
        let width = millimeters(p.number("  Width: ")?);
        let height = millimeters(p.number("  Height: ")?);

        let mut record = SectionRecord::new(length, width, height);
        if !use_global {
            record.overrides = prompt_overrides(p, "  ", db)?;
        }
        definition.add_section(record);
    }

    Ok(definition)
}

/// Ask for each print setting; blank answers leave the field unset.
fn prompt_overrides<R: BufRead, W: Write>(
    p: &mut Prompter<R, W>,
    indent: &str,
    db: &MaterialDb,
) -> CalcResult<PrintOverrides> {
    let mut overrides = PrintOverrides::default();

    if let Some(material) = p.optional(&format!("{}Material (leave blank to skip): ", indent))? {
        match db.lookup(&material) {
            Ok(props) => overrides.material = Some(props.name),
            Err(e) => p.say(&format!("{}{}, skipping.", indent, e))?,
        }
    }

    if let Some(pattern) =
        p.optional(&format!("{}Infill pattern (leave blank to skip): ", indent))?
    {
        match InfillPattern::from_str_flexible(&pattern) {
            Ok(pattern) => overrides.infill_pattern = Some(pattern),
            Err(_) => p.say(&format!("{}Invalid infill pattern, skipping.", indent))?,
        }
    }

    overrides.infill_density = p.optional_parsed(
        &format!("{}Infill density (percentage) (leave blank to skip): ", indent),
        "infill density",
    )?;
    overrides.wall_count = p.optional_parsed(
        &format!("{}Wall count (integer) (leave blank to skip): ", indent),
        "wall count",
    )?;
    overrides.line_width = p
        .optional_parsed::<f64>(
            &format!("{}Line width (mm) (leave blank to skip): ", indent),
            "line width",
        )?
        .map(millimeters);

    Ok(overrides)
}

fn millimeters(value: f64) -> f64 {
    Meters::from(Millimeters(value)).0
}
