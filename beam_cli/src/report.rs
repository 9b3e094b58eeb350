//! Human-readable analysis report.

use std::fmt::{self, Write};

use beam_core::calculations::{Beam, BeamResult};
use beam_core::units::{Degrees, Megapascals, Meters, Millimeters, Pascals, Radians};

const RULE: &str = "═══════════════════════════════════════════════════════════════════";

fn status_icon(pass: bool) -> &'static str {
    if pass {
        "[OK]"
    } else {
        "[FAIL]"
    }
}

fn mpa(pa: f64) -> Megapascals {
    Pascals(pa).into()
}

fn mm(m: f64) -> f64 {
    Millimeters::from(Meters(m)).0
}

fn degrees(rad: f64) -> Degrees {
    Radians(rad).into()
}

fn safety_factor(sf: Option<f64>) -> String {
    sf.map_or_else(|| "-".to_string(), |sf| format!("{:.2}", sf))
}

/// Render the report for one analysis run.
pub fn render_report(name: &str, beam: &Beam, result: &BeamResult) -> String {
    let mut output = String::new();
    // Writing into a String cannot fail
    let _ = write_report(&mut output, name, beam, result);
    output
}

fn write_report(out: &mut String, name: &str, beam: &Beam, result: &BeamResult) -> fmt::Result {
    let loads = &result.loads;

    writeln!(out, "{}", RULE)?;
    writeln!(out, "  CANTILEVER ANALYSIS: {}", name)?;
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;
    writeln!(out, "Beam:")?;
    writeln!(out, "  Sections:     {}", beam.section_count())?;
    writeln!(out, "  Total length: {}", Meters(beam.total_length()))?;
    writeln!(out)?;
    writeln!(out, "End loads:")?;
    writeln!(out, "  M  = {:+.4} N·m", loads.moment)?;
    writeln!(out, "  F  = {:+.4} N", loads.force)?;
    writeln!(out, "  T  = {:+.4} N·m", loads.torque)?;
    writeln!(out, "  TF = {:+.4} N", loads.tension)?;
    writeln!(out)?;
    writeln!(out, "Free-end response:")?;
    writeln!(out, "  Displacement: {:+.4e} m", result.displacement)?;
    writeln!(out, "  Rotation:     {:+.4e} rad ({})", result.rotation, degrees(result.rotation))?;
    writeln!(out, "  Twist:        {:+.4e} rad ({})", result.twist, degrees(result.twist))?;
    writeln!(out)?;

    writeln!(out, "Sections (0 = clamped end):")?;
    writeln!(
        out,
        "  {:>3}  {:<12} {:>7} {:>13}  {:<6} {:>7} {:>5}  {:>12} {:>8}",
        "#", "end", "L (mm)", "b×h (mm)", "mat", "infill", "walls", "σ_req (MPa)", "SF"
    )?;
    for (section, row) in beam.sections().iter().zip(&result.sections) {
        let g = section.geometry();
        let s = section.settings();
        writeln!(
            out,
            "  {:>3}  {:<12} {:>7.1} {:>6.1}×{:<6.1}  {:<6} {:>6.0}% {:>5}  {:>12.3} {:>8}",
            row.index,
            row.role.label(),
            mm(g.length),
            mm(g.width),
            mm(g.height),
            section.material().name,
            s.infill_density,
            s.wall_count,
            mpa(row.response.required_yield_stress()).0,
            safety_factor(row.response.safety_factor),
        )?;
    }
    writeln!(out)?;

    writeln!(
        out,
        "Max required yield stress: {} at section {}",
        mpa(result.max_stress),
        result.max_stress_section
    )?;
    match (result.critical_section, result.min_safety_factor) {
        (Some(index), Some(sf)) => writeln!(
            out,
            "Critical section:          {} (SF = {:.2}) {}",
            index,
            sf,
            status_icon(sf >= 1.0)
        )?,
        _ => writeln!(out, "Critical section:          none (unloaded)")?,
    }
    writeln!(out)?;
    writeln!(out, "{}", RULE)?;
    writeln!(
        out,
        "  RESULT: {} (governs: {})",
        if result.passes() { "PASS" } else { "FAIL" },
        result.governing_condition()
    )?;
    writeln!(out, "{}", RULE)?;
    Ok(())
}
