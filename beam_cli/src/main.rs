//! # Girder CLI
//!
//! Solves a continuous beam from a JSON model document (or the built-in
//! bridge benchmark) and prints the support reactions and equilibrium check.
//!
//! ```text
//! girder bridge.json
//! girder --benchmark --cross-check
//! girder bridge.json --json --samples 100 --output bridge.result.json
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use beam_core::benchmark::bridge_benchmark;
use beam_core::calculations::stiffness::cross_check;
use beam_core::calculations::{solve_with_options, AnalysisOptions, AnalysisResult, Extremum};
use beam_core::file_io::{load_model, save_result, ModelDocument};
use beam_core::units::{KilonewtonMeters, Kilonewtons, Meters, Millimeters, NewtonMeters, Newtons};
use beam_core::{BeamError, BeamModel, BeamResult};
use clap::Parser;

/// Relative tolerance for the stiffness cross-check
const CROSS_CHECK_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Parser)]
#[command(name = "girder", version, about = "Continuous beam analysis by the three-moment equation")]
struct Cli {
    /// Model document (JSON)
    #[arg(required_unless_present = "benchmark", conflicts_with = "benchmark")]
    input: Option<PathBuf>,

    /// Solve the built-in three-span bridge benchmark
    #[arg(long)]
    benchmark: bool,

    /// Print the full result as JSON instead of the summary
    #[arg(long)]
    json: bool,

    /// Write the result JSON to this path
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Compare against an independent stiffness-method solution
    #[arg(long)]
    cross_check: bool,

    /// Diagram intervals per span
    #[arg(long)]
    samples: Option<usize>,

    /// Print diagnostics to stderr
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(2),
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

/// Returns `Ok(false)` when the cross-check was requested and disagrees
fn run(cli: &Cli) -> BeamResult<bool> {
    let document = read_document(cli)?;
    let mut options = document.settings.clone();
    if let Some(samples) = cli.samples {
        options = options.with_samples(samples);
    }

    if cli.verbose {
        describe_model(&document.model, &options);
    }

    let result = solve_with_options(&document.model, &options)?;

    if cli.verbose {
        eprintln!(
            "[girder] solved {} compatibility equation(s), max |M| = {:.3}",
            result.degree_of_indeterminacy,
            KilonewtonMeters::from(NewtonMeters(
                result.max_positive_moment.value.abs().max(result.max_negative_moment.value.abs())
            ))
        );
    }

    if let Some(path) = &cli.output {
        save_result(&result, path)?;
        if cli.verbose {
            eprintln!("[girder] result written to {}", path.display());
        }
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&document.model, &result);
    }

    if !cli.cross_check {
        return Ok(true);
    }

    let check = cross_check(&document.model, &result)?;
    let agrees = check.agrees(CROSS_CHECK_TOLERANCE);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&check)?);
    } else {
        println!();
        println!("Stiffness cross-check ({} elements):", check.element_count);
        for r in &check.reactions {
            println!(
                "  Node {:<3} {:>14.3} {:>14.3}  Δ = {:.3e} N",
                r.node,
                Kilonewtons::from(Newtons(r.three_moment)).value(),
                Kilonewtons::from(Newtons(r.stiffness)).value(),
                r.difference
            );
        }
        println!(
            "  Reactions: max relative difference {:.2e}   Deflections: {:.2e}   {}",
            check.max_relative_difference,
            check.relative_deflection_difference,
            status_icon(agrees)
        );
    }
    if cli.verbose && !agrees {
        eprintln!("[girder] cross-check exceeds tolerance {:e}", CROSS_CHECK_TOLERANCE);
    }

    Ok(agrees)
}

fn read_document(cli: &Cli) -> BeamResult<ModelDocument> {
    if cli.benchmark {
        return Ok(ModelDocument::new(bridge_benchmark()));
    }
    match &cli.input {
        Some(path) => {
            if cli.verbose {
                eprintln!("[girder] reading {}", path.display());
            }
            load_model(path)
        }
        None => Err(BeamError::invalid_model("input", "none", "Provide a model file or --benchmark")),
    }
}

fn describe_model(model: &BeamModel, options: &AnalysisOptions) {
    eprintln!(
        "[girder] {} span(s), {:.3} m, {} load(s), {} samples per span",
        model.span_count(),
        model.total_length(),
        model.loads.len(),
        options.samples_per_span
    );
    let supports: Vec<&str> = model.supports.iter().map(|s| s.display_name()).collect();
    eprintln!("[girder] supports: {}", supports.join(" - "));
}

fn print_summary(model: &BeamModel, result: &AnalysisResult) {
    println!("═══════════════════════════════════════");
    println!("  CONTINUOUS BEAM RESULTS");
    println!("═══════════════════════════════════════");
    println!();
    println!("Model:");
    for (i, span) in model.spans.iter().enumerate() {
        println!("  Span {:<3} L = {:>8.3} m   EI = {:.4e} N·m²  {}", i, span.length, span.ei, span.label);
    }
    println!();
    println!("Support Reactions:");
    for r in &result.reactions {
        print!(
            "  Node {:<3} x = {:>8.3} m  {:<7} R = {:.3}",
            r.node,
            r.position,
            r.support.display_name(),
            Kilonewtons::from(Newtons(r.force))
        );
        match r.moment {
            Some(m) => println!("   M = {:.3}", KilonewtonMeters::from(NewtonMeters(m))),
            None => println!(),
        }
    }
    println!();
    println!("Support Moments:");
    for (node, m) in result.support_moments.iter().enumerate() {
        println!("  Node {:<3} M = {:.3}", node, KilonewtonMeters::from(NewtonMeters(*m)));
    }
    println!();
    println!("Extremes:");
    print_moment_extremum("M+max", &result.max_positive_moment);
    print_moment_extremum("M-max", &result.max_negative_moment);
    println!(
        "  V max  = {:.3}  (span {}, x = {:.3} m)",
        Kilonewtons::from(Newtons(result.max_shear.value)),
        result.max_shear.span,
        result.max_shear.x
    );
    println!(
        "  δ max  = {:.3}  (span {}, x = {:.3} m)",
        Millimeters::from(Meters(result.max_deflection.value)),
        result.max_deflection.span,
        result.max_deflection.x
    );
    println!();

    let eq = &result.equilibrium;
    println!("Equilibrium:");
    for c in &eq.by_category {
        println!("  {:<8} {:.3}", c.category.display_name(), Kilonewtons::from(Newtons(c.total)));
    }
    println!("  Applied  {:.3}", Kilonewtons::from(Newtons(eq.total_applied)));
    println!("  Reaction {:.3}", Kilonewtons::from(Newtons(eq.total_reaction)));
    println!(
        "  Error    {:.3e} N ({:.2e} relative, moment residual {:.2e}) {}",
        eq.absolute_error,
        eq.relative_error,
        eq.moment_residual,
        status_icon(eq.balanced)
    );
}

fn print_moment_extremum(name: &str, extremum: &Extremum) {
    println!(
        "  {:<6} = {:.3}  (span {}, x = {:.3} m)",
        name,
        KilonewtonMeters::from(NewtonMeters(extremum.value)),
        extremum.span,
        extremum.x
    );
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
