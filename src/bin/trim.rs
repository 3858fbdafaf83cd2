use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use span_core::units::rad_to_deg;
use span_export::loading;
use span_export::report::{Summary, write_sidecar};
use spanwise::case::{CaseReport, run_case};
use spanwise::{SpacingConfig, load_case, load_wing};

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Trim a flying wing and report its spanwise loading"
)]
struct Cli {
    /// Wing manifest (YAML or TOML)
    #[arg(long)]
    wing: PathBuf,

    /// Trim case manifest (YAML or TOML)
    #[arg(long)]
    case: PathBuf,

    /// Override the panel count from the case manifest
    #[arg(long)]
    panels: Option<usize>,

    /// Override the spanwise spacing rule from the case manifest
    #[arg(long, value_enum)]
    spacing: Option<SpacingMode>,

    /// Write the spanwise loading CSV here (`-` for stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum SpacingMode {
    Uniform,
    Cosine,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let wing = load_wing(&cli.wing)?;
    let mut case = load_case(&cli.case)?;
    if let Some(panels) = cli.panels {
        case.panels = panels;
    }
    if let Some(mode) = cli.spacing {
        case.spacing = match mode {
            SpacingMode::Uniform => SpacingConfig::Uniform,
            SpacingMode::Cosine => SpacingConfig::Cosine,
        };
    }

    let report = run_case(&wing, &case)?;

    println!("=== {} / {} ===", report.wing, report.case);
    println!(
        "Planform: area = {:.4}, span = {:.4}, mean chord = {:.4}, AR = {:.3}",
        report.normalize.area,
        report.normalize.span,
        report.normalize.mean_chord,
        report.normalize.aspect_ratio
    );
    println!(
        "Normalize: chord scale = {:.4}, height scale = {:.4}, {} panels",
        report.normalize.chord_scale, report.normalize.height_scale, report.panels
    );
    let state = report.solution.state;
    println!(
        "Trim state: alpha = {:.3} deg, sideslip = {:.3} deg, pb/2V = {:.5}, rb/2V = {:.5}",
        rad_to_deg(state.alpha),
        rad_to_deg(state.sideslip),
        state.roll_rate,
        state.yaw_rate
    );
    let c = report.solution.coefficients;
    println!(
        "Coefficients: CL = {:.5}, CDi = {:.5} (self {:.5}, cross {:.5}), e = {:.4}",
        c.cl, c.cdi, c.cdi_self, c.cdi_cross, c.span_efficiency
    );
    println!(
        "Moments: Cr = {:.5}, Cn = {:.5}, root bending Cb = {:.5}",
        c.roll_moment, c.yaw_moment, c.bending
    );
    if report.solution.converged {
        println!(
            "Converged in {} iterations, residual {:.2e}",
            report.solution.iterations, report.solution.residual
        );
    } else {
        eprintln!(
            "warning: no convergence in {} iterations, residual {:.2e}; reporting last iterate",
            report.solution.iterations, report.solution.residual
        );
    }

    if let Some(output) = &cli.output {
        write_loading(output, &report)?;
        if output != Path::new("-") {
            println!("Loading written to {}", output.display());
            let sidecar = write_sidecar(output, &summarize(&report))?;
            println!("Summary written to {}", sidecar.display());
        }
    }

    Ok(())
}

fn write_loading(path: &Path, report: &CaseReport) -> std::io::Result<()> {
    let mut writer = loading::writer_for_path(path)?;
    loading::write_header(writer.as_mut())?;
    for (station, load) in report.solution.loading.iter().enumerate() {
        let record = loading::Record {
            station,
            eta: load.eta,
            chord: load.chord,
            gamma: load.circulation,
            section_cl: load.section_cl,
            ccl: load.load_per_span,
        };
        record.write_to(writer.as_mut())?;
    }
    writer.flush()
}

fn summarize(report: &CaseReport) -> Summary<'_> {
    let solution = &report.solution;
    let c = solution.coefficients;
    Summary {
        wing: &report.wing,
        case: &report.case,
        panels: report.panels,
        aspect_ratio: report.aspect_ratio,
        area_ratio: report.area_ratio,
        converged: solution.converged,
        iterations: solution.iterations,
        residual: solution.residual,
        alpha_deg: rad_to_deg(solution.state.alpha),
        sideslip_deg: rad_to_deg(solution.state.sideslip),
        roll_rate: solution.state.roll_rate,
        yaw_rate: solution.state.yaw_rate,
        cl: c.cl,
        cdi: c.cdi,
        cdi_self: c.cdi_self,
        cdi_cross: c.cdi_cross,
        roll_moment: c.roll_moment,
        yaw_moment: c.yaw_moment,
        bending: c.bending,
        span_efficiency: c.span_efficiency,
    }
}
