//! Export helpers for CSV and JSON artifacts.

pub mod loading {
    use std::fs::{self, File};
    use std::io::{self, BufWriter, Write};
    use std::path::Path;

    const HEADER: &str = "station,eta,chord,gamma,section_cl,ccl";

    /// Create a writer for the target path, handling stdout (`-`) by convention.
    pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
        if path == Path::new("-") {
            return Ok(Box::new(BufWriter::new(io::stdout())));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Box::new(BufWriter::new(file)))
    }

    /// Write the standard loading CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the loading exporter. Lengths are in half-span
    /// units; `gamma` is circulation over freestream speed times half-span,
    /// `ccl` its dimensional counterpart per unit span.
    #[derive(Debug, Clone)]
    pub struct Record {
        pub station: usize,
        pub eta: f64,
        pub chord: f64,
        pub gamma: f64,
        pub section_cl: f64,
        pub ccl: f64,
    }

    impl Record {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{:.6},{:.6},{:.6},{:.6},{:.6}",
                self.station, self.eta, self.chord, self.gamma, self.section_cl, self.ccl,
            )
        }
    }
}

pub mod report {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::fs::{self, File};
    use std::io;
    use std::path::{Path, PathBuf};

    /// Trim summary written as a JSON sidecar next to the loading CSV.
    #[derive(Debug, Serialize)]
    pub struct Summary<'a> {
        pub wing: &'a str,
        pub case: &'a str,
        pub panels: usize,
        pub aspect_ratio: f64,
        pub area_ratio: f64,
        pub converged: bool,
        pub iterations: usize,
        pub residual: f64,
        pub alpha_deg: f64,
        pub sideslip_deg: f64,
        pub roll_rate: f64,
        pub yaw_rate: f64,
        pub cl: f64,
        pub cdi: f64,
        pub cdi_self: f64,
        pub cdi_cross: f64,
        pub roll_moment: f64,
        pub yaw_moment: f64,
        pub bending: f64,
        pub span_efficiency: f64,
    }

    /// Write the summary sidecar for the given CSV output path.
    pub fn write_sidecar(output: &Path, summary: &Summary<'_>) -> io::Result<PathBuf> {
        let parent = output.parent().unwrap_or_else(|| Path::new("."));
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
        let stem = output
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("loading");
        let sidecar_path = if parent.as_os_str().is_empty() {
            PathBuf::from(format!("{}_summary.json", stem))
        } else {
            parent.join(format!("{}_summary.json", stem))
        };
        to_writer_pretty(File::create(&sidecar_path)?, summary)?;
        Ok(sidecar_path)
    }
}
