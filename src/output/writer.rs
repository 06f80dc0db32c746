//! Trajectory sinks
//!
//! A sink receives the particle collection once at t = 0 and once after
//! every step, always in chronological order, and emits one record per
//! particle per call.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Result, SimError};
use crate::simulation::states::Particle;

pub const CSV_HEADER: &str = "time,id,mass,x,y,z,vx,vy,vz";

pub trait StateSink {
    fn record(&mut self, particles: &[Particle], time: f64) -> Result<()>;
}

/// Comma-separated output, header first
pub struct CsvWriter<W: Write> {
    out: W,
}

impl<W: Write> CsvWriter<W> {
    /// Wrap `out` and write the header line
    pub fn new(mut out: W) -> Result<Self> {
        writeln!(out, "{CSV_HEADER}")?;
        Ok(Self { out })
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl CsvWriter<BufWriter<File>> {
    /// Create (or truncate) `path`, making parent directories as needed
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let output_err = |source| SimError::Output {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(output_err)?;
        }
        let file = File::create(path).map_err(output_err)?;
        Self::new(BufWriter::new(file))
    }
}

impl<W: Write> StateSink for CsvWriter<W> {
    fn record(&mut self, particles: &[Particle], time: f64) -> Result<()> {
        for p in particles {
            writeln!(
                self.out,
                "{},{},{},{},{},{},{},{},{}",
                time,
                p.id,
                p.mass,
                p.position.x,
                p.position.y,
                p.position.z,
                p.velocity.x,
                p.velocity.y,
                p.velocity.z,
            )?;
        }
        Ok(())
    }
}

/// Particle states at one instant
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub time: f64,
    pub particles: Vec<Particle>,
}

/// In-memory sink that keeps every snapshot
#[derive(Debug, Clone, Default)]
pub struct Trajectory {
    pub snapshots: Vec<Snapshot>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }
}

impl StateSink for Trajectory {
    fn record(&mut self, particles: &[Particle], time: f64) -> Result<()> {
        self.snapshots.push(Snapshot {
            time,
            particles: particles.to_vec(),
        });
        Ok(())
    }
}
