//! Run records written beside batch outputs as `<stem>.provenance.json`.

use crate::batch::BatchSummary;
use anyhow::{Context, Result};
use quadfit::FitCfg;
use serde::Serialize;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Tolerances in effect for a run, flattened out of `FitCfg`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Tolerances {
    pub eps_area: f64,
    pub eps_feas: f64,
    pub eps_det: f64,
    pub eps_tie: f64,
}

impl From<&FitCfg> for Tolerances {
    fn from(cfg: &FitCfg) -> Self {
        Self {
            eps_area: cfg.eps_area,
            eps_feas: cfg.solver.eps_feas,
            eps_det: cfg.solver.eps_det,
            eps_tie: cfg.solver.eps_tie,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunRecord {
    pub code_rev: String,
    pub quadfit_version: &'static str,
    pub written_by: Callsite,
    pub input: String,
    pub tolerances: Tolerances,
    pub summary: BatchSummary,
}

impl RunRecord {
    /// Capture the caller's location along with the run inputs.
    #[track_caller]
    pub fn new(input: &Path, cfg: &FitCfg, summary: BatchSummary) -> Self {
        let at = Location::caller();
        Self {
            code_rev: code_rev(),
            quadfit_version: quadfit::VERSION,
            written_by: Callsite {
                file: at.file(),
                line: at.line(),
            },
            input: input.to_string_lossy().into_owned(),
            tolerances: Tolerances::from(cfg),
            summary,
        }
    }
}

#[derive(Serialize)]
struct OnDisk<'a> {
    #[serde(flatten)]
    record: &'a RunRecord,
    outputs: [String; 1],
}

/// Serialize `record` next to `artifact`; returns the record's path.
pub fn write_record(artifact: &Path, record: &RunRecord) -> Result<PathBuf> {
    let path = record_path(artifact);
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?,
        _ => {}
    }
    let doc = OnDisk {
        record,
        outputs: [artifact.to_string_lossy().into_owned()],
    };
    let bytes = serde_json::to_vec_pretty(&doc)?;
    fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn record_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "fits".to_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit hash from `GIT_COMMIT` (build time, then run time) or `git rev-parse`.
pub fn code_rev() -> String {
    let pinned = option_env!("GIT_COMMIT")
        .map(str::to_owned)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = pinned {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|s| s.trim().to_owned())
        .unwrap_or_else(|| "unknown".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn record_sits_beside_the_artifact() {
        assert_eq!(
            record_path(Path::new("/tmp/output/fits.csv")),
            Path::new("/tmp/output/fits.provenance.json")
        );
        assert_eq!(
            record_path(Path::new("results")),
            Path::new("results.provenance.json")
        );
    }

    #[test]
    fn written_record_carries_tolerances_summary_and_outputs() {
        let dir = tempdir().unwrap();
        let artifact = dir.path().join("nested").join("fits.csv");
        let cfg = FitCfg::default();
        let summary = BatchSummary { jobs: 3, failed: 1 };
        let record = RunRecord::new(Path::new("jobs.csv"), &cfg, summary);
        let path = write_record(&artifact, &record).unwrap();

        let parsed: Value = serde_json::from_slice(&fs::read(path).unwrap()).unwrap();
        assert_eq!(parsed["outputs"][0], artifact.to_string_lossy().as_ref());
        assert_eq!(parsed["input"], "jobs.csv");
        assert_eq!(parsed["summary"]["jobs"], 3);
        assert_eq!(parsed["summary"]["failed"], 1);
        assert_eq!(parsed["tolerances"]["eps_feas"], cfg.solver.eps_feas);
        assert_eq!(parsed["quadfit_version"], quadfit::VERSION);
        assert_eq!(parsed["written_by"]["file"], file!());
    }
}
