//! Batch fitting over a long-format CSV.
//!
//! Input columns: `job, x, y`. Rows of one job are read in file order; the first four
//! are the quad, the rest the polygon. Output columns:
//! `job, min_x, min_y, max_x, max_y, scale, error` (one row per job, sorted by job id).
//! Jobs that fail keep nulls in the numeric columns and the error message in `error`.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use quadfit::{FitCfg, Fitter};
use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;

/// Counts reported after a batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchSummary {
    pub jobs: usize,
    pub failed: usize,
}

/// Read jobs from `input`, fit each, write the result table to `out`.
pub fn run_batch(input: &Path, out: &Path, cfg: FitCfg) -> Result<BatchSummary> {
    let df = LazyCsvReader::new(input)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", input.display()))?
        .collect()?;
    tracing::info!(rows = df.height(), cols = df.width(), "batch_input_shape");

    let jobs = group_jobs(&df)?;
    let mut fitter = Fitter::new(cfg);
    let mut ids = Vec::with_capacity(jobs.len());
    let mut cols: [Vec<Option<f64>>; 5] = Default::default();
    let mut errors = Vec::with_capacity(jobs.len());
    let mut summary = BatchSummary::default();

    for (job, values) in &jobs {
        ids.push(*job);
        summary.jobs += 1;
        match fitter.fit_flat(values) {
            Ok(r) => {
                let row = [
                    r.aabb.min.x,
                    r.aabb.min.y,
                    r.aabb.max.x,
                    r.aabb.max.y,
                    r.scale(),
                ];
                for (col, v) in cols.iter_mut().zip(row) {
                    col.push(Some(v));
                }
                errors.push(String::new());
            }
            Err(e) => {
                tracing::warn!(job, error = %e, "fit_failed");
                summary.failed += 1;
                for col in cols.iter_mut() {
                    col.push(None);
                }
                errors.push(e.to_string());
            }
        }
    }

    let [min_x, min_y, max_x, max_y, scale] = cols;
    let mut table = df!(
        "job" => ids,
        "min_x" => min_x,
        "min_y" => min_y,
        "max_x" => max_x,
        "max_y" => max_y,
        "scale" => scale,
        "error" => errors,
    )?;
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let mut file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    CsvWriter::new(&mut file).finish(&mut table)?;
    Ok(summary)
}

/// Flat `[quad…, polygon…]` coordinates per job id.
fn group_jobs(df: &DataFrame) -> Result<BTreeMap<i64, Vec<f64>>> {
    let job = df.column("job")?.cast(&DataType::Int64)?;
    let x = df.column("x")?.cast(&DataType::Float64)?;
    let y = df.column("y")?.cast(&DataType::Float64)?;
    let mut jobs: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for (row, ((j, x), y)) in job
        .i64()?
        .into_iter()
        .zip(x.f64()?.into_iter())
        .zip(y.f64()?.into_iter())
        .enumerate()
    {
        let (Some(j), Some(x), Some(y)) = (j, x, y) else {
            bail!("row {row}: job, x and y must all be present");
        };
        jobs.entry(j).or_default().extend([x, y]);
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn fits_each_job_and_reports_failures() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("jobs.csv");
        let out = dir.path().join("out/fits.csv");
        std::fs::write(
            &input,
            "job,x,y\n\
             1,0,0\n1,1,0\n1,1,1\n1,0,1\n1,0,0\n1,2,2\n\
             2,0,0\n2,1,0\n2,2,0\n2,3,0\n2,0,0\n\
             3,0,0\n3,10,0\n3,10,10\n3,0,10\n3,1,2\n3,3,5\n",
        )
        .unwrap();

        let summary = run_batch(&input, &out, FitCfg::default()).unwrap();
        assert_eq!(summary, BatchSummary { jobs: 3, failed: 1 });

        let written = std::fs::read_to_string(&out).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines[0], "job,min_x,min_y,max_x,max_y,scale,error");
        assert_eq!(lines.len(), 4);
        assert_row(lines[1], 1, [0.0, 0.0, 1.0, 1.0, 0.5]);
        assert!(lines[2].starts_with("2,,,,,,"));
        assert!(lines[2].contains("zero area"));
        assert_row(lines[3], 3, [1.0, 2.0, 3.0, 5.0, 1.0]);
    }

    fn assert_row(line: &str, job: i64, expected: [f64; 5]) {
        let fields: Vec<&str> = line.split(',').collect();
        assert_eq!(fields[0].parse::<i64>().unwrap(), job);
        for (field, want) in fields[1..6].iter().zip(expected) {
            let got: f64 = field.parse().unwrap();
            assert!((got - want).abs() < 1e-9, "{line}: {got} != {want}");
        }
    }

    #[test]
    fn missing_values_are_rejected() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("jobs.csv");
        std::fs::write(&input, "job,x,y\n1,0,0\n1,,1\n").unwrap();
        let err = run_batch(&input, &dir.path().join("o.csv"), FitCfg::default()).unwrap_err();
        assert!(err.to_string().contains("row 1"));
    }
}
