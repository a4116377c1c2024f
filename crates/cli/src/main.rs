use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use quadfit::{FitCfg, FitResult, Fitter, Vec2};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod batch;
mod provenance;

#[derive(Parser)]
#[command(name = "quadfit")]
#[command(about = "Fit a polygon's bounding box into a convex quad")]
struct Cmd {
    #[command(flatten)]
    tol: TolArgs,

    #[command(subcommand)]
    action: Action,
}

/// Tolerance overrides; defaults come from `FitCfg::default()`.
#[derive(Args, Clone, Copy, Debug)]
struct TolArgs {
    /// Relative feasibility slack used by the solver
    #[arg(long, global = true)]
    eps_feas: Option<f64>,
    /// Relative area below which a quad is rejected as degenerate
    #[arg(long, global = true)]
    eps_area: Option<f64>,
}

impl TolArgs {
    fn to_cfg(self) -> FitCfg {
        let mut cfg = FitCfg::default();
        if let Some(eps) = self.eps_feas {
            cfg.solver.eps_feas = eps;
        }
        if let Some(eps) = self.eps_area {
            cfg.eps_area = eps;
        }
        cfg
    }
}

#[derive(Subcommand)]
enum Action {
    /// Fit one polygon and print the result as JSON
    Fit {
        /// Flat coordinates: 4 quad points then the polygon points (x0,y0,x1,y1,...)
        #[arg(
            long,
            value_delimiter = ',',
            allow_negative_numbers = true,
            conflicts_with = "input",
            required_unless_present = "input"
        )]
        points: Vec<f64>,
        /// JSON file with `quad` and `polygon` arrays of [x, y] pairs
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Fit every job of a long-format CSV (job,x,y) and write a result CSV
    Batch {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

/// Structured input for `fit --input`.
#[derive(Debug, Deserialize)]
struct FitRequest {
    quad: [[f64; 2]; 4],
    polygon: Vec<[f64; 2]>,
}

impl FitRequest {
    fn flatten(&self) -> Vec<f64> {
        self.quad
            .iter()
            .chain(&self.polygon)
            .flat_map(|p| *p)
            .collect()
    }
}

#[derive(Debug, Serialize)]
struct FitReport {
    min: [f64; 2],
    max: [f64; 2],
    scale: f64,
    translation: [f64; 2],
}

impl From<&FitResult> for FitReport {
    fn from(r: &FitResult) -> Self {
        let xy = |p: Vec2| [p.x, p.y];
        Self {
            min: xy(r.aabb.min),
            max: xy(r.aabb.max),
            scale: r.scale(),
            translation: xy(r.translation()),
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let cfg = cmd.tol.to_cfg();
    match cmd.action {
        Action::Fit { points, input } => fit(points, input, cfg),
        Action::Batch { input, out } => batch(input, out, cfg),
        Action::Report => report(),
    }
}

fn fit(points: Vec<f64>, input: Option<PathBuf>, cfg: FitCfg) -> Result<()> {
    let values = match input {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("reading {}", path.display()))?;
            let req: FitRequest = serde_json::from_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            if req.polygon.is_empty() {
                bail!("{}: polygon must have at least one point", path.display());
            }
            req.flatten()
        }
        None => points,
    };
    tracing::info!(values = values.len(), "fit");
    let result = Fitter::new(cfg).fit_flat(&values)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&FitReport::from(&result))?
    );
    Ok(())
}

fn batch(input: PathBuf, out: PathBuf, cfg: FitCfg) -> Result<()> {
    tracing::info!(input = %input.display(), out = %out.display(), "batch");
    let summary = batch::run_batch(&input, &out, cfg)?;
    tracing::info!(jobs = summary.jobs, failed = summary.failed, "batch_done");
    let record = provenance::RunRecord::new(&input, &cfg, summary);
    let path = provenance::write_record(&out, &record)?;
    tracing::info!(path = %path.display(), "provenance_written");
    Ok(())
}

fn report() -> Result<()> {
    let obj = serde_json::json!({
        "code_rev": provenance::code_rev(),
        "quadfit_version": quadfit::VERSION,
        "defaults": provenance::Tolerances::from(&FitCfg::default()),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
