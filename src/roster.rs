use std::path::Path;

use anyhow::Context;
use tracing::{info, warn};

use crate::models::{MilestoneDef, MilestonePlan, PlanError, Roster};

pub const DEFAULT_DEVELOPERS: &[&str] = &[
    "Emma", "Liam", "Olivia", "Noah", "Ava", "Ethan", "Sophia", "Mason", "Isabella", "William",
];

pub const DEFAULT_MILESTONES: &[(&str, u32)] = &[
    ("Environment Setup", 3),
    ("Code Review Process", 7),
    ("CI/CD Pipeline", 10),
    ("Architecture Overview", 14),
    ("First Bug Fix", 21),
    ("Feature Implementation", 30),
    ("Performance Optimization", 45),
];

pub fn default_plan() -> Result<MilestonePlan, PlanError> {
    MilestonePlan::new(
        DEFAULT_MILESTONES
            .iter()
            .map(|(name, target)| MilestoneDef {
                name: name.to_string(),
                target: *target,
            })
            .collect(),
    )
}

pub fn default_roster() -> Result<Roster, PlanError> {
    Roster::new(DEFAULT_DEVELOPERS.iter().map(|name| name.to_string()).collect())
}

pub fn load_milestones_csv(csv_path: &Path) -> anyhow::Result<MilestonePlan> {
    let reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    load_milestones(reader)
}

pub fn load_roster_csv(csv_path: &Path) -> anyhow::Result<Roster> {
    let reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("failed to open {}", csv_path.display()))?;
    load_roster(reader)
}

fn load_milestones<R: std::io::Read>(mut reader: csv::Reader<R>) -> anyhow::Result<MilestonePlan> {
    let mut milestones = Vec::new();
    for result in reader.deserialize::<MilestoneDef>() {
        milestones.push(result.context("invalid milestone row")?);
    }

    let plan = MilestonePlan::new(milestones)?;
    if plan.is_empty() {
        warn!("milestone file has no rows, every developer will have an empty plan");
    }
    info!(count = plan.len(), "loaded milestone definitions");
    Ok(plan)
}

fn load_roster<R: std::io::Read>(mut reader: csv::Reader<R>) -> anyhow::Result<Roster> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        name: String,
    }

    let mut names = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        names.push(result.context("invalid roster row")?.name);
    }

    let roster = Roster::new(names)?;
    info!(count = roster.names().len(), "loaded roster");
    Ok(roster)
}
