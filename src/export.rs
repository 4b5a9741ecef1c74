use std::io::Write;

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;

use crate::display::{self, ProgressTier};
use crate::models::{MilestonePlan, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Serialize)]
struct CsvRow<'a> {
    developer: &'a str,
    status: String,
    onboarding_days: Option<u32>,
    milestone: &'a str,
    target: u32,
    days: u32,
    completed: bool,
    tier: &'static str,
}

pub fn write_csv<W: Write>(writer: W, snapshot: &Snapshot, plan: &MilestonePlan) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    for dev in &snapshot.developers {
        for (progress, def) in dev.milestones.iter().zip(plan.milestones()) {
            writer.serialize(CsvRow {
                developer: &dev.name,
                status: display::status_label(dev),
                onboarding_days: dev.onboarding_days,
                milestone: &def.name,
                target: def.target,
                days: progress.days,
                completed: progress.completed,
                tier: ProgressTier::classify(progress.days, def.target, progress.completed).as_str(),
            })?;
        }
    }

    writer.flush().context("failed to flush csv output")?;
    Ok(())
}

pub fn to_json(snapshot: &Snapshot) -> anyhow::Result<String> {
    serde_json::to_string_pretty(snapshot).context("failed to serialize snapshot")
}

pub fn write_snapshot<W: Write>(
    mut writer: W,
    format: ExportFormat,
    snapshot: &Snapshot,
    plan: &MilestonePlan,
) -> anyhow::Result<()> {
    match format {
        ExportFormat::Csv => write_csv(writer, snapshot, plan),
        ExportFormat::Json => {
            let json = to_json(snapshot)?;
            writeln!(writer, "{json}")?;
            writer.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{DeveloperProgress, MilestoneDef, MilestoneProgress};

    fn fixture() -> (Snapshot, MilestonePlan) {
        let plan = MilestonePlan::new(vec![
            MilestoneDef {
                name: "Setup".to_string(),
                target: 3,
            },
            MilestoneDef {
                name: "CI/CD Pipeline".to_string(),
                target: 10,
            },
        ])
        .unwrap();
        let snapshot = Snapshot {
            id: Uuid::new_v4(),
            generated_at: Utc::now(),
            developers: vec![DeveloperProgress {
                name: "Mason".to_string(),
                onboarding_days: Some(5),
                milestones: vec![
                    MilestoneProgress {
                        name: "Setup".to_string(),
                        days: 3,
                        completed: true,
                    },
                    MilestoneProgress {
                        name: "CI/CD Pipeline".to_string(),
                        days: 2,
                        completed: false,
                    },
                ],
            }],
        };
        (snapshot, plan)
    }

    #[test]
    fn csv_has_one_row_per_milestone() {
        let (snapshot, plan) = fixture();
        let mut buffer = Vec::new();
        write_csv(&mut buffer, &snapshot, &plan).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "developer,status,onboarding_days,milestone,target,days,completed,tier"
        );
        assert_eq!(lines[1], "Mason,Onboarding: Day 5,5,Setup,3,3,true,on time");
        assert_eq!(lines[2], "Mason,Onboarding: Day 5,5,CI/CD Pipeline,10,2,false,in progress");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let (snapshot, _) = fixture();
        let json = to_json(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["id"], snapshot.id.to_string());
        assert!(value.get("generatedAt").is_some());
        assert_eq!(value["developers"][0]["onboardingDays"], 5);
        assert_eq!(value["developers"][0]["milestones"][1]["days"], 2);
        assert_eq!(value["developers"][0]["milestones"][1]["completed"], false);
    }

    #[test]
    fn active_developer_serializes_null_checkpoint() {
        let (mut snapshot, _) = fixture();
        snapshot.developers[0].onboarding_days = None;
        let value: serde_json::Value = serde_json::from_str(&to_json(&snapshot).unwrap()).unwrap();
        assert!(value["developers"][0]["onboardingDays"].is_null());
    }
}
