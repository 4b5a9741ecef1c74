use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("milestone `{0}` must have a target of at least one day")]
    ZeroTarget(String),
    #[error("milestone `{0}` is defined more than once")]
    DuplicateMilestone(String),
    #[error("developer `{0}` appears more than once in the roster")]
    DuplicateDeveloper(String),
    #[error("names must not be blank")]
    BlankName,
    #[error("milestone targets add up to {0} days, too many to simulate")]
    TargetsTooLarge(u64),
}

/// Upper bound on simulated days for one developer: the slow lobe stays
/// under 1.5x target, rounding adds at most half a day per milestone.
fn max_simulated_days(milestones: &[MilestoneDef]) -> u64 {
    milestones
        .iter()
        .map(|m| (3 * m.target as u64 + 1) / 2)
        .sum()
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MilestoneDef {
    pub name: String,
    pub target: u32,
}

/// Ordered onboarding stages. Targets are checked once here so every
/// `days / target` downstream is safe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MilestonePlan {
    milestones: Vec<MilestoneDef>,
}

impl MilestonePlan {
    pub fn new(milestones: Vec<MilestoneDef>) -> Result<Self, PlanError> {
        let mut seen = HashSet::new();
        for milestone in &milestones {
            if milestone.name.trim().is_empty() {
                return Err(PlanError::BlankName);
            }
            if milestone.target == 0 {
                return Err(PlanError::ZeroTarget(milestone.name.clone()));
            }
            if !seen.insert(milestone.name.as_str()) {
                return Err(PlanError::DuplicateMilestone(milestone.name.clone()));
            }
        }
        if max_simulated_days(&milestones) > u32::MAX as u64 {
            let total = milestones.iter().map(|m| m.target as u64).sum();
            return Err(PlanError::TargetsTooLarge(total));
        }
        Ok(Self { milestones })
    }

    pub fn milestones(&self) -> &[MilestoneDef] {
        &self.milestones
    }

    pub fn len(&self) -> usize {
        self.milestones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.milestones.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    names: Vec<String>,
}

impl Roster {
    pub fn new(names: Vec<String>) -> Result<Self, PlanError> {
        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(PlanError::BlankName);
            }
            if !seen.insert(name.as_str()) {
                return Err(PlanError::DuplicateDeveloper(name.clone()));
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MilestoneProgress {
    pub name: String,
    pub days: u32,
    pub completed: bool,
}

impl MilestoneProgress {
    pub fn unstarted(name: &str) -> Self {
        Self {
            name: name.to_string(),
            days: 0,
            completed: false,
        }
    }

    pub fn is_in_progress(&self) -> bool {
        !self.completed && self.days > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperProgress {
    pub name: String,
    pub onboarding_days: Option<u32>,
    pub milestones: Vec<MilestoneProgress>,
}

impl DeveloperProgress {
    pub fn is_onboarding(&self) -> bool {
        self.onboarding_days.is_some()
    }

    /// Checkpoint day while onboarding, total simulated days once active.
    pub fn effective_days(&self) -> u32 {
        match self.onboarding_days {
            Some(day) => day,
            None => self.milestones.iter().map(|m| m.days).sum(),
        }
    }

    pub fn completed_days(&self) -> u32 {
        self.milestones
            .iter()
            .filter(|m| m.completed)
            .map(|m| m.days)
            .sum()
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub developers: Vec<DeveloperProgress>,
}

#[derive(Debug, Clone)]
pub struct MilestoneSummary {
    pub name: String,
    pub target: u32,
    pub completed_count: usize,
    pub in_progress_count: usize,
    pub avg_completed_days: f64,
}
