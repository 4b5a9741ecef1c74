use chrono::Utc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::{DeveloperProgress, MilestoneDef, MilestonePlan, MilestoneProgress, Roster, Snapshot};
use crate::random::RandomSource;

const ONBOARDING_PROBABILITY: f64 = 0.3;
const MAX_ONBOARDING_DAYS: f64 = 30.0;
const CATCH_UP_PROBABILITY: f64 = 0.4;
const NORMAL_PACE_PROBABILITY: f64 = 0.7;

pub fn generate(
    roster: &Roster,
    plan: &MilestonePlan,
    rng: &mut impl RandomSource,
) -> Vec<DeveloperProgress> {
    roster
        .names()
        .iter()
        .map(|name| generate_developer(name, plan, rng))
        .collect()
}

pub fn snapshot(roster: &Roster, plan: &MilestonePlan, rng: &mut impl RandomSource) -> Snapshot {
    let developers = generate(roster, plan, rng);
    let snapshot = Snapshot {
        id: Uuid::new_v4(),
        generated_at: Utc::now(),
        developers,
    };
    info!(
        id = %snapshot.id,
        onboarding = snapshot.developers.iter().filter(|d| d.is_onboarding()).count(),
        total = snapshot.developers.len(),
        "generated progress snapshot"
    );
    snapshot
}

pub fn generate_developer(
    name: &str,
    plan: &MilestonePlan,
    rng: &mut impl RandomSource,
) -> DeveloperProgress {
    let onboarding_days = if rng.next_unit() < ONBOARDING_PROBABILITY {
        Some((rng.next_unit() * MAX_ONBOARDING_DAYS).floor() as u32 + 1)
    } else {
        None
    };

    let mut pace = Pace::default();
    let milestones = plan
        .milestones()
        .iter()
        .map(|milestone| pace.advance(milestone, onboarding_days, rng))
        .collect();

    let developer = DeveloperProgress {
        name: name.to_string(),
        onboarding_days,
        milestones,
    };
    debug!(
        developer = name,
        onboarding_days,
        completed_days = developer.completed_days(),
        behind_schedule = pace.behind_schedule,
        "simulated developer"
    );
    developer
}

/// Running state while one developer walks the milestone plan.
#[derive(Debug, Default)]
struct Pace {
    cumulative_days: u32,
    behind_schedule: f64,
    has_in_progress: bool,
}

impl Pace {
    fn advance(
        &mut self,
        milestone: &MilestoneDef,
        onboarding_days: Option<u32>,
        rng: &mut impl RandomSource,
    ) -> MilestoneProgress {
        if self.has_in_progress {
            return MilestoneProgress::unstarted(&milestone.name);
        }

        let variance = self.draw_variance(milestone.target as f64, rng);
        // MilestonePlan::new caps the summed worst case at u32::MAX
        let days = (milestone.target as f64 * variance).round() as u32;
        let before = self.cumulative_days;
        self.cumulative_days += days;

        let Some(checkpoint) = onboarding_days else {
            return MilestoneProgress {
                name: milestone.name.clone(),
                days,
                completed: true,
            };
        };

        if self.cumulative_days <= checkpoint {
            MilestoneProgress {
                name: milestone.name.clone(),
                days,
                completed: true,
            }
        } else if before < checkpoint {
            self.has_in_progress = true;
            MilestoneProgress {
                name: milestone.name.clone(),
                days: checkpoint - before,
                completed: false,
            }
        } else {
            MilestoneProgress::unstarted(&milestone.name)
        }
    }

    fn draw_variance(&mut self, target: f64, rng: &mut impl RandomSource) -> f64 {
        if self.behind_schedule > 0.0 && rng.next_unit() < CATCH_UP_PROBABILITY {
            let variance = rng.next_unit() * 0.3 + 0.7;
            self.behind_schedule = (self.behind_schedule - target * (1.0 - variance)).max(0.0);
            return variance;
        }

        let variance = if rng.next_unit() < NORMAL_PACE_PROBABILITY {
            rng.next_unit() * 0.3 + 0.8
        } else {
            rng.next_unit() * 0.4 + 1.1
        };
        if variance > 1.0 {
            self.behind_schedule += target * (variance - 1.0);
        }
        variance
    }
}
