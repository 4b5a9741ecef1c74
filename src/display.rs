use clap::ValueEnum;

use crate::models::DeveloperProgress;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressTier {
    InProgress,
    OnTime,
    SlightlyLate,
    Late,
}

impl ProgressTier {
    pub const ALL: [ProgressTier; 4] = [
        ProgressTier::InProgress,
        ProgressTier::OnTime,
        ProgressTier::SlightlyLate,
        ProgressTier::Late,
    ];

    pub fn classify(days: u32, target: u32, completed: bool) -> Self {
        if !completed {
            return ProgressTier::InProgress;
        }
        let ratio = days as f64 / target as f64;
        if ratio <= 1.0 {
            ProgressTier::OnTime
        } else if ratio <= 1.3 {
            ProgressTier::SlightlyLate
        } else {
            ProgressTier::Late
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressTier::InProgress => "in progress",
            ProgressTier::OnTime => "on time",
            ProgressTier::SlightlyLate => "slightly late",
            ProgressTier::Late => "late",
        }
    }

    pub fn marker(&self) -> char {
        match self {
            ProgressTier::InProgress => '~',
            ProgressTier::OnTime => '+',
            ProgressTier::SlightlyLate => '!',
            ProgressTier::Late => 'x',
        }
    }
}

pub fn bar_fraction(days: u32, target: u32) -> f64 {
    (days as f64 / target as f64).min(1.0)
}

pub fn status_label(dev: &DeveloperProgress) -> String {
    match dev.onboarding_days {
        Some(day) => format!("Onboarding: Day {day}"),
        None => "Active".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SortOrder {
    /// Onboarding developers first, roster order otherwise
    Partition,
    /// Ascending by checkpoint day or total days
    #[default]
    Elapsed,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Partition => "partition",
            SortOrder::Elapsed => "elapsed",
        }
    }
}

pub fn sort_developers(developers: &[DeveloperProgress], order: SortOrder) -> Vec<DeveloperProgress> {
    let mut sorted = developers.to_vec();
    match order {
        SortOrder::Partition => sorted.sort_by_key(|dev| !dev.is_onboarding()),
        SortOrder::Elapsed => sorted.sort_by_key(DeveloperProgress::effective_days),
    }
    sorted
}
