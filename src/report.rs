use std::collections::HashMap;
use std::fmt::Write;

use crate::display::{self, ProgressTier, SortOrder};
use crate::models::{DeveloperProgress, MilestonePlan, MilestoneSummary, Snapshot};

pub fn summarize_milestones(developers: &[DeveloperProgress], plan: &MilestonePlan) -> Vec<MilestoneSummary> {
    plan.milestones()
        .iter()
        .enumerate()
        .map(|(index, def)| {
            let mut completed_count = 0usize;
            let mut in_progress_count = 0usize;
            let mut completed_days = 0u64;

            for progress in developers.iter().filter_map(|dev| dev.milestones.get(index)) {
                if progress.completed {
                    completed_count += 1;
                    completed_days += progress.days as u64;
                } else if progress.is_in_progress() {
                    in_progress_count += 1;
                }
            }

            MilestoneSummary {
                name: def.name.clone(),
                target: def.target,
                completed_count,
                in_progress_count,
                avg_completed_days: if completed_count == 0 {
                    0.0
                } else {
                    completed_days as f64 / completed_count as f64
                },
            }
        })
        .collect()
}

pub fn tier_counts(developers: &[DeveloperProgress], plan: &MilestonePlan) -> HashMap<ProgressTier, usize> {
    let mut counts = HashMap::new();
    for dev in developers {
        for (progress, def) in dev.milestones.iter().zip(plan.milestones()) {
            if progress.days == 0 {
                continue;
            }
            let tier = ProgressTier::classify(progress.days, def.target, progress.completed);
            *counts.entry(tier).or_insert(0) += 1;
        }
    }
    counts
}

fn render_cell(days: u32, target: u32, completed: bool, bar_width: usize) -> String {
    if days == 0 {
        return "-".to_string();
    }
    let filled = (display::bar_fraction(days, target) * bar_width as f64).round() as usize;
    let tier = ProgressTier::classify(days, target, completed);
    format!(
        "{:>3}d [{}{}]{}",
        days,
        "#".repeat(filled),
        ".".repeat(bar_width - filled),
        tier.marker()
    )
}

/// Plain-text table for the terminal; rows appear in the order given.
pub fn render_table(developers: &[DeveloperProgress], plan: &MilestonePlan, bar_width: usize) -> String {
    let mut header = vec!["Developer".to_string(), "Status".to_string()];
    let mut subheader = vec![String::new(), String::new()];
    for def in plan.milestones() {
        header.push(def.name.clone());
        subheader.push(format!("Target: {}d", def.target));
    }

    let rows: Vec<Vec<String>> = developers
        .iter()
        .map(|dev| {
            let mut row = vec![dev.name.clone(), display::status_label(dev)];
            for (progress, def) in dev.milestones.iter().zip(plan.milestones()) {
                row.push(render_cell(progress.days, def.target, progress.completed, bar_width));
            }
            row
        })
        .collect();

    let mut widths: Vec<usize> = header
        .iter()
        .zip(&subheader)
        .map(|(a, b)| a.chars().count().max(b.chars().count()))
        .collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    for line in std::iter::once(&header).chain(std::iter::once(&subheader)).chain(&rows) {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect();
        let _ = writeln!(output, "{}", cells.join(" | ").trim_end());
    }

    let _ = writeln!(
        output,
        "Legend: {}",
        ProgressTier::ALL
            .iter()
            .map(|tier| format!("{} {}", tier.marker(), tier.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    );
    output
}

pub fn build_report(snapshot: &Snapshot, plan: &MilestonePlan, sort: SortOrder) -> String {
    let developers = display::sort_developers(&snapshot.developers, sort);
    let summaries = summarize_milestones(&developers, plan);
    let tiers = tier_counts(&developers, plan);
    let onboarding = developers.iter().filter(|dev| dev.is_onboarding()).count();

    let mut output = String::new();

    let _ = writeln!(output, "# Time to Productivity Report");
    let _ = writeln!(
        output,
        "Snapshot {} generated {} (sorted by {})",
        snapshot.id,
        snapshot.generated_at.format("%Y-%m-%d %H:%M UTC"),
        sort.as_str()
    );
    let _ = writeln!(output);
    let _ = writeln!(output, "## Roster");

    if developers.is_empty() {
        let _ = writeln!(output, "No developers in the roster.");
    } else {
        let _ = writeln!(output, "- Onboarding: {}", onboarding);
        let _ = writeln!(output, "- Active: {}", developers.len() - onboarding);
        for tier in ProgressTier::ALL {
            let _ = writeln!(
                output,
                "- Milestones {}: {}",
                tier.as_str(),
                tiers.get(&tier).copied().unwrap_or(0)
            );
        }
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Milestones");

    for summary in &summaries {
        let _ = writeln!(
            output,
            "- {} (target {}d): {} completed, avg {:.1}d, {} in progress",
            summary.name,
            summary.target,
            summary.completed_count,
            summary.avg_completed_days,
            summary.in_progress_count
        );
    }

    let _ = writeln!(output);
    let _ = writeln!(output, "## Progress");

    let mut header = String::from("| Developer | Status |");
    let mut divider = String::from("|---|---|");
    for def in plan.milestones() {
        let _ = write!(header, " {} (Target: {}d) |", def.name, def.target);
        divider.push_str("---|");
    }
    let _ = writeln!(output, "{header}");
    let _ = writeln!(output, "{divider}");

    for dev in &developers {
        let mut row = format!("| {} | {} |", dev.name, display::status_label(dev));
        for (progress, def) in dev.milestones.iter().zip(plan.milestones()) {
            if progress.days == 0 {
                row.push_str(" - |");
            } else {
                let tier = ProgressTier::classify(progress.days, def.target, progress.completed);
                let _ = write!(
                    row,
                    " {}d, {} ({} days (Target: {} days)) |",
                    progress.days,
                    tier.as_str(),
                    progress.days,
                    def.target
                );
            }
        }
        let _ = writeln!(output, "{row}");
    }

    output
}
