//! Age- and performance-ranked retirement selection.
//!
//! Three stages, applied in order over players not yet selected:
//! everyone at or past the hard age wall, then expired contracts past the
//! second threshold, then — to land the league on an exact total — the
//! lowest-rated of the veterans with at most one year left.

use chrono::{Datelike, NaiveDate};

use crate::error::RosterError;
use crate::roster::Roster;

/// Quota and age thresholds for one selection run.
#[derive(Debug, Clone)]
pub struct RetirementPolicy {
    /// Total number of players to retire across all stages.
    pub target: usize,
    /// Stage 1: retire at this age regardless of contract.
    pub age_any: i32,
    /// Stage 2: retire at this age with an expired contract.
    pub age_expired: i32,
    /// Stage 3: candidates at this age with at most one year left.
    pub age_expiring: i32,
}

impl Default for RetirementPolicy {
    fn default() -> Self {
        Self { target: 175, age_any: 42, age_expired: 37, age_expiring: 30 }
    }
}

/// Default reference date: September 16 (season start) of the given year.
pub fn season_reference_date(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 9, 16).expect("September 16 exists in every year")
}

struct Stage {
    age_min: i32,
    years_max: Option<i64>,
    label: &'static str,
}

/// Select players to retire. Returns one flag per roster row.
///
/// Stages 1 and 2 take every qualifying player; if they alone overshoot the
/// target, the thresholds are misconfigured and the run aborts. The final
/// stage tops the total up to the target exactly, taking the lowest-overall
/// candidates first (ties broken by table order), and aborts when too few
/// qualify.
pub fn find_retirees(
    roster: &Roster,
    date: NaiveDate,
    policy: &RetirementPolicy,
) -> Result<Vec<bool>, RosterError> {
    let n = roster.len();
    let birthdates = roster.birthdates();
    let ages: Vec<Option<i32>> = birthdates
        .iter()
        .map(|born| {
            born.map(|b| {
                let mut years = date.year() - b.year();
                if (date.month(), date.day()) < (b.month(), b.day()) {
                    years -= 1;
                }
                years
            })
        })
        .collect();
    let overalls: Vec<f64> = (0..n).map(|pid| roster.overall(pid)).collect();

    let stages = [
        Stage { age_min: policy.age_any, years_max: None, label: "age_any" },
        Stage { age_min: policy.age_expired, years_max: Some(0), label: "age_expired" },
        Stage { age_min: policy.age_expiring, years_max: Some(1), label: "age_expiring" },
    ];
    let final_stage = stages.len() - 1;

    let mut retiring = vec![false; n];
    let mut remaining = policy.target as i64;

    for (stage_idx, stage) in stages.iter().enumerate() {
        let is_final = stage_idx == final_stage;
        let mut candidates: Vec<usize> = (0..n)
            .filter(|&pid| {
                !retiring[pid]
                    && ages[pid].map(|a| a >= stage.age_min).unwrap_or(false)
                    && stage
                        .years_max
                        .map(|max| roster.table().int(pid, "years") <= max)
                        .unwrap_or(true)
            })
            .collect();

        if is_final {
            if remaining < 0 {
                // Unreachable: earlier stages already aborted on overshoot.
                return Err(RosterError::RetirementQuota(format!(
                    "already {} over the target before stage {}",
                    -remaining, stage.label
                )));
            }
            let quota = remaining as usize;
            if candidates.len() < quota {
                return Err(RosterError::RetirementQuota(format!(
                    "only {} players to retire in final stage; decrease {}={}",
                    candidates.len(),
                    stage.label,
                    stage.age_min
                )));
            }
            candidates.sort_by(|&a, &b| {
                overalls[a].partial_cmp(&overalls[b]).unwrap_or(std::cmp::Ordering::Equal)
            });
            candidates.truncate(quota);
            candidates.sort_unstable();
        }

        log::info!(
            "retiring {} players over {} with years <= {} ({})",
            candidates.len(),
            stage.age_min,
            stage.years_max.map(|y| y.to_string()).unwrap_or_else(|| "any".to_string()),
            stage.label
        );
        for &pid in &candidates {
            log::info!(
                "  {} OV={}",
                roster.full_name(pid),
                overalls[pid].round() as i64
            );
            retiring[pid] = true;
        }
        remaining -= candidates.len() as i64;

        if !is_final && remaining < 0 {
            return Err(RosterError::RetirementQuota(format!(
                "retiring too many players over {} with years <= {}; increase {} or raise the target by at least {}",
                stage.age_min,
                stage.years_max.map(|y| y.to_string()).unwrap_or_else(|| "any".to_string()),
                stage.label,
                -remaining
            )));
        }
    }

    Ok(retiring)
}
