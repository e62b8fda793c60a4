//! Contract rule engine: entry-level salary slots, length/floor tables, and
//! the batch signing operations.
//!
//! Batch semantics follow the tool's offline workflow: one bad entry in a
//! signing file must not sink the rest of the file, so `enter_contracts` and
//! `slide_contracts` isolate failures per player and hand the caller full
//! error/warning/result lists. Qualifying offers are the exception — those
//! lists are short and hand-curated, so any bad entry aborts before a single
//! row is touched. Within one player, commits are all-or-nothing: every rule
//! check runs before the first field write.

pub mod parse;

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::roster::{PlayerView, Roster};
use crate::teams::{TeamId, TeamRegistry};

/// Salaries round to this unit in every computed adjustment.
pub const SALARY_ROUND: i64 = 50_000;
/// Placeholder salary marking an undrafted/unsigned prospect.
pub const SALARY_UNSIGNED: i64 = 100_000;
pub const SALARY_MIN_LEAGUE: i64 = 600_000;
pub const SALARY_MAX_LEAGUE: i64 = 9_000_000;
pub const YEARS_MAX_LEAGUE: i64 = 7;
/// Entry-level contracts are always three seasons.
pub const ELC_YEARS: i64 = 3;

/// Per-slot ELC salaries for the 2020+ draft format, indexed by overall
/// pick. Slot 0 is padding.
const DRAFT_SLOTS_2020: [i64; 15] = [
    0, 3_000_000, 2_750_000, 2_500_000, 2_250_000, 2_000_000, 1_900_000, 1_800_000, 1_700_000,
    1_600_000, 1_500_000, 1_450_000, 1_400_000, 1_350_000, 1_300_000,
];

/// A proposed contract, not yet committed to a roster row. `team` present
/// means a free-agent signing with that club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub salary: i64,
    pub years: i64,
    pub team: Option<TeamId>,
}

impl Contract {
    pub fn new(salary: i64, years: i64) -> Self {
        Self { salary, years, team: None }
    }

    pub fn with_team(salary: i64, years: i64, team: TeamId) -> Self {
        Self { salary, years, team: Some(team) }
    }
}

/// Collected outcome of one batch operation.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub results: Vec<String>,
    /// Successfully committed players, by full name.
    pub applied: BTreeMap<String, usize>,
}

impl BatchOutcome {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn merge(&mut self, other: BatchOutcome) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.results.extend(other.results);
        self.applied.extend(other.applied);
    }
}

/// Entry-level contract for a drafted player, from the slot tables.
///
/// `check_contract` enforces that the player's current contract is in the
/// unsigned shape (`years == 0`, or `years == 1` with the sentinel salary).
/// `default_undrafted` turns the undrafted error into a league-minimum
/// one-year fallback. A late bloomer freshly drafted past `draft_year_cutoff`
/// is inconsistent data and always an error.
pub fn elc_for(
    player: &PlayerView<'_>,
    draft_year_cutoff: Option<i64>,
    check_contract: bool,
    default_undrafted: bool,
) -> Result<Contract, RosterError> {
    let pick = player.draft_overall();
    if pick <= 0 {
        if default_undrafted {
            return Ok(Contract::new(SALARY_MIN_LEAGUE, 1));
        }
        return Err(RosterError::InconsistentContractState(format!(
            "can't compute an ELC for undrafted player {} (draft_overall={})",
            player.full_name(),
            pick
        )));
    }
    let years = player.years();
    let unsigned_shape = years == 0 || (years == 1 && player.salary() == SALARY_UNSIGNED);
    if check_contract && !unsigned_shape {
        return Err(RosterError::InconsistentContractState(format!(
            "{} has contract {}x{}y, not an unsigned drafted prospect",
            player.full_name(),
            player.salary(),
            years
        )));
    }
    if let Some(cutoff) = draft_year_cutoff {
        if player.is_late_bloomer() && player.drafted_since(cutoff + 1) {
            return Err(RosterError::InconsistentContractState(format!(
                "{} is a late bloomer drafted in {}, after the {} cutoff",
                player.full_name(),
                player.draft_year(),
                cutoff
            )));
        }
    }

    let salary = if player.draft_year() >= 2020 {
        match pick {
            1..=14 => DRAFT_SLOTS_2020[pick as usize],
            15..=16 => 1_250_000,
            17..=18 => 1_200_000,
            19..=20 => 1_150_000,
            21..=23 => 1_100_000,
            24..=26 => 1_050_000,
            27..=30 => 1_000_000,
            31..=34 => 950_000,
            35..=38 => 900_000,
            39..=42 => 850_000,
            43..=46 => 800_000,
            47..=50 => 750_000,
            51..=55 => 700_000,
            56..=60 => 650_000,
            _ => 600_000, // 61 and later
        }
    } else {
        match pick {
            1..=10 => 2_000_000,
            11..=20 => 1_600_000,
            21..=30 => 1_400_000,
            31..=40 => 1_200_000,
            41..=50 => 1_000_000,
            51..=60 => 800_000,
            61..=75 => 720_000,
            76..=90 => 680_000,
            91..=105 => 640_000,
            _ => 600_000, // 106 and later
        }
    };
    Ok(Contract::new(salary, ELC_YEARS))
}

/// Longest contract the league allows at a given salary.
pub fn max_years(salary: i64) -> Result<i64, RosterError> {
    if salary <= SALARY_MIN_LEAGUE {
        return Err(RosterError::InconsistentContractState(format!(
            "no valid contract length for salary={} at or below the league minimum {}",
            salary, SALARY_MIN_LEAGUE
        )));
    }
    Ok(match salary {
        s if s < 800_000 => 1,
        s if s < 1_200_000 => 2,
        s if s < 3_000_000 => 3,
        s if s < 5_000_000 => 5,
        _ => YEARS_MAX_LEAGUE,
    })
}

/// Cheapest salary the league allows at a given contract length.
pub fn min_salary(years: i64) -> Result<i64, RosterError> {
    if years <= 0 {
        return Err(RosterError::InconsistentContractState(format!(
            "no valid salary for contract years={}",
            years
        )));
    }
    Ok(match years {
        1 => 600_000,
        2 => 800_000,
        3 => 1_200_000,
        4 | 5 => 3_000_000,
        _ => 5_000_000,
    })
}

pub fn round_salary(salary: f64) -> i64 {
    round_salary_to(salary, SALARY_ROUND)
}

pub fn round_salary_to(salary: f64, unit: i64) -> i64 {
    unit * (salary / unit as f64).round() as i64
}

/// Batch-apply proposed contracts. A `None` proposal signs the player's ELC;
/// a proposal carrying a team signs a free agent; anything else re-signs a
/// rostered player whose contract is in its final year. Failures are
/// collected per player and never abort the batch.
pub fn enter_contracts(
    roster: &mut Roster,
    registry: &TeamRegistry,
    proposals: &BTreeMap<String, Option<Contract>>,
    floors: Option<&BTreeMap<String, i64>>,
    draft_year_cutoff: Option<i64>,
) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();
    if floors.is_none() {
        log::warn!("no per-player salary floors provided; defaulting to the league minimum");
    }
    for (name, proposal) in proposals {
        match enter_one(roster, registry, name, proposal, floors, draft_year_cutoff, &mut outcome.warnings)
        {
            Ok((line, pid)) => {
                log::info!("{}", line);
                outcome.results.push(line);
                outcome.applied.insert(name.clone(), pid);
            }
            Err(RosterError::PlayerNotFound(_)) => {
                outcome.errors.push(format!("couldn't find player: {}", name));
            }
            Err(err) => outcome.errors.push(format!("player {}: {}", name, err)),
        }
    }
    outcome
}

fn enter_one(
    roster: &mut Roster,
    registry: &TeamRegistry,
    name: &str,
    proposal: &Option<Contract>,
    floors: Option<&BTreeMap<String, i64>>,
    draft_year_cutoff: Option<i64>,
    warnings: &mut Vec<String>,
) -> Result<(String, usize), RosterError> {
    let pid = roster.find_by_fullname(name)?;
    let mut player = roster.player(pid, registry);
    let prior_salary = player.salary();
    let prior_years = player.years();
    let unsigned_shape = prior_years == 0 || (prior_years == 1 && prior_salary == SALARY_UNSIGNED);

    let contract = match proposal {
        // ELC signing: the player's actual contract must still be in the
        // unsigned shape, and his roster team follows his draft rights.
        None => {
            let elc = elc_for(&player, draft_year_cutoff, true, true)?;
            let rights = player.rights()?;
            player.set_salary(elc.salary);
            player.set_years(elc.years);
            player.set_team(rights);
            return Ok((
                format!(
                    "player {} ({}) signing ELC: {}y {}",
                    name,
                    registry.label(rights),
                    elc.years,
                    elc.salary
                ),
                pid,
            ));
        }
        Some(c) => c,
    };

    if let Some(team) = contract.team {
        // Free-agent signing: only players without a real contract, and the
        // flat league minimum is the only floor consulted.
        if !unsigned_shape {
            return Err(RosterError::InconsistentContractState(format!(
                "can't be signed as a free agent with years={} remaining",
                prior_years
            )));
        }
        if contract.salary < SALARY_MIN_LEAGUE {
            return Err(RosterError::SalaryBelowFloor {
                salary: contract.salary,
                floor: SALARY_MIN_LEAGUE,
                years: contract.years,
            });
        }
        player.set_salary(contract.salary);
        player.set_years(contract.years);
        player.set_rights(team);
        player.set_team(team);
        player.set_acquired("signed as a free agent");
        return Ok((
            format!(
                "player {} ({}) signing: {}y {}",
                name,
                registry.label(team),
                contract.years,
                contract.salary
            ),
            pid,
        ));
    }

    // Re-signing/extension of a rostered player in his final contract year.
    if prior_years != 1 {
        return Err(RosterError::InconsistentContractState(format!(
            "invalid extension with years={}",
            prior_years
        )));
    }
    let elc = elc_for(&player, draft_year_cutoff, false, true)?;
    let override_floor = floors.and_then(|f| f.get(name).copied()).unwrap_or(SALARY_MIN_LEAGUE);
    let mut floor = override_floor.max(min_salary(contract.years)?).min(SALARY_MAX_LEAGUE);
    if prior_salary == elc.salary && contract.years >= 5 {
        warnings.push(format!(
            "player {} salary={} == elc.salary={} and years={} >= 5; applying the post-ELC bonus floor",
            name, prior_salary, elc.salary, contract.years
        ));
        let scale = 1.0 + 0.10 * (contract.years - 4) as f64;
        floor = round_salary(scale * floor as f64).min(SALARY_MAX_LEAGUE);
    }
    if contract.salary < floor {
        return Err(RosterError::SalaryBelowFloor {
            salary: contract.salary,
            floor,
            years: contract.years,
        });
    }
    if contract.salary > floor {
        warnings.push(format!(
            "player {} salary={} > floor={} for {}y",
            name, contract.salary, floor, contract.years
        ));
    }
    let rights = player.rights()?;
    // Extensions are entered in the offseason, ahead of the rollover that
    // takes a year off every contract; add that year back up front.
    let years = contract.years + 1;
    player.set_salary(contract.salary);
    player.set_years(years);
    Ok((
        format!(
            "player {} ({}) re-signing: {}y {}",
            name,
            registry.label(rights),
            years,
            contract.salary
        ),
        pid,
    ))
}

/// Extend rookie-scale protection by a season for each eligible player. The
/// player must actually be inside an active ELC: two or three years left at
/// exactly the recomputed slot salary.
pub fn slide_contracts(
    roster: &mut Roster,
    registry: &TeamRegistry,
    eligible: &[String],
    ineligible: &[String],
    draft_year_cutoff: Option<i64>,
) -> BatchOutcome {
    let blocked: HashSet<&str> = ineligible.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut outcome = BatchOutcome::default();
    for name in eligible {
        if name.is_empty() || blocked.contains(name.as_str()) || !seen.insert(name.as_str()) {
            continue;
        }
        match slide_one(roster, registry, name, draft_year_cutoff) {
            Ok((line, pid)) => {
                log::info!("{}", line);
                outcome.results.push(line);
                outcome.applied.insert(name.clone(), pid);
            }
            Err(RosterError::PlayerNotFound(_)) => {
                outcome.errors.push(format!("couldn't find player: {}", name));
            }
            Err(err) => outcome.errors.push(format!("player {}: {}", name, err)),
        }
    }
    outcome
}

fn slide_one(
    roster: &mut Roster,
    registry: &TeamRegistry,
    name: &str,
    draft_year_cutoff: Option<i64>,
) -> Result<(String, usize), RosterError> {
    let pid = roster.find_by_fullname(name)?;
    let mut player = roster.player(pid, registry);
    let years = player.years();
    let mut problems = Vec::new();
    if !(2..=3).contains(&years) {
        problems.push(format!(
            "can't slide unless 2 <= years={} <= 3 (either unsigned or past the slide window)",
            years
        ));
    }
    let elc = elc_for(&player, draft_year_cutoff, false, false)?;
    if elc.salary != player.salary() {
        problems.push(format!(
            "salary={} != elc.salary={}; player appears not to be on an ELC",
            player.salary(),
            elc.salary
        ));
    }
    if !problems.is_empty() {
        return Err(RosterError::InconsistentContractState(problems.join(" and ")));
    }
    let rights = player.rights()?;
    player.set_years(years + 1);
    Ok((
        format!(
            "player {} ({}) contract sliding to: {}y {}",
            name,
            registry.label(rights),
            years + 1,
            player.salary()
        ),
        pid,
    ))
}

/// Apply qualifying offers. Every entry is validated before anything is
/// committed, and any violation aborts the whole batch — a bad qualifying
/// list means the upstream data is corrupt.
pub fn sign_qualifiers(
    roster: &mut Roster,
    registry: &TeamRegistry,
    bids: &[(String, String)],
) -> Result<Vec<String>, RosterError> {
    let mut seen = HashSet::new();
    let mut to_sign = Vec::with_capacity(bids.len());
    for (team_name, player_name) in bids {
        if !seen.insert(player_name.as_str()) {
            return Err(RosterError::DuplicateQualifier(player_name.clone()));
        }
        let team = registry.by_acronym(team_name).ok_or_else(|| {
            RosterError::ParseInput(format!("unknown qualifying team `{}`", team_name))
        })?;
        let pid = roster.find_by_fullname(player_name)?;
        let player = roster.player(pid, registry);
        if player.years() != 0 || player.rights()? != TeamId::UFA {
            return Err(RosterError::InconsistentContractState(format!(
                "{} is not listed UFA and cannot sign a qualifying offer",
                player.describe()
            )));
        }
        to_sign.push((pid, team));
    }

    let mut results = Vec::with_capacity(to_sign.len());
    for (pid, team) in to_sign {
        let mut player = roster.player(pid, registry);
        let salary = round_salary(1.2 * player.salary() as f64);
        player.set_rights(team);
        player.set_team(team);
        player.set_years(1);
        player.set_salary(salary);
        let line = format!(
            "signing {} ({}) qualifying offer at salary={}",
            player.full_name(),
            registry.label(team),
            salary
        );
        log::info!("{}", line);
        results.push(line);
    }
    Ok(results)
}

/// Late bloomers drafted no later than the cutoff who are still unsigned and
/// young enough to matter get flagged after a contract pass.
pub fn audit_unsigned_boosters(roster: &Roster, draft_year_cutoff: i64) -> Vec<String> {
    let season_start =
        chrono::NaiveDate::from_ymd_opt(draft_year_cutoff as i32 + 1, 9, 16)
            .expect("September 16 exists in every year");
    let mut warnings = Vec::new();
    for pid in 0..roster.len() {
        let table = roster.table();
        let late_bloomer = table.int(pid, "pot") < 70 && table.int(pid, "con") >= 75;
        if !late_bloomer
            || table.int(pid, "years") != 0
            || table.int(pid, "draft_year") >= draft_year_cutoff + 1
        {
            continue;
        }
        let age = roster.birthdate(pid).map(|born| {
            use chrono::Datelike;
            let mut years = season_start.year() - born.year();
            if (season_start.month(), season_start.day()) < (born.month(), born.day()) {
                years -= 1;
            }
            years
        });
        if age.map(|a| a < 20).unwrap_or(false) {
            warnings.push(format!("potential booster {} still unsigned", roster.full_name(pid)));
        }
    }
    warnings
}

/// Per-team totals of the contracts committed by a batch.
pub fn summarize_signings(
    roster: &Roster,
    registry: &TeamRegistry,
    applied: &BTreeMap<String, usize>,
) -> Vec<String> {
    let mut by_team: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for &pid in applied.values() {
        by_team.entry(roster.table().int(pid, "rights")).or_default().push(pid);
    }
    let mut lines = Vec::new();
    let sentinels = [TeamId::NONE, TeamId::UFA, TeamId::UNDRAFTED];
    let all_ids = registry.iter().map(|t| t.id).chain(sentinels);
    for id in all_ids {
        let pids = by_team.get(&(id.0 as i64)).map(Vec::as_slice).unwrap_or(&[]);
        let mut next_season = 0i64;
        let mut total = 0i64;
        for &pid in pids {
            let salary = roster.table().int(pid, "salary");
            let years = roster.table().int(pid, "years");
            next_season += salary;
            total += (years - 1) * salary;
        }
        let line = format!(
            "{} signing {} players to contracts totalling {:.3}M ({:.3}M next season)",
            registry.label(id),
            pids.len(),
            total as f64 / 1_000_000.0,
            next_season as f64 / 1_000_000.0
        );
        log::info!("{}", line);
        lines.push(line);
    }
    lines
}
