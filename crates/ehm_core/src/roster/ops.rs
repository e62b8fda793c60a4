//! Roster maintenance passes: rights releases, veteran replacement,
//! prospect shuffling, and the small cleanup resets applied before a save
//! file goes back out.

use chrono::NaiveDate;

use crate::contracts::{SALARY_MIN_LEAGUE, SALARY_UNSIGNED};
use crate::error::RosterError;
use crate::roster::{Roster, RATING_COLUMNS};
use crate::teams::{TeamId, TeamRegistry};

/// Veteran-replacement tuning. Defaults mirror the league's cleanup pass:
/// thirty-plus depth players on farm rosters with one year left make way for
/// younger free agents with upside at the same position.
#[derive(Debug, Clone)]
pub struct ReplacementPolicy {
    pub age_min: i32,
    pub overall_max: f64,
    pub years_max: i64,
    pub potential_min: i64,
}

impl Default for ReplacementPolicy {
    fn default() -> Self {
        Self { age_min: 30, overall_max: 60.0, years_max: 1, potential_min: 50 }
    }
}

/// Mark the given players retired.
pub fn retire(roster: &mut Roster, pids: &[usize]) {
    for &pid in pids {
        roster.table_mut().set_int(pid, "status", 1);
    }
}

/// Clear the retired flag on everyone (used to rebuild a botched pass).
pub fn unretire_all(roster: &mut Roster) -> usize {
    let mut cleared = 0;
    for pid in 0..roster.len() {
        if roster.table().int(pid, "status") == 1 {
            roster.table_mut().set_int(pid, "status", 0);
            cleared += 1;
        }
    }
    cleared
}

/// Players past `age_limit` whose rights are held by a real team become
/// unrestricted free agents. Returns the affected rows.
pub fn release_rights_by_age(
    roster: &mut Roster,
    registry: &TeamRegistry,
    age_limit: i32,
    as_of: NaiveDate,
) -> Vec<usize> {
    let mut released = Vec::new();
    for pid in 0..roster.len() {
        let rights = roster.table().int(pid, "rights");
        let held_by_team = rights >= 1 && rights <= registry.n_teams() as i64;
        if !held_by_team {
            continue;
        }
        let mut player = roster.player(pid, registry);
        if player.age_years(as_of).map(|a| a > age_limit).unwrap_or(false) {
            log::info!("releasing rights to UFA: {}", player.describe());
            player.set_rights(TeamId::UFA);
            released.push(pid);
        }
    }
    released
}

/// Drop team-held rights to unsigned, teamless players born before the
/// cutoff (draft rights that have lapsed). Returns the affected rows.
pub fn release_lapsed_rights(
    roster: &mut Roster,
    registry: &TeamRegistry,
    born_before: NaiveDate,
) -> Vec<usize> {
    let mut released = Vec::new();
    for pid in 0..roster.len() {
        let team = roster.table().int(pid, "team");
        let rights = roster.table().int(pid, "rights");
        let years = roster.table().int(pid, "years");
        let held_by_team = rights >= 1 && rights <= registry.n_teams() as i64;
        if team != 0 || !held_by_team || years != 0 {
            continue;
        }
        let mut player = roster.player(pid, registry);
        if player.birthdate().map(|b| b < born_before).unwrap_or(false) {
            log::info!("releasing lapsed rights: {}", player.describe());
            player.set_rights(TeamId::NONE);
            released.push(pid);
        }
    }
    released
}

/// Swap aging low performers for young replacements at the same position.
///
/// A veteran qualifies when he sits on a farm roster past `age_min` with a
/// short, cheap tail of a contract and an overall under the cutoff. The
/// replacement pool is younger unsigned free agents with potential; the
/// first pool member matching the veteran's primary position (on either
/// position field) inherits his contract, rights, and raw team value — the
/// farm offset byte included — and the veteran walks as a UFA. A veteran
/// with no positional match is skipped with a warning.
pub fn replace_aging_veterans(
    roster: &mut Roster,
    registry: &TeamRegistry,
    policy: &ReplacementPolicy,
    as_of: NaiveDate,
) -> Vec<(usize, usize)> {
    let n = roster.len();
    let n_teams = registry.n_teams() as i64;
    let birthdates = roster.birthdates();
    let age = |pid: usize| -> Option<i32> {
        birthdates[pid].map(|b| {
            use chrono::Datelike;
            let mut years = as_of.year() - b.year();
            if (as_of.month(), as_of.day()) < (b.month(), b.day()) {
                years -= 1;
            }
            years
        })
    };

    let veterans: Vec<usize> = (0..n)
        .filter(|&pid| {
            let years = roster.table().int(pid, "years");
            age(pid).map(|a| a > policy.age_min).unwrap_or(false)
                && roster.overall(pid) < policy.overall_max
                && roster.table().int(pid, "team") > n_teams
                && years > 0
                && years <= policy.years_max
        })
        .collect();

    let mut pool: Vec<usize> = (0..n)
        .filter(|&pid| {
            age(pid).map(|a| a < policy.age_min - 1).unwrap_or(false)
                && roster.overall(pid) < policy.overall_max
                && roster.table().int(pid, "rights") == TeamId::UFA.0 as i64
                && roster.table().int(pid, "pot") > policy.potential_min
        })
        .collect();

    let mut replaced = Vec::new();
    for vet in veterans {
        let position = roster.table().int(vet, "position");
        let slot = pool.iter().position(|&pid| {
            roster.table().int(pid, "position") == position
                || roster.table().int(pid, "position_alt") == position
        });
        let replacement = match slot {
            Some(i) => pool.remove(i),
            None => {
                log::warn!(
                    "no replacement available for {}; skipping",
                    roster.full_name(vet)
                );
                continue;
            }
        };

        let salary = roster.table().int(vet, "salary");
        let years = roster.table().int(vet, "years");
        let rights = roster.table().int(vet, "rights");
        let team_raw = roster.table().int(vet, "team");

        log::info!(
            "replacing {} with {}",
            roster.full_name(vet),
            roster.full_name(replacement)
        );

        let table = roster.table_mut();
        table.set_int(replacement, "salary", salary);
        table.set_int(replacement, "years", years);
        table.set_int(replacement, "rights", rights);
        table.set_int(replacement, "team", team_raw);
        table.set_int(vet, "rights", TeamId::UFA.0 as i64);
        table.set_int(vet, "team", TeamId::NONE.0 as i64);
        table.set_int(vet, "years", 0);
        replaced.push((vet, replacement));
    }
    replaced
}

/// Call unsigned prospects up for camp: the team field follows their rights
/// and the placeholder contract length flips to one year.
pub fn invite_prospects(roster: &mut Roster) -> usize {
    toggle_prospects(roster, 0, 1, true)
}

/// Send invited prospects back: teamless again, length back to zero.
pub fn return_prospects(roster: &mut Roster) -> usize {
    toggle_prospects(roster, 1, 0, false)
}

fn toggle_prospects(roster: &mut Roster, years_from: i64, years_to: i64, to_rights: bool) -> usize {
    let mut touched = 0;
    for pid in 0..roster.len() {
        if roster.table().int(pid, "years") == years_from
            && roster.table().int(pid, "salary") == SALARY_UNSIGNED
        {
            let team = if to_rights { roster.table().int(pid, "rights") } else { 0 };
            let table = roster.table_mut();
            table.set_int(pid, "years", years_to);
            table.set_int(pid, "team", team);
            touched += 1;
        }
    }
    touched
}

/// Send named players back to junior. Everyone on the list must actually be
/// junior-aged (born after the cutoff) — a miss is a hard error, since the
/// list is hand-curated.
pub fn return_juniors(
    roster: &mut Roster,
    registry: &TeamRegistry,
    names: &[String],
    junior_birthdate: NaiveDate,
) -> Result<(), RosterError> {
    for name in names {
        let pid = roster.find_by_fullname(name)?;
        let mut player = roster.player(pid, registry);
        if !player.is_junior(junior_birthdate) {
            let born = player.birthdate().unwrap_or(junior_birthdate);
            return Err(RosterError::NotAJunior(player.full_name(), born, junior_birthdate));
        }
        player.set_team(TeamId::NONE);
    }
    Ok(())
}

/// Raise sub-minimum salaries to the league floor, leaving the unsigned
/// sentinel alone.
pub fn reset_invalid_salaries(roster: &mut Roster) -> usize {
    let mut fixed = 0;
    for pid in 0..roster.len() {
        let salary = roster.table().int(pid, "salary");
        if salary < SALARY_MIN_LEAGUE && salary != SALARY_UNSIGNED {
            roster.table_mut().set_int(pid, "salary", SALARY_MIN_LEAGUE);
            fixed += 1;
        }
    }
    fixed
}

/// Fighting ratings under 10 destabilize the engine's brawl model; reset
/// them to a neutral 50.
pub fn reset_low_fighting(roster: &mut Roster) -> usize {
    let mut fixed = 0;
    for pid in 0..roster.len() {
        if roster.table().int(pid, "fi") < 10 {
            roster.table_mut().set_int(pid, "fi", 50);
            fixed += 1;
        }
    }
    fixed
}

/// Subtract another roster's rating columns row-for-row, turning the table
/// into a rating delta for save-file comparison.
pub fn diff_ratings(roster: &mut Roster, other: &Roster) -> Result<(), RosterError> {
    if roster.len() != other.len() {
        return Err(RosterError::InconsistentContractState(format!(
            "cannot diff rosters of different sizes ({} vs {})",
            roster.len(),
            other.len()
        )));
    }
    for pid in 0..roster.len() {
        for column in RATING_COLUMNS {
            let delta = roster.table().int(pid, column) - other.table().int(pid, column);
            roster.table_mut().set_int(pid, column, delta);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::fixtures::{empty_roster, push_player, TestPlayer};
    use crate::roster::Position;
    use crate::teams::tests::sample_registry;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn age_release_targets_team_held_rights_only() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let old_held = push_player(
            &mut roster,
            TestPlayer { byear: 1995, rights: 4, ..Default::default() },
        );
        let old_ufa =
            push_player(&mut roster, TestPlayer { byear: 1995, rights: 98, ..Default::default() });
        let young =
            push_player(&mut roster, TestPlayer { byear: 2004, rights: 4, ..Default::default() });

        let released = release_rights_by_age(&mut roster, &registry, 25, date(2024, 7, 1));
        assert_eq!(released, vec![old_held]);
        assert_eq!(roster.table().int(old_held, "rights"), 98);
        assert_eq!(roster.table().int(old_ufa, "rights"), 98);
        assert_eq!(roster.table().int(young, "rights"), 4);
    }

    #[test]
    fn lapsed_release_requires_unsigned_and_teamless() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let lapsed = push_player(
            &mut roster,
            TestPlayer { byear: 2000, team: 0, rights: 9, years: 0, ..Default::default() },
        );
        let signed = push_player(
            &mut roster,
            TestPlayer { byear: 2000, team: 0, rights: 9, years: 2, ..Default::default() },
        );
        let rostered = push_player(
            &mut roster,
            TestPlayer { byear: 2000, team: 9, rights: 9, years: 0, ..Default::default() },
        );

        let released = release_lapsed_rights(&mut roster, &registry, date(2003, 1, 1));
        assert_eq!(released, vec![lapsed]);
        assert_eq!(roster.table().int(lapsed, "rights"), 0);
        assert_eq!(roster.table().int(signed, "rights"), 9);
        assert_eq!(roster.table().int(rostered, "rights"), 9);
    }

    #[test]
    fn veteran_replacement_transfers_contract_and_farm_slot() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let vet = push_player(
            &mut roster,
            TestPlayer {
                first: "Old",
                last: "Grinder",
                byear: 1990,
                team: 35, // farm slot of team 5
                rights: 5,
                years: 1,
                salary: 700_000,
                position: Position::C.raw(),
                ratings: [50; 6],
                ..Default::default()
            },
        );
        let kid = push_player(
            &mut roster,
            TestPlayer {
                first: "Young",
                last: "Gun",
                byear: 2002,
                team: 0,
                rights: 98,
                years: 0,
                salary: 100_000,
                position: Position::LW.raw(),
                position_alt: Position::C.raw(),
                pot: 80,
                ratings: [45; 6],
                ..Default::default()
            },
        );

        let swapped = replace_aging_veterans(
            &mut roster,
            &registry,
            &ReplacementPolicy::default(),
            date(2024, 7, 1),
        );
        assert_eq!(swapped, vec![(vet, kid)]);
        assert_eq!(roster.table().int(kid, "team"), 35);
        assert_eq!(roster.table().int(kid, "rights"), 5);
        assert_eq!(roster.table().int(kid, "salary"), 700_000);
        assert_eq!(roster.table().int(kid, "years"), 1);
        assert_eq!(roster.table().int(vet, "rights"), 98);
        assert_eq!(roster.table().int(vet, "team"), 0);
        assert_eq!(roster.table().int(vet, "years"), 0);
    }

    #[test]
    fn veteran_without_match_is_skipped() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let vet = push_player(
            &mut roster,
            TestPlayer {
                byear: 1990,
                team: 35,
                rights: 5,
                years: 1,
                position: Position::G.raw(),
                position_alt: Position::None.raw(),
                ratings: [50; 6],
                ..Default::default()
            },
        );
        push_player(
            &mut roster,
            TestPlayer {
                byear: 2002,
                rights: 98,
                years: 0,
                position: Position::D.raw(),
                pot: 80,
                ratings: [45; 6],
                ..Default::default()
            },
        );

        let swapped = replace_aging_veterans(
            &mut roster,
            &registry,
            &ReplacementPolicy::default(),
            date(2024, 7, 1),
        );
        assert!(swapped.is_empty());
        // Veteran untouched.
        assert_eq!(roster.table().int(vet, "years"), 1);
    }

    #[test]
    fn prospect_invite_and_return_round_trip() {
        let mut roster = empty_roster();
        let prospect = push_player(
            &mut roster,
            TestPlayer { salary: 100_000, years: 0, team: 0, rights: 7, ..Default::default() },
        );
        let signed = push_player(
            &mut roster,
            TestPlayer { salary: 800_000, years: 0, team: 0, rights: 7, ..Default::default() },
        );

        assert_eq!(invite_prospects(&mut roster), 1);
        assert_eq!(roster.table().int(prospect, "years"), 1);
        assert_eq!(roster.table().int(prospect, "team"), 7);
        assert_eq!(roster.table().int(signed, "years"), 0);

        assert_eq!(return_prospects(&mut roster), 1);
        assert_eq!(roster.table().int(prospect, "years"), 0);
        assert_eq!(roster.table().int(prospect, "team"), 0);
    }

    #[test]
    fn junior_return_rejects_non_juniors() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        push_player(
            &mut roster,
            TestPlayer { first: "Teen", last: "Star", byear: 2006, team: 3, ..Default::default() },
        );
        push_player(
            &mut roster,
            TestPlayer { first: "Grown", last: "Man", byear: 1998, team: 3, ..Default::default() },
        );

        let cutoff = date(2004, 9, 16);
        return_juniors(&mut roster, &registry, &["Teen Star".to_string()], cutoff).unwrap();
        assert_eq!(roster.table().int(0, "team"), 0);

        assert!(matches!(
            return_juniors(&mut roster, &registry, &["Grown Man".to_string()], cutoff),
            Err(RosterError::NotAJunior(..))
        ));
        assert_eq!(roster.table().int(1, "team"), 3);
    }

    #[test]
    fn salary_reset_spares_the_unsigned_sentinel() {
        let mut roster = empty_roster();
        let low = push_player(&mut roster, TestPlayer { salary: 400_000, ..Default::default() });
        let unsigned =
            push_player(&mut roster, TestPlayer { salary: 100_000, ..Default::default() });
        let fine = push_player(&mut roster, TestPlayer { salary: 700_000, ..Default::default() });

        assert_eq!(reset_invalid_salaries(&mut roster), 1);
        assert_eq!(roster.table().int(low, "salary"), 600_000);
        assert_eq!(roster.table().int(unsigned, "salary"), 100_000);
        assert_eq!(roster.table().int(fine, "salary"), 700_000);
    }

    #[test]
    fn fighting_reset() {
        let mut roster = empty_roster();
        let pid = push_player(&mut roster, TestPlayer::default());
        roster.table_mut().set_int(pid, "fi", 3);
        assert_eq!(reset_low_fighting(&mut roster), 1);
        assert_eq!(roster.table().int(pid, "fi"), 50);
    }

    #[test]
    fn rating_diff_subtracts_columns() {
        let mut a = empty_roster();
        push_player(&mut a, TestPlayer { ratings: [60; 6], pot: 70, ..Default::default() });
        let mut b = empty_roster();
        push_player(&mut b, TestPlayer { ratings: [55; 6], pot: 72, ..Default::default() });

        diff_ratings(&mut a, &b).unwrap();
        assert_eq!(a.table().int(0, "sh"), 5);
        assert_eq!(a.table().int(0, "pot"), -2);
    }

    #[test]
    fn rating_diff_rejects_size_mismatch() {
        let mut a = empty_roster();
        push_player(&mut a, TestPlayer::default());
        let b = empty_roster();
        assert!(diff_ratings(&mut a, &b).is_err());
    }
}
