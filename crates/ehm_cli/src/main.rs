//! Batch roster/contract tool.
//!
//! Loads the league config and a roster save, applies the requested
//! maintenance and contract operations in a fixed order, prints the
//! collected warning/error/result lists, and writes the modified save only
//! when no errors were collected.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Datelike, NaiveDate};
use clap::Parser;

use ehm_core::codec::encoding;
use ehm_core::contracts::{self, parse::ContractFileMode};
use ehm_core::roster::{ops, retirement};
use ehm_core::{BatchOutcome, Roster, TeamRegistry};

#[derive(Parser)]
#[command(name = "ehm")]
#[command(about = "Process EHM league save files", long_about = None)]
struct Cli {
    /// Roster save file (.ehm or .csv)
    #[arg(long)]
    players: PathBuf,

    /// League team config file
    #[arg(long)]
    config_teams: PathBuf,

    /// Write the modified roster here (skipped if any errors were collected)
    #[arg(long)]
    output: Option<PathBuf>,

    /// strftime-style format for the date arguments below
    #[arg(long, default_value = "%Y/%m/%d")]
    date_format: String,

    /// Entry-level signing list (one player name per line)
    #[arg(long)]
    elcs: Option<PathBuf>,

    /// Re-signing list (`Name [salary] length` per line)
    #[arg(long)]
    extensions: Option<PathBuf>,

    /// Free-agent signing list (`Name [salary] length team` per line)
    #[arg(long)]
    signings: Option<PathBuf>,

    /// Per-player minimum-salary table (CSV: NAME, UFA, RFA, UFA?)
    #[arg(long)]
    salaries_min: Option<PathBuf>,

    /// Most recent completed draft year, for ELC consistency checks
    #[arg(long)]
    draft_year_last: Option<i64>,

    /// Contract-slide eligible list (one player name per line)
    #[arg(long)]
    slide_eligible: Option<PathBuf>,

    /// Names excluded from sliding
    #[arg(long)]
    slide_ineligible: Option<PathBuf>,

    /// Qualifying-offer list (`TEAM - Name` per line)
    #[arg(long)]
    qualified_rfas: Option<PathBuf>,

    /// Run the three-stage retirement pass
    #[arg(long)]
    retire_players: bool,

    /// Clear every retired flag
    #[arg(long)]
    unretire: bool,

    /// Juniors-return list (one player name per line)
    #[arg(long)]
    return_juniors: Option<PathBuf>,

    /// Birthdate cutoff for junior eligibility
    #[arg(long)]
    junior_birthdate: Option<String>,

    /// Drop lapsed draft rights to unsigned players born before this date
    #[arg(long)]
    release_rights_date: Option<String>,

    /// Swap aging low performers for young replacements
    #[arg(long)]
    replace_vopatizers: bool,

    /// Raise sub-minimum salaries to the league floor
    #[arg(long)]
    reset_invalid_salaries: bool,

    /// Leave low fighting ratings alone
    #[arg(long)]
    skip_reset_low_fighting: bool,

    /// Call unsigned prospects up for camp
    #[arg(long, conflicts_with = "return_prospects")]
    invite_prospects: bool,

    /// Send invited prospects back
    #[arg(long)]
    return_prospects: bool,

    /// Subtract this roster's rating columns (save-file comparison)
    #[arg(long)]
    difference: Option<PathBuf>,
}

fn read_text(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    Ok(encoding::decode(&bytes))
}

fn parse_date(text: &str, format: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text, format)
        .with_context(|| format!("`{}` does not match date format `{}`", text, format))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let registry = TeamRegistry::load(&cli.config_teams)
        .with_context(|| format!("failed to load {}", cli.config_teams.display()))?;
    let mut roster = Roster::read(&cli.players)
        .with_context(|| format!("failed to load {}", cli.players.display()))?;
    println!("loaded {} players from {}", roster.len(), cli.players.display());

    let today = chrono::Local::now().date_naive();

    if cli.retire_players {
        let date = retirement::season_reference_date(today.year());
        let policy = retirement::RetirementPolicy::default();
        let retiring = retirement::find_retirees(&roster, date, &policy)?;
        let pids: Vec<usize> =
            retiring.iter().enumerate().filter(|(_, r)| **r).map(|(pid, _)| pid).collect();
        println!("retiring {} players", pids.len());
        ops::retire(&mut roster, &pids);
    }

    if cli.unretire {
        let cleared = ops::unretire_all(&mut roster);
        println!("cleared the retired flag on {} players", cleared);
    }

    let floors = match &cli.salaries_min {
        Some(path) => Some(contracts::parse::parse_salary_floors(&read_text(path)?)?),
        None => None,
    };

    let mut outcome = BatchOutcome::default();
    let contract_files = [
        (&cli.elcs, ContractFileMode::EntryLevel),
        (&cli.extensions, ContractFileMode::Extension),
        (&cli.signings, ContractFileMode::Signing),
    ];
    for (path, mode) in contract_files {
        let Some(path) = path else { continue };
        let file_floors =
            if mode == ContractFileMode::EntryLevel { None } else { floors.as_ref() };
        let proposals = contracts::parse::parse_contract_lines(
            &read_text(path)?,
            mode,
            &registry,
            file_floors,
        )?;
        let cutoff =
            if mode == ContractFileMode::EntryLevel { cli.draft_year_last } else { None };
        outcome.merge(contracts::enter_contracts(
            &mut roster,
            &registry,
            &proposals,
            floors.as_ref(),
            cutoff,
        ));
    }

    if let Some(path) = &cli.slide_eligible {
        let eligible = contracts::parse::parse_name_list(&read_text(path)?);
        let ineligible = match &cli.slide_ineligible {
            Some(path) => contracts::parse::parse_name_list(&read_text(path)?),
            None => Vec::new(),
        };
        outcome.merge(contracts::slide_contracts(
            &mut roster,
            &registry,
            &eligible,
            &ineligible,
            None,
        ));
    }

    if let Some(cutoff) = cli.draft_year_last {
        outcome.warnings.extend(contracts::audit_unsigned_boosters(&roster, cutoff));
    }

    if !outcome.warnings.is_empty() {
        println!("Warnings:");
        for warning in &outcome.warnings {
            println!("{}", warning);
        }
    }
    if !outcome.errors.is_empty() {
        println!("Errors:");
        for error in &outcome.errors {
            println!("{}", error);
        }
    } else if !outcome.results.is_empty() {
        println!("Results:");
        for result in &outcome.results {
            println!("{}", result);
        }
        for line in contracts::summarize_signings(&roster, &registry, &outcome.applied) {
            println!("{}", line);
        }
    }

    if cli.invite_prospects {
        println!("invited {} prospects", ops::invite_prospects(&mut roster));
    }
    if cli.return_prospects {
        println!("returned {} prospects", ops::return_prospects(&mut roster));
    }

    if let Some(path) = &cli.qualified_rfas {
        let bids = contracts::parse::parse_qualifier_bids(&read_text(path)?)?;
        for line in contracts::sign_qualifiers(&mut roster, &registry, &bids)? {
            println!("{}", line);
        }
    }

    if let Some(path) = &cli.return_juniors {
        let Some(cutoff_text) = &cli.junior_birthdate else {
            bail!("--return-juniors requires --junior-birthdate");
        };
        let cutoff = parse_date(cutoff_text, &cli.date_format)?;
        let names = contracts::parse::parse_name_list(&read_text(path)?);
        ops::return_juniors(&mut roster, &registry, &names, cutoff)?;
        println!("returned {} juniors", names.len());
    }

    if cli.reset_invalid_salaries {
        println!("reset {} invalid salaries", ops::reset_invalid_salaries(&mut roster));
    }

    if !cli.skip_reset_low_fighting {
        let fixed = ops::reset_low_fighting(&mut roster);
        if fixed > 0 {
            println!("reset {} low fighting ratings", fixed);
        }
    }

    if cli.replace_vopatizers {
        let swapped = ops::replace_aging_veterans(
            &mut roster,
            &registry,
            &ops::ReplacementPolicy::default(),
            today,
        );
        println!("replaced {} aging veterans", swapped.len());
    }

    if let Some(date_text) = &cli.release_rights_date {
        let born_before = parse_date(date_text, &cli.date_format)?;
        let released = ops::release_lapsed_rights(&mut roster, &registry, born_before);
        println!("released lapsed rights on {} players", released.len());
    }

    if let Some(path) = &cli.difference {
        let other = Roster::read(path)
            .with_context(|| format!("failed to load {}", path.display()))?;
        ops::diff_ratings(&mut roster, &other)?;
        println!("subtracted ratings from {}", path.display());
    }

    if let Some(path) = &cli.output {
        if outcome.has_errors() {
            println!(
                "not writing {}: {} errors collected above",
                path.display(),
                outcome.errors.len()
            );
        } else {
            println!("writing modified file to: {}", path.display());
            let failures = roster.write(path)?;
            for failure in &failures {
                println!(
                    "record {} group {} failed to encode: {}",
                    failure.record, failure.group, failure.reason
                );
            }
            if !failures.is_empty() {
                bail!("{} records failed to encode; output is partial", failures.len());
            }
        }
    }

    Ok(())
}
