//! Parsers for the hand-written contract action files.
//!
//! These files are typed up by league managers, so the grammar is loose:
//! `"First Last 1.2M 3Y T04"`, `"First Last 3Y 1.2M"`, `"First Last 3Y"`
//! (salary defaulting to the floor for that length), and bare names for
//! entry-level lists all parse. Anything that fits none of the accepted
//! shapes is a hard error naming the line — silently guessing at money is
//! worse than stopping.

use std::collections::BTreeMap;

use crate::contracts::{min_salary, Contract, SALARY_MAX_LEAGUE};
use crate::error::RosterError;
use crate::teams::TeamRegistry;

/// Which action file is being read; decides the accepted token shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractFileMode {
    /// One player name per line; the engine computes the ELC itself.
    EntryLevel,
    /// `Name [salary] length` — re-signing a rostered player.
    Extension,
    /// `Name [salary] length team` — free-agent signing.
    Signing,
}

/// `"3y"` / `"3Y"` -> 3.
pub fn parse_length(token: &str) -> Result<i64, RosterError> {
    let lower = token.to_lowercase();
    let digits = lower
        .strip_suffix('y')
        .ok_or_else(|| RosterError::ParseInput(format!("`{}` is not a contract length", token)))?;
    digits
        .parse()
        .map_err(|_| RosterError::ParseInput(format!("`{}` is not a contract length", token)))
}

/// `"1.2m"` / `"700k"` / `"700000"` -> whole currency units.
pub fn parse_salary(token: &str) -> Result<i64, RosterError> {
    let lower = token.to_lowercase();
    let bad = || RosterError::ParseInput(format!("`{}` is not a salary", token));
    let (digits, scale) = match lower.chars().last() {
        Some('m') => (&lower[..lower.len() - 1], 1_000_000.0),
        Some('k') => (&lower[..lower.len() - 1], 1_000.0),
        Some(c) if c.is_ascii_alphabetic() => return Err(bad()),
        Some(_) => (lower.as_str(), 1.0),
        None => return Err(bad()),
    };
    let value: f64 = digits.parse().map_err(|_| bad())?;
    Ok((value * scale).round() as i64)
}

/// Parse one contract action file into proposals for
/// [`crate::contracts::enter_contracts`].
///
/// When the salary token is absent the floor for the written length stands
/// in, clamped into the player's own floor band when a floor table was
/// supplied.
pub fn parse_contract_lines(
    text: &str,
    mode: ContractFileMode,
    registry: &TeamRegistry,
    floors: Option<&BTreeMap<String, i64>>,
) -> Result<BTreeMap<String, Option<Contract>>, RosterError> {
    let mut proposals = BTreeMap::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        if mode == ContractFileMode::EntryLevel {
            proposals.insert(line.to_string(), None);
            continue;
        }

        let mut tokens: Vec<&str> = line.split_whitespace().collect();
        let team = if mode == ContractFileMode::Signing {
            let token = tokens
                .pop()
                .ok_or_else(|| RosterError::ParseInput(format!("empty signing entry `{}`", line)))?;
            let team = match token.parse::<i64>() {
                Ok(raw) => registry.resolve(raw).ok(),
                Err(_) => registry.by_acronym(token),
            };
            Some(team.ok_or_else(|| {
                RosterError::ParseInput(format!("unknown team `{}` in `{}`", token, line))
            })?)
        } else {
            None
        };

        let last = tokens
            .last()
            .copied()
            .ok_or_else(|| RosterError::ParseInput(format!("incomplete entry `{}`", line)))?;
        let (salary, years, consumed, clamp_to_floor) = match parse_length(last) {
            Ok(years) => {
                let prev = tokens.len().checked_sub(2).map(|i| tokens[i]);
                match prev.map(parse_salary) {
                    Some(Ok(salary)) => (salary, years, 2, false),
                    // No explicit salary: fall back to the floor for this
                    // length.
                    _ => (min_salary(years)?, years, 1, floors.is_some()),
                }
            }
            // Salary written last: `Name 3y 1.2m`.
            Err(_) => {
                let salary = parse_salary(last)?;
                let prev = tokens
                    .len()
                    .checked_sub(2)
                    .map(|i| tokens[i])
                    .ok_or_else(|| RosterError::ParseInput(format!("incomplete entry `{}`", line)))?;
                let years = parse_length(prev)?;
                (salary, years, 2, false)
            }
        };
        tokens.truncate(tokens.len() - consumed);
        if tokens.is_empty() {
            return Err(RosterError::ParseInput(format!("no player name in `{}`", line)));
        }
        let name = tokens.join(" ");

        let salary = if clamp_to_floor {
            match floors.and_then(|f| f.get(&name).copied()) {
                Some(floor) => floor.max(salary).min(SALARY_MAX_LEAGUE),
                None => salary,
            }
        } else {
            salary
        };

        proposals.insert(name, Some(Contract { salary, years, team }));
    }
    Ok(proposals)
}

/// Per-player minimum-salary table: CSV with NAME, UFA, RFA (in millions)
/// and a UFA? flag choosing which column binds.
pub fn parse_salary_floors(text: &str) -> Result<BTreeMap<String, i64>, RosterError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(text.as_bytes());
    let headers = reader
        .headers()
        .map_err(|e| RosterError::ParseInput(format!("salary floor table: {}", e)))?
        .clone();
    let index_of = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| RosterError::ParseInput(format!("salary floor table missing `{}`", name)))
    };
    let name_idx = index_of("NAME")?;
    let ufa_idx = index_of("UFA")?;
    let rfa_idx = index_of("RFA")?;
    let flag_idx = index_of("UFA?")?;

    let mut floors = BTreeMap::new();
    for (row, record) in reader.records().enumerate() {
        let record =
            record.map_err(|e| RosterError::ParseInput(format!("salary floor table: {}", e)))?;
        let cell = |idx: usize| record.get(idx).unwrap_or("").trim();
        let is_ufa = matches!(cell(flag_idx).to_lowercase().as_str(), "true" | "1" | "yes");
        let millions_text = cell(if is_ufa { ufa_idx } else { rfa_idx });
        let millions: f64 = millions_text.parse().map_err(|_| {
            RosterError::ParseInput(format!(
                "salary floor table row {}: `{}` is not a salary in millions",
                row + 2,
                millions_text
            ))
        })?;
        floors.insert(cell(name_idx).to_string(), (millions * 1_000_000.0).round() as i64);
    }
    Ok(floors)
}

/// Qualifying-offer list: one `TEAM - First Last` entry per line.
pub fn parse_qualifier_bids(text: &str) -> Result<Vec<(String, String)>, RosterError> {
    let mut bids = Vec::new();
    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let (team, name) = line.split_once(" - ").ok_or_else(|| {
            RosterError::ParseInput(format!("qualifying offer `{}` is not `TEAM - Name`", line))
        })?;
        bids.push((team.trim().to_string(), name.trim().to_string()));
    }
    Ok(bids)
}

/// Plain list of player names, one per line, blanks skipped.
pub fn parse_name_list(text: &str) -> Vec<String> {
    text.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_string).collect()
}
