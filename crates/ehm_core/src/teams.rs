//! League team registry.
//!
//! Team identity lives in the save files as small integers: real teams use a
//! dense `1..=n` range, and three sentinels cover "no team", unrestricted
//! free agency, and undrafted prospects. Farm assignment is encoded on disk
//! as `id + n`, which [`TeamRegistry::resolve_roster`] untangles. The
//! registry is built once from the league config file and passed by
//! reference everywhere; nothing mutates it after load.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::encoding;
use crate::error::{FormatError, RosterError};

/// Terminator between the main-team blocks and the farm-team pairs.
const SENTINEL: &str = "---------------- End of NHL teams ----------------";

/// League size the config format is written for.
pub const N_TEAMS: usize = 30;

/// A team slot in the league id space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(pub u8);

impl TeamId {
    /// No team at all (unsigned prospects, released players).
    pub const NONE: TeamId = TeamId(0);
    /// Unrestricted free agent.
    pub const UFA: TeamId = TeamId(98);
    /// Undrafted prospect pool.
    pub const UNDRAFTED: TeamId = TeamId(99);

    pub fn is_sentinel(self) -> bool {
        matches!(self, TeamId::NONE | TeamId::UFA | TeamId::UNDRAFTED)
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Static metadata for one franchise and its farm affiliate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInfo {
    pub name: String,
    pub acronym: String,
    pub arena_name: String,
    pub arena_capacity: u32,
    pub division: u8,
    pub id: TeamId,
    pub farm_name: String,
    pub farm_acronym: String,
    pub farm_id: u8,
}

/// Immutable id/acronym lookup for the whole league.
#[derive(Debug, Clone)]
pub struct TeamRegistry {
    teams: Vec<TeamInfo>,
    by_acronym: HashMap<String, TeamId>,
}

impl TeamRegistry {
    pub fn new(teams: Vec<TeamInfo>) -> Self {
        let by_acronym = teams.iter().map(|t| (t.acronym.clone(), t.id)).collect();
        Self { teams, by_acronym }
    }

    /// Load the plain-text league config: `n` five-line blocks (name,
    /// acronym, arena name, arena capacity, division), the exact sentinel
    /// line, then one (farm name, farm acronym) pair per team in order.
    pub fn load(path: &Path) -> Result<Self, FormatError> {
        let text = encoding::decode(&std::fs::read(path)?);
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, FormatError> {
        let mut lines = text.lines();
        let mut next = |what: &str| {
            lines
                .next()
                .map(str::trim)
                .ok_or_else(|| FormatError::TeamConfig(format!("unexpected end of file at {}", what)))
        };

        let mut teams = Vec::with_capacity(N_TEAMS);
        for id in 1..=N_TEAMS {
            let name = next("team name")?.to_string();
            let acronym = next("team acronym")?.to_string();
            let arena_name = next("arena name")?.to_string();
            let capacity_line = next("arena capacity")?;
            let arena_capacity = capacity_line.parse().map_err(|_| {
                FormatError::TeamConfig(format!("arena capacity `{}` is not a number", capacity_line))
            })?;
            let division_line = next("division")?;
            let division = division_line.parse().map_err(|_| {
                FormatError::TeamConfig(format!("division `{}` is not a number", division_line))
            })?;
            teams.push(TeamInfo {
                name,
                acronym,
                arena_name,
                arena_capacity,
                division,
                id: TeamId(id as u8),
                farm_name: String::new(),
                farm_acronym: String::new(),
                farm_id: (id + N_TEAMS) as u8,
            });
        }

        let sentinel = next("sentinel")?;
        if sentinel != SENTINEL {
            return Err(FormatError::TeamConfig(format!(
                "expected sentinel `{}`, found `{}`",
                SENTINEL, sentinel
            )));
        }

        for team in &mut teams {
            team.farm_name = next("farm name")?.to_string();
            team.farm_acronym = next("farm acronym")?.to_string();
        }

        Ok(Self::new(teams))
    }

    pub fn n_teams(&self) -> usize {
        self.teams.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TeamInfo> {
        self.teams.iter()
    }

    pub fn info(&self, id: TeamId) -> Option<&TeamInfo> {
        (1..=self.teams.len() as u8)
            .contains(&id.0)
            .then(|| &self.teams[id.0 as usize - 1])
    }

    /// Display name for result lines and logs.
    pub fn label(&self, id: TeamId) -> &str {
        match id {
            TeamId::NONE => "none",
            TeamId::UFA => "UFA",
            TeamId::UNDRAFTED => "Undrafted",
            other => self.info(other).map(|t| t.acronym.as_str()).unwrap_or("?"),
        }
    }

    pub fn by_acronym(&self, acronym: &str) -> Option<TeamId> {
        match acronym {
            "none" => Some(TeamId::NONE),
            "UFA" => Some(TeamId::UFA),
            "Undrafted" => Some(TeamId::UNDRAFTED),
            other => self.by_acronym.get(other).copied(),
        }
    }

    /// Validate a raw integer field into a [`TeamId`].
    pub fn resolve(&self, raw: i64) -> Result<TeamId, RosterError> {
        let id = TeamId(u8::try_from(raw).map_err(|_| self.domain_error(raw))?);
        if id.is_sentinel() || self.info(id).is_some() {
            Ok(id)
        } else {
            Err(self.domain_error(raw))
        }
    }

    /// Validate a raw roster `team` field, tolerating the on-disk farm
    /// offset (`id + n_teams`). Returns the base id and whether the player
    /// sits on the farm roster.
    pub fn resolve_roster(&self, raw: i64) -> Result<(TeamId, bool), RosterError> {
        if let Ok(id) = self.resolve(raw) {
            return Ok((id, false));
        }
        let n = self.teams.len() as i64;
        if raw > n && raw <= 2 * n {
            Ok((TeamId((raw - n) as u8), true))
        } else {
            Err(self.domain_error(raw))
        }
    }

    fn domain_error(&self, raw: i64) -> RosterError {
        RosterError::InvalidEnumValue { field: "team", value: raw, domain: "team id" }
    }
}
