//! Game schedule table: the 2-line-per-game instantiation of the same
//! fixed-record codec the roster uses.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::codec::{encoding, EncodeFailure, GroupKind, LineGroup, RecordSchema, RecordTable};
use crate::error::{FormatError, RosterError};
use crate::teams::{TeamId, TeamRegistry};

/// Regular-season games per team.
pub const N_GAMES_REG: usize = 82;

pub static SCHEDULE_SCHEMA: RecordSchema = RecordSchema {
    name: "schedule",
    groups: &[
        LineGroup {
            name: "game",
            fields: &["day", "month", "year", "team_home", "team_away", "status", "type"],
            kind: GroupKind::Integers,
        },
        LineGroup { name: "goals", fields: &["goals_home", "goals_away"], kind: GroupKind::Integers },
    ],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Unplayed,
    Regulation,
    Overtime,
}

impl GameStatus {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(GameStatus::Unplayed),
            1 => Some(GameStatus::Regulation),
            2 => Some(GameStatus::Overtime),
            _ => None,
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            GameStatus::Unplayed => 0,
            GameStatus::Regulation => 1,
            GameStatus::Overtime => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameType {
    None,
    RegularOrPreseason,
    Playoff,
    Special,
}

impl GameType {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(GameType::None),
            1 => Some(GameType::RegularOrPreseason),
            4 => Some(GameType::Playoff),
            5 => Some(GameType::Special),
            _ => None,
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            GameType::None => 0,
            GameType::RegularOrPreseason => 1,
            GameType::Playoff => 4,
            GameType::Special => 5,
        }
    }
}

#[derive(Debug)]
pub struct Schedule {
    table: RecordTable,
}

impl Schedule {
    pub fn read(path: &Path) -> Result<Self, FormatError> {
        let text = encoding::decode(&std::fs::read(path)?);
        match path.extension().and_then(|e| e.to_str()) {
            Some("ehm") => Self::parse_fixed(&text),
            Some("csv") => Self::parse_csv(&text),
            _ => Err(FormatError::UnknownExtension(path.display().to_string())),
        }
    }

    pub fn write(&self, path: &Path) -> Result<Vec<EncodeFailure>, FormatError> {
        let (text, failures) = match path.extension().and_then(|e| e.to_str()) {
            Some("ehm") => self.table.encode(),
            Some("csv") => (self.table.to_csv()?, Vec::new()),
            _ => return Err(FormatError::UnknownExtension(path.display().to_string())),
        };
        std::fs::write(path, encoding::encode(&text))?;
        Ok(failures)
    }

    pub fn parse_fixed(text: &str) -> Result<Self, FormatError> {
        Ok(Self { table: RecordTable::decode(&SCHEDULE_SCHEMA, text)? })
    }

    pub fn parse_csv(text: &str) -> Result<Self, FormatError> {
        Ok(Self { table: RecordTable::from_csv(&SCHEDULE_SCHEMA, text)? })
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn table(&self) -> &RecordTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut RecordTable {
        &mut self.table
    }

    pub fn game<'a>(&'a mut self, index: usize, registry: &'a TeamRegistry) -> GameView<'a> {
        GameView { table: &mut self.table, registry, index }
    }
}

/// Typed accessor over one game row.
pub struct GameView<'a> {
    table: &'a mut RecordTable,
    registry: &'a TeamRegistry,
    index: usize,
}

impl<'a> GameView<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(
            i32::try_from(self.table.int(self.index, "year")).ok()?,
            u32::try_from(self.table.int(self.index, "month")).ok()?,
            u32::try_from(self.table.int(self.index, "day")).ok()?,
        )
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        use chrono::Datelike;
        self.table.set_int(self.index, "year", date.year() as i64);
        self.table.set_int(self.index, "month", date.month() as i64);
        self.table.set_int(self.index, "day", date.day() as i64);
    }

    pub fn home(&self) -> Result<TeamId, RosterError> {
        self.registry.resolve(self.table.int(self.index, "team_home"))
    }

    pub fn away(&self) -> Result<TeamId, RosterError> {
        self.registry.resolve(self.table.int(self.index, "team_away"))
    }

    pub fn status(&self) -> Result<GameStatus, RosterError> {
        let raw = self.table.int(self.index, "status");
        GameStatus::from_raw(raw).ok_or(RosterError::InvalidEnumValue {
            field: "status",
            value: raw,
            domain: "game status",
        })
    }

    pub fn set_status(&mut self, status: GameStatus) {
        self.table.set_int(self.index, "status", status.raw());
    }

    pub fn game_type(&self) -> Result<GameType, RosterError> {
        let raw = self.table.int(self.index, "type");
        GameType::from_raw(raw).ok_or(RosterError::InvalidEnumValue {
            field: "type",
            value: raw,
            domain: "game type",
        })
    }

    pub fn set_game_type(&mut self, game_type: GameType) {
        self.table.set_int(self.index, "type", game_type.raw());
    }

    pub fn goals(&self) -> (i64, i64) {
        (self.table.int(self.index, "goals_home"), self.table.int(self.index, "goals_away"))
    }

    pub fn set_goals(&mut self, home: i64, away: i64) {
        self.table.set_int(self.index, "goals_home", home);
        self.table.set_int(self.index, "goals_away", away);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::tests::sample_registry;

    fn sample_text() -> &'static str {
        " 2 \n 14  10  2023  1  2  0  1 \n 0  0 \n 24  12  2023  30  15  2  1 \n 4  3 \n"
    }

    #[test]
    fn parses_and_exposes_games() {
        let registry = sample_registry();
        let mut schedule = Schedule::parse_fixed(sample_text()).unwrap();
        assert_eq!(schedule.len(), 2);

        let game = schedule.game(1, &registry);
        assert_eq!(game.date(), NaiveDate::from_ymd_opt(2023, 12, 24));
        assert_eq!(game.home().unwrap(), TeamId(30));
        assert_eq!(game.away().unwrap(), TeamId(15));
        assert_eq!(game.status().unwrap(), GameStatus::Overtime);
        assert_eq!(game.game_type().unwrap(), GameType::RegularOrPreseason);
        assert_eq!(game.goals(), (4, 3));
    }

    #[test]
    fn round_trips_through_encode() {
        let schedule = Schedule::parse_fixed(sample_text()).unwrap();
        let (text, failures) = schedule.table().encode();
        assert!(failures.is_empty());
        assert_eq!(text, sample_text());
    }

    #[test]
    fn mutation_writes_through() {
        let registry = sample_registry();
        let mut schedule = Schedule::parse_fixed(sample_text()).unwrap();
        {
            let mut game = schedule.game(0, &registry);
            game.set_goals(5, 2);
            game.set_status(GameStatus::Regulation);
            game.set_date(NaiveDate::from_ymd_opt(2023, 10, 15).unwrap());
        }
        assert_eq!(schedule.table().int(0, "goals_home"), 5);
        assert_eq!(schedule.table().int(0, "status"), 1);
        assert_eq!(schedule.table().int(0, "day"), 15);
    }

    #[test]
    fn unknown_enum_values_error() {
        let registry = sample_registry();
        let text = " 1 \n 14  10  2023  1  2  3  7 \n 0  0 \n";
        let mut schedule = Schedule::parse_fixed(text).unwrap();
        let game = schedule.game(0, &registry);
        assert!(matches!(game.status(), Err(RosterError::InvalidEnumValue { .. })));
        assert!(matches!(game.game_type(), Err(RosterError::InvalidEnumValue { .. })));
    }
}
