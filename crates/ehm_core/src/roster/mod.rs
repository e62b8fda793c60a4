//! Player roster table and its typed accessor view.
//!
//! The roster is one [`RecordTable`] decoded from the 20-line-per-player
//! save format (or its CSV alternate). [`PlayerView`] is the only way the
//! rest of the crate touches a player row: every enum-valued field is
//! validated on read and write, and the farm-team offset quirk of the `team`
//! field is resolved here and nowhere else.

pub mod ops;
pub mod retirement;

use std::fmt::Write as _;
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::codec::{encoding, EncodeFailure, GroupKind, LineGroup, RecordSchema, RecordTable};
use crate::error::{FormatError, RosterError};
use crate::teams::{TeamId, TeamRegistry};

/// The 20-line player record layout, in file order.
pub static PLAYER_SCHEMA: RecordSchema = RecordSchema {
    name: "players",
    groups: &[
        LineGroup {
            name: "ratings",
            fields: &["sh", "pl", "st", "ch", "po", "hi", "sk", "en", "pe", "fa"],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "attributes",
            fields: &[
                "le", "str", "pot", "con", "gre", "fi", "click", "team", "position", "country",
                "hand",
            ],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "contract",
            fields: &[
                "byear",
                "bday",
                "bmonth",
                "salary",
                "years",
                "draft_year",
                "draft_round",
                "draft_team",
                "rights",
            ],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "week",
            fields: &["thisweek_gp", "thisweek_g", "thisweek_a", "thisweek_gwg"],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "month",
            fields: &["thismonth_gp", "thismonth_g", "thismonth_a", "thismonth_gwg"],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "records",
            fields: &["records_g", "records_a", "records_p", "notrade", "twoway", "option"],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "status",
            fields: &["status", "rookie", "offer_status", "offer_team", "offer_time", "injury_status"],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "scout_a",
            fields: &[
                "scout_1", "scout_2", "scout_3", "scout_4", "scout_5", "scout_6", "scout_7",
                "scout_8", "scout_9", "scout_10",
            ],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "scout_b",
            fields: &[
                "scout_11", "scout_12", "scout_13", "scout_14", "scout_15", "scout_16", "scout_17",
                "scout_18", "scout_19", "scout_20",
            ],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "scout_c",
            fields: &[
                "scout_21", "scout_22", "scout_23", "scout_24", "scout_25", "scout_26", "scout_27",
                "scout_28", "scout_29", "scout_30",
            ],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "streak",
            fields: &[
                "streak_g", "streak_p", "gp", "suspension", "training", "weight", "height",
                "status_org",
            ],
            kind: GroupKind::Integers,
        },
        LineGroup {
            name: "streak_best",
            fields: &[
                "streak_best_gp",
                "streak_best_gwg",
                "streak_best_p",
                "streak_best_a",
                "streak_best_g",
            ],
            kind: GroupKind::Integers,
        },
        LineGroup { name: "unused", fields: &["unused"], kind: GroupKind::Verbatim },
        LineGroup { name: "name", fields: &["name_first", "name_last"], kind: GroupKind::NamePair },
        LineGroup { name: "performance", fields: &["performance"], kind: GroupKind::Verbatim },
        LineGroup { name: "acquired", fields: &["acquired"], kind: GroupKind::Verbatim },
        LineGroup {
            name: "ceilings",
            fields: &[
                "ceil_fi", "ceil_sh", "ceil_pl", "ceil_st", "ceil_ch", "ceil_po", "ceil_hi",
                "ceil_sk", "ceil_en", "ceil_pe", "ceil_fa", "ceil_le", "ceil_str",
            ],
            kind: GroupKind::PackedWidth3,
        },
        LineGroup { name: "version_1", fields: &["version_1"], kind: GroupKind::Verbatim },
        LineGroup { name: "version_2", fields: &["version_2"], kind: GroupKind::Verbatim },
        LineGroup {
            name: "extra",
            fields: &["attitude", "position_alt", "rights_2", "injury_prone", "draft_overall"],
            kind: GroupKind::Integers,
        },
    ],
};

/// The six core skills averaged into a player's overall rating.
pub const OVERALL_COLUMNS: [&str; 6] = ["sh", "pl", "st", "ch", "po", "hi"];

/// Skill/potential columns carried by the rating-diff operation.
pub const RATING_COLUMNS: [&str; 16] = [
    "sh", "pl", "st", "ch", "po", "hi", "sk", "en", "pe", "fa", "le", "str", "pot", "con", "gre",
    "fi",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    None,
    G,
    D,
    LW,
    C,
    RW,
}

impl Position {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Position::None),
            1 => Some(Position::G),
            2 => Some(Position::D),
            3 => Some(Position::LW),
            4 => Some(Position::C),
            5 => Some(Position::RW),
            _ => None,
        }
    }

    pub fn raw(self) -> i64 {
        match self {
            Position::None => 0,
            Position::G => 1,
            Position::D => 2,
            Position::LW => 3,
            Position::C => 4,
            Position::RW => 5,
        }
    }

    pub fn is_goalie(self) -> bool {
        matches!(self, Position::G)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Right,
    Left,
}

impl Handedness {
    pub fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            0 => Some(Handedness::Right),
            1 => Some(Handedness::Left),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::upper_case_acronyms)]
pub enum Country {
    CAN,
    USA,
    RUS,
    CZE,
    SWE,
    FIN,
    BLR,
    SVK,
    NOR,
    GER,
    OTH,
    ITA,
    AUT,
    LAT,
    UKR,
    SLO,
    SUI,
    POL,
    FRA,
    JAP,
}

impl Country {
    pub fn from_raw(raw: i64) -> Option<Self> {
        use Country::*;
        const ALL: [Country; 20] = [
            CAN, USA, RUS, CZE, SWE, FIN, BLR, SVK, NOR, GER, OTH, ITA, AUT, LAT, UKR, SLO, SUI,
            POL, FRA, JAP,
        ];
        usize::try_from(raw).ok().and_then(|i| ALL.get(i).copied())
    }
}

/// Split a full name at the first space, the same boundary the save format
/// uses for its name line.
pub fn split_full_name(full: &str) -> (&str, &str) {
    match full.split_once(' ') {
        Some((first, last)) => (first, last),
        None => (full, ""),
    }
}

/// The in-memory roster: load it once, mutate it through views, write it
/// back out. Rows are never removed, so positional indexes stay stable for
/// the whole session.
#[derive(Debug)]
pub struct Roster {
    table: RecordTable,
}

impl Roster {
    /// Read a roster file, picking the form by extension (`.ehm` fixed
    /// layout, `.csv` delimited). Both are cp1252 on disk.
    pub fn read(path: &Path) -> Result<Self, FormatError> {
        let text = encoding::decode(&std::fs::read(path)?);
        match path.extension().and_then(|e| e.to_str()) {
            Some("ehm") => Self::parse_fixed(&text),
            Some("csv") => Self::parse_csv(&text),
            _ => Err(FormatError::UnknownExtension(path.display().to_string())),
        }
    }

    /// Write the roster, picking the form by extension. Encode failures are
    /// returned, not swallowed; the caller decides whether partial output is
    /// acceptable.
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
        Ok(Self { table: RecordTable::decode(&PLAYER_SCHEMA, text)? })
    }

    pub fn parse_csv(text: &str) -> Result<Self, FormatError> {
        Ok(Self { table: RecordTable::from_csv(&PLAYER_SCHEMA, text)? })
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

    /// Exact first+last match; anything other than exactly one hit is a
    /// [`RosterError::PlayerNotFound`].
    pub fn find_by_fullname(&self, full: &str) -> Result<usize, RosterError> {
        let (first, last) = split_full_name(full);
        self.find_by_names(first, last)
            .map_err(|_| RosterError::PlayerNotFound(full.to_string()))
    }

    pub fn find_by_names(&self, first: &str, last: &str) -> Result<usize, RosterError> {
        let mut found = None;
        for pid in 0..self.table.len() {
            if self.table.text(pid, "name_first") == first
                && self.table.text(pid, "name_last") == last
            {
                if found.is_some() {
                    return Err(RosterError::PlayerNotFound(format!("{} {}", first, last)));
                }
                found = Some(pid);
            }
        }
        found.ok_or_else(|| RosterError::PlayerNotFound(format!("{} {}", first, last)))
    }

    pub fn full_name(&self, pid: usize) -> String {
        format!("{} {}", self.table.text(pid, "name_first"), self.table.text(pid, "name_last"))
    }

    /// Unweighted mean of the six core skills.
    pub fn overall(&self, pid: usize) -> f64 {
        let sum: i64 = OVERALL_COLUMNS.iter().map(|c| self.table.int(pid, c)).sum();
        sum as f64 / OVERALL_COLUMNS.len() as f64
    }

    pub fn birthdate(&self, pid: usize) -> Option<NaiveDate> {
        let year = self.table.int(pid, "byear");
        let month = self.table.int(pid, "bmonth");
        let day = self.table.int(pid, "bday");
        NaiveDate::from_ymd_opt(
            i32::try_from(year).ok()?,
            u32::try_from(month).ok()?,
            u32::try_from(day).ok()?,
        )
    }

    /// All birthdates, logging the players whose stored dates are invalid
    /// (they stay in the table; they just never match age filters).
    pub fn birthdates(&self) -> Vec<Option<NaiveDate>> {
        (0..self.len())
            .map(|pid| {
                let date = self.birthdate(pid);
                if date.is_none() {
                    log::warn!(
                        "player {} ({}) has an invalid birthdate {}-{}-{}",
                        pid,
                        self.full_name(pid),
                        self.table.int(pid, "byear"),
                        self.table.int(pid, "bmonth"),
                        self.table.int(pid, "bday"),
                    );
                }
                date
            })
            .collect()
    }

    pub fn player<'a>(&'a mut self, pid: usize, registry: &'a TeamRegistry) -> PlayerView<'a> {
        PlayerView { table: &mut self.table, registry, pid }
    }
}

/// Typed accessor over one roster row. Setters validate before writing; a
/// failed set leaves the row untouched.
pub struct PlayerView<'a> {
    table: &'a mut RecordTable,
    registry: &'a TeamRegistry,
    pid: usize,
}

impl<'a> PlayerView<'a> {
    pub fn pid(&self) -> usize {
        self.pid
    }

    pub fn first_name(&self) -> &str {
        self.table.text(self.pid, "name_first")
    }

    pub fn last_name(&self) -> &str {
        self.table.text(self.pid, "name_last")
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }

    pub fn birthdate(&self) -> Option<NaiveDate> {
        let year = self.table.int(self.pid, "byear");
        let month = self.table.int(self.pid, "bmonth");
        let day = self.table.int(self.pid, "bday");
        NaiveDate::from_ymd_opt(
            i32::try_from(year).ok()?,
            u32::try_from(month).ok()?,
            u32::try_from(day).ok()?,
        )
    }

    /// Age in whole calendar years at `as_of`, `None` if the stored
    /// birthdate is invalid. Calendar arithmetic, not a day-count divisor,
    /// so leap years never drift the result.
    pub fn age_years(&self, as_of: NaiveDate) -> Option<i32> {
        let born = self.birthdate()?;
        let mut years = as_of.year() - born.year();
        if (as_of.month(), as_of.day()) < (born.month(), born.day()) {
            years -= 1;
        }
        Some(years)
    }

    pub fn is_junior(&self, junior_birthdate: NaiveDate) -> bool {
        self.birthdate().map(|b| b > junior_birthdate).unwrap_or(false)
    }

    pub fn country(&self) -> Result<Country, RosterError> {
        let raw = self.table.int(self.pid, "country");
        Country::from_raw(raw).ok_or(RosterError::InvalidEnumValue {
            field: "country",
            value: raw,
            domain: "country",
        })
    }

    pub fn hand(&self) -> Result<Handedness, RosterError> {
        let raw = self.table.int(self.pid, "hand");
        Handedness::from_raw(raw).ok_or(RosterError::InvalidEnumValue {
            field: "hand",
            value: raw,
            domain: "handedness",
        })
    }

    pub fn position(&self) -> Result<Position, RosterError> {
        let raw = self.table.int(self.pid, "position");
        Position::from_raw(raw).ok_or(RosterError::InvalidEnumValue {
            field: "position",
            value: raw,
            domain: "position",
        })
    }

    pub fn set_position(&mut self, position: Position) -> Result<(), RosterError> {
        if position == self.position_alt()? {
            return Err(RosterError::ConflictingPosition { field: "position", value: position });
        }
        self.table.set_int(self.pid, "position", position.raw());
        Ok(())
    }

    pub fn position_alt(&self) -> Result<Position, RosterError> {
        let raw = self.table.int(self.pid, "position_alt");
        Position::from_raw(raw).ok_or(RosterError::InvalidEnumValue {
            field: "position_alt",
            value: raw,
            domain: "position",
        })
    }

    /// Goalies carry no alternate position; everyone else may not duplicate
    /// their primary one.
    pub fn set_position_alt(&mut self, position: Position) -> Result<(), RosterError> {
        if self.position()?.is_goalie() {
            return Err(RosterError::GoalieAlternatePosition);
        }
        if position == self.position()? {
            return Err(RosterError::ConflictingPosition { field: "position_alt", value: position });
        }
        self.table.set_int(self.pid, "position_alt", position.raw());
        Ok(())
    }

    pub fn rights(&self) -> Result<TeamId, RosterError> {
        self.registry.resolve(self.table.int(self.pid, "rights"))
    }

    pub fn set_rights(&mut self, team: TeamId) {
        self.table.set_int(self.pid, "rights", team.0 as i64);
    }

    /// Current roster team, with the on-disk farm offset resolved to the
    /// base id.
    pub fn team(&self) -> Result<TeamId, RosterError> {
        self.registry.resolve_roster(self.table.int(self.pid, "team")).map(|(id, _)| id)
    }

    pub fn is_on_farm(&self) -> Result<bool, RosterError> {
        self.registry.resolve_roster(self.table.int(self.pid, "team")).map(|(_, farm)| farm)
    }

    pub fn set_team(&mut self, team: TeamId) {
        self.table.set_int(self.pid, "team", team.0 as i64);
    }

    pub fn salary(&self) -> i64 {
        self.table.int(self.pid, "salary")
    }

    pub fn set_salary(&mut self, salary: i64) {
        self.table.set_int(self.pid, "salary", salary);
    }

    pub fn years(&self) -> i64 {
        self.table.int(self.pid, "years")
    }

    pub fn set_years(&mut self, years: i64) {
        self.table.set_int(self.pid, "years", years);
    }

    pub fn draft_year(&self) -> i64 {
        self.table.int(self.pid, "draft_year")
    }

    pub fn draft_overall(&self) -> i64 {
        self.table.int(self.pid, "draft_overall")
    }

    pub fn drafted_since(&self, year: i64) -> bool {
        self.draft_year() >= year
    }

    /// Scouting shorthand for the late-developing prospects whose potential
    /// is still hidden: modest ceiling on paper, strong consistency.
    pub fn is_late_bloomer(&self) -> bool {
        self.table.int(self.pid, "pot") < 70 && self.table.int(self.pid, "con") >= 75
    }

    pub fn is_retired(&self) -> bool {
        self.table.int(self.pid, "status") == 1
    }

    pub fn set_retired(&mut self, retired: bool) {
        self.table.set_int(self.pid, "status", if retired { 1 } else { 0 });
    }

    pub fn set_acquired(&mut self, how: &str) {
        self.table.set_text(self.pid, "acquired", how);
    }

    pub fn overall(&self) -> f64 {
        let sum: i64 = OVERALL_COLUMNS.iter().map(|c| self.table.int(self.pid, c)).sum();
        sum as f64 / OVERALL_COLUMNS.len() as f64
    }

    /// One-line description for logs and batch result lists.
    pub fn describe(&self) -> String {
        let mut out = format!("{}, {}", self.last_name(), self.first_name());
        let team = self.table.int(self.pid, "team");
        let rights = self.table.int(self.pid, "rights");
        let team_label = self
            .registry
            .resolve_roster(team)
            .map(|(id, _)| self.registry.label(id).to_string())
            .unwrap_or_else(|_| team.to_string());
        let rights_label = self
            .registry
            .resolve(rights)
            .map(|id| self.registry.label(id).to_string())
            .unwrap_or_else(|_| rights.to_string());
        let _ = write!(
            out,
            " [team:{}, rights:{}] {}x{}y",
            team_label,
            rights_label,
            self.salary(),
            self.years()
        );
        out
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{empty_roster, push_player, TestPlayer};
    use super::*;
    use crate::teams::tests::sample_registry;

    #[test]
    fn finds_exactly_one_player_by_name() {
        let mut roster = empty_roster();
        push_player(&mut roster, TestPlayer { first: "Antti", last: "Aalto", ..Default::default() });
        push_player(&mut roster, TestPlayer { first: "Bob", last: "Aalto", ..Default::default() });
        push_player(&mut roster, TestPlayer { first: "Bob", last: "Aalto", ..Default::default() });

        assert_eq!(roster.find_by_fullname("Antti Aalto").unwrap(), 0);
        // Two hits is as bad as zero.
        assert!(matches!(
            roster.find_by_fullname("Bob Aalto"),
            Err(RosterError::PlayerNotFound(_))
        ));
        assert!(matches!(
            roster.find_by_fullname("Nobody Here"),
            Err(RosterError::PlayerNotFound(_))
        ));
    }

    #[test]
    fn name_with_compound_last_name() {
        let mut roster = empty_roster();
        push_player(
            &mut roster,
            TestPlayer { first: "Jean", last: "van der Berg", ..Default::default() },
        );
        assert_eq!(roster.find_by_fullname("Jean van der Berg").unwrap(), 0);
    }

    #[test]
    fn age_uses_calendar_years() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let pid = push_player(
            &mut roster,
            TestPlayer { byear: 1988, bmonth: 2, bday: 29, ..Default::default() },
        );
        let player = roster.player(pid, &registry);
        let day_before = NaiveDate::from_ymd_opt(2020, 2, 28).unwrap();
        let day_of = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        assert_eq!(player.age_years(day_before), Some(31));
        assert_eq!(player.age_years(day_of), Some(32));
    }

    #[test]
    fn invalid_birthdate_yields_none() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let pid = push_player(
            &mut roster,
            TestPlayer { byear: 1990, bmonth: 13, bday: 40, ..Default::default() },
        );
        assert_eq!(roster.birthdate(pid), None);
        let player = roster.player(pid, &registry);
        assert_eq!(player.age_years(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()), None);
    }

    #[test]
    fn position_setters_reject_conflicts() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let pid = push_player(
            &mut roster,
            TestPlayer {
                position: Position::C.raw(),
                position_alt: Position::LW.raw(),
                ..Default::default()
            },
        );
        let mut player = roster.player(pid, &registry);
        assert!(matches!(
            player.set_position(Position::LW),
            Err(RosterError::ConflictingPosition { .. })
        ));
        assert!(matches!(
            player.set_position_alt(Position::C),
            Err(RosterError::ConflictingPosition { .. })
        ));
        player.set_position(Position::RW).unwrap();
        assert_eq!(player.position().unwrap(), Position::RW);
    }

    #[test]
    fn goalies_get_no_alternate_position() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let pid = push_player(
            &mut roster,
            TestPlayer {
                position: Position::G.raw(),
                position_alt: Position::None.raw(),
                ..Default::default()
            },
        );
        let mut player = roster.player(pid, &registry);
        assert!(matches!(
            player.set_position_alt(Position::D),
            Err(RosterError::GoalieAlternatePosition)
        ));
    }

    #[test]
    fn team_getter_resolves_farm_offset() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let pid = push_player(&mut roster, TestPlayer { team: 42, ..Default::default() });
        let player = roster.player(pid, &registry);
        assert_eq!(player.team().unwrap(), TeamId(12));
        assert!(player.is_on_farm().unwrap());
    }

    #[test]
    fn out_of_range_enum_values_error() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let pid = push_player(&mut roster, TestPlayer { team: 77, ..Default::default() });
        roster.table_mut().set_int(pid, "position", 9);
        roster.table_mut().set_int(pid, "country", 25);
        let player = roster.player(pid, &registry);
        assert!(matches!(player.team(), Err(RosterError::InvalidEnumValue { .. })));
        assert!(matches!(player.position(), Err(RosterError::InvalidEnumValue { .. })));
        assert!(matches!(player.country(), Err(RosterError::InvalidEnumValue { .. })));
    }

    #[test]
    fn overall_is_mean_of_core_skills() {
        let mut roster = empty_roster();
        let pid = push_player(
            &mut roster,
            TestPlayer { ratings: [50, 60, 70, 80, 90, 93], ..Default::default() },
        );
        assert!((roster.overall(pid) - 73.833).abs() < 1e-3);
    }

    #[test]
    fn file_round_trip_through_cp1252() {
        let mut roster = empty_roster();
        push_player(
            &mut roster,
            TestPlayer { first: "Ren\u{e9}", last: "B\u{e9}rub\u{e9}", ..Default::default() },
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.ehm");
        let failures = roster.write(&path).unwrap();
        assert!(failures.is_empty());

        // cp1252 on disk: the accented characters are single bytes.
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.contains(&0xE9));

        let back = Roster::read(&path).unwrap();
        assert_eq!(back.find_by_fullname("Ren\u{e9} B\u{e9}rub\u{e9}").unwrap(), 0);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("players.txt");
        std::fs::write(&path, " 0 \n").unwrap();
        assert!(matches!(Roster::read(&path), Err(FormatError::UnknownExtension(_))));
    }

    #[test]
    fn late_bloomer_flag() {
        let registry = sample_registry();
        let mut roster = empty_roster();
        let a = push_player(&mut roster, TestPlayer { pot: 65, con: 80, ..Default::default() });
        let b = push_player(&mut roster, TestPlayer { pot: 75, con: 80, ..Default::default() });
        assert!(roster.player(a, &registry).is_late_bloomer());
        assert!(!roster.player(b, &registry).is_late_bloomer());
    }
}
