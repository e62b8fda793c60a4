//! # ehm_core - EHM league save-file toolkit
//!
//! Library for reading, rule-checking, and rewriting the fixed-layout text
//! save files of an EHM-style hockey league: player rosters, game
//! schedules, and the league team config, plus the contract rule engine
//! (entry-level slots, re-signings, qualifying offers, slides) and the
//! offseason roster maintenance passes built on top of them.
//!
//! Everything operates on one in-memory table per file, single-threaded:
//! load, mutate through validating views, write back out. Structural file
//! errors abort a run; business-rule violations in batch operations are
//! collected per player so one bad entry never sinks a signing file.

pub mod codec;
pub mod contracts;
pub mod error;
pub mod roster;
pub mod schedule;
pub mod teams;

pub use contracts::{BatchOutcome, Contract};
pub use error::{FormatError, RosterError};
pub use roster::{Position, Roster};
pub use schedule::{GameStatus, GameType, Schedule};
pub use teams::{TeamId, TeamInfo, TeamRegistry};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
