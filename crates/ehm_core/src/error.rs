use thiserror::Error;

/// Structural load/save failures. Any of these means the file on disk does
/// not match the declared record layout, so the whole run aborts.
#[derive(Error, Debug)]
pub enum FormatError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("file has {actual} lines, expected {expected} ({records} records x {lines_per_record} lines + {header_lines} header)")]
    MalformedRecordCount {
        expected: usize,
        actual: usize,
        records: usize,
        lines_per_record: usize,
        header_lines: usize,
    },

    #[error("line {line}: group `{group}` has {found} fields, schema declares {expected}")]
    FieldCountMismatch { line: usize, group: &'static str, expected: usize, found: usize },

    #[error("line {line}: `{token}` is not an integer")]
    InvalidInteger { line: usize, token: String },

    #[error("missing header line with record count")]
    MissingHeader,

    #[error("CSV header is missing column `{column}`")]
    MissingColumn { column: &'static str },

    #[error("header `{0}` is not a record count")]
    InvalidHeader(String),

    #[error("team config: {0}")]
    TeamConfig(String),

    #[error("unknown extension for {0}; expected .ehm or .csv")]
    UnknownExtension(String),
}

/// Business-rule violations. Batch contract operations catch these per
/// entity and keep going; outside a batch they propagate to the caller.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("no single player named {0}")]
    PlayerNotFound(String),

    #[error("{field}={value} is outside the {domain} domain")]
    InvalidEnumValue { field: &'static str, value: i64, domain: &'static str },

    #[error("can't set {field} to {value:?}: equals the player's other position")]
    ConflictingPosition { field: &'static str, value: crate::roster::Position },

    #[error("can't set position_alt for a goalie")]
    GoalieAlternatePosition,

    #[error("salary={salary} below floor={floor} for {years}y")]
    SalaryBelowFloor { salary: i64, floor: i64, years: i64 },

    #[error("inconsistent contract state: {0}")]
    InconsistentContractState(String),

    #[error("retirement quota: {0}")]
    RetirementQuota(String),

    #[error("duplicate qualifying offer for {0}")]
    DuplicateQualifier(String),

    #[error("player {0} born {1} is not a junior (cutoff {2})")]
    NotAJunior(String, chrono::NaiveDate, chrono::NaiveDate),

    #[error("{0}")]
    ParseInput(String),
}
