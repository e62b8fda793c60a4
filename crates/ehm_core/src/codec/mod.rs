//! Schema-driven codec for fixed-layout, multi-line-per-record save files.
//!
//! A save format is described declaratively as an ordered list of
//! [`LineGroup`]s, one per line of a record; the same decode/encode pair then
//! serves every format (player rosters, game schedules) instead of each
//! having a bespoke parser. The first file line is a header carrying the
//! record count, and the total line count must match it exactly.

pub mod encoding;

use std::collections::HashMap;

use crate::error::FormatError;

/// One decoded cell. The schema fixes which variant a column holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    Int(i64),
    Text(String),
}

impl Field {
    pub fn as_int(&self) -> i64 {
        match self {
            Field::Int(v) => *v,
            Field::Text(t) => panic!("integer column holds text `{}`", t),
        }
    }

    pub fn as_text(&self) -> &str {
        match self {
            Field::Text(t) => t,
            Field::Int(v) => panic!("text column holds integer {}", v),
        }
    }
}

/// How one line of a record is split into fields and joined back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKind {
    /// Whitespace-separated signed integers, written space-padded.
    Integers,
    /// Fixed-width block of 3-character zero-padded integers.
    PackedWidth3,
    /// Two text fields split at the first whitespace boundary.
    NamePair,
    /// The whole line as one free-text field.
    Verbatim,
}

/// One line of a record: its field names and parsing rule.
#[derive(Debug)]
pub struct LineGroup {
    pub name: &'static str,
    pub fields: &'static [&'static str],
    pub kind: GroupKind,
}

/// A full record layout: `groups.len()` lines per record.
#[derive(Debug)]
pub struct RecordSchema {
    pub name: &'static str,
    pub groups: &'static [LineGroup],
}

impl RecordSchema {
    pub fn lines_per_record(&self) -> usize {
        self.groups.len()
    }

    pub fn column_count(&self) -> usize {
        self.groups.iter().map(|g| g.fields.len()).sum()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.groups.iter().flat_map(|g| g.fields.iter().copied())
    }
}

/// A record that could not be written during a best-effort encode pass.
#[derive(Debug)]
pub struct EncodeFailure {
    pub record: usize,
    pub group: &'static str,
    pub reason: String,
}

/// Decoded table: one row per record, columns addressable by schema name.
/// A record's positional index is its position in the row vector and is
/// stable for the lifetime of the table (rows are never removed).
#[derive(Debug)]
pub struct RecordTable {
    schema: &'static RecordSchema,
    columns: HashMap<&'static str, usize>,
    rows: Vec<Vec<Field>>,
}

impl RecordTable {
    pub fn new(schema: &'static RecordSchema) -> Self {
        let columns = schema.column_names().enumerate().map(|(i, n)| (n, i)).collect();
        Self { schema, columns, rows: Vec::new() }
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Column index for a schema field name. A bad name is a programming
    /// error, not a data error.
    pub fn col(&self, name: &str) -> usize {
        match self.columns.get(name) {
            Some(i) => *i,
            None => panic!("schema `{}` has no column `{}`", self.schema.name, name),
        }
    }

    pub fn field(&self, row: usize, column: &str) -> &Field {
        &self.rows[row][self.col(column)]
    }

    pub fn int(&self, row: usize, column: &str) -> i64 {
        self.rows[row][self.col(column)].as_int()
    }

    pub fn text(&self, row: usize, column: &str) -> &str {
        self.rows[row][self.col(column)].as_text()
    }

    pub fn set_int(&mut self, row: usize, column: &str, value: i64) {
        let c = self.col(column);
        self.rows[row][c] = Field::Int(value);
    }

    pub fn set_text(&mut self, row: usize, column: &str, value: impl Into<String>) {
        let c = self.col(column);
        self.rows[row][c] = Field::Text(value.into());
    }

    pub fn push_row(&mut self, row: Vec<Field>) {
        assert_eq!(row.len(), self.schema.column_count(), "row width mismatch");
        self.rows.push(row);
    }

    // ------------------------------------------------------------------
    // Fixed-layout form
    // ------------------------------------------------------------------

    /// Decode the fixed-layout text form. Structural mismatches are fatal:
    /// a wrong total line count or a wrong per-line field count means the
    /// save file is corrupt.
    pub fn decode(schema: &'static RecordSchema, text: &str) -> Result<Self, FormatError> {
        let lines: Vec<&str> = text.lines().collect();
        let header = lines.first().ok_or(FormatError::MissingHeader)?;
        let records: usize = header
            .trim()
            .parse()
            .map_err(|_| FormatError::InvalidHeader(header.trim().to_string()))?;

        let lines_per_record = schema.lines_per_record();
        let expected = 1 + lines_per_record * records;
        if lines.len() != expected {
            return Err(FormatError::MalformedRecordCount {
                expected,
                actual: lines.len(),
                records,
                lines_per_record,
                header_lines: 1,
            });
        }

        let mut table = Self::new(schema);
        table.rows.reserve(records);
        for record in 0..records {
            let start = 1 + record * lines_per_record;
            let mut row = Vec::with_capacity(schema.column_count());
            for (offset, group) in schema.groups.iter().enumerate() {
                let line_no = start + offset + 1; // 1-based, for diagnostics
                let line = lines[start + offset];
                let fields = split_group(group, line, line_no)?;
                if fields.len() != group.fields.len() {
                    return Err(FormatError::FieldCountMismatch {
                        line: line_no,
                        group: group.name,
                        expected: group.fields.len(),
                        found: fields.len(),
                    });
                }
                row.extend(fields);
            }
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Encode back into the fixed-layout text form.
    ///
    /// Best-effort: a record whose fields cannot be rendered under its
    /// group's rule is reported and its line skipped, and the pass keeps
    /// going. Partial output is acceptable for an offline batch tool; the
    /// caller decides whether to persist it.
    pub fn encode(&self) -> (String, Vec<EncodeFailure>) {
        let mut out = String::new();
        let mut failures = Vec::new();
        out.push_str(&format!(" {} \n", self.rows.len()));
        for (record, row) in self.rows.iter().enumerate() {
            let mut begin = 0;
            for group in self.schema.groups {
                let fields = &row[begin..begin + group.fields.len()];
                begin += group.fields.len();
                match join_group(group, fields) {
                    Ok(line) => {
                        out.push_str(&line);
                        out.push('\n');
                    }
                    Err(reason) => {
                        log::error!("record {}: group `{}`: {}", record, group.name, reason);
                        failures.push(EncodeFailure { record, group: group.name, reason });
                    }
                }
            }
        }
        (out, failures)
    }

    // ------------------------------------------------------------------
    // CSV alternate form
    // ------------------------------------------------------------------

    /// Read the delimited alternate form. The header row must name every
    /// schema column; missing text cells fill with the empty string, and
    /// missing numeric cells fill with zero.
    pub fn from_csv(schema: &'static RecordSchema, text: &str) -> Result<Self, FormatError> {
        let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(text.as_bytes());
        let headers = reader.headers()?.clone();
        let mut positions = Vec::with_capacity(schema.column_count());
        for group in schema.groups {
            for &name in group.fields {
                let pos = headers
                    .iter()
                    .position(|h| h == name)
                    .ok_or_else(|| FormatError::MissingColumn { column: name })?;
                positions.push((pos, group.kind));
            }
        }

        let mut table = Self::new(schema);
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let line = idx + 2; // header is line 1
            let mut row = Vec::with_capacity(positions.len());
            for &(pos, kind) in &positions {
                let cell = record.get(pos).unwrap_or("").trim();
                match kind {
                    GroupKind::Integers | GroupKind::PackedWidth3 => {
                        let value = if cell.is_empty() {
                            0
                        } else {
                            cell.parse().map_err(|_| FormatError::InvalidInteger {
                                line,
                                token: cell.to_string(),
                            })?
                        };
                        row.push(Field::Int(value));
                    }
                    GroupKind::NamePair | GroupKind::Verbatim => {
                        row.push(Field::Text(cell.to_string()));
                    }
                }
            }
            table.rows.push(row);
        }
        Ok(table)
    }

    /// Write the delimited alternate form with a header row.
    pub fn to_csv(&self) -> Result<String, FormatError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(self.schema.column_names())?;
        for row in &self.rows {
            let cells: Vec<String> = row
                .iter()
                .map(|f| match f {
                    Field::Int(v) => v.to_string(),
                    Field::Text(t) => t.clone(),
                })
                .collect();
            writer.write_record(&cells)?;
        }
        let bytes = writer.into_inner().map_err(|e| e.into_error())?;
        Ok(String::from_utf8(bytes).expect("csv writer emits valid UTF-8"))
    }
}

fn split_group(group: &LineGroup, line: &str, line_no: usize) -> Result<Vec<Field>, FormatError> {
    match group.kind {
        GroupKind::Integers => line
            .split_whitespace()
            .map(|token| {
                token.parse().map(Field::Int).map_err(|_| FormatError::InvalidInteger {
                    line: line_no,
                    token: token.to_string(),
                })
            })
            .collect(),
        GroupKind::PackedWidth3 => {
            let chars: Vec<char> = line.trim().chars().collect();
            chars
                .chunks(3)
                .map(|chunk| {
                    let token: String = chunk.iter().collect();
                    token.parse().map(Field::Int).map_err(|_| FormatError::InvalidInteger {
                        line: line_no,
                        token,
                    })
                })
                .collect()
        }
        GroupKind::NamePair => {
            Ok(line.trim().splitn(2, ' ').map(|s| Field::Text(s.to_string())).collect())
        }
        GroupKind::Verbatim => Ok(vec![Field::Text(line.to_string())]),
    }
}

fn join_group(group: &LineGroup, fields: &[Field]) -> Result<String, String> {
    let mut line = String::new();
    match group.kind {
        GroupKind::Integers => {
            for (field, name) in fields.iter().zip(group.fields) {
                match field {
                    // The on-disk convention: sign-or-space, value, trailing
                    // space, concatenated without separators.
                    Field::Int(v) if *v < 0 => line.push_str(&format!("{} ", v)),
                    Field::Int(v) => line.push_str(&format!(" {} ", v)),
                    Field::Text(t) => {
                        return Err(format!("field `{}` holds text `{}`", name, t));
                    }
                }
            }
        }
        GroupKind::PackedWidth3 => {
            for (field, name) in fields.iter().zip(group.fields) {
                match field {
                    Field::Int(v) => line.push_str(&format!("{:03}", v)),
                    Field::Text(t) => {
                        return Err(format!("field `{}` holds text `{}`", name, t));
                    }
                }
            }
        }
        GroupKind::NamePair | GroupKind::Verbatim => {
            for (i, (field, name)) in fields.iter().zip(group.fields).enumerate() {
                match field {
                    Field::Text(t) if t.contains('\n') => {
                        return Err(format!("field `{}` contains a line break", name));
                    }
                    Field::Text(t) => {
                        if i > 0 {
                            line.push(' ');
                        }
                        line.push_str(t);
                    }
                    Field::Int(v) => {
                        return Err(format!("field `{}` holds integer {}", name, v));
                    }
                }
            }
        }
    }
    Ok(line)
}
