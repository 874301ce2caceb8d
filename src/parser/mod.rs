//! Parser for org chart text files.
//!
//! A file is a pipe-delimited table with a header row:
//!
//! ```text
//! | Employee ID | Name         | Manager ID |
//! | 1           | Dangermouse  |            |
//! | 2           | Gonzo        | 1          |
//! ```
//!
//! An empty manager field marks the chief, who is recorded as their own
//! manager.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

use crate::models::Employee;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed input: no header")]
    MissingHeader,

    #[error("Malformed input: header format incorrect: {line}")]
    MalformedHeader { line: String },

    #[error("Malformed line {line_number}: {line}")]
    MalformedLine { line_number: usize, line: String },

    #[error("Malformed line {line_number}: {value} is not a valid id")]
    InvalidId { line_number: usize, value: String },

    #[error("Malformed line {line_number}: name cannot be blank")]
    EmptyName { line_number: usize },

    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// How to treat record lines that do not parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Log and skip malformed record lines instead of failing the whole file.
    /// A bad header always fails.
    pub skip_malformed: bool,
}

static HEADER_REGEX: OnceLock<Regex> = OnceLock::new();
static ENTRY_REGEX: OnceLock<Regex> = OnceLock::new();

fn header_regex() -> &'static Regex {
    HEADER_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^\s*\|\s*Employee\s+ID\s*\|\s*Name\s*\|\s*Manager\s+ID\s*\|\s*$")
            .expect("Invalid header regex")
    })
}

fn entry_regex() -> &'static Regex {
    ENTRY_REGEX.get_or_init(|| {
        Regex::new(
            r"^\s*\|\s*(?P<id>-?\d+)\s*\|(?P<name>[\w'\-\s]+)\|\s*(?P<manager>-?\d+)?\s*\|\s*$",
        )
        .expect("Invalid entry regex")
    })
}

/// Parse a single record line. `line_number` is only used in errors.
pub fn parse_line(line: &str, line_number: usize) -> Result<Employee, ParseError> {
    let captures = entry_regex()
        .captures(line)
        .ok_or_else(|| ParseError::MalformedLine {
            line_number,
            line: line.to_string(),
        })?;

    let parse_id = |value: &str| {
        value.parse::<i64>().map_err(|_| ParseError::InvalidId {
            line_number,
            value: value.to_string(),
        })
    };

    let id = parse_id(&captures["id"])?;

    let name = captures["name"].trim();
    if name.is_empty() {
        return Err(ParseError::EmptyName { line_number });
    }

    let manager_id = match captures.name("manager") {
        Some(manager) => parse_id(manager.as_str())?,
        None => id,
    };

    tracing::trace!(
        "From line \"{}\" read id: {}, name: {}, manager: {}",
        line,
        id,
        name,
        manager_id
    );
    Ok(Employee::new(id, name, manager_id))
}

/// Parse an org chart from any buffered reader.
pub fn parse_reader<R: BufRead>(reader: R, options: ParseOptions) -> Result<Vec<Employee>, ParseError> {
    let io_error = |source: std::io::Error| ParseError::Io {
        path: PathBuf::from("<input>"),
        source,
    };

    let mut lines = reader
        .lines()
        .enumerate()
        .map(|(i, line)| line.map(|line| (i + 1, line)));

    let header = loop {
        match lines.next() {
            None => return Err(ParseError::MissingHeader),
            Some(line) => {
                let (_, line) = line.map_err(io_error)?;
                if !line.trim().is_empty() {
                    break line;
                }
            }
        }
    };
    if !header_regex().is_match(&header) {
        return Err(ParseError::MalformedHeader { line: header });
    }
    tracing::debug!("Parsed valid header \"{}\"", header);

    let mut employees = Vec::new();
    for line in lines {
        let (line_number, line) = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(&line, line_number) {
            Ok(employee) => employees.push(employee),
            Err(e) if options.skip_malformed => tracing::warn!("Skipping: {}", e),
            Err(e) => return Err(e),
        }
    }

    tracing::info!("Parsed {} records", employees.len());
    Ok(employees)
}

pub fn parse_str(input: &str, options: ParseOptions) -> Result<Vec<Employee>, ParseError> {
    parse_reader(input.as_bytes(), options)
}

/// Parse an org chart file from the filesystem.
pub fn parse_file(path: impl AsRef<Path>, options: ParseOptions) -> Result<Vec<Employee>, ParseError> {
    let path = path.as_ref();
    tracing::info!("Opening org chart file {}", path.display());

    let file = File::open(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_reader(BufReader::new(file), options).map_err(|e| match e {
        ParseError::Io { source, .. } => ParseError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}
