//! Referee input parsing.
//!
//! Input is line-oriented with whitespace-separated integers:
//!
//! ```text
//! startup:  N, then N x "id x y radius"
//! per turn: "gold touchedSite"
//!           N x "id goldRemaining maxMineSize structure owner param1 param2"
//!           "unitCount", then unitCount x "x y owner unitType health"
//! ```
//!
//! Any malformed line is fatal: there is no way to resynchronise with the
//! referee once a record is misread.

use std::io::{self, BufRead};

use thiserror::Error;

use crate::board::{
    Owner, Point, SiteId, SiteLayout, SiteState, Structure, TurnInput, Unit, UnitType, NO_SITE,
};

/// Upper bound on capacity reserved from a count read off the wire.
const MAX_PREALLOC: usize = 64;

/// Errors that can occur while reading referee input.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unexpected end of input at line {line}")]
    UnexpectedEof { line: usize },

    #[error("read failed: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: expected {expected} fields, got {found}")]
    WrongFieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid integer '{token}'")]
    InvalidInteger { line: usize, token: String },

    #[error("line {line}: negative count {count}")]
    NegativeCount { line: usize, count: i32 },

    #[error("line {line}: unknown structure code {code}")]
    UnknownStructure { line: usize, code: i32 },

    #[error("line {line}: unknown owner code {code}")]
    UnknownOwner { line: usize, code: i32 },

    #[error("line {line}: unknown unit type code {code}")]
    UnknownUnitType { line: usize, code: i32 },
}

/// Splits one line into exactly `expected` integers.
pub fn parse_fields(line: &str, expected: usize, line_no: usize) -> Result<Vec<i32>, ProtocolError> {
    let fields = line
        .split_whitespace()
        .map(|t| {
            t.parse::<i32>().map_err(|_| ProtocolError::InvalidInteger {
                line: line_no,
                token: t.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if fields.len() != expected {
        return Err(ProtocolError::WrongFieldCount {
            line: line_no,
            expected,
            found: fields.len(),
        });
    }
    Ok(fields)
}

/// Parses `id x y radius`.
pub fn parse_site_layout(line: &str, line_no: usize) -> Result<SiteLayout, ProtocolError> {
    let f = parse_fields(line, 4, line_no)?;
    Ok(SiteLayout {
        id: f[0],
        position: Point::new(f[1], f[2]),
        radius: f[3],
    })
}

/// Parses `id goldRemaining maxMineSize structure owner param1 param2`.
pub fn parse_site_state(line: &str, line_no: usize) -> Result<(SiteId, SiteState), ProtocolError> {
    let f = parse_fields(line, 7, line_no)?;
    let structure = Structure::from_code(f[3]).ok_or(ProtocolError::UnknownStructure {
        line: line_no,
        code: f[3],
    })?;
    let owner = match f[4] {
        -1 => None,
        code => Some(
            Owner::from_code(code).ok_or(ProtocolError::UnknownOwner { line: line_no, code })?,
        ),
    };
    let owner = if structure == Structure::Empty { None } else { owner };
    Ok((
        f[0],
        SiteState {
            gold_remaining: f[1],
            max_mine_size: f[2],
            structure,
            owner,
            param1: f[5],
            param2: f[6],
        },
    ))
}

/// Parses `x y owner unitType health`.
pub fn parse_unit(line: &str, line_no: usize) -> Result<Unit, ProtocolError> {
    let f = parse_fields(line, 5, line_no)?;
    let owner = Owner::from_code(f[2]).ok_or(ProtocolError::UnknownOwner {
        line: line_no,
        code: f[2],
    })?;
    let unit_type = UnitType::from_code(f[3]).ok_or(ProtocolError::UnknownUnitType {
        line: line_no,
        code: f[3],
    })?;
    Ok(Unit {
        position: Point::new(f[0], f[1]),
        owner,
        unit_type,
        health: f[4],
    })
}

/// Reads referee records from a buffered source, tracking line numbers for
/// error reporting.
pub struct InputReader<R> {
    source: R,
    line_no: usize,
    buf: String,
}

impl<R: BufRead> InputReader<R> {
    pub fn new(source: R) -> Self {
        InputReader {
            source,
            line_no: 0,
            buf: String::new(),
        }
    }

    /// Reads the next line, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<&str>, ProtocolError> {
        self.buf.clear();
        if self.source.read_line(&mut self.buf)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(self.buf.as_str()))
    }

    /// Reads the next line, treating end of input as an error.
    fn require_line(&mut self) -> Result<(&str, usize), ProtocolError> {
        let line_no = self.line_no + 1;
        match self.next_line()? {
            Some(line) => Ok((line, line_no)),
            None => Err(ProtocolError::UnexpectedEof { line: line_no }),
        }
    }

    fn read_count(&mut self) -> Result<usize, ProtocolError> {
        let (line, line_no) = self.require_line()?;
        let count = parse_fields(line, 1, line_no)?[0];
        usize::try_from(count).map_err(|_| ProtocolError::NegativeCount {
            line: line_no,
            count,
        })
    }

    /// Reads the startup site list.
    pub fn read_startup(&mut self) -> Result<Vec<SiteLayout>, ProtocolError> {
        let count = self.read_count()?;
        let mut layouts = Vec::with_capacity(count.min(MAX_PREALLOC));
        for _ in 0..count {
            let (line, line_no) = self.require_line()?;
            layouts.push(parse_site_layout(line, line_no)?);
        }
        Ok(layouts)
    }

    /// Reads one turn. Returns `None` if input ends cleanly before the turn
    /// starts; ending anywhere inside a turn is an error.
    pub fn read_turn(&mut self, site_count: usize) -> Result<Option<TurnInput>, ProtocolError> {
        let line_no = self.line_no + 1;
        let header = match self.next_line()? {
            Some(line) if line.trim().is_empty() => {
                return Err(ProtocolError::WrongFieldCount {
                    line: line_no,
                    expected: 2,
                    found: 0,
                })
            }
            Some(line) => parse_fields(line, 2, line_no)?,
            None => return Ok(None),
        };
        let touched_site = match header[1] {
            NO_SITE => None,
            id => Some(id),
        };

        let mut sites = Vec::with_capacity(site_count.min(MAX_PREALLOC));
        for _ in 0..site_count {
            let (line, line_no) = self.require_line()?;
            sites.push(parse_site_state(line, line_no)?);
        }

        let unit_count = self.read_count()?;
        let mut units = Vec::with_capacity(unit_count.min(MAX_PREALLOC));
        for _ in 0..unit_count {
            let (line, line_no) = self.require_line()?;
            units.push(parse_unit(line, line_no)?);
        }

        Ok(Some(TurnInput {
            gold: header[0],
            touched_site,
            sites,
            units,
        }))
    }
}
