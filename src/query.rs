//! Range media queries and the builders that derive them from breakpoints.
//!
//! The builders emit CSS syntax such as `(min-width: 768px)` and
//! `(min-width: 768px) and (max-width: 1023.98px)`. A CSS max bound is
//! inclusive, so every exclusive upper bound is written as `bound - EPSILON`.
//! For whole-pixel widths that keeps adjacent ranges from both matching on
//! the boundary: at exactly 768px `up("md")` holds and `down("md")` does not.
//! Fractional widths strictly between `bound - EPSILON` and `bound` match
//! neither side.

use std::fmt;
use std::str::FromStr;

use smallvec::{SmallVec, smallvec};

use crate::breakpoints::Breakpoints;
use crate::error::{BreakpointError, ParseMediaQueryError, Result};

/// Subtracted from exclusive upper bounds to write them as inclusive ones.
pub const EPSILON: f64 = 0.02;

/// A breakpoint name, or a literal pixel width that bypasses the registry.
#[derive(Clone, Debug, PartialEq)]
pub enum BreakpointValue {
    Name(String),
    Px(f64),
}

impl fmt::Display for BreakpointValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakpointValue::Name(name) => f.write_str(name),
            BreakpointValue::Px(px) => write!(f, "{px}"),
        }
    }
}

impl From<&str> for BreakpointValue {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for BreakpointValue {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<f64> for BreakpointValue {
    fn from(px: f64) -> Self {
        Self::Px(px)
    }
}

impl From<u32> for BreakpointValue {
    fn from(px: u32) -> Self {
        Self::Px(px as f64)
    }
}

/// Lets bare integer literals like `up(&bps, 500)` through.
impl From<i32> for BreakpointValue {
    fn from(px: i32) -> Self {
        debug_assert!(px >= 0, "negative breakpoint width {px}");
        Self::Px(px as f64)
    }
}

/// One alternative of a media query: `min <= width <= max`, with either
/// bound optional.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct RangeClause {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl RangeClause {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }

    pub fn at_most(max: f64) -> Self {
        Self {
            min: None,
            max: Some(max),
        }
    }

    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    pub fn contains(&self, width: f64) -> bool {
        self.min.is_none_or(|min| width >= min) && self.max.is_none_or(|max| width <= max)
    }
}

impl fmt::Display for RangeClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (Some(min), Some(max)) => write!(f, "(min-width: {min}px) and (max-width: {max}px)"),
            (Some(min), None) => write!(f, "(min-width: {min}px)"),
            (None, Some(max)) => write!(f, "(max-width: {max}px)"),
            (None, None) => f.write_str("all"),
        }
    }
}

/// A range media query: matches when any of its clauses does.
#[derive(Clone, Debug, PartialEq)]
pub struct MediaQuery {
    clauses: SmallVec<[RangeClause; 2]>,
}

impl MediaQuery {
    pub fn new(clause: RangeClause) -> Self {
        Self {
            clauses: smallvec![clause],
        }
    }

    /// Adds an alternative clause, joined with `, ` when rendered.
    pub fn or(mut self, clause: RangeClause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn clauses(&self) -> &[RangeClause] {
        &self.clauses
    }

    /// Evaluates the query against a width in pixels, bounds inclusive.
    pub fn matches(&self, width: f64) -> bool {
        self.clauses.iter().any(|clause| clause.contains(width))
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{clause}")?;
        }
        Ok(())
    }
}

impl FromStr for MediaQuery {
    type Err = ParseMediaQueryError;

    /// Reads the subset of media query syntax the builders emit:
    /// comma-separated clauses of `(min-width: Npx)` / `(max-width: Npx)`
    /// features joined by `and`, or the keyword `all`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut clauses = SmallVec::new();
        for clause in s.split(',') {
            clauses.push(parse_clause(clause.trim())?);
        }
        Ok(Self { clauses })
    }
}

fn parse_clause(clause: &str) -> Result<RangeClause, ParseMediaQueryError> {
    if clause.is_empty() {
        return Err(ParseMediaQueryError::Empty);
    }
    if clause.eq_ignore_ascii_case("all") {
        return Ok(RangeClause::default());
    }

    let mut range = RangeClause::default();
    for feature in clause.split(" and ") {
        let feature = feature.trim();
        let inner = feature
            .strip_prefix('(')
            .and_then(|f| f.strip_suffix(')'))
            .ok_or_else(|| ParseMediaQueryError::MalformedFeature(feature.to_string()))?;
        let (name, value) = inner
            .split_once(':')
            .ok_or_else(|| ParseMediaQueryError::MalformedFeature(feature.to_string()))?;
        let name = name.trim();
        let px = parse_px(value.trim())?;

        let slot = match name {
            "min-width" => &mut range.min,
            "max-width" => &mut range.max,
            _ => return Err(ParseMediaQueryError::UnsupportedFeature(name.to_string())),
        };
        if slot.replace(px).is_some() {
            return Err(ParseMediaQueryError::DuplicateFeature(name.to_string()));
        }
    }
    Ok(range)
}

fn parse_px(value: &str) -> Result<f64, ParseMediaQueryError> {
    value
        .strip_suffix("px")
        .and_then(|n| n.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .ok_or_else(|| ParseMediaQueryError::InvalidLength(value.to_string()))
}

/// `width >= size`.
pub fn up(breakpoints: &Breakpoints, size: impl Into<BreakpointValue>) -> Result<MediaQuery> {
    let min = breakpoints.resolve(&size.into())?;
    Ok(MediaQuery::new(RangeClause::at_least(min)))
}

/// `width < size`.
pub fn down(breakpoints: &Breakpoints, size: impl Into<BreakpointValue>) -> Result<MediaQuery> {
    let max = breakpoints.resolve(&size.into())?;
    Ok(MediaQuery::new(RangeClause::at_most(max - EPSILON)))
}

/// From `name` up to, but not including, the next breakpoint.
pub fn only(breakpoints: &Breakpoints, name: &str) -> Result<MediaQuery> {
    let min = breakpoints.validate(name)?;
    let next = breakpoints.next_boundary(name);
    let clause = if next.is_infinite() {
        RangeClause::at_least(min)
    } else {
        RangeClause::between(min, next - EPSILON)
    };
    Ok(MediaQuery::new(clause))
}

/// Everything [`only`] does not match.
pub fn not(breakpoints: &Breakpoints, name: &str) -> Result<MediaQuery> {
    let min = breakpoints.validate(name)?;
    let next = breakpoints.next_boundary(name);
    let below = MediaQuery::new(RangeClause::at_most(min - EPSILON));
    Ok(if next.is_infinite() {
        below
    } else {
        below.or(RangeClause::at_least(next))
    })
}

/// `min_size <= width < max_size`.
pub fn between(
    breakpoints: &Breakpoints,
    min_size: impl Into<BreakpointValue>,
    max_size: impl Into<BreakpointValue>,
) -> Result<MediaQuery> {
    let min_size = min_size.into();
    let max_size = max_size.into();
    let min = breakpoints.resolve(&min_size)?;
    let max = breakpoints.resolve(&max_size)?;
    if min >= max {
        return Err(BreakpointError::InvalidRange {
            min_size,
            max_size,
            min,
            max,
        });
    }
    Ok(MediaQuery::new(RangeClause::between(min, max - EPSILON)))
}
