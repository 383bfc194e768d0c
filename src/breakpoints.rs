//! Named width thresholds and the registry that resolves them.

use indexmap::IndexMap;

use crate::error::{BreakpointError, Result};
use crate::query::BreakpointValue;

/// Width breakpoints in pixels, keyed by name.
///
/// Insertion order is kept so a set reads back the way it was written, but
/// every ordering decision (next boundary, error listings) uses the widths.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct BreakpointSet(IndexMap<String, f64>);

impl Default for BreakpointSet {
    fn default() -> Self {
        Self::from([
            ("xs", 480.0),
            ("sm", 640.0),
            ("md", 768.0),
            ("lg", 1024.0),
            ("xl", 1280.0),
            ("2xl", 1536.0),
        ])
    }
}

impl BreakpointSet {
    /// An empty set. Every name lookup against it fails.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Adds or replaces a breakpoint, builder style.
    pub fn with(mut self, name: impl Into<String>, width: f64) -> Self {
        self.insert(name, width);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, width: f64) -> Option<f64> {
        debug_assert!(
            width.is_finite() && width >= 0.0,
            "breakpoint width must be a non-negative pixel value, got {width}"
        );
        self.0.insert(name.into(), width)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.0.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, width)| (name.as_str(), *width))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reads a set from a JSON object such as `{"sm": 640, "md": 768}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for BreakpointSet {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (name, width) in iter {
            set.insert(name, width);
        }
        set
    }
}

impl<K: Into<String>, const N: usize> From<[(K, f64); N]> for BreakpointSet {
    fn from(entries: [(K, f64); N]) -> Self {
        entries.into_iter().collect()
    }
}

/// The active breakpoint set together with its width-sorted view.
///
/// One registry is owned by the application (usually through
/// [`Responsive`](crate::Responsive)) and passed to whatever builds queries.
/// Reconfigure it before creating reactive subscriptions: queries that were
/// already resolved keep the widths they were built with.
#[derive(Clone, Debug)]
pub struct Breakpoints {
    set: BreakpointSet,
    sorted: Vec<(String, f64)>,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::new(BreakpointSet::default())
    }
}

impl Breakpoints {
    pub fn new(set: BreakpointSet) -> Self {
        let sorted = sort_by_width(&set);
        Self { set, sorted }
    }

    /// Replaces the whole set. Names missing from `set` stop resolving.
    pub fn configure(&mut self, set: BreakpointSet) {
        tracing::debug!(count = set.len(), "configuring breakpoints");
        self.sorted = sort_by_width(&set);
        self.set = set;
    }

    /// The live set, read-only so the sorted view can't go stale.
    pub fn get(&self) -> &BreakpointSet {
        &self.set
    }

    /// `(name, width)` pairs ascending by width. Equal widths keep their
    /// insertion order.
    pub fn sorted(&self) -> &[(String, f64)] {
        &self.sorted
    }

    /// Returns the width of `name`, or [`BreakpointError::UnknownBreakpoint`]
    /// listing the names that do exist.
    pub fn validate(&self, name: &str) -> Result<f64> {
        self.set
            .get(name)
            .ok_or_else(|| BreakpointError::UnknownBreakpoint {
                name: name.to_string(),
                available: self.sorted.iter().map(|(name, _)| name.clone()).collect(),
            })
    }

    /// The width of the breakpoint ranked just above `name`, or infinity when
    /// `name` is the widest.
    ///
    /// With equal widths the next entry in sorted order wins, so a tied
    /// breakpoint's `only` range is empty. An unknown name resolves as if it
    /// sat before the narrowest breakpoint; validate first.
    pub fn next_boundary(&self, name: &str) -> f64 {
        let next = match self.sorted.iter().position(|(n, _)| n == name) {
            Some(index) => index + 1,
            None => 0,
        };
        self.sorted
            .get(next)
            .map_or(f64::INFINITY, |(_, width)| *width)
    }

    /// Pixel values pass through untouched; names are validated and looked up.
    pub fn resolve(&self, value: &BreakpointValue) -> Result<f64> {
        match value {
            BreakpointValue::Px(px) => Ok(*px),
            BreakpointValue::Name(name) => self.validate(name),
        }
    }
}

fn sort_by_width(set: &BreakpointSet) -> Vec<(String, f64)> {
    let mut sorted: Vec<_> = set
        .iter()
        .map(|(name, width)| (name.to_string(), width))
        .collect();
    sorted.sort_by(|a, b| a.1.total_cmp(&b.1));
    sorted
}
