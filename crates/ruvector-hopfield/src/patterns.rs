//! Pattern store: the named reference grids a network memorises.

use crate::error::{HopfieldError, Result};
use crate::grid::{dot, Grid};
use tracing::{debug, warn};

/// A memorised pattern with the name it was loaded under (e.g. `"A"`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: String,
    pub grid: Grid,
}

/// Ordered set of equally-sized patterns.
///
/// Insertion order only affects floating-point summation order during
/// training. An empty set is valid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternSet {
    rows: usize,
    cols: usize,
    patterns: Vec<Pattern>,
}

impl PatternSet {
    /// Empty set for `rows × cols` patterns.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            patterns: Vec::new(),
        }
    }

    /// Build a set from unnamed grids; names default to their index.
    pub fn from_grids(
        rows: usize,
        cols: usize,
        grids: impl IntoIterator<Item = Grid>,
    ) -> Result<Self> {
        let mut set = Self::new(rows, cols);
        for (i, grid) in grids.into_iter().enumerate() {
            set.push(i.to_string(), grid)?;
        }
        Ok(set)
    }

    /// Append a pattern. Its dimensions must match the set's.
    pub fn push(&mut self, name: impl Into<String>, grid: Grid) -> Result<()> {
        if grid.dims() != (self.rows, self.cols) {
            return Err(HopfieldError::shape(self.neurons(), grid.len()));
        }
        self.patterns.push(Pattern {
            name: name.into(),
            grid,
        });
        Ok(())
    }

    /// Parse a nested JSON grid and append it.
    pub fn push_json(&mut self, name: impl Into<String>, json: &str) -> Result<()> {
        let grid = Grid::from_json(json)?;
        self.push(name, grid)
    }

    /// Append every `(name, json)` entry that validates, skipping the rest.
    ///
    /// Returns the number of patterns added.
    pub fn ingest_lenient<'a, I>(&mut self, entries: I) -> usize
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut added = 0;
        for (name, json) in entries {
            match self.push_json(name, json) {
                Ok(()) => added += 1,
                Err(e) => warn!(pattern = name, error = %e, "skipping malformed pattern"),
            }
        }
        debug!(added, total = self.len(), "ingested patterns");
        added
    }

    /// `(rows, cols)` every pattern shares.
    #[inline]
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Neuron count N = rows·cols.
    #[inline]
    pub fn neurons(&self) -> usize {
        self.rows * self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pattern> {
        self.patterns.iter()
    }

    /// Flattened cells of each pattern, in insertion order.
    pub fn vectors(&self) -> impl Iterator<Item = &[i8]> {
        self.patterns.iter().map(|p| p.grid.as_slice())
    }

    pub fn get(&self, name: &str) -> Option<&Grid> {
        self.patterns.iter().find(|p| p.name == name).map(|p| &p.grid)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    /// Integer overlap `p·g` of `grid` with each pattern.
    pub fn overlaps(&self, grid: &Grid) -> Result<Vec<i64>> {
        if grid.len() != self.neurons() {
            return Err(HopfieldError::shape(self.neurons(), grid.len()));
        }
        Ok(self.vectors().map(|p| dot(p, grid.as_slice())).collect())
    }
}

/// Letter subsets the demo application offers as memories.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatternSelection {
    /// Letters A, B, C.
    AToC,
    /// Letters A through G.
    AToG,
}

impl PatternSelection {
    /// Parse the UI label (`"A-C"` / `"A-G"`).
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "A-C" => Some(Self::AToC),
            "A-G" => Some(Self::AToG),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::AToC => "A-C",
            Self::AToG => "A-G",
        }
    }

    pub fn letters(&self) -> &'static [&'static str] {
        static LETTERS: [&str; 7] = ["A", "B", "C", "D", "E", "F", "G"];
        match self {
            Self::AToC => &LETTERS[..3],
            Self::AToG => &LETTERS,
        }
    }

    /// Pattern file names the loader fetches, e.g. `"A.json"`.
    pub fn file_names(&self) -> Vec<String> {
        self.letters().iter().map(|l| format!("{l}.json")).collect()
    }
}
