//! Operator precedence table.
//!
//! Precedence is a signed integer with function application fixed at
//! [`CALL_PRECEDENCE`]. Operators in the `lower` bands bind looser than
//! application (band `i` gets `-(i + 1)`); operators in the `higher` bands
//! bind tighter (band `i` gets `i + 1`). A larger number binds tighter.

use keel_ir::Name;
use rustc_hash::FxHashMap;

use crate::ParseError;

/// Precedence of implicit application.
pub const CALL_PRECEDENCE: i32 = 0;

const DEFAULT_LOWER: &[&[&str]] = &[
    &["+", "-", "++"],
    &["==", "!=", "<", ">", "<=", ">="],
    &["="],
];

const DEFAULT_HIGHER: &[&[&str]] = &[&["*", "/", "%"]];

#[derive(Clone, Debug)]
pub struct PrecedenceTable {
    levels: FxHashMap<Name, i32>,
}

fn band_levels<'a>(
    lower: &'a [&'a [&'a str]],
    higher: &'a [&'a [&'a str]],
) -> impl Iterator<Item = (&'a str, i32)> + 'a {
    let level = |i: usize| i32::try_from(i).map_or(i32::MAX, |i| i.saturating_add(1));
    let lower = lower.iter().enumerate().flat_map(move |(i, band)| {
        band.iter().map(move |&sym| (sym, -level(i)))
    });
    let higher = higher.iter().enumerate().flat_map(move |(i, band)| {
        band.iter().map(move |&sym| (sym, level(i)))
    });
    lower.chain(higher)
}

impl PrecedenceTable {
    /// Build a table from ordered bands of equal-precedence symbols.
    ///
    /// Fails if any symbol appears in more than one band, within or across
    /// the two lists.
    pub fn new(lower: &[&[&str]], higher: &[&[&str]]) -> Result<Self, ParseError> {
        let mut levels = FxHashMap::default();
        for (sym, level) in band_levels(lower, higher) {
            let symbol = Name::new(sym);
            if levels.insert(symbol.clone(), level).is_some() {
                return Err(ParseError::DuplicateOperator { symbol });
            }
        }
        Ok(PrecedenceTable { levels })
    }

    /// The table the `keel` binary uses.
    pub fn standard() -> Self {
        let levels = band_levels(DEFAULT_LOWER, DEFAULT_HIGHER)
            .map(|(sym, level)| (Name::new(sym), level))
            .collect();
        PrecedenceTable { levels }
    }

    #[inline]
    pub fn get(&self, symbol: &str) -> Option<i32> {
        self.levels.get(symbol).copied()
    }

    #[inline]
    pub fn contains(&self, symbol: &str) -> bool {
        self.levels.contains_key(symbol)
    }

    /// Registered symbols, unordered.
    pub fn symbols(&self) -> impl Iterator<Item = &Name> {
        self.levels.keys()
    }
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        PrecedenceTable::standard()
    }
}
