// src/tally.rs
// Accumulators for first-name counts. Insertion order is kept so the
// final ranking can break count ties by discovery order (stable sort).

use std::collections::HashMap;

use crate::engine::types::Record;
use crate::params::{YEAR_MAX, YEAR_MIN};

/// An insertion-ordered name → count map.
#[derive(Clone, Debug, Default)]
pub struct NameTally {
    entries: Vec<(String, u32)>,
    index: HashMap<String, usize>,
}

impl NameTally {
    pub fn new() -> Self {
        NameTally::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    pub fn get(&self, name: &str) -> u32 {
        self.index.get(name).map_or(0, |&i| self.entries[i].1)
    }

    pub fn add(&mut self, name: &str, n: u32) {
        if n == 0 {
            return;
        }
        match self.index.get(name) {
            Some(&i) => self.entries[i].1 += n,
            None => {
                self.index.insert(s!(name), self.entries.len());
                self.entries.push((s!(name), n));
            }
        }
    }

    /// Remove a name and return its count (0 if absent).
    pub fn remove(&mut self, name: &str) -> u32 {
        let Some(i) = self.index.remove(name) else {
            return 0;
        };
        let (_, count) = self.entries.remove(i);
        // Positions after the removed entry shift down by one.
        for (_, idx) in self.index.iter_mut() {
            if *idx > i {
                *idx -= 1;
            }
        }
        count
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(n, c)| (n.as_str(), *c))
    }

    /// Fold another tally into this one. Commutes: merging in any order
    /// yields the same counts.
    pub fn absorb(&mut self, other: &NameTally) {
        for (name, count) in other.iter() {
            self.add(name, count);
        }
    }

    /// Entries sorted by descending count; ties keep discovery order.
    pub fn ranked(&self) -> Vec<(String, u32)> {
        let mut out = self.entries.clone();
        out.sort_by(|a, b| b.1.cmp(&a.1)); // stable
        out
    }
}

// Equality ignores insertion order; two tallies are the same counts.
impl PartialEq for NameTally {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.iter().all(|(name, count)| other.get(name) == count)
    }
}
impl Eq for NameTally {}

/// Per-class-year tallies across the tracked range, plus a catch-all
/// bucket for records with no year or one outside the range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YearPartition {
    buckets: Vec<(u16, NameTally)>,
    pub other: NameTally,
}

impl YearPartition {
    fn new() -> Self {
        YearPartition {
            buckets: (YEAR_MIN..=YEAR_MAX).map(|y| (y, NameTally::new())).collect(),
            other: NameTally::new(),
        }
    }

    pub fn bucket(&self, year: u16) -> Option<&NameTally> {
        self.buckets.iter().find(|(y, _)| *y == year).map(|(_, t)| t)
    }

    fn bucket_mut(&mut self, year: u16) -> Option<&mut NameTally> {
        self.buckets.iter_mut().find(|(y, _)| *y == year).map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &NameTally)> {
        self.buckets.iter().map(|(y, t)| (*y, t))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (u16, &mut NameTally)> {
        self.buckets.iter_mut().map(|(y, t)| (*y, t))
    }
}

/// The full accumulator for one run: a flat tally, and optionally the
/// class-year partition. Folding is purely additive, so any subset of
/// the record stream may be folded in any order (or on any worker) and
/// merged later.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TallySet {
    pub flat: NameTally,
    pub years: Option<YearPartition>,
}

impl TallySet {
    pub fn new(track_years: bool) -> Self {
        TallySet {
            flat: NameTally::new(),
            years: track_years.then(YearPartition::new),
        }
    }

    pub fn tracks_years(&self) -> bool {
        self.years.is_some()
    }

    pub fn fold(&mut self, records: &[Record]) {
        for r in records {
            self.flat.add(&r.first_name, 1);
            if let Some(part) = self.years.as_mut() {
                match r.class_year.and_then(|y| part.bucket_mut(y)) {
                    Some(bucket) => bucket.add(&r.first_name, 1),
                    None => part.other.add(&r.first_name, 1),
                }
            }
        }
    }

    /// Merge a partial accumulator produced elsewhere (another worker's
    /// subtree, a cached snapshot).
    pub fn merge(&mut self, other: &TallySet) {
        self.flat.absorb(&other.flat);
        if let (Some(mine), Some(theirs)) = (self.years.as_mut(), other.years.as_ref()) {
            for (year, tally) in theirs.iter() {
                if let Some(bucket) = mine.bucket_mut(year) {
                    bucket.absorb(tally);
                }
            }
            mine.other.absorb(&theirs.other);
        }
    }
}
