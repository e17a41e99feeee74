// src/post.rs
// Post-processing over finished tallies: the known-defect correction,
// the spelling-variant merge, and the gender split. All three take
// their tables by argument; none touches the traversal.

use std::collections::HashMap;

use crate::tally::NameTally;

/// A named one-off data fix: merge counts filed under `from` into `to`.
/// Applying it twice is a no-op after the first application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Correction {
    pub from: String,
    pub to: String,
}

impl Correction {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Correction { from: from.into(), to: to.into() }
    }

    pub fn apply(&self, tally: &mut NameTally) {
        if self.from == self.to {
            return;
        }
        let count = tally.remove(&self.from);
        tally.add(&self.to, count);
    }
}

/// Fold variant spellings into their canonical keys, summing counts.
/// Names without a table entry pass through unchanged, in order.
pub fn merge_spellings(tally: &NameTally, table: &HashMap<&str, &str>) -> NameTally {
    let mut out = NameTally::new();
    for (name, count) in tally.iter() {
        let key = table.get(name).copied().unwrap_or(name);
        out.add(key, count);
    }
    out
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gender {
    Male,
    Female,
    /// Used by both genders; the payload is the male proportion.
    Split(f64),
}

/// Route each name's count into male/female tallies. Split names
/// apportion `male = round(count × p)` (half away from zero, the
/// default `f64::round`) and `female = count − male`, so the two sides
/// always sum back to the original count. Names absent from the table
/// are dropped from gendered output; that is policy, not loss — they
/// remain in the flat and categorized listings.
pub fn split_genders(
    tally: &NameTally,
    table: &HashMap<&str, Gender>,
) -> (NameTally, NameTally) {
    let mut male = NameTally::new();
    let mut female = NameTally::new();
    for (name, count) in tally.iter() {
        match table.get(name) {
            Some(Gender::Male) => male.add(name, count),
            Some(Gender::Female) => female.add(name, count),
            Some(Gender::Split(p)) => {
                let m = ((f64::from(count) * p).round() as u32).min(count);
                male.add(name, m);
                female.add(name, count - m);
            }
            None => {}
        }
    }
    (male, female)
}
