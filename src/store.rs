// src/store.rs
// Snapshot cache: `name,count` lines, no header. Reads fold additively
// (duplicate name rows sum), so merged/incremental snapshots load
// correctly. Writes skip existing files unless forced.

use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use crate::csv;
use crate::params::SNAPSHOT_STEM;
use crate::tally::NameTally;

/// Load a snapshot into a tally. `Ok(None)` when the file is absent.
/// Malformed rows are skipped with a warning, never fatal.
pub fn load_tally(path: &Path) -> io::Result<Option<NameTally>> {
    if !path.exists() {
        return Ok(None);
    }
    let text = fs::read_to_string(path)?;
    let mut tally = NameTally::new();
    for row in csv::parse_rows(&text) {
        let (name, count) = match row.as_slice() {
            [name, count] if !name.is_empty() => (name, count),
            _ => {
                warn_row(path, &row, "wrong shape");
                continue;
            }
        };
        match count.trim().parse::<u32>() {
            Ok(n) => tally.add(name, n),
            Err(_) => warn_row(path, &row, "non-integer count"),
        }
    }
    Ok(Some(tally))
}

fn warn_row(path: &Path, row: &[String], why: &str) {
    let msg = format!("skipping bad row {row:?} in {} ({why})", path.display());
    loge!("{msg}");
    eprintln!("Warning: {msg}");
}

/// Write ranked entries to `path`. Skips when the file already exists
/// unless `force` is set. Returns whether a write happened.
pub fn save_tally(path: &Path, ranked: &[(String, u32)], force: bool) -> io::Result<bool> {
    if path.exists() && !force {
        logd!("snapshot {} already present, not overwriting", path.display());
        return Ok(false);
    }
    let mut w = BufWriter::new(File::create(path)?);
    for (name, count) in ranked {
        let count = count.to_string();
        csv::write_row(&mut w, &[name.as_str(), count.as_str()])?;
    }
    Ok(true)
}

/// Snapshot path for a tally variant: `names.csv`, `names_2016.csv`,
/// `names_2016_male.csv`, `names_categorized.csv`, ...
pub fn snapshot_path(parts: &[&str]) -> PathBuf {
    let mut stem = s!(SNAPSHOT_STEM);
    for p in parts {
        stem.push('_');
        stem.push_str(p);
    }
    PathBuf::from(format!("{stem}.csv"))
}
