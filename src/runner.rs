// src/runner.rs
// Orchestration for one run: seed from a local snapshot or traverse the
// live directory, post-process per the selected options, persist
// snapshots, and hand listings back for display.

use std::{error::Error, path::PathBuf};

use crate::directory::Directory;
use crate::engine::{self, SearchConfig};
use crate::params::Params;
use crate::post;
use crate::progress::Progress;
use crate::store;
use crate::tables;
use crate::tally::{NameTally, TallySet};

/// One ranked list ready for the console.
pub struct Listing {
    pub title: String,
    pub entries: Vec<(String, u32)>,
}

pub struct RunOutcome {
    pub listings: Vec<Listing>,
    /// Snapshot files written or reused this run.
    pub files: Vec<PathBuf>,
    /// True when some branch could not be resolved; counts are a floor,
    /// not the population.
    pub incomplete: bool,
}

pub fn run<D: Directory + Sync>(
    dir: &D,
    params: &Params,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunOutcome, Box<dyn Error>> {
    let year_part: Vec<String> = params.year.iter().map(|y| y.to_string()).collect();
    let scope: Vec<&str> = year_part.iter().map(|s| s.as_str()).collect();
    let base_path = params.out_dir.join(store::snapshot_path(&scope));

    let mut files = Vec::new();
    let mut incomplete = false;

    let cached = if params.force_refresh {
        None
    } else {
        store::load_tally(&base_path)?
    };

    let correction = tables::default_correction();

    let mut working = match cached {
        Some(mut tally) => {
            if let Some(p) = progress.as_deref_mut() {
                p.log(&format!("Using local data from {}", base_path.display()));
            }
            files.push(base_path.clone());
            // Snapshots may predate the rule; applying it again is a no-op.
            correction.apply(&mut tally);
            tally
        }
        None => {
            if let Some(p) = progress.as_deref_mut() {
                if !params.force_refresh {
                    p.log("No local data present.");
                }
                p.log("Fetching data from live website...");
            }

            // Track years on every live run so the per-year snapshots
            // land on disk whether or not this run filters by year.
            let mut tallies = TallySet::new(true);
            let report = engine::search_parallel(
                dir,
                &mut tallies,
                &SearchConfig::default(),
                progress.as_deref_mut(),
            );
            logf!(
                "traversal finished: {} queries, {} anomalies",
                report.queries,
                report.anomalies.len()
            );
            if !report.complete() {
                incomplete = true;
                for a in &report.anomalies {
                    if let Some(p) = progress.as_deref_mut() {
                        p.log(&format!("Warning: {a}"));
                    }
                }
            }

            // Correct before persisting so the snapshots carry the fix.
            correction.apply(&mut tallies.flat);
            if let Some(part) = tallies.years.as_mut() {
                for (_, bucket) in part.iter_mut() {
                    correction.apply(bucket);
                }
                correction.apply(&mut part.other);
            }

            files.extend(persist_snapshots(&tallies, params)?);

            match (params.year, tallies.years.as_ref()) {
                (Some(year), Some(part)) => {
                    part.bucket(year).cloned().unwrap_or_default()
                }
                _ => tallies.flat,
            }
        }
    };

    let scope_suffix = match params.year {
        Some(year) => format!(" (Class of {year})"),
        None => s!(),
    };

    let mut listings = Vec::new();

    if params.merge_spellings {
        working = post::merge_spellings(&working, &tables::spelling_variants());
        let path = params.out_dir.join(store::snapshot_path(&with_part(&scope, "categorized")));
        if store::save_tally(&path, &working.ranked(), params.force_refresh)? {
            files.push(path);
        }
        if !params.split_genders {
            listings.push(Listing {
                title: format!("Top first name categories{scope_suffix}"),
                entries: working.ranked(),
            });
        }
    }

    if params.split_genders {
        let (male, female) = post::split_genders(&working, &tables::gender_table());
        for (label, tally) in [("male", &male), ("female", &female)] {
            let path = params.out_dir.join(store::snapshot_path(&with_part(&scope, label)));
            if store::save_tally(&path, &tally.ranked(), params.force_refresh)? {
                files.push(path);
            }
        }
        listings.push(gendered_listing("male", &male, &scope_suffix));
        listings.push(gendered_listing("female", &female, &scope_suffix));
    }

    if !params.merge_spellings && !params.split_genders {
        listings.push(Listing {
            title: format!("Top first names{scope_suffix}"),
            entries: working.ranked(),
        });
    }

    Ok(RunOutcome { listings, files, incomplete })
}

fn with_part<'a>(scope: &[&'a str], part: &'a str) -> Vec<&'a str> {
    let mut v = scope.to_vec();
    v.push(part);
    v
}

fn gendered_listing(label: &str, tally: &NameTally, scope_suffix: &str) -> Listing {
    Listing {
        title: format!("Top {label} first names{scope_suffix}"),
        entries: tally.ranked(),
    }
}

/// Write the flat snapshot plus one per year bucket (and the catch-all).
fn persist_snapshots(
    tallies: &TallySet,
    params: &Params,
) -> Result<Vec<PathBuf>, Box<dyn Error>> {
    let force = params.force_refresh;
    let mut written = Vec::new();
    let flat_path = params.out_dir.join(store::snapshot_path(&[]));
    if store::save_tally(&flat_path, &tallies.flat.ranked(), force)? {
        written.push(flat_path);
    }
    if let Some(part) = tallies.years.as_ref() {
        for (year, tally) in part.iter() {
            let year = year.to_string();
            let path = params.out_dir.join(store::snapshot_path(&[year.as_str()]));
            if store::save_tally(&path, &tally.ranked(), force)? {
                written.push(path);
            }
        }
        let other_path = params.out_dir.join(store::snapshot_path(&["other"]));
        if store::save_tally(&other_path, &part.other.ranked(), force)? {
            written.push(other_path);
        }
    }
    Ok(written)
}
