// src/engine/engine.rs
// Adaptive prefix expansion over the capped directory.
//
// Every branch ends in one of: Empty (dead), Exact (records folded,
// exactly once), Overflow (fan out one symbol deeper). The prefixes
// that resolve Exact/Empty form a prefix-partition of the surname
// space: no resolved prefix extends another, so the union of their
// result pages covers the population with no duplicates.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use crate::directory::Directory;
use crate::engine::types::{Anomaly, ResultPage, SearchReport};
use crate::params::{ALPHABET, MAX_DEPTH, REQUEST_PAUSE_MS, RETRIES, WORKERS};
use crate::progress::Progress;
use crate::tally::TallySet;

#[derive(Clone, Copy, Debug)]
pub struct SearchConfig {
    /// Longest prefix the engine will expand to. A branch still
    /// overflowing here is reported, not recursed.
    pub max_depth: usize,
    /// Extra attempts after a failed query before the branch is abandoned.
    pub retries: u32,
    /// Pause after each request.
    pub pause_ms: u64,
    /// Worker threads for the parallel frontier.
    pub workers: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: MAX_DEPTH,
            retries: RETRIES,
            pause_ms: REQUEST_PAUSE_MS,
            workers: WORKERS,
        }
    }
}

/// Traverse the whole surname space, folding every exactly-enumerated
/// page into `tallies`. Single-threaded; the parallel variant produces
/// identical tallies because folding commutes.
pub fn search<D: Directory>(
    dir: &D,
    tallies: &mut TallySet,
    cfg: &SearchConfig,
    mut progress: Option<&mut dyn Progress>,
) -> SearchReport {
    let mut report = SearchReport::default();
    if let Some(p) = progress.as_deref_mut() {
        p.begin(ALPHABET.len());
    }
    for c in ALPHABET {
        expand(dir, &s!(c), cfg, tallies, &mut report);
        if let Some(p) = progress.as_deref_mut() {
            p.letter_done(c);
        }
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    report
}

/// Like [`search`], but the 26 top-level subtrees are distributed over a
/// bounded worker pool. Each worker folds into a private accumulator;
/// partials merge on the caller's thread, so no lock guards the tally.
pub fn search_parallel<D: Directory + Sync>(
    dir: &D,
    tallies: &mut TallySet,
    cfg: &SearchConfig,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> SearchReport {
    let track_years = tallies.tracks_years();
    let cursor = AtomicUsize::new(0);
    let workers = cfg.workers.clamp(1, ALPHABET.len());

    if let Some(p) = progress.as_deref_mut() {
        p.begin(ALPHABET.len());
    }

    let report = thread::scope(|scope| {
        let (tx, rx) = mpsc::channel::<(char, TallySet, SearchReport)>();

        for _ in 0..workers {
            let tx = tx.clone();
            let cursor = &cursor;
            scope.spawn(move || {
                loop {
                    let i = cursor.fetch_add(1, Ordering::Relaxed);
                    let Some(&c) = ALPHABET.get(i) else { break };
                    let mut partial = TallySet::new(track_years);
                    let mut part_report = SearchReport::default();
                    expand(dir, &s!(c), cfg, &mut partial, &mut part_report);
                    let _ = tx.send((c, partial, part_report));
                }
            });
        }
        drop(tx); // caller is sole receiver now

        let mut report = SearchReport::default();
        for (c, partial, part_report) in rx.iter() {
            tallies.merge(&partial);
            report.absorb(part_report);
            if let Some(p) = progress.as_deref_mut() {
                p.letter_done(c);
            }
        }
        report
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    report
}

fn expand<D: Directory>(
    dir: &D,
    prefix: &str,
    cfg: &SearchConfig,
    tallies: &mut TallySet,
    report: &mut SearchReport,
) {
    match query_with_retry(dir, prefix, cfg, report) {
        Ok(ResultPage::Empty) => {}
        Ok(ResultPage::Exact(records)) => tallies.fold(&records),
        Ok(ResultPage::Overflow) => {
            if prefix.len() >= cfg.max_depth {
                // Pathological: more records than the cap share this
                // full prefix. Report instead of recursing forever.
                loge!("depth cap hit at {:?}, branch incomplete", prefix);
                report.anomalies.push(Anomaly::StillOverflowing { prefix: s!(prefix) });
                return;
            }
            for c in ALPHABET {
                let mut child = s!(prefix);
                child.push(c);
                expand(dir, &child, cfg, tallies, report);
            }
        }
        Err(cause) => {
            loge!("branch {:?} abandoned: {cause}", prefix);
            report.anomalies.push(Anomaly::BranchFailed { prefix: s!(prefix), cause });
        }
    }
}

fn query_with_retry<D: Directory>(
    dir: &D,
    prefix: &str,
    cfg: &SearchConfig,
    report: &mut SearchReport,
) -> Result<ResultPage, String> {
    let mut last_err = s!();
    for attempt in 0..=cfg.retries {
        report.queries += 1;
        let result = dir.query(prefix);
        if cfg.pause_ms > 0 {
            thread::sleep(Duration::from_millis(cfg.pause_ms)); // be polite
        }
        match result {
            Ok(page) => return Ok(page),
            Err(e) => {
                logd!("attempt {} for {:?} failed: {}", attempt + 1, prefix, e.cause);
                last_err = e.cause;
            }
        }
    }
    Err(last_err)
}
