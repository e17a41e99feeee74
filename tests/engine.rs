// tests/engine.rs
//
// Properties of the prefix-expansion search: coverage, the resolved-
// prefix partition, defensive termination, and failure reporting.
//
mod common;

use common::FakeDirectory;
use commonality::engine::types::Anomaly;
use commonality::engine::{SearchConfig, search, search_parallel};
use commonality::tally::TallySet;

fn cfg() -> SearchConfig {
    SearchConfig { max_depth: 12, retries: 1, pause_ms: 0, workers: 4 }
}

/// A small population spread unevenly across the surname space.
fn populate(dir: &mut FakeDirectory) {
    dir.push_many("smith", "Sam", Some(2016), 25);
    dir.push_many("smythe", "Alice", Some(2015), 10);
    dir.push_many("smart", "Bo", None, 3);
    dir.push_many("jones", "Cyrus", Some(2018), 7);
    dir.push_many("jonas", "Dana", Some(2017), 6);
    dir.push("adams", "Elena", Some(2020));
}

// Forty distinct surnames, clustered so shared prefixes overflow at
// small caps. None is a prefix of another, so every cap down to 1 can
// resolve every branch.
fn distinct_surnames() -> Vec<String> {
    let mut out = Vec::new();
    for stem in ["bar", "ben", "bur", "mac", "mar", "mil", "sal", "san", "sim", "sto"] {
        for tail in ["ber", "den", "ley", "ton"] {
            out.push(format!("{stem}{tail}"));
        }
    }
    out
}

#[test]
fn coverage_exact_at_any_cap() {
    let firsts = ["Ada", "Ben", "Cal", "Dee", "Eli"];
    for cap in [1, 2, 5, 30, 100] {
        let mut dir = FakeDirectory::new(cap);
        for (i, surname) in distinct_surnames().iter().enumerate() {
            dir.push(surname, firsts[i % firsts.len()], Some(2015 + (i % 4) as u16));
        }

        let mut tallies = TallySet::new(false);
        let report = search(&dir, &mut tallies, &cfg(), None);

        assert!(report.complete(), "cap {cap}: no anomalies expected");
        assert_eq!(
            tallies.flat.total(),
            dir.population() as u64,
            "cap {cap}: every record counted exactly once"
        );
    }
}

// The full population also survives a cap large enough for the
// clustered distribution in `populate` (25 share one surname).
#[test]
fn coverage_with_shared_surnames() {
    for cap in [25, 30, 100] {
        let mut dir = FakeDirectory::new(cap);
        populate(&mut dir);

        let mut tallies = TallySet::new(false);
        let report = search(&dir, &mut tallies, &cfg(), None);

        assert!(report.complete());
        assert_eq!(tallies.flat.total(), dir.population() as u64);
    }
}

#[test]
fn resolved_prefixes_form_a_partition() {
    let mut dir = FakeDirectory::new(5);
    populate(&mut dir);

    let mut tallies = TallySet::new(false);
    search(&dir, &mut tallies, &cfg(), None);

    let resolved: Vec<String> = dir
        .query_log()
        .into_iter()
        .filter(|(_, outcome)| *outcome == "exact" || *outcome == "empty")
        .map(|(prefix, _)| prefix)
        .collect();

    for a in &resolved {
        for b in &resolved {
            if a != b {
                assert!(
                    !a.starts_with(b.as_str()),
                    "{a:?} extends resolved prefix {b:?}"
                );
            }
        }
    }
}

#[test]
fn no_redundant_queries() {
    let mut dir = FakeDirectory::new(5);
    populate(&mut dir);

    let mut tallies = TallySet::new(false);
    let report = search(&dir, &mut tallies, &cfg(), None);

    let mut prefixes: Vec<String> =
        dir.query_log().into_iter().map(|(p, _)| p).collect();
    assert_eq!(report.queries, prefixes.len());
    prefixes.sort();
    let before = prefixes.len();
    prefixes.dedup();
    assert_eq!(before, prefixes.len(), "a prefix was queried twice");
}

// 29 Smiths fit under the cap, so "s" resolves in one query and the
// engine never descends into "sa".."sz".
#[test]
fn under_cap_branch_resolves_without_descent() {
    let mut dir = FakeDirectory::new(30);
    dir.push_many("smith", "Sam", None, 29);

    let mut tallies = TallySet::new(false);
    let report = search(&dir, &mut tallies, &cfg(), None);

    assert_eq!(tallies.flat.get("Sam"), 29);
    assert_eq!(report.queries, 26, "one query per letter, nothing deeper");
    assert!(dir.query_log().iter().all(|(p, _)| p.len() == 1));
}

// 35 records under "sm" overflow at "s", so the engine fans out to
// "sa".."sz" (and again under "sm") and the exact pages sum to the
// population with no duplicates.
#[test]
fn overflow_branch_fans_out_and_sums() {
    let mut dir = FakeDirectory::new(30);
    dir.push_many("smart", "Ann", None, 10);
    dir.push_many("smith", "Sam", None, 15);
    dir.push_many("smols", "Tom", None, 10);

    let mut tallies = TallySet::new(false);
    let report = search(&dir, &mut tallies, &cfg(), None);

    assert!(report.complete());
    assert_eq!(tallies.flat.total(), 35);
    assert_eq!(tallies.flat.get("Ann"), 10);
    assert_eq!(tallies.flat.get("Sam"), 15);
    assert_eq!(tallies.flat.get("Tom"), 10);

    let log = dir.query_log();
    let outcome_of = |p: &str| {
        log.iter().find(|(q, _)| q == p).map(|(_, o)| *o)
    };
    assert_eq!(outcome_of("s"), Some("overflow"));
    assert_eq!(outcome_of("sm"), Some("overflow"));
    assert_eq!(outcome_of("sa"), Some("empty"));
    assert_eq!(outcome_of("smi"), Some("exact"));
}

// Pathological case: more records than the cap share one full surname.
// The depth cap turns would-be unbounded recursion into a reported
// anomaly.
#[test]
fn depth_cap_reports_still_overflowing_branch() {
    let mut dir = FakeDirectory::new(30);
    dir.push_many("ab", "Flood", None, 40);
    dir.push_many("carter", "Jo", None, 4);

    let mut tallies = TallySet::new(false);
    let mut config = cfg();
    config.max_depth = 2;
    let report = search(&dir, &mut tallies, &config, None);

    assert!(!report.complete());
    assert_eq!(
        report.anomalies,
        vec![Anomaly::StillOverflowing { prefix: "ab".into() }]
    );
    // The rest of the space is still counted.
    assert_eq!(tallies.flat.get("Jo"), 4);
}

#[test]
fn transient_failure_is_retried_and_recovered() {
    let mut dir = FakeDirectory::new(30);
    populate(&mut dir);
    dir.fail_times("j", 1);

    let mut tallies = TallySet::new(false);
    let report = search(&dir, &mut tallies, &cfg(), None);

    assert!(report.complete(), "one retry should absorb one failure");
    assert_eq!(tallies.flat.total(), dir.population() as u64);

    let attempts = dir.query_log().iter().filter(|(p, _)| p == "j").count();
    assert_eq!(attempts, 2);
}

#[test]
fn exhausted_retries_surface_as_incomplete_branch() {
    let mut dir = FakeDirectory::new(30);
    populate(&mut dir);
    dir.fail_times("j", 5); // beyond the retry budget

    let mut tallies = TallySet::new(false);
    let report = search(&dir, &mut tallies, &cfg(), None);

    assert!(!report.complete());
    match report.anomalies.as_slice() {
        [Anomaly::BranchFailed { prefix, .. }] => assert_eq!(prefix, "j"),
        other => panic!("expected one failed branch, got {other:?}"),
    }
    // Never folded in as zero: the other branches are intact, and the
    // "j" records are absent rather than miscounted.
    assert_eq!(tallies.flat.get("Cyrus"), 0);
    assert_eq!(tallies.flat.get("Sam"), 25);
}

#[test]
fn parallel_and_sequential_tallies_agree() {
    let mut seq_dir = FakeDirectory::new(5);
    populate(&mut seq_dir);
    let mut par_dir = FakeDirectory::new(5);
    populate(&mut par_dir);

    let mut sequential = TallySet::new(true);
    let seq_report = search(&seq_dir, &mut sequential, &cfg(), None);

    let mut parallel = TallySet::new(true);
    let par_report = search_parallel(&par_dir, &mut parallel, &cfg(), None);

    assert!(seq_report.complete() && par_report.complete());
    assert_eq!(seq_report.queries, par_report.queries);
    assert_eq!(sequential, parallel);
}

// Failure accounting must survive the worker fan-out: per-attempt query
// counts and anomalies from every worker land in the merged report just
// as they do in a sequential run.
#[test]
fn parallel_failure_reporting_matches_sequential() {
    fn anomaly_prefixes(anomalies: &[Anomaly]) -> Vec<String> {
        let mut out: Vec<String> = anomalies
            .iter()
            .map(|a| match a {
                Anomaly::StillOverflowing { prefix } => prefix.clone(),
                Anomaly::BranchFailed { prefix, .. } => prefix.clone(),
            })
            .collect();
        out.sort();
        out
    }

    let build = || {
        let mut dir = FakeDirectory::new(5);
        populate(&mut dir);
        dir.fail_times("j", 5); // beyond the retry budget
        dir.fail_times("a", 1); // absorbed by one retry
        dir
    };
    let seq_dir = build();
    let par_dir = build();

    let mut sequential = TallySet::new(true);
    let seq_report = search(&seq_dir, &mut sequential, &cfg(), None);

    let mut parallel = TallySet::new(true);
    let par_report = search_parallel(&par_dir, &mut parallel, &cfg(), None);

    assert!(!seq_report.complete() && !par_report.complete());
    assert_eq!(anomaly_prefixes(&seq_report.anomalies), vec!["j"]);
    assert_eq!(
        anomaly_prefixes(&seq_report.anomalies),
        anomaly_prefixes(&par_report.anomalies)
    );
    // Retried attempts count per request, on whichever worker made them.
    assert_eq!(seq_report.queries, par_report.queries);
    assert_eq!(sequential, parallel);
    assert_eq!(parallel.flat.get("Elena"), 1, "retried branch recovered");
    assert_eq!(parallel.flat.get("Cyrus"), 0, "failed branch not miscounted");
}
