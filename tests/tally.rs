// tests/tally.rs
//
// Accumulator behavior: commutative folding, year bucketing, and the
// discovery-order tie-break in ranking.
//
use commonality::engine::types::Record;
use commonality::tally::{NameTally, TallySet};

fn sample_records() -> Vec<Record> {
    vec![
        Record::new("Sam", Some(2016)),
        Record::new("Alice", Some(2015)),
        Record::new("Sam", Some(2018)),
        Record::new("Bo", None),
        Record::new("Sam", Some(2020)),
        Record::new("Alice", Some(2016)),
    ]
}

#[test]
fn folding_commutes_under_permutation() {
    let records = sample_records();

    let mut forward = TallySet::new(true);
    forward.fold(&records);

    let mut reversed_records = records.clone();
    reversed_records.reverse();
    let mut reversed = TallySet::new(true);
    reversed.fold(&reversed_records);

    assert_eq!(forward, reversed);
}

#[test]
fn folding_commutes_under_split_and_merge() {
    let records = sample_records();

    let mut whole = TallySet::new(true);
    whole.fold(&records);

    let (left, right) = records.split_at(2);
    let mut a = TallySet::new(true);
    a.fold(left);
    let mut b = TallySet::new(true);
    b.fold(right);
    a.merge(&b);

    assert_eq!(whole, a);
}

#[test]
fn year_buckets_route_tracked_range_only() {
    let mut tallies = TallySet::new(true);
    tallies.fold(&sample_records());

    let part = tallies.years.as_ref().unwrap();
    assert_eq!(part.bucket(2016).unwrap().get("Sam"), 1);
    assert_eq!(part.bucket(2016).unwrap().get("Alice"), 1);
    assert_eq!(part.bucket(2015).unwrap().get("Alice"), 1);
    assert_eq!(part.bucket(2018).unwrap().get("Sam"), 1);

    // Missing year and out-of-range year land in the catch-all.
    assert_eq!(part.other.get("Bo"), 1);
    assert_eq!(part.other.get("Sam"), 1);

    // The flat tally sees everything regardless.
    assert_eq!(tallies.flat.get("Sam"), 3);
    assert_eq!(tallies.flat.total(), 6);
}

#[test]
fn ranking_breaks_ties_by_discovery_order() {
    let mut tally = NameTally::new();
    tally.add("Alpha", 2);
    tally.add("Beta", 2);
    tally.add("Gamma", 3);
    tally.add("Delta", 2);

    let ranked = tally.ranked();
    let names: Vec<&str> = ranked.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["Gamma", "Alpha", "Beta", "Delta"]);
}

#[test]
fn remove_keeps_remaining_entries_addressable() {
    let mut tally = NameTally::new();
    tally.add("Ann", 1);
    tally.add("Bea", 2);
    tally.add("Cat", 3);

    assert_eq!(tally.remove("Ann"), 1);
    assert_eq!(tally.remove("Ann"), 0);
    assert_eq!(tally.len(), 2);

    // Later entries must still be reachable after the index shifts.
    tally.add("Cat", 4);
    assert_eq!(tally.get("Cat"), 7);
    assert_eq!(tally.get("Bea"), 2);
    assert_eq!(tally.total(), 9);
}
