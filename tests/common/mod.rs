// tests/common/mod.rs
//
// Synthetic directory fixture: a finite record set behind the same
// trait the live directory implements, with a query log and injectable
// failures.
//
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use commonality::directory::{Directory, QueryError};
use commonality::engine::types::{Record, ResultPage};
use commonality::s;

pub struct FakeDirectory {
    entries: Vec<(String, Record)>, // lowercase surname, record
    cap: usize,
    queries: Mutex<Vec<(String, &'static str)>>,
    failures: Mutex<HashMap<String, u32>>, // remaining failures per prefix
}

impl FakeDirectory {
    pub fn new(cap: usize) -> Self {
        FakeDirectory {
            entries: Vec::new(),
            cap,
            queries: Mutex::new(Vec::new()),
            failures: Mutex::new(HashMap::new()),
        }
    }

    pub fn push(&mut self, surname: &str, first: &str, year: Option<u16>) {
        self.entries
            .push((surname.to_ascii_lowercase(), Record::new(first, year)));
    }

    pub fn push_many(&mut self, surname: &str, first: &str, year: Option<u16>, n: usize) {
        for _ in 0..n {
            self.push(surname, first, year);
        }
    }

    /// Make the next `times` queries for `prefix` fail.
    pub fn fail_times(&mut self, prefix: &str, times: u32) {
        self.failures.lock().unwrap().insert(s!(prefix), times);
    }

    pub fn population(&self) -> usize {
        self.entries.len()
    }

    /// Every query issued so far, with its outcome tag
    /// ("empty" | "exact" | "overflow" | "failed").
    pub fn query_log(&self) -> Vec<(String, &'static str)> {
        self.queries.lock().unwrap().clone()
    }
}

impl Directory for FakeDirectory {
    fn query(&self, prefix: &str) -> Result<ResultPage, QueryError> {
        assert!(!prefix.is_empty(), "engine must never query an empty prefix");

        if let Some(remaining) = self.failures.lock().unwrap().get_mut(prefix) {
            if *remaining > 0 {
                *remaining -= 1;
                self.queries.lock().unwrap().push((s!(prefix), "failed"));
                return Err(QueryError {
                    prefix: s!(prefix),
                    cause: s!("injected transport failure"),
                });
            }
        }

        let matches: Vec<Record> = self
            .entries
            .iter()
            .filter(|(surname, _)| surname.starts_with(prefix))
            .map(|(_, r)| r.clone())
            .collect();

        let (outcome, page) = match matches.len() {
            0 => ("empty", ResultPage::Empty),
            n if n > self.cap => ("overflow", ResultPage::Overflow),
            _ => ("exact", ResultPage::Exact(matches)),
        };
        self.queries.lock().unwrap().push((s!(prefix), outcome));
        Ok(page)
    }
}
