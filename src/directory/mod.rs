// src/directory/mod.rs
//! The external directory, behind a one-method seam. The engine only
//! ever sees `query(prefix) -> ResultPage`; tests and benches substitute
//! a synthetic directory through the same trait.

pub mod page;

use std::error::Error;
use std::fmt;

use crate::core::net;
use crate::engine::types::ResultPage;
use crate::params::{HOST, PORT, SEARCH_FIELD, SEARCH_PATH};

/// Transport or parse failure for one query. Distinct from an empty
/// page on purpose: a failed branch must never fold in as zero results.
#[derive(Debug)]
pub struct QueryError {
    pub prefix: String,
    pub cause: String,
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "query for prefix {:?} failed: {}", self.prefix, self.cause)
    }
}

impl Error for QueryError {}

pub trait Directory {
    /// Run one last-name search. `prefix` is non-empty, lowercase,
    /// drawn from the query alphabet.
    fn query(&self, prefix: &str) -> Result<ResultPage, QueryError>;
}

/// The live student directory: one form POST per query.
pub struct LiveDirectory {
    host: String,
    port: u16,
    path: String,
    field: String,
}

impl LiveDirectory {
    pub fn new() -> Self {
        LiveDirectory {
            host: s!(HOST),
            port: PORT,
            path: s!(SEARCH_PATH),
            field: s!(SEARCH_FIELD),
        }
    }
}

impl Default for LiveDirectory {
    fn default() -> Self {
        LiveDirectory::new()
    }
}

impl Directory for LiveDirectory {
    fn query(&self, prefix: &str) -> Result<ResultPage, QueryError> {
        let doc = net::form_post(&self.host, self.port, &self.path, &self.field, prefix)
            .map_err(|e| QueryError { prefix: s!(prefix), cause: e.to_string() })?;
        logd!("queried {:?} ({} bytes)", prefix, doc.len());
        Ok(page::parse(&doc))
    }
}
