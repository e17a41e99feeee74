// src/params.rs
use std::path::PathBuf;

// Net config
pub const HOST: &str = "iasext.wesleyan.edu";
pub const PORT: u16 = 80;
pub const SEARCH_PATH: &str = "/directory_public/f?p=100:3";
pub const SEARCH_FIELD: &str = "p_t04";

// Directory semantics
pub const ALPHABET: [char; 26] = [
    'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
    'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
];
pub const RESULT_CAP: usize = 30;

// Engine
pub const MAX_DEPTH: usize = 12;
pub const RETRIES: u32 = 1;

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 75; // be polite

// Local snapshots
pub const SNAPSHOT_STEM: &str = "names";

// Class-year partition tracked by the directory's undergraduate range
pub const YEAR_MIN: u16 = 2015;
pub const YEAR_MAX: u16 = 2018;

// Console report
pub const TOP_N: usize = 25;

/// One run's worth of options, resolved from the menu mode (and year prompt).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub force_refresh: bool,   // ignore local snapshots, hit the live directory
    pub merge_spellings: bool, // fold variant spellings into canonical keys
    pub split_genders: bool,   // emit per-gender listings
    pub year: Option<u16>,     // restrict to one class year
    pub out_dir: PathBuf,      // where snapshots live
}

impl Default for Params {
    fn default() -> Self {
        Params {
            force_refresh: false,
            merge_spellings: false,
            split_genders: false,
            year: None,
            out_dir: PathBuf::from("."),
        }
    }
}

impl Params {
    /// Map a menu mode to run options. Modes 5 and 6 still need a year
    /// filled in by the caller. Returns `None` for unknown modes.
    pub fn from_mode(mode: u32) -> Option<Self> {
        let mut p = Params::default();
        match mode {
            1 => {}
            2 => p.force_refresh = true,
            3 => p.merge_spellings = true,
            4 => p.split_genders = true,
            5 => {} // year set by caller
            6 => {
                p.force_refresh = true;
                p.merge_spellings = true;
                p.split_genders = true;
            }
            _ => return None,
        }
        Some(p)
    }

    pub fn wants_year(mode: u32) -> bool {
        mode == 5 || mode == 6
    }
}

pub fn year_in_range(year: u16) -> bool {
    (YEAR_MIN..=YEAR_MAX).contains(&year)
}
