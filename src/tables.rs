// src/tables.rs
// Static lookup tables, packaged as plain data the post-processing
// steps take by argument. Swapping a table never touches the algorithm.

use std::collections::HashMap;

use crate::post::{Correction, Gender};

/// The one known export defect: a single student's first name comes back
/// with a trailing space. Isolated here as a named rule so the fix is
/// independently verifiable against future directory exports.
pub fn default_correction() -> Correction {
    Correction::new("Matthew ", "Matthew")
}

/// Variant spelling → canonical key.
pub fn spelling_variants() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("Sara", "Sarah"),
        ("Matthew", "Matt"),
        ("Emilie", "Emily"),
        ("Michel", "Michael"),
        ("Becky", "Rebecca"),
        ("Rachael", "Rachel"),
        ("William", "Will"),
        ("Zachary", "Zach"),
        ("Zachariah", "Zach"),
        ("Zack", "Zach"),
        // "Alex" is a tricky case: a full male first name, or short for
        // either Alexandra or Alexander. Count them all under "Alex".
        ("Alexander", "Alex"),
        ("Alexandra", "Alex"),
        // Same problem for "Sam" (Samantha and Samuel)...
        ("Samuel", "Sam"),
        ("Samantha", "Sam"),
        // ...and "Gabe" (Gabriel and Gabrielle).
        ("Gabriel", "Gabe"),
        ("Gabrielle", "Gabe"),
        ("Jonathan", "John"),
        ("Jon", "John"),
        ("Christopher", "Chris"),
        ("Benjamin", "Ben"),
        ("Katherine", "Catherine"),
        ("Nicholas", "Nick"),
        ("Joshua", "Josh"),
        ("Maxwell", "Max"),
    ])
}

/// Name → gender label. `Split` carries the male proportion for names
/// used by both genders. Names absent here are dropped from gendered
/// listings only; they still count in the flat and categorized ones.
pub fn gender_table() -> HashMap<&'static str, Gender> {
    use Gender::*;
    HashMap::from([
        ("Aaron", Male),
        ("Adam", Male),
        ("Alexander", Male),
        ("Alexandra", Female),
        ("Alex", Split(0.75)),
        ("Alison", Female),
        ("Amanda", Female),
        ("Andrew", Male),
        ("Anna", Female),
        ("Ben", Male),
        ("Benjamin", Male),
        ("Becky", Female),
        ("Caroline", Female),
        ("Catherine", Female),
        ("Charlotte", Female),
        ("Chris", Male),
        ("Christopher", Male),
        ("Claire", Female),
        ("Daniel", Male),
        ("David", Male),
        ("Emilie", Female),
        ("Emily", Female),
        ("Emma", Female),
        ("Eric", Male),
        ("Gabe", Split(0.5)),
        ("Gabriel", Male),
        ("Gabrielle", Female),
        ("Grace", Female),
        ("Hannah", Female),
        ("Jack", Male),
        ("Jacob", Male),
        ("James", Male),
        ("John", Male),
        ("Jon", Male),
        ("Jonathan", Male),
        ("Jordan", Split(0.5)),
        ("Josh", Male),
        ("Joshua", Male),
        ("Julia", Female),
        ("Kate", Female),
        ("Katherine", Female),
        ("Laura", Female),
        ("Lily", Female),
        ("Matt", Male),
        ("Matthew", Male),
        ("Max", Male),
        ("Maxwell", Male),
        ("Michael", Male),
        ("Michel", Male),
        ("Nick", Male),
        ("Nicholas", Male),
        ("Olivia", Female),
        ("Rachael", Female),
        ("Rachel", Female),
        ("Rebecca", Female),
        ("Sam", Split(0.5)),
        ("Samantha", Female),
        ("Samuel", Male),
        ("Sara", Female),
        ("Sarah", Female),
        ("Sophia", Female),
        ("Taylor", Split(0.4)),
        ("Thomas", Male),
        ("Will", Male),
        ("William", Male),
        ("Zach", Male),
        ("Zachariah", Male),
        ("Zachary", Male),
        ("Zack", Male),
        ("Zoe", Female),
    ])
}
