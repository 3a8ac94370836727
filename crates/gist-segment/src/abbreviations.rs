//! Words after which a period may not end a sentence.
//!
//! Lower-cased, without the trailing period.

/// A period after these never ends a sentence.
pub const ALWAYS_ABBREVIATIONS: &[&str] = &[
    // Titles and honorifics
    "mr", "mrs", "ms", "messrs", "dr", "prof", "sr", "jr", "hon", "capt", "lt", "sgt",
    "lj", "ljj", "qc", "kc",
    // Citation and Latin
    "v", "vs", "para", "paras", "cf", "ibid", "viz", "e.g", "i.e", "al", "approx",
];

/// Also ordinary words or common sentence endings. A period after these only
/// holds the sentence together when a number, a roman numeral or another
/// abbreviation follows ("No. 12", "Art. IV", "Co. Ltd.").
pub const AMBIGUOUS_ABBREVIATIONS: &[&str] = &[
    // Titles that are also words
    "st", "rev", "gen", "col", "gov", "sen", "rep",
    // Legal drafting
    "s", "ss", "art", "arts", "reg", "regs", "sch", "pt", "cl", "no", "nos", "ch",
    "ed", "eds", "op", "cit", "p", "pp", "vol",
    // Company suffixes
    "ltd", "inc", "co", "corp", "plc", "bros",
    // General
    "etc", "est", "fig", "figs", "dept",
    // Months
    "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct", "nov", "dec",
];
