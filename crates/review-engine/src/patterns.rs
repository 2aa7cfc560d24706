//! Regex patterns shared by the text ingestion paths

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// A plain decimal number, optionally signed, with `.` or `,` as decimal mark
    pub static ref DECIMAL_NUMBER: Regex =
        Regex::new(r"^[+-]?(?:\d+(?:[.,]\d*)?|[.,]\d+)(?:[eE][+-]?\d+)?$").unwrap();

    /// Field separator inside an analysis CSV row
    pub static ref CSV_FIELD_SEPARATOR: Regex = Regex::new(r"[,;\t]").unwrap();

    /// Any run of separators between registry numbers, newlines included
    pub static ref REGISTRY_SEPARATOR: Regex = Regex::new(r"[,;\t\r\n]+").unwrap();
}
