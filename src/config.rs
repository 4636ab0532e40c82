use std::path::PathBuf;

/// What to do with a row whose numeric field cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnMalformed {
    /// Stop the whole run with an error naming the offending line.
    Abort,
    /// Log a warning, drop the row and keep going.
    Skip,
}

impl Default for OnMalformed {
    fn default() -> OnMalformed {
        OnMalformed::Abort
    }
}

/// Everything a run needs to know. Shared read-only by both aggregation
/// branches.
#[derive(Debug, Clone)]
pub struct Config {
    pub cases_path: PathBuf,
    pub rainfall_path: PathBuf,
    pub output_path: PathBuf,
    pub cases_delimiter: u8,
    pub rainfall_delimiter: u8,
    pub output_delimiter: u8,
    /// WHATWG label, e.g. `utf-8` or `iso-8859-1`
    pub cases_encoding: String,
    pub rainfall_encoding: String,
    pub on_malformed: OnMalformed,
    /// Log every aggregated key and value at debug level.
    pub inspect: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            cases_path: PathBuf::from("casos_dengue.txt"),
            rainfall_path: PathBuf::from("chuvas.csv"),
            output_path: PathBuf::from("resultado.csv"),
            cases_delimiter: b'|',
            rainfall_delimiter: b',',
            output_delimiter: b';',
            cases_encoding: "utf-8".to_string(),
            rainfall_encoding: "utf-8".to_string(),
            on_malformed: OnMalformed::Abort,
            inspect: false,
        }
    }
}
