use std::fmt;

#[derive(Debug)]
pub enum YoyError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad year range, etc.).
    ConfigValidation(String),
    /// Missing required column in input data.
    MissingColumn { column: String },
    /// Numeric cell that is neither empty nor a number. `row` is 1-based,
    /// counting data rows only.
    AmountParse { row: usize, column: String, value: String },
    /// Malformed CSV record.
    Csv(String),
    /// Malformed JSON input.
    Json(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for YoyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { column } => write!(f, "missing column '{column}'"),
            Self::AmountParse { row, column, value } => {
                write!(f, "row {row}, column '{column}': cannot parse amount '{value}'")
            }
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for YoyError {}

impl From<std::io::Error> for YoyError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}
