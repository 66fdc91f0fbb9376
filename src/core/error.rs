use std::fmt;

/// Error types for report generation
#[derive(Debug)]
pub enum ReportError {
    /// Analysis result is malformed or missing required fields
    DataShape(String),

    /// Chart rasterization, image embedding or document encoding failed
    Render(String),

    /// Active worker lookup failed (metadata only, never fatal)
    AncillaryFetch(String),

    /// IO error (saving the report, reading input files)
    Io(std::io::Error),

    /// HTTP client error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Configuration error
    Config(String),

    /// Requested result does not exist
    NotFound(String),

    /// Invalid argument error
    InvalidArgument(String),
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::DataShape(msg) => write!(f, "Malformed analysis result: {msg}"),
            ReportError::Render(msg) => write!(f, "Render error: {msg}"),
            ReportError::AncillaryFetch(msg) => write!(f, "Active worker lookup failed: {msg}"),
            ReportError::Io(err) => write!(f, "IO error: {err}"),
            ReportError::Http(err) => write!(f, "HTTP error: {err}"),
            ReportError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            ReportError::Config(msg) => write!(f, "Configuration error: {msg}"),
            ReportError::NotFound(what) => write!(f, "Not found: {what}"),
            ReportError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::Io(err) => Some(err),
            ReportError::Http(err) => Some(err),
            ReportError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl ReportError {
    /// The only text shown to the user when report generation fails.
    pub fn user_message(&self) -> &'static str {
        "Could not generate the PDF report"
    }

    /// Soft errors degrade the report instead of aborting it.
    pub fn is_soft(&self) -> bool {
        matches!(self, ReportError::AncillaryFetch(_))
    }
}

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::Io(err)
    }
}

impl From<reqwest::Error> for ReportError {
    fn from(err: reqwest::Error) -> Self {
        ReportError::Http(err)
    }
}

/// Undecodable JSON is a malformed analysis result.
impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::DataShape(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::TomlParsing(err)
    }
}

impl From<png::DecodingError> for ReportError {
    fn from(err: png::DecodingError) -> Self {
        ReportError::Render(format!("chart image could not be decoded: {err}"))
    }
}

/// Type alias for Results using ReportError
pub type Result<T> = std::result::Result<T, ReportError>;
