use std::error::Error;
use std::fmt;
use std::io;

/// Enumeration of all possible errors that can occur in the player core
#[derive(Debug)]
pub enum PlayerError {
    Parse(ParseError),
    Store(StoreError),
    Config(ConfigError),
    Other(io::Error),
}

/// Subtitle parsing specific errors
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    /// 1-based line in the raw subtitle text, when known
    pub line: Option<usize>,
}

impl ParseError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
        }
    }

    /// Create a new error pointing at a line of the input.
    pub fn at_line(message: impl Into<String>, line: usize) -> Self {
        Self {
            message: message.into(),
            line: Some(line),
        }
    }
}

/// Position store specific errors
#[derive(Debug)]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for PlayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerError::Other(err) => write!(f, "I/O error: {}", err),
            PlayerError::Parse(err) => write!(f, "Parse error: {}", err),
            PlayerError::Store(err) => write!(f, "Store error: {}", err),
            PlayerError::Config(err) => write!(f, "Config error: {}", err),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for PlayerError {}
impl Error for ParseError {}
impl Error for StoreError {}
impl Error for ConfigError {}

// Conversion implementations
impl From<io::Error> for PlayerError {
    fn from(err: io::Error) -> Self {
        PlayerError::Other(err)
    }
}

impl From<ParseError> for PlayerError {
    fn from(err: ParseError) -> Self {
        PlayerError::Parse(err)
    }
}

impl From<StoreError> for PlayerError {
    fn from(err: StoreError) -> Self {
        PlayerError::Store(err)
    }
}

impl From<ConfigError> for PlayerError {
    fn from(err: ConfigError) -> Self {
        PlayerError::Config(err)
    }
}

impl From<io::Error> for StoreError {
    fn from(err: io::Error) -> Self {
        StoreError::new(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::new(format!("invalid position data: {}", err))
    }
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::new(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::new(format!("invalid config: {}", err))
    }
}

// Conversion to io::Error for callers working with plain I/O results
impl From<PlayerError> for io::Error {
    fn from(err: PlayerError) -> Self {
        io::Error::other(err)
    }
}

impl From<ParseError> for io::Error {
    fn from(err: ParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

impl From<StoreError> for io::Error {
    fn from(err: StoreError) -> Self {
        io::Error::other(err)
    }
}

impl From<ConfigError> for io::Error {
    fn from(err: ConfigError) -> Self {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

// Type alias for Result with PlayerError
pub type PlayerResult<T> = Result<T, PlayerError>;
pub type ParseResult<T> = Result<T, ParseError>;
