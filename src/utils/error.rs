use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Unknown book: {isbn}")]
    UnknownBook { isbn: String },

    #[error("Unknown member: {member_id}")]
    UnknownMember { member_id: String },

    #[error("Book {isbn} is already on loan to {borrowed_by}")]
    BookUnavailable { isbn: String, borrowed_by: String },

    #[error("Book {isbn} is not on loan")]
    NotOnLoan { isbn: String },

    #[error("Due date for {isbn} overflows when adding {days} days")]
    DueDateOverflow { isbn: String, days: u32 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lookup,
    Availability,
    Configuration,
    System,
}

impl DeskError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeskError::UnknownBook { .. } | DeskError::UnknownMember { .. } => {
                ErrorCategory::Lookup
            }
            DeskError::BookUnavailable { .. }
            | DeskError::NotOnLoan { .. }
            | DeskError::DueDateOverflow { .. } => ErrorCategory::Availability,
            DeskError::ConfigError { .. }
            | DeskError::InvalidConfigValueError { .. }
            | DeskError::TomlError(_) => ErrorCategory::Configuration,
            DeskError::IoError(_) | DeskError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// Short message suitable for printing to a terminal user.
    pub fn user_friendly_message(&self) -> String {
        match self {
            DeskError::UnknownBook { isbn } => format!("No book with ISBN {} is registered", isbn),
            DeskError::UnknownMember { member_id } => {
                format!("No member with ID {} is registered", member_id)
            }
            DeskError::BookUnavailable { isbn, .. } => {
                format!("Book {} is currently checked out", isbn)
            }
            DeskError::NotOnLoan { isbn } => format!("Book {} is already on the shelf", isbn),
            DeskError::DueDateOverflow { .. } => {
                "The loan period is too long to compute a due date".to_string()
            }
            DeskError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            DeskError::ConfigError { message } => format!("Configuration problem: {}", message),
            DeskError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            DeskError::IoError(e) => format!("File access failed: {}", e),
            DeskError::SerializationError(e) => format!("Malformed JSON: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;
