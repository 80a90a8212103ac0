//! Setting validation errors

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Numeric value has no matching setting
    #[error("Invalid {setting}: {reason}")]
    Validation {
        setting: &'static str,
        reason: String,
    },

    /// Text does not name any value of the setting
    #[error("Cannot parse {setting} from {input:?}, expected {expected}")]
    Parse {
        setting: &'static str,
        input: String,
        expected: &'static str,
    },
}

impl Error {
    pub(crate) fn validation(setting: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            setting,
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(setting: &'static str, input: &str, expected: &'static str) -> Self {
        Self::Parse {
            setting,
            input: input.to_string(),
            expected,
        }
    }

    /// Name of the setting that was rejected
    pub fn setting(&self) -> &'static str {
        match self {
            Self::Validation { setting, .. } | Self::Parse { setting, .. } => setting,
        }
    }
}
