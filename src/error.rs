// SPDX-License-Identifier: MPL-2.0
use crate::notifications::ToastId;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Io(String),
    Config(String),
    /// A severity name that is not part of the taxonomy.
    UnknownSeverity(String),
    /// The user tried to dismiss a notification that only accepts
    /// acknowledgement through its action or timeout.
    NotDismissible(ToastId),
    /// The dispatch handle was started outside a tokio runtime.
    NoRuntime,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::UnknownSeverity(name) => write!(f, "Unknown severity: {}", name),
            Error::NotDismissible(id) => {
                write!(f, "Notification {} cannot be dismissed by the user", id)
            }
            Error::NoRuntime => write!(f, "Toast dispatcher requires a running tokio runtime"),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
