// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

/// The broad category of an error.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ErrorKind {
    /// A caller passed a value outside the accepted domain.
    InvalidArgument,
    /// The backing database failed.
    Storage,
    /// Filesystem failure.
    Io,
    /// A JSON or TOML document could not be read or written.
    Serialization,
    Other,
}

#[derive(Debug)]
pub struct ErrorReport {
    kind: ErrorKind,
    message: String,
}

pub type Fallible<T> = Result<T, ErrorReport>;

impl ErrorReport {
    pub fn new(message: &str) -> Self {
        Self {
            kind: ErrorKind::Other,
            message: message.to_string(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidArgument,
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.kind == ErrorKind::InvalidArgument
    }

    fn with_kind(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::with_kind(ErrorKind::Other, message.into()))
}

pub fn invalid<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::invalid_argument(message))
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        Self::with_kind(ErrorKind::Io, value.to_string())
    }
}

impl From<rusqlite::Error> for ErrorReport {
    fn from(value: rusqlite::Error) -> Self {
        Self::with_kind(ErrorKind::Storage, format!("database error: {value}"))
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        Self::with_kind(ErrorKind::Serialization, format!("JSON error: {value}"))
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        Self::with_kind(ErrorKind::Serialization, format!("TOML error: {value}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = ErrorReport::new("directory does not exist.");
        assert_eq!(err.to_string(), "error: directory does not exist.");
        assert_eq!(err.kind(), ErrorKind::Other);
    }

    #[test]
    fn test_invalid() {
        let result: Fallible<()> = invalid("quality must be between 0 and 5");
        let err = result.unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: ErrorReport = io.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
