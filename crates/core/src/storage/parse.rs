//! Stored value parsing utilities
//!
//! Preferences are stored as strings; these helpers decode them.

use rusqlite::Error as SqlError;

/// Encode a boolean the way the preference store expects
pub fn encode_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

/// Decode a stored boolean; only the literal "true" is true
pub fn decode_bool(value: Option<&str>) -> bool {
    value == Some("true")
}

/// Extension trait for converting rusqlite Results to Option
pub trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>, SqlError>;
}

impl<T> OptionalExt<T> for Result<T, SqlError> {
    fn optional(self) -> Result<Option<T>, SqlError> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(SqlError::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bool_encoding() {
        assert!(decode_bool(Some(encode_bool(true))));
        assert!(!decode_bool(Some(encode_bool(false))));
        assert!(!decode_bool(None));
        assert!(!decode_bool(Some("TRUE")));
        assert!(!decode_bool(Some("1")));
    }
}
