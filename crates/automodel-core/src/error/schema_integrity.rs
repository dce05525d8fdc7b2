use super::Error;

/// Error when the reflected schema is internally inconsistent.
///
/// This occurs when:
/// - A foreign key references a table that was not reflected
/// - A foreign key references a column missing from its target table
///
/// Generation stops at the first integrity error; no partial model set is
/// produced.
#[derive(Debug)]
pub(super) struct SchemaIntegrity {
    message: Box<str>,
}

impl std::error::Error for SchemaIntegrity {}

impl core::fmt::Display for SchemaIntegrity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "schema integrity: {}", self.message)
    }
}

impl Error {
    /// Creates a schema integrity error.
    pub fn schema_integrity(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::SchemaIntegrity(SchemaIntegrity {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a schema integrity error.
    pub fn is_schema_integrity(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::SchemaIntegrity(_)))
    }
}
