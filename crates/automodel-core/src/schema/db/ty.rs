/// Database storage types, as reported by reflection.
///
/// `Type` describes how a column is stored by the database, not how the
/// generated model will treat it. Mapping a storage type onto a declaration
/// in the generated source is the job of the column renderer.
///
/// Drivers normalize their native type names onto this enum. Anything that
/// does not have a portable equivalent is kept verbatim as [`Type::Custom`]
/// so that it can still be rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Type {
    /// A boolean value
    Boolean,

    /// A signed integer of `n` bytes
    Integer(u8),

    /// A floating point number of `n` bytes
    Float(u8),

    /// An exact decimal
    Numeric {
        #[cfg_attr(feature = "serde", serde(default))]
        precision: Option<u32>,

        #[cfg_attr(feature = "serde", serde(default))]
        scale: Option<u32>,
    },

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    /// Fixed-length text
    Char(u64),

    /// Raw bytes
    Blob,

    /// Calendar date
    Date,

    /// Time of day
    Time,

    /// Date and time
    Timestamp,

    /// 128-bit universally unique identifier (UUID)
    Uuid,

    /// A database-specific type, kept as the name the database reported.
    Custom(String),
}

impl Type {
    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer(_))
    }
}
