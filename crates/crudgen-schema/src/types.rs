use derive_more::{Display, FromStr};
use serde::Serialize;

///
/// ScalarKind
///
/// Primitive marker for non-schema fields. The set mirrors what the document
/// store can persist; not every kind has a GraphQL representation.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[remain::sorted]
pub enum ScalarKind {
    Boolean,
    Buffer,
    Date,
    Decimal,
    Id,
    Mixed,
    Number,
    String,
}

impl ScalarKind {
    /// Kinds whose values are opaque to the generators (no stable shape).
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        matches!(self, Self::Mixed)
    }

    /// Kinds that can back an identifier field.
    #[must_use]
    pub const fn supports_id(self) -> bool {
        matches!(self, Self::Id | Self::Number | Self::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_from_display_name() {
        assert_eq!("Decimal".parse::<ScalarKind>().ok(), Some(ScalarKind::Decimal));
        assert_eq!(ScalarKind::Buffer.to_string(), "Buffer");
        assert!("decimal128".parse::<ScalarKind>().is_err());
    }

    #[test]
    fn id_support_excludes_structured_kinds() {
        assert!(ScalarKind::Id.supports_id());
        assert!(!ScalarKind::Buffer.supports_id());
        assert!(!ScalarKind::Mixed.supports_id());
    }
}
