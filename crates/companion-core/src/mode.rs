//! Checked conversion from persisted integer indices to enum values.
//!
//! Mode selectors are stored as plain integers in the snapshot. They are never
//! cast back blindly; every conversion goes through [`parse_index`] and the
//! caller decides what an out-of-range value means.

/// Outcome of parsing a persisted index into an enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexParse<T> {
    /// The index names a defined variant.
    Valid(T),
    /// The index is outside the defined range; carries the raw value.
    Invalid(i32),
}

impl<T> IndexParse<T> {
    /// Returns the parsed value, or `fallback` for an invalid index.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            IndexParse::Valid(value) => value,
            IndexParse::Invalid(_) => fallback,
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, IndexParse::Valid(_))
    }

    /// Converts into an `Option`, discarding the raw index.
    pub fn valid(self) -> Option<T> {
        match self {
            IndexParse::Valid(value) => Some(value),
            IndexParse::Invalid(_) => None,
        }
    }
}

/// An enum persisted by its integer discriminant.
///
/// Implementors are `#[repr(u8)]` and delegate to the `strum::FromRepr`
/// generated constructor.
pub trait IndexedMode: Sized + Copy {
    fn from_discriminant(discriminant: u8) -> Option<Self>;

    /// The value written to the snapshot.
    fn index(self) -> i32;
}

/// Parses a persisted `index` into `T`.
pub fn parse_index<T: IndexedMode>(index: i32) -> IndexParse<T> {
    u8::try_from(index)
        .ok()
        .and_then(T::from_discriminant)
        .map_or(IndexParse::Invalid(index), IndexParse::Valid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelMode;
    use crate::user::UserMode;

    #[test]
    fn test_parse_defined_indices() {
        assert_eq!(parse_index::<UserMode>(0), IndexParse::Valid(UserMode::On));
        assert_eq!(parse_index::<UserMode>(2), IndexParse::Valid(UserMode::Off));
        assert_eq!(
            parse_index::<ModelMode>(2),
            IndexParse::Valid(ModelMode::OllamaHttp)
        );
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(parse_index::<UserMode>(3), IndexParse::Invalid(3));
        assert_eq!(parse_index::<ModelMode>(-1), IndexParse::Invalid(-1));
        assert_eq!(parse_index::<ModelMode>(300), IndexParse::Invalid(300));
    }

    #[test]
    fn test_unwrap_or_fallback() {
        let parsed = parse_index::<UserMode>(9);
        assert!(!parsed.is_valid());
        assert_eq!(parsed.unwrap_or(UserMode::Sleep), UserMode::Sleep);
    }
}
