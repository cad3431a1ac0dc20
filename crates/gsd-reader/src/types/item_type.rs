//! GSD item data types.

/// Data type of a GSD item.
///
/// | Code | Type    | Letter | Width |
/// |------|---------|--------|-------|
/// | 1    | Byte    | B      | 1     |
/// | 2    | Logical | L      | 1     |
/// | 3    | Word    | W      | 2     |
/// | 4    | Integer | I      | 4     |
/// | 5    | Real    | R      | 4     |
/// | 6    | Double  | D      | 8     |
/// | 7    | Char    | C      | 16    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum GsdType {
    Byte,
    Logical,
    Word,
    Integer,
    Real,
    Double,
    Char,
}

/// Width of one character element in a char array.
pub const CHAR_WIDTH: usize = 16;

impl GsdType {
    /// Map an on-disk type code (1..=7) to a type.
    #[must_use]
    pub const fn from_code(code: i16) -> Option<Self> {
        match code {
            1 => Some(Self::Byte),
            2 => Some(Self::Logical),
            3 => Some(Self::Word),
            4 => Some(Self::Integer),
            5 => Some(Self::Real),
            6 => Some(Self::Double),
            7 => Some(Self::Char),
            _ => None,
        }
    }

    /// On-disk type code.
    #[must_use]
    pub const fn code(self) -> i16 {
        match self {
            Self::Byte => 1,
            Self::Logical => 2,
            Self::Word => 3,
            Self::Integer => 4,
            Self::Real => 5,
            Self::Double => 6,
            Self::Char => 7,
        }
    }

    /// Single-letter type code used in GSD listings.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Byte => 'B',
            Self::Logical => 'L',
            Self::Word => 'W',
            Self::Integer => 'I',
            Self::Real => 'R',
            Self::Double => 'D',
            Self::Char => 'C',
        }
    }

    /// Size of one element in bytes.
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::Byte | Self::Logical => 1,
            Self::Word => 2,
            Self::Integer | Self::Real => 4,
            Self::Double => 8,
            Self::Char => CHAR_WIDTH,
        }
    }

    /// Whether values of this type can supply an array extent.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Byte | Self::Word | Self::Integer)
    }
}

impl std::fmt::Display for GsdType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.letter())
    }
}
