//! Domain-specific newtypes for type safety
//!
//! Glyph ids of the donor font and of the merged font are easy to mix up;
//! these types keep them apart.

use std::{
    fmt,
    fmt::{Display, Formatter, Result},
};

macro_rules! u16_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(pub u16);

        impl $name {
            pub const fn new(id: u16) -> Self {
                Self(id)
            }

            pub const fn to_u16(self) -> u16 {
                self.0
            }

            pub const fn to_u32(self) -> u32 {
                self.0 as u32
            }
        }

        impl From<u16> for $name {
            fn from(id: u16) -> Self {
                Self(id)
            }
        }

        impl From<$name> for read_fonts::types::GlyphId {
            fn from(id: $name) -> Self {
                read_fonts::types::GlyphId::new(id.0 as u32)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $label, self.0)
            }
        }
    };
}

u16_id!(
    /// A glyph ID in one of the source fonts
    GlyphId,
    "GID"
);

u16_id!(
    /// A glyph ID in the merged font
    MergedGlyphId,
    "MGID"
);

/// A Unicode codepoint
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Codepoint(pub u32);

impl Codepoint {
    pub const fn new(cp: u32) -> Self {
        Self(cp)
    }

    pub const fn to_u32(self) -> u32 {
        self.0
    }

    /// Convert to a Rust char if valid
    pub fn to_char(self) -> Option<char> {
        char::from_u32(self.0)
    }
}

impl From<char> for Codepoint {
    fn from(c: char) -> Self {
        Self(c as u32)
    }
}

impl Display for Codepoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "U+{:04X}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_id() {
        let gid = GlyphId::new(42);
        assert_eq!(gid.to_u16(), 42);
        assert_eq!(format!("{}", gid), "GID42");
        assert_eq!(read_fonts::types::GlyphId::from(gid).to_u32(), 42);
    }

    #[test]
    fn test_merged_glyph_id() {
        let mgid = MergedGlyphId::new(100);
        assert_eq!(mgid.to_u32(), 100);
        assert_eq!(format!("{}", mgid), "MGID100");
    }

    #[test]
    fn test_codepoint() {
        let cp = Codepoint::from('A');
        assert_eq!(cp.to_char(), Some('A'));
        assert_eq!(format!("{}", cp), "U+0041");
        assert_eq!(Codepoint::new(0xD800).to_char(), None);
    }
}
