//! Common types used across the switcher

/// Reading direction of a language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ltr,
    Rtl,
}

impl Direction {
    /// Value of the `dir` attribute
    pub fn as_attr(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

/// An entry of the language registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// Short stable identifier, e.g. "en"
    pub code: &'static str,
    /// Name shown in the dropdown, written in the language itself
    pub name: &'static str,
    pub direction: Direction,
}

impl Language {
    pub const fn ltr(code: &'static str, name: &'static str) -> Self {
        Self { code, name, direction: Direction::Ltr }
    }

    pub const fn rtl(code: &'static str, name: &'static str) -> Self {
        Self { code, name, direction: Direction::Rtl }
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }
}
