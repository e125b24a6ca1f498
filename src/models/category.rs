//! Expense categories
//!
//! The category set is closed. Records store the category label as text, and
//! the label is validated whenever a record is read back.

use std::fmt;
use std::str::FromStr;

/// One of the five fixed expense categories, in menu order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    Food,
    Home,
    Work,
    Fun,
    Miscellaneous,
}

impl Category {
    /// Get all categories in menu order
    pub fn all() -> &'static [Self] {
        &[
            Self::Food,
            Self::Home,
            Self::Work,
            Self::Fun,
            Self::Miscellaneous,
        ]
    }

    /// The label written to the record store
    pub fn label(&self) -> &'static str {
        match self {
            Self::Food => "🥙 Food",
            Self::Home => "🏡 Home",
            Self::Work => "🏢 Work",
            Self::Fun => "🎉 Fun",
            Self::Miscellaneous => "✨Miscellaneous",
        }
    }

    /// The label without its emoji
    pub fn name(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Home => "Home",
            Self::Work => "Work",
            Self::Fun => "Fun",
            Self::Miscellaneous => "Miscellaneous",
        }
    }

    /// Look up a category by its 1-based menu index
    pub fn from_index(index: usize) -> Option<Self> {
        index
            .checked_sub(1)
            .and_then(|i| Self::all().get(i))
            .copied()
    }

    /// Look up a category by its stored label
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::all().iter().copied().find(|c| c.label() == label)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Parses the stored label, the plain name (case-insensitive), or a menu index
impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        if let Some(category) = Self::from_label(trimmed) {
            return Ok(category);
        }

        if let Some(category) = Self::all()
            .iter()
            .copied()
            .find(|c| c.name().eq_ignore_ascii_case(trimmed))
        {
            return Ok(category);
        }

        trimmed
            .parse::<usize>()
            .ok()
            .and_then(Self::from_index)
            .ok_or_else(|| UnknownCategory(trimmed.to_string()))
    }
}

/// Error for a label that names none of the fixed categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown category '{}'", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_order() {
        let all = Category::all();
        assert_eq!(all.len(), 5);
        assert_eq!(all[0], Category::Food);
        assert_eq!(all[4], Category::Miscellaneous);
    }

    #[test]
    fn test_from_index() {
        assert_eq!(Category::from_index(1), Some(Category::Food));
        assert_eq!(Category::from_index(5), Some(Category::Miscellaneous));
        assert_eq!(Category::from_index(0), None);
        assert_eq!(Category::from_index(6), None);
    }

    #[test]
    fn test_label_round_trip() {
        for category in Category::all() {
            assert_eq!(Category::from_label(category.label()), Some(*category));
        }
        assert_eq!(Category::from_label("🥙 Food\r"), Some(Category::Food));
        assert_eq!(Category::from_label("Groceries"), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("🏡 Home".parse::<Category>(), Ok(Category::Home));
        assert_eq!("fun".parse::<Category>(), Ok(Category::Fun));
        assert_eq!("3".parse::<Category>(), Ok(Category::Work));
        assert_eq!(
            "Travel".parse::<Category>(),
            Err(UnknownCategory("Travel".into()))
        );
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(Category::Miscellaneous.to_string(), "✨Miscellaneous");
    }
}
