//! The numbered main menu.

use std::fmt;
use std::num::IntErrorKind;

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AddContact,
    SearchByPrefix,
    SaveToFile,
    AddContactWithImage,
    OpenImage,
    Quit,
}

/// Why a line could not be turned into a [`MenuChoice`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    #[error("Invalid input. Please enter a number.")]
    NotANumber,

    #[error("Invalid choice. Please try again.")]
    OutOfRange(i64),
}

impl MenuChoice {
    /// Every choice, in menu order.
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::AddContact,
        MenuChoice::SearchByPrefix,
        MenuChoice::SaveToFile,
        MenuChoice::AddContactWithImage,
        MenuChoice::OpenImage,
        MenuChoice::Quit,
    ];

    /// The number the user types to pick this choice.
    pub fn number(self) -> u8 {
        match self {
            Self::AddContact => 1,
            Self::SearchByPrefix => 2,
            Self::SaveToFile => 3,
            Self::AddContactWithImage => 4,
            Self::OpenImage => 5,
            Self::Quit => 6,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AddContact => "Add a contact",
            Self::SearchByPrefix => "Search for a contact by prefix",
            Self::SaveToFile => "Save contacts to a file",
            Self::AddContactWithImage => "Add a contact with image",
            Self::OpenImage => "Open image from contact",
            Self::Quit => "Quit",
        }
    }

    /// Parse one line of user input. Surrounding whitespace is ignored.
    ///
    /// Integers too large for `i64` are still numbers and are reported as
    /// out of range, saturated to the nearest bound.
    pub fn parse(input: &str) -> Result<Self, MenuError> {
        let n: i64 = input.trim().parse().map_err(|e: std::num::ParseIntError| {
            match e.kind() {
                IntErrorKind::PosOverflow => MenuError::OutOfRange(i64::MAX),
                IntErrorKind::NegOverflow => MenuError::OutOfRange(i64::MIN),
                _ => MenuError::NotANumber,
            }
        })?;
        Self::ALL
            .into_iter()
            .find(|choice| i64::from(choice.number()) == n)
            .ok_or(MenuError::OutOfRange(n))
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_each_number() {
        for (i, choice) in MenuChoice::ALL.into_iter().enumerate() {
            assert_eq!(MenuChoice::parse(&(i + 1).to_string()), Ok(choice));
        }
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(MenuChoice::parse("  3 \r\n"), Ok(MenuChoice::SaveToFile));
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(MenuChoice::parse("0"), Err(MenuError::OutOfRange(0)));
        assert_eq!(MenuChoice::parse("7"), Err(MenuError::OutOfRange(7)));
        assert_eq!(MenuChoice::parse("-1"), Err(MenuError::OutOfRange(-1)));
    }

    #[test]
    fn test_parse_overflowing_number_is_out_of_range() {
        assert_eq!(
            MenuChoice::parse("99999999999999999999"),
            Err(MenuError::OutOfRange(i64::MAX))
        );
        assert_eq!(
            MenuChoice::parse("-99999999999999999999"),
            Err(MenuError::OutOfRange(i64::MIN))
        );
    }

    #[test]
    fn test_parse_non_numeric() {
        assert_eq!(MenuChoice::parse("add"), Err(MenuError::NotANumber));
        assert_eq!(MenuChoice::parse(""), Err(MenuError::NotANumber));
        assert_eq!(MenuChoice::parse("1.5"), Err(MenuError::NotANumber));
    }

    #[test]
    fn test_display() {
        assert_eq!(MenuChoice::OpenImage.to_string(), "5. Open image from contact");
        assert_eq!(
            MenuError::OutOfRange(9).to_string(),
            "Invalid choice. Please try again."
        );
    }
}
