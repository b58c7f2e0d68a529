//! Contact records and mobile number validation.

use std::fmt;

use crate::trie::TrieError;

/// Number of digits in a valid mobile number.
pub const PHONE_DIGITS: usize = 10;

/// Whether `number` is a valid mobile number: exactly ten ASCII digits.
pub fn validate_phone(number: &str) -> bool {
    number.len() == PHONE_DIGITS && number.bytes().all(|b| b.is_ascii_digit())
}

/// The record stored at a name-terminating trie node.
///
/// A `Contact` always carries all three fields; the mobile number is
/// validated on construction and the other two are stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    phone: String,
    email: String,
    image_path: String,
}

impl Contact {
    /// Build a contact, rejecting numbers that fail [`validate_phone`].
    pub fn new(
        phone: impl Into<String>,
        email: impl Into<String>,
        image_path: impl Into<String>,
    ) -> Result<Self, TrieError> {
        let phone = phone.into();
        if !validate_phone(&phone) {
            return Err(TrieError::InvalidPhone(phone));
        }
        Ok(Self {
            phone,
            email: email.into(),
            image_path: image_path.into(),
        })
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// Path of the associated image, exactly as it was entered.
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Render this contact as a directory line for `name`.
    ///
    /// The result has no trailing newline.
    pub fn to_line(&self, name: &str) -> String {
        self.line(name).to_string()
    }

    /// A [`Display`](fmt::Display) adapter producing the directory line
    /// without allocating.
    pub fn line<'a>(&'a self, name: &'a str) -> ContactLine<'a> {
        ContactLine {
            name,
            contact: self,
        }
    }
}

/// A contact paired with its name, formatted as
/// `Name: <name>, Mobile Number: <phone>, Email: <email>, Image Address: <path>`.
#[derive(Debug, Clone, Copy)]
pub struct ContactLine<'a> {
    name: &'a str,
    contact: &'a Contact,
}

impl fmt::Display for ContactLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Mobile Number: {}, Email: {}, Image Address: {}",
            self.name, self.contact.phone, self.contact.email, self.contact.image_path
        )
    }
}
