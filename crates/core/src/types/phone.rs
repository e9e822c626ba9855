//! Phone number type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`PhoneNumber`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneNumberError {
    /// The input is empty or only whitespace.
    #[error("number cannot be empty")]
    Empty,
    /// The input is too long.
    #[error("number must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A phone number as entered by the owner of a contact list.
///
/// Numbers are free-form: no normalization is applied, so `"+1 555 0100"`
/// and `"15550100"` are different numbers. Matching against stored numbers
/// is exact and case-sensitive.
///
/// ## Constraints
///
/// - Must contain at least one non-whitespace character
/// - At most 255 characters (the column width)
///
/// ## Examples
///
/// ```
/// use contact_book_core::PhoneNumber;
///
/// assert!(PhoneNumber::parse("+1 (555) 010-0100").is_ok());
/// assert!(PhoneNumber::parse("ext. 42").is_ok());
///
/// assert!(PhoneNumber::parse("").is_err());
/// assert!(PhoneNumber::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Maximum length of a phone number, in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Parse a `PhoneNumber` from a string.
    ///
    /// The input is stored verbatim; surrounding whitespace is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is blank or longer than 255 characters.
    pub fn parse(s: &str) -> Result<Self, PhoneNumberError> {
        if s.trim().is_empty() {
            return Err(PhoneNumberError::Empty);
        }

        if s.chars().count() > Self::MAX_LENGTH {
            return Err(PhoneNumberError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `PhoneNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = PhoneNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = PhoneNumberError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PhoneNumber> for String {
    fn from(number: PhoneNumber) -> Self {
        number.0
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for PhoneNumber {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for PhoneNumber {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for PhoneNumber {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_input_verbatim() {
        let number = PhoneNumber::parse(" +44 20 7946 0958").unwrap();
        assert_eq!(number.as_str(), " +44 20 7946 0958");
    }

    #[test]
    fn test_parse_blank() {
        assert_eq!(PhoneNumber::parse(""), Err(PhoneNumberError::Empty));
        assert_eq!(PhoneNumber::parse(" \t"), Err(PhoneNumberError::Empty));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "1".repeat(256);
        assert_eq!(
            PhoneNumber::parse(&long),
            Err(PhoneNumberError::TooLong { max: 255 })
        );
        assert!(PhoneNumber::parse(&"1".repeat(255)).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 255 two-byte characters still fit
        assert!(PhoneNumber::parse(&"٣".repeat(255)).is_ok());
    }

    #[test]
    fn test_deserialize_validates() {
        let parsed: PhoneNumber = serde_json::from_str("\"555-0100\"").unwrap();
        assert_eq!(parsed.as_str(), "555-0100");

        assert!(serde_json::from_str::<PhoneNumber>("\"\"").is_err());
        assert!(serde_json::from_str::<PhoneNumber>("5550100").is_err());
    }
}
