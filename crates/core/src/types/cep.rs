//! Brazilian postal code (CEP) type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Cep`].
///
/// The display text is shown to shoppers as-is.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CepError {
    /// The input does not reduce to exactly 8 digits.
    #[error("CEP inválido. O CEP deve conter 8 dígitos.")]
    InvalidLength {
        /// Number of digits found in the input.
        digits: usize,
    },
}

/// A validated 8-digit CEP.
///
/// Input is normalized by stripping every non-digit character, so `01001-000`,
/// `01001000` and ` 01.001-000 ` all parse to the same value.
///
/// ```
/// use vitrine_core::Cep;
///
/// let cep = Cep::parse("01001000").unwrap();
/// assert_eq!(cep.digits(), "01001000");
/// assert_eq!(cep.formatted(), "01001-000");
///
/// assert!(Cep::parse("123").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cep(String);

impl Cep {
    /// Number of digits in a CEP.
    pub const LENGTH: usize = 8;

    /// Parse a `Cep` from user input.
    ///
    /// # Errors
    ///
    /// Returns [`CepError::InvalidLength`] unless the input contains exactly
    /// 8 digits once non-digit characters are removed.
    pub fn parse(input: &str) -> Result<Self, CepError> {
        let digits = strip_non_digits(input);
        if digits.len() != Self::LENGTH {
            return Err(CepError::InvalidLength {
                digits: digits.len(),
            });
        }
        Ok(Self(digits))
    }

    /// The bare 8 digits, as sent to the lookup service.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// The display form, `NNNNN-NNN`.
    #[must_use]
    pub fn formatted(&self) -> String {
        format_partial(&self.0)
    }
}

/// Format possibly incomplete CEP input the way the entry field shows it.
///
/// Non-digits are dropped; up to five digits are returned unchanged, longer
/// input gets a hyphen after the fifth digit and is cut at eight digits.
#[must_use]
pub fn format_partial(input: &str) -> String {
    let digits = strip_non_digits(input);
    if digits.len() <= 5 {
        return digits;
    }
    let (head, tail) = digits.split_at(5);
    let tail: String = tail.chars().take(Cep::LENGTH - 5).collect();
    format!("{head}-{tail}")
}

fn strip_non_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

impl std::str::FromStr for Cep {
    type Err = CepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cep {
    type Error = CepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cep> for String {
    fn from(cep: Cep) -> Self {
        cep.formatted()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let cep = Cep::parse("01001000").unwrap();
        assert_eq!(cep.digits(), "01001000");
        assert_eq!(cep.formatted(), "01001-000");
        assert_eq!(cep.to_string(), "01001-000");
    }

    #[test]
    fn test_parse_strips_separators() {
        assert_eq!(Cep::parse("01001-000").unwrap().digits(), "01001000");
        assert_eq!(Cep::parse(" 01.001-000 ").unwrap().digits(), "01001000");
    }

    #[test]
    fn test_invalid_length_message() {
        let err = Cep::parse("123").unwrap_err();
        assert_eq!(err, CepError::InvalidLength { digits: 3 });
        assert_eq!(err.to_string(), "CEP inválido. O CEP deve conter 8 dígitos.");
        assert!(Cep::parse("010010001").is_err());
        assert!(Cep::parse("").is_err());
    }

    #[test]
    fn test_format_partial() {
        assert_eq!(format_partial("010"), "010");
        assert_eq!(format_partial("01001"), "01001");
        assert_eq!(format_partial("010010"), "01001-0");
        assert_eq!(format_partial("01001-000"), "01001-000");
        assert_eq!(format_partial("0100100099"), "01001-000");
    }

    #[test]
    fn test_serde_accepts_formatted_form() {
        let cep: Cep = serde_json::from_str("\"01001-000\"").unwrap();
        assert_eq!(cep.digits(), "01001000");
        assert_eq!(serde_json::to_string(&cep).unwrap(), "\"01001-000\"");
    }
}
