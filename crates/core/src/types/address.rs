//! Shipping address resolved from a CEP.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A structured street address.
///
/// Field names on the wire follow the Brazilian postal vocabulary used by the
/// lookup service (`logradouro`, `bairro`, `localidade`, `uf`), so the same
/// shape is used for both the HTTP response and the cached copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Postal code as returned by the service (`01001-000`).
    pub cep: String,
    /// Street name.
    #[serde(rename = "logradouro", default)]
    pub street: String,
    /// Complement (suite, block, side of the street).
    #[serde(rename = "complemento", default)]
    pub complement: String,
    /// Neighborhood.
    #[serde(rename = "bairro", default)]
    pub neighborhood: String,
    /// City.
    #[serde(rename = "localidade", default)]
    pub city: String,
    /// Two-letter state code.
    #[serde(rename = "uf", default)]
    pub state: String,
}

impl Address {
    /// First display line: street plus complement when present.
    #[must_use]
    pub fn street_line(&self) -> String {
        if self.complement.is_empty() {
            self.street.clone()
        } else {
            format!("{}, {}", self.street, self.complement)
        }
    }

    /// Second display line: `neighborhood - city/state`.
    #[must_use]
    pub fn locality_line(&self) -> String {
        format!("{} - {}/{}", self.neighborhood, self.city, self.state)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{}", self.street_line(), self.locality_line())
    }
}
