//! ViaCEP API client.
//!
//! `GET {base}/{cep}/json/` returns the address fields, or `{"erro": true}`
//! (newer deployments send `"true"` as a string) when the CEP does not exist.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{info, instrument};
use url::Url;
use vitrine_core::{Address, Cep};

use super::{AddressLookup, LookupError};
use crate::config::CepLookupConfig;

/// User agent sent with lookups.
const USER_AGENT: &str = concat!("vitrine/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the ViaCEP address service.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ViaCepClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CepLookupConfig) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    /// Full request URL for `cep`.
    #[must_use]
    pub fn endpoint(&self, cep: &Cep) -> String {
        format!(
            "{}/{}/json/",
            self.base_url.as_str().trim_end_matches('/'),
            cep.digits()
        )
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    #[instrument(skip_all, fields(cep = %cep))]
    async fn lookup(&self, cep: &Cep) -> Result<Address, LookupError> {
        let response = self.client.get(self.endpoint(cep)).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        let address = parse_response(cep, body)?;
        info!(city = %address.city, state = %address.state, "Address found");
        Ok(address)
    }
}

/// Interpret a ViaCEP response body.
fn parse_response(cep: &Cep, body: Value) -> Result<Address, LookupError> {
    let not_found = match body.get("erro") {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(flag)) => flag == "true",
        _ => false,
    };
    if not_found {
        return Err(LookupError::NotFound(cep.clone()));
    }

    serde_json::from_value(body).map_err(|e| LookupError::Parse(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use serde_json::json;

    use super::*;

    fn cep() -> Cep {
        Cep::parse("01001000").unwrap()
    }

    #[test]
    fn test_parse_found() {
        let body = json!({
            "cep": "01001-000",
            "logradouro": "Praça da Sé",
            "complemento": "lado ímpar",
            "unidade": "",
            "bairro": "Sé",
            "localidade": "São Paulo",
            "uf": "SP",
            "estado": "São Paulo",
            "ibge": "3550308",
            "ddd": "11"
        });
        let address = parse_response(&cep(), body).unwrap();
        assert_eq!(address.street, "Praça da Sé");
        assert_eq!(address.neighborhood, "Sé");
        assert_eq!(address.state, "SP");
    }

    #[test]
    fn test_parse_not_found_flag() {
        for body in [json!({ "erro": true }), json!({ "erro": "true" })] {
            let err = parse_response(&cep(), body).unwrap_err();
            assert!(matches!(err, LookupError::NotFound(_)));
            assert_eq!(err.user_message(), "CEP não encontrado.");
        }
    }

    #[test]
    fn test_parse_unexpected_shape() {
        let err = parse_response(&cep(), json!("nope")).unwrap_err();
        assert!(matches!(err, LookupError::Parse(_)));
        assert_eq!(err.user_message(), "Erro ao buscar o CEP. Tente novamente.");
    }

    #[test]
    fn test_endpoint() {
        for base in ["https://viacep.com.br/ws", "https://viacep.com.br/ws/"] {
            let client = ViaCepClient::new(&CepLookupConfig {
                base_url: Url::parse(base).unwrap(),
                timeout: Duration::from_secs(5),
            })
            .unwrap();
            assert_eq!(client.endpoint(&cep()), "https://viacep.com.br/ws/01001000/json/");
        }
    }
}
