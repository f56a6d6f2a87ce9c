//! Command implementations.
//!
//! Each command receives the [`AppState`](vitrine_storefront::AppState) and an
//! output stream; nothing reaches for global state.

pub mod cart;
pub mod cep;
pub mod home;
pub mod product;

use thiserror::Error;
use vitrine_storefront::AppError;

/// Errors a command can end with.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storefront operation failed.
    #[error(transparent)]
    App(#[from] AppError),

    /// Writing the output failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Message shown to the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::App(e) => e.user_message(),
            Self::Io(_) => "Erro interno. Tente novamente.".to_string(),
        }
    }

    /// Whether this error should be reported to error tracking.
    #[must_use]
    pub const fn is_internal(&self) -> bool {
        match self {
            Self::App(e) => e.is_internal(),
            Self::Io(_) => true,
        }
    }
}

/// Wrap any storefront error.
pub(crate) fn app(e: impl Into<AppError>) -> CliError {
    CliError::App(e.into())
}

/// Storefront over in-memory storage and a frozen clock.
#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) fn test_state() -> vitrine_storefront::AppState<
    vitrine_storefront::storage::MemoryStorage,
    vitrine_storefront::clock::ManualClock,
> {
    use chrono::DateTime;
    use vitrine_storefront::clock::ManualClock;
    use vitrine_storefront::config::StorefrontConfig;
    use vitrine_storefront::storage::MemoryStorage;

    let config = StorefrontConfig::from_source(|key| {
        (key == "VITRINE_DATA_DIR").then(|| "/nonexistent/vitrine".to_string())
    })
    .unwrap();
    let clock = ManualClock::new(DateTime::from_timestamp_millis(1_767_268_800_000).unwrap());
    vitrine_storefront::AppState::with_parts(config, MemoryStorage::new(), clock).unwrap()
}
