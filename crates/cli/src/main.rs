//! Vitrine - single-product storefront in the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Home screen with cart badge
//! vitrine home
//!
//! # Product page: choose options, pick an image, add to cart
//! vitrine product show
//! vitrine product select --size M --color Preto --quantity 2
//! vitrine product image 3
//! vitrine product add
//!
//! # Cart
//! vitrine cart show
//! vitrine cart decrement --size M --color Preto
//! vitrine cart clear
//!
//! # Shipping address by CEP
//! vitrine cep lookup 01001-000
//! ```
//!
//! State lives in `VITRINE_DATA_DIR` (see `vitrine_storefront::config`).
//! Selections, the chosen image, and the looked-up address are remembered for
//! 15 minutes; the cart is kept until cleared.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::Write;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vitrine_core::{ProductId, Quantity};
use vitrine_storefront::AppState;
use vitrine_storefront::cart::CartItemKey;
use vitrine_storefront::config::StorefrontConfig;

mod commands;
mod views;

use commands::CliError;
use commands::cart::LineChange;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(author, version, about = "Vitrine storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home screen
    Home,
    /// Product page
    Product {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Shopping cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Shipping address lookup
    Cep {
        #[command(subcommand)]
        action: CepAction,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// Show the product page
    Show,
    /// Choose size, color, and quantity
    Select {
        /// Size (P, M, G, GG, XGG)
        #[arg(short, long)]
        size: Option<String>,

        /// Color name
        #[arg(short, long)]
        color: Option<String>,

        /// Quantity (1-10)
        #[arg(short, long)]
        quantity: Option<Quantity>,
    },
    /// Change the quantity by a step (e.g. 1 or -1)
    Step {
        #[arg(allow_hyphen_values = true)]
        change: i64,
    },
    /// Select a gallery image (1-based)
    Image {
        #[arg(value_parser = clap::value_parser!(u64).range(1..))]
        number: u64,
    },
    /// Add the current selection to the cart
    Add,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart
    Show,
    /// Set a line's quantity
    Update {
        #[command(flatten)]
        line: LineArgs,

        /// New quantity (at least 1)
        #[arg(short, long)]
        quantity: Quantity,
    },
    /// Add one to a line
    Increment {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Take one from a line (stops at 1)
    Decrement {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Remove a line
    Remove {
        #[command(flatten)]
        line: LineArgs,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CepAction {
    /// Look up a CEP
    Lookup { cep: String },
    /// Show the remembered address
    Show,
}

/// Identifies a cart line.
#[derive(Args)]
struct LineArgs {
    /// Product id (defaults to the store's product)
    #[arg(long)]
    id: Option<String>,

    /// Size
    #[arg(short, long)]
    size: String,

    /// Color
    #[arg(short, long)]
    color: String,
}

impl LineArgs {
    fn key(self, default_id: &ProductId) -> CartItemKey {
        let id = self.id.map_or_else(|| default_id.clone(), ProductId::from);
        CartItemKey::new(id, self.size, self.color)
    }
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::debug!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            let _ = writeln!(std::io::stderr(), "Configuration error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize Sentry (must be done before tracing subscriber)
    let _sentry_guard = init_sentry(&config);

    // Logs go to stderr so they never mix with the rendered screens.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vitrine=warn,vitrine_storefront=warn".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let state = match AppState::new(config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialize storefront");
            return ExitCode::FAILURE;
        }
    };

    let mut out = std::io::stdout().lock();
    match run(cli, &state, &mut out).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if e.is_internal() {
                tracing::error!(error = %e, "Command failed");
            }
            let _ = writeln!(std::io::stderr(), "{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, state: &AppState, out: &mut impl Write) -> Result<(), CliError> {
    let product_id = state.product().id.clone();

    match cli.command {
        Commands::Home => commands::home::show(state, out),
        Commands::Product { action } => match action {
            ProductAction::Show => commands::product::show(state, out),
            ProductAction::Select {
                size,
                color,
                quantity,
            } => commands::product::select(
                state,
                size.as_deref(),
                color.as_deref(),
                quantity,
                out,
            ),
            ProductAction::Step { change } => commands::product::step(state, change, out),
            ProductAction::Image { number } => {
                let index = usize::try_from(number - 1).unwrap_or(usize::MAX);
                commands::product::image(state, index, out)
            }
            ProductAction::Add => commands::product::add(state, out),
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(state, out),
            CartAction::Update { line, quantity } => commands::cart::change_line(
                state,
                &line.key(&product_id),
                LineChange::Set(quantity),
                out,
            ),
            CartAction::Increment { line } => commands::cart::change_line(
                state,
                &line.key(&product_id),
                LineChange::Increment,
                out,
            ),
            CartAction::Decrement { line } => commands::cart::change_line(
                state,
                &line.key(&product_id),
                LineChange::Decrement,
                out,
            ),
            CartAction::Remove { line } => {
                commands::cart::change_line(state, &line.key(&product_id), LineChange::Remove, out)
            }
            CartAction::Clear => commands::cart::clear(state, out),
        },
        Commands::Cep { action } => match action {
            CepAction::Lookup { cep } => commands::cep::lookup(state, &cep, out).await,
            CepAction::Show => commands::cep::show(state, out),
        },
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_negative_step() {
        let cli = Cli::try_parse_from(["vitrine", "product", "step", "-1"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Product {
                action: ProductAction::Step { change: -1 }
            })
        ));
    }

    #[test]
    fn test_rejects_zero_quantity() {
        let cli = Cli::try_parse_from([
            "vitrine", "cart", "update", "--size", "M", "--color", "Preto", "--quantity", "0",
        ]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_image_numbers_start_at_one() {
        assert!(Cli::try_parse_from(["vitrine", "product", "image", "0"]).is_err());
        assert!(Cli::try_parse_from(["vitrine", "product", "image", "1"]).is_ok());
    }
}
