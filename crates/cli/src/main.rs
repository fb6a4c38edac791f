//! Brew Buddy CLI - menu, cart, checkout and loyalty tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the menu
//! bb-cli menu --category coffee
//!
//! # Build a cart
//! bb-cli cart add 3 --size large --option "Extra shot"
//! bb-cli cart show
//!
//! # Place the order
//! bb-cli checkout --delivery --payment mobile
//!
//! # Loyalty
//! bb-cli profile scan DISCOUNT20
//!
//! # Edit a YAML menu
//! bb-cli --catalog menu.yaml admin add -n "Cold Brew" -p 4.25
//! ```
//!
//! Output is written through `tracing`; set `RUST_LOG` to change verbosity.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use brew_buddy_cli::commands::{self, admin::ProductArgs};
use brew_buddy_cli::{CliConfig, CliError, Session};
use brew_buddy_core::{Category, PaymentMethod};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "bb-cli")]
#[command(author, version, about = "Brew Buddy coffee ordering CLI")]
struct Cli {
    /// YAML menu file to use instead of the built-in menu
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List drinks and their prices
    Menu {
        /// Only show one category (coffee, tea, smoothie, refreshment)
        #[arg(short, long)]
        category: Option<Category>,

        /// Match name or description
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Work with the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the cart
    Checkout {
        /// Deliver instead of pickup
        #[arg(long)]
        delivery: bool,

        /// Payment method (credit, mobile)
        #[arg(long, default_value = "credit")]
        payment: PaymentMethod,

        /// Special instructions
        #[arg(long)]
        note: Option<String>,
    },
    /// Loyalty points and rewards
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Manage the YAML menu (requires --catalog)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add a drink
    Add {
        /// Product id from `menu`
        product: String,

        /// small, medium or large
        #[arg(short, long)]
        size: Option<String>,

        /// Add-on, repeatable
        #[arg(short, long = "option")]
        options: Vec<String>,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Remove a line
    Remove {
        /// Line id or a unique prefix of it
        line: String,
    },
    /// Set a line's quantity (0 removes it)
    Set {
        line: String,
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
    /// Show the cart
    Show,
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show points, tier and rewards
    Show,
    /// Redeem a QR promo code
    Scan { code: String },
    /// Spend points (free-coffee, free-pastry, five-off)
    Redeem { reward: String },
}

#[derive(clap::Args)]
struct ProductFields {
    #[arg(short, long)]
    name: String,

    #[arg(short, long, default_value = "")]
    description: String,

    /// Medium-size price
    #[arg(short, long)]
    price: Decimal,

    #[arg(short, long)]
    image_url: Option<String>,

    /// Tag, repeatable
    #[arg(short, long = "tag")]
    tags: Vec<String>,

    #[arg(short, long, default_value = "coffee")]
    category: Category,
}

impl From<ProductFields> for ProductArgs {
    fn from(fields: ProductFields) -> Self {
        Self {
            name: fields.name,
            description: fields.description,
            price: fields.price,
            image_url: fields.image_url,
            tags: fields.tags,
            category: fields.category,
        }
    }
}

#[derive(Subcommand)]
enum AdminAction {
    /// Add a drink
    Add(ProductFields),
    /// Replace a drink's details
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Remove a drink
    Remove { id: String },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bb_cli=info,brew_buddy_cli=info,brew_buddy_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn show(lines: &[String]) {
    for line in lines {
        tracing::info!("{line}");
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = CliConfig::from_env()?;
    let mut session = Session::open(config, cli.catalog)?;

    match cli.command {
        Commands::Menu { category, search } => {
            show(&commands::menu::list(
                &session.catalog,
                category,
                search.as_deref(),
            )?);
        }
        Commands::Cart { action } => match action {
            CartAction::Add {
                product,
                size,
                options,
                quantity,
            } => {
                commands::cart::add(
                    &session.cart,
                    &session.catalog,
                    &product,
                    size.as_deref(),
                    &options,
                    quantity,
                )?;
                show(&commands::cart::show(&session.cart));
            }
            CartAction::Remove { line } => {
                commands::cart::remove(&session.cart, &line)?;
                show(&commands::cart::show(&session.cart));
            }
            CartAction::Set { line, quantity } => {
                commands::cart::set_quantity(&session.cart, &line, quantity)?;
                show(&commands::cart::show(&session.cart));
            }
            CartAction::Clear => session.cart.clear(),
            CartAction::Show => show(&commands::cart::show(&session.cart)),
        },
        Commands::Checkout {
            delivery,
            payment,
            note,
        } => {
            let order = commands::checkout::run(&session, delivery, payment, note, Utc::now())?;
            show(&commands::checkout::receipt(&order));
        }
        Commands::Profile { action } => match action {
            ProfileAction::Show => {
                show(&commands::profile::show(&session.profile_file.load()?));
            }
            ProfileAction::Scan { code } => {
                tracing::info!("{}", commands::profile::scan(&session, &code)?);
            }
            ProfileAction::Redeem { reward } => {
                tracing::info!("{}", commands::profile::redeem(&session, &reward)?);
            }
        },
        Commands::Admin { action } => match action {
            AdminAction::Add(fields) => {
                let id = commands::admin::add(&mut session, fields.into())?;
                tracing::info!("Added product {id}");
            }
            AdminAction::Update { id, fields } => {
                let summary = commands::admin::update(&mut session, &id, fields.into())?;
                tracing::info!("Updated {summary}");
            }
            AdminAction::Remove { id } => {
                let name = commands::admin::remove(&mut session, &id)?;
                tracing::info!("Removed {name}");
            }
        },
    }
    Ok(())
}
