use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "creationary")]
#[command(about = "Debounce, pagination and currency helpers for the Creationary marketplace")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML config file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Two-decimal currency arithmetic
    Currency {
        #[arg(value_enum)]
        op: CurrencyOp,
        #[arg(allow_negative_numbers = true)]
        a: f64,
        #[arg(allow_negative_numbers = true)]
        b: f64,
    },

    /// Print the pagination strip for a page
    Pages {
        #[arg(long)]
        current: u32,
        #[arg(long, required_unless_present = "total_items", conflicts_with = "total_items")]
        total: Option<u32>,
        #[arg(long, help = "Item count; pages are derived from pagination.per_page")]
        total_items: Option<u64>,
        #[arg(long, help = "Overrides pagination.max_visible_pages")]
        max_visible: Option<u32>,
    },

    /// Print the checkout summary for a price
    Checkout {
        #[arg(long)]
        price: f64,
        #[arg(long)]
        original_price: Option<f64>,
        #[arg(long, help = "Print as JSON")]
        json: bool,
    },

    /// List the explore page's category tabs
    Categories,

    /// Read search keystrokes from stdin, one per line, and print each settled URL
    Search {
        #[arg(long, help = "Overrides search.debounce_ms")]
        delay_ms: Option<u64>,
        #[arg(long, help = "Overrides search.path")]
        path: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CurrencyOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl CurrencyOp {
    pub fn apply(self, a: f64, b: f64) -> f64 {
        use crate::utils::currency;
        match self {
            CurrencyOp::Add => currency::add(a, b),
            CurrencyOp::Subtract => currency::subtract(a, b),
            CurrencyOp::Multiply => currency::multiply(a, b),
            CurrencyOp::Divide => currency::divide(a, b),
        }
    }
}
