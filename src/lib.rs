pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliConfig;

pub use config::AppConfig;
pub use self::core::{
    checkout::CheckoutSummary,
    debounce::Debounced,
    debounce_fn::DebouncedFn,
    pagination::PageItem,
    search::{ExploreQuery, SearchController},
};
pub use utils::currency;
pub use utils::error::{CreationaryError, Result};
