pub mod checkout;
pub mod debounce;
pub mod debounce_fn;
pub mod pagination;
pub mod search;

pub use crate::domain::ports::QueryNavigator;
pub use crate::utils::error::Result;
