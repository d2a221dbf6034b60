use crate::utils::error::Result;
use async_trait::async_trait;

/// Where a settled search goes, typically a router replacing the current URL.
#[async_trait]
pub trait QueryNavigator: Send + Sync {
    async fn replace(&self, href: String) -> Result<()>;
}
