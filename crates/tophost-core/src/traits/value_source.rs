// # Update Value Source Trait
//
// Defines the interface for obtaining the value to publish when none is
// given explicitly, typically the caller's public address from a lookup
// service.
//
// ## Implementations
//
// - HTTP lookup: `tophost-value-http` crate

use async_trait::async_trait;

use crate::error::Result;

/// Trait for update-value lookups
#[async_trait]
pub trait UpdateValueSource: Send + Sync {
    /// Fetch the value to publish
    ///
    /// The returned text is used verbatim; implementations must not trim or
    /// otherwise normalize it.
    ///
    /// # Errors
    ///
    /// `Error::FetchFailed` if the value could not be obtained.
    async fn fetch(&self) -> Result<String>;
}
