//! DNS provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "alidns")]
mod alidns;
#[cfg(feature = "cloudflare")]
mod cloudflare;
#[cfg(feature = "huaweicloud")]
mod huaweicloud;
#[cfg(feature = "memory")]
mod memory;

#[cfg(feature = "alidns")]
pub use alidns::AlidnsProvider;
#[cfg(feature = "cloudflare")]
pub use cloudflare::CloudflareProvider;
#[cfg(feature = "huaweicloud")]
pub use huaweicloud::HuaweicloudProvider;
#[cfg(feature = "memory")]
pub use memory::MemoryProvider;
