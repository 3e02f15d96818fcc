//! CIS Microsoft 365 Foundations Benchmark checks
//!
//! Each check reads one tenant setting through a pre-authenticated session
//! and reports a [`checks::CheckOutcome`]. Nothing here writes to the tenant.

pub mod admin;
pub mod checks;
pub mod config;
pub mod error;
pub mod session;

pub use admin::{AdminClient, Source, TenantApi};
pub use checks::{
    catalog, execute, CheckDescriptor, CheckOutcome, CheckStatus, ResourceResult, ResultShape,
};
pub use config::{ConfigManager, Endpoints};
pub use error::{Cis365Error, Result};
pub use session::{Service, Session};
