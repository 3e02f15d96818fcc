//! CIS Microsoft 365 Foundations Benchmark checks
//!
//! A check is a [`CheckDescriptor`]: benchmark metadata, the upstream source
//! it reads and the rule it applies. Descriptors live in [`catalog`] as
//! `const` tables and are interpreted by [`executor::execute`].

pub mod catalog;
pub mod executor;
pub mod metadata;
pub mod outcome;
pub mod record;
pub mod rule;

use crate::admin::Source;

pub use executor::execute;
pub use metadata::{CheckMetadata, Level, License, Section};
pub use outcome::{CheckOutcome, CheckStatus, ResourceResult, ResultShape};
pub use rule::{Expect, FieldRule, Notes, Rule};

/// One benchmark control
#[derive(Debug, Clone, Copy)]
pub struct CheckDescriptor {
    pub metadata: &'static CheckMetadata,
    pub source: Source,
    pub rule: Rule,
}

impl CheckDescriptor {
    pub fn id(&self) -> &'static str {
        self.metadata.id
    }
}
