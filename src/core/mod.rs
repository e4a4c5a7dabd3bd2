//! Core module - normalization, identity, storage and the ambient plumbing

pub mod config;
pub mod context;
pub mod db;
pub mod distributor;
pub mod error;
pub mod footprint;
pub mod identity;
pub mod normalize;

pub use config::Config;
pub use context::Context;
pub use db::{DuplicatePolicy, Dump, InsertOutcome, PartDb, Removal};
pub use distributor::{DistributorPart, DistributorSource, JsonDirectory};
pub use error::{PartError, Result};
pub use footprint::{ArtifactKind, BatchResolver, PromptResolver, Resolver, ScriptedResolver};
pub use identity::ComponentFamily;
