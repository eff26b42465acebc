//! Domain layer — pure business logic, types, and validation.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, `std::process`, or `std::net`.
//! All functions are synchronous and take data in, returning data out.

pub mod arguments;
pub mod command;
pub mod config;
pub mod environment;
pub mod error;
pub mod inventory;

pub use arguments::{ArgumentList, as_array, as_list_argument};
pub use command::{InvocationDescriptor, Operation};
pub use config::{ProvisionerConfig, StringOrList};
pub use error::{ConfigError, ProvisionError};
pub use inventory::{GroupSection, generate_inventory, render_inventory, resolve_groups};
