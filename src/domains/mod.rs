//! Domains module containing business logic organized by bounded contexts.
//!
//! - **tools**: the Coin Railz service catalog and tool dispatch
//! - **resources**: read-only catalog and server information

pub mod resources;
pub mod tools;
