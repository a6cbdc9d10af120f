//! Multi-year projection engine for leveraged tax-loss-harvesting strategies
//!
//! Projects the financial and tax consequences of a QFAF overlay combined
//! with a collateral investment: harvested short-term losses, ordinary-loss
//! generation under the §461(l) cap, NOL carryforward and usage, fees, and
//! tax savings, year by year over a fixed horizon.
//!
//! The engine is a pure function of its inputs: a [`client::ClientProfile`],
//! an [`Assumptions`] set, a [`projection::ProjectionConfig`], and optional
//! per-year overrides. Runs are independently reentrant and can be executed
//! in parallel across clients from the call site.

pub mod assumptions;
pub mod client;
pub mod error;
pub mod projection;

pub use assumptions::Assumptions;
pub use error::ProjectionError;
