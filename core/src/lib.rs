//! # subsweep engine
//!
//! Turns the heterogeneous output of independent recon tools into one trustworthy asset list
//! and tracks what changed since the previous run.
//!
//! Stages run strictly in this order, each completing before the next starts:
//! [`source`] → [`aggregate`] → [`validity`] → {[`resolve`], [`delta`]} → [`store`].
//! [`pipeline`] wires them together around the collaborators.

pub mod aggregate;
pub mod delta;
pub mod lock;
pub mod pipeline;
pub mod resolve;
pub mod source;
pub mod store;
pub mod validity;

pub use pipeline::{Collaborators, Pipeline, RunReport};
