//! # Domain Model
//!
//! Everything the engine knows about domain names lives here:
//! * [`target`]: the user supplied target domain.
//! * [`normalize`]: canonicalization of raw, tool-produced strings.
//! * [`sets`]: the candidate, canonical and valid domain sets plus the resolved IP map.

pub mod normalize;
pub mod sets;
pub mod target;

pub use normalize::normalize;
pub use sets::{CandidateSet, CanonicalWordlist, ResolvedIpMap, ValidDomainSet};
pub use target::TargetDomain;
