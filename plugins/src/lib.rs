//! Wrappers around the external recon tools.
//!
//! Each wrapper knows the exact command line of its tool and implements one of the
//! collaborator traits from `subsweep_common::collaborator`.

use subsweep_common::collaborator::DiscoveryTool;
use subsweep_common::config::Config;

pub mod bruteforce;
pub mod passive;
pub mod probe;
pub mod resolver;
pub mod runner;

pub use bruteforce::DnsRecon;
pub use passive::{Amass, Subfinder};
pub use probe::Httpx;
pub use resolver::PureDns;

/// The discovery tools of a standard run, in report order.
pub fn discovery_tools(cfg: &Config) -> Vec<Box<dyn DiscoveryTool>> {
    vec![
        Box::new(Amass::from_config(cfg)),
        Box::new(Subfinder::from_config(cfg)),
        Box::new(DnsRecon::from_config(cfg)),
    ]
}
