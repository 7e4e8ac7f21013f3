//! Issuance pipeline services

mod challenge;
mod issuance;
mod propagation;

pub use challenge::{dns_txt_digest, ChallengeCoordinator};
pub use issuance::IssuanceService;
pub use propagation::{PropagationConfig, PropagationStrategy, PropagationWaiter};
