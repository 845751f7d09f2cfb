//! TTL memoization of assessments

pub mod assessment;
pub mod clock;
pub mod ttl;

pub use assessment::*;
pub use clock::*;
pub use ttl::*;
