pub mod client;
pub mod error;
pub mod flows;
pub mod report;
pub mod runner;
pub mod steps;
pub mod utils;

// Re-export common items
pub use client::{HttpTransport, Transport};
pub use error::{HarnessError, HarnessResult};
pub use runner::{Flow, FlowReport};
pub use steps::Harness;
pub use utils::HarnessConfig;
