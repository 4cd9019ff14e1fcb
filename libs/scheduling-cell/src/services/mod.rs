pub mod availability;
pub mod client;
pub mod enrichment;
pub mod suggestions;
