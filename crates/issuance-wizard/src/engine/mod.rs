pub mod issuance_flow;

pub use issuance_flow::IssuanceFlow;
