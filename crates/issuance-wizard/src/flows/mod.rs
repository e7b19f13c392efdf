pub mod csv_issuance;

pub use csv_issuance::csv_issuance_steps;
