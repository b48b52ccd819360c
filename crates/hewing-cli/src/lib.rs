pub mod data;
pub mod error;
pub mod report;
pub mod session;

pub use error::CliError;
