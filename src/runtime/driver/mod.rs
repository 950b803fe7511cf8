pub mod cli;

pub use cli::{CliDriver, CliDriverError, DriverResult, SessionOutcome};
