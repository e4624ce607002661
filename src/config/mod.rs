pub mod settings;

pub use settings::{AppConfig, ProgressConfig, TotalsMode};
