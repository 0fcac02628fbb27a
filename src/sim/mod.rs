/// Monthly energy dispatch with and without a battery.
pub mod dispatch;
pub mod engine;
/// Constant monthly reference data.
pub mod reference;
pub mod types;
