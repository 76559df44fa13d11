//! Run counters and the aggregate statistics derived from them.
mod state;
mod stats;

#[cfg(test)]
mod tests;

pub use state::RunState;
pub use stats::StatsSnapshot;
