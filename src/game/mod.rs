//! Game state and the driver that runs it.
//!
//! - `state`: `CribbageGame`, the rules state machine, and its builder
//! - `table`: `Table`, which plays whole games between `CribbageAI`s

pub mod state;
pub mod table;

pub use state::{CribbageGame, CribbageGameBuilder, Phase};
pub use table::{GameSummary, Table};
