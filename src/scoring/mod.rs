//! Pure scoring functions.
//!
//! - `hand`: the show, four cards plus the starter
//! - `pegging`: points during the play, read from the play stack

pub mod hand;
pub mod pegging;

pub use hand::{fifteens, flush, nobs, pairs, runs, score_hand, HandKind, HandScore};
pub use pegging::{peg_pairs, peg_runs, PegScore};
