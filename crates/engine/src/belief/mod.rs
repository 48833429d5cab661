//! What each seat has shown so far.
//!
//! The model is rebuilt from the ledger every turn: each call is handed to a
//! [`CallInterpreter`] (in practice the rule registry), and whatever range the
//! interpreting rule shows narrows the bidder's prior by intersection.

mod model;
mod range;

pub use model::{BeliefModel, CallInterpreter, SeatBelief, StrengthTemplate};
pub use range::{ShapeSignals, StrengthRange};
