//! Declarative building blocks for rule modules.
//!
//! A convention is declared as auction criteria (when the rule is in
//! force), call predicates (which calls it makes), and what each call
//! shows about the hand. The same declaration both selects a call for a
//! hand and explains a call already on the ledger.

pub mod annotations;
pub mod auction_predicates;
pub mod call_predicates;
mod convention;
pub mod hand_constraint;
#[macro_use]
mod macros;
pub mod point_ranges;
pub mod shows;

pub use convention::{all_calls, bid, describe, evaluate, Convention, Preference};
