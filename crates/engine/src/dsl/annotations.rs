//! Annotations for bidding rules
//!
//! Annotations are metadata about a bid's meaning that don't describe
//! hand constraints. Later rules read them back from the belief model.

use serde::{Deserialize, Serialize};

/// Metadata attached to a bid by its rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Annotation {
    /// This bid activates the notrump system (Stayman, transfers)
    NotrumpSystemsOn,
    /// This bid is a suited overcall
    Overcall,
    /// This bid is a Jacoby 2NT response (game forcing, 4+ card support)
    Jacoby2NT,
    /// This bid asks partner to bid the next suit up
    Transfer,
    /// This bid asks opener for a four-card major
    Stayman,
    /// This bid asks partner for aces
    AceAsk,
}
