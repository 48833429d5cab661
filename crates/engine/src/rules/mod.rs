//! Rule modules and the registry that arbitrates between them.

mod asking;
pub mod catalog;
pub mod competitive;
mod context;
pub mod notrump;
pub mod opening;
pub mod raises;
mod registry;
pub mod responses;
pub mod slam;

pub use asking::{AskingSequence, AskingSlot};
pub use context::AuctionContext;
pub use registry::{Candidate, RegistryBuilder, RegistryError, RuleRegistry};

use crate::belief::StrengthTemplate;
use serde::{Deserialize, Serialize};
use std::fmt;
use types::{Call, Hand};

/// Identifier of every rule the engine knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RuleId {
    Strong2COpening,
    OneNotrumpOpening,
    TwoNotrumpOpening,
    OneSuitOpening,
    WeakTwoOpening,
    PreemptOpening,
    OpeningPass,
    JacobyTransfer,
    TransferCompletion,
    Stayman,
    StaymanResponse,
    ThreeNotrumpRaise,
    TwoNotrumpInvite,
    SingleRaise,
    LimitRaise,
    Jacoby2NT,
    GameRaise,
    Jacoby2NTRebid,
    NewSuitOneLevel,
    OneNotrumpResponse,
    BlackwoodAsk,
    BlackwoodResponse,
    BlackwoodSignOff,
    SimpleOvercall,
    OneNotrumpOvercall,
    TakeoutDouble,
    PenaltyDouble,
    CompetitivePass,
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Coarse ranking of rules. Artificial conventions outrank natural
/// constructive bids, which outrank invitations and competitive actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityTier {
    Competitive,
    Invitational,
    Constructive,
    Artificial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ForcingLevel {
    #[default]
    None,
    OneRound,
    Game,
}

/// Flags a rule attaches to its proposals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct RuleMetadata {
    pub bypass_suit_length: bool,
    pub bypass_strength_check: bool,
    pub forcing: ForcingLevel,
    pub is_asking_sequence_slot: bool,
    pub is_artificial: bool,
}

impl RuleMetadata {
    pub const NATURAL: RuleMetadata = RuleMetadata {
        bypass_suit_length: false,
        bypass_strength_check: false,
        forcing: ForcingLevel::None,
        is_asking_sequence_slot: false,
        is_artificial: false,
    };

    pub const fn artificial(forcing: ForcingLevel) -> Self {
        RuleMetadata {
            forcing,
            is_artificial: true,
            ..Self::NATURAL
        }
    }

    pub const fn asking_slot() -> Self {
        RuleMetadata {
            is_asking_sequence_slot: true,
            is_artificial: true,
            ..Self::NATURAL
        }
    }
}

/// A rule's answer for one turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub call: Call,
    pub rationale: String,
    pub metadata: RuleMetadata,
}

/// One bidding capability.
pub trait RuleModule: Send + Sync {
    fn id(&self) -> RuleId;

    fn tier(&self) -> PriorityTier;

    /// Propose a call for `hand`, or `None` if the rule does not apply.
    fn evaluate(&self, hand: &Hand, ctx: &AuctionContext) -> Option<Proposal>;

    /// What `call` shows if this rule would have made it here.
    fn describe(&self, call: Call, ctx: &AuctionContext) -> Option<StrengthTemplate>;
}
