//! The standard convention catalog.
//!
//! Registration order matters: among rules of the same tier, the one
//! registered first wins.

use super::{competitive, notrump, opening, raises, responses, slam, RegistryBuilder};

pub fn standard() -> RegistryBuilder {
    RegistryBuilder::new()
        // Ace asking sequence
        .register(Box::new(slam::BlackwoodResponse))
        .register(Box::new(slam::BlackwoodSignOff))
        .register(Box::new(slam::BlackwoodAsk))
        // Openings
        .register(Box::new(opening::Strong2COpening))
        .register(Box::new(opening::OneNotrumpOpening))
        .register(Box::new(opening::TwoNotrumpOpening))
        .register(Box::new(opening::OneSuitOpening))
        .register(Box::new(opening::WeakTwoOpening))
        .register(Box::new(opening::PreemptOpening))
        .register(Box::new(opening::OpeningPass))
        // Over partner's 1NT
        .register(Box::new(notrump::JacobyTransfer))
        .register(Box::new(notrump::Stayman))
        .register(Box::new(notrump::TransferCompletion))
        .register(Box::new(notrump::StaymanResponse))
        .register(Box::new(notrump::ThreeNotrumpRaise))
        .register(Box::new(notrump::TwoNotrumpInvite))
        // Major raises
        .register(Box::new(raises::Jacoby2NT))
        .register(Box::new(raises::Jacoby2NTRebid))
        .register(Box::new(raises::GameRaise))
        .register(Box::new(raises::LimitRaise))
        .register(Box::new(raises::SingleRaise))
        // Other responses
        .register(Box::new(responses::NewSuitOneLevel))
        .register(Box::new(responses::OneNotrumpResponse))
        // Competition
        .register(Box::new(competitive::OneNotrumpOvercall))
        .register(Box::new(competitive::SimpleOvercall))
        .register(Box::new(competitive::TakeoutDouble))
        .register(Box::new(competitive::PenaltyDouble))
        .register(Box::new(competitive::CompetitivePass))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PriorityTable;
    use crate::rules::RuleId;
    use std::collections::HashSet;

    #[test]
    fn every_rule_registered_once() {
        let registry = standard().build(&PriorityTable::default()).unwrap();
        let ids: HashSet<RuleId> = registry.ids().collect();
        assert_eq!(ids.len(), registry.len());
        assert_eq!(registry.len(), 28);
    }

    #[test]
    fn tiers_map_to_priorities() {
        let registry = standard().build(&PriorityTable::default()).unwrap();
        assert_eq!(registry.priority_of(RuleId::JacobyTransfer), Some(400));
        assert_eq!(registry.priority_of(RuleId::OneNotrumpOpening), Some(300));
        assert_eq!(registry.priority_of(RuleId::LimitRaise), Some(200));
        assert_eq!(registry.priority_of(RuleId::CompetitivePass), Some(100));
    }
}
