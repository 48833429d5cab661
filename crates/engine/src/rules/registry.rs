use super::{AuctionContext, Proposal, RuleId, RuleMetadata, RuleModule};
use crate::belief::{CallInterpreter, StrengthTemplate};
use crate::config::PriorityTable;
use serde::Serialize;
use thiserror::Error;
use types::{Call, Hand};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("rule {0} is registered twice")]
    DuplicateRule(RuleId),
    #[error("registry has no rules")]
    Empty,
}

/// The registry's pick for one turn.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub call: Call,
    pub rationale: String,
    pub metadata: RuleMetadata,
    /// `None` when no rule matched.
    pub rule: Option<RuleId>,
    pub priority: i32,
    /// Other rules that matched but lost on priority or order.
    pub also_matched: Vec<RuleId>,
}

impl Candidate {
    pub fn no_rule() -> Self {
        Self {
            call: Call::Pass,
            rationale: "no applicable rule".to_string(),
            metadata: RuleMetadata::NATURAL,
            rule: None,
            priority: i32::MIN,
            also_matched: vec![],
        }
    }
}

struct Entry {
    module: Box<dyn RuleModule>,
    priority: i32,
}

/// Collects rule modules before the registry is frozen.
#[derive(Default)]
pub struct RegistryBuilder {
    modules: Vec<Box<dyn RuleModule>>,
    error: Option<RegistryError>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module. Registration order breaks priority ties.
    pub fn register(mut self, module: Box<dyn RuleModule>) -> Self {
        if self.error.is_none() && self.modules.iter().any(|m| m.id() == module.id()) {
            self.error = Some(RegistryError::DuplicateRule(module.id()));
        }
        self.modules.push(module);
        self
    }

    /// Freeze the registry, fixing each module's priority from `priorities`.
    pub fn build(self, priorities: &PriorityTable) -> Result<RuleRegistry, RegistryError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.modules.is_empty() {
            return Err(RegistryError::Empty);
        }
        let entries = self
            .modules
            .into_iter()
            .map(|module| {
                let priority = priorities.priority(module.tier());
                Entry { module, priority }
            })
            .collect();
        Ok(RuleRegistry { entries })
    }
}

/// Immutable set of rule modules.
pub struct RuleRegistry {
    entries: Vec<Entry>,
}

impl RuleRegistry {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = RuleId> + '_ {
        self.entries.iter().map(|e| e.module.id())
    }

    pub fn priority_of(&self, id: RuleId) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| e.module.id() == id)
            .map(|e| e.priority)
    }

    /// Ask every module once and keep the highest-priority proposal.
    pub fn select(&self, hand: &Hand, ctx: &AuctionContext) -> Candidate {
        let mut matches: Vec<(&Entry, Proposal)> = Vec::new();
        for entry in &self.entries {
            let Some(proposal) = entry.module.evaluate(hand, ctx) else {
                continue;
            };
            if !is_well_formed(&proposal.call) {
                debug_assert!(
                    false,
                    "rule {} proposed malformed call {:?}",
                    entry.module.id(),
                    proposal.call
                );
                tracing::error!(rule = %entry.module.id(), call = ?proposal.call, "dropping malformed proposal");
                continue;
            }
            matches.push((entry, proposal));
        }

        // Stable on ties: the first registered of the best priority wins.
        let Some(best) = matches
            .iter()
            .enumerate()
            .max_by(|(ia, (a, _)), (ib, (b, _))| a.priority.cmp(&b.priority).then(ib.cmp(ia)))
            .map(|(i, _)| i)
        else {
            return Candidate::no_rule();
        };

        let also_matched = matches
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != best)
            .map(|(_, (entry, _))| entry.module.id())
            .collect();
        let (entry, proposal) = matches.swap_remove(best);
        tracing::debug!(rule = %entry.module.id(), call = %proposal.call, priority = entry.priority, "rule selected");
        Candidate {
            call: proposal.call,
            rationale: proposal.rationale,
            metadata: proposal.metadata,
            rule: Some(entry.module.id()),
            priority: entry.priority,
            also_matched,
        }
    }

    /// Modules in the order `select` would prefer them.
    fn by_preference(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.priority.cmp(&a.priority));
        entries
    }
}

impl RuleRegistry {
    /// The preferred rule that would have made `call` here, and what it shows.
    pub fn explain(&self, call: Call, ctx: &AuctionContext) -> Option<(RuleId, StrengthTemplate)> {
        self.by_preference()
            .into_iter()
            .find_map(|entry| entry.module.describe(call, ctx).map(|t| (entry.module.id(), t)))
    }
}

impl CallInterpreter for RuleRegistry {
    fn interpret(&self, call: Call, ctx: &AuctionContext) -> Option<StrengthTemplate> {
        self.explain(call, ctx).map(|(_, template)| template)
    }
}

fn is_well_formed(call: &Call) -> bool {
    match call.level() {
        Some(level) => (1..=7).contains(&level),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::belief::BeliefModel;
    use crate::rules::PriorityTier;
    use types::{Auction, Position};

    struct Fixed {
        id: RuleId,
        tier: PriorityTier,
        call: Option<Call>,
    }

    impl RuleModule for Fixed {
        fn id(&self) -> RuleId {
            self.id
        }

        fn tier(&self) -> PriorityTier {
            self.tier
        }

        fn evaluate(&self, _hand: &Hand, _ctx: &AuctionContext) -> Option<Proposal> {
            self.call.map(|call| Proposal {
                call,
                rationale: format!("{}", self.id),
                metadata: RuleMetadata::NATURAL,
            })
        }

        fn describe(&self, call: Call, _ctx: &AuctionContext) -> Option<StrengthTemplate> {
            (Some(call) == self.call).then(StrengthTemplate::default)
        }
    }

    fn fixed(id: RuleId, tier: PriorityTier, call: &str) -> Box<dyn RuleModule> {
        Box::new(Fixed {
            id,
            tier,
            call: Some(call.parse().unwrap()),
        })
    }

    fn select(registry: &RuleRegistry) -> Candidate {
        let belief = BeliefModel::default();
        let auction = Auction::new(Position::North);
        let ctx = AuctionContext::new(&auction, &belief);
        registry.select(&Hand::parse("AK2.AK2.5432.K32"), &ctx)
    }

    #[test]
    fn highest_priority_wins() {
        let registry = RegistryBuilder::new()
            .register(fixed(RuleId::OneSuitOpening, PriorityTier::Constructive, "1C"))
            .register(fixed(RuleId::Strong2COpening, PriorityTier::Artificial, "2C"))
            .build(&PriorityTable::default())
            .unwrap();
        let candidate = select(&registry);
        assert_eq!(candidate.call, "2C".parse().unwrap());
        assert_eq!(candidate.rule, Some(RuleId::Strong2COpening));
        assert_eq!(candidate.priority, 400);
        assert_eq!(candidate.also_matched, vec![RuleId::OneSuitOpening]);
    }

    #[test]
    fn ties_go_to_first_registered() {
        let registry = RegistryBuilder::new()
            .register(fixed(RuleId::JacobyTransfer, PriorityTier::Artificial, "2D"))
            .register(fixed(RuleId::Stayman, PriorityTier::Artificial, "2C"))
            .build(&PriorityTable::default())
            .unwrap();
        let candidate = select(&registry);
        assert_eq!(candidate.rule, Some(RuleId::JacobyTransfer));
        assert_eq!(candidate.also_matched, vec![RuleId::Stayman]);
    }

    #[test]
    fn no_match_passes() {
        let registry = RegistryBuilder::new()
            .register(Box::new(Fixed {
                id: RuleId::OpeningPass,
                tier: PriorityTier::Competitive,
                call: None,
            }))
            .build(&PriorityTable::default())
            .unwrap();
        let candidate = select(&registry);
        assert_eq!(candidate, Candidate::no_rule());
        assert_eq!(candidate.rationale, "no applicable rule");
    }

    #[test]
    fn duplicates_and_empty_are_rejected() {
        let result = RegistryBuilder::new()
            .register(fixed(RuleId::Stayman, PriorityTier::Artificial, "2C"))
            .register(fixed(RuleId::Stayman, PriorityTier::Artificial, "2C"))
            .build(&PriorityTable::default());
        assert_eq!(result.err(), Some(RegistryError::DuplicateRule(RuleId::Stayman)));
        assert_eq!(
            RegistryBuilder::new().build(&PriorityTable::default()).err(),
            Some(RegistryError::Empty)
        );
    }

    #[test]
    fn priorities_come_from_the_table() {
        let table = PriorityTable {
            competitive: 500,
            ..PriorityTable::default()
        };
        let registry = RegistryBuilder::new()
            .register(fixed(RuleId::Strong2COpening, PriorityTier::Artificial, "2C"))
            .register(fixed(RuleId::CompetitivePass, PriorityTier::Competitive, "P"))
            .build(&table)
            .unwrap();
        assert_eq!(registry.priority_of(RuleId::CompetitivePass), Some(500));
        assert_eq!(select(&registry).call, Call::Pass);
    }

    #[test]
    fn interpreter_prefers_higher_priority() {
        let registry = RegistryBuilder::new()
            .register(fixed(RuleId::OneSuitOpening, PriorityTier::Constructive, "1C"))
            .build(&PriorityTable::default())
            .unwrap();
        let belief = BeliefModel::default();
        let auction = Auction::new(Position::North);
        let ctx = AuctionContext::new(&auction, &belief);
        assert!(registry.interpret("1C".parse().unwrap(), &ctx).is_some());
        assert!(registry.interpret("1D".parse().unwrap(), &ctx).is_none());
    }
}
