use super::range::StrengthRange;
use crate::config::BeliefConfig;
use crate::dsl::annotations::Annotation;
use crate::rules::AuctionContext;
use serde::Serialize;
use types::{Auction, Call, Position};

/// What a call shows, as declared by the rule that explains it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrengthTemplate {
    pub range: StrengthRange,
    pub annotations: Vec<Annotation>,
}

/// Explains calls already on the ledger.
pub trait CallInterpreter {
    fn interpret(&self, call: Call, ctx: &AuctionContext) -> Option<StrengthTemplate>;
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SeatBelief {
    pub range: StrengthRange,
    pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BeliefModel {
    seats: [SeatBelief; 4],
    inconsistencies: usize,
    #[serde(skip)]
    config: BeliefConfig,
}

impl BeliefModel {
    /// Every seat at the universal prior.
    pub fn new(config: BeliefConfig) -> Self {
        Self {
            seats: Default::default(),
            inconsistencies: 0,
            config,
        }
    }

    /// Replay `ledger` from empty, narrowing each bidder by what its call shows.
    pub fn update(
        ledger: &Auction,
        interpreter: &dyn CallInterpreter,
        config: BeliefConfig,
    ) -> Self {
        let mut model = Self::new(config);
        let mut prefix = Auction::new(ledger.dealer);
        for (position, &call) in ledger.iter() {
            let template = {
                let ctx = AuctionContext::new(&prefix, &model);
                interpreter.interpret(call, &ctx)
            };
            if let Some(template) = template {
                model.apply(position, call, &template);
            }
            prefix.add_call(call);
        }
        model
    }

    /// Narrow one seat. An empty intersection keeps the prior.
    pub fn apply(&mut self, position: Position, call: Call, template: &StrengthTemplate) {
        let seat = &mut self.seats[position.idx()];
        match seat.range.narrow(&template.range) {
            Some(range) => seat.range = range,
            None => {
                self.inconsistencies += 1;
                tracing::warn!(
                    seat = %position,
                    call = %call,
                    prior = %seat.range,
                    shown = %template.range,
                    "modeling inconsistency: keeping prior range"
                );
            }
        }
        for annotation in &template.annotations {
            if !seat.annotations.contains(annotation) {
                seat.annotations.push(*annotation);
            }
        }
    }

    pub fn seat(&self, position: Position) -> &SeatBelief {
        &self.seats[position.idx()]
    }

    pub fn range(&self, position: Position) -> &StrengthRange {
        &self.seat(position).range
    }

    pub fn has_annotation(&self, position: Position, annotation: Annotation) -> bool {
        self.seat(position).annotations.contains(&annotation)
    }

    pub fn estimate(&self, position: Position) -> f32 {
        self.range(position).estimate(&self.config)
    }

    /// Summed point estimates of two seats, rounded down.
    pub fn combined_estimate(&self, a: Position, b: Position) -> u8 {
        (self.estimate(a) + self.estimate(b)).floor() as u8
    }

    /// Narrowings rejected because they would have emptied a range.
    pub fn inconsistencies(&self) -> usize {
        self.inconsistencies
    }

    pub fn config(&self) -> &BeliefConfig {
        &self.config
    }
}

impl Default for BeliefModel {
    fn default() -> Self {
        Self::new(BeliefConfig::default())
    }
}
