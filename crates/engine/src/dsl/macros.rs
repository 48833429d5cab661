/// Declare a rule module. The struct name doubles as its `RuleId` variant.
#[macro_export]
macro_rules! convention {
    (@metadata) => {
        $crate::rules::RuleMetadata::NATURAL
    };
    (@metadata $metadata:expr) => {
        $metadata
    };
    (
        struct $struct_name:ident;
        tier: $tier:ident,
        rationale: $rationale:literal,
        auction: [ $( $a_pred:expr ),* $(,)? ],
        call: [ $( $c_pred:expr ),* $(,)? ],
        shows: [ $( $shows_pred:expr ),* $(,)? ]
        $(, annotations: [ $( $ann:ident ),* $(,)? ] )?
        $(, metadata: $metadata:expr )?
        $(, candidates: [ $( $candidate:expr ),* $(,)? ] )?
        $(, prefer: $preference:ident )?
        $(,)?
    ) => {
        pub struct $struct_name;

        impl $crate::dsl::Convention for $struct_name {
            fn rationale(&self) -> &'static str {
                $rationale
            }

            fn auction_criteria(&self) -> Vec<Box<dyn $crate::dsl::auction_predicates::AuctionPredicate>> {
                vec![ $( Box::new($a_pred) ),* ]
            }

            fn call_predicates(&self) -> Vec<Box<dyn $crate::dsl::call_predicates::CallPredicate>> {
                vec![ $( Box::new($c_pred) ),* ]
            }

            fn shows(&self) -> Vec<Box<dyn $crate::dsl::shows::Shows>> {
                vec![ $( Box::new($shows_pred) ),* ]
            }

            fn annotations(&self) -> Vec<$crate::dsl::annotations::Annotation> {
                vec![ $( $( $crate::dsl::annotations::Annotation::$ann ),* )? ]
            }

            fn metadata(&self) -> $crate::rules::RuleMetadata {
                $crate::convention!(@metadata $( $metadata )?)
            }

            $(
            fn candidates(&self) -> Vec<types::Call> {
                vec![ $( $candidate ),* ]
            }
            )?

            $(
            fn preference(&self) -> $crate::dsl::Preference {
                $crate::dsl::Preference::$preference
            }
            )?
        }

        impl $crate::rules::RuleModule for $struct_name {
            fn id(&self) -> $crate::rules::RuleId {
                $crate::rules::RuleId::$struct_name
            }

            fn tier(&self) -> $crate::rules::PriorityTier {
                $crate::rules::PriorityTier::$tier
            }

            fn evaluate(
                &self,
                hand: &types::Hand,
                ctx: &$crate::rules::AuctionContext,
            ) -> Option<$crate::rules::Proposal> {
                $crate::dsl::evaluate(self, hand, ctx)
            }

            fn describe(
                &self,
                call: types::Call,
                ctx: &$crate::rules::AuctionContext,
            ) -> Option<$crate::belief::StrengthTemplate> {
                $crate::dsl::describe(self, call, ctx)
            }
        }
    };
}
