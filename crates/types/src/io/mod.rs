pub mod hand_parser;
pub mod identifier;
