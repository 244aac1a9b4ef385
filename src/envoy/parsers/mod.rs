pub mod home_parser;
pub mod label_rules;
pub mod production_parser;

pub use home_parser::HomePageExtractor;
pub use production_parser::ProductionPageExtractor;
