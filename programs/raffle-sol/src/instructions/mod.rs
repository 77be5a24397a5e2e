#![allow(ambiguous_glob_reexports)]

pub mod check_upkeep;
pub mod enter_lottery;
pub mod fulfill_random_words;
pub mod initialize;
pub mod perform_upkeep;
pub mod queries;

pub use check_upkeep::*;
pub use enter_lottery::*;
pub use fulfill_random_words::*;
pub use initialize::*;
pub use perform_upkeep::*;
pub use queries::*;
