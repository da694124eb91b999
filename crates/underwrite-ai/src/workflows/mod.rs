pub mod derogation;
pub mod quote;
