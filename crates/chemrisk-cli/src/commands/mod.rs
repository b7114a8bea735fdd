pub mod assess;
pub mod detect;
