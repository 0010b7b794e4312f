mod day;

pub use day::*;
