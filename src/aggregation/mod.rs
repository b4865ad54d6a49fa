pub mod calculator;
pub mod cohort;
pub mod job;
pub mod window;
