pub mod runner;
pub mod sink;
