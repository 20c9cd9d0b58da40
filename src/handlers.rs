pub mod dashboard;
pub mod debug;
