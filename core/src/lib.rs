pub mod browse;
pub mod session;
