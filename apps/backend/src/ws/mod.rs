pub mod connection;
pub mod hub;
pub mod protocol;
pub mod session;
