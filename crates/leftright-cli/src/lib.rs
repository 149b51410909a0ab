pub mod client;
pub mod replay;
