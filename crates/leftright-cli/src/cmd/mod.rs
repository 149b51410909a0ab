pub mod layouts;
pub mod ratio;
pub mod replay;
