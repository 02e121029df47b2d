pub mod cli;
pub mod codec;
pub mod config;
pub mod rpc;
mod utils;

pub type Error = Box<dyn std::error::Error + Send + Sync>;
pub type Result<T> = std::result::Result<T, Error>;
