#![warn(clippy::pedantic)]

pub mod config;
pub mod helpers;
pub mod render;
pub mod request;
pub mod serve;

pub use config::Config;
pub use request::RequestContext;
pub use serve::respond;
