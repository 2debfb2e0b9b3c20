pub mod actions;
pub mod app;
pub mod constants;
pub mod errors;
pub mod http;
pub mod intents;
pub mod services;
pub mod utils;
pub mod vendor;
