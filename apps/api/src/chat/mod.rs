pub mod handlers;
pub mod hub;
pub mod ws;
