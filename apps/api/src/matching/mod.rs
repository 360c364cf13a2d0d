pub mod handlers;
pub mod recorder;
pub mod resolver;
pub mod responder;
