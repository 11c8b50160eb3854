mod command;
mod session;

pub use session::Session;
