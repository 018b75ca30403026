//! Timer plumbing between the engine and the async event loop

pub mod ticker;

pub use ticker::TickDriver;
