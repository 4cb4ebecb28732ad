mod events;
mod signature;

pub use events::*;
pub use signature::*;
