pub mod advice;
pub mod asset;
pub mod event;
pub mod slot;
pub mod status;

pub use advice::*;
pub use asset::*;
pub use event::*;
pub use slot::*;
pub use status::*;
