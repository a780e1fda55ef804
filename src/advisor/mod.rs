pub mod battery;
pub mod engine;
pub mod ev;
pub mod general;
pub mod rank;
pub mod shading;
pub mod status;
pub mod timeline;
pub mod window;

pub use engine::*;
pub use rank::*;
pub use shading::*;
pub use status::{current_slot_index, narrate};
pub use timeline::*;
pub use window::*;
