pub mod assets;
pub mod consumption;
pub mod events;
pub mod forecast;
pub mod tariff;

pub use assets::*;
pub use consumption::*;
pub use events::*;
pub use forecast::*;
pub use tariff::*;
