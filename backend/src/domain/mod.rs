// Domain layer - invitation entity, value objects and events
// No dependencies on other layers

pub mod entities;
pub mod value_objects;
pub mod events;

pub use entities::*;
pub use value_objects::*;
pub use events::*;
