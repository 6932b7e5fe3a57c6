// ngen-domain: tipos destino de referencia construidos sobre ngen-core
pub mod pet;
pub mod registry;
pub use pet::{Pet, PetMethod};
pub use registry::{add_builtin_target, builtin_registry, builtin_target_names};
