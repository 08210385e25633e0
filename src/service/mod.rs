//! Resource services: validation, pagination, and the character/droid operations over a `Store`.

mod characters;
mod droids;
pub mod pagination;
mod validation;
pub use characters::CharacterService;
pub use droids::DroidService;
pub use validation::RequestValidator;
