mod fallback;
mod persona;
mod responder;

pub use fallback::{FallbackSet, pick_fallback};
pub use persona::Persona;
pub use responder::ResponseGenerator;
