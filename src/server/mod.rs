pub mod dto;
pub mod extract;
mod habits;
pub mod response;
mod router;
pub mod validation;

pub use habits::habit_router;
pub use router::{AppState, create_router};
