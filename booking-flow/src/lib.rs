pub mod auth;

pub mod errors;

pub mod session;

pub use auth::{Buyer, Role};
pub use errors::FlowError;
pub use session::BookingSession;
