pub mod errors;

pub mod leg;

pub mod passenger;

pub mod store;

pub mod view;

pub use errors::BookingError;
pub use leg::{Leg, Legs};
pub use passenger::{Passenger, PassengerProfile, ProfileField, SeatId, Sex};
pub use store::{SeatAssignmentStore, SeatOutcome, SeatStatus};
pub use view::{BookingView, PassengerView};
