pub mod errors;

pub mod memory;

pub mod types;

use crate::errors::ProviderError;
use crate::types::{BookingRequest, SeatBlock};

/// Flight id as the backend knows it.
pub type FlightId = u32;

/// A trait that defines the required methods for a provider of seat
/// availability and booking submission. Implemented by any structure that
/// talks to the airline backend; the booking flow never reaches past it.
pub trait Provider {
    /// Fetches the seat blocks of one flight. The returned occupancy is an
    /// immutable snapshot: it reflects the backend at fetch time and is not
    /// refreshed during a seat-selection session.
    fn seat_availability(&mut self, flight: FlightId) -> Result<Vec<SeatBlock>, ProviderError>;

    /// Submits a finished booking. The backend performs the authoritative
    /// seat and payload validation; rejection reasons come back as opaque
    /// messages for display.
    fn book(&mut self, request: &BookingRequest) -> Result<(), ProviderError>;
}
