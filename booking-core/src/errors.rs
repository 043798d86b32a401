use std::fmt;

use crate::leg::Leg;
use crate::passenger::SeatId;

/// Errors reported by the seat assignment store.
///
/// Every operation returns a result instead of panicking, and on any error
/// the store is left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// A passenger index outside `[0, count)`. A UI driving the store from
    /// live state should never produce one.
    InvalidIndex(usize),
    /// The leg is not part of this booking (e.g. a return seat on a
    /// one-way booking).
    InvalidLeg(Leg),
    /// The seat is already held by another passenger on the same leg.
    /// Recoverable: surface it and let the user pick a different seat.
    AlreadyAssigned { seat: SeatId, holder: usize },
}

impl fmt::Display for BookingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingError::InvalidIndex(index) => {
                write!(f, "No passenger at index {}", index)
            }
            BookingError::InvalidLeg(leg) => {
                write!(f, "The {} leg is not part of this booking", leg)
            }
            BookingError::AlreadyAssigned { seat, holder } => {
                write!(
                    f,
                    "Seat {} is already assigned to passenger {}",
                    seat,
                    holder + 1
                )
            }
        }
    }
}

impl std::error::Error for BookingError {}
