use std::fmt;

use booking_core::{BookingError, SeatId};
use provider::errors::ProviderError;

/// Errors of the booking session layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowError {
    /// The seat store refused the operation.
    Store(BookingError),
    /// The backend collaborator failed or rejected the request.
    Provider(ProviderError),
    /// The seat does not exist on the leg's seat map.
    UnknownSeat(SeatId),
    /// The authoritative seat map reports the seat as taken; it can never be
    /// selected regardless of local state.
    SeatOccupied(SeatId),
    /// Submission was attempted before every passenger had their seats.
    NotReady,
    /// A required profile field is still empty at submission time.
    MissingField { passenger: usize, field: &'static str },
    /// The auth token could not be decoded into a buyer identity.
    InvalidToken(String),
}

impl fmt::Display for FlowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowError::Store(err) => write!(f, "{}", err),
            FlowError::Provider(err) => write!(f, "{}", err),
            FlowError::UnknownSeat(seat) => {
                write!(f, "Seat {} does not exist on this flight", seat)
            }
            FlowError::SeatOccupied(seat) => {
                write!(f, "Seat {} is occupied", seat)
            }
            FlowError::NotReady => {
                write!(f, "Every passenger needs a seat on every flight before booking")
            }
            FlowError::MissingField { passenger, field } => {
                write!(
                    f,
                    "Please complete the {} of passenger {}",
                    field,
                    passenger + 1
                )
            }
            FlowError::InvalidToken(msg) => write!(f, "Invalid user token: {}", msg),
        }
    }
}

impl std::error::Error for FlowError {}

impl From<BookingError> for FlowError {
    fn from(err: BookingError) -> Self {
        FlowError::Store(err)
    }
}

impl From<ProviderError> for FlowError {
    fn from(err: ProviderError) -> Self {
        FlowError::Provider(err)
    }
}
