use crate::passenger::{PassengerProfile, SeatId};

/// Read-only copy of one passenger taken by [`snapshot`].
///
/// [`snapshot`]: crate::store::SeatAssignmentStore::snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerView {
    pub profile: PassengerProfile,
    pub outbound_seat: Option<SeatId>,
    pub return_seat: Option<SeatId>,
}

/// Read-only copy of the whole booking, handed to the submission layer and
/// the summary UI. Owns its data: mutating the store afterwards does not
/// change a view already taken.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingView {
    pub passengers: Vec<PassengerView>,
}

impl BookingView {
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}
