use crate::errors::BookingError;
use crate::leg::{Leg, Legs};
use crate::passenger::{Passenger, ProfileField, SeatId};
use crate::view::{BookingView, PassengerView};

/// What happened on a successful [`SeatAssignmentStore::select_seat`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatOutcome {
    /// The seat is now held by the passenger.
    Selected,
    /// The passenger already held the seat; the hold was toggled off.
    Deselected,
}

/// How one seat should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatStatus {
    /// Taken according to the authoritative seat map. Always wins over
    /// local holds.
    Occupied,
    /// Held by a passenger of this booking.
    Selected,
    Available,
}

/// Holds the roster of passengers of one in-progress booking and, for each
/// passenger, at most one seat per leg.
///
/// The store guarantees that a given seat is never held by two passengers on
/// the same leg, that removing a passenger frees all of their seats, and that
/// the set of legs never changes once the booking exists. Passenger position
/// is identity: removal compacts the list and shifts later indices down.
pub struct SeatAssignmentStore {
    passengers: Vec<Passenger>,
    legs: Legs,
}

impl SeatAssignmentStore {
    /// Creates a store with a single passenger with an empty profile and no
    /// seats, the state every booking flow starts from.
    pub fn new(legs: Legs) -> Self {
        SeatAssignmentStore {
            passengers: vec![Passenger::default()],
            legs,
        }
    }

    pub fn legs(&self) -> Legs {
        self.legs
    }

    pub fn passenger_count(&self) -> usize {
        self.passengers.len()
    }

    /// Appends a new passenger with an empty profile and no seats, returning
    /// its index. Never fails.
    pub fn add_passenger(&mut self) -> usize {
        self.passengers.push(Passenger::default());
        self.passengers.len() - 1
    }

    /// Removes the passenger at `index`. Later passengers shift down one
    /// position; any seats the removed passenger held become free, they are
    /// never transferred.
    pub fn remove_passenger(&mut self, index: usize) -> Result<(), BookingError> {
        if index >= self.passengers.len() {
            return Err(BookingError::InvalidIndex(index));
        }
        self.passengers.remove(index);
        Ok(())
    }

    /// Overwrites one profile field. Pure data update: seat holds are never
    /// touched.
    pub fn update_profile(
        &mut self,
        index: usize,
        field: ProfileField,
        value: &str,
    ) -> Result<(), BookingError> {
        let passenger = self
            .passengers
            .get_mut(index)
            .ok_or(BookingError::InvalidIndex(index))?;
        passenger.profile.set(field, value);
        Ok(())
    }

    /// Assigns `seat` on `leg` to the passenger at `index`.
    ///
    /// If the passenger already holds that exact seat, the hold is toggled
    /// off instead. If another passenger holds it, the call fails with
    /// `AlreadyAssigned` and nothing changes. Otherwise the seat becomes the
    /// passenger's hold for the leg, releasing their previous hold on that
    /// leg in the same update.
    ///
    /// The occupancy scan runs before any field is written, so a failed call
    /// can never leave a partial assignment behind.
    pub fn select_seat(
        &mut self,
        index: usize,
        leg: Leg,
        seat: SeatId,
    ) -> Result<SeatOutcome, BookingError> {
        if index >= self.passengers.len() {
            return Err(BookingError::InvalidIndex(index));
        }
        if !self.legs.contains(leg) {
            return Err(BookingError::InvalidLeg(leg));
        }

        // Scan first, mutate after: this is the only operation that could
        // break the one-holder-per-seat invariant if written naively.
        match self.holder_of(leg, seat) {
            Some(holder) if holder == index => {
                self.passengers[index].set_seat(leg, None);
                Ok(SeatOutcome::Deselected)
            }
            Some(holder) => Err(BookingError::AlreadyAssigned { seat, holder }),
            None => {
                self.passengers[index].set_seat(leg, Some(seat));
                Ok(SeatOutcome::Selected)
            }
        }
    }

    /// Clears the passenger's hold on `leg`, if any. A no-op when nothing is
    /// held; fails only on an invalid index.
    pub fn deselect_seat(&mut self, index: usize, leg: Leg) -> Result<(), BookingError> {
        let passenger = self
            .passengers
            .get_mut(index)
            .ok_or(BookingError::InvalidIndex(index))?;
        passenger.set_seat(leg, None);
        Ok(())
    }

    /// The passenger currently holding `seat` on `leg`, if any.
    pub fn holder_of(&self, leg: Leg, seat: SeatId) -> Option<usize> {
        self.passengers.iter().position(|p| p.seat(leg) == Some(seat))
    }

    /// Display status of one seat. The authoritative seat map wins: a seat
    /// the backend reports as taken never shows as available or selected,
    /// even if stale local state disagrees.
    pub fn seat_status(&self, leg: Leg, seat: SeatId, physically_occupied: bool) -> SeatStatus {
        if physically_occupied {
            SeatStatus::Occupied
        } else if self.holder_of(leg, seat).is_some() {
            SeatStatus::Selected
        } else {
            SeatStatus::Available
        }
    }

    /// Whether every passenger has an outbound seat, and a return seat when
    /// `require_return` is set. A booking with zero passengers is never
    /// ready.
    pub fn all_seats_assigned(&self, require_return: bool) -> bool {
        !self.passengers.is_empty()
            && self.passengers.iter().all(|p| {
                p.outbound_seat.is_some() && (!require_return || p.return_seat.is_some())
            })
    }

    /// Immutable copy of all passengers for the summary UI and submission.
    /// Later mutation of the store cannot change an already-taken snapshot.
    pub fn snapshot(&self) -> BookingView {
        BookingView {
            passengers: self
                .passengers
                .iter()
                .map(|p| PassengerView {
                    profile: p.profile.clone(),
                    outbound_seat: p.outbound_seat,
                    return_seat: p.return_seat,
                })
                .collect(),
        }
    }
}
