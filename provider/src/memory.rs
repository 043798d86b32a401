use std::collections::HashMap;

use crate::errors::ProviderError;
use crate::types::{BookingRequest, SeatBlock};
use crate::{FlightId, Provider};

/// Reference [`Provider`] backed by in-memory seat inventory.
///
/// Behaves like the real backend at the contract level: availability is
/// served per flight, and `book` performs the authoritative check, rejecting
/// any ticket whose seat is unknown or already taken and marking booked
/// seats occupied for later fetches. Used by the integration tests and the
/// console demo.
pub struct InMemoryProvider {
    flights: HashMap<FlightId, Vec<SeatBlock>>,
    accepted: Vec<BookingRequest>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        InMemoryProvider {
            flights: HashMap::new(),
            accepted: Vec::new(),
        }
    }

    pub fn with_flight(mut self, flight: FlightId, blocks: Vec<SeatBlock>) -> Self {
        self.add_flight(flight, blocks);
        self
    }

    pub fn add_flight(&mut self, flight: FlightId, blocks: Vec<SeatBlock>) {
        self.flights.insert(flight, blocks);
    }

    /// Requests accepted so far, oldest first.
    pub fn accepted(&self) -> &[BookingRequest] {
        &self.accepted
    }

    fn seat_is_free(blocks: &[SeatBlock], seat: u32) -> Result<(), ProviderError> {
        for block in blocks {
            if let Some(found) = block.seats.iter().find(|s| s.id_cell == seat) {
                if found.occupied {
                    return Err(ProviderError::Rejected(format!(
                        "Seat {} is no longer available",
                        seat
                    )));
                }
                return Ok(());
            }
        }
        Err(ProviderError::Rejected(format!(
            "Seat {} does not exist on this flight",
            seat
        )))
    }

    fn occupy(blocks: &mut [SeatBlock], seat: u32) {
        for block in blocks {
            if let Some(found) = block.seats.iter_mut().find(|s| s.id_cell == seat) {
                found.occupied = true;
                block.occupied_seats += 1;
                return;
            }
        }
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl Provider for InMemoryProvider {
    fn seat_availability(&mut self, flight: FlightId) -> Result<Vec<SeatBlock>, ProviderError> {
        self.flights
            .get(&flight)
            .cloned()
            .ok_or_else(|| ProviderError::Rejected(format!("Unknown flight {}", flight)))
    }

    fn book(&mut self, request: &BookingRequest) -> Result<(), ProviderError> {
        if request.tickets.is_empty() {
            return Err(ProviderError::Rejected(
                "A booking needs at least one ticket".to_string(),
            ));
        }

        // Validate everything before touching inventory so a rejected
        // booking leaves no seat half-taken.
        let mut claimed: Vec<(FlightId, u32)> = Vec::new();
        for ticket in &request.tickets {
            let info = &ticket.ticket_info;
            let blocks = self.flights.get(&info.id_flight).ok_or_else(|| {
                ProviderError::Rejected(format!("Unknown flight {}", info.id_flight))
            })?;
            Self::seat_is_free(blocks, info.id_seat)?;
            if claimed.contains(&(info.id_flight, info.id_seat)) {
                return Err(ProviderError::Rejected(format!(
                    "Seat {} requested twice in one booking",
                    info.id_seat
                )));
            }
            claimed.push((info.id_flight, info.id_seat));
        }

        for (flight, seat) in claimed {
            if let Some(blocks) = self.flights.get_mut(&flight) {
                Self::occupy(blocks, seat);
            }
        }
        self.accepted.push(request.clone());
        Ok(())
    }
}
