use booking_core::{
    Leg, Legs, ProfileField, SeatAssignmentStore, SeatId, SeatOutcome, SeatStatus,
};
use logger::{Color, SessionLogger};
use provider::types::{BookingRequest, PassengerRecord, SeatMap, Ticket, TicketInfo};
use provider::{FlightId, Provider};

use crate::auth::Buyer;
use crate::errors::FlowError;

struct LegFlight {
    flight: FlightId,
    map: SeatMap,
}

/// One interactive booking session: the seat store plus the authoritative
/// seat-map snapshots fetched at session start.
///
/// Everything the store allows is additionally gated on the seat map here: a
/// seat the backend reported as taken is not selectable no matter what the
/// local state says. The occupancy snapshot is not refreshed mid-session;
/// the backend re-validates at submission and may still reject.
pub struct BookingSession {
    store: SeatAssignmentStore,
    outbound: LegFlight,
    return_leg: Option<LegFlight>,
    logger: Option<SessionLogger>,
}

impl BookingSession {
    /// Fetches seat availability for the given flights and opens a session
    /// with one empty passenger.
    pub fn start<P: Provider>(
        provider: &mut P,
        outbound: FlightId,
        return_flight: Option<FlightId>,
    ) -> Result<Self, FlowError> {
        let outbound_map = SeatMap::new(provider.seat_availability(outbound)?);

        let return_leg = match return_flight {
            Some(flight) => Some(LegFlight {
                flight,
                map: SeatMap::new(provider.seat_availability(flight)?),
            }),
            None => None,
        };

        let legs = if return_leg.is_some() {
            Legs::RoundTrip
        } else {
            Legs::OneWay
        };

        Ok(BookingSession {
            store: SeatAssignmentStore::new(legs),
            outbound: LegFlight {
                flight: outbound,
                map: outbound_map,
            },
            return_leg,
            logger: None,
        })
    }

    pub fn with_logger(mut self, logger: SessionLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn legs(&self) -> Legs {
        self.store.legs()
    }

    pub fn passenger_count(&self) -> usize {
        self.store.passenger_count()
    }

    pub fn flight_id(&self, leg: Leg) -> Option<FlightId> {
        self.leg_flight(leg).map(|lf| lf.flight)
    }

    /// The occupancy snapshot of one leg, for rendering.
    pub fn seat_map(&self, leg: Leg) -> Option<&SeatMap> {
        self.leg_flight(leg).map(|lf| &lf.map)
    }

    fn leg_flight(&self, leg: Leg) -> Option<&LegFlight> {
        match leg {
            Leg::Outbound => Some(&self.outbound),
            Leg::Return => self.return_leg.as_ref(),
        }
    }

    pub fn add_passenger(&mut self) -> usize {
        let index = self.store.add_passenger();
        self.log_info(&format!("Passenger {} added", index + 1), Color::Cyan);
        index
    }

    pub fn remove_passenger(&mut self, index: usize) -> Result<(), FlowError> {
        self.store.remove_passenger(index)?;
        self.log_info(&format!("Passenger {} removed", index + 1), Color::Cyan);
        Ok(())
    }

    pub fn update_profile(
        &mut self,
        index: usize,
        field: ProfileField,
        value: &str,
    ) -> Result<(), FlowError> {
        self.store.update_profile(index, field, value)?;
        Ok(())
    }

    /// Selects (or toggles off) a seat for a passenger, after checking the
    /// seat against the leg's authoritative map.
    pub fn select_seat(
        &mut self,
        index: usize,
        leg: Leg,
        seat: SeatId,
    ) -> Result<SeatOutcome, FlowError> {
        if let Some(lf) = self.leg_flight(leg) {
            if !lf.map.contains(seat) {
                return Err(FlowError::UnknownSeat(seat));
            }
            if lf.map.is_occupied(seat) {
                self.log_warn(&format!("Seat {} is occupied on the {} leg", seat, leg));
                return Err(FlowError::SeatOccupied(seat));
            }
        }
        // An inactive leg falls through so the store reports InvalidLeg.

        match self.store.select_seat(index, leg, seat) {
            Ok(SeatOutcome::Selected) => {
                self.log_info(
                    &format!(
                        "Seat {} assigned to passenger {} for the {} flight",
                        seat,
                        index + 1,
                        leg
                    ),
                    Color::Green,
                );
                Ok(SeatOutcome::Selected)
            }
            Ok(SeatOutcome::Deselected) => {
                self.log_info(
                    &format!("Seat {} removed from passenger {}", seat, index + 1),
                    Color::Yellow,
                );
                Ok(SeatOutcome::Deselected)
            }
            Err(err) => {
                self.log_warn(&err.to_string());
                Err(err.into())
            }
        }
    }

    pub fn deselect_seat(&mut self, index: usize, leg: Leg) -> Result<(), FlowError> {
        self.store.deselect_seat(index, leg)?;
        Ok(())
    }

    /// Display status of one seat, folding in the authoritative occupancy.
    pub fn seat_status(&self, leg: Leg, seat: SeatId) -> SeatStatus {
        let occupied = self
            .leg_flight(leg)
            .map(|lf| lf.map.is_occupied(seat))
            .unwrap_or(false);
        self.store.seat_status(leg, seat, occupied)
    }

    pub fn holder_of(&self, leg: Leg, seat: SeatId) -> Option<usize> {
        self.store.holder_of(leg, seat)
    }

    /// Whether the booking can advance to submission: every passenger seated
    /// on every active leg.
    pub fn ready(&self) -> bool {
        self.store.all_seats_assigned(self.return_leg.is_some())
    }

    pub fn snapshot(&self) -> booking_core::BookingView {
        self.store.snapshot()
    }

    /// Submits the booking under the buyer's identity and consumes the
    /// session: the in-memory booking is discarded whether the backend
    /// accepted it or not. Retrying means starting a fresh session, which
    /// also re-fetches the seat maps.
    pub fn submit<P: Provider>(self, provider: &mut P, buyer: &Buyer) -> Result<(), FlowError> {
        if !self.ready() {
            return Err(FlowError::NotReady);
        }

        let view = self.store.snapshot();
        for (index, passenger) in view.passengers.iter().enumerate() {
            required(index, "name", &passenger.profile.name)?;
            required(index, "last name", &passenger.profile.lastname)?;
            required(index, "email", &passenger.profile.email)?;
            required(index, "date of birth", &passenger.profile.date_birth)?;
            required(index, "phone number", &passenger.profile.phone_number)?;
            required(index, "passport number", &passenger.profile.passport_number)?;
        }

        let mut tickets = Vec::new();
        for passenger in &view.passengers {
            let record = PassengerRecord {
                name: passenger.profile.name.clone(),
                lastname: passenger.profile.lastname.clone(),
                email: passenger.profile.email.clone(),
                sex: passenger.profile.sex.as_str().to_string(),
                date_birth: passenger.profile.date_birth.clone(),
                phone_number: passenger.profile.phone_number.clone(),
                passport_number: passenger.profile.passport_number.clone(),
            };

            // ready() guarantees the holds are set for every active leg.
            if let Some(seat) = passenger.outbound_seat {
                tickets.push(Ticket {
                    passenger_info: record.clone(),
                    ticket_info: TicketInfo {
                        id_flight: self.outbound.flight,
                        id_seat: seat,
                        additional_baggage: vec![],
                    },
                });
            }
            if let (Some(return_leg), Some(seat)) = (&self.return_leg, passenger.return_seat) {
                tickets.push(Ticket {
                    passenger_info: record,
                    ticket_info: TicketInfo {
                        id_flight: return_leg.flight,
                        id_seat: seat,
                        additional_baggage: vec![],
                    },
                });
            }
        }

        let request = BookingRequest {
            id_buyer: buyer.id,
            tickets,
        };

        match provider.book(&request) {
            Ok(()) => {
                self.log_info(
                    &format!(
                        "Booking of {} ticket(s) accepted for buyer {}",
                        request.tickets.len(),
                        buyer.id
                    ),
                    Color::Green,
                );
                Ok(())
            }
            Err(err) => {
                self.log_error(&err.to_string());
                Err(err.into())
            }
        }
    }

    fn log_info(&self, message: &str, color: Color) {
        if let Some(log) = &self.logger {
            if let Err(e) = log.info(message, color, false) {
                eprintln!("Failed to write session log: {}", e);
            }
        }
    }

    fn log_warn(&self, message: &str) {
        if let Some(log) = &self.logger {
            if let Err(e) = log.warn(message, false) {
                eprintln!("Failed to write session log: {}", e);
            }
        }
    }

    fn log_error(&self, message: &str) {
        if let Some(log) = &self.logger {
            if let Err(e) = log.error(message, false) {
                eprintln!("Failed to write session log: {}", e);
            }
        }
    }
}

fn required(passenger: usize, field: &'static str, value: &str) -> Result<(), FlowError> {
    if value.trim().is_empty() {
        Err(FlowError::MissingField { passenger, field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::BookingSession;
    use crate::auth::{Buyer, Role};
    use crate::errors::FlowError;
    use booking_core::{Leg, Legs, ProfileField, SeatOutcome, SeatStatus};
    use provider::memory::InMemoryProvider;
    use provider::types::{Seat, SeatBlock};

    fn blocks_with_occupied(occupied_id: Option<u32>) -> Vec<SeatBlock> {
        vec![SeatBlock {
            id_cabin: 1,
            id_class: 1,
            occupied_seats: occupied_id.map(|_| 1).unwrap_or(0),
            seats: (0..6)
                .map(|i| Seat {
                    id_cell: i + 1,
                    x: i % 3,
                    y: i / 3,
                    occupied: Some(i + 1) == occupied_id,
                })
                .collect(),
        }]
    }

    fn demo_provider() -> InMemoryProvider {
        InMemoryProvider::new()
            .with_flight(100, blocks_with_occupied(Some(4)))
            .with_flight(200, blocks_with_occupied(None))
    }

    fn buyer() -> Buyer {
        Buyer {
            id: 1,
            role: Role::Customer,
        }
    }

    fn fill_profile(session: &mut BookingSession, index: usize) {
        session.update_profile(index, ProfileField::Name, "Ada").unwrap();
        session.update_profile(index, ProfileField::LastName, "Lovelace").unwrap();
        session.update_profile(index, ProfileField::Email, "ada@example.com").unwrap();
        session.update_profile(index, ProfileField::DateBirth, "1815-12-10").unwrap();
        session.update_profile(index, ProfileField::PhoneNumber, "+44123").unwrap();
        session.update_profile(index, ProfileField::PassportNumber, "AB1").unwrap();
    }

    #[test]
    fn one_way_session_has_single_leg() {
        let mut provider = demo_provider();
        let session = BookingSession::start(&mut provider, 100, None).unwrap();

        assert_eq!(session.legs(), Legs::OneWay);
        assert_eq!(session.passenger_count(), 1);
        assert!(session.seat_map(Leg::Return).is_none());
        assert_eq!(session.flight_id(Leg::Outbound), Some(100));
    }

    #[test]
    fn occupied_seat_cannot_be_selected() {
        let mut provider = demo_provider();
        let mut session = BookingSession::start(&mut provider, 100, None).unwrap();

        assert_eq!(session.seat_status(Leg::Outbound, 4), SeatStatus::Occupied);
        assert_eq!(
            session.select_seat(0, Leg::Outbound, 4),
            Err(FlowError::SeatOccupied(4))
        );
    }

    #[test]
    fn unknown_seat_is_rejected() {
        let mut provider = demo_provider();
        let mut session = BookingSession::start(&mut provider, 100, None).unwrap();
        assert_eq!(
            session.select_seat(0, Leg::Outbound, 999),
            Err(FlowError::UnknownSeat(999))
        );
    }

    #[test]
    fn round_trip_needs_both_seats_to_be_ready() {
        let mut provider = demo_provider();
        let mut session = BookingSession::start(&mut provider, 100, Some(200)).unwrap();

        session.select_seat(0, Leg::Outbound, 1).unwrap();
        assert!(!session.ready());

        session.select_seat(0, Leg::Return, 1).unwrap();
        assert!(session.ready());
    }

    #[test]
    fn submit_rejects_unseated_party() {
        let mut provider = demo_provider();
        let session = BookingSession::start(&mut provider, 100, None).unwrap();
        let result = session.submit(&mut provider, &buyer());
        assert_eq!(result, Err(FlowError::NotReady));
    }

    #[test]
    fn submit_rejects_incomplete_profile() {
        let mut provider = demo_provider();
        let mut session = BookingSession::start(&mut provider, 100, None).unwrap();
        session.select_seat(0, Leg::Outbound, 1).unwrap();

        let result = session.submit(&mut provider, &buyer());
        assert_eq!(
            result,
            Err(FlowError::MissingField {
                passenger: 0,
                field: "name"
            })
        );
    }

    #[test]
    fn submit_books_one_ticket_per_leg_per_passenger() {
        let mut provider = demo_provider();
        let mut session = BookingSession::start(&mut provider, 100, Some(200)).unwrap();

        session.add_passenger();
        for index in 0..2 {
            fill_profile(&mut session, index);
            session.select_seat(index, Leg::Outbound, index as u32 + 1).unwrap();
            session.select_seat(index, Leg::Return, index as u32 + 1).unwrap();
        }

        session.submit(&mut provider, &buyer()).unwrap();

        let accepted = provider.accepted();
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].tickets.len(), 4);
        assert_eq!(accepted[0].id_buyer, 1);

        let outbound_tickets = accepted[0]
            .tickets
            .iter()
            .filter(|t| t.ticket_info.id_flight == 100)
            .count();
        assert_eq!(outbound_tickets, 2);
    }

    #[test]
    fn toggling_twice_restores_availability() {
        let mut provider = demo_provider();
        let mut session = BookingSession::start(&mut provider, 100, None).unwrap();

        assert_eq!(
            session.select_seat(0, Leg::Outbound, 2).unwrap(),
            SeatOutcome::Selected
        );
        assert_eq!(session.seat_status(Leg::Outbound, 2), SeatStatus::Selected);
        assert_eq!(session.holder_of(Leg::Outbound, 2), Some(0));

        assert_eq!(
            session.select_seat(0, Leg::Outbound, 2).unwrap(),
            SeatOutcome::Deselected
        );
        assert_eq!(session.seat_status(Leg::Outbound, 2), SeatStatus::Available);
    }

    #[test]
    fn stale_session_is_rejected_by_the_backend() {
        let mut provider = demo_provider();

        // Two sessions fetch the same availability snapshot.
        let mut first = BookingSession::start(&mut provider, 100, None).unwrap();
        let mut second = BookingSession::start(&mut provider, 100, None).unwrap();

        first.select_seat(0, Leg::Outbound, 1).unwrap();
        fill_profile(&mut first, 0);
        first.submit(&mut provider, &buyer()).unwrap();

        // The second session still sees seat 1 free locally, but the
        // authoritative check at submission wins.
        assert_eq!(second.seat_status(Leg::Outbound, 1), SeatStatus::Available);
        second.select_seat(0, Leg::Outbound, 1).unwrap();
        fill_profile(&mut second, 0);
        let result = second.submit(&mut provider, &buyer());
        assert!(matches!(result, Err(FlowError::Provider(_))));
    }
}
