use booking_core::{BookingError, Leg, ProfileField, SeatOutcome, SeatStatus};
use booking_flow::{BookingSession, Buyer, FlowError, Role};
use provider::memory::InMemoryProvider;
use provider::types::{Seat, SeatBlock};
use provider::FlightId;

const OUTBOUND: FlightId = 10;
const RETURN: FlightId = 20;

// A small two-cabin flight: seats 1..=4 in business, 5..=12 in economy,
// optionally with one seat already taken.
fn demo_blocks(taken: Option<u32>) -> Vec<SeatBlock> {
    let business = SeatBlock {
        id_cabin: 1,
        id_class: 1,
        occupied_seats: 0,
        seats: (0..4u32)
            .map(|i| Seat {
                id_cell: i + 1,
                x: i % 2,
                y: i / 2,
                occupied: false,
            })
            .collect(),
    };
    let economy = SeatBlock {
        id_cabin: 2,
        id_class: 2,
        occupied_seats: taken.map(|_| 1).unwrap_or(0),
        seats: (0..8u32)
            .map(|i| Seat {
                id_cell: i + 5,
                x: i % 4,
                y: i / 4,
                occupied: Some(i + 5) == taken,
            })
            .collect(),
    };
    vec![business, economy]
}

fn demo_provider() -> InMemoryProvider {
    InMemoryProvider::new()
        .with_flight(OUTBOUND, demo_blocks(Some(7)))
        .with_flight(RETURN, demo_blocks(None))
}

fn buyer() -> Buyer {
    Buyer {
        id: 99,
        role: Role::Customer,
    }
}

fn fill_profile(session: &mut BookingSession, index: usize, name: &str) {
    session.update_profile(index, ProfileField::Name, name).unwrap();
    session
        .update_profile(index, ProfileField::LastName, "Traveler")
        .unwrap();
    session
        .update_profile(index, ProfileField::Email, "traveler@example.com")
        .unwrap();
    session
        .update_profile(index, ProfileField::DateBirth, "1990-05-01")
        .unwrap();
    session
        .update_profile(index, ProfileField::PhoneNumber, "+5411000000")
        .unwrap();
    session
        .update_profile(index, ProfileField::PassportNumber, "AR55555")
        .unwrap();
}

#[test]
fn round_trip_booking_for_two_passengers() {
    let mut backend = demo_provider();
    let mut session = BookingSession::start(&mut backend, OUTBOUND, Some(RETURN)).unwrap();

    assert_eq!(session.add_passenger(), 1);

    fill_profile(&mut session, 0, "Ana");
    fill_profile(&mut session, 1, "Bruno");

    assert_eq!(
        session.select_seat(0, Leg::Outbound, 1).unwrap(),
        SeatOutcome::Selected
    );
    assert_eq!(
        session.select_seat(1, Leg::Outbound, 2).unwrap(),
        SeatOutcome::Selected
    );
    assert!(!session.ready());

    session.select_seat(0, Leg::Return, 5).unwrap();
    session.select_seat(1, Leg::Return, 6).unwrap();
    assert!(session.ready());

    session.submit(&mut backend, &buyer()).unwrap();

    let accepted = backend.accepted();
    assert_eq!(accepted.len(), 1);
    assert_eq!(accepted[0].id_buyer, 99);
    assert_eq!(accepted[0].tickets.len(), 4);

    // Booked seats are occupied for the next session.
    let mut next = BookingSession::start(&mut backend, OUTBOUND, None).unwrap();
    assert_eq!(next.seat_status(Leg::Outbound, 1), SeatStatus::Occupied);
    assert_eq!(next.seat_status(Leg::Outbound, 2), SeatStatus::Occupied);
    assert_eq!(
        next.select_seat(0, Leg::Outbound, 1),
        Err(FlowError::SeatOccupied(1))
    );
}

#[test]
fn collision_inside_the_party_is_surfaced_not_booked() {
    let mut backend = demo_provider();
    let mut session = BookingSession::start(&mut backend, OUTBOUND, None).unwrap();
    session.add_passenger();

    session.select_seat(0, Leg::Outbound, 3).unwrap();
    let result = session.select_seat(1, Leg::Outbound, 3);
    assert_eq!(
        result,
        Err(FlowError::Store(BookingError::AlreadyAssigned {
            seat: 3,
            holder: 0
        }))
    );

    // Nothing was submitted and the first passenger kept the seat.
    assert!(backend.accepted().is_empty());
    assert_eq!(session.holder_of(Leg::Outbound, 3), Some(0));
}

#[test]
fn removing_a_passenger_frees_their_seats_for_the_party() {
    let mut backend = demo_provider();
    let mut session = BookingSession::start(&mut backend, OUTBOUND, None).unwrap();
    session.add_passenger();

    session.select_seat(0, Leg::Outbound, 4).unwrap();
    session.remove_passenger(0).unwrap();

    assert_eq!(session.passenger_count(), 1);
    assert_eq!(session.seat_status(Leg::Outbound, 4), SeatStatus::Available);
    assert_eq!(
        session.select_seat(0, Leg::Outbound, 4).unwrap(),
        SeatOutcome::Selected
    );
}

#[test]
fn pre_occupied_seat_never_selectable_even_with_stale_intent() {
    let mut backend = demo_provider();
    let mut session = BookingSession::start(&mut backend, OUTBOUND, None).unwrap();

    assert_eq!(session.seat_status(Leg::Outbound, 7), SeatStatus::Occupied);
    assert_eq!(
        session.select_seat(0, Leg::Outbound, 7),
        Err(FlowError::SeatOccupied(7))
    );
    assert_eq!(session.holder_of(Leg::Outbound, 7), None);
}

#[test]
fn two_sessions_racing_for_one_seat_resolve_at_submission() {
    let mut backend = demo_provider();

    let mut winner = BookingSession::start(&mut backend, OUTBOUND, None).unwrap();
    let mut loser = BookingSession::start(&mut backend, OUTBOUND, None).unwrap();

    winner.select_seat(0, Leg::Outbound, 8).unwrap();
    fill_profile(&mut winner, 0, "First");
    winner.submit(&mut backend, &buyer()).unwrap();

    // The loser's snapshot is stale: the seat still looks free locally.
    assert_eq!(loser.seat_status(Leg::Outbound, 8), SeatStatus::Available);
    loser.select_seat(0, Leg::Outbound, 8).unwrap();
    fill_profile(&mut loser, 0, "Second");

    let result = loser.submit(&mut backend, &buyer());
    assert!(matches!(result, Err(FlowError::Provider(_))));
    assert_eq!(backend.accepted().len(), 1);
}

#[test]
fn one_way_booking_ignores_return_requirements() {
    let mut backend = demo_provider();
    let mut session = BookingSession::start(&mut backend, OUTBOUND, None).unwrap();

    assert_eq!(
        session.select_seat(0, Leg::Return, 5),
        Err(FlowError::Store(BookingError::InvalidLeg(Leg::Return)))
    );

    session.select_seat(0, Leg::Outbound, 5).unwrap();
    fill_profile(&mut session, 0, "Solo");
    assert!(session.ready());

    session.submit(&mut backend, &buyer()).unwrap();
    assert_eq!(backend.accepted()[0].tickets.len(), 1);
    assert_eq!(
        backend.accepted()[0].tickets[0].ticket_info.id_flight,
        OUTBOUND
    );
}
