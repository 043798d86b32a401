use booking_core::SeatId;
use serde::{Deserialize, Serialize};

use crate::FlightId;

/// Passenger data as the booking endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerRecord {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub sex: String,
    pub date_birth: String,
    pub phone_number: String,
    pub passport_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInfo {
    pub id_flight: FlightId,
    pub id_seat: SeatId,
    pub additional_baggage: Vec<String>,
}

/// One seat on one flight for one passenger. A round-trip passenger produces
/// two tickets, one per leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub passenger_info: PassengerRecord,
    pub ticket_info: TicketInfo,
}

/// The submission payload of the booking endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub id_buyer: u32,
    pub tickets: Vec<Ticket>,
}
