pub mod booking;

pub mod seat;

pub use booking::{BookingRequest, PassengerRecord, Ticket, TicketInfo};
pub use seat::{Seat, SeatBlock, SeatMap};
