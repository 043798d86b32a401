use booking_core::SeatId;
use serde::{Deserialize, Serialize};

/// One physical seat as the backend reports it. Field names follow the
/// seat-availability endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id_cell: SeatId,
    /// Column within the cabin, 0-based. Column 0 renders as "A".
    pub x: u32,
    /// Row within the cabin, 0-based.
    pub y: u32,
    pub occupied: bool,
}

/// One cabin section of a flight with its seats and class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatBlock {
    pub id_cabin: u32,
    pub id_class: u32,
    pub occupied_seats: u32,
    pub seats: Vec<Seat>,
}

/// Immutable occupancy snapshot of one flight, built from the fetched seat
/// blocks. Answers the "is this seat taken" question for the whole
/// seat-selection session; it is never refreshed mid-session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatMap {
    blocks: Vec<SeatBlock>,
}

impl SeatMap {
    pub fn new(mut blocks: Vec<SeatBlock>) -> Self {
        // Render order: rows top to bottom, seats left to right.
        for block in &mut blocks {
            block.seats.sort_by_key(|seat| (seat.y, seat.x));
        }
        SeatMap { blocks }
    }

    pub fn blocks(&self) -> &[SeatBlock] {
        &self.blocks
    }

    pub fn contains(&self, seat: SeatId) -> bool {
        self.seats().any(|s| s.id_cell == seat)
    }

    /// Whether the backend reported the seat as taken. Unknown seats count
    /// as not occupied; callers reject them separately.
    pub fn is_occupied(&self, seat: SeatId) -> bool {
        self.seats().any(|s| s.id_cell == seat && s.occupied)
    }

    pub fn seats(&self) -> impl Iterator<Item = &Seat> {
        self.blocks.iter().flat_map(|block| block.seats.iter())
    }

    pub fn seat_count(&self) -> usize {
        self.blocks.iter().map(|block| block.seats.len()).sum()
    }
}
