use std::fmt;

/// One directional flight within a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Leg {
    Outbound,
    Return,
}

impl fmt::Display for Leg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Leg::Outbound => write!(f, "outbound"),
            Leg::Return => write!(f, "return"),
        }
    }
}

/// The set of active legs of a booking. Fixed for the lifetime of the
/// booking: a one-way booking never gains a return leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Legs {
    OneWay,
    RoundTrip,
}

impl Legs {
    pub fn contains(&self, leg: Leg) -> bool {
        match leg {
            Leg::Outbound => true,
            Leg::Return => *self == Legs::RoundTrip,
        }
    }

    pub fn has_return(&self) -> bool {
        *self == Legs::RoundTrip
    }
}
