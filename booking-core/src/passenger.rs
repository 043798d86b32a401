use std::fmt;

use crate::leg::Leg;

/// Identifier of a physical seat within one flight's seat map. Two different
/// flights have independent seat id spaces, so a `SeatId` is only meaningful
/// paired with a [`Leg`].
pub type SeatId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// The single-letter value the backend expects.
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
        }
    }

    pub fn from_str(value: &str) -> Option<Sex> {
        match value {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            _ => None,
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Personal data of one traveler. Opaque to the seat store: fields are never
/// validated or interpreted here, only carried through to submission.
#[derive(Debug, Clone, PartialEq)]
pub struct PassengerProfile {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub sex: Sex,
    pub date_birth: String,
    pub phone_number: String,
    pub passport_number: String,
}

impl Default for PassengerProfile {
    fn default() -> Self {
        PassengerProfile {
            name: String::new(),
            lastname: String::new(),
            email: String::new(),
            sex: Sex::Male,
            date_birth: String::new(),
            phone_number: String::new(),
            passport_number: String::new(),
        }
    }
}

/// Selects one field of a [`PassengerProfile`] for an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    LastName,
    Email,
    Sex,
    DateBirth,
    PhoneNumber,
    PassportNumber,
}

impl PassengerProfile {
    /// Overwrites a single field with the raw value coming from the form
    /// layer. An unrecognized sex value leaves the current one in place.
    pub fn set(&mut self, field: ProfileField, value: &str) {
        match field {
            ProfileField::Name => self.name = value.to_string(),
            ProfileField::LastName => self.lastname = value.to_string(),
            ProfileField::Email => self.email = value.to_string(),
            ProfileField::Sex => {
                if let Some(sex) = Sex::from_str(value) {
                    self.sex = sex;
                }
            }
            ProfileField::DateBirth => self.date_birth = value.to_string(),
            ProfileField::PhoneNumber => self.phone_number = value.to_string(),
            ProfileField::PassportNumber => self.passport_number = value.to_string(),
        }
    }
}

/// One traveler in the booking party: a profile plus at most one held seat
/// per leg.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Passenger {
    pub profile: PassengerProfile,
    pub outbound_seat: Option<SeatId>,
    pub return_seat: Option<SeatId>,
}

impl Passenger {
    pub fn seat(&self, leg: Leg) -> Option<SeatId> {
        match leg {
            Leg::Outbound => self.outbound_seat,
            Leg::Return => self.return_seat,
        }
    }

    pub fn set_seat(&mut self, leg: Leg, seat: Option<SeatId>) {
        match leg {
            Leg::Outbound => self.outbound_seat = seat,
            Leg::Return => self.return_seat = seat,
        }
    }
}
