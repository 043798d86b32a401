use std::io::{self, Write};
use std::path::Path;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use booking_core::{Leg, ProfileField, SeatStatus};
use booking_flow::{Buyer, BookingSession, FlowError};
use logger::SessionLogger;
use provider::memory::InMemoryProvider;
use provider::types::{Seat, SeatBlock};
use provider::FlightId;
use rand::Rng;

const OUTBOUND_FLIGHT: FlightId = 1042;
const RETURN_FLIGHT: FlightId = 2042;
const LOG_DIR: &str = "logs";

fn clean_scr() {
    print!("\x1B[2J\x1B[1;1H");
    io::stdout().flush().unwrap();
}

fn prompt_input(prompt: &str) -> String {
    print!("{}", prompt);
    io::stdout().flush().unwrap();
    let mut input = String::new();
    io::stdin().read_line(&mut input).unwrap();
    input.trim().to_string()
}

/// Builds the unsigned demo token the session is submitted under. A real
/// deployment gets this from the login cookie.
fn demo_token(buyer_id: u32) -> String {
    let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
    let payload = URL_SAFE_NO_PAD.encode(format!(
        r#"{{"sub": {}, "role": "Customer"}}"#,
        buyer_id
    ));
    format!("{}.{}.", header, payload)
}

/// Generates a two-cabin seat map with some seats randomly taken.
fn generate_blocks(base_id: u32) -> Vec<SeatBlock> {
    let mut rng = rand::thread_rng();
    let mut blocks = Vec::new();
    let mut next_id = base_id;

    for (cabin, class, rows) in [(1u32, 1u32, 2u32), (2, 2, 4)] {
        let mut seats = Vec::new();
        let mut occupied_seats = 0;
        for y in 0..rows {
            for x in 0..4u32 {
                let occupied = rng.gen_bool(0.25);
                if occupied {
                    occupied_seats += 1;
                }
                seats.push(Seat {
                    id_cell: next_id,
                    x,
                    y,
                    occupied,
                });
                next_id += 1;
            }
        }
        blocks.push(SeatBlock {
            id_cabin: cabin,
            id_class: class,
            occupied_seats,
            seats,
        });
    }

    blocks
}

fn seat_label(seat: &Seat) -> String {
    let letter = (b'A' + seat.x as u8) as char;
    format!("{}{}", letter, seat.y + 1)
}

fn print_seat_map(session: &BookingSession, leg: Leg) {
    let map = match session.seat_map(leg) {
        Some(map) => map,
        None => return,
    };

    println!("--- {} flight {} ---", leg, session.flight_id(leg).unwrap());
    for block in map.blocks() {
        println!("Cabin {} (class {}):", block.id_cabin, block.id_class);
        let max_row = block.seats.iter().map(|s| s.y).max().unwrap_or(0);
        for row in 0..=max_row {
            print!("  ");
            for seat in block.seats.iter().filter(|s| s.y == row) {
                let cell = match session.seat_status(leg, seat.id_cell) {
                    SeatStatus::Occupied => " X ".to_string(),
                    SeatStatus::Selected => {
                        let holder = session.holder_of(leg, seat.id_cell).unwrap_or(0);
                        format!("[{}]", holder + 1)
                    }
                    SeatStatus::Available => {
                        format!("{:>3}", format!("{}:{}", seat.id_cell, seat_label(seat)))
                    }
                };
                print!("{} ", cell);
            }
            println!();
        }
    }
    println!("X = occupied, [n] = held by passenger n, id:label = available");
}

fn parse_leg(input: &str) -> Option<Leg> {
    match input.to_lowercase().as_str() {
        "o" | "outbound" => Some(Leg::Outbound),
        "r" | "return" => Some(Leg::Return),
        _ => None,
    }
}

fn parse_field(input: &str) -> Option<ProfileField> {
    match input.to_lowercase().as_str() {
        "name" => Some(ProfileField::Name),
        "lastname" => Some(ProfileField::LastName),
        "email" => Some(ProfileField::Email),
        "sex" => Some(ProfileField::Sex),
        "birth" => Some(ProfileField::DateBirth),
        "phone" => Some(ProfileField::PhoneNumber),
        "passport" => Some(ProfileField::PassportNumber),
        _ => None,
    }
}

fn select_seat(session: &mut BookingSession) {
    let passenger: usize = match prompt_input("Passenger number: ").parse::<usize>() {
        Ok(n) if n > 0 => n - 1,
        _ => {
            eprintln!("Invalid passenger number");
            return;
        }
    };
    let leg = match parse_leg(&prompt_input("Leg (o/r): ")) {
        Some(leg) => leg,
        None => {
            eprintln!("Invalid leg");
            return;
        }
    };
    let seat = match prompt_input("Seat id: ").parse() {
        Ok(seat) => seat,
        Err(_) => {
            eprintln!("Invalid seat id");
            return;
        }
    };

    match session.select_seat(passenger, leg, seat) {
        Ok(outcome) => println!("{:?}", outcome),
        Err(err) => eprintln!("{}", err),
    }
}

fn edit_profile(session: &mut BookingSession) {
    let passenger: usize = match prompt_input("Passenger number: ").parse::<usize>() {
        Ok(n) if n > 0 => n - 1,
        _ => {
            eprintln!("Invalid passenger number");
            return;
        }
    };
    let field = match parse_field(&prompt_input(
        "Field (name/lastname/email/sex/birth/phone/passport): ",
    )) {
        Some(field) => field,
        None => {
            eprintln!("Unknown field");
            return;
        }
    };
    let value = prompt_input("Value: ");

    if let Err(err) = session.update_profile(passenger, field, &value) {
        eprintln!("{}", err);
    }
}

fn print_status(session: &BookingSession) {
    let view = session.snapshot();
    for (index, passenger) in view.passengers.iter().enumerate() {
        let name = if passenger.profile.name.is_empty() {
            "(no name)".to_string()
        } else {
            format!("{} {}", passenger.profile.name, passenger.profile.lastname)
        };
        println!(
            "Passenger {}: {} | outbound seat: {} | return seat: {}",
            index + 1,
            name,
            passenger
                .outbound_seat
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
            passenger
                .return_seat
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    println!(
        "Ready to book: {}",
        if session.ready() { "yes" } else { "no" }
    );
}

fn print_help() {
    println!("Commands:");
    println!("  seats    - show the seat maps");
    println!("  select   - select or toggle a seat for a passenger");
    println!("  add      - add a passenger");
    println!("  remove   - remove a passenger");
    println!("  edit     - edit a passenger profile field");
    println!("  status   - show passengers and readiness");
    println!("  book     - submit the booking");
    println!("  exit     - leave without booking");
}

fn main() {
    let round_trip = prompt_input("Round trip? (y/n): ").to_lowercase() == "y";

    let mut backend = InMemoryProvider::new().with_flight(OUTBOUND_FLIGHT, generate_blocks(1));
    let return_flight = if round_trip {
        backend.add_flight(RETURN_FLIGHT, generate_blocks(101));
        Some(RETURN_FLIGHT)
    } else {
        None
    };

    let mut session = match BookingSession::start(&mut backend, OUTBOUND_FLIGHT, return_flight) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("Could not start the booking session: {}", err);
            return;
        }
    };

    match SessionLogger::new(Path::new(LOG_DIR), &OUTBOUND_FLIGHT.to_string()) {
        Ok(log) => session = session.with_logger(log),
        Err(err) => eprintln!("Session log disabled: {}", err),
    }

    clean_scr();
    print_help();

    loop {
        let command = prompt_input("> ");
        match command.as_str() {
            "seats" => {
                print_seat_map(&session, Leg::Outbound);
                print_seat_map(&session, Leg::Return);
            }
            "select" => select_seat(&mut session),
            "add" => {
                let index = session.add_passenger();
                println!("Passenger {} added", index + 1);
            }
            "remove" => {
                match prompt_input("Passenger number: ").parse::<usize>() {
                    Ok(n) if n > 0 => {
                        if let Err(err) = session.remove_passenger(n - 1) {
                            eprintln!("{}", err);
                        }
                    }
                    _ => eprintln!("Invalid passenger number"),
                };
            }
            "edit" => edit_profile(&mut session),
            "status" => print_status(&session),
            "book" => {
                // Same gate the submit button has: don't even try until
                // every passenger is seated.
                if !session.ready() {
                    eprintln!("{}", FlowError::NotReady);
                    continue;
                }
                let buyer = match Buyer::from_token(&demo_token(1)) {
                    Ok(buyer) => buyer,
                    Err(err) => {
                        eprintln!("{}", err);
                        continue;
                    }
                };
                match session.submit(&mut backend, &buyer) {
                    Ok(()) => {
                        println!("Booking successful!");
                        return;
                    }
                    Err(err) => {
                        // The session was consumed either way; a retry means
                        // a fresh session with a fresh availability snapshot.
                        eprintln!("Failed to complete booking: {}", err);
                        return;
                    }
                }
            }
            "help" | "-h" | "--help" => print_help(),
            "exit" => return,
            "" => {}
            other => eprintln!("Unknown command '{}', type 'help' for options", other),
        }
    }
}
