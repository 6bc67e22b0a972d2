pub mod assembler;

pub use assembler::{generate_booking_id, BookingAssembler, BOOKING_ID_PREFIX};
