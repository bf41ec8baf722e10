pub mod booking;
pub mod envelope;
