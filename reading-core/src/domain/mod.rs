pub mod reading;

pub use reading::MeterReading;
