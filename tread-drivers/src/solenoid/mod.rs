//! Solenoid valve drivers

pub mod gpio;

pub use gpio::GpioSolenoid;
