//! GPIO double solenoid
//!
//! One output pin per coil. Moving the valve releases the opposite coil
//! before energizing the requested one, so both coils are never driven at
//! once.

use embedded_hal::digital::OutputPin;

use tread_core::traits::{Solenoid, SolenoidPosition};

/// Double-acting solenoid on two GPIO pins
pub struct GpioSolenoid<F, R> {
    forward: F,
    reverse: R,
    position: SolenoidPosition,
    fault: bool,
}

impl<F: OutputPin, R: OutputPin> GpioSolenoid<F, R> {
    /// Create a solenoid driver with both coils released
    pub fn new(forward: F, reverse: R) -> Self {
        let mut solenoid = Self {
            forward,
            reverse,
            position: SolenoidPosition::Off,
            fault: false,
        };
        solenoid.set(SolenoidPosition::Off);
        solenoid
    }

    /// True once any pin write has failed
    pub fn fault(&self) -> bool {
        self.fault
    }

    pub fn clear_fault(&mut self) {
        self.fault = false;
    }

    /// Release the pins
    pub fn release(self) -> (F, R) {
        (self.forward, self.reverse)
    }

    fn check<E>(&mut self, result: Result<(), E>) {
        if result.is_err() && !self.fault {
            #[cfg(feature = "defmt")]
            defmt::warn!("solenoid pin write failed");
            self.fault = true;
        }
    }
}

impl<F: OutputPin, R: OutputPin> Solenoid for GpioSolenoid<F, R> {
    fn set(&mut self, position: SolenoidPosition) {
        match position {
            SolenoidPosition::Off => {
                let result = self.forward.set_low();
                self.check(result);
                let result = self.reverse.set_low();
                self.check(result);
            }
            SolenoidPosition::Forward => {
                let result = self.reverse.set_low();
                self.check(result);
                let result = self.forward.set_high();
                self.check(result);
            }
            SolenoidPosition::Reverse => {
                let result = self.forward.set_low();
                self.check(result);
                let result = self.reverse.set_high();
                self.check(result);
            }
        }
        self.position = position;
    }

    fn get(&self) -> SolenoidPosition {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    struct MockPin {
        high: bool,
        fail: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: true,
                fail: false,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.fail {
                return Err(ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }
    }

    #[test]
    fn test_starts_released() {
        let solenoid = GpioSolenoid::new(MockPin::new(), MockPin::new());
        assert_eq!(solenoid.get(), SolenoidPosition::Off);
        assert!(!solenoid.forward.high);
        assert!(!solenoid.reverse.high);
        assert!(!solenoid.fault());
    }

    #[test]
    fn test_only_one_coil_driven() {
        let mut solenoid = GpioSolenoid::new(MockPin::new(), MockPin::new());

        solenoid.set(SolenoidPosition::Forward);
        assert!(solenoid.forward.high);
        assert!(!solenoid.reverse.high);

        solenoid.set(SolenoidPosition::Reverse);
        assert!(!solenoid.forward.high);
        assert!(solenoid.reverse.high);
        assert_eq!(solenoid.get(), SolenoidPosition::Reverse);

        solenoid.set(SolenoidPosition::Off);
        assert!(!solenoid.forward.high);
        assert!(!solenoid.reverse.high);
    }

    #[test]
    fn test_pin_fault_latched() {
        let mut solenoid = GpioSolenoid::new(MockPin::new(), MockPin::new());
        solenoid.reverse.fail = true;

        solenoid.set(SolenoidPosition::Forward);
        assert!(solenoid.fault());
        // The healthy coil is still driven
        assert!(solenoid.forward.high);

        solenoid.reverse.fail = false;
        solenoid.set(SolenoidPosition::Off);
        assert!(solenoid.fault());

        solenoid.clear_fault();
        assert!(!solenoid.fault());
    }

    #[test]
    fn test_drives_intake() {
        use tread_core::mechanism::{Intake, IntakeConfig};
        use tread_core::mock::{MockInput, MockMotor};
        use tread_core::traits::Button;

        let solenoid = GpioSolenoid::new(MockPin::new(), MockPin::new());
        let mut intake = Intake::new(MockMotor::new(), solenoid, IntakeConfig::default());

        intake.control(&MockInput::new().with_press(Button::Y));
        assert!(intake.is_deployed());
        assert!(intake.solenoid().forward.high);
    }
}
