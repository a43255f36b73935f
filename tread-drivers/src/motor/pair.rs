//! Leader/follower motor pair
//!
//! Two motors geared to the same output shaft. Only the leader is commanded
//! and read; after every command the follower is set to the leader's output
//! fraction so both always push the same way.

use tread_core::config::MotorConfig;
use tread_core::traits::EncoderMotor;

/// Two motors driving one gearbox
pub struct MotorPair<L, F> {
    leader: L,
    follower: F,
}

impl<L: EncoderMotor, F: EncoderMotor> MotorPair<L, F> {
    pub fn new(leader: L, follower: F) -> Self {
        let mut pair = Self { leader, follower };
        pair.follow();
        pair
    }

    /// Copy the leader's current output onto the follower
    ///
    /// Call after the leader's own control step changes its output
    /// (e.g. a closed-loop update).
    pub fn follow(&mut self) {
        let output = self.leader.get_output_percent();
        self.follower.set_percent_output(output);
    }

    pub fn leader(&self) -> &L {
        &self.leader
    }

    pub fn leader_mut(&mut self) -> &mut L {
        &mut self.leader
    }

    pub fn follower(&self) -> &F {
        &self.follower
    }

    pub fn follower_mut(&mut self) -> &mut F {
        &mut self.follower
    }

    pub fn into_parts(self) -> (L, F) {
        (self.leader, self.follower)
    }
}

impl<L: EncoderMotor, F: EncoderMotor> EncoderMotor for MotorPair<L, F> {
    fn set_velocity(&mut self, velocity: f64) {
        self.leader.set_velocity(velocity);
        self.follow();
    }

    fn set_percent_output(&mut self, percent: f64) {
        self.leader.set_percent_output(percent);
        self.follow();
    }

    fn get_velocity(&self) -> f64 {
        self.leader.get_velocity()
    }

    fn get_distance(&self) -> f64 {
        self.leader.get_distance()
    }

    fn get_output_percent(&self) -> f64 {
        self.leader.get_output_percent()
    }

    fn set_inverted(&mut self, inverted: bool) {
        self.leader.set_inverted(inverted);
        self.follower.set_inverted(inverted);
        self.follow();
    }

    fn invert(&mut self) {
        self.leader.invert();
        self.follower.invert();
        self.follow();
    }

    fn reset_distance(&mut self) {
        self.leader.reset_distance();
        self.follower.reset_distance();
    }

    fn set_config(&mut self, config: &MotorConfig) {
        self.leader.set_config(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tread_core::mock::{MockMotor, MotorCommand};

    #[test]
    fn test_follower_mirrors_percent() {
        let mut pair = MotorPair::new(MockMotor::new(), MockMotor::new());

        pair.set_percent_output(0.4);
        assert_eq!(pair.leader().last_command(), Some(MotorCommand::Percent(0.4)));
        assert_eq!(pair.follower().last_command(), Some(MotorCommand::Percent(0.4)));
        assert_eq!(pair.get_output_percent(), 0.4);
    }

    #[test]
    fn test_follower_tracks_velocity_output() {
        let mut pair = MotorPair::new(
            MockMotor::with_free_speed(2.0),
            MockMotor::with_free_speed(2.0),
        );

        pair.set_velocity(1.0);
        assert_eq!(pair.leader().last_command(), Some(MotorCommand::Velocity(1.0)));
        let expected = pair.leader().get_output_percent();
        assert_eq!(
            pair.follower().last_command(),
            Some(MotorCommand::Percent(expected))
        );
    }

    #[test]
    fn test_readings_come_from_leader() {
        let mut pair = MotorPair::new(
            MockMotor::with_free_speed(1.0),
            MockMotor::with_free_speed(1.0),
        );
        pair.leader_mut().set_percent_output(0.5);
        pair.leader_mut().advance(2.0);

        assert_eq!(pair.get_velocity(), pair.leader().get_velocity());
        assert_eq!(pair.get_distance(), pair.leader().get_distance());
        assert!(pair.get_distance() > 0.0);
        assert_eq!(pair.follower().get_distance(), 0.0);
    }

    #[test]
    fn test_inversion_applies_to_both() {
        let mut pair = MotorPair::new(MockMotor::new(), MockMotor::new());

        pair.set_inverted(true);
        assert!(pair.leader().is_inverted());
        assert!(pair.follower().is_inverted());

        pair.invert();
        assert!(!pair.leader().is_inverted());
        assert!(!pair.follower().is_inverted());
    }

    #[test]
    fn test_reset_distance_applies_to_both() {
        let mut pair = MotorPair::new(
            MockMotor::with_free_speed(1.0),
            MockMotor::with_free_speed(1.0),
        );
        pair.set_percent_output(1.0);
        pair.leader_mut().advance(1.0);
        pair.follower_mut().advance(1.0);

        pair.reset_distance();
        assert_eq!(pair.leader().get_distance(), 0.0);
        assert_eq!(pair.follower().get_distance(), 0.0);
    }

    #[test]
    fn test_config_goes_to_leader() {
        let mut pair = MotorPair::new(MockMotor::new(), MockMotor::new());
        let config = MotorConfig::feed_forward(0.3, 0.01);

        pair.set_config(&config);
        assert_eq!(pair.leader().config(), Some(config));
        assert_eq!(pair.follower().config(), None);
    }
}
