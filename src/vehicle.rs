// Fuzzy throttle and steering composition for path-following vehicles
// Copyright © 2026 The fuzzy_drive authors
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation
// the rights to use, copy, modify, merge, publish, distribute, sublicense,
// and/or sell copies of the Software, and to permit persons to whom the
// Software is furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included
// in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES
// OF MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT.
// IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM,
// DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT,
// TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE
// OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use alloc::vec;
use alloc::vec::Vec;

use num_traits::Float;

use crate::fuzz::{
    Anchor, FuzzyLabel, FuzzyRule, FuzzyRuleSet, FuzzySet, FuzzyValueSet, MembershipFunction,
    RuleAtom,
};

/// Casts an `f64` constant into the scalar type. Infallible for real float
/// types.
fn cast<T: Float>(value: f64) -> T {
    T::from(value).expect("constant not representable in scalar type")
}

/// How fast the vehicle is going, over `[0, top_speed]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleSpeed {
    /// Below roughly a quarter of top speed.
    Slow,
    /// The mid band.
    Medium,
    /// Approaching top speed.
    Fast,
}

/// Where the vehicle sits across the lane, over the normalized lateral
/// offset (positive to the right of the path).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanePosition {
    /// Left of the path centerline.
    Left,
    /// On or near the centerline.
    Centered,
    /// Right of the path centerline.
    Right,
}

/// Which way the vehicle's heading deviates from the path direction, over
/// the heading error in degrees (positive veering right).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TravelDirection {
    /// Heading points left of the path direction.
    VeeringLeft,
    /// Heading roughly follows the path.
    OnCourse,
    /// Heading points right of the path direction.
    VeeringRight,
}

/// Output variable of the throttle rule set, over
/// `[-top_speed, top_speed]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredSpeed {
    /// Shed speed hard; representative value `-top_speed`.
    Brake,
    /// Hold speed; representative value zero.
    Cruise,
    /// Gain speed; representative value `top_speed`.
    Accelerate,
}

/// Output variable of the steering rule set, over `[-1, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesiredTurn {
    /// Turn left; representative value -1.
    Left,
    /// Keep straight; representative value 0.
    Straight,
    /// Turn right; representative value +1.
    Right,
}

impl FuzzyLabel for VehicleSpeed {
    const CARDINALITY: usize = 3;

    fn index(self) -> usize {
        match self {
            VehicleSpeed::Slow => 0,
            VehicleSpeed::Medium => 1,
            VehicleSpeed::Fast => 2,
        }
    }
}

impl FuzzyLabel for LanePosition {
    const CARDINALITY: usize = 3;

    fn index(self) -> usize {
        match self {
            LanePosition::Left => 0,
            LanePosition::Centered => 1,
            LanePosition::Right => 2,
        }
    }
}

impl FuzzyLabel for TravelDirection {
    const CARDINALITY: usize = 3;

    fn index(self) -> usize {
        match self {
            TravelDirection::VeeringLeft => 0,
            TravelDirection::OnCourse => 1,
            TravelDirection::VeeringRight => 2,
        }
    }
}

impl FuzzyLabel for DesiredSpeed {
    const CARDINALITY: usize = 3;

    fn index(self) -> usize {
        match self {
            DesiredSpeed::Brake => 0,
            DesiredSpeed::Cruise => 1,
            DesiredSpeed::Accelerate => 2,
        }
    }
}

impl FuzzyLabel for DesiredTurn {
    const CARDINALITY: usize = 3;

    fn index(self) -> usize {
        match self {
            DesiredTurn::Left => 0,
            DesiredTurn::Straight => 1,
            DesiredTurn::Right => 2,
        }
    }
}

/// The union of all input variables, so one value set carries the degrees of
/// a whole inference pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleInput {
    /// A [`VehicleSpeed`] label.
    Speed(VehicleSpeed),
    /// A [`LanePosition`] label.
    Position(LanePosition),
    /// A [`TravelDirection`] label.
    Direction(TravelDirection),
}

impl FuzzyLabel for VehicleInput {
    const CARDINALITY: usize =
        VehicleSpeed::CARDINALITY + LanePosition::CARDINALITY + TravelDirection::CARDINALITY;

    fn index(self) -> usize {
        match self {
            VehicleInput::Speed(label) => label.index(),
            VehicleInput::Position(label) => VehicleSpeed::CARDINALITY + label.index(),
            VehicleInput::Direction(label) => {
                VehicleSpeed::CARDINALITY + LanePosition::CARDINALITY + label.index()
            }
        }
    }
}

impl From<VehicleSpeed> for VehicleInput {
    fn from(label: VehicleSpeed) -> Self {
        VehicleInput::Speed(label)
    }
}

impl From<LanePosition> for VehicleInput {
    fn from(label: LanePosition) -> Self {
        VehicleInput::Position(label)
    }
}

impl From<TravelDirection> for VehicleInput {
    fn from(label: TravelDirection) -> Self {
        VehicleInput::Direction(label)
    }
}

/// Errors raised when building a [`DriveConfig`] from invalid parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum DriveConfigError {
    /// The top speed must be positive and finite.
    #[cfg_attr(feature = "std", error("top speed must be positive and finite"))]
    InvalidTopSpeed,

    /// The lane half-width must be positive and finite.
    #[cfg_attr(feature = "std", error("lane half-width must be positive and finite"))]
    InvalidLaneHalfWidth,

    /// The heading window must be positive and finite.
    #[cfg_attr(feature = "std", error("heading window must be positive and finite"))]
    InvalidHeadingWindow,
}

/// Validated parameters of a [`FuzzyDriver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveConfig<T> {
    /// Upper bound of the speed domain; also scales the desired-speed
    /// centroid down to a throttle command.
    /// Defaults to 80.
    top_speed: T,

    /// Lateral distance from the path centerline that counts as fully off
    /// to one side; raw offsets are normalized by this before evaluation.
    /// Defaults to 5.
    lane_half_width: T,

    /// Heading error, in degrees, that counts as fully veering off course.
    /// Defaults to 45.
    heading_window: T,
}

impl<T: Float> Default for DriveConfig<T> {
    fn default() -> Self {
        DriveConfig {
            top_speed: cast(80.0),
            lane_half_width: cast(5.0),
            heading_window: cast(45.0),
        }
    }
}

impl<T: Float> DriveConfig<T> {
    /// Returns the top speed.
    pub fn top_speed(&self) -> T {
        self.top_speed
    }

    /// Returns the lane half-width.
    pub fn lane_half_width(&self) -> T {
        self.lane_half_width
    }

    /// Returns the heading window in degrees.
    pub fn heading_window(&self) -> T {
        self.heading_window
    }
}

/// Builder for [`DriveConfig`], validating all parameters on `build`.
#[derive(Debug, Clone, Copy)]
pub struct DriveConfigBuilder<T> {
    config: DriveConfig<T>,
}

impl<T: Float> Default for DriveConfigBuilder<T> {
    fn default() -> Self {
        DriveConfigBuilder {
            config: DriveConfig::default(),
        }
    }
}

impl<T: Float> DriveConfigBuilder<T> {
    /// Sets the top speed.
    pub fn top_speed(mut self, top_speed: T) -> Self {
        self.config.top_speed = top_speed;
        self
    }

    /// Sets the lane half-width.
    pub fn lane_half_width(mut self, lane_half_width: T) -> Self {
        self.config.lane_half_width = lane_half_width;
        self
    }

    /// Sets the heading window in degrees.
    pub fn heading_window(mut self, heading_window: T) -> Self {
        self.config.heading_window = heading_window;
        self
    }

    /// Validates the parameters and produces the config.
    ///
    /// # Errors
    /// Fails if any parameter is non-positive or non-finite.
    pub fn build(self) -> Result<DriveConfig<T>, DriveConfigError> {
        let config = self.config;
        if !(config.top_speed.is_finite() && config.top_speed > T::zero()) {
            return Err(DriveConfigError::InvalidTopSpeed);
        }
        if !(config.lane_half_width.is_finite() && config.lane_half_width > T::zero()) {
            return Err(DriveConfigError::InvalidLaneHalfWidth);
        }
        if !(config.heading_window.is_finite() && config.heading_window > T::zero()) {
            return Err(DriveConfigError::InvalidHeadingWindow);
        }
        Ok(config)
    }
}

/// One tick's worth of raw sensor values, in world coordinates.
///
/// The sensor-model contract:
/// - `path_direction` is the reference path's tangent at `path_point`, the
///   closest point on the path to the vehicle.
/// - The lateral offset derived from these is positive when the vehicle is
///   to the RIGHT of the path direction, and is normalized by the configured
///   lane half-width before evaluation.
/// - The heading error is the signed angle in degrees from `path_direction`
///   to `heading`, positive when the vehicle is veering RIGHT of course.
///
/// Direction vectors need not be unit length; they are normalized
/// internally. Degenerate (near-zero) vectors yield a neutral command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathReading<T> {
    /// Vehicle position.
    pub position: [T; 2],
    /// Vehicle forward direction.
    pub heading: [T; 2],
    /// Forward speed, nonnegative.
    pub speed: T,
    /// Closest point on the reference path.
    pub path_point: [T; 2],
    /// Path tangent direction at `path_point`.
    pub path_direction: [T; 2],
}

/// A crisp control command handed back to the host vehicle code.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveCommand<T> {
    /// Throttle in `[-1, 1]`: -1 full brake, +1 full throttle.
    pub throttle: T,
    /// Steering in `[-1, 1]`: -1 full left, +1 full right.
    pub steering: T,
}

impl<T: Float> DriveCommand<T> {
    /// The neutral command: coast straight ahead.
    pub fn neutral() -> Self {
        DriveCommand {
            throttle: T::zero(),
            steering: T::zero(),
        }
    }
}

fn unit<T: Float>(v: [T; 2]) -> Option<[T; 2]> {
    let norm = (v[0] * v[0] + v[1] * v[1]).sqrt();
    if !norm.is_finite() || norm <= T::epsilon() {
        return None;
    }
    Some([v[0] / norm, v[1] / norm])
}

/// Signed perpendicular distance of `offset` from the line along unit
/// direction `dir`; positive to the right of `dir`.
fn lateral_offset<T: Float>(dir: [T; 2], offset: [T; 2]) -> T {
    offset[0] * dir[1] - offset[1] * dir[0]
}

/// Signed angle in degrees from unit `dir` to unit `heading`; positive when
/// `heading` points right of `dir`.
fn heading_error_deg<T: Float>(dir: [T; 2], heading: [T; 2]) -> T {
    let cross = dir[0] * heading[1] - dir[1] * heading[0];
    let dot = dir[0] * heading[0] + dir[1] * heading[1];
    (-cross.atan2(dot)).to_degrees()
}

/// A fuzzy throttle-and-steering controller for following a reference path.
///
/// The fuzzy sets and rule sets are built once from a [`DriveConfig`] and
/// never mutated by [`compute`](FuzzyDriver::compute), which is a pure
/// function of its [`PathReading`]; the value set scratch state is recreated
/// each tick, so no state carries across ticks.
#[derive(Debug, Clone)]
pub struct FuzzyDriver<T> {
    config: DriveConfig<T>,
    speed: FuzzySet<VehicleSpeed, T>,
    position: FuzzySet<LanePosition, T>,
    direction: FuzzySet<TravelDirection, T>,
    throttle_rules: FuzzyRuleSet<VehicleInput, DesiredSpeed, T>,
    steering_rules: FuzzyRuleSet<VehicleInput, DesiredTurn, T>,
}

impl<T: Float> FuzzyDriver<T> {
    /// Builds a driver with the default fuzzy sets and rule base scaled to
    /// `config`.
    pub fn new(config: DriveConfig<T>) -> Self {
        FuzzyDriver {
            config,
            speed: speed_sets(&config),
            position: position_sets(),
            direction: direction_sets(&config),
            throttle_rules: FuzzyRuleSet::new_unchecked(desired_speed_sets(&config), throttle_rules()),
            steering_rules: FuzzyRuleSet::new_unchecked(desired_turn_sets(), steering_rules()),
        }
    }

    /// The driver's configuration.
    pub fn config(&self) -> &DriveConfig<T> {
        &self.config
    }

    /// The fuzzy set over the speed variable.
    pub fn speed_set(&self) -> &FuzzySet<VehicleSpeed, T> {
        &self.speed
    }

    /// The fuzzy set over the lane-position variable.
    pub fn position_set(&self) -> &FuzzySet<LanePosition, T> {
        &self.position
    }

    /// The fuzzy set over the travel-direction variable.
    pub fn direction_set(&self) -> &FuzzySet<TravelDirection, T> {
        &self.direction
    }

    /// The throttle rule set.
    pub fn throttle_rules(&self) -> &FuzzyRuleSet<VehicleInput, DesiredSpeed, T> {
        &self.throttle_rules
    }

    /// The steering rule set.
    pub fn steering_rules(&self) -> &FuzzyRuleSet<VehicleInput, DesiredTurn, T> {
        &self.steering_rules
    }

    /// Replaces the throttle rule set, e.g. for re-tuning.
    pub fn set_throttle_rules(&mut self, rules: FuzzyRuleSet<VehicleInput, DesiredSpeed, T>) {
        self.throttle_rules = rules;
    }

    /// Replaces the steering rule set.
    pub fn set_steering_rules(&mut self, rules: FuzzyRuleSet<VehicleInput, DesiredTurn, T>) {
        self.steering_rules = rules;
    }

    /// Runs one control tick.
    ///
    /// Fuzzifies the reading's lateral offset, speed and heading error, runs
    /// both rule sets, and scales the crisp centroids into command range:
    /// throttle is the desired-speed centroid divided by the top speed,
    /// steering is the desired-turn centroid, both clamped to `[-1, 1]`.
    ///
    /// Degenerate readings (near-zero heading or path direction) return the
    /// neutral command.
    pub fn compute(&self, reading: &PathReading<T>) -> DriveCommand<T> {
        let (dir, heading) = match (unit(reading.path_direction), unit(reading.heading)) {
            (Some(dir), Some(heading)) => (dir, heading),
            _ => return DriveCommand::neutral(),
        };

        let offset = [
            reading.position[0] - reading.path_point[0],
            reading.position[1] - reading.path_point[1],
        ];
        let lateral = lateral_offset(dir, offset) / self.config.lane_half_width;
        let veer = heading_error_deg(dir, heading);

        let mut values = FuzzyValueSet::<VehicleInput, T>::new();
        self.position.evaluate(lateral, &mut values);
        self.speed.evaluate(reading.speed, &mut values);
        self.direction.evaluate(veer, &mut values);

        let one = T::one();
        let throttle = self.throttle_rules.evaluate(&values) / self.config.top_speed;
        let steering = self.steering_rules.evaluate(&values);
        DriveCommand {
            throttle: throttle.max(-one).min(one),
            steering: steering.max(-one).min(one),
        }
    }
}

impl<T: Float> Default for FuzzyDriver<T> {
    fn default() -> Self {
        Self::new(DriveConfig::default())
    }
}

fn speed_sets<T: Float>(config: &DriveConfig<T>) -> FuzzySet<VehicleSpeed, T> {
    let top = config.top_speed();
    let ramp_end = top * cast(0.25);
    let mid = top * cast(0.625);
    let zero = T::zero();
    let one = T::one();

    let mut set = FuzzySet::new();
    set.insert(
        VehicleSpeed::Slow,
        MembershipFunction::shoulder_unchecked(
            zero,
            Anchor::new(zero, one),
            Anchor::new(ramp_end, zero),
            top,
        ),
    );
    set.insert(
        VehicleSpeed::Medium,
        MembershipFunction::triangular_unchecked(
            Anchor::new(ramp_end, zero),
            Anchor::new(mid, one),
            Anchor::new(top, zero),
        ),
    );
    set.insert(
        VehicleSpeed::Fast,
        MembershipFunction::shoulder_unchecked(
            zero,
            Anchor::new(mid, zero),
            Anchor::new(top, one),
            top,
        ),
    );
    set
}

fn position_sets<T: Float>() -> FuzzySet<LanePosition, T> {
    let zero = T::zero();
    let one = T::one();
    // Dead zone of a tenth of the lane around the centerline
    let edge: T = cast(0.1);

    let mut set = FuzzySet::new();
    set.insert(
        LanePosition::Left,
        MembershipFunction::shoulder_unchecked(
            -one,
            Anchor::new(-one, one),
            Anchor::new(-edge, zero),
            one,
        ),
    );
    set.insert(
        LanePosition::Centered,
        MembershipFunction::triangular_unchecked(
            Anchor::new(-one, zero),
            Anchor::new(zero, one),
            Anchor::new(one, zero),
        ),
    );
    set.insert(
        LanePosition::Right,
        MembershipFunction::shoulder_unchecked(
            -one,
            Anchor::new(edge, zero),
            Anchor::new(one, one),
            one,
        ),
    );
    set
}

fn direction_sets<T: Float>(config: &DriveConfig<T>) -> FuzzySet<TravelDirection, T> {
    let window = config.heading_window();
    let edge = window * cast(0.2);
    let zero = T::zero();
    let one = T::one();

    let mut set = FuzzySet::new();
    set.insert(
        TravelDirection::VeeringLeft,
        MembershipFunction::shoulder_unchecked(
            -window,
            Anchor::new(-window, one),
            Anchor::new(-edge, zero),
            window,
        ),
    );
    set.insert(
        TravelDirection::OnCourse,
        MembershipFunction::triangular_unchecked(
            Anchor::new(-window, zero),
            Anchor::new(zero, one),
            Anchor::new(window, zero),
        ),
    );
    set.insert(
        TravelDirection::VeeringRight,
        MembershipFunction::shoulder_unchecked(
            -window,
            Anchor::new(edge, zero),
            Anchor::new(window, one),
            window,
        ),
    );
    set
}

fn desired_speed_sets<T: Float>(config: &DriveConfig<T>) -> FuzzySet<DesiredSpeed, T> {
    let top = config.top_speed();
    let brake_end = -top * cast(0.375);
    let accel_start = top * cast(0.625);
    let zero = T::zero();
    let one = T::one();

    let mut set = FuzzySet::new();
    set.insert(
        DesiredSpeed::Brake,
        MembershipFunction::shoulder_unchecked(
            -top,
            Anchor::new(-top, one),
            Anchor::new(brake_end, zero),
            top,
        ),
    );
    set.insert(
        DesiredSpeed::Cruise,
        MembershipFunction::triangular_unchecked(
            Anchor::new(-top, zero),
            Anchor::new(zero, one),
            Anchor::new(top, zero),
        ),
    );
    set.insert(
        DesiredSpeed::Accelerate,
        MembershipFunction::shoulder_unchecked(
            -top,
            Anchor::new(accel_start, zero),
            Anchor::new(top, one),
            top,
        ),
    );
    set
}

fn desired_turn_sets<T: Float>() -> FuzzySet<DesiredTurn, T> {
    let zero = T::zero();
    let one = T::one();
    let half: T = cast(0.5);

    let mut set = FuzzySet::new();
    set.insert(
        DesiredTurn::Left,
        MembershipFunction::shoulder_unchecked(
            -one,
            Anchor::new(-one, one),
            Anchor::new(-half, zero),
            one,
        ),
    );
    set.insert(
        DesiredTurn::Straight,
        MembershipFunction::triangular_unchecked(
            Anchor::new(-one, zero),
            Anchor::new(zero, one),
            Anchor::new(one, zero),
        ),
    );
    set.insert(
        DesiredTurn::Right,
        MembershipFunction::shoulder_unchecked(
            -one,
            Anchor::new(half, zero),
            Anchor::new(one, one),
            one,
        ),
    );
    set
}

fn throttle_rules() -> Vec<FuzzyRule<VehicleInput, DesiredSpeed>> {
    vec![
        VehicleSpeed::Slow
            .expr()
            .and(LanePosition::Centered.expr())
            .then(DesiredSpeed::Accelerate),
        VehicleSpeed::Slow
            .expr()
            .and(LanePosition::Left.expr())
            .then(DesiredSpeed::Accelerate),
        VehicleSpeed::Slow
            .expr()
            .and(LanePosition::Right.expr())
            .then(DesiredSpeed::Accelerate),
        VehicleSpeed::Medium
            .expr()
            .and(LanePosition::Centered.expr())
            .then(DesiredSpeed::Accelerate),
        VehicleSpeed::Medium
            .expr()
            .and(LanePosition::Left.expr())
            .then(DesiredSpeed::Brake),
        VehicleSpeed::Medium
            .expr()
            .and(LanePosition::Right.expr())
            .then(DesiredSpeed::Brake),
        VehicleSpeed::Fast.expr().then(DesiredSpeed::Brake),
    ]
}

fn steering_rules() -> Vec<FuzzyRule<VehicleInput, DesiredTurn>> {
    vec![
        LanePosition::Left.expr().then(DesiredTurn::Right),
        LanePosition::Centered.expr().then(DesiredTurn::Straight),
        LanePosition::Right.expr().then(DesiredTurn::Left),
        // Heading-error damping: steer against the veer so lateral
        // corrections settle instead of oscillating
        TravelDirection::VeeringLeft.expr().then(DesiredTurn::Right),
        TravelDirection::OnCourse.expr().then(DesiredTurn::Straight),
        TravelDirection::VeeringRight.expr().then(DesiredTurn::Left),
    ]
}
