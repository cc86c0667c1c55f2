#![warn(missing_docs)]

//! # Fuzzy Drive
//!
//! This library provides a fuzzy-logic throttle and steering controller for
//! path-following vehicles in Rust.
//!
//! It includes both the generic fuzzy-inference building blocks and a
//! ready-made vehicle controller, allowing users to choose the level that
//! best suits their needs.
//!
//! ## Features
//!
//! - A complete fuzzy-inference pipeline:
//!   - Validated shoulder and triangular membership functions that always
//!     produce degrees in `[0, 1]`, even for degenerate anchor layouts.
//!   - Label-indexed fuzzy sets and value sets over plain Rust enums.
//!   - Rules built from a small expression DSL
//!     (`Slow.expr().and(Centered.expr()).then(Accelerate)`), fired with
//!     min-AND, aggregated with max, and defuzzified to the weighted average
//!     of representative values.
//!
//! - Explicit support for **control-loop** requirements:
//!   - A pure, allocation-light `compute` invoked once per host frame; all
//!     scratch state is recreated each tick, so nothing carries across
//!     ticks.
//!   - A documented sensor-model contract (signed lateral offset, signed
//!     heading error) and commands clamped to `[-1, 1]`.
//!   - Degenerate configurations (empty rule sets, zero total weight,
//!     zero-length sensor vectors) yield defined neutral outputs instead of
//!     failing.
//!
//! ## Usage
//!
//! ### Driving a vehicle
//!
//! The [`vehicle::FuzzyDriver`] owns static fuzzy sets and rule sets built
//! once from a validated config; `compute` is a pure function of the tick's
//! sensor reading.
//!
//! ```rust
//! use fuzzy_drive::vehicle::{DriveConfigBuilder, FuzzyDriver, PathReading};
//!
//! let config = DriveConfigBuilder::default()
//!     .top_speed(40.0)
//!     .build()
//!     .expect("Invalid drive config");
//! let driver = FuzzyDriver::new(config);
//!
//! // Two units right of a northbound path, rolling slowly
//! let reading = PathReading {
//!     position: [2.0, 0.0],
//!     heading: [0.0, 1.0],
//!     speed: 5.0,
//!     path_point: [0.0, 0.0],
//!     path_direction: [0.0, 1.0],
//! };
//!
//! let command = driver.compute(&reading);
//! assert!(command.steering < 0.0); // right of the path: steer back left
//! assert!(command.throttle > 0.0); // well below top speed: accelerate
//! ```
//!
//! ### Building inference by hand
//!
//! The pieces in [`fuzz`] compose directly when the built-in driver does not
//! fit.
//!
//! ```rust
//! use fuzzy_drive::fuzz::{
//!     Anchor, FuzzyRule, FuzzyRuleSet, FuzzySet, FuzzyValueSet, MembershipFunction, RuleAtom,
//! };
//! use fuzzy_drive::vehicle::{DesiredSpeed, VehicleSpeed};
//!
//! let mut speed = FuzzySet::new();
//! speed.insert(
//!     VehicleSpeed::Slow,
//!     MembershipFunction::shoulder(0.0, Anchor::new(0.0, 1.0), Anchor::new(20.0, 0.0), 80.0)
//!         .expect("Invalid shoulder anchors"),
//! );
//!
//! let mut output = FuzzySet::new();
//! output.insert(
//!     DesiredSpeed::Accelerate,
//!     MembershipFunction::shoulder(-80.0, Anchor::new(50.0, 0.0), Anchor::new(80.0, 1.0), 80.0)
//!         .expect("Invalid shoulder anchors"),
//! );
//!
//! let rules: Vec<FuzzyRule<VehicleSpeed, DesiredSpeed>> =
//!     vec![VehicleSpeed::Slow.expr().then(DesiredSpeed::Accelerate)];
//! let rule_set = FuzzyRuleSet::new(output, rules).expect("Invalid rule set");
//!
//! let mut values = FuzzyValueSet::new();
//! speed.evaluate(10.0, &mut values);
//!
//! // The one rule fires at 0.5, so the centroid is its representative value
//! assert_eq!(rule_set.evaluate(&values), 80.0);
//! ```
//!
//! ### Plugging in your own labels
//!
//! ```rust
//! use fuzzy_drive::fuzz::{Anchor, FuzzyLabel, FuzzySet, FuzzyValueSet, MembershipFunction};
//!
//! #[derive(Clone, Copy, Debug, PartialEq)]
//! enum Comfort {
//!     Chilly,
//!     Pleasant,
//!     Hot,
//! }
//!
//! impl FuzzyLabel for Comfort {
//!     const CARDINALITY: usize = 3;
//!
//!     fn index(self) -> usize {
//!         match self {
//!             Comfort::Chilly => 0,
//!             Comfort::Pleasant => 1,
//!             Comfort::Hot => 2,
//!         }
//!     }
//! }
//!
//! let mut set = FuzzySet::new();
//! set.insert(
//!     Comfort::Pleasant,
//!     MembershipFunction::triangular(
//!         Anchor::new(15.0, 0.0),
//!         Anchor::new(21.0, 1.0),
//!         Anchor::new(27.0, 0.0),
//!     )
//!     .expect("Invalid triangle anchors"),
//! );
//!
//! let mut values = FuzzyValueSet::new();
//! set.evaluate(18.0, &mut values);
//! assert_eq!(values.degree(Comfort::Pleasant), 0.5);
//! ```
//!
//! ## License
//!
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

/// The fuzzy-inference core: membership functions, fuzzy sets, rules and
/// defuzzification.
pub mod fuzz;

/// The control-tick composition turning path readings into drive commands.
pub mod vehicle;

#[doc(hidden)]
#[cfg(feature = "simulation")]
pub mod sim;

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
pub struct ReadmeDoctests;
