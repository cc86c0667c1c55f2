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

use fuzzy_drive::fuzz::{
    Anchor, FuzzyRule, FuzzyRuleSet, FuzzySet, FuzzyValueSet, MembershipFunction, RuleAtom,
    RuleSetError, ShapeError,
};
use fuzzy_drive::vehicle::{DesiredSpeed, LanePosition, VehicleInput, VehicleSpeed};

fn left_shoulder() -> MembershipFunction<f64> {
    MembershipFunction::shoulder(0.0, Anchor::new(0.0, 1.0), Anchor::new(20.0, 0.0), 80.0)
        .expect("anchors are valid")
}

fn right_shoulder() -> MembershipFunction<f64> {
    MembershipFunction::shoulder(0.0, Anchor::new(50.0, 0.0), Anchor::new(80.0, 1.0), 80.0)
        .expect("anchors are valid")
}

fn unit_triangle() -> MembershipFunction<f64> {
    MembershipFunction::triangular(
        Anchor::new(-2.0, 0.0),
        Anchor::new(0.0, 1.0),
        Anchor::new(2.0, 0.0),
    )
    .expect("anchors are valid")
}

/// A desired-speed output set whose Brake/Accelerate representatives sit at
/// -80 and 80.
fn desired_speed_output() -> FuzzySet<DesiredSpeed, f64> {
    let mut output = FuzzySet::new();
    output.insert(
        DesiredSpeed::Brake,
        MembershipFunction::shoulder(-80.0, Anchor::new(-80.0, 1.0), Anchor::new(-30.0, 0.0), 80.0)
            .expect("anchors are valid"),
    );
    output.insert(
        DesiredSpeed::Cruise,
        MembershipFunction::triangular(
            Anchor::new(-80.0, 0.0),
            Anchor::new(0.0, 1.0),
            Anchor::new(80.0, 0.0),
        )
        .expect("anchors are valid"),
    );
    output.insert(
        DesiredSpeed::Accelerate,
        MembershipFunction::shoulder(-80.0, Anchor::new(50.0, 0.0), Anchor::new(80.0, 1.0), 80.0)
            .expect("anchors are valid"),
    );
    output
}

mod test_membership_functions {
    use super::*;

    #[test]
    fn test_degrees_stay_in_unit_interval() {
        let shapes = [left_shoulder(), right_shoulder(), unit_triangle()];
        for shape in &shapes {
            let mut x = -200.0;
            while x <= 200.0 {
                let degree = shape.evaluate(x);
                assert!(
                    (0.0..=1.0).contains(&degree),
                    "degree {degree} out of range at x = {x}"
                );
                x += 0.25;
            }
        }
    }

    #[test]
    fn test_triangular_worked_example() {
        let tri = unit_triangle();

        assert_eq!(tri.evaluate(0.0), 1.0);
        assert_eq!(tri.evaluate(1.0), 0.5);
        assert_eq!(tri.evaluate(-1.0), 0.5);
        assert_eq!(tri.evaluate(3.0), 0.0);
        assert_eq!(tri.evaluate(-3.0), 0.0);
        assert_eq!(tri.evaluate(2.0), 0.0);
        assert_eq!(tri.evaluate(-2.0), 0.0);
    }

    #[test]
    fn test_shoulder_is_monotonic_across_ramp() {
        let falling = left_shoulder();
        let rising = right_shoulder();

        let mut last_falling = f64::INFINITY;
        let mut last_rising = -f64::INFINITY;
        let mut x = -10.0;
        while x <= 90.0 {
            let f = falling.evaluate(x);
            let r = rising.evaluate(x);
            assert!(f <= last_falling, "falling shoulder rose at x = {x}");
            assert!(r >= last_rising, "rising shoulder fell at x = {x}");
            last_falling = f;
            last_rising = r;
            x += 0.5;
        }
    }

    #[test]
    fn test_shoulder_plateaus_and_clamps() {
        let falling = left_shoulder();

        // Flat at the plateau degree before the ramp, flat at the end degree
        // after it, and out-of-bounds inputs clamp to the boundary degree
        assert_eq!(falling.evaluate(-100.0), 1.0);
        assert_eq!(falling.evaluate(0.0), 1.0);
        assert_eq!(falling.evaluate(10.0), 0.5);
        assert_eq!(falling.evaluate(20.0), 0.0);
        assert_eq!(falling.evaluate(79.0), 0.0);
        assert_eq!(falling.evaluate(1000.0), 0.0);
    }

    #[test]
    fn test_zero_width_segments_degrade_to_steps() {
        let step =
            MembershipFunction::shoulder(0.0, Anchor::new(5.0, 1.0), Anchor::new(5.0, 0.0), 10.0)
                .expect("zero-width ramp is a legal shape");
        assert_eq!(step.evaluate(4.0), 1.0);
        // The boundary itself keeps the lower side's degree
        assert_eq!(step.evaluate(5.0), 1.0);
        assert_eq!(step.evaluate(6.0), 0.0);

        let spike = MembershipFunction::triangular(
            Anchor::new(0.0, 0.0),
            Anchor::new(0.0, 1.0),
            Anchor::new(2.0, 0.0),
        )
        .expect("zero-width rise is a legal shape");
        assert_eq!(spike.evaluate(-1.0), 0.0);
        assert_eq!(spike.evaluate(1.0), 0.5);
        assert_eq!(spike.evaluate(3.0), 0.0);
    }

    const INVALID_DEGREES: &[f64; 3] = &[-0.5, 1.5, 42.0];

    #[test]
    fn test_anchor_validation() {
        // Unordered x-coordinates
        assert_eq!(
            MembershipFunction::triangular(
                Anchor::new(2.0, 0.0),
                Anchor::new(0.0, 1.0),
                Anchor::new(-2.0, 0.0),
            ),
            Err(ShapeError::UnorderedAnchors)
        );

        // Ramp outside the configured bounds
        assert_eq!(
            MembershipFunction::shoulder(0.0, Anchor::new(5.0, 1.0), Anchor::new(20.0, 0.0), 10.0),
            Err(ShapeError::UnorderedAnchors)
        );

        // Non-finite coordinates
        assert_eq!(
            MembershipFunction::shoulder(
                0.0,
                Anchor::new(f64::NAN, 1.0),
                Anchor::new(20.0, 0.0),
                80.0
            ),
            Err(ShapeError::NonFiniteAnchor)
        );

        // Degrees outside [0, 1]
        for degree in INVALID_DEGREES {
            assert_eq!(
                MembershipFunction::triangular(
                    Anchor::new(-2.0, 0.0),
                    Anchor::new(0.0, *degree),
                    Anchor::new(2.0, 0.0),
                ),
                Err(ShapeError::DegreeOutOfRange)
            );
        }
    }
}

mod test_fuzzy_sets {
    use super::*;

    #[test]
    fn test_evaluate_records_each_label() {
        let mut set = FuzzySet::new();
        set.insert(VehicleSpeed::Slow, left_shoulder());
        set.insert(VehicleSpeed::Fast, right_shoulder());

        let mut values = FuzzyValueSet::new();
        set.evaluate(10.0, &mut values);

        assert_eq!(values.degree(VehicleSpeed::Slow), 0.5);
        assert_eq!(values.degree(VehicleSpeed::Fast), 0.0);
        // No function inserted for Medium, so its degree stays zero
        assert_eq!(values.degree(VehicleSpeed::Medium), 0.0);
    }

    #[test]
    fn test_evaluate_into_wider_label_type() {
        let mut speed = FuzzySet::new();
        speed.insert(VehicleSpeed::Slow, left_shoulder());

        let mut values = FuzzyValueSet::<VehicleInput, f64>::new();
        speed.evaluate(10.0, &mut values);

        assert_eq!(values.degree(VehicleInput::Speed(VehicleSpeed::Slow)), 0.5);
        assert_eq!(
            values.degree(VehicleInput::Position(LanePosition::Centered)),
            0.0
        );
    }

    #[test]
    fn test_insert_replaces_existing_label() {
        let mut set = FuzzySet::new();
        set.insert(VehicleSpeed::Slow, left_shoulder());
        set.insert(VehicleSpeed::Slow, right_shoulder());

        assert_eq!(set.len(), 1);
        assert_eq!(set.membership(VehicleSpeed::Slow), Some(&right_shoulder()));
    }

    #[test]
    fn test_degree_writes_clamp_into_unit_interval() {
        let mut values = FuzzyValueSet::new();
        values.set_degree(VehicleSpeed::Slow, 1.5);
        values.set_degree(VehicleSpeed::Fast, -0.5);

        assert_eq!(values.degree(VehicleSpeed::Slow), 1.0);
        assert_eq!(values.degree(VehicleSpeed::Fast), 0.0);

        values.reset();
        assert_eq!(values.degree(VehicleSpeed::Slow), 0.0);
    }
}

mod test_rules_and_inference {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_firing_strength_is_minimum_of_conjunction() {
        let mut values = FuzzyValueSet::<VehicleInput, f64>::new();
        values.set_degree(VehicleInput::Speed(VehicleSpeed::Slow), 0.3);
        values.set_degree(VehicleInput::Position(LanePosition::Centered), 0.7);

        let expr = VehicleSpeed::Slow
            .expr::<VehicleInput>()
            .and(LanePosition::Centered.expr());
        assert_eq!(expr.strength(&values), 0.3);

        let flipped = LanePosition::Centered
            .expr::<VehicleInput>()
            .and(VehicleSpeed::Slow.expr());
        assert_eq!(flipped.strength(&values), 0.3);
    }

    #[test]
    fn test_single_fully_firing_rule_returns_representative() {
        let rules: Vec<FuzzyRule<VehicleSpeed, DesiredSpeed>> =
            vec![VehicleSpeed::Slow.expr().then(DesiredSpeed::Accelerate)];
        let rule_set =
            FuzzyRuleSet::new(desired_speed_output(), rules).expect("rule set is valid");

        let mut values = FuzzyValueSet::new();
        values.set_degree(VehicleSpeed::Slow, 1.0);

        assert_eq!(rule_set.evaluate(&values), 80.0);
    }

    #[test]
    fn test_weighted_two_rule_example() {
        // Slow fires at 0.8 toward 80, Fast at 0.2 toward -80:
        // (0.8 * 80 + 0.2 * -80) / (0.8 + 0.2) = 48
        let rules: Vec<FuzzyRule<VehicleSpeed, DesiredSpeed>> = vec![
            VehicleSpeed::Slow.expr().then(DesiredSpeed::Accelerate),
            VehicleSpeed::Fast.expr().then(DesiredSpeed::Brake),
        ];
        let rule_set =
            FuzzyRuleSet::new(desired_speed_output(), rules).expect("rule set is valid");

        let mut values = FuzzyValueSet::new();
        values.set_degree(VehicleSpeed::Slow, 0.8);
        values.set_degree(VehicleSpeed::Fast, 0.2);

        assert_relative_eq!(rule_set.evaluate(&values), 48.0, epsilon = 1e-12);
    }

    #[test]
    fn test_aggregation_is_order_independent() {
        let forward: Vec<FuzzyRule<VehicleSpeed, DesiredSpeed>> = vec![
            VehicleSpeed::Slow.expr().then(DesiredSpeed::Accelerate),
            VehicleSpeed::Medium.expr().then(DesiredSpeed::Accelerate),
            VehicleSpeed::Fast.expr().then(DesiredSpeed::Brake),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let forward_set =
            FuzzyRuleSet::new(desired_speed_output(), forward).expect("rule set is valid");
        let reversed_set =
            FuzzyRuleSet::new(desired_speed_output(), reversed).expect("rule set is valid");

        let mut values = FuzzyValueSet::new();
        values.set_degree(VehicleSpeed::Slow, 0.4);
        values.set_degree(VehicleSpeed::Medium, 0.9);
        values.set_degree(VehicleSpeed::Fast, 0.2);

        assert_eq!(
            forward_set.evaluate(&values),
            reversed_set.evaluate(&values)
        );
    }

    #[test]
    fn test_rules_sharing_a_consequent_aggregate_by_maximum() {
        let rules: Vec<FuzzyRule<VehicleSpeed, DesiredSpeed>> = vec![
            VehicleSpeed::Slow.expr().then(DesiredSpeed::Accelerate),
            VehicleSpeed::Medium.expr().then(DesiredSpeed::Accelerate),
        ];
        let rule_set =
            FuzzyRuleSet::new(desired_speed_output(), rules).expect("rule set is valid");

        let mut values = FuzzyValueSet::new();
        values.set_degree(VehicleSpeed::Slow, 0.3);
        values.set_degree(VehicleSpeed::Medium, 0.9);

        // Max-aggregation keeps the stronger firing, so the centroid is the
        // representative value itself, not a blend of the two strengths
        assert_eq!(rule_set.evaluate(&values), 80.0);
    }

    #[test]
    fn test_zero_total_weight_defuzzifies_to_zero() {
        let rules: Vec<FuzzyRule<VehicleSpeed, DesiredSpeed>> =
            vec![VehicleSpeed::Slow.expr().then(DesiredSpeed::Accelerate)];
        let rule_set =
            FuzzyRuleSet::new(desired_speed_output(), rules).expect("rule set is valid");

        let values = FuzzyValueSet::new();
        assert_eq!(rule_set.evaluate(&values), 0.0);
    }

    #[test]
    fn test_empty_rule_set_defuzzifies_to_zero() {
        let rule_set: FuzzyRuleSet<VehicleSpeed, DesiredSpeed, f64> =
            FuzzyRuleSet::new(desired_speed_output(), Vec::new()).expect("rule set is valid");

        let mut values = FuzzyValueSet::new();
        values.set_degree(VehicleSpeed::Slow, 1.0);
        assert_eq!(rule_set.evaluate(&values), 0.0);
    }

    #[test]
    fn test_consequent_without_membership_is_rejected() {
        let mut output = FuzzySet::new();
        output.insert(
            DesiredSpeed::Brake,
            MembershipFunction::shoulder(
                -80.0,
                Anchor::new(-80.0, 1.0),
                Anchor::new(-30.0, 0.0),
                80.0,
            )
            .expect("anchors are valid"),
        );

        let rules: Vec<FuzzyRule<VehicleSpeed, DesiredSpeed>> =
            vec![VehicleSpeed::Slow.expr().then(DesiredSpeed::Accelerate)];

        assert_eq!(
            FuzzyRuleSet::new(output, rules).map(|_| ()),
            Err(RuleSetError::MissingConsequent)
        );
    }
}
