// Fuzzy sets, rules and defuzzification
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

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::marker::PhantomData;

use num_traits::Float;

/// A finite enumeration of linguistic labels, e.g. `Slow`/`Medium`/`Fast`.
///
/// Implementations must map every label to a distinct index in
/// `0..CARDINALITY`; [`FuzzyValueSet`] uses that index for dense storage.
pub trait FuzzyLabel: Copy + PartialEq + Debug {
    /// Number of labels in the enumeration.
    const CARDINALITY: usize;

    /// Dense index of this label, in `0..CARDINALITY`.
    fn index(self) -> usize;
}

/// Builds a [`RuleExpr`] leaf straight from a label, so rules read the way
/// they are spoken: `Slow.expr().and(Centered.expr()).then(Accelerate)`.
///
/// The target expression may range over a wider label type than the label
/// itself (any `L: From<Self>`), which is how antecedents mix several input
/// variables in one rule.
pub trait RuleAtom: FuzzyLabel {
    /// Wraps this label in a membership test.
    fn expr<L>(self) -> RuleExpr<L>
    where
        L: FuzzyLabel + From<Self>,
    {
        RuleExpr::Test(self.into())
    }
}

impl<X: FuzzyLabel> RuleAtom for X {}

/// Errors raised when constructing a membership function from bad anchors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum ShapeError {
    /// Anchor x-coordinates are not in ascending order, or fall outside the
    /// configured input bounds.
    #[cfg_attr(
        feature = "std",
        error("anchor x-coordinates must be ordered and within bounds")
    )]
    UnorderedAnchors,

    /// An anchor degree lies outside `[0, 1]`.
    #[cfg_attr(feature = "std", error("anchor degrees must lie in [0, 1]"))]
    DegreeOutOfRange,

    /// An anchor coordinate is NaN or infinite.
    #[cfg_attr(feature = "std", error("anchor coordinates must be finite"))]
    NonFiniteAnchor,
}

/// Errors raised when assembling a [`FuzzyRuleSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum RuleSetError {
    /// A rule names a consequent label with no membership function in the
    /// output set, so no representative value exists to defuzzify with.
    #[cfg_attr(
        feature = "std",
        error("rule consequent has no membership function in the output set")
    )]
    MissingConsequent,
}

/// An (x, y) control point of a membership function; `y` is a degree of
/// membership in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor<T> {
    /// Input-domain coordinate.
    pub x: T,
    /// Degree of membership at `x`.
    pub y: T,
}

impl<T> Anchor<T> {
    /// Creates an anchor at `(x, y)`.
    pub fn new(x: T, y: T) -> Self {
        Anchor { x, y }
    }
}

/// Maps a scalar input to a degree of membership in `[0, 1]`.
///
/// Two shapes exist: a shoulder (one-sided ramp with flat plateaus on either
/// side) and a triangle (two back-to-back ramps). Anchors are validated at
/// construction, and evaluation interpolates between them, so every result is
/// in `[0, 1]` for every input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MembershipFunction<T> {
    shape: Shape<T>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape<T> {
    Shoulder {
        lower: T,
        p0: Anchor<T>,
        p1: Anchor<T>,
        upper: T,
    },
    Triangular {
        p0: Anchor<T>,
        p1: Anchor<T>,
        p2: Anchor<T>,
    },
}

fn all_finite<T: Float>(values: &[T]) -> bool {
    values.iter().all(|v| v.is_finite())
}

fn degree_in_range<T: Float>(y: T) -> bool {
    y >= T::zero() && y <= T::one()
}

fn lerp<T: Float>(a: Anchor<T>, b: Anchor<T>, x: T) -> T {
    a.y + (b.y - a.y) * (x - a.x) / (b.x - a.x)
}

impl<T: Float> MembershipFunction<T> {
    /// Creates a shoulder function.
    ///
    /// The degree is `p0.y` for inputs at or below `p0.x`, `p1.y` for inputs
    /// at or above `p1.x`, and linear in between; inputs are clamped to
    /// `[lower, upper]` first. A left shoulder ramps 1 → 0, a right shoulder
    /// 0 → 1; both are expressed by the anchors' degrees.
    ///
    /// # Errors
    /// Fails if any coordinate is non-finite, the x-coordinates violate
    /// `lower <= p0.x <= p1.x <= upper`, or a degree is outside `[0, 1]`.
    pub fn shoulder(lower: T, p0: Anchor<T>, p1: Anchor<T>, upper: T) -> Result<Self, ShapeError> {
        if !all_finite(&[lower, p0.x, p0.y, p1.x, p1.y, upper]) {
            return Err(ShapeError::NonFiniteAnchor);
        }
        if !(lower <= p0.x && p0.x <= p1.x && p1.x <= upper) {
            return Err(ShapeError::UnorderedAnchors);
        }
        if !(degree_in_range(p0.y) && degree_in_range(p1.y)) {
            return Err(ShapeError::DegreeOutOfRange);
        }
        Ok(Self::shoulder_unchecked(lower, p0, p1, upper))
    }

    /// Creates a triangular function.
    ///
    /// The degree is `p0.y` at or below `p0.x`, rises (or falls) linearly to
    /// `p1.y` at `p1.x`, continues linearly to `p2.y` at `p2.x`, and is
    /// `p2.y` beyond. The usual triangle uses degrees 0/1/0.
    ///
    /// # Errors
    /// Fails if any coordinate is non-finite, the x-coordinates are not in
    /// ascending order, or a degree is outside `[0, 1]`.
    pub fn triangular(p0: Anchor<T>, p1: Anchor<T>, p2: Anchor<T>) -> Result<Self, ShapeError> {
        if !all_finite(&[p0.x, p0.y, p1.x, p1.y, p2.x, p2.y]) {
            return Err(ShapeError::NonFiniteAnchor);
        }
        if !(p0.x <= p1.x && p1.x <= p2.x) {
            return Err(ShapeError::UnorderedAnchors);
        }
        if !(degree_in_range(p0.y) && degree_in_range(p1.y) && degree_in_range(p2.y)) {
            return Err(ShapeError::DegreeOutOfRange);
        }
        Ok(Self::triangular_unchecked(p0, p1, p2))
    }

    pub(crate) fn shoulder_unchecked(lower: T, p0: Anchor<T>, p1: Anchor<T>, upper: T) -> Self {
        MembershipFunction {
            shape: Shape::Shoulder { lower, p0, p1, upper },
        }
    }

    pub(crate) fn triangular_unchecked(p0: Anchor<T>, p1: Anchor<T>, p2: Anchor<T>) -> Self {
        MembershipFunction {
            shape: Shape::Triangular { p0, p1, p2 },
        }
    }

    /// Computes the degree of membership of `x`.
    ///
    /// Out-of-range inputs clamp to the boundary anchor's degree. Zero-width
    /// segments degrade to steps; the interpolating branches are only reached
    /// when the segment has nonzero width, so no division by zero can occur.
    pub fn evaluate(&self, x: T) -> T {
        match self.shape {
            Shape::Shoulder { lower, p0, p1, upper } => {
                let x = x.max(lower).min(upper);
                if x <= p0.x {
                    p0.y
                } else if x >= p1.x {
                    p1.y
                } else {
                    lerp(p0, p1, x)
                }
            }
            Shape::Triangular { p0, p1, p2 } => {
                if x <= p0.x {
                    p0.y
                } else if x < p1.x {
                    lerp(p0, p1, x)
                } else if x < p2.x {
                    lerp(p1, p2, x)
                } else {
                    p2.y
                }
            }
        }
    }

    /// The x-coordinate at which this function peaks, used as the label's
    /// representative value during defuzzification.
    pub fn representative(&self) -> T {
        match self.shape {
            Shape::Shoulder { p0, p1, .. } => {
                if p0.y >= p1.y {
                    p0.x
                } else {
                    p1.x
                }
            }
            Shape::Triangular { p0, p1, p2 } => {
                if p1.y >= p0.y && p1.y >= p2.y {
                    p1.x
                } else if p0.y >= p2.y {
                    p0.x
                } else {
                    p2.x
                }
            }
        }
    }
}

/// A labeled collection of membership functions over one input variable.
#[derive(Debug, Clone)]
pub struct FuzzySet<L: FuzzyLabel, T> {
    members: Vec<(L, MembershipFunction<T>)>,
}

impl<L: FuzzyLabel, T: Float> FuzzySet<L, T> {
    /// Creates an empty set.
    pub fn new() -> Self {
        FuzzySet {
            members: Vec::new(),
        }
    }

    /// Associates `label` with `function`, replacing any previous function
    /// for that label.
    pub fn insert(&mut self, label: L, function: MembershipFunction<T>) {
        if let Some(member) = self.members.iter_mut().find(|(l, _)| *l == label) {
            member.1 = function;
        } else {
            self.members.push((label, function));
        }
    }

    /// Returns the membership function for `label`, if one was inserted.
    pub fn membership(&self, label: L) -> Option<&MembershipFunction<T>> {
        self.members.iter().find(|(l, _)| *l == label).map(|(_, f)| f)
    }

    /// Number of labeled functions in the set.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether the set holds no functions.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over `(label, function)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(L, MembershipFunction<T>)> {
        self.members.iter()
    }

    /// Evaluates `x` against every labeled function and records each degree
    /// into `values`.
    ///
    /// The value set may be keyed by a wider label type than this set's
    /// (`L: Into<M>`), so several input variables can share one value set for
    /// a single inference pass.
    pub fn evaluate<M>(&self, x: T, values: &mut FuzzyValueSet<M, T>)
    where
        M: FuzzyLabel,
        L: Into<M>,
    {
        for (label, function) in &self.members {
            values.set_degree((*label).into(), function.evaluate(x));
        }
    }
}

impl<L: FuzzyLabel, T: Float> Default for FuzzySet<L, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Degrees of membership for every label of `L`, the scratch state of one
/// inference pass. Freshly created value sets hold all zeros.
#[derive(Debug, Clone)]
pub struct FuzzyValueSet<L: FuzzyLabel, T> {
    degrees: Vec<T>,
    _labels: PhantomData<L>,
}

impl<L: FuzzyLabel, T: Float> FuzzyValueSet<L, T> {
    /// Creates a value set with every degree at zero.
    pub fn new() -> Self {
        FuzzyValueSet {
            degrees: vec![T::zero(); L::CARDINALITY],
            _labels: PhantomData,
        }
    }

    /// The recorded degree for `label`; zero if never set.
    pub fn degree(&self, label: L) -> T {
        self.degrees[label.index()]
    }

    /// Records a degree for `label`, clamped into `[0, 1]`.
    pub fn set_degree(&mut self, label: L, degree: T) {
        self.degrees[label.index()] = degree.max(T::zero()).min(T::one());
    }

    /// Zeroes every degree for reuse in a fresh pass.
    pub fn reset(&mut self) {
        for degree in &mut self.degrees {
            *degree = T::zero();
        }
    }
}

impl<L: FuzzyLabel, T: Float> Default for FuzzyValueSet<L, T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A rule antecedent: a membership test on a label, or a conjunction of
/// sub-expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleExpr<L> {
    /// The degree of membership of a single label.
    Test(L),
    /// Conjunction; fires at the minimum of both sides.
    And(Box<RuleExpr<L>>, Box<RuleExpr<L>>),
}

impl<L: FuzzyLabel> RuleExpr<L> {
    /// Conjoins this expression with another.
    pub fn and(self, rhs: RuleExpr<L>) -> Self {
        RuleExpr::And(Box::new(self), Box::new(rhs))
    }

    /// Finishes the rule with a consequent label in the output set.
    pub fn then<O: FuzzyLabel>(self, consequent: O) -> FuzzyRule<L, O> {
        FuzzyRule {
            antecedent: self,
            consequent,
        }
    }

    /// The firing strength of this expression against recorded degrees:
    /// the tested degree for a leaf, the minimum over a conjunction.
    pub fn strength<T: Float>(&self, values: &FuzzyValueSet<L, T>) -> T {
        match self {
            RuleExpr::Test(label) => values.degree(*label),
            RuleExpr::And(lhs, rhs) => lhs.strength(values).min(rhs.strength(values)),
        }
    }
}

/// An inference rule: an antecedent over input labels and a consequent label
/// in an output set.
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyRule<L, O> {
    antecedent: RuleExpr<L>,
    consequent: O,
}

impl<L: FuzzyLabel, O: FuzzyLabel> FuzzyRule<L, O> {
    /// The rule's antecedent expression.
    pub fn antecedent(&self) -> &RuleExpr<L> {
        &self.antecedent
    }

    /// The rule's consequent output label.
    pub fn consequent(&self) -> O {
        self.consequent
    }
}

/// A collection of rules plus the output fuzzy set they conclude into.
///
/// Evaluation aggregates the firing strengths of rules sharing a consequent
/// by maximum, then defuzzifies to a crisp scalar as the weighted average of
/// each output label's representative value. Both aggregation steps are
/// commutative, so rule order never changes the result.
#[derive(Debug, Clone)]
pub struct FuzzyRuleSet<L: FuzzyLabel, O: FuzzyLabel, T> {
    output: FuzzySet<O, T>,
    rules: Vec<FuzzyRule<L, O>>,
}

impl<L: FuzzyLabel, O: FuzzyLabel, T: Float> FuzzyRuleSet<L, O, T> {
    /// Creates a rule set over `output`.
    ///
    /// An empty `rules` vector is allowed; evaluation then yields the neutral
    /// zero.
    ///
    /// # Errors
    /// Fails if a rule's consequent has no membership function in `output`.
    pub fn new(output: FuzzySet<O, T>, rules: Vec<FuzzyRule<L, O>>) -> Result<Self, RuleSetError> {
        if rules
            .iter()
            .any(|rule| output.membership(rule.consequent()).is_none())
        {
            return Err(RuleSetError::MissingConsequent);
        }
        Ok(Self::new_unchecked(output, rules))
    }

    pub(crate) fn new_unchecked(output: FuzzySet<O, T>, rules: Vec<FuzzyRule<L, O>>) -> Self {
        FuzzyRuleSet { output, rules }
    }

    /// The output fuzzy set rules conclude into.
    pub fn output(&self) -> &FuzzySet<O, T> {
        &self.output
    }

    /// The rules in this set.
    pub fn rules(&self) -> &[FuzzyRule<L, O>] {
        &self.rules
    }

    /// Runs one inference pass over recorded input degrees and defuzzifies.
    ///
    /// Returns zero when no rule fires (zero total weight) or the rule set is
    /// empty.
    pub fn evaluate(&self, inputs: &FuzzyValueSet<L, T>) -> T {
        let mut aggregated = vec![T::zero(); O::CARDINALITY];
        for rule in &self.rules {
            let strength = rule.antecedent().strength(inputs);
            let slot = &mut aggregated[rule.consequent().index()];
            *slot = slot.max(strength);
        }

        let mut weighted = T::zero();
        let mut total = T::zero();
        for (label, function) in self.output.iter() {
            let strength = aggregated[label.index()];
            weighted = weighted + strength * function.representative();
            total = total + strength;
        }
        if total > T::zero() {
            weighted / total
        } else {
            T::zero()
        }
    }
}
