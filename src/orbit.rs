//! Representative points and representation data
//!
//! Independence of invariant forms is tested at concrete points of the
//! representation, one per orbit type: the most degenerate point (special),
//! a fixed generic-looking point (principal), and a one-parameter ray
//! (generic, the only one that keeps a free radial symbol). A representation
//! bundles the three together; restricting to a sub-bundle appends a shared
//! condition to all of them at once.

use std::collections::BTreeMap;

use crate::symbolic::{Form, Poly, Symbol};
use crate::FormsError;

/// The three orbit types used during construction.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OrbitType {
    /// Most degenerate point; cheapest evaluations.
    Special,
    /// Fixed generic-looking point.
    Principal,
    /// One-parameter family along a ray; retains the radial symbol.
    Generic,
}

/// Substitution of representation coordinates by concrete values.
#[derive(Clone, Debug, Default)]
pub struct RepresentativePoint {
    assignments: BTreeMap<Symbol, Poly>,
}

impl RepresentativePoint {
    /// Point with no assignments.
    pub fn new() -> RepresentativePoint {
        RepresentativePoint::default()
    }

    /// Assign a coordinate. Later assignments overwrite earlier ones.
    pub fn assign(&mut self, symbol: Symbol, value: Poly) -> &mut Self {
        self.assignments.insert(symbol, value);
        self
    }

    /// The substitution map.
    pub fn assignments(&self) -> &BTreeMap<Symbol, Poly> {
        &self.assignments
    }

    /// Substitute the point into a form.
    pub fn apply(&self, form: &Form) -> Result<Form, FormsError> {
        form.substitute(&self.assignments)
            .ok_or(FormsError::UndefinedAtPoint)
    }
}

/// The three representative points of one representation.
#[derive(Clone, Debug)]
pub struct RepresentationInfo {
    special: RepresentativePoint,
    principal: RepresentativePoint,
    generic: RepresentativePoint,
}

impl RepresentationInfo {
    /// Bundle the three points.
    pub fn new(
        special: RepresentativePoint,
        principal: RepresentativePoint,
        generic: RepresentativePoint,
    ) -> RepresentationInfo {
        RepresentationInfo {
            special,
            principal,
            generic,
        }
    }

    /// The point for an orbit type.
    pub fn point(&self, orbit: OrbitType) -> &RepresentativePoint {
        match orbit {
            OrbitType::Special => &self.special,
            OrbitType::Principal => &self.principal,
            OrbitType::Generic => &self.generic,
        }
    }

    /// Append a condition shared by all three points, used when restricting
    /// to a sub-bundle.
    pub fn append_condition(&mut self, symbol: Symbol, value: Poly) {
        self.special.assign(symbol.clone(), value.clone());
        self.principal.assign(symbol.clone(), value.clone());
        self.generic.assign(symbol, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_reach_all_points() {
        let x = Symbol::new("x");
        let y = Symbol::new("y");
        let mut info = RepresentationInfo::new(
            RepresentativePoint::new(),
            RepresentativePoint::new(),
            RepresentativePoint::new(),
        );
        info.append_condition(y.clone(), Poly::integer(0));
        for orbit in [OrbitType::Special, OrbitType::Principal, OrbitType::Generic] {
            assert_eq!(
                info.point(orbit).assignments().get(&y),
                Some(&Poly::integer(0))
            );
            assert!(info.point(orbit).assignments().get(&x).is_none());
        }
    }

    #[test]
    fn apply_substitutes_coordinates() {
        let x = Symbol::new("x");
        let mut point = RepresentativePoint::new();
        point.assign(x.clone(), Poly::integer(2));
        let form = Form::generator(0).scale_poly(&Poly::var(x));
        let value = point.apply(&form).expect("polynomial coefficients");
        assert_eq!(value, Form::generator(0).scale_poly(&Poly::integer(2)));
    }
}
