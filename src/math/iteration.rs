use crate::complex::ComplexNumber;

/// The outcome of iterating one coordinate: either the orbit escaped after a
/// known number of steps, or it stayed bounded for the whole budget.
///
/// Both cases carry the limit they were computed under, so results from runs
/// with different budgets are never conflated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IterationResult {
    /// Escaped after `iterations` steps, `0 <= iterations < limit`.
    Finite { iterations: u32, limit: u32 },
    /// Did not escape within `limit` steps; presumed in or near the set.
    Indefinite { limit: u32 },
}

impl IterationResult {
    /// The raw escape count, or `None` if the orbit never escaped.
    pub fn iterations(&self) -> Option<u32> {
        match self {
            IterationResult::Finite { iterations, .. } => Some(*iterations),
            IterationResult::Indefinite { .. } => None,
        }
    }

    pub fn limit(&self) -> u32 {
        match self {
            IterationResult::Finite { limit, .. } | IterationResult::Indefinite { limit } => *limit,
        }
    }

    pub fn escaped(&self) -> bool {
        matches!(self, IterationResult::Finite { .. })
    }
}

/// Escape-time iteration of `z <- z^2 + c` from `z = 0`.
///
/// The bailout test runs before each update step: once `|z| > 2` the orbit is
/// guaranteed to diverge, so iteration stops there. The comparison uses the
/// squared magnitude against 4 to keep the square root out of the hot loop.
///
/// A `limit` of 0 deterministically yields `Indefinite { limit: 0 }`.
///
/// Pure and deterministic; safe to call from any number of workers at once.
pub fn escape_time(c: ComplexNumber, limit: u32) -> IterationResult {
    let mut z = ComplexNumber::ZERO;

    for iterations in 0..limit {
        if z.magnitude_squared() > 4.0 {
            return IterationResult::Finite { iterations, limit };
        }
        z = z.squared() + c;
    }

    IterationResult::Indefinite { limit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_origin_never_escapes() {
        for limit in [1, 10, 1000] {
            assert_eq!(
                escape_time(ComplexNumber::ZERO, limit),
                IterationResult::Indefinite { limit }
            );
        }
    }

    #[test]
    fn points_outside_the_bailout_radius_escape_immediately() {
        // z is still 0 on the first check, so the escape is observed one
        // update later, after z has become c.
        let c = ComplexNumber::new(-2.0, -1.5);
        assert_eq!(
            escape_time(c, 10),
            IterationResult::Finite {
                iterations: 1,
                limit: 10
            }
        );
    }

    #[test]
    fn minus_two_sits_exactly_on_the_boundary() {
        // c = -2 orbits 0 -> -2 -> 2 -> 2 -> ... and |z| never exceeds 2.
        assert_eq!(
            escape_time(ComplexNumber::new(-2.0, 0.0), 500),
            IterationResult::Indefinite { limit: 500 }
        );
    }

    #[test]
    fn escape_time_is_independent_of_the_limit() {
        // Any point that escapes within the smaller budget must report the
        // same count under a larger one.
        for x in -20..20 {
            for y in -15..15 {
                let c = ComplexNumber::new(x as f64 / 8.0, y as f64 / 8.0);
                if let IterationResult::Finite { iterations, .. } = escape_time(c, 50) {
                    assert_eq!(
                        escape_time(c, 500),
                        IterationResult::Finite {
                            iterations,
                            limit: 500
                        }
                    );
                }
            }
        }
    }

    #[test]
    fn zero_limit_is_indefinite() {
        let c = ComplexNumber::new(5.0, 5.0);
        assert_eq!(escape_time(c, 0), IterationResult::Indefinite { limit: 0 });
    }

    #[test]
    fn result_accessors() {
        let finite = IterationResult::Finite {
            iterations: 7,
            limit: 10,
        };
        let indefinite = IterationResult::Indefinite { limit: 10 };

        assert_eq!(finite.iterations(), Some(7));
        assert_eq!(finite.limit(), 10);
        assert!(finite.escaped());

        assert_eq!(indefinite.iterations(), None);
        assert_eq!(indefinite.limit(), 10);
        assert!(!indefinite.escaped());
    }
}
