/// Linear mapping from the domain `[a1, a2]` onto the range `[b1, b2]`.
/// Inputs outside the domain map to the nearest range endpoint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearFunction {
    pub a1: f64,
    pub a2: f64,
    pub b1: f64,
    pub b2: f64,
}

impl LinearFunction {
    pub fn new(a1: f64, a2: f64, b1: f64, b2: f64) -> Self {
        Self { a1, a2, b1, b2 }
    }

    pub fn evaluate(&self, a: f64) -> f64 {
        // Degenerate domain: every input is the first endpoint
        if self.a1 == self.a2 {
            return self.b1;
        }
        let b = self.b1 + (a - self.a1) * (self.b2 - self.b1) / (self.a2 - self.a1);
        let (lo, hi) = if self.b1 <= self.b2 { (self.b1, self.b2) } else { (self.b2, self.b1) };
        b.clamp(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn maps_endpoints_and_midpoint() {
        let f = LinearFunction::new(0.0, 10.0, 100.0, 200.0);
        assert_relative_eq!(f.evaluate(0.0), 100.0);
        assert_relative_eq!(f.evaluate(10.0), 200.0);
        assert_relative_eq!(f.evaluate(5.0), 150.0);
    }

    #[test]
    fn clamps_and_handles_descending_range() {
        let f = LinearFunction::new(0.0, 1.0, 255.0, 0.0);
        assert_relative_eq!(f.evaluate(-1.0), 255.0);
        assert_relative_eq!(f.evaluate(2.0), 0.0);
        assert_relative_eq!(f.evaluate(0.5), 127.5);
    }

    #[test]
    fn degenerate_domain_returns_first_endpoint() {
        let f = LinearFunction::new(3.0, 3.0, 7.0, 9.0);
        assert_eq!(f.evaluate(100.0), 7.0);
    }
}
