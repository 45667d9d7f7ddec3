//! Target transforms applied during training and inverted at prediction time.
//!
//! House prices are heavily right-skewed, so models are fit on
//! `log1p(price) = ln(1 + price)`. Predictions come back on that scale and must
//! be mapped through `expm1(y) = e^y - 1` to recover a price.
//!
//! Both directions use the dedicated `ln_1p` / `exp_m1` routines rather than
//! `ln(1 + x)` / `exp(y) - 1`, which lose precision near zero.

use serde::{Deserialize, Serialize};

/// Transform applied to the target before the model was fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetTransform {
    /// `ln(1 + price)`.
    #[default]
    Log1p,
    /// Model predicts prices directly.
    Identity,
}

impl TargetTransform {
    /// Map a price onto the model's target scale.
    pub fn forward(self, price: f64) -> f64 {
        match self {
            TargetTransform::Log1p => log1p(price),
            TargetTransform::Identity => price,
        }
    }

    /// Map a raw model output back to a price.
    pub fn inverse(self, output: f64) -> f64 {
        match self {
            TargetTransform::Log1p => expm1(output),
            TargetTransform::Identity => output,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TargetTransform::Log1p => "log1p",
            TargetTransform::Identity => "identity",
        }
    }
}

pub fn log1p(x: f64) -> f64 {
    x.ln_1p()
}

pub fn expm1(y: f64) -> f64 {
    y.exp_m1()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expm1_inverts_log1p() {
        for &x in &[0.0, 1e-12, 0.5, 1.0, 950.0, 125_000.0, 268_336.29, 4.2e6, 1e9] {
            let back = expm1(log1p(x));
            let tol = 1e-12 * x.max(1.0);
            assert!((back - x).abs() <= tol, "x={x} back={back}");
        }
    }

    #[test]
    fn expm1_of_known_log_price() {
        let price = expm1(12.5);
        assert!((price - 268_336.286_520_874_5).abs() < 1e-6, "got {price}");
    }

    #[test]
    fn identity_is_passthrough() {
        let t = TargetTransform::Identity;
        assert_eq!(t.inverse(t.forward(123.0)), 123.0);
    }

    #[test]
    fn log1p_is_the_default() {
        assert_eq!(TargetTransform::default(), TargetTransform::Log1p);
        let json: TargetTransform = serde_json::from_str("\"log1p\"").unwrap();
        assert_eq!(json, TargetTransform::Log1p);
    }
}
