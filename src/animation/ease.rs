use std::f64::consts::PI;

/// Easing curves mapping normalized progress in `[0, 1]` to eased progress.
///
/// Curves follow <https://easings.net>. The elastic family overshoots, so its output is not
/// confined to `[0, 1]`, but every curve returns exactly `0` at `t = 0` and `1` at `t = 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    #[default]
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InElastic,
    OutElastic,
    InOutElastic,
    /// Caller-supplied curve.
    #[serde(skip)]
    Custom(fn(f64) -> f64),
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => t * (2.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::InElastic => {
                let c4 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    -(2f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
                }
            }
            Self::OutElastic => {
                let c4 = (2.0 * PI) / 3.0;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else {
                    2f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
                }
            }
            Self::InOutElastic => {
                let c5 = (2.0 * PI) / 4.5;
                if t == 0.0 {
                    0.0
                } else if t == 1.0 {
                    1.0
                } else if t < 0.5 {
                    -(2f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0
                } else {
                    (2f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0 + 1.0
                }
            }
            Self::Custom(f) => f(t),
        }
    }

    /// Every built-in curve, in declaration order.
    pub const BUILTIN: [Ease; 10] = [
        Ease::Linear,
        Ease::InQuad,
        Ease::OutQuad,
        Ease::InOutQuad,
        Ease::InCubic,
        Ease::OutCubic,
        Ease::InOutCubic,
        Ease::InElastic,
        Ease::OutElastic,
        Ease::InOutElastic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::InQuad => "easeInQuad",
            Self::OutQuad => "easeOutQuad",
            Self::InOutQuad => "easeInOutQuad",
            Self::InCubic => "easeInCubic",
            Self::OutCubic => "easeOutCubic",
            Self::InOutCubic => "easeInOutCubic",
            Self::InElastic => "easeInElastic",
            Self::OutElastic => "easeOutElastic",
            Self::InOutElastic => "easeInOutElastic",
            Self::Custom(_) => "custom",
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
