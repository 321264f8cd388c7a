use crate::foundation::core::{Affine, Vector2f};

/// Uniform scale plus centring offset that fits a virtual resolution inside a backing store.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Letterbox {
    pub scale: f64,
    pub offset: Vector2f,
}

impl Default for Letterbox {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vector2f::ZERO,
        }
    }
}

impl Letterbox {
    /// Largest uniform scale at which `virtual_size` fits in `backing`, centred on both axes.
    pub fn fit(backing: Vector2f, virtual_size: Vector2f) -> Self {
        if virtual_size.x <= 0.0 || virtual_size.y <= 0.0 {
            return Self::default();
        }
        let scale = (backing.x / virtual_size.x).min(backing.y / virtual_size.y);
        let offset = Vector2f::new(
            (backing.x - virtual_size.x * scale) / 2.0,
            (backing.y - virtual_size.y * scale) / 2.0,
        );
        Self { scale, offset }
    }

    /// Virtual units to backing pixels.
    pub fn transform(&self) -> Affine {
        Affine::new([
            self.scale,
            0.0,
            0.0,
            self.scale,
            self.offset.x,
            self.offset.y,
        ])
    }

    /// Backing pixels to virtual units.
    pub fn to_virtual(&self, real: Vector2f) -> Vector2f {
        if self.scale == 0.0 {
            return real;
        }
        Vector2f::new(
            (real.x - self.offset.x) / self.scale,
            (real.y - self.offset.y) / self.scale,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/driver/letterbox.rs"]
mod tests;
