use std::cell::Cell;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::rc::Rc;

use crate::foundation::error::{MotionError, MotionResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// 2D vector used for positions, sizes, scales and pivots.
///
/// Arithmetic helpers return new values; the `*_in_place` variants mutate and return `&mut Self`
/// so they can be chained.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vector2f {
    pub x: f64,
    pub y: f64,
}

impl Vector2f {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
    pub const ONE: Self = Self { x: 1.0, y: 1.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::ZERO
    }

    pub const fn one() -> Self {
        Self::ONE
    }

    pub fn set(&mut self, x: f64, y: f64) -> &mut Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn add_in_place(&mut self, other: Self) -> &mut Self {
        self.x += other.x;
        self.y += other.y;
        self
    }

    pub fn subtract(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn subtract_in_place(&mut self, other: Self) -> &mut Self {
        self.x -= other.x;
        self.y -= other.y;
        self
    }

    pub fn multiply(self, scalar: f64) -> Self {
        Self::new(self.x * scalar, self.y * scalar)
    }

    pub fn multiply_in_place(&mut self, scalar: f64) -> &mut Self {
        self.x *= scalar;
        self.y *= scalar;
        self
    }

    /// Component-wise product.
    pub fn scale(self, other: Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y)
    }

    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Unit vector in the same direction; the zero vector normalizes to itself.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 || !len.is_finite() {
            return Self::ZERO;
        }
        Self::new(self.x / len, self.y / len)
    }

    /// Unit vector for an angle in radians.
    pub fn from_angle(radians: f64) -> Self {
        Self::new(radians.cos(), radians.sin())
    }

    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn to_point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl Add for Vector2f {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Vector2f::add(self, rhs)
    }
}

impl AddAssign for Vector2f {
    fn add_assign(&mut self, rhs: Self) {
        self.add_in_place(rhs);
    }
}

impl Sub for Vector2f {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.subtract(rhs)
    }
}

impl SubAssign for Vector2f {
    fn sub_assign(&mut self, rhs: Self) {
        self.subtract_in_place(rhs);
    }
}

impl Mul<f64> for Vector2f {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.multiply(rhs)
    }
}

impl Neg for Vector2f {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl From<Vec2> for Vector2f {
    fn from(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }
}

impl From<Point> for Vector2f {
    fn from(p: Point) -> Self {
        Self::new(p.x, p.y)
    }
}

impl From<Vector2f> for Vec2 {
    fn from(v: Vector2f) -> Self {
        v.to_vec2()
    }
}

impl From<Vector2f> for Point {
    fn from(v: Vector2f) -> Self {
        v.to_point()
    }
}

/// Straight (non-premultiplied) RGBA8 colour.
///
/// Serialized as a CSS-like string (`"#ff5722"`, `"rgba(0, 0, 0, 0.5)"`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a float alpha in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: unit_to_u8(alpha),
            ..self
        }
    }

    pub fn is_transparent(self) -> bool {
        self.a == 0
    }

    /// Parse `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(..)`, `rgba(..)` or a basic name.
    pub fn parse(s: &str) -> MotionResult<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "black" => return Ok(Self::BLACK),
            "white" => return Ok(Self::WHITE),
            "transparent" => return Ok(Self::TRANSPARENT),
            _ => {}
        }

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| {
                MotionError::validation(format!("invalid hex colour '{s}'"))
            });
        }

        let lower = s.to_ascii_lowercase();
        let (body, has_alpha) = if let Some(b) = lower.strip_prefix("rgba(") {
            (b, true)
        } else if let Some(b) = lower.strip_prefix("rgb(") {
            (b, false)
        } else {
            return Err(MotionError::validation(format!("unknown colour '{s}'")));
        };
        let body = body
            .strip_suffix(')')
            .ok_or_else(|| MotionError::validation(format!("unterminated colour '{s}'")))?;

        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        let expected = if has_alpha { 4 } else { 3 };
        if parts.len() != expected {
            return Err(MotionError::validation(format!(
                "colour '{s}' needs {expected} components"
            )));
        }

        let channel = |p: &str| -> MotionResult<u8> {
            let v: f64 = p
                .parse()
                .map_err(|_| MotionError::validation(format!("bad colour channel '{p}'")))?;
            Ok(v.round().clamp(0.0, 255.0) as u8)
        };
        let alpha = if has_alpha {
            let v: f64 = parts[3]
                .parse()
                .map_err(|_| MotionError::validation(format!("bad alpha '{}'", parts[3])))?;
            unit_to_u8(v)
        } else {
            255
        };

        Ok(Self::rgba(
            channel(parts[0])?,
            channel(parts[1])?,
            channel(parts[2])?,
            alpha,
        ))
    }

    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

fn unit_to_u8(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

fn parse_hex(hex: &str) -> Option<Color> {
    let nibble = |c: u8| -> Option<u8> { (c as char).to_digit(16).map(|d| d as u8) };
    let bytes = hex.as_bytes();
    match bytes.len() {
        3 | 4 => {
            let mut out = [255u8; 4];
            for (i, &c) in bytes.iter().enumerate() {
                let n = nibble(c)?;
                out[i] = n * 17;
            }
            Some(Color::rgba(out[0], out[1], out[2], out[3]))
        }
        6 | 8 => {
            let mut out = [255u8; 4];
            for (i, pair) in bytes.chunks_exact(2).enumerate() {
                out[i] = nibble(pair[0])? * 16 + nibble(pair[1])?;
            }
            Some(Color::rgba(out[0], out[1], out[2], out[3]))
        }
        _ => None,
    }
}

impl TryFrom<String> for Color {
    type Error = MotionError;

    fn try_from(s: String) -> MotionResult<Self> {
        Self::parse(&s)
    }
}

impl From<Color> for String {
    fn from(c: Color) -> Self {
        c.to_hex()
    }
}

/// Per-frame time record, in seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Time {
    /// Seconds elapsed since the first frame of the driver.
    pub now: f64,
    /// Seconds since the previous frame.
    pub delta: f64,
}

/// The single writer of [`Time`]. Owned by the frame driver.
#[derive(Debug, Default)]
pub struct Clock {
    cell: Rc<Cell<Time>>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only handle shared with sequencers and draw providers.
    pub fn source(&self) -> TimeSource {
        TimeSource {
            cell: Rc::clone(&self.cell),
        }
    }

    pub fn set(&self, time: Time) {
        self.cell.set(time);
    }

    /// Move `now` to `now` and derive `delta` from the previous value.
    pub fn advance_to(&self, now: f64) -> Time {
        let prev = self.cell.get();
        let time = Time {
            now,
            delta: now - prev.now,
        };
        self.cell.set(time);
        time
    }

    pub fn get(&self) -> Time {
        self.cell.get()
    }
}

/// Read-only view of a [`Clock`]. Cloning shares the same underlying time.
#[derive(Clone, Debug)]
pub struct TimeSource {
    cell: Rc<Cell<Time>>,
}

impl TimeSource {
    pub fn get(&self) -> Time {
        self.cell.get()
    }

    pub fn now(&self) -> f64 {
        self.cell.get().now
    }

    pub fn delta(&self) -> f64 {
        self.cell.get().delta
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
