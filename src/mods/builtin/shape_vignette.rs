use std::f64::consts::PI;

use kurbo::Point;

use crate::foundation::core::Image;
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::imaging::composite::composite_fill_through_mask;
use crate::imaging::mask::Mask;
use crate::mods::descriptor::{ModDescriptor, ParamSpec};
use crate::mods::params::ModParams;
use crate::mods::plugin::{ModPlugin, PluginContext};

/// Shape cut out of the vignette mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    /// Circle of radius `r`.
    Circle,
    /// Axis-aligned square with half-side `r`.
    Square,
    /// Regular triangle, apex up.
    Triangle,
    /// Diamond with vertices `r` from the center.
    Rhombus,
    /// Regular pentagon, vertex up.
    Pentagon,
    /// Regular hexagon, vertex up.
    Hexagon,
    /// Five-point star with inner radius `r/2`.
    Star,
    /// Annulus between `0.6r` and `r`.
    Ring,
    /// Parametric heart sampled every 5 degrees.
    Heart,
}

impl Shape {
    /// Every shape, in dropdown order.
    pub const ALL: [Shape; 9] = [
        Shape::Circle,
        Shape::Square,
        Shape::Triangle,
        Shape::Rhombus,
        Shape::Pentagon,
        Shape::Hexagon,
        Shape::Star,
        Shape::Ring,
        Shape::Heart,
    ];

    /// Dropdown value.
    pub fn as_str(self) -> &'static str {
        match self {
            Shape::Circle => "circle",
            Shape::Square => "square",
            Shape::Triangle => "triangle",
            Shape::Rhombus => "rhombus",
            Shape::Pentagon => "pentagon",
            Shape::Hexagon => "hexagon",
            Shape::Star => "star",
            Shape::Ring => "ring",
            Shape::Heart => "heart",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Shape::Circle => "Circle",
            Shape::Square => "Square",
            Shape::Triangle => "Triangle",
            Shape::Rhombus => "Rhombus",
            Shape::Pentagon => "Pentagon",
            Shape::Hexagon => "Hexagon",
            Shape::Star => "Star",
            Shape::Ring => "Ring",
            Shape::Heart => "Heart",
        }
    }

    /// Parse a dropdown value.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|shape| shape.as_str() == s)
    }
}

/// Catalog entry.
pub fn descriptor() -> ModDescriptor {
    let options: Vec<(&str, &str)> = Shape::ALL
        .iter()
        .map(|s| (s.label(), s.as_str()))
        .collect();
    ModDescriptor::new("shape_vignette", "Shape vignette")
        .describe("Vignette around a chosen shape with configurable size and backdrop opacity.")
        .param(ParamSpec::dropdown("shape", "Shape", &options, "circle"))
        .param(ParamSpec::slider("radius", "Shape size", 10.0, 500.0, 100.0))
        .param(ParamSpec::slider("opacity", "Backdrop opacity", 0.0, 255.0, 128.0))
}

/// Factory.
pub fn create(_: &PluginContext) -> Box<dyn ModPlugin> {
    Box::new(ShapeVignette)
}

/// Darkens everything outside a centered shape.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShapeVignette;

impl ModPlugin for ShapeVignette {
    fn apply(&self, image: Image, params: &ModParams) -> FramemodResult<Image> {
        let raw = params.choice("shape")?;
        let shape = Shape::parse(raw).ok_or_else(|| {
            FramemodError::invalid_parameter(
                params.mod_name(),
                "shape",
                format!("unknown shape '{raw}'"),
            )
        })?;
        let radius = params.number("radius")?;
        let opacity = params.int("opacity")?.clamp(0, 255) as u8;
        vignette(image, shape, radius, opacity)
    }
}

/// Composite opaque black over `image` through a mask that is `opacity` everywhere except
/// inside `shape`, where it is 0. Returns RGBA.
pub(crate) fn vignette(
    image: Image,
    shape: Shape,
    radius: f64,
    opacity: u8,
) -> FramemodResult<Image> {
    let mask = shape_mask(image.width, image.height, shape, radius, opacity);
    composite_fill_through_mask(image, [0, 0, 0, 255], &mask)
}

/// Mask of `width x height` with `shape` of size `radius` centered at `(w / 2, h / 2)`.
pub fn shape_mask(width: u32, height: u32, shape: Shape, radius: f64, opacity: u8) -> Mask {
    let mut mask = Mask::new(width, height, opacity);
    let cx = f64::from(width / 2);
    let cy = f64::from(height / 2);
    let r = radius;

    match shape {
        Shape::Circle => mask.fill_ellipse(cx - r, cy - r, cx + r, cy + r, 0),
        Shape::Square => mask.fill_rect(cx - r, cy - r, cx + r, cy + r, 0),
        Shape::Triangle => mask.fill_polygon(&regular_polygon(cx, cy, r, 3), 0),
        Shape::Rhombus => mask.fill_polygon(
            &[
                Point::new(cx, cy - r),
                Point::new(cx + r, cy),
                Point::new(cx, cy + r),
                Point::new(cx - r, cy),
            ],
            0,
        ),
        Shape::Pentagon => mask.fill_polygon(&regular_polygon(cx, cy, r, 5), 0),
        Shape::Hexagon => mask.fill_polygon(&regular_polygon(cx, cy, r, 6), 0),
        Shape::Star => {
            let points: Vec<Point> = (0..10)
                .map(|i| {
                    let rr = if i % 2 == 0 { r } else { r * 0.5 };
                    let a = 2.0 * PI * f64::from(i) / 10.0 - PI / 2.0;
                    Point::new(cx + rr * a.cos(), cy + rr * a.sin())
                })
                .collect();
            mask.fill_polygon(&points, 0);
        }
        Shape::Ring => {
            mask.fill_ellipse(cx - r, cy - r, cx + r, cy + r, 0);
            let inner = r * 0.6;
            mask.fill_ellipse(cx - inner, cy - inner, cx + inner, cy + inner, opacity);
        }
        Shape::Heart => {
            let scale = r / 16.0;
            let points: Vec<Point> = (0..360)
                .step_by(5)
                .map(|deg| {
                    let t = f64::from(deg).to_radians();
                    let x = 16.0 * t.sin().powi(3);
                    let y = 13.0 * t.cos()
                        - 5.0 * (2.0 * t).cos()
                        - 2.0 * (3.0 * t).cos()
                        - (4.0 * t).cos();
                    Point::new(cx + x * scale, cy - y * scale)
                })
                .collect();
            mask.fill_polygon(&points, 0);
        }
    }
    mask
}

fn regular_polygon(cx: f64, cy: f64, r: f64, sides: u32) -> Vec<Point> {
    (0..sides)
        .map(|i| {
            let a = 2.0 * PI * f64::from(i) / f64::from(sides) - PI / 2.0;
            Point::new(cx + r * a.cos(), cy + r * a.sin())
        })
        .collect()
}

#[cfg(test)]
#[path = "../../../tests/unit/mods/builtin/shape_vignette.rs"]
mod tests;
