use kurbo::{BezPath, Point, Shape as _};

/// Single-channel 8-bit coverage mask. Drawing is aliased: a pixel is inside a shape when its
/// center is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// One byte per pixel, row-major.
    pub data: Vec<u8>,
}

impl Mask {
    /// Mask filled with `value`.
    pub fn new(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            data: vec![value; width as usize * height as usize],
        }
    }

    /// Value at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Fill the ellipse inscribed in the inclusive pixel box `[x0, x1] x [y0, y1]`.
    pub fn fill_ellipse(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, value: u8) {
        let cx = (x0 + x1 + 1.0) / 2.0;
        let cy = (y0 + y1 + 1.0) / 2.0;
        let rx = (x1 - x0 + 1.0) / 2.0;
        let ry = (y1 - y0 + 1.0) / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        self.fill_where(x0, y0, x1 + 1.0, y1 + 1.0, value, |p| {
            let dx = (p.x - cx) / rx;
            let dy = (p.y - cy) / ry;
            dx * dx + dy * dy <= 1.0
        });
    }

    /// Fill the inclusive pixel box `[x0, x1] x [y0, y1]`.
    pub fn fill_rect(&mut self, x0: f64, y0: f64, x1: f64, y1: f64, value: u8) {
        self.fill_where(x0, y0, x1 + 1.0, y1 + 1.0, value, |p| {
            p.x >= x0 && p.x <= x1 + 1.0 && p.y >= y0 && p.y <= y1 + 1.0
        });
    }

    /// Fill a closed polygon (non-zero winding).
    pub fn fill_polygon(&mut self, points: &[Point], value: u8) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        let mut path = BezPath::new();
        path.move_to(*first);
        for p in rest {
            path.line_to(*p);
        }
        path.close_path();

        let bbox = path.bounding_box();
        self.fill_where(bbox.x0, bbox.y0, bbox.x1, bbox.y1, value, |p| path.contains(p));
    }

    fn fill_where(
        &mut self,
        x0: f64,
        y0: f64,
        x1: f64,
        y1: f64,
        value: u8,
        inside: impl Fn(Point) -> bool,
    ) {
        let w = self.width as i64;
        let h = self.height as i64;
        let px0 = (x0.floor() as i64).clamp(0, w);
        let py0 = (y0.floor() as i64).clamp(0, h);
        let px1 = (x1.ceil() as i64).clamp(0, w);
        let py1 = (y1.ceil() as i64).clamp(0, h);
        for y in py0..py1 {
            for x in px0..px1 {
                if inside(Point::new(x as f64 + 0.5, y as f64 + 0.5)) {
                    self.data[(y * w + x) as usize] = value;
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/mask.rs"]
mod tests;
