/// Placement of a uniformly scaled source inside a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FitGeometry {
    /// Scaled width.
    pub width: u32,
    /// Scaled height.
    pub height: u32,
    /// Left edge on the canvas.
    pub offset_x: u32,
    /// Top edge on the canvas.
    pub offset_y: u32,
}

/// Axis-aligned source region.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// Contain-fit `src` into `canvas`, centered.
///
/// Portrait and square canvases fit to width first and shrink to height if the result still
/// overflows; landscape canvases fit to height first. Scaled sizes are floored and never 0.
pub fn contain_fit(src: (u32, u32), canvas: (u32, u32)) -> FitGeometry {
    let (sw, sh) = (u64::from(src.0.max(1)), u64::from(src.1.max(1)));
    let (cw, ch) = (u64::from(canvas.0), u64::from(canvas.1));

    let fit_width = |w: u64| (w, sh * w / sw);
    let fit_height = |h: u64| (sw * h / sh, h);

    let (w, h) = if ch >= cw {
        let (w, h) = fit_width(cw);
        if h > ch { fit_height(ch) } else { (w, h) }
    } else {
        let (w, h) = fit_height(ch);
        if w > cw { fit_width(cw) } else { (w, h) }
    };
    let w = w.clamp(1, cw.max(1));
    let h = h.clamp(1, ch.max(1));

    FitGeometry {
        width: w as u32,
        height: h as u32,
        offset_x: ((cw.saturating_sub(w)) / 2) as u32,
        offset_y: ((ch.saturating_sub(h)) / 2) as u32,
    }
}

/// Largest centered region of `src` with the aspect ratio of `target` (cover-fit crop).
pub fn cover_crop(src: (u32, u32), target: (u32, u32)) -> CropRect {
    let (sw, sh) = (u64::from(src.0), u64::from(src.1));
    let (tw, th) = (u64::from(target.0.max(1)), u64::from(target.1.max(1)));
    // Compare sw/sh with tw/th without division.
    let (w, h) = if sw * th > sh * tw {
        ((sh * tw / th).max(1), sh)
    } else {
        (sw, (sw * th / tw).max(1))
    };
    CropRect {
        x: ((sw - w) / 2) as u32,
        y: ((sh - h) / 2) as u32,
        width: w as u32,
        height: h as u32,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/style/layout.rs"]
mod tests;
