use crate::foundation::core::{ColorModel, Image};
use crate::foundation::error::{FramemodError, FramemodResult};
use crate::foundation::math::mul_div255_u16;
use crate::imaging::mask::Mask;

/// Blend a solid RGBA `fill` layer over `base` through `mask`: where the mask is 255 the output
/// is `fill`, where it is 0 the output is `base`. The result is RGBA.
pub fn composite_fill_through_mask(
    base: Image,
    fill: [u8; 4],
    mask: &Mask,
) -> FramemodResult<Image> {
    if (mask.width, mask.height) != base.dimensions() {
        return Err(FramemodError::validation(format!(
            "mask {}x{} does not match image {}x{}",
            mask.width, mask.height, base.width, base.height
        )));
    }
    let mut out = base.into_rgba();
    for (px, &m) in out.data.chunks_exact_mut(4).zip(mask.data.iter()) {
        if m == 0 {
            continue;
        }
        let m = u16::from(m);
        let inv = 255 - m;
        for i in 0..4 {
            let v = mul_div255_u16(u16::from(fill[i]), m) + mul_div255_u16(u16::from(px[i]), inv);
            px[i] = v.min(255) as u8;
        }
    }
    Ok(out)
}

/// Alpha-blend a straight-alpha RGBA `src` onto `dst` with its top-left corner at `(x, y)`.
///
/// `dst` must be RGB or RGBA; pixels outside `dst` are clipped. For RGBA destinations the
/// alpha channel is blended the same way as color.
pub fn blend_over(dst: &mut Image, src: &Image, x: i64, y: i64) -> FramemodResult<()> {
    if src.model != ColorModel::Rgba {
        return Err(FramemodError::validation("blend_over expects an RGBA source"));
    }
    let dc = match dst.model {
        ColorModel::Rgb => 3,
        ColorModel::Rgba => 4,
        ColorModel::Gray => {
            return Err(FramemodError::validation(
                "blend_over expects an RGB or RGBA destination",
            ));
        }
    };
    for_each_overlap(dst, src, x, y, |d_idx, s_idx, dst_data, src_data| {
        let a = u16::from(src_data[s_idx + 3]);
        if a == 0 {
            return;
        }
        let inv = 255 - a;
        for i in 0..dc {
            let s = if i < 3 { src_data[s_idx + i] } else { 255 };
            let v = mul_div255_u16(u16::from(s), a) + mul_div255_u16(u16::from(dst_data[d_idx + i]), inv);
            dst_data[d_idx + i] = v.min(255) as u8;
        }
    });
    Ok(())
}

/// Composite a premultiplied RGBA8 layer of the same size over `dst` (RGB or RGBA).
pub fn blend_premul_layer(dst: &mut Image, layer_premul: &[u8]) -> FramemodResult<()> {
    if layer_premul.len() != dst.pixel_count() * 4 {
        return Err(FramemodError::validation(
            "premultiplied layer must match destination size",
        ));
    }
    let dc = match dst.model {
        ColorModel::Rgb => 3,
        ColorModel::Rgba => 4,
        ColorModel::Gray => {
            return Err(FramemodError::validation(
                "premultiplied layers need an RGB or RGBA destination",
            ));
        }
    };
    for (d, s) in dst.data.chunks_exact_mut(dc).zip(layer_premul.chunks_exact(4)) {
        let a = u16::from(s[3]);
        if a == 0 {
            continue;
        }
        let inv = 255 - a;
        for i in 0..dc {
            let v = u16::from(s[i]) + mul_div255_u16(u16::from(d[i]), inv);
            d[i] = v.min(255) as u8;
        }
    }
    Ok(())
}

/// Copy `src` into `dst` at `(x, y)`, replacing pixels (no blending). `src` is converted to
/// `dst`'s color model first; pixels outside `dst` are clipped.
pub fn paste(dst: &mut Image, src: &Image, x: i64, y: i64) {
    let converted;
    let src = if src.model == dst.model {
        src
    } else {
        converted = src.clone().into_model(dst.model);
        &converted
    };
    let c = dst.model.channels();
    for_each_overlap(dst, src, x, y, |d_idx, s_idx, dst_data, src_data| {
        dst_data[d_idx..d_idx + c].copy_from_slice(&src_data[s_idx..s_idx + c]);
    });
}

fn for_each_overlap(
    dst: &mut Image,
    src: &Image,
    x: i64,
    y: i64,
    mut f: impl FnMut(usize, usize, &mut [u8], &[u8]),
) {
    let (dw, dh) = (i64::from(dst.width), i64::from(dst.height));
    let (sw, sh) = (i64::from(src.width), i64::from(src.height));
    let dc = dst.model.channels();
    let sc = src.model.channels();

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return;
    }
    for dy in y0..y1 {
        for dx in x0..x1 {
            let d_idx = ((dy * dw + dx) as usize) * dc;
            let s_idx = (((dy - y) * sw + (dx - x)) as usize) * sc;
            f(d_idx, s_idx, &mut dst.data, &src.data);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/imaging/composite.rs"]
mod tests;
