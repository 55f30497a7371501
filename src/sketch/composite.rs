use crate::sketch::model::{Color, CompositeMode};

/// Blends `src` onto `dst` with the given mode. `opacity` scales the source
/// alpha; both colors are straight (not premultiplied).
pub fn composite_pixel(dst: Color, src: Color, mode: CompositeMode, opacity: f32) -> Color {
    let sa = (src.a as f32 / 255.0) * opacity.clamp(0.0, 1.0);
    match mode {
        CompositeMode::Normal => source_over(dst, src, sa),
        CompositeMode::Multiply => source_over(dst, multiply_source(dst, src), sa),
        CompositeMode::Erase => destination_out(dst, sa),
    }
}

fn source_over(bottom: Color, top: Color, sa: f32) -> Color {
    let da = bottom.a as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    if out_a <= f32::EPSILON {
        return Color::TRANSPARENT;
    }

    let blend = |s: u8, d: u8| -> u8 {
        (((s as f32 * sa) + (d as f32 * da * (1.0 - sa))) / out_a)
            .round()
            .clamp(0.0, 255.0) as u8
    };

    Color {
        r: blend(top.r, bottom.r),
        g: blend(top.g, bottom.g),
        b: blend(top.b, bottom.b),
        a: to_channel(out_a),
    }
}

/// Source color after the multiply blend, weighted by how much backdrop is
/// present. Over a transparent pixel this is the source itself.
fn multiply_source(backdrop: Color, src: Color) -> Color {
    let da = backdrop.a as f32 / 255.0;
    let mix = |s: u8, b: u8| -> u8 {
        let s = s as f32;
        let product = s * b as f32 / 255.0;
        ((1.0 - da) * s + da * product).round().clamp(0.0, 255.0) as u8
    };
    Color {
        r: mix(src.r, backdrop.r),
        g: mix(src.g, backdrop.g),
        b: mix(src.b, backdrop.b),
        a: src.a,
    }
}

fn destination_out(dst: Color, sa: f32) -> Color {
    let da = dst.a as f32 / 255.0;
    let alpha = to_channel(da * (1.0 - sa));
    if alpha == 0 {
        return Color::TRANSPARENT;
    }
    Color { a: alpha, ..dst }
}

fn to_channel(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
