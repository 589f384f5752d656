//! Vegan and grounding badges, drawn right of the color/thickness
//! line. Additive: independent of the chosen variant. Vegan comes
//! first when present; grounded follows at a fixed horizontal offset.

use crate::context::RenderingContext;
use crate::draw::{Color, DrawOp, FontStyle};
use crate::record::CanonicalRecord;

/// Horizontal distance between badge slots.
const BADGE_STEP: f64 = 10.0;
/// Icon box edge length.
const BADGE_SIZE: f64 = 6.0;

/// Emit badges starting at `x`, on the text baseline `baseline`.
pub(crate) fn emit(
    record: &CanonicalRecord,
    x: f64,
    baseline: f64,
    ink: Color,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    let mut slot_x = x;
    if record.is_vegan {
        emit_badge("vegan", "V", slot_x, baseline, ink, ctx, ops);
        slot_x += BADGE_STEP;
    }
    if record.is_grounded {
        emit_badge("grounded", "G", slot_x, baseline, ink, ctx, ops);
    }
}

/// One badge: the icon resource when resolvable, a letter otherwise.
fn emit_badge(
    icon: &str,
    letter: &str,
    x: f64,
    baseline: f64,
    ink: Color,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    if ctx.resolve_logo(icon).is_some() {
        ops.push(DrawOp::Image {
            name: icon.to_string(),
            x_mm: x,
            y_mm: baseline - BADGE_SIZE + 1.0,
            w_mm: BADGE_SIZE,
            h_mm: BADGE_SIZE,
        });
    } else {
        ops.push(DrawOp::text(
            x,
            baseline,
            letter,
            FontStyle::Bold,
            18.0,
            ink,
        ));
    }
}
