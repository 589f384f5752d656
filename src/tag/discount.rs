//! Discount tag layout: the text area gets a contrasting filled
//! background, the headline row carries a "SALE -{N}%" banner, and the
//! price moves up to the color line. Text over the fill is white; the
//! percentage itself is the accent green.

use crate::context::RenderingContext;
use crate::draw::{BRIGHT_GREEN, DARK_GREEN, DrawOp, FontStyle, WHITE};
use crate::layout::LayoutParams;
use crate::record::CanonicalRecord;

use super::{COLOR_BASELINE, MODEL_BASELINE, MODEL_PT, TEXT_X};

/// Left edge of the background fill, slightly before the divider so
/// the accent line sits on the fill.
const FILL_X: f64 = 46.0;
/// Right anchor of the "-{N}%" banner text.
const BANNER_RIGHT_X: f64 = 211.0;

pub(crate) fn emit(
    record: &CanonicalRecord,
    x: f64,
    y: f64,
    params: &LayoutParams,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    let cell_h = params.cell_height_mm;
    // select() guarantees the discount is present.
    let percent = record.discount_percent.unwrap_or(0);

    // The logo strip sits outside the fill, on white paper.
    super::emit_brand_area(record, x, y, cell_h, DARK_GREEN, ctx, ops);

    ops.push(DrawOp::RectFill {
        x_mm: x + FILL_X,
        y_mm: y,
        w_mm: params.cell_width_mm - FILL_X,
        h_mm: cell_h,
        color: DARK_GREEN,
    });
    super::emit_divider(x, y, cell_h, ops);

    ops.push(DrawOp::text(
        x + TEXT_X,
        y + MODEL_BASELINE,
        record.model_name.clone(),
        FontStyle::Bold,
        MODEL_PT,
        WHITE,
    ));

    // "SALE" in white, then the percentage in accent green, both
    // right-anchored so the pair hugs the banner column.
    let pct_text = format!("-{percent}%");
    let pct_w = ctx.text_width_mm(FontStyle::Bold, MODEL_PT, &pct_text);
    ops.push(DrawOp::text_right(
        x + BANNER_RIGHT_X - pct_w - 3.0,
        y + MODEL_BASELINE,
        "SALE",
        FontStyle::SemiBold,
        MODEL_PT,
        WHITE,
    ));
    ops.push(DrawOp::text_right(
        x + BANNER_RIGHT_X,
        y + MODEL_BASELINE,
        pct_text,
        FontStyle::Bold,
        MODEL_PT,
        BRIGHT_GREEN,
    ));

    super::emit_color_line(record, x, y, WHITE, BRIGHT_GREEN, ctx, ops);
    super::emit_price(record, x, y + COLOR_BASELINE, WHITE, "shekel_white", ctx, ops);
    super::emit_store_logo(x, y, cell_h, ctx, ops);
}
