//! Plain tag layout: brand area, model headline, color/thickness line
//! with badges, single price at the vertical center of the price
//! column, store mark.

use crate::context::RenderingContext;
use crate::draw::{BRIGHT_GREEN, DARK_GREEN, DrawOp, FontStyle};
use crate::layout::LayoutParams;
use crate::record::CanonicalRecord;

use super::{MODEL_BASELINE, MODEL_PT, TEXT_X};

pub(crate) fn emit(
    record: &CanonicalRecord,
    x: f64,
    y: f64,
    params: &LayoutParams,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    let cell_h = params.cell_height_mm;

    super::emit_brand_area(record, x, y, cell_h, DARK_GREEN, ctx, ops);
    super::emit_divider(x, y, cell_h, ops);

    ops.push(DrawOp::text(
        x + TEXT_X,
        y + MODEL_BASELINE,
        record.model_name.clone(),
        FontStyle::Bold,
        MODEL_PT,
        DARK_GREEN,
    ));

    super::emit_color_line(record, x, y, DARK_GREEN, BRIGHT_GREEN, ctx, ops);
    super::emit_price(record, x, y + cell_h / 2.0 + 2.0, DARK_GREEN, "shekel", ctx, ops);
    super::emit_store_logo(x, y, cell_h, ctx, ops);
}
