//! Tiered tag layout: the plain tag's single price is replaced by a
//! right-aligned mini table, one row per size/price tier. Row height
//! and font size shrink as the tier count grows so the table always
//! fits the fixed cell height.

use crate::context::RenderingContext;
use crate::draw::{BRIGHT_GREEN, DARK_GREEN, DrawOp, FontStyle};
use crate::layout::LayoutParams;
use crate::record::CanonicalRecord;

use super::{MODEL_BASELINE, MODEL_PT, PRICE_RIGHT_X, TEXT_X};

/// Table width, right-aligned against the price column.
const TABLE_W: f64 = 45.0;
/// Size column width; the vertical divider sits at this offset.
const SIZE_COL_W: f64 = 26.0;
/// Baseline position within a row, as a fraction of the row height.
const BASELINE_RATIO: f64 = 0.75;

/// Row height (mm) and font size (pt) per tier count. 1-2 tiers get
/// the largest rows, 3 medium, 4 the smallest.
pub(crate) fn tier_style(count: usize) -> (f64, f32) {
    match count {
        0..=2 => (9.0, 14.0),
        3 => (7.0, 11.0),
        _ => (5.5, 9.0),
    }
}

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

    let tiers = &record.size_price_tiers;
    let (row_h, font_pt) = tier_style(tiers.len());
    let table_h = row_h * tiers.len() as f64;
    let table_x = x + PRICE_RIGHT_X - TABLE_W;
    let table_top = y + (cell_h - table_h) / 2.0;

    // Column divider spanning the table height.
    ops.push(DrawOp::Line {
        x1_mm: table_x + SIZE_COL_W,
        y1_mm: table_top,
        x2_mm: table_x + SIZE_COL_W,
        y2_mm: table_top + table_h,
        width_pt: 0.75,
        color: BRIGHT_GREEN,
    });

    for (i, tier) in tiers.iter().enumerate() {
        let baseline = table_top + row_h * (i as f64 + BASELINE_RATIO);
        ops.push(DrawOp::text(
            table_x,
            baseline,
            tier.size_label.clone(),
            FontStyle::SemiBold,
            font_pt,
            DARK_GREEN,
        ));
        ops.push(DrawOp::text_right(
            x + PRICE_RIGHT_X,
            baseline,
            tier.price.display_grouped(),
            FontStyle::SemiBold,
            font_pt,
            DARK_GREEN,
        ));
    }

    super::emit_store_logo(x, y, cell_h, ctx, ops);
}
