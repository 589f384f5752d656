//! # Price Tag Cell Renderers
//!
//! Turns one [`CanonicalRecord`] plus a cell origin into positioned
//! [`DrawOp`]s. Three layouts exist; the decision table is evaluated
//! top to bottom, first match wins:
//!
//! 1. discount present → [`Variant::Discount`] (SALE banner, filled
//!    background treatment)
//! 2. size/price tiers present → [`Variant::Tiered`] (right-aligned
//!    mini price table)
//! 3. otherwise → [`Variant::Plain`]
//!
//! Vegan/grounded badges are additive and independent of the variant.
//! Resource lookups degrade: a brand without a logo renders its name
//! as text in the logo's reserved area, a missing currency icon
//! becomes a "₪" glyph. No lookup failure ever aborts a cell.
//!
//! Geometry follows the reference tag: a 4.9cm logo strip on the left,
//! a bright-green divider, headline text from 5.6cm, price anchored at
//! 20.5cm, store mark at 21.7cm.

mod badges;
mod discount;
mod plain;
mod tiered;

use crate::context::RenderingContext;
use crate::draw::{BLACK, BRIGHT_GREEN, Color, DrawOp, FontStyle};
use crate::layout::LayoutParams;
use crate::record::CanonicalRecord;

// Cell-local geometry, mm from the cell's top-left corner.
pub(crate) const LOGO_AREA_W: f64 = 49.0;
pub(crate) const LOGO_MAX_W: f64 = 42.0;
pub(crate) const TEXT_X: f64 = 56.0;
pub(crate) const MODEL_BASELINE: f64 = 14.0;
pub(crate) const COLOR_BASELINE: f64 = 25.5;
pub(crate) const PRICE_RIGHT_X: f64 = 205.0;
pub(crate) const STORE_LOGO_X: f64 = 217.0;
pub(crate) const STORE_LOGO_SIZE: f64 = 21.0;

pub(crate) const MODEL_PT: f32 = 25.0;
pub(crate) const BODY_PT: f32 = 18.0;

/// The content layout chosen for a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Plain,
    Discount,
    Tiered,
}

impl Variant {
    /// Decision table, first match wins. A record with both a discount
    /// and tiers renders as the discount variant.
    pub fn select(record: &CanonicalRecord) -> Self {
        if record.discount_percent.is_some() {
            Variant::Discount
        } else if !record.size_price_tiers.is_empty() {
            Variant::Tiered
        } else {
            Variant::Plain
        }
    }
}

/// Compose the draw ops for one record at one cell origin.
pub fn emit_cell(
    record: &CanonicalRecord,
    x: f64,
    y: f64,
    params: &LayoutParams,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    // Cutting guide around the whole cell.
    ops.push(DrawOp::RectOutline {
        x_mm: x,
        y_mm: y,
        w_mm: params.cell_width_mm,
        h_mm: params.cell_height_mm,
        width_pt: 0.5,
        color: BLACK,
    });

    match Variant::select(record) {
        Variant::Plain => plain::emit(record, x, y, params, ctx, ops),
        Variant::Discount => discount::emit(record, x, y, params, ctx, ops),
        Variant::Tiered => tiered::emit(record, x, y, params, ctx, ops),
    }
}

/// Brand logo area (0 to 4.9cm): the logo image when resolvable,
/// otherwise the brand name as text centered in the reserved area.
pub(crate) fn emit_brand_area(
    record: &CanonicalRecord,
    x: f64,
    y: f64,
    cell_h: f64,
    ink: Color,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    let Some(brand) = record.brand_name.as_deref() else {
        return;
    };

    if ctx.resolve_logo(brand).is_some() {
        ops.push(DrawOp::Image {
            name: brand.to_lowercase(),
            x_mm: x + (LOGO_AREA_W - LOGO_MAX_W) / 2.0,
            y_mm: y + 3.0,
            w_mm: LOGO_MAX_W,
            h_mm: cell_h - 6.0,
        });
    } else {
        ops.push(DrawOp::Text {
            x_mm: x + LOGO_AREA_W / 2.0,
            y_mm: y + cell_h / 2.0 + 2.0,
            content: brand.to_string(),
            style: FontStyle::Bold,
            size_pt: 16.0,
            color: ink,
            anchor: crate::draw::TextAnchor::Center,
        });
    }
}

/// Vertical accent line separating the logo strip from the text area.
pub(crate) fn emit_divider(x: f64, y: f64, cell_h: f64, ops: &mut Vec<DrawOp>) {
    ops.push(DrawOp::Line {
        x1_mm: x + LOGO_AREA_W,
        y1_mm: y + 6.5,
        x2_mm: x + LOGO_AREA_W,
        y2_mm: y + cell_h - 6.5,
        width_pt: 1.0,
        color: BRIGHT_GREEN,
    });
}

/// Color and sole-thickness line below the model name, followed by the
/// additive badges. Returns nothing; badge placement is computed from
/// the measured text widths.
pub(crate) fn emit_color_line(
    record: &CanonicalRecord,
    x: f64,
    y: f64,
    ink: Color,
    badge_ink: Color,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    let baseline = y + COLOR_BASELINE;
    ops.push(DrawOp::text(
        x + TEXT_X,
        baseline,
        record.color.clone(),
        FontStyle::SemiBold,
        BODY_PT,
        ink,
    ));

    let color_w = ctx.text_width_mm(FontStyle::SemiBold, BODY_PT, &record.color);
    let thickness_text = format!("{}mm", record.sole_thickness_mm.display_fixed1());
    let thickness_x = x + TEXT_X + color_w + 4.0;
    ops.push(DrawOp::text(
        thickness_x,
        baseline,
        thickness_text.clone(),
        FontStyle::Regular,
        BODY_PT,
        ink,
    ));

    let thickness_w = ctx.text_width_mm(FontStyle::Regular, BODY_PT, &thickness_text);
    badges::emit(record, thickness_x + thickness_w + 5.0, baseline, badge_ink, ctx, ops);
}

/// Price with the currency mark to its left, right-anchored at the
/// price column. The shekel icon resource degrades to a "₪" glyph.
pub(crate) fn emit_price(
    record: &CanonicalRecord,
    x: f64,
    baseline: f64,
    ink: Color,
    icon_name: &str,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    let price_text = record.price.display_grouped();
    let price_w = ctx.text_width_mm(FontStyle::SemiBold, BODY_PT, &price_text);
    let price_right = x + PRICE_RIGHT_X;

    ops.push(DrawOp::text_right(
        price_right,
        baseline,
        price_text,
        FontStyle::SemiBold,
        BODY_PT,
        ink,
    ));

    if ctx.resolve_logo(icon_name).is_some() {
        ops.push(DrawOp::Image {
            name: icon_name.to_lowercase(),
            x_mm: price_right - price_w - 5.7,
            y_mm: baseline - 3.5,
            w_mm: 4.2,
            h_mm: 3.5,
        });
    } else {
        ops.push(DrawOp::text_right(
            price_right - price_w - 1.5,
            baseline,
            "₪",
            FontStyle::Regular,
            BODY_PT,
            ink,
        ));
    }
}

/// Store mark in the right-hand reserved strip. Omitted when the
/// resource is missing.
pub(crate) fn emit_store_logo(
    x: f64,
    y: f64,
    cell_h: f64,
    ctx: &RenderingContext,
    ops: &mut Vec<DrawOp>,
) {
    if ctx.resolve_logo("store").is_some() {
        ops.push(DrawOp::Image {
            name: "store".to_string(),
            x_mm: x + STORE_LOGO_X,
            y_mm: y + (cell_h - STORE_LOGO_SIZE) / 2.0,
            w_mm: STORE_LOGO_SIZE,
            h_mm: STORE_LOGO_SIZE,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RawRow, normalize};
    use pretty_assertions::assert_eq;

    fn record(pairs: &[(&str, &str)]) -> CanonicalRecord {
        normalize(&RawRow::from_pairs(pairs))
    }

    fn emit(record: &CanonicalRecord) -> Vec<DrawOp> {
        let params = LayoutParams::default();
        let ctx = RenderingContext::empty();
        let mut ops = Vec::new();
        emit_cell(record, 10.0, 10.0, &params, &ctx, &mut ops);
        ops
    }

    fn texts(ops: &[DrawOp]) -> Vec<&str> {
        ops.iter()
            .filter_map(|op| match op {
                DrawOp::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_variant_selection() {
        assert_eq!(Variant::select(&record(&[])), Variant::Plain);
        assert_eq!(
            Variant::select(&record(&[("Discount", "30")])),
            Variant::Discount
        );
        assert_eq!(
            Variant::select(&record(&[("Size 1", "36-39"), ("Price 1", "299")])),
            Variant::Tiered
        );
    }

    #[test]
    fn test_discount_wins_over_tiers() {
        let rec = record(&[
            ("Discount", "30"),
            ("Size 1", "36-39"),
            ("Price 1", "299"),
        ]);
        assert_eq!(Variant::select(&rec), Variant::Discount);

        // The emitted cell carries the banner, not the tier table.
        let ops = emit(&rec);
        assert!(texts(&ops).contains(&"-30%"));
        assert!(!texts(&ops).contains(&"36-39"));
    }

    #[test]
    fn test_unresolvable_logo_degrades_to_brand_text() {
        let ops = emit(&record(&[("Brand", "Xero"), ("Model", "prio")]));
        assert!(texts(&ops).contains(&"Xero"));
        assert!(!ops.iter().any(|op| matches!(op, DrawOp::Image { .. })));
    }

    #[test]
    fn test_resolvable_logo_emits_image_op() {
        let rec = record(&[("Brand", "Xero")]);
        let params = LayoutParams::default();
        let mut ctx = RenderingContext::empty();
        ctx.insert_logo("xero", image::DynamicImage::new_rgb8(2, 2));
        let mut ops = Vec::new();
        emit_cell(&rec, 0.0, 0.0, &params, &ctx, &mut ops);

        assert!(
            ops.iter()
                .any(|op| matches!(op, DrawOp::Image { name, .. } if name == "xero"))
        );
        assert!(!texts(&ops).contains(&"Xero"));
    }

    #[test]
    fn test_every_cell_has_cutting_guide() {
        for rec in [
            record(&[]),
            record(&[("Discount", "10")]),
            record(&[("Size 1", "36"), ("Price 1", "299")]),
        ] {
            let ops = emit(&rec);
            assert!(
                matches!(ops[0], DrawOp::RectOutline { x_mm, y_mm, .. }
                    if x_mm == 10.0 && y_mm == 10.0)
            );
        }
    }

    #[test]
    fn test_currency_glyph_fallback() {
        let ops = emit(&record(&[("Price", "349.9")]));
        assert!(texts(&ops).contains(&"₪"));
        assert!(texts(&ops).contains(&"349.90"));
    }
}
