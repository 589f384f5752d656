//! # PDF Backend
//!
//! Runs the full pipeline (parse, normalize, paginate, emit cells) and
//! realizes the resulting [`DrawOp`] sheets as a PDF byte buffer.
//!
//! This is the only module that talks to `printpdf`. Draw ops arrive in
//! top-left millimeter coordinates; the flip to the PDF's bottom-left
//! space happens here and nowhere else.

use printpdf::path::{PaintMode, WindingOrder};
use printpdf::{
    BuiltinFont, Cmyk, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject,
    IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Polygon, Px, Rgb,
};
use std::collections::HashMap;
use std::io::{BufWriter, Cursor};

use crate::context::RenderingContext;
use crate::draw::{Color, DrawOp, FontStyle, TextAnchor};
use crate::error::EtiquetaError;
use crate::layout::{LayoutParams, paginate};
use crate::record::{normalize, parse_table};
use crate::tag::emit_cell;

/// Convert a CSV document into a finished PDF.
///
/// Validates the layout, normalizes every data row, paginates, emits
/// the per-cell draw ops, and renders them. Zero data rows still yield
/// a valid (single blank page) document.
pub fn generate_tags(
    csv_text: &str,
    params: &LayoutParams,
    ctx: &RenderingContext,
) -> Result<Vec<u8>, EtiquetaError> {
    params.validate()?;

    let records: Vec<_> = parse_table(csv_text)?.iter().map(normalize).collect();
    let pages = paginate(records, params);

    let sheets: Vec<Vec<DrawOp>> = pages
        .iter()
        .map(|page| {
            let mut ops = Vec::new();
            for cell in &page.cells {
                emit_cell(&cell.record, cell.x_mm, cell.y_mm, params, ctx, &mut ops);
            }
            ops
        })
        .collect();

    render_pdf(&sheets, params, ctx)
}

/// Render draw-op sheets into PDF bytes, one sheet per page.
pub fn render_pdf(
    sheets: &[Vec<DrawOp>],
    params: &LayoutParams,
    ctx: &RenderingContext,
) -> Result<Vec<u8>, EtiquetaError> {
    let page_w = params.page_width_mm as f32;
    let page_h = params.page_height_mm as f32;

    let (doc, page1, layer1) = PdfDocument::new("Price Tags", Mm(page_w), Mm(page_h), "Layer 1");
    let fonts = load_fonts(&doc, ctx)?;

    for (i, ops) in sheets.iter().enumerate() {
        let layer = if i == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page, layer) = doc.add_page(Mm(page_w), Mm(page_h), "Layer 1");
            doc.get_page(page).get_layer(layer)
        };
        for op in ops {
            draw_op(&layer, op, page_h, ctx, &fonts);
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|e| EtiquetaError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| EtiquetaError::Pdf(e.to_string()))
}

/// Embed the context's TTF fonts, falling back to the built-in
/// Helvetica faces for styles without a loaded file.
fn load_fonts(
    doc: &printpdf::PdfDocumentReference,
    ctx: &RenderingContext,
) -> Result<HashMap<FontStyle, IndirectFontRef>, EtiquetaError> {
    let styles = [
        (FontStyle::Regular, BuiltinFont::Helvetica),
        (FontStyle::SemiBold, BuiltinFont::HelveticaBold),
        (FontStyle::Bold, BuiltinFont::HelveticaBold),
    ];

    let mut fonts = HashMap::new();
    for (style, builtin) in styles {
        let font = match ctx.font_bytes(style) {
            Some(bytes) => doc
                .add_external_font(Cursor::new(bytes))
                .map_err(|e| EtiquetaError::Pdf(e.to_string()))?,
            None => doc
                .add_builtin_font(builtin)
                .map_err(|e| EtiquetaError::Pdf(e.to_string()))?,
        };
        fonts.insert(style, font);
    }
    Ok(fonts)
}

fn draw_op(
    layer: &PdfLayerReference,
    op: &DrawOp,
    page_h: f32,
    ctx: &RenderingContext,
    fonts: &HashMap<FontStyle, IndirectFontRef>,
) {
    match op {
        DrawOp::Text {
            x_mm,
            y_mm,
            content,
            style,
            size_pt,
            color,
            anchor,
        } => {
            let width = ctx.text_width_mm(*style, *size_pt, content);
            let x = match anchor {
                TextAnchor::Left => *x_mm,
                TextAnchor::Center => x_mm - width / 2.0,
                TextAnchor::Right => x_mm - width,
            };
            layer.set_fill_color(pdf_color(*color));
            layer.use_text(
                content,
                *size_pt,
                Mm(x as f32),
                Mm(page_h - *y_mm as f32),
                &fonts[style],
            );
        }

        DrawOp::Line {
            x1_mm,
            y1_mm,
            x2_mm,
            y2_mm,
            width_pt,
            color,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*width_pt);
            layer.add_line(Line {
                points: vec![
                    point(*x1_mm, *y1_mm, page_h),
                    point(*x2_mm, *y2_mm, page_h),
                ],
                is_closed: false,
            });
        }

        DrawOp::RectOutline {
            x_mm,
            y_mm,
            w_mm,
            h_mm,
            width_pt,
            color,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*width_pt);
            layer.add_line(Line {
                points: rect_corners(*x_mm, *y_mm, *w_mm, *h_mm, page_h),
                is_closed: true,
            });
        }

        DrawOp::RectFill {
            x_mm,
            y_mm,
            w_mm,
            h_mm,
            color,
        } => {
            layer.set_fill_color(pdf_color(*color));
            layer.add_polygon(Polygon {
                rings: vec![rect_corners(*x_mm, *y_mm, *w_mm, *h_mm, page_h)],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
        }

        DrawOp::Image {
            name,
            x_mm,
            y_mm,
            w_mm,
            h_mm,
        } => {
            let Some(img) = ctx.resolve_logo(name) else {
                eprintln!("[render] Image {name:?} not loaded, skipping");
                return;
            };
            place_image(layer, img, *x_mm, *y_mm, *w_mm, *h_mm, page_h);
        }
    }
}

fn point(x_mm: f64, y_mm: f64, page_h: f32) -> (Point, bool) {
    (Point::new(Mm(x_mm as f32), Mm(page_h - y_mm as f32)), false)
}

fn rect_corners(x: f64, y: f64, w: f64, h: f64, page_h: f32) -> Vec<(Point, bool)> {
    vec![
        point(x, y, page_h),
        point(x + w, y, page_h),
        point(x + w, y + h, page_h),
        point(x, y + h, page_h),
    ]
}

fn pdf_color(color: Color) -> printpdf::Color {
    match color {
        Color::Rgb(r, g, b) => printpdf::Color::Rgb(Rgb::new(r, g, b, None)),
        Color::Cmyk(c, m, y, k) => printpdf::Color::Cmyk(Cmyk::new(c, m, y, k, None)),
    }
}

/// Embed an image aspect-fit and centered inside its bounding box.
///
/// Transparency is composited against white first, since the tags are
/// printed on white stock. The physical size is controlled through the
/// DPI of the placed XObject.
fn place_image(
    layer: &PdfLayerReference,
    img: &image::DynamicImage,
    x_mm: f64,
    y_mm: f64,
    w_mm: f64,
    h_mm: f64,
    page_h: f32,
) {
    let rgba = img.to_rgba8();
    let (width_px, height_px) = rgba.dimensions();
    if width_px == 0 || height_px == 0 {
        return;
    }

    let mut rgb = image::RgbImage::new(width_px, height_px);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let image::Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)) as u8;
        rgb.put_pixel(x, y, image::Rgb([blend(r), blend(g), blend(b)]));
    }

    let aspect = width_px as f64 / height_px as f64;
    let (final_w, final_h) = if w_mm / h_mm > aspect {
        (h_mm * aspect, h_mm)
    } else {
        (w_mm, w_mm / aspect)
    };

    // Center within the box; translate targets the bottom-left corner.
    let x = x_mm + (w_mm - final_w) / 2.0;
    let y_top = y_mm + (h_mm - final_h) / 2.0;
    let y_pdf = page_h as f64 - (y_top + final_h);
    let dpi = width_px as f32 / (final_w as f32 / 25.4);

    Image::from(ImageXObject {
        width: Px(width_px as usize),
        height: Px(height_px as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: rgb.into_raw(),
        image_filter: None,
        clipping_bbox: None,
        smask: None,
    })
    .add_to_layer(
        layer.clone(),
        ImageTransform {
            translate_x: Some(Mm(x as f32)),
            translate_y: Some(Mm(y_pdf as f32)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(csv: &str) -> Vec<u8> {
        let ctx = RenderingContext::empty();
        generate_tags(csv, &LayoutParams::default(), &ctx).unwrap()
    }

    #[test]
    fn test_csv_to_pdf_bytes() {
        let bytes = pdf("Model,Color,Price\nprio,black,349.9\n");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_empty_table_still_produces_document() {
        let bytes = pdf("Model,Color,Price\n");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_invalid_layout_rejected_before_rendering() {
        let ctx = RenderingContext::empty();
        let params = LayoutParams {
            cell_width_mm: 0.0,
            ..LayoutParams::default()
        };
        let err = generate_tags("Model\nprio\n", &params, &ctx).unwrap_err();
        assert!(matches!(err, EtiquetaError::Layout(_)));
    }

    #[test]
    fn test_multi_page_input_renders() {
        // Default layout fits 4 cells per page; 9 records span 3 pages.
        let mut csv = String::from("Model,Price\n");
        for i in 0..9 {
            csv.push_str(&format!("model-{i},19{i}\n"));
        }
        assert!(pdf(&csv).starts_with(b"%PDF"));
    }

    #[test]
    fn test_image_ops_render_when_logo_loaded() {
        let mut ctx = RenderingContext::empty();
        ctx.insert_logo("xero", image::DynamicImage::new_rgb8(4, 2));
        let csv = "Brand,Model,Price\nXero,prio,349.9\n";
        let bytes = generate_tags(csv, &LayoutParams::default(), &ctx).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
