//! # Pipeline Tests
//!
//! End-to-end coverage of the CSV-to-PDF pipeline through the public
//! API, using the empty rendering context (built-in fonts, no logos)
//! so no assets directory is needed.

use etiqueta::draw::DrawOp;
use etiqueta::layout::paginate;
use etiqueta::record::{normalize, parse_table};
use etiqueta::tag::{Variant, emit_cell};
use etiqueta::{LayoutParams, RenderingContext, generate_tags};

const SAMPLE_CSV: &str = "\
Brand,Model,Color,Price,Sole Thickness,Vegan,Grounded,Discount,Size 1,Price 1
Xero,Prio,Black,349.9,5.5,yes,,,,
Xero,HFS II,Red,1249,6.0,,true,30,,
Vivo,Primus,Olive,,4.5,,,,36-39,299
";

fn records(csv: &str) -> Vec<etiqueta::CanonicalRecord> {
    parse_table(csv).unwrap().iter().map(normalize).collect()
}

#[test]
fn test_csv_to_pdf() {
    let ctx = RenderingContext::empty();
    let pdf = generate_tags(SAMPLE_CSV, &LayoutParams::default(), &ctx).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
    assert!(pdf.ends_with(b"%%EOF") || pdf.ends_with(b"%%EOF\n"));
}

#[test]
fn test_header_only_input_yields_empty_document() {
    let ctx = RenderingContext::empty();
    let pdf = generate_tags("Model,Price\n", &LayoutParams::default(), &ctx).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_hebrew_headers_end_to_end() {
    let csv = "מותג,דגם,צבע,מחיר\nXero,Prio,שחור,349.9\n";
    let recs = records(csv);
    assert_eq!(recs[0].model_name, "PRIO");
    assert_eq!(recs[0].brand_name.as_deref(), Some("Xero"));

    let ctx = RenderingContext::empty();
    let pdf = generate_tags(csv, &LayoutParams::default(), &ctx).unwrap();
    assert!(pdf.starts_with(b"%PDF"));
}

#[test]
fn test_variant_precedence_across_sample() {
    let recs = records(SAMPLE_CSV);
    assert_eq!(Variant::select(&recs[0]), Variant::Plain);
    assert_eq!(Variant::select(&recs[1]), Variant::Discount);
    assert_eq!(Variant::select(&recs[2]), Variant::Tiered);
}

#[test]
fn test_pagination_matches_reference_sheet_capacity() {
    // The default layout places one 23.9cm cell per row, four rows per
    // A4 landscape sheet.
    let recs = records(SAMPLE_CSV);
    let pages = paginate(recs, &LayoutParams::default());
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].cells.len(), 3);

    let mut many = String::from("Model\n");
    for i in 0..9 {
        many.push_str(&format!("model-{i}\n"));
    }
    let pages = paginate(records(&many), &LayoutParams::default());
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[0].cells.len(), 4);
    assert_eq!(pages[2].cells.len(), 1);
}

#[test]
fn test_zero_records_paginate_to_zero_pages() {
    let pages = paginate(Vec::new(), &LayoutParams::default());
    assert!(pages.is_empty());
}

#[test]
fn test_every_placed_cell_emits_ops() {
    let params = LayoutParams::default();
    let ctx = RenderingContext::empty();
    let pages = paginate(records(SAMPLE_CSV), &params);

    for page in &pages {
        for cell in &page.cells {
            let mut ops = Vec::new();
            emit_cell(&cell.record, cell.x_mm, cell.y_mm, &params, &ctx, &mut ops);
            assert!(!ops.is_empty());
            // Cutting guide sits at the cell origin.
            assert!(matches!(
                ops[0],
                DrawOp::RectOutline { x_mm, y_mm, .. }
                    if x_mm == cell.x_mm && y_mm == cell.y_mm
            ));
        }
    }
}
