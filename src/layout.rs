//! # Grid Paginator
//!
//! Places an ordered sequence of records onto fixed-size pages as a
//! grid of fixed-size cells. Coordinates are millimeters from the
//! page's top-left corner; the PDF backend converts to bottom-left
//! space when drawing.
//!
//! The algorithm is a single pass: place a cell at the cursor, advance
//! right, wrap to the next row when the next cell's right edge would
//! exceed the writable width, and start a new page when the next
//! cell's bottom edge would fall below the writable height. The wrap
//! and page-break checks are evaluated independently so a row wrap
//! never skips the page-break test. A cell that exactly fits the
//! remaining row width is placed in that row.

use serde::Serialize;

use crate::error::EtiquetaError;
use crate::record::CanonicalRecord;

const MM_PER_CM: f64 = 10.0;

/// Grid and page parameters. All dimensions in millimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutParams {
    pub page_width_mm: f64,
    pub page_height_mm: f64,
    pub cell_width_mm: f64,
    pub cell_height_mm: f64,
    pub margin_mm: f64,
    /// Extra vertical gap between rows of cells.
    pub row_gap_mm: f64,
}

impl Default for LayoutParams {
    /// Landscape A4 with the reference tag dimensions:
    /// 23.9cm x 3.4cm cells, 1cm margin, 1cm inter-row gap.
    fn default() -> Self {
        Self {
            page_width_mm: 297.0,
            page_height_mm: 210.0,
            cell_width_mm: 239.0,
            cell_height_mm: 34.0,
            margin_mm: 10.0,
            row_gap_mm: 10.0,
        }
    }
}

impl LayoutParams {
    /// Convenience constructor for the configuration surface, which is
    /// expressed in centimeters. Page size stays landscape A4.
    pub fn from_cm(cell_width: f64, cell_height: f64, margin: f64, row_gap: f64) -> Self {
        Self {
            cell_width_mm: cell_width * MM_PER_CM,
            cell_height_mm: cell_height * MM_PER_CM,
            margin_mm: margin * MM_PER_CM,
            row_gap_mm: row_gap * MM_PER_CM,
            ..Self::default()
        }
    }

    /// Reject configurations where no cell can ever fit on a page.
    pub fn validate(&self) -> Result<(), EtiquetaError> {
        if self.cell_width_mm <= 0.0 || self.cell_height_mm <= 0.0 {
            return Err(EtiquetaError::Layout(format!(
                "cell dimensions must be positive, got {}x{}mm",
                self.cell_width_mm, self.cell_height_mm
            )));
        }
        if self.cell_width_mm + self.margin_mm > self.page_width_mm {
            return Err(EtiquetaError::Layout(format!(
                "cell width {}mm + margin {}mm exceeds page width {}mm",
                self.cell_width_mm, self.margin_mm, self.page_width_mm
            )));
        }
        if self.cell_height_mm + self.margin_mm > self.page_height_mm {
            return Err(EtiquetaError::Layout(format!(
                "cell height {}mm + margin {}mm exceeds page height {}mm",
                self.cell_height_mm, self.margin_mm, self.page_height_mm
            )));
        }
        Ok(())
    }

    /// Right boundary of the region cells may occupy.
    fn writable_right(&self) -> f64 {
        self.page_width_mm - self.margin_mm
    }

    /// Bottom boundary of the region cells may occupy.
    fn writable_bottom(&self) -> f64 {
        self.page_height_mm - self.margin_mm
    }
}

/// One record placed at a cell origin (top-left, mm).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCell {
    pub record: CanonicalRecord,
    pub x_mm: f64,
    pub y_mm: f64,
}

/// One page of placed cells, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub index: usize,
    pub cells: Vec<PlacedCell>,
}

/// Transient pagination state: the next cell origin and page index.
/// Owned exclusively by [`paginate`].
struct PageCursor {
    x: f64,
    y: f64,
    page_index: usize,
}

impl PageCursor {
    fn top_left(page_index: usize, params: &LayoutParams) -> Self {
        Self {
            x: params.margin_mm,
            y: params.margin_mm,
            page_index,
        }
    }
}

/// Place every record exactly once, preserving input order.
///
/// Zero records yield zero pages; the PDF backend supplies the blank
/// page container its format requires.
pub fn paginate(records: Vec<CanonicalRecord>, params: &LayoutParams) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut cursor = PageCursor::top_left(0, params);
    let mut current = Page {
        index: 0,
        cells: Vec::new(),
    };

    for record in records {
        current.cells.push(PlacedCell {
            record,
            x_mm: cursor.x,
            y_mm: cursor.y,
        });

        cursor.x += params.cell_width_mm;

        // Row wrap: the next cell's right edge must stay inside the
        // writable width. Exact fit is inclusive.
        if cursor.x + params.cell_width_mm > params.writable_right() {
            cursor.x = params.margin_mm;
            cursor.y += params.cell_height_mm + params.row_gap_mm;
        }

        // Page break: checked independently of the wrap above.
        if cursor.y + params.cell_height_mm > params.writable_bottom() {
            let full = std::mem::replace(
                &mut current,
                Page {
                    index: cursor.page_index + 1,
                    cells: Vec::new(),
                },
            );
            pages.push(full);
            cursor = PageCursor::top_left(cursor.page_index + 1, params);
        }
    }

    if !current.cells.is_empty() {
        pages.push(current);
    }
    pages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{RawRow, normalize};
    use pretty_assertions::assert_eq;

    fn plain_records(n: usize) -> Vec<CanonicalRecord> {
        (0..n)
            .map(|i| {
                let name = format!("model-{i}");
                normalize(&RawRow::from_pairs(&[("Model", name.as_str())]))
            })
            .collect()
    }

    /// 4 cells per row, 2 rows per page (8 per page).
    fn four_by_two() -> LayoutParams {
        LayoutParams {
            page_width_mm: 100.0,
            page_height_mm: 50.0,
            cell_width_mm: 20.0,
            cell_height_mm: 15.0,
            margin_mm: 10.0,
            row_gap_mm: 0.0,
        }
    }

    #[test]
    fn test_zero_records_zero_pages() {
        assert_eq!(paginate(Vec::new(), &LayoutParams::default()), Vec::new());
    }

    #[test]
    fn test_every_record_placed_once_in_order() {
        let pages = paginate(plain_records(10), &four_by_two());
        let names: Vec<String> = pages
            .iter()
            .flat_map(|p| p.cells.iter())
            .map(|c| c.record.model_name.clone())
            .collect();
        let expected: Vec<String> = (0..10).map(|i| format!("MODEL-{i}")).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_exact_row_capacity_no_wrap() {
        // Writable width 80mm, cell 20mm: exactly 4 per row.
        let pages = paginate(plain_records(4), &four_by_two());
        assert_eq!(pages.len(), 1);
        let ys: Vec<f64> = pages[0].cells.iter().map(|c| c.y_mm).collect();
        assert_eq!(ys, vec![10.0, 10.0, 10.0, 10.0]);
        let xs: Vec<f64> = pages[0].cells.iter().map(|c| c.x_mm).collect();
        assert_eq!(xs, vec![10.0, 30.0, 50.0, 70.0]);
    }

    #[test]
    fn test_exact_page_fill_produces_exactly_k_pages() {
        // 8 cells fill one page; 16 fill exactly two, never three.
        assert_eq!(paginate(plain_records(8), &four_by_two()).len(), 1);
        assert_eq!(paginate(plain_records(16), &four_by_two()).len(), 2);
    }

    #[test]
    fn test_ten_records_split_eight_two() {
        let pages = paginate(plain_records(10), &four_by_two());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].index, 0);
        assert_eq!(pages[0].cells.len(), 8);
        assert_eq!(pages[1].index, 1);
        assert_eq!(pages[1].cells.len(), 2);

        // The overflow cells land in the top-left two slots of page 1.
        assert_eq!((pages[1].cells[0].x_mm, pages[1].cells[0].y_mm), (10.0, 10.0));
        assert_eq!((pages[1].cells[1].x_mm, pages[1].cells[1].y_mm), (30.0, 10.0));
    }

    #[test]
    fn test_row_wrap_advances_by_cell_height_plus_gap() {
        let params = LayoutParams {
            row_gap_mm: 5.0,
            page_height_mm: 100.0,
            ..four_by_two()
        };
        let pages = paginate(plain_records(5), &params);
        assert_eq!(pages.len(), 1);
        let fifth = &pages[0].cells[4];
        assert_eq!(fifth.x_mm, 10.0);
        assert_eq!(fifth.y_mm, 10.0 + 15.0 + 5.0);
    }

    #[test]
    fn test_single_cell_per_row_reference_shape() {
        // The reference tag shape: one 239mm cell per landscape A4 row.
        let params = LayoutParams::default();
        let pages = paginate(plain_records(5), &params);
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].cells.len(), 4);
        assert_eq!(pages[1].cells.len(), 1);
        assert!(pages[0].cells.iter().all(|c| c.x_mm == 10.0));
    }

    #[test]
    fn test_validate_rejects_oversized_cell() {
        let params = LayoutParams {
            cell_width_mm: 300.0,
            ..LayoutParams::default()
        };
        assert!(matches!(
            params.validate(),
            Err(EtiquetaError::Layout(_))
        ));

        let params = LayoutParams {
            cell_height_mm: 250.0,
            ..LayoutParams::default()
        };
        assert!(params.validate().is_err());
        assert!(LayoutParams::default().validate().is_ok());
    }

    #[test]
    fn test_from_cm() {
        let params = LayoutParams::from_cm(20.0, 3.5, 1.0, 0.5);
        assert_eq!(params.cell_width_mm, 200.0);
        assert_eq!(params.cell_height_mm, 35.0);
        assert_eq!(params.margin_mm, 10.0);
        assert_eq!(params.row_gap_mm, 5.0);
        // Page size stays landscape A4.
        assert_eq!(params.page_width_mm, 297.0);
        assert_eq!(params.page_height_mm, 210.0);
    }
}
