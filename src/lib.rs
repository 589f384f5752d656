//! # Etiqueta - Price Tag Sheet Generator
//!
//! Etiqueta turns a CSV of shoe product records into a paginated,
//! print-ready PDF of fixed-size price tag cells. It provides:
//!
//! - **Normalization**: total mapping of raw rows (English or Hebrew
//!   headers, missing cells) to typed records
//! - **Pagination**: left-to-right, top-to-bottom grid placement with
//!   page breaks
//! - **Cell layouts**: plain, discount, and size-tiered tag variants
//! - **PDF backend**: the only module that touches `printpdf`
//!
//! ## Quick Start
//!
//! ```no_run
//! use etiqueta::{LayoutParams, RenderingContext, generate_tags};
//!
//! let csv = std::fs::read_to_string("products.csv")?;
//! let ctx = RenderingContext::load(std::path::Path::new("./assets"));
//! let pdf = generate_tags(&csv, &LayoutParams::default(), &ctx)?;
//! std::fs::write("price-tags.pdf", pdf)?;
//!
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`record`] | CSV parsing and record normalization |
//! | [`layout`] | Sheet geometry and grid pagination |
//! | [`tag`] | Per-cell content layouts |
//! | [`draw`] | Draw-op IR between cells and the backend |
//! | [`context`] | Font and logo resources |
//! | [`render`] | Pipeline entry point and PDF backend |
//! | [`server`] | HTTP upload surface |
//! | [`error`] | Error types |

pub mod context;
pub mod draw;
pub mod error;
pub mod layout;
pub mod record;
pub mod render;
pub mod server;
pub mod tag;

// Re-exports for convenience
pub use context::RenderingContext;
pub use error::EtiquetaError;
pub use layout::LayoutParams;
pub use record::CanonicalRecord;
pub use render::generate_tags;
