//! # Error Types
//!
//! This module defines error types used throughout the etiqueta library.
//!
//! Only two conditions abort a generation run: a dataset that cannot be
//! parsed into rows, and layout parameters that can never fit a cell.
//! Per-field and per-resource problems are absorbed where they occur and
//! never surface as errors.

use thiserror::Error;

/// Main error type for etiqueta operations
#[derive(Debug, Error)]
pub enum EtiquetaError {
    /// The tabular blob could not be parsed into rows/columns
    #[error("CSV error: {0}")]
    Csv(String),

    /// Layout parameters that can never place a cell
    #[error("Invalid layout: {0}")]
    Layout(String),

    /// PDF document assembly error
    #[error("PDF error: {0}")]
    Pdf(String),

    /// Server-level errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
