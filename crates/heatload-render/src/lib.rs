//! # heatload-render
//!
//! Rendering backend for heating-load reports.
//!
//! Currently a single backend: [`ExcelRenderer`], producing the
//! "Heating Loads.xlsx" workbook described by the report layout.
//!
//! ## Example
//!
//! ```rust,ignore
//! use heatload_core::{HeatingReport, ReportRenderer};
//! use heatload_render::ExcelRenderer;
//!
//! let renderer = ExcelRenderer::new();
//! let xlsx = renderer.render(&report)?;
//! std::fs::write("Heating Loads.xlsx", xlsx)?;
//! ```

pub mod excel;

pub use excel::ExcelRenderer;
