//! Excel heating-loads report renderer
//!
//! Generates a single-sheet XLSX workbook:
//!
//! ```text
//! Sheet: Heating Loads
//! | Name     | Floor Area (m2) | Set Point (degC) | Space Heating Load (W) | +10% Design Load (W) | Design Load per m2 (W/m2) |
//! | Atrium   | 52.3            | 21               | 1834.20                | 2017.62              | 38.58                     |
//! | Office 1 | 24.4            | 21               | 123.46                 | 135.81               | 5.57                      |
//! |          |                 |                  | Total                  | =SUM(E2:E3)          | =AVERAGE(F2:F3)           |
//! ```
//!
//! The Total and Average cells are live formulas over the data-row range, so
//! the workbook stays self-consistent if a consumer edits the underlying
//! values. Formatting is driven by the `COLUMNS` spec table rather than
//! per-cell imperative calls.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use heatload_core::{HeatingReport, RenderError, ReportRenderer, SHEET_NAME};

/// Display style of a report column
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ColumnStyle {
    Text,
    /// Numeric with this many displayed decimals
    Number(u8),
}

/// Declarative per-column layout
struct ColumnSpec {
    header: &'static str,
    style: ColumnStyle,
}

/// Column layout of the report sheet, in sheet order
const COLUMNS: [ColumnSpec; 6] = [
    ColumnSpec {
        header: "Name",
        style: ColumnStyle::Text,
    },
    ColumnSpec {
        header: "Floor Area (m2)",
        style: ColumnStyle::Number(2),
    },
    ColumnSpec {
        header: "Set Point (degC)",
        style: ColumnStyle::Number(0),
    },
    ColumnSpec {
        header: "Space Heating Load (W)",
        style: ColumnStyle::Number(2),
    },
    ColumnSpec {
        header: "+10% Design Load (W)",
        style: ColumnStyle::Number(2),
    },
    ColumnSpec {
        header: "Design Load per m2 (W/m2)",
        style: ColumnStyle::Number(2),
    },
];

/// Column index carrying the "Total" label
const TOTAL_LABEL_COL: u16 = 3;
/// Column index summed in the summary row
const SUM_COL: u16 = 4;
/// Column index averaged in the summary row
const AVG_COL: u16 = 5;

fn col_letter(col: u16) -> char {
    (b'A' + col as u8) as char
}

/// Summary formulas over `n` data rows.
///
/// Data occupies sheet rows 2..=n+1 in Excel's 1-indexed, header-offset
/// addressing, so both ranges end at row n+1.
fn summary_formulas(data_rows: usize) -> (String, String) {
    let last_data_row = data_rows + 1;
    (
        format!(
            "=SUM({col}2:{col}{last_data_row})",
            col = col_letter(SUM_COL)
        ),
        format!(
            "=AVERAGE({col}2:{col}{last_data_row})",
            col = col_letter(AVG_COL)
        ),
    )
}

/// Excel heating-loads report renderer
#[derive(Clone, Debug)]
pub struct ExcelRenderer {
    /// Uniform column width applied to every column of the sheet
    pub column_width: f64,
}

impl Default for ExcelRenderer {
    fn default() -> Self {
        Self { column_width: 25.0 }
    }
}

struct ExcelFormats {
    header: Format,
    text: Format,
    number2: Format,
    number0: Format,
    total_label: Format,
    summary: Format,
}

impl ExcelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the uniform column width
    pub fn column_width(mut self, width: f64) -> Self {
        self.column_width = width;
        self
    }

    /// Generate Excel workbook bytes
    pub fn render_to_bytes(&self, report: &HeatingReport) -> Result<Vec<u8>, RenderError> {
        let mut workbook = Workbook::new();
        let formats = Self::create_formats();

        let sheet = workbook.add_worksheet();
        sheet
            .set_name(SHEET_NAME)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        // Headers
        for (col, spec) in COLUMNS.iter().enumerate() {
            sheet
                .write_with_format(0, col as u16, spec.header, &formats.header)
                .map_err(|e| RenderError::Format(e.to_string()))?;
        }

        // Uniform column width across the sheet
        for col in 0..COLUMNS.len() as u16 {
            sheet.set_column_width(col, self.column_width).ok();
        }

        // Data rows
        for (i, row) in report.rows.iter().enumerate() {
            let sheet_row = (i + 1) as u32;
            let values = [
                row.floor_area,
                row.setpoint,
                row.heating_load,
                row.design_load,
                row.design_load_per_area,
            ];

            sheet
                .write_with_format(sheet_row, 0, &row.name, &formats.text)
                .map_err(|e| RenderError::Format(e.to_string()))?;
            for (offset, value) in values.iter().enumerate() {
                let col = (offset + 1) as u16;
                let fmt = match COLUMNS[col as usize].style {
                    ColumnStyle::Number(0) => &formats.number0,
                    _ => &formats.number2,
                };
                sheet
                    .write_with_format(sheet_row, col, *value, fmt)
                    .map_err(|e| RenderError::Format(e.to_string()))?;
            }
        }

        self.write_summary_row(sheet, report.len(), &formats)?;

        workbook
            .save_to_buffer()
            .map_err(|e| RenderError::Format(format!("Failed to create Excel: {e}")))
    }

    /// Write the Total row after the last data row.
    ///
    /// The formulas come from `summary_formulas` and the row itself lands on
    /// Excel row n+2. With no data rows there is nothing to reference and
    /// static zeros are written instead of formulas.
    fn write_summary_row(
        &self,
        sheet: &mut Worksheet,
        data_rows: usize,
        formats: &ExcelFormats,
    ) -> Result<(), RenderError> {
        let summary_row = (data_rows + 1) as u32;

        sheet
            .write_with_format(summary_row, TOTAL_LABEL_COL, "Total", &formats.total_label)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        if data_rows == 0 {
            sheet
                .write_with_format(summary_row, SUM_COL, 0.0, &formats.summary)
                .map_err(|e| RenderError::Format(e.to_string()))?;
            sheet
                .write_with_format(summary_row, AVG_COL, 0.0, &formats.summary)
                .map_err(|e| RenderError::Format(e.to_string()))?;
            return Ok(());
        }

        let (sum, average) = summary_formulas(data_rows);
        sheet
            .write_formula_with_format(summary_row, SUM_COL, sum.as_str(), &formats.summary)
            .map_err(|e| RenderError::Format(e.to_string()))?;
        sheet
            .write_formula_with_format(summary_row, AVG_COL, average.as_str(), &formats.summary)
            .map_err(|e| RenderError::Format(e.to_string()))?;

        Ok(())
    }

    /// Create reusable formats
    fn create_formats() -> ExcelFormats {
        let header = Format::new().set_bold().set_align(FormatAlign::Center);

        let text = Format::new().set_align(FormatAlign::Center);

        let number2 = Format::new()
            .set_align(FormatAlign::Center)
            .set_num_format("0.00");

        let number0 = Format::new()
            .set_align(FormatAlign::Center)
            .set_num_format("0");

        let total_label = Format::new().set_bold().set_align(FormatAlign::Right);

        let summary = Format::new()
            .set_bold()
            .set_align(FormatAlign::Center)
            .set_num_format("0.00")
            .set_border_top(FormatBorder::Thin);

        ExcelFormats {
            header,
            text,
            number2,
            number0,
            total_label,
            summary,
        }
    }
}

impl ReportRenderer for ExcelRenderer {
    type Output = Vec<u8>;

    fn render(&self, report: &HeatingReport) -> Result<Vec<u8>, RenderError> {
        self.render_to_bytes(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn column_letters() {
        assert_eq!(col_letter(0), 'A');
        assert_eq!(col_letter(SUM_COL), 'E');
        assert_eq!(col_letter(AVG_COL), 'F');
    }

    #[test]
    fn summary_range_covers_header_offset_rows() {
        // N data rows occupy Excel rows 2..=N+1; both ranges end there
        let (sum, average) = summary_formulas(2);
        assert_eq!(sum, "=SUM(E2:E3)");
        assert_eq!(average, "=AVERAGE(F2:F3)");

        let (sum, average) = summary_formulas(1);
        assert_eq!(sum, "=SUM(E2:E2)");
        assert_eq!(average, "=AVERAGE(F2:F2)");

        let (sum, _) = summary_formulas(10);
        assert_eq!(sum, "=SUM(E2:E11)");
    }

    #[test]
    fn setpoint_column_is_the_only_zero_decimal_column() {
        let zero_decimal: Vec<_> = COLUMNS
            .iter()
            .enumerate()
            .filter(|(_, c)| c.style == ColumnStyle::Number(0))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(zero_decimal, vec![2]);
    }
}
