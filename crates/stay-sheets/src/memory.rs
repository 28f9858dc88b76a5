//! In-memory worksheet.
//!
//! Implements [`SheetStore`] over a plain row grid with the same positional
//! semantics as the hosted API (1-based rows, header in row 1, deletes shift
//! later rows up). Used by the loader, gateway, and action tests; also handy
//! for offline experiments.

use stay_model::RowRef;
use stay_model::schema;

use crate::error::{Result, SheetsError};
use crate::store::SheetStore;

#[derive(Debug, Clone, Default)]
pub struct MemorySheet {
    rows: Vec<Vec<String>>,
}

impl MemorySheet {
    /// An empty worksheet containing only the schema header row.
    pub fn new() -> Self {
        let header = schema::headers()
            .into_iter()
            .map(str::to_string)
            .collect();
        Self { rows: vec![header] }
    }

    /// A worksheet with the schema header followed by the given data rows.
    pub fn with_rows(data_rows: Vec<Vec<String>>) -> Self {
        let mut sheet = Self::new();
        sheet.rows.extend(data_rows);
        sheet
    }

    /// Number of rows including the header.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// The row at the given 1-based position, if present.
    pub fn row(&self, row: RowRef) -> Option<&[String]> {
        if row.0 == 0 {
            return None;
        }
        self.rows.get(row.0 - 1).map(Vec::as_slice)
    }
}

impl SheetStore for MemorySheet {
    fn read_all(&self) -> Result<Vec<Vec<String>>> {
        Ok(self.rows.clone())
    }

    fn append_row(&mut self, cells: &[String]) -> Result<()> {
        self.rows.push(cells.to_vec());
        Ok(())
    }

    fn update_cells(&mut self, row: RowRef, start_col: usize, cells: &[String]) -> Result<()> {
        if row.0 == 0 || start_col == 0 {
            return Err(SheetsError::NoSuchRow(row.0));
        }
        let target = self
            .rows
            .get_mut(row.0 - 1)
            .ok_or(SheetsError::NoSuchRow(row.0))?;
        let end = start_col - 1 + cells.len();
        if target.len() < end {
            target.resize(end, String::new());
        }
        target[start_col - 1..end].clone_from_slice(cells);
        Ok(())
    }

    fn delete_row(&mut self, row: RowRef) -> Result<()> {
        if row.0 == 0 || row.0 > self.rows.len() {
            return Err(SheetsError::NoSuchRow(row.0));
        }
        self.rows.remove(row.0 - 1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| (*value).to_string()).collect()
    }

    #[test]
    fn starts_with_header_row() {
        let sheet = MemorySheet::new();
        assert_eq!(sheet.height(), 1);
        let rows = sheet.read_all().unwrap();
        assert_eq!(rows[0][0], "No");
        assert_eq!(rows[0][1], "연도");
    }

    #[test]
    fn append_lands_after_last_row() {
        let mut sheet = MemorySheet::new();
        sheet.append_row(&cells(&["1", "2024", "홍길동"])).unwrap();
        sheet.append_row(&cells(&["2", "2024", "김철수"])).unwrap();
        assert_eq!(sheet.row(RowRef(2)).unwrap()[2], "홍길동");
        assert_eq!(sheet.row(RowRef(3)).unwrap()[2], "김철수");
    }

    #[test]
    fn update_leaves_surrounding_cells_alone() {
        let mut sheet = MemorySheet::with_rows(vec![cells(&["7", "2024", "홍길동", "010"])]);
        sheet
            .update_cells(RowRef(2), 2, &cells(&["2025", "이영희"]))
            .unwrap();
        let row = sheet.row(RowRef(2)).unwrap();
        assert_eq!(row[0], "7");
        assert_eq!(row[1], "2025");
        assert_eq!(row[2], "이영희");
        assert_eq!(row[3], "010");
    }

    #[test]
    fn update_extends_short_rows() {
        let mut sheet = MemorySheet::with_rows(vec![cells(&["1"])]);
        sheet.update_cells(RowRef(2), 3, &cells(&["x"])).unwrap();
        assert_eq!(sheet.row(RowRef(2)).unwrap(), &["1", "", "x"]);
    }

    #[test]
    fn delete_shifts_later_rows_up() {
        let mut sheet = MemorySheet::with_rows(vec![
            cells(&["1", "2024", "첫째"]),
            cells(&["2", "2024", "둘째"]),
            cells(&["3", "2024", "셋째"]),
        ]);
        sheet.delete_row(RowRef(3)).unwrap();
        assert_eq!(sheet.height(), 3);
        assert_eq!(sheet.row(RowRef(2)).unwrap()[2], "첫째");
        assert_eq!(sheet.row(RowRef(3)).unwrap()[2], "셋째");
    }

    #[test]
    fn missing_rows_error() {
        let mut sheet = MemorySheet::new();
        assert!(matches!(
            sheet.delete_row(RowRef(5)),
            Err(SheetsError::NoSuchRow(5))
        ));
        assert!(matches!(
            sheet.update_cells(RowRef(4), 2, &cells(&["x"])),
            Err(SheetsError::NoSuchRow(4))
        ));
    }
}
