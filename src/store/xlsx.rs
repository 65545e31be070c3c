//! Xlsx-backed spreadsheet implementation
//!
//! The workbook is the durable copy; rows are mirrored in memory so the
//! title column can be consulted without re-opening the file. On open, an
//! existing workbook is read back in full, so same-day re-runs see the
//! titles persisted by earlier processes. Appending rewrites the whole
//! workbook, since the write side of the xlsx format is not incremental.

use crate::extract::ListingRecord;
use crate::store::{Spreadsheet, StoreError, StoreResult};
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

const SHEET_NAME: &str = "Listings";

const HEADERS: [&str; 9] = [
    "Title",
    "Description",
    "Phone Numbers",
    "Posted",
    "City",
    "State",
    "Distance",
    "Latitude",
    "Longitude",
];

/// Spreadsheet backed by a single .xlsx file
pub struct XlsxSheet {
    path: PathBuf,
    rows: Vec<ListingRecord>,
}

impl XlsxSheet {
    /// Opens a sheet at the given path, loading existing rows if the file
    /// is already there
    pub fn open(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        let rows = if path.exists() {
            load_rows(&path)?
        } else {
            Vec::new()
        };
        Ok(Self { path, rows })
    }

    /// Path of the destination file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_workbook(&self) -> StoreResult<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(SHEET_NAME)?;

        for (col, header) in HEADERS.iter().enumerate() {
            worksheet.write_string(0, col as u16, *header)?;
        }

        for (i, record) in self.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_string(r, 0, &record.title)?;
            worksheet.write_string(r, 1, &record.description)?;
            worksheet.write_string(r, 2, record.phone_numbers.join(", "))?;
            worksheet.write_string(r, 3, &record.posted)?;
            worksheet.write_string(r, 4, &record.city)?;
            worksheet.write_string(r, 5, &record.state)?;
            worksheet.write_number(r, 6, record.distance as f64)?;
            if let Some(latitude) = record.latitude {
                worksheet.write_number(r, 7, latitude)?;
            }
            if let Some(longitude) = record.longitude {
                worksheet.write_number(r, 8, longitude)?;
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }
}

impl Spreadsheet for XlsxSheet {
    fn exists(&self) -> bool {
        self.path.exists()
    }

    fn read_titles(&self) -> StoreResult<HashSet<String>> {
        Ok(self.rows.iter().map(|r| r.title.clone()).collect())
    }

    fn append_row(&mut self, record: &ListingRecord) -> StoreResult<()> {
        self.rows.push(record.clone());
        self.write_workbook()
    }
}

/// Reads all listing rows back from an existing workbook
fn load_rows(path: &Path) -> StoreResult<Vec<ListingRecord>> {
    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| StoreError::Read(e.to_string()))?;
    let range = workbook
        .worksheet_range(SHEET_NAME)
        .map_err(|e| StoreError::Read(e.to_string()))?;

    let mut rows = Vec::new();
    for row in range.rows().skip(1) {
        let title = match cell_string(row.first()) {
            Some(t) => t,
            None => continue,
        };
        rows.push(ListingRecord {
            title,
            description: cell_string(row.get(1)).unwrap_or_default(),
            phone_numbers: cell_string(row.get(2))
                .map(|s| s.split(", ").map(str::to_string).collect())
                .unwrap_or_default(),
            posted: cell_string(row.get(3)).unwrap_or_default(),
            city: cell_string(row.get(4)).unwrap_or_default(),
            state: cell_string(row.get(5)).unwrap_or_default(),
            distance: cell_f64(row.get(6)).unwrap_or(0.0) as u32,
            latitude: cell_f64(row.get(7)),
            longitude: cell_f64(row.get(8)),
        });
    }

    Ok(rows)
}

fn cell_string(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::String(s) if !s.is_empty() => Some(s.clone()),
        Data::String(_) | Data::Empty => None,
        other => Some(other.to_string()),
    }
}

fn cell_f64(cell: Option<&Data>) -> Option<f64> {
    match cell? {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_record(title: &str) -> ListingRecord {
        ListingRecord {
            title: title.to_string(),
            description: "Sample Description".to_string(),
            phone_numbers: vec!["123-456-7890".to_string()],
            posted: "2023-10-01".to_string(),
            city: "Los Angeles".to_string(),
            state: "CA".to_string(),
            distance: 100,
            latitude: Some(34.0522),
            longitude: Some(-118.2437),
        }
    }

    #[test]
    fn test_first_append_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xlsx");
        let mut sheet = XlsxSheet::open(&path).unwrap();

        assert!(!sheet.exists());
        sheet.append_row(&sample_record("Sample Title")).unwrap();
        assert!(sheet.exists());
    }

    #[test]
    fn test_titles_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xlsx");

        {
            let mut sheet = XlsxSheet::open(&path).unwrap();
            sheet.append_row(&sample_record("First Ad")).unwrap();
            sheet.append_row(&sample_record("Second Ad")).unwrap();
        }

        let reopened = XlsxSheet::open(&path).unwrap();
        let titles = reopened.read_titles().unwrap();
        assert_eq!(titles.len(), 2);
        assert!(titles.contains("First Ad"));
        assert!(titles.contains("Second Ad"));
    }

    #[test]
    fn test_fields_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xlsx");

        {
            let mut sheet = XlsxSheet::open(&path).unwrap();
            sheet.append_row(&sample_record("Roundtrip")).unwrap();
        }

        let reopened = XlsxSheet::open(&path).unwrap();
        let record = &reopened.rows[0];
        assert_eq!(record.description, "Sample Description");
        assert_eq!(record.phone_numbers, vec!["123-456-7890"]);
        assert_eq!(record.city, "Los Angeles");
        assert_eq!(record.distance, 100);
        assert_eq!(record.latitude, Some(34.0522));
        assert_eq!(record.longitude, Some(-118.2437));
    }

    #[test]
    fn test_missing_coordinates_stay_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.xlsx");

        {
            let mut sheet = XlsxSheet::open(&path).unwrap();
            let mut record = sample_record("No Coords");
            record.latitude = None;
            record.longitude = None;
            sheet.append_row(&record).unwrap();
        }

        let reopened = XlsxSheet::open(&path).unwrap();
        assert_eq!(reopened.rows[0].latitude, None);
        assert_eq!(reopened.rows[0].longitude, None);
    }
}
