//! In-memory workbook store shared by the spreadsheet tools.
//!
//! One `WorkbookManager` instance backs the whole toolkit; tools hold an
//! `Arc` to it. State lives for the process only.

use std::collections::BTreeMap;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::SheetToolError;

/// Name given to the sheet every new spreadsheet starts with
pub const DEFAULT_SHEET: &str = "Sheet1";

/// One cell: a value and an optional note
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cell {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A single sheet: cells keyed by normalized A1 reference
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sheet {
    pub cells: BTreeMap<String, Cell>,
}

/// A spreadsheet with one or more named sheets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spreadsheet {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sheets: BTreeMap<String, Sheet>,
}

/// Title and shape of a spreadsheet, without cell contents
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadsheetMetadata {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub sheet_names: Vec<String>,
    pub cell_count: usize,
}

impl Spreadsheet {
    fn new(title: String) -> Self {
        let now = Utc::now();
        let mut sheets = BTreeMap::new();
        sheets.insert(DEFAULT_SHEET.to_string(), Sheet::default());
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            created_at: now,
            updated_at: now,
            sheets,
        }
    }

    fn metadata(&self) -> SpreadsheetMetadata {
        SpreadsheetMetadata {
            id: self.id.clone(),
            title: self.title.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            sheet_names: self.sheets.keys().cloned().collect(),
            cell_count: self.sheets.values().map(|s| s.cells.len()).sum(),
        }
    }
}

/// Normalize a cell reference to uppercase A1 notation.
///
/// Accepts one to three column letters followed by a row number of at least 1.
pub fn normalize_cell_ref(reference: &str) -> Result<String, SheetToolError> {
    let trimmed = reference.trim();
    let letters: String = trimmed
        .chars()
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    let digits = &trimmed[letters.len()..];

    if letters.is_empty() || letters.len() > 3 || digits.is_empty() {
        return Err(SheetToolError::InvalidCellRef(reference.to_string()));
    }

    let row: u32 = digits
        .parse()
        .map_err(|_| SheetToolError::InvalidCellRef(reference.to_string()))?;
    if row == 0 {
        return Err(SheetToolError::InvalidCellRef(reference.to_string()));
    }

    Ok(format!("{}{}", letters.to_ascii_uppercase(), row))
}

/// Manages the in-memory workbooks all spreadsheet tools operate on
#[derive(Default)]
pub struct WorkbookManager {
    spreadsheets: RwLock<HashMap<String, Spreadsheet>>,
}

impl WorkbookManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a spreadsheet and return its metadata
    pub fn create(&self, title: &str) -> Result<SpreadsheetMetadata, SheetToolError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(SheetToolError::EmptyTitle);
        }

        let spreadsheet = Spreadsheet::new(title.to_string());
        let metadata = spreadsheet.metadata();
        self.spreadsheets
            .write()
            .insert(spreadsheet.id.clone(), spreadsheet);
        Ok(metadata)
    }

    /// Write a value into one cell, creating the cell if needed
    pub fn write_cell(
        &self,
        spreadsheet_id: &str,
        sheet: Option<&str>,
        reference: &str,
        value: &str,
    ) -> Result<String, SheetToolError> {
        let reference = normalize_cell_ref(reference)?;
        self.with_sheet_mut(spreadsheet_id, sheet, |target| {
            target.cells.entry(reference.clone()).or_default().value = value.to_string();
        })?;
        Ok(reference)
    }

    /// Attach a note to a cell, creating an empty cell if needed
    pub fn add_note(
        &self,
        spreadsheet_id: &str,
        sheet: Option<&str>,
        reference: &str,
        note: &str,
    ) -> Result<String, SheetToolError> {
        let reference = normalize_cell_ref(reference)?;
        self.with_sheet_mut(spreadsheet_id, sheet, |target| {
            target.cells.entry(reference.clone()).or_default().note = Some(note.to_string());
        })?;
        Ok(reference)
    }

    /// Write several cells at once.
    ///
    /// All references are validated before anything is written, so a bad
    /// reference leaves the sheet untouched.
    pub fn update_cells(
        &self,
        spreadsheet_id: &str,
        sheet: Option<&str>,
        updates: &HashMap<String, String>,
    ) -> Result<Vec<String>, SheetToolError> {
        if updates.is_empty() {
            return Err(SheetToolError::EmptyUpdate);
        }

        let mut normalized: Vec<(String, &String)> = Vec::with_capacity(updates.len());
        for (reference, value) in updates {
            normalized.push((normalize_cell_ref(reference)?, value));
        }
        normalized.sort_by(|a, b| a.0.cmp(&b.0));

        let mut written = Vec::with_capacity(normalized.len());
        self.with_sheet_mut(spreadsheet_id, sheet, |target| {
            for (reference, value) in normalized {
                target.cells.entry(reference.clone()).or_default().value = value.clone();
                written.push(reference);
            }
        })?;
        Ok(written)
    }

    /// Full contents of a spreadsheet
    pub fn get(&self, spreadsheet_id: &str) -> Result<Spreadsheet, SheetToolError> {
        self.spreadsheets
            .read()
            .get(spreadsheet_id)
            .cloned()
            .ok_or_else(|| SheetToolError::SpreadsheetNotFound(spreadsheet_id.to_string()))
    }

    /// Metadata for a spreadsheet, without cell contents
    pub fn metadata(&self, spreadsheet_id: &str) -> Result<SpreadsheetMetadata, SheetToolError> {
        self.spreadsheets
            .read()
            .get(spreadsheet_id)
            .map(Spreadsheet::metadata)
            .ok_or_else(|| SheetToolError::SpreadsheetNotFound(spreadsheet_id.to_string()))
    }

    /// Case-insensitive title search over all spreadsheets
    pub fn search(&self, query: &str) -> Vec<SpreadsheetMetadata> {
        let needle = query.trim().to_lowercase();
        let mut matches: Vec<SpreadsheetMetadata> = self
            .spreadsheets
            .read()
            .values()
            .filter(|s| needle.is_empty() || s.title.to_lowercase().contains(&needle))
            .map(Spreadsheet::metadata)
            .collect();
        matches.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.id.cmp(&b.id)));
        matches
    }

    fn with_sheet_mut(
        &self,
        spreadsheet_id: &str,
        sheet: Option<&str>,
        f: impl FnOnce(&mut Sheet),
    ) -> Result<(), SheetToolError> {
        let mut spreadsheets = self.spreadsheets.write();
        let spreadsheet = spreadsheets
            .get_mut(spreadsheet_id)
            .ok_or_else(|| SheetToolError::SpreadsheetNotFound(spreadsheet_id.to_string()))?;

        let sheet_name = sheet.unwrap_or(DEFAULT_SHEET);
        let target =
            spreadsheet
                .sheets
                .get_mut(sheet_name)
                .ok_or_else(|| SheetToolError::SheetNotFound {
                    spreadsheet_id: spreadsheet_id.to_string(),
                    sheet: sheet_name.to_string(),
                })?;

        f(target);
        spreadsheet.updated_at = Utc::now();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cell_ref() {
        assert_eq!(normalize_cell_ref("b2").unwrap(), "B2");
        assert_eq!(normalize_cell_ref(" AA10 ").unwrap(), "AA10");
        assert!(normalize_cell_ref("B0").is_err());
        assert!(normalize_cell_ref("2B").is_err());
        assert!(normalize_cell_ref("ABCD1").is_err());
        assert!(normalize_cell_ref("").is_err());
        assert!(normalize_cell_ref("B").is_err());
    }

    #[test]
    fn test_create_starts_with_default_sheet() {
        let manager = WorkbookManager::new();
        let meta = manager.create("Budget").unwrap();

        assert_eq!(meta.title, "Budget");
        assert_eq!(meta.sheet_names, vec![DEFAULT_SHEET.to_string()]);
        assert_eq!(meta.cell_count, 0);
    }

    #[test]
    fn test_empty_title_rejected() {
        let manager = WorkbookManager::new();
        assert!(matches!(
            manager.create("  "),
            Err(SheetToolError::EmptyTitle)
        ));
    }

    #[test]
    fn test_write_then_read_cell() {
        let manager = WorkbookManager::new();
        let meta = manager.create("Budget").unwrap();

        manager.write_cell(&meta.id, None, "b2", "42").unwrap();

        let sheet = &manager.get(&meta.id).unwrap().sheets[DEFAULT_SHEET];
        assert_eq!(sheet.cells["B2"].value, "42");
        assert!(sheet.cells["B2"].note.is_none());
    }

    #[test]
    fn test_note_survives_value_update() {
        let manager = WorkbookManager::new();
        let meta = manager.create("Budget").unwrap();

        manager.add_note(&meta.id, None, "B2", "check this").unwrap();
        manager.write_cell(&meta.id, None, "B2", "42").unwrap();

        let sheet = &manager.get(&meta.id).unwrap().sheets[DEFAULT_SHEET];
        assert_eq!(sheet.cells["B2"].value, "42");
        assert_eq!(sheet.cells["B2"].note.as_deref(), Some("check this"));
    }

    #[test]
    fn test_update_cells_is_all_or_nothing() {
        let manager = WorkbookManager::new();
        let meta = manager.create("Budget").unwrap();

        let mut updates = HashMap::new();
        updates.insert("A1".to_string(), "1".to_string());
        updates.insert("bogus".to_string(), "2".to_string());

        assert!(manager.update_cells(&meta.id, None, &updates).is_err());
        assert_eq!(manager.metadata(&meta.id).unwrap().cell_count, 0);
    }

    #[test]
    fn test_update_cells_writes_all() {
        let manager = WorkbookManager::new();
        let meta = manager.create("Budget").unwrap();

        let mut updates = HashMap::new();
        updates.insert("A1".to_string(), "x".to_string());
        updates.insert("b2".to_string(), "y".to_string());

        let written = manager.update_cells(&meta.id, None, &updates).unwrap();
        assert_eq!(written, vec!["A1".to_string(), "B2".to_string()]);
        assert_eq!(manager.metadata(&meta.id).unwrap().cell_count, 2);
    }

    #[test]
    fn test_unknown_spreadsheet() {
        let manager = WorkbookManager::new();
        assert!(matches!(
            manager.get("nope"),
            Err(SheetToolError::SpreadsheetNotFound(_))
        ));
    }

    #[test]
    fn test_unknown_sheet() {
        let manager = WorkbookManager::new();
        let meta = manager.create("Budget").unwrap();
        let err = manager
            .write_cell(&meta.id, Some("Sheet9"), "A1", "x")
            .unwrap_err();
        assert!(matches!(err, SheetToolError::SheetNotFound { .. }));
    }

    #[test]
    fn test_search_matches_case_insensitively() {
        let manager = WorkbookManager::new();
        manager.create("Q1 Budget").unwrap();
        manager.create("Roadmap").unwrap();

        let hits = manager.search("budget");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Q1 Budget");

        // Empty query lists everything
        assert_eq!(manager.search("").len(), 2);
    }
}
