use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::error::{DatasetError, Result};

use super::integer::parse_integer;
use super::model::{ID_KEY, LABEL_KEY};

/// Subject identifier → MGMT label, read from `train_labels.csv`.
///
/// Identifiers are kept as the raw strings of the CSV (e.g. `"00012"`) so they
/// compare equal to subject directory names without any numeric normalisation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    labels: HashMap<String, i64>,
}

impl LabelTable {
    /// Read and parse a label file from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let file = std::fs::File::open(path).map_err(|e| DatasetError::io(path, e))?;
        Self::from_reader(file, path)
    }

    /// Parse label rows from any reader. `origin` is only used in error
    /// messages.
    ///
    /// The header must name both [`ID_KEY`] and [`LABEL_KEY`]; other columns
    /// are ignored. Labels use the same lenient integer syntax as subject
    /// names (`" 1 "`, `"1_0"`). Rows repeating an identifier overwrite
    /// earlier ones.
    pub fn from_reader<R: Read>(reader: R, origin: &Path) -> Result<Self> {
        let csv_err = |source| DatasetError::Csv {
            path: origin.to_path_buf(),
            source,
        };

        let mut reader = csv::Reader::from_reader(reader);
        let headers = reader.headers().map_err(csv_err)?.clone();

        let column = |name: &'static str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DatasetError::MissingColumn {
                    path: origin.to_path_buf(),
                    column: name,
                })
        };
        let id_idx = column(ID_KEY)?;
        let label_idx = column(LABEL_KEY)?;

        let mut labels = HashMap::new();
        for (row_no, result) in reader.records().enumerate() {
            let record = result.map_err(csv_err)?;
            // Header is line 1, so the first data row is line 2.
            let row = row_no + 2;

            // Kept verbatim: keys must match directory names byte for byte.
            let id = record.get(id_idx).unwrap_or("");
            let raw = record.get(label_idx).unwrap_or("");
            let label = parse_integer(raw).ok_or_else(|| DatasetError::InvalidLabel {
                path: origin.to_path_buf(),
                row,
                value: raw.to_string(),
            })?;

            labels.insert(id.to_string(), label);
        }

        log::debug!("Read {} labels from {}", labels.len(), origin.display());
        Ok(LabelTable { labels })
    }

    /// Label for a subject, or [`DatasetError::MissingLabel`].
    pub fn lookup(&self, id: &str) -> Result<i64> {
        self.labels
            .get(id)
            .copied()
            .ok_or_else(|| DatasetError::MissingLabel { id: id.to_string() })
    }

    pub fn get(&self, id: &str) -> Option<i64> {
        self.labels.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<LabelTable> {
        LabelTable::from_reader(text.as_bytes(), Path::new("train_labels.csv"))
    }

    #[test]
    fn parses_ids_as_raw_strings() {
        let table = parse("BraTS21ID,MGMT_value\n00000,1\n00002,1\n00003,0\n").unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.lookup("00000").unwrap(), 1);
        assert_eq!(table.lookup("00003").unwrap(), 0);
        assert_eq!(table.get("0"), None);
        assert_eq!(table.get("3"), None);
    }

    #[test]
    fn column_order_and_extra_columns_do_not_matter() {
        let table = parse("site,MGMT_value,BraTS21ID\nA,0,00010\nB, 1 ,00011\n").unwrap();
        assert_eq!(table.get("00010"), Some(0));
        assert_eq!(table.get("00011"), Some(1));
    }

    #[test]
    fn padded_ids_are_not_trimmed() {
        let table = parse("BraTS21ID,MGMT_value\n 8 ,1\n9,0\n").unwrap();
        assert_eq!(table.get(" 8 "), Some(1));
        assert_eq!(table.get("8"), None);
        assert_eq!(table.get("9"), Some(0));
    }

    #[test]
    fn labels_accept_underscore_separators() {
        let table = parse("BraTS21ID,MGMT_value\n00001,1_0\n00002,+1\n").unwrap();
        assert_eq!(table.get("00001"), Some(10));
        assert_eq!(table.get("00002"), Some(1));
    }

    #[test]
    fn later_rows_override_earlier_ones() {
        let table = parse("BraTS21ID,MGMT_value\n00005,0\n00005,1\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("00005"), Some(1));
    }

    #[test]
    fn header_only_gives_empty_table() {
        let table = parse("BraTS21ID,MGMT_value\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn missing_label_column() {
        let err = parse("BraTS21ID,label\n00001,1\n").unwrap_err();
        match err {
            DatasetError::MissingColumn { column, .. } => assert_eq!(column, LABEL_KEY),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_integer_label() {
        let err = parse("BraTS21ID,MGMT_value\n00001,1\n00002,yes\n").unwrap_err();
        match err {
            DatasetError::InvalidLabel { row, value, .. } => {
                assert_eq!(row, 3);
                assert_eq!(value, "yes");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn ragged_rows_are_csv_errors() {
        let err = parse("BraTS21ID,MGMT_value\n00001,1,extra\n").unwrap_err();
        assert!(matches!(err, DatasetError::Csv { .. }));
    }

    #[test]
    fn unknown_subject_is_a_lookup_error() {
        let table = parse("BraTS21ID,MGMT_value\n00001,1\n").unwrap();
        let err = table.lookup("00009").unwrap_err();
        assert!(matches!(err, DatasetError::MissingLabel { ref id } if id == "00009"));
        assert!(err.to_string().contains("00009"));
    }
}
