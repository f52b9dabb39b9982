//! History export formats.

use crate::record::ContentRecord;
use std::str::FromStr;
use tweetloom_error::{ExportError, ExportErrorKind};

/// File format for [`HistoryStore::export`](crate::HistoryStore::export).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ExportFormat {
    /// Pretty-printed JSON array
    Json,
    /// CSV with a header row taken from the record fields
    Csv,
}

impl ExportFormat {
    /// Parse a format name, case-insensitively.
    ///
    /// # Examples
    ///
    /// ```
    /// use tweetloom_history::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::parse("CSV").unwrap(), ExportFormat::Csv);
    /// assert!(ExportFormat::parse("xml").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self, ExportError> {
        Self::from_str(name.trim()).map_err(|_| {
            ExportError::new(ExportErrorKind::UnsupportedFormat(name.to_string()))
        })
    }

    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }

    /// Encode `records` in this format.
    ///
    /// CSV output for an empty history is empty (no header row).
    pub fn encode(&self, records: &[ContentRecord]) -> Result<Vec<u8>, ExportError> {
        match self {
            Self::Json => serde_json::to_vec_pretty(records)
                .map_err(|e| ExportError::new(ExportErrorKind::Serialize(e.to_string()))),
            Self::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                for record in records {
                    writer.serialize(record).map_err(|e| {
                        ExportError::new(ExportErrorKind::Serialize(e.to_string()))
                    })?;
                }
                writer
                    .into_inner()
                    .map_err(|e| ExportError::new(ExportErrorKind::Serialize(e.to_string())))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display_matches_extension() {
        for format in ExportFormat::iter() {
            assert_eq!(format.to_string(), format.extension());
        }
    }

    #[test]
    fn test_empty_csv_has_no_header() {
        assert!(ExportFormat::Csv.encode(&[]).unwrap().is_empty());
        assert_eq!(ExportFormat::Json.encode(&[]).unwrap(), b"[]");
    }
}
