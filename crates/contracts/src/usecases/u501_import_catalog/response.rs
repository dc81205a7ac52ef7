use serde::{Deserialize, Serialize};

/// Result of one import, handed back to the operator. Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub imported_count: usize,
    pub categories_created_count: usize,
    pub skipped_count: usize,
    pub errors: Vec<RowError>,
}

impl ImportSummary {
    pub fn record_skipped(&mut self, error: RowError) {
        self.skipped_count += 1;
        self.errors.push(error);
    }
}

/// Recoverable, row-level rejection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based data row number in the source file (header excluded)
    pub row: usize,
    pub kind: RowErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "field", rename_all = "snake_case")]
pub enum RowErrorKind {
    MissingRequiredField(String),
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            RowErrorKind::MissingRequiredField(field) => {
                write!(f, "row {}: missing required field '{}'", self.row, field)
            }
        }
    }
}

/// Import state machine. `Failed` is terminal and can follow Decoding,
/// Reconciling or Persisting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportPhase {
    Idle,
    Decoding,
    Reconciling,
    Normalizing,
    Persisting,
    Done,
    Failed,
}

impl ImportPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImportPhase::Idle => "idle",
            ImportPhase::Decoding => "decoding",
            ImportPhase::Reconciling => "reconciling",
            ImportPhase::Normalizing => "normalizing",
            ImportPhase::Persisting => "persisting",
            ImportPhase::Done => "done",
            ImportPhase::Failed => "failed",
        }
    }

    pub fn can_fail(&self) -> bool {
        matches!(
            self,
            ImportPhase::Decoding | ImportPhase::Reconciling | ImportPhase::Persisting
        )
    }
}

impl std::fmt::Display for ImportPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_serializes_in_camel_case() {
        let mut summary = ImportSummary {
            imported_count: 1,
            categories_created_count: 1,
            ..Default::default()
        };
        summary.record_skipped(RowError {
            row: 2,
            kind: RowErrorKind::MissingRequiredField("name".into()),
        });

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["importedCount"], 1);
        assert_eq!(json["categoriesCreatedCount"], 1);
        assert_eq!(json["skippedCount"], 1);
        assert_eq!(json["errors"][0]["kind"]["type"], "missing_required_field");
        assert_eq!(json["errors"][0]["kind"]["field"], "name");
    }

    #[test]
    fn test_only_io_phases_can_fail() {
        assert!(ImportPhase::Decoding.can_fail());
        assert!(ImportPhase::Persisting.can_fail());
        assert!(!ImportPhase::Normalizing.can_fail());
        assert!(!ImportPhase::Done.can_fail());
    }
}
