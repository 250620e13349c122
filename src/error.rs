//! Unified error type for all Tauri IPC command handlers.
//!
//! `AppError` is the single error type returned by every `#[tauri::command]`
//! function. It serializes as `{ "kind": "...", "message": "..." }` so the
//! frontend can programmatically distinguish error categories.

use serde::ser::SerializeStruct;

/// Application-level error returned by all Tauri commands.
///
/// Each variant maps to a distinct failure domain. The frontend receives a JSON
/// object with `kind` (variant name) and `message` (human-readable description).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Errors reading or writing persisted state (SQLite). The operation is
    /// aborted and prior state is retained; the caller may retry.
    #[error("{0}")]
    Storage(String),

    /// Listing installed rules in the enforcement engine failed.
    #[error("{0}")]
    EngineQuery(String),

    /// Removing or adding rules in the enforcement engine failed. The engine
    /// may be left partially updated; the next sync attempts a full rebuild.
    #[error("{0}")]
    EngineUpdate(String),

    /// Invalid or missing user input (malformed domain, bad PIN, duplicates).
    #[error("{0}")]
    InvalidInput(String),

    /// I/O and OS-level errors (filesystem, app data directory).
    #[error("{0}")]
    Io(String),
}

impl AppError {
    /// Returns the error kind as a string matching the variant name.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Storage(_) => "Storage",
            AppError::EngineQuery(_) => "EngineQuery",
            AppError::EngineUpdate(_) => "EngineUpdate",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Io(_) => "Io",
        }
    }
}

/// Custom Serialize: produces `{ "kind": "Variant", "message": "..." }` for the frontend.
impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("AppError", 2)?;
        s.serialize_field("kind", self.kind())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

// ---- From implementations for ergonomic error conversion ----

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_returns_correct_variant_name() {
        assert_eq!(AppError::Storage("db fail".into()).kind(), "Storage");
        assert_eq!(AppError::EngineQuery("list fail".into()).kind(), "EngineQuery");
        assert_eq!(
            AppError::EngineUpdate("update fail".into()).kind(),
            "EngineUpdate"
        );
        assert_eq!(AppError::InvalidInput("bad input".into()).kind(), "InvalidInput");
        assert_eq!(AppError::Io("io fail".into()).kind(), "Io");
    }

    #[test]
    fn test_error_display_shows_message() {
        let err = AppError::Storage("connection lost".into());
        assert_eq!(err.to_string(), "connection lost");
    }

    #[test]
    fn test_error_serializes_as_kind_and_message() {
        let err = AppError::EngineUpdate("rule batch rejected".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "EngineUpdate");
        assert_eq!(json["message"], "rule batch rejected");
    }

    #[test]
    fn test_from_anyhow_produces_storage_variant() {
        let anyhow_err = anyhow::anyhow!("sqlite busy");
        let app_err: AppError = anyhow_err.into();
        assert_eq!(app_err.kind(), "Storage");
        assert!(app_err.to_string().contains("sqlite busy"));
    }

    #[test]
    fn test_from_io_error_produces_io_variant() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let app_err: AppError = io_err.into();
        assert_eq!(app_err.kind(), "Io");
        assert!(app_err.to_string().contains("file missing"));
    }

    #[test]
    fn test_all_variants_serialize_with_two_fields() {
        let variants: Vec<AppError> = vec![
            AppError::Storage("a".into()),
            AppError::EngineQuery("b".into()),
            AppError::EngineUpdate("c".into()),
            AppError::InvalidInput("d".into()),
            AppError::Io("e".into()),
        ];
        for err in variants {
            let json = serde_json::to_value(&err).unwrap();
            let obj = json.as_object().unwrap();
            assert_eq!(obj.len(), 2, "Expected exactly 2 fields for {err:?}");
            assert!(obj.contains_key("kind"));
            assert!(obj.contains_key("message"));
        }
    }
}
