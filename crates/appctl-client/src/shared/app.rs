use serde_json::Value;

use crate::AppRecord;

/// An app document exactly as the backend sent it, plus its typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct App {
    raw: Value,
    record: AppRecord,
}

impl App {
    pub fn from_value(raw: Value) -> App {
        let record = AppRecord::from_value(&raw);
        App { raw, record }
    }

    /// The untouched document, as printed by `appctl describe`.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn record(&self) -> &AppRecord {
        &self.record
    }
}
