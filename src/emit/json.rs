//! JSON emitter — the resolved records as an array for other tooling.

use crate::emit::Emitter;
use crate::error::Result;
use crate::model::Record;

#[derive(Default)]
pub struct JsonEmitter {
    records: Vec<Record>,
}

impl Emitter for JsonEmitter {
    fn apply(&mut self, record: &Record) -> Result<()> {
        self.records.push(record.clone());
        Ok(())
    }

    fn finish(self: Box<Self>) -> String {
        // Vec<Record> of plain fields cannot fail to serialize
        let mut out = serde_json::to_string_pretty(&self.records).unwrap_or_default();
        out.push('\n');
        out
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}
