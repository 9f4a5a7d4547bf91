//! Emitter module — trait-based output dispatch.
//!
//! An emitter applies resolved `(address, name)` records one at a time. The
//! batch is fail-fast: the first record that cannot be applied stops
//! emission, and everything applied before it stays applied.

pub mod idapython;
pub mod json;
pub mod text;

use crate::error::Error;
use crate::model::Record;
use anyhow::{anyhow, Result};
use tracing::debug;

/// Applies resolved names to some target.
pub trait Emitter {
    /// Called once before the first record with the size of the batch.
    fn begin(&mut self, _total: usize) {}
    fn apply(&mut self, record: &Record) -> crate::error::Result<()>;
    /// Produce the output for everything applied so far.
    fn finish(self: Box<Self>) -> String;
    fn file_extension(&self) -> &str;
}

/// Create an emitter for the given format name.
pub fn create_emitter(format: &str) -> Result<Box<dyn Emitter>> {
    match format {
        "idapython" | "ida" | "py" => Ok(Box::new(idapython::IdaPythonEmitter::default())),
        "json" => Ok(Box::new(json::JsonEmitter::default())),
        "text" | "list" => Ok(Box::new(text::TextEmitter::default())),
        _ => Err(anyhow!(
            "unknown format: {}. Use idapython, json, or text",
            format
        )),
    }
}

/// Outcome of [`emit_all`].
#[derive(Debug, Default)]
pub struct EmitReport {
    pub applied: usize,
    /// The record that stopped the batch, if any.
    pub failure: Option<Error>,
}

/// Apply `records` in order, stopping at the first failure.
pub fn emit_all(emitter: &mut dyn Emitter, records: &[Record]) -> EmitReport {
    let mut report = EmitReport::default();
    emitter.begin(records.len());
    for record in records {
        match emitter.apply(record) {
            Ok(()) => {
                debug!("applied {} at {:#x}", record.name, record.address);
                report.applied += 1;
            }
            Err(err) => {
                report.failure = Some(err);
                break;
            }
        }
    }
    report
}
