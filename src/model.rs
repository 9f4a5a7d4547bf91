//! Data model for extracted functions — format-agnostic.

use crate::error::Error;
use serde::Serialize;
use std::path::PathBuf;

/// Default symbol joining name segments.
pub const DEFAULT_SEPARATOR: &str = ".";

/// Property accessor a descriptor stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    Get,
    Set,
}

impl Accessor {
    pub fn keyword(self) -> &'static str {
        match self {
            Accessor::Get => "get",
            Accessor::Set => "set",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        match word {
            "get" => Some(Accessor::Get),
            "set" => Some(Accessor::Set),
            _ => None,
        }
    }
}

/// One function extracted from a stub file.
///
/// Every mutator clears `complete`, so a descriptor that was already emitted
/// becomes eligible again once the parser changes it (e.g. `get` followed by
/// `set` under the same address).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub separator: String,
    /// Owning type first, then declared names in encounter order.
    pub name_segments: Vec<String>,
    pub accessor: Option<Accessor>,
    pub return_type: Option<String>,
    /// Load offset; 0 means unassigned.
    pub address: u64,
    pub complete: bool,
    /// Disambiguator; 0 renders no suffix.
    pub suffix: u32,
}

impl FunctionDescriptor {
    pub fn new(type_name: &str, separator: &str) -> Self {
        Self {
            separator: separator.to_string(),
            name_segments: vec![type_name.to_string()],
            accessor: None,
            return_type: None,
            address: 0,
            complete: false,
            suffix: 0,
        }
    }

    pub fn push_segment(&mut self, segment: &str) {
        self.name_segments.push(segment.to_string());
        self.complete = false;
    }

    pub fn set_accessor(&mut self, accessor: Accessor) {
        self.accessor = Some(accessor);
        self.complete = false;
    }

    pub fn set_return_type(&mut self, ty: &str) {
        self.return_type = Some(ty.to_string());
        self.complete = false;
    }

    pub fn set_address(&mut self, address: u64) {
        self.address = address;
        self.complete = false;
    }

    /// Whether the descriptor may be emitted.
    ///
    /// `strict` additionally requires a recognized return type.
    pub fn is_ready(&self, strict: bool) -> bool {
        if self.complete || self.name_segments.len() <= 1 || self.address == 0 {
            return false;
        }
        !strict || self.return_type.is_some()
    }

    /// Name without the disambiguation suffix.
    pub fn base_name(&self) -> String {
        let mut name = self.name_segments.join(&self.separator);
        if let Some(accessor) = self.accessor {
            name.push_str(&self.separator);
            name.push_str(accessor.keyword());
        }
        name
    }

    pub fn name(&self) -> String {
        let base = self.base_name();
        if self.suffix > 0 {
            format!("{}_{}", base, self.suffix)
        } else {
            base
        }
    }

    pub fn to_record(&self) -> Record {
        Record {
            address: self.address,
            name: self.name(),
        }
    }
}

/// Result of parsing a single stub file.
#[derive(Debug, Default)]
pub struct ParsedFile {
    pub path: PathBuf,
    pub type_name: String,
    pub functions: Vec<FunctionDescriptor>,
    /// Per-descriptor problems that did not stop the file.
    pub diagnostics: Vec<Error>,
}

/// A resolved `(address, name)` pair handed to an emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub address: u64,
    pub name: String,
}

/// Batch totals reported to the caller.
#[derive(Debug, Default)]
pub struct Summary {
    /// `(file name, descriptors extracted)` in processing order.
    pub files: Vec<(String, usize)>,
    pub total_extracted: usize,
    pub total_applied: usize,
    /// Descriptors dropped for malformed address literals.
    pub discarded: usize,
    pub failure: Option<Error>,
}
