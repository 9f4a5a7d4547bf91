//! Declaration parser — line-by-line state machine over one stub file.
//!
//! Keeps a single "current" descriptor that accumulates a name, accessor, and
//! address across lines. The first unclassified line after the descriptor
//! becomes ready pushes a snapshot of it into the output.

use super::classify::{classify, parse_address, LineKind, RETURN_TYPES};
use crate::error::Error;
use crate::model::{Accessor, FunctionDescriptor};
use tracing::{debug, warn};

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub separator: String,
    /// Only emit descriptors with a recognized return type.
    pub require_return_type: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            separator: crate::model::DEFAULT_SEPARATOR.to_string(),
            require_return_type: false,
        }
    }
}

/// Output of [`parse`]: emitted descriptors plus recoverable diagnostics.
#[derive(Debug, Default)]
pub struct StubDoc {
    pub functions: Vec<FunctionDescriptor>,
    pub diagnostics: Vec<Error>,
}

// -- Parser state -------------------------------------------------------------

struct ParserState<'a> {
    type_name: &'a str,
    options: &'a ParseOptions,
    current: FunctionDescriptor,
    functions: Vec<FunctionDescriptor>,
    diagnostics: Vec<Error>,
    /// A malformed address arrived before its declaration; drop that declaration.
    skip_declaration: bool,
}

impl<'a> ParserState<'a> {
    fn new(type_name: &'a str, options: &'a ParseOptions) -> Self {
        Self {
            type_name,
            options,
            current: FunctionDescriptor::new(type_name, &options.separator),
            functions: Vec::new(),
            diagnostics: Vec::new(),
            skip_declaration: false,
        }
    }

    fn fresh(&self) -> FunctionDescriptor {
        FunctionDescriptor::new(self.type_name, &self.options.separator)
    }
}

// -- Public API ---------------------------------------------------------------

/// Parse the stub text for `type_name` into function descriptors.
pub fn parse(type_name: &str, input: &str, options: &ParseOptions) -> StubDoc {
    let mut state = ParserState::new(type_name, options);

    for (idx, line) in input.lines().enumerate() {
        process_line(&mut state, idx + 1, line);
    }

    // Anything still accumulating here never became ready and is dropped.
    StubDoc {
        functions: state.functions,
        diagnostics: state.diagnostics,
    }
}

// -- Line processing ----------------------------------------------------------

fn process_line(s: &mut ParserState, line_no: usize, line: &str) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.is_empty() {
        return;
    }

    match classify(&tokens) {
        LineKind::Declaration => process_declaration(s, line),
        LineKind::Accessor(accessor) => process_accessor(s, accessor),
        LineKind::Address(raw) => process_address(s, line_no, raw),
        LineKind::Other => flush_ready(s),
    }
}

/// Handle `public void Awake()`, `protected override int get_Count()`, ...
fn process_declaration(s: &mut ParserState, line: &str) {
    let cleaned = line.replace(';', " ");
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();

    if s.skip_declaration {
        s.skip_declaration = false;
        s.current = s.fresh();
        return;
    }

    if s.current.complete || s.current.address == 0 {
        s.current = s.fresh();
    } else if s.current.accessor.is_some() {
        // getter/setter sibling sharing the pending address
        let address = s.current.address;
        s.current = s.fresh();
        s.current.set_address(address);
    }

    if tokens.contains(&"class") {
        return;
    }

    let mut rest = &tokens[..];
    while rest.len() > 1 {
        if rest[0].contains('(') {
            break;
        }
        if RETURN_TYPES.contains(&rest[0]) {
            s.current.set_return_type(rest[0]);
        }
        rest = &rest[1..];
    }

    let Some(&candidate) = rest.first() else {
        return;
    };
    // generics are skipped altogether
    if candidate.contains('<') {
        return;
    }
    let name = candidate.split('(').next().unwrap_or(candidate);
    if name.is_empty() {
        return;
    }
    s.current.push_segment(name);
}

fn process_accessor(s: &mut ParserState, accessor: Accessor) {
    // a pending malformed literal belonged to this accessor
    s.skip_declaration = false;
    s.current.set_accessor(accessor);
}

fn process_address(s: &mut ParserState, line_no: usize, raw: String) {
    match parse_address(&raw) {
        Some(address) => {
            s.skip_declaration = false;
            s.current.set_address(address);
        }
        None => {
            let err = Error::MalformedAddressLiteral {
                line: line_no,
                literal: raw,
            };
            warn!("{}: {}; discarding {}", s.type_name, err, s.current.base_name());
            s.diagnostics.push(err);
            if s.current.complete || s.current.name_segments.len() <= 1 {
                // The literal belongs to whatever is declared next.
                s.skip_declaration = true;
                s.current = s.fresh();
            } else {
                // Keep the declared member for a sibling accessor with its own address.
                s.current.address = 0;
                s.current.accessor = None;
                s.current.complete = false;
            }
        }
    }
}

/// Emit the current descriptor if it is ready.
fn flush_ready(s: &mut ParserState) {
    if !s.current.is_ready(s.options.require_return_type) {
        return;
    }

    s.current.complete = true;
    debug!("emitted {} at {:#x}", s.current.name(), s.current.address);
    s.functions.push(s.current.clone());

    // An accessor may be followed by its sibling under the same address.
    if s.current.accessor.is_none() {
        s.current = s.fresh();
    }
}
