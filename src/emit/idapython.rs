//! IDAPython emitter — a script that applies the names inside IDA.
//!
//! The generated script renames each address, trims a function that swallows
//! the address, and creates a function where IDA has none. It stops at the
//! first failure, like the batch that produced it.

use crate::emit::Emitter;
use crate::error::{Error, Result};
use crate::model::Record;
use regex::Regex;
use std::sync::LazyLock;

/// Names `idc.set_name` accepts without `SN_NOCHECK`.
static RE_IDA_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_.$?@][A-Za-z0-9_.$?@]*$").unwrap());

const SCRIPT_HEAD: &str = r#"# Generated by rvaname. Run inside IDA via File > Script file...
import ida_funcs
import idc

RENAMES = [
"#;

const SCRIPT_TAIL: &str = r#"

def apply(ea, name):
    if not idc.set_name(ea, name):
        print(f"Something in renaming function {name} went wrong. Exiting...")
        return False
    func = ida_funcs.get_func(ea)
    if func and func.start_ea != ea:
        ida_funcs.set_func_end(ea, ea)
    if not ida_funcs.get_func(ea):
        if ida_funcs.add_func(ea):
            print(f"Manually created function at {ea:#x} ({name})")
        else:
            print(f"Can't create a function {ea:#x} ({name}). Exiting...")
            return False
    return True


def main():
    renamed = 0
    for ea, name in RENAMES:
        if not apply(ea, name):
            break
        renamed += 1
    print(f"\nTotal count of parsed functions: {PARSED}")
    print(f"Total renamed functions: {renamed}")


main()
"#;

#[derive(Default)]
pub struct IdaPythonEmitter {
    entries: String,
    /// Size of the whole batch, including records after a failure.
    parsed: usize,
}

impl Emitter for IdaPythonEmitter {
    fn begin(&mut self, total: usize) {
        self.parsed = total;
    }

    fn apply(&mut self, record: &Record) -> Result<()> {
        if !RE_IDA_NAME.is_match(&record.name) {
            return Err(Error::EmissionFailure {
                address: record.address,
                name: record.name.clone(),
                reason: "not a valid IDA name".to_string(),
            });
        }
        self.entries.push_str(&format!(
            "    ({:#x}, \"{}\"),\n",
            record.address, record.name
        ));
        Ok(())
    }

    fn finish(self: Box<Self>) -> String {
        let mut out = String::with_capacity(
            SCRIPT_HEAD.len() + self.entries.len() + SCRIPT_TAIL.len() + 32,
        );
        out.push_str(SCRIPT_HEAD);
        out.push_str(&self.entries);
        out.push_str(&format!("]\nPARSED = {}\n", self.parsed));
        out.push_str(SCRIPT_TAIL);
        out
    }

    fn file_extension(&self) -> &str {
        "py"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(address: u64, name: &str) -> Record {
        Record {
            address,
            name: name.to_string(),
        }
    }

    #[test]
    fn script_lists_renames() {
        let mut emitter = Box::new(IdaPythonEmitter::default());
        emitter.apply(&record(0x100, "Player.Awake")).unwrap();
        emitter.apply(&record(0x200, "Player.Health.get_1")).unwrap();
        let script = emitter.finish();
        assert!(script.contains("    (0x100, \"Player.Awake\"),\n"));
        assert!(script.contains("    (0x200, \"Player.Health.get_1\"),\n"));
        assert!(script.contains("idc.set_name(ea, name)"));
        assert!(script.contains("ida_funcs.add_func(ea)"));
        assert!(script.ends_with("main()\n"));
    }

    #[test]
    fn parsed_total_covers_records_after_a_failure() {
        let mut emitter = IdaPythonEmitter::default();
        let records = [
            record(0x10, "T.A"),
            record(0x20, "T.B\"C"),
            record(0x30, "T.D"),
        ];
        let report = crate::emit::emit_all(&mut emitter, &records);
        assert_eq!(report.applied, 1);

        let script = Box::new(emitter).finish();
        assert!(script.contains("]\nPARSED = 3\n"));
        assert!(script.contains("{PARSED}"));
        assert!(!script.contains("len(RENAMES)"));
    }

    #[test]
    fn constructor_names_are_valid() {
        let mut emitter = IdaPythonEmitter::default();
        assert!(emitter.apply(&record(0x10, "Player..ctor")).is_ok());
    }

    #[test]
    fn rejects_names_ida_would_refuse() {
        let mut emitter = IdaPythonEmitter::default();
        for bad in ["", "Player.Do\"It", "1Player.Awake", "Player.Awake Now"] {
            match emitter.apply(&record(0x10, bad)) {
                Err(Error::EmissionFailure { address, name, .. }) => {
                    assert_eq!(address, 0x10);
                    assert_eq!(name, bad);
                }
                other => panic!("{bad:?} should be rejected, got {other:?}"),
            }
        }
        assert!(emitter.entries.is_empty());
    }
}
