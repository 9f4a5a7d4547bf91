//! Plain listing: one `0x<address> <name>` line per record.

use crate::emit::Emitter;
use crate::error::Result;
use crate::model::Record;

#[derive(Default)]
pub struct TextEmitter {
    out: String,
}

impl Emitter for TextEmitter {
    fn apply(&mut self, record: &Record) -> Result<()> {
        self.out
            .push_str(&format!("{:#x} {}\n", record.address, record.name));
        Ok(())
    }

    fn finish(self: Box<Self>) -> String {
        self.out
    }

    fn file_extension(&self) -> &str {
        "txt"
    }
}
