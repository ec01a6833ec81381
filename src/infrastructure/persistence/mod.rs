//! Output side of extraction

mod entry_writer;

pub use entry_writer::EntryWriter;
