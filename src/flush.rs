//! Writes the report to its destination.
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::{error::Result, OutputRow, HEADER};

/// Writes report rows as delimited lines, header first.
///
/// Fields are never quoted or escaped.
pub struct Flush<W: Write> {
    writer: Writer<W>,
    rows: usize,
}

impl<W: Write> Flush<W> {
    pub fn new(writer: W, delimiter: u8) -> Result<Flush<W>> {
        let mut writer = WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);

        writer.write_record(&HEADER)?;

        Ok(Flush { writer, rows: 0 })
    }

    pub fn write(&mut self, row: &OutputRow) -> Result<()> {
        self.writer.write_record(&row.fields())?;
        self.rows += 1;

        Ok(())
    }

    /// Flushes everything written so far and returns the number of rows,
    /// header excluded.
    pub fn finish(mut self) -> Result<usize> {
        self.writer.flush()?;

        Ok(self.rows)
    }
}

impl Flush<File> {
    /// Creates the file, and its parent directory if needed.
    pub fn to_path<P: AsRef<Path>>(path: P, delimiter: u8) -> Result<Flush<File>> {
        if let Some(dirname) = path.as_ref().parent() {
            if !dirname.as_os_str().is_empty() {
                fs::create_dir_all(dirname)?;
            }
        }

        Flush::new(File::create(path)?, delimiter)
    }
}
