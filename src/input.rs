use csv::Position;
use encoding::label::encoding_from_whatwg_label;
use encoding::{DecoderTrap, EncodingRef};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::{split_line, Error, Result, Row, RowResult};

/// Looks up a text encoding by its WHATWG label (`utf-8`, `latin1`, ...).
pub fn encoding_for(label: &str) -> Result<EncodingRef> {
    encoding_from_whatwg_label(label).ok_or_else(|| Error::UnknownEncoding(label.to_string()))
}

fn decode(data: &[u8], encoding: EncodingRef) -> String {
    encoding
        .decode(data, DecoderTrap::Replace)
        .unwrap_or_else(|e| e.into_owned())
}

fn trim_terminator(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();

        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}

/// A delimited text source whose first line is a header.
///
/// Every other line becomes one row, split on the delimiter and nothing
/// else: quotes have no special meaning, rows may have any number of fields
/// and a blank line is a row with a single empty field.
pub struct ReaderSource<R> {
    reader: BufReader<R>,
    name: String,
    delimiter: char,
    encoding: EncodingRef,
}

impl<R: Read> ReaderSource<R> {
    pub fn from_reader(
        reader: R,
        name: &str,
        delimiter: u8,
        encoding: EncodingRef,
    ) -> ReaderSource<R> {
        ReaderSource {
            reader: BufReader::new(reader),
            name: name.to_string(),
            delimiter: delimiter as char,
            encoding,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ReaderSource<File> {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        delimiter: u8,
        encoding: EncodingRef,
    ) -> Result<ReaderSource<File>> {
        let file = File::open(&path)?;

        Ok(ReaderSource::from_reader(
            file,
            &path.as_ref().to_string_lossy(),
            delimiter,
            encoding,
        ))
    }
}

pub struct IntoIter<R> {
    reader: BufReader<R>,
    delimiter: char,
    encoding: EncodingRef,
    line: u64,
    buf: Vec<u8>,
}

impl<R: Read> Iterator for IntoIter<R> {
    type Item = RowResult;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();

            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(Error::Io(e))),
            }

            self.line += 1;

            // header
            if self.line == 1 {
                continue;
            }

            trim_terminator(&mut self.buf);

            let mut row: Row = split_line(&decode(&self.buf, self.encoding), self.delimiter);
            let mut position = Position::new();

            position.set_line(self.line);
            row.set_position(Some(position));

            return Some(Ok(row));
        }
    }
}

impl<R: Read> IntoIterator for ReaderSource<R> {
    type Item = RowResult;

    type IntoIter = IntoIter<R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            reader: self.reader,
            delimiter: self.delimiter,
            encoding: self.encoding,
            line: 0,
            buf: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{encoding_for, ReaderSource};
    use crate::{Error, Row};
    use encoding::all::{ISO_8859_1, UTF_8};

    #[test]
    fn test_skips_header_and_splits() {
        let data = "date,mm,state\n2015-01-05,10.0,CE\n2015-01-20,-5.0,CE\n";
        let source = ReaderSource::from_reader(data.as_bytes(), "mem", b',', UTF_8);

        assert_eq!(source.name(), "mem");

        let rows: Vec<Row> = source.into_iter().map(|r| r.unwrap()).collect();

        assert_eq!(
            rows,
            vec![
                Row::from(vec!["2015-01-05", "10.0", "CE"]),
                Row::from(vec!["2015-01-20", "-5.0", "CE"]),
            ]
        );
    }

    #[test]
    fn test_quotes_are_plain_text() {
        let data = "h\n\"a|b\"|c\n";
        let mut source = ReaderSource::from_reader(data.as_bytes(), "mem", b'|', UTF_8).into_iter();

        assert_eq!(
            source.next().unwrap().unwrap(),
            Row::from(vec!["\"a", "b\"", "c"])
        );
    }

    #[test]
    fn test_rows_of_different_lengths() {
        let data = "a|b|c\n1|2\n1|2|3|4\n";
        let rows: Vec<Row> = ReaderSource::from_reader(data.as_bytes(), "mem", b'|', UTF_8)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(rows[0].len(), 2);
        assert_eq!(rows[1].len(), 4);
    }

    #[test]
    fn test_rows_keep_line_numbers() {
        let data = "date,mm,state\n2015-01-05,10.0,CE\n2015-01-20,-5.0,CE\n";
        let rows: Vec<Row> = ReaderSource::from_reader(data.as_bytes(), "mem", b',', UTF_8)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(rows[0].position().unwrap().line(), 2);
        assert_eq!(rows[1].position().unwrap().line(), 3);
    }

    #[test]
    fn test_blank_line_is_a_row() {
        let data = "data,mm,uf\n2015-01-05,10.0,CE\n\n2015-01-06,1.0,CE\n";
        let rows: Vec<Row> = ReaderSource::from_reader(data.as_bytes(), "mem", b',', UTF_8)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], Row::from(vec![""]));
        assert_eq!(rows[1].position().unwrap().line(), 3);
    }

    #[test]
    fn test_crlf_and_missing_final_newline() {
        let data = "data,mm,uf\r\n2015-01-05,10.0,CE\r\n2015-01-06,1.0,CE";
        let rows: Vec<Row> = ReaderSource::from_reader(data.as_bytes(), "mem", b',', UTF_8)
            .into_iter()
            .map(|r| r.unwrap())
            .collect();

        assert_eq!(
            rows,
            vec![
                Row::from(vec!["2015-01-05", "10.0", "CE"]),
                Row::from(vec!["2015-01-06", "1.0", "CE"]),
            ]
        );
    }

    #[test]
    fn test_header_only() {
        let data = "data,mm,uf\n";

        assert_eq!(
            ReaderSource::from_reader(data.as_bytes(), "mem", b',', UTF_8)
                .into_iter()
                .count(),
            0
        );
    }

    #[test]
    fn test_latin1() {
        let data: &[u8] = b"cidade\nMaca\xe9\n";
        let mut source = ReaderSource::from_reader(data, "mem", b'|', ISO_8859_1).into_iter();

        assert_eq!(source.next().unwrap().unwrap(), Row::from(vec!["Macaé"]));
    }

    #[test]
    fn test_from_path() {
        let source = ReaderSource::from_path("test/assets/chuvas.csv", b',', UTF_8).unwrap();

        assert_eq!(source.name(), "test/assets/chuvas.csv");
        assert_eq!(source.into_iter().count(), 6);
    }

    #[test]
    fn test_missing_file() {
        match ReaderSource::from_path("test/assets/nope.csv", b',', UTF_8) {
            Err(Error::Io(_)) => {}
            _ => panic!("expected an I/O error"),
        }
    }

    #[test]
    fn test_encoding_for() {
        assert!(encoding_for("latin1").is_ok());
        assert!(encoding_for("utf-8").is_ok());

        match encoding_for("klingon") {
            Err(Error::UnknownEncoding(l)) => assert_eq!(l, "klingon"),
            _ => panic!("expected an unknown encoding"),
        }
    }
}
