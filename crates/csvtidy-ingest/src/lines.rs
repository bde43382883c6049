//! Streaming decoded physical lines.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use csvtidy_model::TextEncoding;

use crate::encoding::decode;
use crate::error::{IngestError, Result};

const BOM: char = '\u{feff}';

/// Iterator over the decoded lines of a file, without line terminators.
///
/// A trailing `\r` is dropped with the `\n`, and a byte-order mark at the
/// start of the first line is removed.
pub struct DecodedLines {
    path: PathBuf,
    reader: BufReader<File>,
    encoding: TextEncoding,
    buffer: Vec<u8>,
    line_number: usize,
}

impl DecodedLines {
    pub fn open(path: &Path, encoding: TextEncoding) -> Result<Self> {
        let file = File::open(path).map_err(|e| IngestError::from_io(path, e))?;
        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            encoding,
            buffer: Vec::new(),
            line_number: 0,
        })
    }

    /// 1-based number of the line most recently returned.
    pub fn line_number(&self) -> usize {
        self.line_number
    }
}

impl Iterator for DecodedLines {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buffer.clear();
        match self.reader.read_until(b'\n', &mut self.buffer) {
            Ok(0) => None,
            Ok(_) => {
                self.line_number += 1;
                trim_line_ending(&mut self.buffer);
                let Some(text) = decode(&self.buffer, self.encoding) else {
                    return Some(Err(IngestError::Decode {
                        path: self.path.clone(),
                        line: self.line_number,
                        encoding: self.encoding,
                    }));
                };
                let text = if self.line_number == 1 {
                    text.strip_prefix(BOM).unwrap_or(text.as_ref()).to_string()
                } else {
                    text.into_owned()
                };
                Some(Ok(text))
            }
            Err(e) => Some(Err(IngestError::FileRead {
                path: self.path.clone(),
                source: e,
            })),
        }
    }
}

fn trim_line_ending(buffer: &mut Vec<u8>) {
    if buffer.last() == Some(&b'\n') {
        buffer.pop();
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }
    }
}

/// Counts physical lines; a final line without a terminator still counts.
///
/// Every line is decoded, so a file that passes this count can be read by
/// every later stage with the same encoding.
pub fn count_lines(path: &Path, encoding: TextEncoding) -> Result<usize> {
    let mut count = 0;
    for line in DecodedLines::open(path, encoding)? {
        line?;
        count += 1;
    }
    Ok(count)
}

/// Reads and decodes the whole file.
pub fn read_decoded(path: &Path, encoding: TextEncoding) -> Result<String> {
    let bytes = fs::read(path).map_err(|e| IngestError::from_io(path, e))?;
    match decode(&bytes, encoding) {
        Some(text) => Ok(text.strip_prefix(BOM).unwrap_or(text.as_ref()).to_string()),
        None => {
            let line = bytes
                .split(|byte| *byte == b'\n')
                .position(|line| decode(line, encoding).is_none())
                .map_or(1, |index| index + 1);
            Err(IngestError::Decode {
                path: path.to_path_buf(),
                line,
                encoding,
            })
        }
    }
}
