//! Partition file handles
//!
//! Opens a partition file for writing or reading, with or without the
//! Snappy frame wrapper.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use super::BUFFER_SIZE;

/// Create (or truncate) a partition file for exclusive writing
pub(super) fn create(path: &Path, compress: bool) -> io::Result<Box<dyn Write>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let writer = BufWriter::with_capacity(BUFFER_SIZE, file);

    if compress {
        Ok(Box::new(snap::write::FrameEncoder::new(writer)))
    } else {
        Ok(Box::new(writer))
    }
}

/// Open a partition file for reading
pub(super) fn open(path: &Path, compress: bool) -> io::Result<Box<dyn Read>> {
    let file = File::open(path)?;
    let reader = BufReader::with_capacity(BUFFER_SIZE, file);

    if compress {
        Ok(Box::new(snap::read::FrameDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}
