//! Binary model format.
//!
//! ```text
//! Field          Size  Encoding
//! -------------  ----  --------
//! weight count   8     i64, little-endian
//! has intercept  1     u8, 0 or 1
//! then, once per weight:
//! weight         8     f64 (IEEE-754 binary64), little-endian
//! name length    4     i32, little-endian, counts the trailing NUL
//! name           len   UTF-8 bytes followed by NUL
//! ```
//!
//! There is no padding between fields and no magic number.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use super::linear_regression::{INTERCEPT_NAME, LinearRegression};
use crate::error::{Error, Result};

/// Upper bound on weights reserved up front, so a corrupt count cannot
/// trigger a huge allocation before any record has been read.
const MAX_PREALLOCATED_WEIGHTS: usize = 1024;

fn read_array<R: Read, const N: usize>(reader: &mut R, field: &'static str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    reader.read_exact(&mut buf).map_err(|e| {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            Error::Truncated(field)
        } else {
            Error::Io(e)
        }
    })?;
    Ok(buf)
}

/// Length field of a name record, which counts the trailing NUL.
fn name_length(name: &str) -> Result<i32> {
    if name.as_bytes().contains(&0) {
        return Err(Error::InvalidName(name.to_string()));
    }
    i32::try_from(name.len() + 1).map_err(|_| Error::InvalidName(name.to_string()))
}

fn read_name<R: Read>(reader: &mut R) -> Result<String> {
    let len = i32::from_le_bytes(read_array(reader, "name length")?);
    if len < 1 {
        return Err(Error::CorruptModel(format!("invalid name length {}", len)));
    }
    let len = len as usize;

    let mut bytes = Vec::new();
    reader.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(Error::Truncated("name"));
    }

    if bytes.pop() != Some(0) {
        return Err(Error::CorruptModel("name is not NUL-terminated".to_string()));
    }
    if bytes.contains(&0) {
        return Err(Error::CorruptModel("name contains an embedded NUL".to_string()));
    }
    String::from_utf8(bytes).map_err(|e| Error::CorruptModel(format!("name is not UTF-8: {}", e)))
}

impl LinearRegression {
    /// Writes the model to `writer` in the binary model format. Every name is
    /// checked before the first byte is written.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> Result<()> {
        let count = i64::try_from(self.weight_count())
            .map_err(|_| Error::CorruptModel("too many weights".to_string()))?;
        let name_lengths = self
            .weight_names()
            .iter()
            .map(|name| name_length(name))
            .collect::<Result<Vec<_>>>()?;

        writer.write_all(&count.to_le_bytes())?;
        writer.write_all(&[u8::from(self.has_intercept())])?;

        let records = self.weights().iter().zip(self.weight_names());
        for ((weight, name), name_len) in records.zip(name_lengths) {
            writer.write_all(&weight.to_le_bytes())?;
            writer.write_all(&name_len.to_le_bytes())?;
            writer.write_all(name.as_bytes())?;
            writer.write_all(&[0])?;
        }
        Ok(())
    }

    /// Reads a model written by [`write_to`](Self::write_to).
    pub fn read_from<R: Read>(reader: &mut R) -> Result<Self> {
        let count = i64::from_le_bytes(read_array(reader, "weight count")?);
        let count = usize::try_from(count)
            .map_err(|_| Error::CorruptModel(format!("invalid weight count {}", count)))?;

        let has_intercept = match read_array::<_, 1>(reader, "intercept flag")?[0] {
            0 => false,
            1 => true,
            flag => return Err(Error::CorruptModel(format!("invalid intercept flag {}", flag))),
        };

        let capacity = count.min(MAX_PREALLOCATED_WEIGHTS);
        let mut weights = Vec::with_capacity(capacity);
        let mut names = Vec::with_capacity(capacity);
        for _ in 0..count {
            weights.push(f64::from_le_bytes(read_array(reader, "weight")?));
            names.push(read_name(reader)?);
        }

        if has_intercept && names.first().map(String::as_str) != Some(INTERCEPT_NAME) {
            return Err(Error::CorruptModel(format!(
                "intercept model must start with an {:?} weight",
                INTERCEPT_NAME
            )));
        }

        Ok(Self::from_parts(has_intercept, weights, names))
    }

    /// Writes the model to the file at `path`, replacing any existing file.
    ///
    /// The model is written to a temporary file in the same directory and
    /// renamed over `path` once complete, so a failed save leaves whatever
    /// was at `path` untouched.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(dir)?;
        {
            let mut writer = BufWriter::new(file.as_file_mut());
            self.write_to(&mut writer)?;
            writer.flush()?;
        }
        file.persist(path).map_err(|e| Error::Io(e.error))?;
        log::debug!("saved {} weights to {}", self.weight_count(), path.display());
        Ok(())
    }

    /// Loads a model saved with [`save`](Self::save). Any I/O failure or
    /// malformed content is returned as an error; nothing partial is kept.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        Self::load_file(path).inspect_err(|e| {
            log::warn!("failed to load model from {}: {}", path.display(), e);
        })
    }

    fn load_file(path: &Path) -> Result<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        let model = Self::read_from(&mut reader)?;

        let mut extra = [0u8; 1];
        if reader.read(&mut extra)? != 0 {
            return Err(Error::CorruptModel("trailing bytes after last weight".to_string()));
        }

        log::debug!("loaded {} weights from {}", model.weight_count(), path.display());
        Ok(model)
    }
}
