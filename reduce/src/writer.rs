use std::{
    fs::{self, File},
    io::{self, BufWriter},
    path::{Path, PathBuf},
};

use log::warn;
use uuid::Uuid;

use crate::{
    error::{ReduceError, Result},
    record::{KeyValue, RecordEncoder},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Direct,
    /// Write a sibling temp file and rename it over the destination.
    Atomic,
}

impl Default for OutputMode {
    fn default() -> Self {
        OutputMode::Direct
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".tmp-{}", Uuid::new_v4()));
    path.with_file_name(name)
}

pub struct OutputWriter {
    path: PathBuf,
    temp: Option<PathBuf>,
    encoder: Option<RecordEncoder<BufWriter<File>>>,
    written: usize,
}

impl OutputWriter {
    pub fn create(path: impl Into<PathBuf>, mode: OutputMode) -> Result<Self> {
        let path = path.into();
        let temp = match mode {
            OutputMode::Direct => None,
            OutputMode::Atomic => Some(temp_path(&path)),
        };
        let target = temp.as_deref().unwrap_or(&path);
        let file = File::create(target).map_err(|source| ReduceError::OutputUnavailable {
            path: target.to_owned(),
            source,
        })?;

        Ok(Self {
            path,
            temp,
            encoder: Some(RecordEncoder::new(BufWriter::new(file))),
            written: 0,
        })
    }

    fn write_error(&self, source: io::Error) -> ReduceError {
        ReduceError::Write {
            path: self.temp.clone().unwrap_or_else(|| self.path.clone()),
            source,
        }
    }

    pub fn write(&mut self, kv: &KeyValue) -> Result<()> {
        let res = match self.encoder.as_mut() {
            Some(encoder) => encoder.encode(kv),
            None => return Ok(()),
        };
        res.map_err(|e| self.write_error(e))?;
        self.written += 1;
        Ok(())
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> Result<()> {
        let encoder = match self.encoder.take() {
            Some(encoder) => encoder,
            None => return Ok(()),
        };
        let res = encoder
            .finish()
            .and_then(|w| w.into_inner().map_err(io::Error::from))
            .and_then(|file| match self.temp {
                Some(_) => file.sync_all(),
                None => Ok(()),
            });
        res.map_err(|e| self.write_error(e))?;

        if let Some(temp) = self.temp.take() {
            if let Err(e) = fs::rename(&temp, &self.path) {
                self.temp = Some(temp);
                return Err(self.write_error(e));
            }
        }
        Ok(())
    }
}

impl Drop for OutputWriter {
    fn drop(&mut self) {
        // closes the handle before the temp file goes away
        self.encoder.take();
        if let Some(temp) = self.temp.take() {
            if let Err(e) = fs::remove_file(&temp) {
                warn!("cannot remove {}: {}", temp.display(), e);
            }
        }
    }
}
