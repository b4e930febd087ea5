use std::{fs::File, io::BufReader, path::PathBuf};

use log::{debug, warn};

use crate::{
    error::{ReduceError, Result},
    locator::PartitionLocator,
    record::{KeyValue, RecordDecoder},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePolicy {
    // decode error ends that shard
    Permissive,
    Strict,
}

impl Default for DecodePolicy {
    fn default() -> Self {
        DecodePolicy::Permissive
    }
}

struct OpenShard {
    path: PathBuf,
    decoder: RecordDecoder<BufReader<File>>,
    records: usize,
}

/// Yields the records of one reduce partition, shard 0 first, with one shard
/// file open at a time.
pub struct ShardReader<'a, L: PartitionLocator + ?Sized> {
    locator: &'a L,
    job: &'a str,
    reduce_task: usize,
    n_map: usize,
    policy: DecodePolicy,
    next_map: usize,
    current: Option<OpenShard>,
    failed: bool,
}

impl<'a, L: PartitionLocator + ?Sized> ShardReader<'a, L> {
    pub fn new(
        locator: &'a L,
        job: &'a str,
        reduce_task: usize,
        n_map: usize,
        policy: DecodePolicy,
    ) -> Self {
        Self {
            locator,
            job,
            reduce_task,
            n_map,
            policy,
            next_map: 0,
            current: None,
            failed: false,
        }
    }

    fn open_next(&mut self) -> Result<Option<OpenShard>> {
        if self.next_map >= self.n_map {
            return Ok(None);
        }
        let map_task = self.next_map;
        self.next_map += 1;

        let path = self.locator.locate(self.job, map_task, self.reduce_task);
        let file = File::open(&path).map_err(|source| ReduceError::ShardUnavailable {
            map_task,
            path: path.clone(),
            source,
        })?;
        debug!("reading shard {}: {}", map_task, path.display());

        Ok(Some(OpenShard {
            path,
            decoder: RecordDecoder::new(BufReader::new(file)),
            records: 0,
        }))
    }
}

impl<'a, L: PartitionLocator + ?Sized> Iterator for ShardReader<'a, L> {
    type Item = Result<KeyValue>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        loop {
            if self.current.is_none() {
                match self.open_next() {
                    Ok(Some(shard)) => self.current = Some(shard),
                    Ok(None) => return None,
                    Err(e) => {
                        self.failed = true;
                        return Some(Err(e));
                    }
                }
            }
            let shard = self.current.as_mut()?;

            match shard.decoder.next_record() {
                Ok(Some(kv)) => {
                    shard.records += 1;
                    return Some(Ok(kv));
                }
                Ok(None) => {
                    debug!("shard {} done, {} records", shard.path.display(), shard.records);
                }
                Err(source) => match self.policy {
                    DecodePolicy::Permissive => {
                        warn!(
                            "shard {}: stopping after {} records: {}",
                            shard.path.display(),
                            shard.records,
                            source
                        );
                    }
                    DecodePolicy::Strict => {
                        self.failed = true;
                        let path = shard.path.clone();
                        let record = shard.records;
                        self.current = None;
                        return Some(Err(ReduceError::MalformedShard {
                            path,
                            record,
                            source,
                        }));
                    }
                },
            }
            // closes the exhausted shard before the next one is opened
            self.current = None;
        }
    }
}
