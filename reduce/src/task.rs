use std::path::{Path, PathBuf};

use common::Reducer;
use log::{info, warn};

use crate::{
    error::{ReduceError, Result},
    group::Groups,
    locator::{NameLocator, PartitionLocator},
    record::KeyValue,
    shard::{DecodePolicy, ShardReader},
    sort::sorted_keys,
    writer::{OutputMode, OutputWriter},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceOptions {
    pub decode: DecodePolicy,
    pub output: OutputMode,
}

#[derive(Debug, Clone)]
pub struct ReduceTask {
    pub job: String,
    pub reduce_task: usize,
    pub n_map: usize,
    pub output: PathBuf,
}

impl ReduceTask {
    pub fn new(
        job: impl Into<String>,
        reduce_task: usize,
        n_map: usize,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            job: job.into(),
            reduce_task,
            n_map,
            output: output.into(),
        }
    }

    pub fn run<L, R>(&self, locator: &L, reducer: &R, options: ReduceOptions) -> Result<()>
    where
        L: PartitionLocator + ?Sized,
        R: Reducer + ?Sized,
    {
        info!(
            "reduce task {} of job {}: {} shards -> {}",
            self.reduce_task,
            self.job,
            self.n_map,
            self.output.display()
        );

        let mut groups = Groups::new();
        let shards = ShardReader::new(
            locator,
            &self.job,
            self.reduce_task,
            self.n_map,
            options.decode,
        );
        for kv in shards {
            groups.insert(kv?);
        }
        if groups.is_empty() {
            warn!("reduce task {} of job {}: no records", self.reduce_task, self.job);
        }

        let keys = sorted_keys(groups.keys().to_vec());

        let mut output = OutputWriter::create(&self.output, options.output)?;
        for key in keys {
            let values = groups.take(&key);
            let value = reducer
                .reduce(key.clone(), values)
                .map_err(|e| ReduceError::Reduce {
                    key: key.clone(),
                    source: e.into(),
                })?;
            output.write(&KeyValue { key, value })?;
        }
        debug_assert_eq!(output.written(), groups.len());
        output.finish()?;

        info!(
            "reduce task {} of job {} done: {} records, {} keys",
            self.reduce_task,
            self.job,
            groups.record_count(),
            groups.len()
        );
        Ok(())
    }
}

/// Reads shards named by [`NameLocator`] in the current directory.
pub fn do_reduce<R>(
    job: &str,
    reduce_task: usize,
    out_file: impl AsRef<Path>,
    n_map: usize,
    reducer: &R,
) -> Result<()>
where
    R: Reducer + ?Sized,
{
    ReduceTask::new(job, reduce_task, n_map, out_file.as_ref())
        .run(&NameLocator::default(), reducer, ReduceOptions::default())
}
