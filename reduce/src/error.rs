use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = ReduceError> = std::result::Result<T, E>;

#[derive(Error, Debug)]
pub enum ReduceError {
    #[error("cannot open shard {map_task} at {}", .path.display())]
    ShardUnavailable {
        map_task: usize,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed record #{record} in shard {}", .path.display())]
    MalformedShard {
        path: PathBuf,
        record: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("cannot create output {}", .path.display())]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed writing output {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("reduce function failed on key {key:?}")]
    Reduce {
        key: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
