pub mod error;
pub mod group;
pub mod locator;
pub mod record;
pub mod shard;
pub mod sort;
pub mod task;
pub mod writer;

pub use error::ReduceError;
pub use locator::{merge_name, NameLocator, PartitionLocator};
pub use record::KeyValue;
pub use shard::DecodePolicy;
pub use task::{do_reduce, ReduceOptions, ReduceTask};
pub use writer::OutputMode;

pub fn init_logger() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init()
}
