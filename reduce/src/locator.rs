use std::path::PathBuf;

pub trait PartitionLocator {
    fn locate(&self, job: &str, map_task: usize, reduce_task: usize) -> PathBuf;
}

impl<F> PartitionLocator for F
where
    F: Fn(&str, usize, usize) -> PathBuf,
{
    fn locate(&self, job: &str, map_task: usize, reduce_task: usize) -> PathBuf {
        self(job, map_task, reduce_task)
    }
}

/// `<dir>/mrtmp.<job>-<map>-<reduce>`
#[derive(Debug, Clone)]
pub struct NameLocator {
    dir: PathBuf,
}

impl NameLocator {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl Default for NameLocator {
    fn default() -> Self {
        Self::new(".")
    }
}

impl PartitionLocator for NameLocator {
    fn locate(&self, job: &str, map_task: usize, reduce_task: usize) -> PathBuf {
        self.dir.join(format!("mrtmp.{}-{}-{}", job, map_task, reduce_task))
    }
}

pub fn merge_name(job: &str, reduce_task: usize) -> String {
    format!("mrtmp.{}-res-{}", job, reduce_task)
}
