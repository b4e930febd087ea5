use common::load_reducer;
use eyre::Result;
use log::info;
use reduce::{
    init_logger, merge_name, DecodePolicy, NameLocator, OutputMode, ReduceOptions, ReduceTask,
};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
struct Opt {
    #[structopt(short, long)]
    job: String,
    #[structopt(short, long)]
    reduce_task: usize,
    #[structopt(short = "m", long)]
    n_map: usize,
    #[structopt(short, long)]
    app_name: PathBuf,
    /// Directory holding the map shards
    #[structopt(short, long, default_value = ".")]
    dir: PathBuf,
    /// Defaults to `mrtmp.<job>-res-<reduce_task>`
    #[structopt(short, long)]
    output: Option<PathBuf>,
    /// Fail on undecodable shard data instead of ending that shard
    #[structopt(long)]
    strict: bool,
    /// Write to a temp file and rename it into place
    #[structopt(long)]
    atomic: bool,
}

fn main() -> Result<()> {
    init_logger();

    let opt = Opt::from_args();
    let reducer = load_reducer(&opt.app_name)?;
    info!("loaded reducer {}", opt.app_name.display());

    let output = opt
        .output
        .clone()
        .unwrap_or_else(|| merge_name(&opt.job, opt.reduce_task).into());
    let options = ReduceOptions {
        decode: if opt.strict {
            DecodePolicy::Strict
        } else {
            DecodePolicy::Permissive
        },
        output: if opt.atomic {
            OutputMode::Atomic
        } else {
            OutputMode::Direct
        },
    };

    let task = ReduceTask::new(opt.job.clone(), opt.reduce_task, opt.n_map, output);
    task.run(&NameLocator::new(&opt.dir), &**reducer, options)?;
    Ok(())
}
