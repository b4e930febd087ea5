use std::{env, fs};

use common::Result;
use reduce::{do_reduce, merge_name, record::RecordEncoder, KeyValue, NameLocator, PartitionLocator};
use tempfile::TempDir;

// Only test in this binary: it changes the working directory.
#[test]
fn default_names_in_working_directory() -> Result<()> {
    let dir = TempDir::new()?;
    env::set_current_dir(dir.path())?;

    let locator = NameLocator::default();
    for (m, kvs) in [vec![("b", "1")], vec![("a", "2"), ("b", "3")]].iter().enumerate() {
        let mut enc = RecordEncoder::new(fs::File::create(locator.locate("wc", m, 0))?);
        for (k, v) in kvs {
            enc.encode(&KeyValue::new(*k, *v))?;
        }
        enc.finish()?;
    }

    let out = merge_name("wc", 0);
    let count = |_: String, vs: Vec<String>| -> Result<String> { Ok(vs.len().to_string()) };
    do_reduce("wc", 0, &out, 2, &count)?;

    assert_eq!(
        fs::read_to_string(dir.path().join("mrtmp.wc-res-0"))?,
        "{\"Key\":\"a\",\"Value\":\"1\"}\n{\"Key\":\"b\",\"Value\":\"2\"}\n"
    );
    Ok(())
}
