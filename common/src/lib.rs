pub use eyre::Result;
use libloading::{library_filename, Library};
use std::{ffi::OsStr, ops::Deref, sync::Arc};

/// Called once per distinct key with all of its values.
pub trait Reducer: Send + Sync {
    fn reduce(&self, key: String, values: Vec<String>) -> Result<String>;
}

impl<F> Reducer for F
where
    F: Fn(String, Vec<String>) -> Result<String> + Send + Sync,
{
    fn reduce(&self, key: String, values: Vec<String>) -> Result<String> {
        self(key, values)
    }
}

type BuildFn = fn() -> Box<dyn Reducer>;

#[macro_export]
macro_rules! declare_reducer {
    ($constructor:expr) => {
        #[no_mangle]
        pub fn _build_reducer() -> Box<dyn ::common::Reducer> {
            Box::new($constructor())
        }
    };
}

pub struct LoadedReducer {
    // dropped before `_lib`, the code backing it lives in the library
    reducer: Arc<dyn Reducer>,
    _lib: Library,
}

impl Deref for LoadedReducer {
    type Target = Arc<dyn Reducer>;

    fn deref(&self) -> &Self::Target {
        &self.reducer
    }
}

pub fn load_reducer(name: impl AsRef<OsStr>) -> Result<LoadedReducer> {
    let (reducer, lib) = unsafe {
        let lib = Library::new(library_filename(name))?;
        let reducer = {
            let build_fn = lib.get::<BuildFn>(b"_build_reducer\0")?;
            build_fn()
        };
        (reducer, lib)
    };
    Ok(LoadedReducer {
        reducer: Arc::from(reducer),
        _lib: lib,
    })
}
