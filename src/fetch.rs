//! Retrieval of the input documents.
//!
//! Both inputs are fetched concurrently and nothing is drawn unless
//! both arrive: [`load`] fails as soon as either of them fails.

use std::{fs, panic, path::PathBuf, thread};
use serde::de::DeserializeOwned;
use tracing::debug;
use crate::data::{Observation, ObservationIndex};
use crate::error::{Error, Result};
use crate::topology::Topology;

/// A resource providing the bytes of a document.
pub trait Source: Sync {
    /// Human readable location, used in diagnostics.
    fn location(&self) -> &str;

    fn fetch(&self) -> Result<Vec<u8>>;
}

/// A document on the local file system.
#[derive(Debug, Clone)]
pub struct FileSource {
    location: String,
    path: PathBuf,
}

impl FileSource {
    /// Interpret `location` as a path, possibly written as a `file:`
    /// URL.  Other URL schemes are not supported.
    pub fn new(location: &str) -> Result<FileSource> {
        let path = match location.split_once("://") {
            None => location,
            Some(("file", path)) => path,
            Some(_) => return Err(Error::UnsupportedLocation(location.into())),
        };
        Ok(FileSource { location: location.to_string(), path: path.into() })
    }
}

impl Source for FileSource {
    fn location(&self) -> &str { &self.location }

    fn fetch(&self) -> Result<Vec<u8>> {
        fs::read(&self.path).map_err(|source| Error::Fetch {
            location: self.location.clone(), source })
    }
}

/// Fetch `source` and parse it as JSON.
pub fn fetch_json<T: DeserializeOwned>(source: &dyn Source) -> Result<T> {
    debug!(location = source.location(), "fetching");
    let bytes = source.fetch()?;
    debug!(location = source.location(), bytes = bytes.len(), "fetched");
    serde_json::from_slice(&bytes).map_err(|e| Error::Parse {
        location: source.location().to_string(), source: e })
}

/// Run `a` and `b` concurrently and wait for both.  If both fail,
/// the error of `a` is returned.
pub fn join<A, B, FA, FB>(a: FA, b: FB) -> Result<(A, B)>
where A: Send, B: Send,
      FA: FnOnce() -> Result<A> + Send,
      FB: FnOnce() -> Result<B> + Send {
    thread::scope(|s| {
        let hb = s.spawn(b);
        let ra = a();
        let rb = hb.join().unwrap_or_else(|p| panic::resume_unwind(p));
        Ok((ra?, rb?))
    })
}

/// Fetch and decode the topology and the observations.
pub fn load(topology: &dyn Source, statistics: &dyn Source)
            -> Result<(Topology, ObservationIndex)> {
    let (topology, observations) = join(
        || fetch_json::<Topology>(topology),
        || fetch_json::<Vec<Observation>>(statistics))?;
    Ok((topology, ObservationIndex::new(observations)))
}
