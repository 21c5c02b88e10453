// SPDX-License-Identifier: MPL-2.0
//! Located resources.
//!
//! A [`LocatedResource`] is what a successful contributor query hands back: a
//! locator string for diagnostics plus the means to open a byte stream. Opening
//! is deferred until the caller reads, so a resource that vanished between
//! lookup and read surfaces as an unreadable resource rather than a lookup miss.

use crate::error::{Error, Result};
use std::borrow::Cow;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Clone)]
enum Source {
    Embedded(Cow<'static, [u8]>),
    Memory(Arc<[u8]>),
    File(PathBuf),
}

/// Handle to a resource found by a contributor or by a default lookup.
#[derive(Clone)]
pub struct LocatedResource {
    locator: String,
    source: Source,
}

impl LocatedResource {
    /// A resource compiled into the binary.
    pub fn embedded(locator: impl Into<String>, data: Cow<'static, [u8]>) -> Self {
        Self {
            locator: locator.into(),
            source: Source::Embedded(data),
        }
    }

    /// A resource held in memory, e.g. supplied by the host.
    pub fn from_bytes(locator: impl Into<String>, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            locator: locator.into(),
            source: Source::Memory(data.into()),
        }
    }

    /// A resource on the local filesystem. The file is opened on read.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            locator: format!("file://{}", path.display()),
            source: Source::File(path),
        }
    }

    /// Where this resource came from, for logs and diagnostics.
    pub fn locator(&self) -> &str {
        &self.locator
    }

    /// Opens a fresh stream over the resource.
    ///
    /// The stream is owned by the caller and released when dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnreadableResource`] if a file-backed resource can no
    /// longer be opened.
    pub fn open(&self) -> Result<Box<dyn Read + Send + '_>> {
        match &self.source {
            Source::Embedded(data) => Ok(Box::new(Cursor::new(data.as_ref()))),
            Source::Memory(data) => Ok(Box::new(Cursor::new(data.as_ref()))),
            Source::File(path) => File::open(path)
                .map(|file| Box::new(BufReader::new(file)) as Box<dyn Read + Send>)
                .map_err(|err| Error::unreadable(&self.locator, err.into())),
        }
    }

    /// Reads the whole resource. The underlying stream is closed before
    /// returning, whether or not reading succeeded.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnreadableResource`] on any open or read failure.
    pub fn read_all(&self) -> Result<Vec<u8>> {
        let mut stream = self.open()?;
        let mut buf = Vec::new();
        stream
            .read_to_end(&mut buf)
            .map_err(|err| Error::unreadable(&self.locator, err.into()))?;
        Ok(buf)
    }
}

impl fmt::Debug for LocatedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.source {
            Source::Embedded(_) => "embedded",
            Source::Memory(_) => "memory",
            Source::File(_) => "file",
        };
        f.debug_struct("LocatedResource")
            .field("locator", &self.locator)
            .field("kind", &kind)
            .finish()
    }
}
