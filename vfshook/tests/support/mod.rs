//! A stand-in mount service listening on a Unix socket in a temp dir.

#![allow(dead_code, clippy::unwrap_used, missing_docs)]

use std::io::{Read, Write};
use std::os::unix::net::UnixListener;
use std::path::{Path, PathBuf};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Response written after the request is read, one `write` per chunk with
/// a short pause between them. The connection closes after the last one.
#[derive(Debug, Clone)]
pub struct Reply(pub Vec<Vec<u8>>);

impl Reply {
    pub fn whole(bytes: &[u8]) -> Self {
        Self(vec![bytes.to_vec()])
    }

    pub fn chunks(chunks: &[&[u8]]) -> Self {
        Self(chunks.iter().map(|c| c.to_vec()).collect())
    }
}

/// Service bound to `<tempdir>/pipe` that answers a fixed number of
/// connections and records each request it read.
pub struct FakeService {
    dir: tempfile::TempDir,
    path: PathBuf,
    handle: Option<JoinHandle<Vec<Vec<u8>>>>,
}

impl FakeService {
    pub fn start(reply: Reply, connections: usize) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipe");
        Self::start_at(dir, path, reply, connections)
    }

    /// Binds at an explicit path inside `dir`.
    pub fn start_at(dir: tempfile::TempDir, path: PathBuf, reply: Reply, connections: usize) -> Self {
        let listener = UnixListener::bind(&path).unwrap();
        let handle = thread::spawn(move || {
            let mut requests = Vec::new();
            for _ in 0..connections {
                let (mut stream, _) = listener.accept().unwrap();
                let mut request = [0u8; 6];
                stream.read_exact(&mut request).unwrap();
                requests.push(request.to_vec());

                for chunk in &reply.0 {
                    stream.write_all(chunk).unwrap();
                    stream.flush().unwrap();
                    thread::sleep(Duration::from_millis(20));
                }
            }
            requests
        });
        Self {
            dir,
            path,
            handle: Some(handle),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Waits for the service thread and returns the requests it read.
    pub fn requests(mut self) -> Vec<Vec<u8>> {
        self.handle.take().unwrap().join().unwrap()
    }
}
