//! Shared test doubles for the orchestration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use gentests::engine::{EngineError, EngineOptions, GeneratedFunction, GeneratedTest, Generator};

/// Scripted engine response for one path.
#[derive(Clone)]
pub enum Response {
    Tests(Vec<GeneratedTest>),
    /// Fails with an `EngineError::Io` whose message is `<path>: <message>`.
    Fail(String),
}

/// A [`Generator`] that replays scripted responses and records every call.
#[derive(Default)]
pub struct FakeGenerator {
    responses: HashMap<PathBuf, Response>,
    calls: RefCell<Vec<PathBuf>>,
}

impl FakeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, response: Response) -> Self {
        self.responses.insert(path.into(), response);
        self
    }

    pub fn calls(&self) -> Vec<PathBuf> {
        self.calls.borrow().clone()
    }
}

impl Generator for FakeGenerator {
    fn generate(&self, path: &Path, _options: &EngineOptions) -> Result<Vec<GeneratedTest>, EngineError> {
        self.calls.borrow_mut().push(path.to_path_buf());
        match self.responses.get(path) {
            Some(Response::Tests(tests)) => Ok(tests.clone()),
            Some(Response::Fail(message)) => Err(EngineError::Io {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, message.clone()),
            }),
            None => Ok(Vec::new()),
        }
    }
}

/// A generated test with the given destination, content, and test names.
pub fn generated(path: impl Into<PathBuf>, output: &[u8], names: &[&str]) -> GeneratedTest {
    GeneratedTest {
        path: path.into(),
        output: output.to_vec(),
        functions: names.iter().map(|name| GeneratedFunction::new(*name, *name)).collect(),
    }
}

/// Run a batch into an in-memory sink and return what was written.
pub fn transcript<P: AsRef<Path>>(
    paths: &[P],
    options: &gentests::Options,
    generator: &impl Generator,
) -> String {
    let mut out = Vec::new();
    gentests::process::run(&mut out, paths, options, generator).expect("in-memory sink never fails");
    String::from_utf8(out).expect("transcript is UTF-8")
}
