//! Line-driven input models.
//!
//! Field and script files are both read one line at a time into a model that
//! validates itself once the input ends. [`LineModel`] is that two-step
//! contract; [`read_model`] drives any model over any [`BufRead`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::EngineError;

/// A model accumulated line by line and validated at the end.
pub trait LineModel {
    /// What the model produces once the input is exhausted.
    type Output;

    /// Consume one line. `line_no` is 1-based.
    fn process_line(&mut self, line_no: usize, line: &str) -> Result<(), EngineError>;

    /// Validate what was read and produce the finished value.
    fn finish(self) -> Result<Self::Output, EngineError>;
}

/// Feed every line of `reader` to `model`, then finish it.
pub fn read_model<M: LineModel>(reader: impl BufRead, mut model: M) -> Result<M::Output, EngineError> {
    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| EngineError::Read {
            line: line_no,
            source,
        })?;
        model.process_line(line_no, &line)?;
    }
    model.finish()
}

/// Open `path` and read it into `model`.
pub fn load_model<M: LineModel>(path: &Path, model: M) -> Result<M::Output, EngineError> {
    tracing::debug!(path = %path.display(), "processing file");
    let file = File::open(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_model(BufReader::new(file), model)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collects trimmed lines; rejects input with no lines.
    #[derive(Default)]
    struct Lines(Vec<(usize, String)>);

    impl LineModel for Lines {
        type Output = Vec<(usize, String)>;

        fn process_line(&mut self, line_no: usize, line: &str) -> Result<(), EngineError> {
            self.0.push((line_no, line.trim().to_owned()));
            Ok(())
        }

        fn finish(self) -> Result<Self::Output, EngineError> {
            if self.0.is_empty() {
                return Err(EngineError::EmptyScript);
            }
            Ok(self.0)
        }
    }

    #[test]
    fn lines_are_numbered_from_one() {
        let out = read_model("first\n  second \n".as_bytes(), Lines::default()).unwrap();
        assert_eq!(out, vec![(1, "first".to_owned()), (2, "second".to_owned())]);
    }

    #[test]
    fn finish_runs_after_the_last_line() {
        let err = read_model("".as_bytes(), Lines::default()).unwrap_err();
        assert!(matches!(err, EngineError::EmptyScript));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_model(Path::new("/no/such/field.txt"), Lines::default()).unwrap_err();
        match err {
            EngineError::Io { path, .. } => assert_eq!(path, Path::new("/no/such/field.txt")),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
