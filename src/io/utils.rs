//! Utilities for output.

use super::OverwriteMode;
use std::{
    fs,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;

#[cfg(feature = "json")]
use serde::Serialize;

/// Output path whose content is first written to a temporary file, which
/// only replaces the target when writing has completed.
#[derive(Debug)]
pub struct AtomicOutputPath {
    target_path: PathBuf,
    temporary_file: NamedTempFile,
}

impl AtomicOutputPath {
    /// Creates a temporary file in the directory of the given target path,
    /// creating the directory if it does not exist.
    pub fn new<P: AsRef<Path>>(target_path: P) -> io::Result<Self> {
        let target_path = target_path.as_ref().to_path_buf();
        let file_name = target_path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Output path {} has no file name", target_path.display()),
            )
        })?;
        let directory = match target_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&directory)?;

        let temporary_file = tempfile::Builder::new()
            .prefix(&format!(".{}.", file_name.to_string_lossy()))
            .suffix(".tmp")
            .tempfile_in(&directory)?;

        Ok(Self {
            target_path,
            temporary_file,
        })
    }

    /// Returns the name of the target file, for use in messages.
    pub fn target_file_name(&self) -> String {
        self.target_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Checks whether writing to the target path must be skipped because
    /// it would overwrite an existing file.
    ///
    /// In `OverwriteMode::Ask` the user is prompted for permission.
    pub fn write_should_be_skipped(&self, overwrite_mode: OverwriteMode) -> bool {
        if !self.target_path.exists() {
            return false;
        }
        match overwrite_mode {
            OverwriteMode::Always => false,
            OverwriteMode::Never => {
                eprintln!(
                    "File {} already exists, skipping",
                    self.target_path.display()
                );
                true
            }
            OverwriteMode::Ask => !user_says_yes(
                &format!(
                    "File {} already exists, overwrite?",
                    self.target_path.display()
                ),
                false,
            )
            .unwrap_or_else(|err| {
                eprintln!("Warning: Not overwriting due to error: {}", err);
                false
            }),
        }
    }

    /// Returns a buffered writer to the temporary file.
    pub fn writer(&mut self) -> BufWriter<&mut fs::File> {
        BufWriter::new(self.temporary_file.as_file_mut())
    }

    /// Moves the temporary file to the target path, replacing any existing file.
    pub fn perform_replace(self) -> io::Result<()> {
        self.temporary_file
            .persist(&self.target_path)
            .map(|_| ())
            .map_err(|err| err.error)
    }
}

/// Asks the user a yes/no question on the terminal and returns the answer.
///
/// An empty answer selects `default`.
pub fn user_says_yes(question: &str, default: bool) -> io::Result<bool> {
    let options = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        print!("{} {} ", question, options);
        io::stdout().flush()?;

        let mut answer = String::new();
        if io::stdin().read_line(&mut answer)? == 0 {
            return Ok(default);
        }
        match parse_answer(&answer) {
            Some(choice) => return Ok(choice),
            None if answer.trim().is_empty() => return Ok(default),
            None => println!("Please answer y or n"),
        }
    }
}

fn parse_answer(answer: &str) -> Option<bool> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Serializes the given data as JSON to the given writer.
#[cfg(feature = "json")]
pub fn write_data_as_json<T: Serialize, W: Write>(writer: W, data: &T) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, data).map_err(io::Error::from)
}

#[cfg(test)]
mod tests {

    use super::*;
    use std::io::Read;

    #[test]
    fn answers_are_parsed_case_insensitively() {
        assert_eq!(parse_answer("Y\n"), Some(true));
        assert_eq!(parse_answer(" yes "), Some(true));
        assert_eq!(parse_answer("No"), Some(false));
        assert_eq!(parse_answer("maybe"), None);
    }

    #[test]
    fn replacing_moves_written_content_to_target() {
        let directory = tempfile::tempdir().unwrap();
        let target_path = directory.path().join("nested").join("out.csv");

        let mut atomic_output_path = AtomicOutputPath::new(&target_path).unwrap();
        assert!(!atomic_output_path.write_should_be_skipped(OverwriteMode::Never));
        assert_eq!(atomic_output_path.target_file_name(), "out.csv");
        {
            let mut writer = atomic_output_path.writer();
            writeln!(writer, "a,b").unwrap();
        }
        assert!(!target_path.exists());
        atomic_output_path.perform_replace().unwrap();

        let mut content = String::new();
        fs::File::open(&target_path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "a,b\n");

        let existing = AtomicOutputPath::new(&target_path).unwrap();
        assert!(existing.write_should_be_skipped(OverwriteMode::Never));
        assert!(!existing.write_should_be_skipped(OverwriteMode::Always));
    }
}
