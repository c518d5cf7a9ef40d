//! Validated input/output pair for one formatting run

use crate::error::{Error, Result};
use crate::format::Formatter;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefix of derived output file names
pub const OUTPUT_PREFIX: &str = "formatted_";

/// One input document and the path its reformatted copy goes to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormatJob {
    input: PathBuf,
    output: PathBuf,
}

impl FormatJob {
    /// Validate `input` and work out the output path.
    ///
    /// Without an explicit `output` the result is named
    /// `formatted_<file name>`, placed in `out_dir` or next to the input.
    pub fn new(input: PathBuf, output: Option<PathBuf>, out_dir: Option<PathBuf>) -> Result<Self> {
        let file_name = input
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.trim().is_empty())
            .ok_or(Error::EmptyFileName)?;

        if !file_name.ends_with(".docx") {
            return Err(Error::UnsupportedExtension(file_name));
        }

        let output = match output {
            Some(output) => output,
            None => {
                let dir = out_dir
                    .or_else(|| input.parent().map(Path::to_path_buf))
                    .unwrap_or_default();
                dir.join(format!("{}{}", OUTPUT_PREFIX, file_name))
            }
        };

        if output == input {
            return Err(Error::OutputIsInput(output));
        }

        Ok(FormatJob { input, output })
    }

    /// Input document
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Output document
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Create the output directory if needed and run `formatter`
    pub fn run(&self, formatter: &Formatter) -> Result<()> {
        if let Some(dir) = self.output.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        formatter.format_file(&self.input, &self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_output_next_to_input() {
        let job = FormatJob::new(PathBuf::from("uploads/syllabus.docx"), None, None).unwrap();
        assert_eq!(job.output(), Path::new("uploads/formatted_syllabus.docx"));
    }

    #[test]
    fn test_default_output_in_out_dir() {
        let job = FormatJob::new(
            PathBuf::from("uploads/syllabus.docx"),
            None,
            Some(PathBuf::from("outputs")),
        )
        .unwrap();
        assert_eq!(job.output(), Path::new("outputs/formatted_syllabus.docx"));
    }

    #[test]
    fn test_bare_file_name() {
        let job = FormatJob::new(PathBuf::from("syllabus.docx"), None, None).unwrap();
        assert_eq!(job.output(), Path::new("formatted_syllabus.docx"));
    }

    #[test]
    fn test_explicit_output_wins() {
        let job = FormatJob::new(
            PathBuf::from("a.docx"),
            Some(PathBuf::from("out/b.docx")),
            Some(PathBuf::from("ignored")),
        )
        .unwrap();
        assert_eq!(job.output(), Path::new("out/b.docx"));
    }

    #[test]
    fn test_rejections() {
        assert!(matches!(
            FormatJob::new(PathBuf::new(), None, None),
            Err(Error::EmptyFileName)
        ));
        assert!(matches!(
            FormatJob::new(PathBuf::from("notes.pdf"), None, None),
            Err(Error::UnsupportedExtension(name)) if name == "notes.pdf"
        ));
        assert!(matches!(
            FormatJob::new(PathBuf::from("notes.DOCX"), None, None),
            Err(Error::UnsupportedExtension(_))
        ));
        assert!(matches!(
            FormatJob::new(PathBuf::from("a.docx"), Some(PathBuf::from("a.docx")), None),
            Err(Error::OutputIsInput(_))
        ));
    }
}
