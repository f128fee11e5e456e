use super::*;
use crate::common::*;

/// A manifest line along with the parsed file pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestLine {
    /// The zero-based pass over the manifest file.
    pub epoch: usize,
    /// The one-based line number in the manifest file.
    pub line_number: usize,
    /// The raw CSV text.
    pub line: String,
    pub pair: FilePair,
}

/// Streams manifest lines from a CSV file, one line at a time.
///
/// The file is reopened at the end of each pass until `num_epochs` passes
/// are done. Without an epoch limit the reader never ends.
#[derive(Debug)]
pub struct ManifestReader {
    path: PathBuf,
    num_epochs: Option<usize>,
    epoch: usize,
    line_number: usize,
    epoch_rows: usize,
    exhausted: bool,
    lines: Option<io::Lines<BufReader<fs::File>>>,
}

impl ManifestReader {
    pub fn open(path: impl AsRef<Path>, num_epochs: Option<NonZeroUsize>) -> Result<Self> {
        let path = path.as_ref().to_owned();
        let lines = open_lines(&path)?;

        Ok(Self {
            path,
            num_epochs: num_epochs.map(NonZeroUsize::get),
            epoch: 0,
            line_number: 0,
            epoch_rows: 0,
            exhausted: false,
            lines: Some(lines),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewind to the first line of the first epoch.
    pub fn restart(&mut self) {
        self.epoch = 0;
        self.line_number = 0;
        self.epoch_rows = 0;
        self.exhausted = false;
        self.lines = None;
    }

    fn finish_epoch(&mut self) -> Result<()> {
        self.lines = None;
        self.epoch += 1;

        if self.epoch_rows == 0 {
            self.exhausted = true;
            bail!("the manifest '{}' has no rows", self.path.display());
        }
        self.epoch_rows = 0;

        if let Some(num_epochs) = self.num_epochs {
            if self.epoch >= num_epochs {
                self.exhausted = true;
            }
        }

        Ok(())
    }
}

impl Iterator for ManifestReader {
    type Item = Result<ManifestLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.exhausted {
                return None;
            }

            let next_line = match self.lines.as_mut() {
                Some(lines) => lines.next(),
                None => {
                    match open_lines(&self.path) {
                        Ok(lines) => {
                            self.lines = Some(lines);
                            self.line_number = 0;
                        }
                        Err(err) => {
                            self.exhausted = true;
                            return Some(Err(err));
                        }
                    }
                    continue;
                }
            };

            let line = match next_line {
                Some(Ok(line)) => line,
                Some(Err(err)) => {
                    self.exhausted = true;
                    let err = Error::from(err).context(format!(
                        "failed to read manifest '{}'",
                        self.path.display()
                    ));
                    return Some(Err(err));
                }
                None => {
                    if let Err(err) = self.finish_epoch() {
                        return Some(Err(err));
                    }
                    trace!("start epoch {} of '{}'", self.epoch, self.path.display());
                    continue;
                }
            };
            self.line_number += 1;

            if line.trim().is_empty() {
                continue;
            }
            self.epoch_rows += 1;

            let result = parse_line(&line)
                .with_context(|| {
                    format!(
                        "invalid line {} in manifest '{}'",
                        self.line_number,
                        self.path.display()
                    )
                })
                .map(|pair| ManifestLine {
                    epoch: self.epoch,
                    line_number: self.line_number,
                    line,
                    pair,
                });

            if result.is_err() {
                self.exhausted = true;
            }
            return Some(result);
        }
    }
}

fn open_lines(path: &Path) -> Result<io::Lines<BufReader<fs::File>>> {
    let file = fs::File::open(path)
        .with_context(|| format!("failed to open manifest '{}'", path.display()))?;
    Ok(BufReader::new(file).lines())
}

/// Parse a manifest line with exactly two string fields.
pub fn parse_line(line: &str) -> Result<FilePair> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(line.as_bytes());
    let record = reader
        .records()
        .next()
        .ok_or_else(|| format_err!("empty line"))??;
    ensure!(
        record.len() == 2,
        "expect 2 fields, but get {}",
        record.len()
    );

    Ok(FilePair {
        image_path: PathBuf::from(&record[0]),
        annotation_path: PathBuf::from(&record[1]),
    })
}
