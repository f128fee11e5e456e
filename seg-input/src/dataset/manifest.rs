use super::*;
use crate::{common::*, config::InputConfig};

/// The row sampling method of train manifests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainSampling {
    /// Reorder rows by a random permutation.
    Permutation,
    /// Draw as many rows as files uniformly with replacement.
    Bootstrap,
}

/// The ordered list of image/annotation pairs of a split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    pub rows: Vec<FilePair>,
}

impl Manifest {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Load all rows of a headerless two-column manifest file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rows = ::csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("failed to open manifest '{}'", path.display()))?
            .deserialize()
            .collect::<Result<Vec<FilePair>, _>>()
            .with_context(|| format!("failed to parse manifest '{}'", path.display()))?;
        Ok(Self { rows })
    }

    /// Write rows as a headerless two-column CSV file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut writer = ::csv::WriterBuilder::new()
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("failed to create manifest '{}'", path.display()))?;
        self.rows
            .iter()
            .try_for_each(|row| writer.serialize(row))
            .with_context(|| format!("failed to write manifest '{}'", path.display()))?;
        writer.flush()?;
        Ok(())
    }
}

/// The manifest file name of a split.
///
/// The session id only applies to the train split, giving `train<sessid>.csv`.
pub fn manifest_file_name(split: Split, session_id: Option<&str>) -> String {
    match split {
        Split::Train => format!("train{}.csv", session_id.unwrap_or("")),
        Split::Test => "test.csv".into(),
    }
}

/// The manifest file path of a split under the configured manifest directory.
pub fn manifest_path(config: &InputConfig, split: Split, session_id: Option<&str>) -> PathBuf {
    config
        .manifest_dir
        .join(manifest_file_name(split, session_id))
}

/// List the image files of a split and pair them with annotation paths.
///
/// Test rows keep the sorted file order. Train rows are reordered according
/// to `config.train_sampling`, and the same row index applies to both
/// columns so images never separate from their annotations.
pub fn build_manifest<R>(config: &InputConfig, split: Split, rng: &mut R) -> Result<Manifest>
where
    R: Rng,
{
    let image_dir = config.data_dir.join(split.image_dir_name());
    let rows: Vec<_> = list_image_files(&image_dir, &config.image_extension)?
        .into_iter()
        .map(FilePair::from_image_path)
        .collect::<Result<_>>()?;

    if rows.is_empty() {
        warn!("no image files found in '{}'", image_dir.display());
    }

    let rows = match split {
        Split::Test => rows,
        Split::Train => {
            let num_rows = rows.len();
            let indices: Vec<usize> = match config.train_sampling {
                TrainSampling::Permutation => {
                    let mut indices: Vec<_> = (0..num_rows).collect();
                    indices.shuffle(rng);
                    indices
                }
                TrainSampling::Bootstrap => (0..num_rows)
                    .map(|_| rng.gen_range(0..num_rows))
                    .collect(),
            };
            indices.into_iter().map(|index| rows[index].clone()).collect()
        }
    };

    Ok(Manifest { rows })
}

/// Build the manifest of a split and write it to the manifest directory.
///
/// It returns the path of the written file.
#[instrument(skip(config))]
pub fn generate_manifest(
    config: &InputConfig,
    split: Split,
    session_id: Option<&str>,
) -> Result<PathBuf> {
    let mut rng = config.rng();
    let manifest = build_manifest(config, split, &mut rng)?;
    let path = manifest_path(config, split, session_id);
    manifest.write(&path)?;
    info!(
        "wrote {} rows to manifest '{}'",
        manifest.len(),
        path.display()
    );
    Ok(path)
}
