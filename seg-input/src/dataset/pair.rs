use crate::common::*;

/// The pair of an image file and its annotation file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilePair {
    pub image_path: PathBuf,
    pub annotation_path: PathBuf,
}

impl FilePair {
    /// Pair the image file with the annotation path derived from its name.
    pub fn from_image_path(image_path: impl Into<PathBuf>) -> Result<Self> {
        let image_path = image_path.into();
        let annotation_path = annotation_path_for(&image_path)?;
        Ok(Self {
            image_path,
            annotation_path,
        })
    }
}

/// Derive the annotation path from an image path.
///
/// Every `images_` is replaced by `segments_` and `_anno` is inserted in
/// front of the last four characters, so `/d/images_train/a.png` maps to
/// `/d/segments_train/a_anno.png`. The annotation file is not required to
/// exist.
pub fn annotation_path_for(image_path: impl AsRef<Path>) -> Result<PathBuf> {
    let image_path = image_path.as_ref();
    let text = image_path
        .to_str()
        .ok_or_else(|| format_err!("non-UTF-8 path '{}'", image_path.display()))?
        .replace("images_", "segments_");

    let split_at = text
        .len()
        .checked_sub(4)
        .filter(|&index| text.is_char_boundary(index))
        .ok_or_else(|| {
            format_err!(
                "the path '{}' is too short to carry a file extension",
                image_path.display()
            )
        })?;
    let (stem, ext) = text.split_at(split_at);

    Ok(PathBuf::from(format!("{}_anno{}", stem, ext)))
}

/// List files in `dir` whose names end with `extension`, sorted by path.
pub fn list_image_files(dir: impl AsRef<Path>, extension: &str) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    let mut paths = fs::read_dir(dir)
        .with_context(|| format!("failed to list directory '{}'", dir.display()))?
        .map(|entry| -> Result<_> {
            let entry = entry?;
            let name = entry.file_name();
            let path = name
                .to_str()
                .filter(|name| name.ends_with(extension))
                .map(|name| dir.join(name));
            Ok(path)
        })
        .filter_map(|result| result.transpose())
        .collect::<Result<Vec<_>>>()?;
    paths.sort();

    Ok(paths)
}
