use crate::common::*;

/// The dataset partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Test,
}

impl Split {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Train => "train",
            Self::Test => "test",
        }
    }

    /// The image directory name, e.g. `images_train`.
    pub fn image_dir_name(&self) -> String {
        format!("images_{}", self.as_str())
    }

    /// The annotation directory name, e.g. `segments_train`.
    pub fn annotation_dir_name(&self) -> String {
        format!("segments_{}", self.as_str())
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let split = match text {
            "train" => Self::Train,
            "test" => Self::Test,
            _ => bail!("invalid split '{}', expect 'train' or 'test'", text),
        };
        Ok(split)
    }
}
