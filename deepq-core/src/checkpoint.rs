//! Checkpointing of model parameters.
use crate::{error::DqnError, SaveParams};
use anyhow::Result;
use log::debug;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Identifies a checkpoint by environment and completed-episode count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckpointTag {
    /// Identifier of the environment the model was trained on.
    pub env_id: String,

    /// Number of completed episodes.
    pub episode: usize,
}

impl CheckpointTag {
    /// Constructs a tag.
    pub fn new(env_id: impl Into<String>, episode: usize) -> Self {
        Self {
            env_id: env_id.into(),
            episode,
        }
    }

    /// Returns `<env_id>_episode_<episode>.pth`.
    pub fn file_name(&self) -> String {
        format!("{}_episode_{}.pth", self.env_id, self.episode)
    }
}

/// A sink for parameter snapshots.
pub trait Checkpointer {
    /// Persists `params` under `tag` and returns where they were written.
    fn checkpoint(&mut self, tag: &CheckpointTag, params: &dyn SaveParams) -> Result<PathBuf>;
}

/// Writes checkpoints as files in a directory.
///
/// A checkpoint is written once; a second request with the same tag fails
/// with [`DqnError::CheckpointExists`].
#[derive(Debug, Clone)]
pub struct DirCheckpointer {
    model_dir: PathBuf,
}

impl DirCheckpointer {
    /// Constructs a checkpointer writing into `model_dir`.
    pub fn new(model_dir: impl AsRef<Path>) -> Self {
        Self {
            model_dir: model_dir.as_ref().to_path_buf(),
        }
    }

    /// Returns the path of the checkpoint for `tag`.
    pub fn path(&self, tag: &CheckpointTag) -> PathBuf {
        self.model_dir.join(tag.file_name())
    }

    /// Returns the checkpoint of `env_id` with the largest episode count.
    ///
    /// Returns `None` if the directory does not exist or holds no checkpoint
    /// of `env_id`.
    pub fn latest(&self, env_id: &str) -> Result<Option<(CheckpointTag, PathBuf)>> {
        if !self.model_dir.is_dir() {
            return Ok(None);
        }

        let prefix = format!("{}_episode_", env_id);
        let mut latest: Option<CheckpointTag> = None;
        for entry in fs::read_dir(&self.model_dir)? {
            let name = entry?.file_name();
            let episode = name
                .to_str()
                .and_then(|s| s.strip_prefix(&prefix))
                .and_then(|s| s.strip_suffix(".pth"))
                .and_then(|s| s.parse::<usize>().ok());
            if let Some(episode) = episode {
                if latest.as_ref().map_or(true, |t| t.episode < episode) {
                    latest = Some(CheckpointTag::new(env_id, episode));
                }
            }
        }

        Ok(latest.map(|tag| {
            let path = self.path(&tag);
            (tag, path)
        }))
    }
}

impl Checkpointer for DirCheckpointer {
    fn checkpoint(&mut self, tag: &CheckpointTag, params: &dyn SaveParams) -> Result<PathBuf> {
        let path = self.path(tag);
        if path.exists() {
            return Err(DqnError::CheckpointExists(path).into());
        }
        fs::create_dir_all(&self.model_dir)?;
        params.save_params(&path)?;
        debug!("Wrote checkpoint {:?}", &path);
        Ok(path)
    }
}

/// A checkpointer that discards every request.
#[derive(Debug, Default)]
pub struct NullCheckpointer {}

impl Checkpointer for NullCheckpointer {
    fn checkpoint(&mut self, tag: &CheckpointTag, _params: &dyn SaveParams) -> Result<PathBuf> {
        Ok(PathBuf::from(tag.file_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    struct Params(&'static str);

    impl SaveParams for Params {
        fn save_params(&self, path: &Path) -> Result<()> {
            fs::write(path, self.0)?;
            Ok(())
        }

        fn load_params(&mut self, _path: &Path) -> Result<()> {
            unimplemented!();
        }
    }

    #[test]
    fn test_file_name() {
        let tag = CheckpointTag::new("PongNoFrameskip-v4", 100);
        assert_eq!(tag.file_name(), "PongNoFrameskip-v4_episode_100.pth");
    }

    #[test]
    fn test_dir_checkpointer_is_write_once() -> Result<()> {
        let tmp_dir = TempDir::new("checkpoint")?;
        let model_dir = tmp_dir.path().join("models");
        let mut checkpointer = DirCheckpointer::new(&model_dir);
        let tag = CheckpointTag::new("Corridor-v0", 10);

        let path = checkpointer.checkpoint(&tag, &Params("first"))?;
        assert_eq!(path, model_dir.join("Corridor-v0_episode_10.pth"));
        assert_eq!(fs::read_to_string(&path)?, "first");

        let err = checkpointer.checkpoint(&tag, &Params("second")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DqnError>(),
            Some(DqnError::CheckpointExists(_))
        ));
        assert_eq!(fs::read_to_string(&path)?, "first");
        Ok(())
    }

    #[test]
    fn test_latest_checkpoint() -> Result<()> {
        let tmp_dir = TempDir::new("checkpoint")?;
        let mut checkpointer = DirCheckpointer::new(tmp_dir.path().join("models"));
        assert_eq!(checkpointer.latest("Corridor-v0")?, None);

        for n in [10, 100, 200] {
            checkpointer.checkpoint(&CheckpointTag::new("Corridor-v0", n), &Params("p"))?;
        }
        checkpointer.checkpoint(&CheckpointTag::new("Other-v0", 300), &Params("p"))?;

        let (tag, path) = checkpointer.latest("Corridor-v0")?.expect("a checkpoint");
        assert_eq!(tag, CheckpointTag::new("Corridor-v0", 200));
        assert_eq!(path, tmp_dir.path().join("models/Corridor-v0_episode_200.pth"));
        Ok(())
    }
}
