//! Classloader model output layout
//!
//! ```text
//! <output>/META-INF/mule-artifact/
//!   ├── classloader-model.json                      application
//!   └── repository/<group/path>/<artifactId>/<version>/
//!        └── classloader-model.json                 one per plugin
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{ApplicationClassLoaderModel, ClassLoaderModel, Coordinate, ViewKind};
use crate::error::{Result, fs as fs_error};
use crate::path_utils::{REPOSITORY_FOLDER, repository_dir};
use crate::serialization::document::{render, to_json};

/// Descriptor folder inside a packaged deployable
pub const MULE_ARTIFACT_DIR: &str = "META-INF/mule-artifact";

/// File name of every classloader model document
pub const CLASSLOADER_MODEL_FILE: &str = "classloader-model.json";

/// Document path of the application below `output`
pub fn application_document_path(output: &Path) -> PathBuf {
    output.join(MULE_ARTIFACT_DIR).join(CLASSLOADER_MODEL_FILE)
}

/// Document path of a plugin below `output`
pub fn plugin_document_path(output: &Path, plugin: &Coordinate) -> PathBuf {
    output
        .join(MULE_ARTIFACT_DIR)
        .join(REPOSITORY_FOLDER)
        .join(repository_dir(plugin))
        .join(CLASSLOADER_MODEL_FILE)
}

/// Writes the documents of an application and its plugins
#[derive(Debug, Clone)]
pub struct ModelWriter {
    output: PathBuf,
    view: ViewKind,
}

impl ModelWriter {
    pub fn new(output: impl Into<PathBuf>, view: ViewKind) -> Self {
        Self {
            output: output.into(),
            view,
        }
    }

    /// Write every document, returning the written paths
    ///
    /// # Errors
    ///
    /// Returns `ModelError::FileWriteFailed` if a directory or file cannot
    /// be written.
    pub fn write(&self, application: &ApplicationClassLoaderModel) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();

        let path = application_document_path(&self.output);
        self.write_model(application.class_loader_model(), &path)?;
        written.push(path);

        for (artifact, model) in application.plugin_models() {
            let path = plugin_document_path(&self.output, artifact.coordinates());
            self.write_model(model, &path)?;
            written.push(path);
        }

        info!(
            files = written.len(),
            output = %self.output.display(),
            "Wrote classloader model documents"
        );
        Ok(written)
    }

    fn write_model(&self, model: &ClassLoaderModel, path: &Path) -> Result<()> {
        let json = to_json(&render(model, self.view))?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                fs_error::write_failed(parent.display().to_string(), e.to_string())
            })?;
        }
        fs::write(path, json + "\n")
            .map_err(|e| fs_error::write_failed(path.display().to_string(), e.to_string()))
    }
}
