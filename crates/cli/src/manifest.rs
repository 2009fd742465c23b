// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Submission manifests.
//!
//! A manifest is a JSON document listing the copies of one solicitation:
//!
//! ```json
//! {
//!   "deadline": 48,
//!   "copies": [
//!     { "file": "notas/aula-1.pdf", "pageCount": 12, "pages": "1-4, 9", "copyCount": 30 },
//!     { "name": "Apostila de cálculo", "pageCount": 80, "physical": true, "frontAndBack": true }
//!   ]
//! }
//! ```
//!
//! Relative file paths are resolved against the manifest's directory.

use color_eyre::eyre::{Context, Result, bail, eyre};
use grafica::{Command, Outcome, RegistryState, TransitionResult, apply};
use grafica_api::translate_core_error;
use grafica_domain::{DocumentCopy, FileBlob, Layout, PagesPerSheet, PrintConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// A parsed manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Manifest {
    /// Requested term in hours. The command line may override it.
    #[serde(default)]
    pub deadline: Option<u32>,
    /// Copies in display order.
    pub copies: Vec<ManifestCopy>,
}

/// One copy entry of a manifest.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ManifestCopy {
    /// Path of the document to upload. Required unless `physical`.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Display name. Defaults to the file's name.
    #[serde(default)]
    pub name: Option<String>,
    /// Page count of the whole document.
    pub page_count: u32,
    /// Custom page range; all pages when absent.
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default = "default_copy_count")]
    pub copy_count: u32,
    #[serde(default)]
    pub pages_per_sheet: PagesPerSheet,
    #[serde(default)]
    pub layout: Layout,
    #[serde(default)]
    pub front_and_back: bool,
    /// Delivered on paper instead of uploaded.
    #[serde(default)]
    pub physical: bool,
    #[serde(default)]
    pub notes: String,
}

const fn default_copy_count() -> u32 {
    1
}

impl Manifest {
    /// Parses a manifest from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest or lists no copies.
    pub fn from_json(text: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(text).wrap_err("Invalid manifest")?;
        if manifest.copies.is_empty() {
            bail!("Manifest lists no copies");
        }
        Ok(manifest)
    }

    /// Reads and parses a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text: String = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read manifest {}", path.display()))?;
        Self::from_json(&text)
    }

    /// Turns every entry into a copy, reading digital files from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is incomplete or a file cannot be read.
    pub fn resolve(&self, base_dir: &Path) -> Result<Vec<DocumentCopy>> {
        self.copies
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                entry
                    .resolve(base_dir)
                    .wrap_err_with(|| format!("Manifest copy #{}", index + 1))
            })
            .collect()
    }
}

impl ManifestCopy {
    /// Builds the print configuration this entry describes.
    #[must_use]
    pub fn print_config(&self) -> PrintConfig {
        let mut config: PrintConfig = PrintConfig::default()
            .with_copy_count(self.copy_count)
            .with_pages_per_sheet(self.pages_per_sheet)
            .with_layout(self.layout)
            .with_front_and_back(self.front_and_back);

        if let Some(pages) = &self.pages {
            config = config.with_custom_pages(pages);
        }
        config
    }

    /// Builds the copy, reading its file when it is digital.
    ///
    /// # Errors
    ///
    /// Returns an error if a physical entry has no name, a digital entry has
    /// no file, or the file cannot be read.
    pub fn resolve(&self, base_dir: &Path) -> Result<DocumentCopy> {
        let copy: DocumentCopy = if self.physical {
            let name: &str = self
                .name
                .as_deref()
                .or_else(|| self.file.as_deref().and_then(Path::to_str))
                .ok_or_else(|| eyre!("A physical copy needs a name"))?;
            DocumentCopy::physical(name, self.page_count, self.print_config())
        } else {
            let relative: &Path = self
                .file
                .as_deref()
                .ok_or_else(|| eyre!("A digital copy needs a file"))?;
            let path: PathBuf = base_dir.join(relative);
            let content: Vec<u8> = std::fs::read(&path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;

            let file_name: String = match &self.name {
                Some(name) => name.clone(),
                None => path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .ok_or_else(|| eyre!("{} has no usable file name", path.display()))?
                    .to_string(),
            };

            DocumentCopy::digital(
                FileBlob::new(&file_name, content),
                self.page_count,
                self.print_config(),
            )
        };

        Ok(copy.with_notes(&self.notes))
    }
}

/// Adds copies to a registry one at a time.
///
/// A duplicate either overwrites the existing entry (`overwrite`) or is
/// skipped with a warning.
///
/// # Errors
///
/// Returns an error if a copy is rejected by the registry.
pub fn add_to_registry(
    registry: RegistryState,
    copies: Vec<DocumentCopy>,
    overwrite: bool,
) -> Result<RegistryState> {
    let mut state: RegistryState = registry;

    for copy in copies {
        let file_name: String = copy.file_name.clone();
        let added: TransitionResult =
            apply(&state, Command::AddCopy { copy }).map_err(translate_core_error)?;

        state = match added.outcome {
            Outcome::DuplicateFound { duplicate_position } => {
                let decision: Command = if overwrite {
                    info!(file_name, duplicate_position, "Overwriting duplicate copy");
                    Command::ConfirmOverwrite
                } else {
                    warn!(
                        file_name,
                        duplicate_position, "Skipping duplicate copy (use --overwrite to replace it)"
                    );
                    Command::DeclineOverwrite
                };
                apply(&added.new_state, decision)
                    .map_err(translate_core_error)?
                    .new_state
            }
            _ => added.new_state,
        };
    }

    Ok(state)
}
