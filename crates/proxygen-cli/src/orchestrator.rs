//! End-to-end generation and removal runs.
//!
//! A run walks a fixed sequence of states:
//!
//! ```text
//! Start -> ModelFetched -> Filtered -> ClassesEmitted -> [DtoEmitted] -> ModelPersisted -> Done
//! Start -> RemovalRequested -> Done
//! ```
//!
//! `DtoEmitted` is skipped when contracts are not requested. The removal
//! path never fetches a model. Any error stops the run where it is; files
//! already written stay on disk.

use chrono::{DateTime, Utc};
use proxygen_codegen::generator::is_service_controller;
use proxygen_codegen::{FileKind, GeneratorOptions, OutputLayout, ProxyGenerator};
use proxygen_core::{GenerateOptions, Result};
use proxygen_files::{ExportOptions, export_generated, remove_output, write_json_artifact};
use proxygen_introspector::{ModelFetcher, ModelRequest, fetch_module};
use serde::Serialize;
use tracing::{debug, info};

/// Progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    /// Nothing done yet
    Start,
    /// Model retrieved and narrowed to the module
    ModelFetched,
    /// Service controllers selected
    Filtered,
    /// Proxy classes, stubs and interfaces written
    ClassesEmitted,
    /// Data-type files written
    DtoEmitted,
    /// Audit copy of the model written
    ModelPersisted,
    /// Output folder removal requested
    RemovalRequested,
    /// Run finished
    Done,
}

/// Result of a generation run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationSummary {
    /// Module the proxies were generated for
    pub module: String,
    /// Output folder, relative to the working directory
    pub output: String,
    /// Number of service controllers emitted
    pub controllers: usize,
    /// Number of data-type files emitted
    pub dtos: usize,
    /// Files written, relative to the output folder
    pub written: Vec<String>,
    /// User files kept as they were
    pub skipped: Vec<String>,
    /// Audit artifact, relative to the working directory
    pub artifact: String,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

/// Result of a removal run.
#[derive(Debug, Clone, Serialize)]
pub struct RemovalSummary {
    /// Output folder, relative to the working directory
    pub output: String,
    /// Whether the folder existed and was deleted
    pub removed: bool,
    /// When the run finished
    pub completed_at: DateTime<Utc>,
}

/// Drives a single generation or removal run.
///
/// # Examples
///
/// ```
/// use proxygen_cli::{GenerationState, Orchestrator};
/// use proxygen_core::GenerateOptions;
/// # use tempfile::TempDir;
///
/// # let temp_dir = TempDir::new().unwrap();
/// # std::fs::write(temp_dir.path().join("Acme.csproj"), "<Project />").unwrap();
/// let options = GenerateOptions::builder(temp_dir.path()).build();
/// let mut orchestrator = Orchestrator::new(options).unwrap();
///
/// let summary = orchestrator.remove().unwrap();
/// assert!(!summary.removed);
/// assert_eq!(orchestrator.state(), GenerationState::Done);
/// ```
#[derive(Debug)]
pub struct Orchestrator {
    options: GenerateOptions,
    history: Vec<GenerationState>,
}

impl Orchestrator {
    /// Creates an orchestrator after running the pre-flight checks.
    ///
    /// # Errors
    ///
    /// Returns [`proxygen_core::Error::UsageError`] if the options fail
    /// validation. Nothing is touched on disk in that case.
    pub fn new(options: GenerateOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            options,
            history: vec![GenerationState::Start],
        })
    }

    /// Options of this run.
    #[must_use]
    pub const fn options(&self) -> &GenerateOptions {
        &self.options
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> GenerationState {
        self.history
            .last()
            .copied()
            .unwrap_or(GenerationState::Start)
    }

    /// Every state visited so far, in order.
    #[must_use]
    pub fn history(&self) -> &[GenerationState] {
        &self.history
    }

    fn transition(&mut self, state: GenerationState) {
        debug!(from = ?self.state(), to = ?state, "State transition");
        self.history.push(state);
    }

    fn layout(&self) -> OutputLayout {
        if self.options.uses_default_folder() {
            OutputLayout::Namespaced
        } else {
            OutputLayout::Flat
        }
    }

    /// Generates proxies for the configured module.
    ///
    /// # Errors
    ///
    /// Returns the first fetch, module selection, rendering or I/O error.
    pub async fn generate(&mut self, fetcher: &dyn ModelFetcher) -> Result<GenerationSummary> {
        let started_at = Utc::now();
        let with_contracts = !self.options.without_contracts;
        let request = ModelRequest::new(&self.options.module, with_contracts);

        info!(
            "Generating client proxies for module '{}' from {}",
            self.options.module,
            fetcher.location()
        );
        let model = fetch_module(fetcher, &request).await?;
        self.transition(GenerationState::ModelFetched);

        let controllers = model
            .controllers()
            .filter(|controller| is_service_controller(controller))
            .count();
        debug!(controllers, "Selected service controllers");
        self.transition(GenerationState::Filtered);

        let generator = ProxyGenerator::new(GeneratorOptions {
            layout: self.layout(),
            with_contracts,
        })?;
        let output = self.options.output_root();
        let export = ExportOptions::default().with_log_root(&self.options.work_directory);

        let classes = generator.generate_controllers(&model)?;
        let mut report = export_generated(&classes, &output, &export)?;
        self.transition(GenerationState::ClassesEmitted);

        let mut dtos = 0;
        if with_contracts {
            let code = generator.generate_dtos(&model)?;
            dtos = code.count_of(FileKind::Dto);
            let dto_report = export_generated(&code, &output, &export)?;
            report.written.extend(dto_report.written);
            report.skipped.extend(dto_report.skipped);
            self.transition(GenerationState::DtoEmitted);
        }

        let artifact = self.options.artifact_path();
        write_json_artifact(&artifact, &model)?;
        self.transition(GenerationState::ModelPersisted);

        self.transition(GenerationState::Done);
        info!(
            written = report.written.len(),
            skipped = report.skipped.len(),
            "Client proxies generated"
        );

        Ok(GenerationSummary {
            module: self.options.module.clone(),
            output: self.options.display_path(&output),
            controllers,
            dtos,
            written: report.written,
            skipped: report.skipped,
            artifact: self.options.display_path(&artifact),
            started_at,
            completed_at: Utc::now(),
        })
    }

    /// Deletes the output folder without fetching anything.
    ///
    /// # Errors
    ///
    /// Returns [`proxygen_core::Error::IoError`] if the folder cannot be
    /// deleted.
    pub fn remove(&mut self) -> Result<RemovalSummary> {
        self.transition(GenerationState::RemovalRequested);

        let output = self.options.output_root();
        let output_display = self.options.display_path(&output);
        let removed = remove_output(&output)?;
        if removed {
            info!("Delete {output_display}");
        }

        self.transition(GenerationState::Done);
        Ok(RemovalSummary {
            output: output_display,
            removed,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_dir() -> TempDir {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Acme.BookStore.HttpApi.Client.csproj"), "<Project />").unwrap();
        temp
    }

    #[test]
    fn test_new_rejects_missing_directory() {
        let temp = TempDir::new().unwrap();
        let options = GenerateOptions::builder(temp.path().join("missing")).build();

        let err = Orchestrator::new(options).unwrap_err();
        assert!(err.is_usage_error());
    }

    #[test]
    fn test_new_rejects_folder_with_extension() {
        let temp = project_dir();
        let options = GenerateOptions::builder(temp.path())
            .folder("proxies.cs")
            .build();

        let err = Orchestrator::new(options).unwrap_err();
        assert_eq!(err.to_string(), "Option folder should be a directory.");
    }

    #[test]
    fn test_removal_path_states() {
        let temp = project_dir();
        fs::create_dir_all(temp.path().join("ClientProxies/Acme")).unwrap();

        let mut orchestrator =
            Orchestrator::new(GenerateOptions::builder(temp.path()).build()).unwrap();
        let summary = orchestrator.remove().unwrap();

        assert!(summary.removed);
        assert_eq!(summary.output, "ClientProxies");
        assert_eq!(
            orchestrator.history(),
            &[
                GenerationState::Start,
                GenerationState::RemovalRequested,
                GenerationState::Done
            ]
        );
        assert!(!temp.path().join("ClientProxies").exists());
    }

    #[test]
    fn test_layout_follows_folder_option() {
        let temp = project_dir();
        let default = Orchestrator::new(GenerateOptions::builder(temp.path()).build()).unwrap();
        assert_eq!(default.layout(), OutputLayout::Namespaced);

        let custom = Orchestrator::new(
            GenerateOptions::builder(temp.path())
                .folder("Proxies")
                .build(),
        )
        .unwrap();
        assert_eq!(custom.layout(), OutputLayout::Flat);
    }

    #[test]
    fn test_state_serializes_snake_case() {
        let json = serde_json::to_string(&GenerationState::ClassesEmitted).unwrap();
        assert_eq!(json, "\"classes_emitted\"");
    }
}
