//! Loading both bases and scanning their vault in one step.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use super::buckets::{ProjectList, TodoList};
use super::classify::{ClassifiedNote, classify, project_names};
use super::guard::LoadGuard;
use crate::bases::{BaseConfig, BaseConfigError, VaultRoot};
use crate::cache::{DEFAULT_MAX_AGE, VaultCache};
use crate::vault::{DEFAULT_MAX_FILES, ScanError, VaultScanner};

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("todo base: {0}")]
    TodoBase(#[source] BaseConfigError),

    #[error("project base: {0}")]
    ProjectBase(#[source] BaseConfigError),

    #[error("could not locate a vault for {0}")]
    NoVaultRoot(PathBuf),

    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Inputs to [`Dashboard::load`].
#[derive(Debug, Clone)]
pub struct DashboardRequest<'a> {
    pub todo_base: &'a Path,
    pub project_base: &'a Path,
    pub todo_view: Option<&'a str>,
    pub project_view: Option<&'a str>,
    pub vault_marker: &'a str,
    pub excluded_folders: Vec<PathBuf>,
    pub max_files: usize,
    pub max_age: Duration,
    /// Ignore a fresh cache entry and walk the vault.
    pub rebuild: bool,
}

impl<'a> DashboardRequest<'a> {
    pub fn new(todo_base: &'a Path, project_base: &'a Path) -> Self {
        Self {
            todo_base,
            project_base,
            todo_view: None,
            project_view: None,
            vault_marker: crate::bases::DEFAULT_VAULT_MARKER,
            excluded_folders: Vec::new(),
            max_files: DEFAULT_MAX_FILES,
            max_age: DEFAULT_MAX_AGE,
            rebuild: false,
        }
    }
}

/// Classified notes of one vault plus the bases that classified them.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub todo_config: BaseConfig,
    pub project_config: BaseConfig,
    /// Root of the vault named by the todo base.
    pub vault_root: VaultRoot,
    pub notes: Vec<ClassifiedNote>,
}

impl Dashboard {
    /// Load both bases and scan the todo base's vault.
    ///
    /// Returns `Ok(None)` without doing anything when `guard` shows another
    /// load in flight.
    pub fn load(
        request: &DashboardRequest<'_>,
        cache: Option<&VaultCache>,
        guard: &LoadGuard,
    ) -> Result<Option<Self>, DashboardError> {
        let Some(_ticket) = guard.try_begin() else {
            tracing::debug!("Load already in progress; ignoring");
            return Ok(None);
        };

        let todo_config = BaseConfig::load(request.todo_base, request.vault_marker)
            .map_err(DashboardError::TodoBase)?;
        let project_config = BaseConfig::load(request.project_base, request.vault_marker)
            .map_err(DashboardError::ProjectBase)?;

        let vault_root = todo_config
            .vault_root
            .clone()
            .ok_or_else(|| DashboardError::NoVaultRoot(request.todo_base.to_path_buf()))?;
        if project_config.vault_root.is_none() {
            return Err(DashboardError::NoVaultRoot(request.project_base.to_path_buf()));
        }

        let mut scanner = VaultScanner::new(vault_root.path())
            .max_age(request.max_age)
            .max_files(request.max_files)
            .use_cache(!request.rebuild)
            .exclude(request.excluded_folders.clone());
        if let Some(cache) = cache {
            scanner = scanner.cache(cache);
        }

        let notes = scanner.scan_with(classify(
            &todo_config,
            request.todo_view,
            &project_config,
            request.project_view,
        ))?;

        Ok(Some(Self { todo_config, project_config, vault_root, notes }))
    }

    pub fn todos(&self, search: Option<&str>, max_results: usize) -> TodoList {
        TodoList::build(&self.notes, search, max_results)
    }

    pub fn projects(&self, search: Option<&str>, max_results: usize) -> ProjectList {
        ProjectList::build(&self.notes, search, max_results)
    }

    pub fn project_names(&self) -> Vec<String> {
        project_names(&self.notes)
    }
}
