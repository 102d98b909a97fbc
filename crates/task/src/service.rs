//! Operations on Things
//!
//! [`ThingsService`] owns the script executor and the response cache. Every
//! operation takes `&mut self`, so calls are serialized by the borrow
//! checker and the cache needs no locking.

use crate::args;
use crate::batch::{run_batch, BatchResult};
use crate::params::{
    AddItemsToProjectParams, AddProjectParams, AddTodoParams, BulkUpdateParams, DeleteParams,
    ItemIdParams, SearchParams, UpdateProjectParams, UpdateTodoParams,
};
use crate::responses::{CreatedItem, ItemAction, ProjectCreation};
use thingsctl_cache::{CacheCategory, ResponseCache};
use thingsctl_config::{Config, ProbeSettings};
use thingsctl_core::{scripts, BatchItem, Error, Result, ScriptArguments, MAX_BULK_IDS};
use thingsctl_script::{probe_availability, BulkUpdateReport, ScriptExecutor, TaskStats, TodoRecord};
use thingsctl_security::SecurityValidator;

/// Entry point for every tool operation
pub struct ThingsService {
    executor: ScriptExecutor,
    cache: ResponseCache<Vec<TodoRecord>>,
    probe: ProbeSettings,
}

impl ThingsService {
    pub fn new(
        executor: ScriptExecutor,
        cache: ResponseCache<Vec<TodoRecord>>,
        probe: ProbeSettings,
    ) -> Self {
        Self {
            executor,
            cache,
            probe,
        }
    }

    /// Production service for a loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ScriptExecutor::from_config(config),
            ResponseCache::from_settings(&config.cache),
            config.probe.clone(),
        )
    }

    pub fn cache(&self) -> &ResponseCache<Vec<TodoRecord>> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ResponseCache<Vec<TodoRecord>> {
        &mut self.cache
    }

    async fn run(&self, script: &str, arguments: ScriptArguments) -> Result<String> {
        self.executor
            .execute_default(script, arguments.as_slice())
            .await
    }

    pub async fn add_todo(&mut self, params: &AddTodoParams) -> Result<CreatedItem> {
        require_title(&params.title)?;
        validate_optional_id(params.list_id.as_deref())?;

        let id = self.run(scripts::CREATE_TODO, args::create_todo(params)).await?;
        self.cache.invalidate_todo_caches();

        tracing::info!(title = %params.title, "to-do created");
        Ok(CreatedItem {
            id,
            title: params.title.clone(),
        })
    }

    /// Create a project, then every to-do of its item list.
    ///
    /// Only a failure to create the project itself is an error. Item
    /// failures are reported in the batch result.
    pub async fn add_project(&mut self, params: &AddProjectParams) -> Result<ProjectCreation> {
        require_title(&params.title)?;
        validate_optional_id(params.area_id.as_deref())?;

        let project_id = self
            .run(scripts::CREATE_PROJECT, args::create_project(params))
            .await?;
        self.cache.invalidate_project_caches();
        tracing::info!(title = %params.title, project_id = %project_id, "project created");

        let project = CreatedItem {
            id: project_id,
            title: params.title.clone(),
        };

        let items = match params.items.as_deref() {
            Some(items) if !items.is_empty() => items,
            _ => {
                return Ok(ProjectCreation {
                    project,
                    batch: None,
                })
            }
        };

        if let Err(e) = SecurityValidator::validate_item_id(&project.id) {
            return Err(Error::script(
                scripts::CREATE_PROJECT,
                format!("project was created but returned an unusable id: {e}"),
            ));
        }

        let batch = self.fill_project("add_project", &project.id, items).await;
        self.cache.invalidate_project_caches();

        Ok(ProjectCreation {
            project,
            batch: Some(batch),
        })
    }

    pub async fn update_todo(&mut self, params: &UpdateTodoParams) -> Result<String> {
        SecurityValidator::validate_item_id(&params.id)?;
        validate_optional_id(params.list_id.as_deref())?;

        self.run(scripts::UPDATE_TODO, args::update_todo(params)).await?;
        self.cache.invalidate_todo_caches();

        Ok(format!(
            "Updated to-do: \"{}\"",
            params.title.as_deref().unwrap_or(&params.id)
        ))
    }

    pub async fn update_project(&mut self, params: &UpdateProjectParams) -> Result<String> {
        SecurityValidator::validate_item_id(&params.id)?;
        validate_optional_id(params.area_id.as_deref())?;

        self.run(scripts::UPDATE_PROJECT, args::update_project(params))
            .await?;
        self.cache.invalidate_project_caches();

        Ok(format!(
            "Updated project: \"{}\"",
            params.title.as_deref().unwrap_or(&params.id)
        ))
    }

    /// Add to-dos to an existing project; headings are skipped
    pub async fn add_items_to_project(
        &mut self,
        params: &AddItemsToProjectParams,
    ) -> Result<BatchResult> {
        SecurityValidator::validate_item_id(&params.id)?;

        let batch = self
            .fill_project("add_items_to_project", &params.id, &params.items)
            .await;
        self.cache.invalidate_project_caches();
        Ok(batch)
    }

    async fn fill_project(
        &self,
        operation: &str,
        project_id: &str,
        items: &[BatchItem],
    ) -> BatchResult {
        let executor = &self.executor;
        run_batch(operation, items, |todo| {
            let prepared = require_title(&todo.title).map(|()| {
                args::create_todo(&AddTodoParams::from_spec(todo, project_id))
            });
            async move {
                let arguments = prepared?;
                executor
                    .execute_default(scripts::CREATE_TODO, arguments.as_slice())
                    .await
                    .map(|_| ())
            }
        })
        .await
    }

    pub async fn delete_todo(&mut self, params: &DeleteParams) -> Result<ItemAction> {
        require_confirmation(params, "to-do")?;
        SecurityValidator::validate_item_id(&params.id)?;

        let output = self
            .run(scripts::DELETE_TODO, args::item_id(&params.id))
            .await?;
        self.cache.invalidate_todo_caches();

        tracing::info!(id = %params.id, "to-do deleted");
        Ok(ItemAction::from_output("todo", "deleted", &params.id, &output))
    }

    pub async fn delete_project(&mut self, params: &DeleteParams) -> Result<ItemAction> {
        require_confirmation(params, "project")?;
        SecurityValidator::validate_item_id(&params.id)?;

        let output = self
            .run(scripts::DELETE_PROJECT, args::item_id(&params.id))
            .await?;
        self.cache.invalidate_project_caches();

        tracing::info!(id = %params.id, "project deleted");
        Ok(ItemAction::from_output("project", "deleted", &params.id, &output))
    }

    pub async fn complete_todo(&mut self, params: &ItemIdParams) -> Result<ItemAction> {
        self.change_status(scripts::COMPLETE_TODO, "completed", &params.id)
            .await
    }

    pub async fn cancel_todo(&mut self, params: &ItemIdParams) -> Result<ItemAction> {
        self.change_status(scripts::CANCEL_TODO, "canceled", &params.id)
            .await
    }

    async fn change_status(&mut self, script: &str, action: &str, id: &str) -> Result<ItemAction> {
        SecurityValidator::validate_item_id(id)?;

        let output = self.run(script, args::item_id(id)).await?;
        self.cache.invalidate_todo_caches();

        Ok(ItemAction::from_output("todo", action, id, &output))
    }

    pub async fn search(&mut self, params: &SearchParams) -> Result<Vec<TodoRecord>> {
        if params.max_results == Some(0) {
            return Err(Error::validation("max_results", "must be at least 1"));
        }
        let output = self
            .run(scripts::SEARCH_TODOS, args::search_todos(params))
            .await?;
        Ok(TodoRecord::parse_all(&output))
    }

    pub async fn bulk_update(&mut self, params: &BulkUpdateParams) -> Result<BulkUpdateReport> {
        if params.ids.is_empty() {
            return Err(Error::validation("ids", "at least one id is required"));
        }
        if params.ids.len() > MAX_BULK_IDS {
            return Err(Error::validation(
                "ids",
                format!(
                    "{} ids given, at most {MAX_BULK_IDS} per call",
                    params.ids.len()
                ),
            ));
        }
        for id in &params.ids {
            SecurityValidator::validate_item_id(id)?;
        }
        if params.updates.is_empty() {
            return Err(Error::validation("updates", "no changes given"));
        }
        validate_optional_id(params.updates.list_id.as_deref())?;

        let output = self
            .run(scripts::BULK_UPDATE, args::bulk_update(params))
            .await?;
        self.cache.invalidate_todo_caches();

        let report = BulkUpdateReport::parse(&output);
        tracing::info!(
            total = params.ids.len(),
            updated = report.updated,
            failed = report.failed.len(),
            "bulk update finished"
        );
        Ok(report)
    }

    pub async fn get_stats(&mut self) -> Result<TaskStats> {
        let output = self.run(scripts::GET_STATS, ScriptArguments::new()).await?;
        TaskStats::parse(&output)
    }

    /// Read a list through the cache.
    ///
    /// Only unlimited reads are stored. A limited read is served from a
    /// cached full read when one is live.
    pub async fn get_list(
        &mut self,
        category: CacheCategory,
        max_results: Option<u32>,
    ) -> Result<Vec<TodoRecord>> {
        let key = category.key();
        if let Some(mut records) = self.cache.get(&key) {
            if let Some(max) = max_results {
                records.truncate(max as usize);
            }
            return Ok(records);
        }

        let options = self.executor.defaults().with_max_result_count(max_results);
        let output = self
            .executor
            .execute(&category.script_name(), &[], &options)
            .await?;
        let records = TodoRecord::parse_all(&output);

        if max_results.is_none() {
            self.cache.set_default(key, records.clone());
        }
        Ok(records)
    }

    pub async fn check_availability(&self) -> bool {
        let runner = self.executor.runner();
        probe_availability(runner.as_ref(), &self.probe).await
    }
}

fn require_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        Err(Error::validation("title", "cannot be empty"))
    } else {
        Ok(())
    }
}

fn require_confirmation(params: &DeleteParams, kind: &str) -> Result<()> {
    if params.confirm {
        Ok(())
    } else {
        Err(Error::validation(
            "confirm",
            format!("deleting a {kind} requires confirm: true"),
        ))
    }
}

/// Validate an id-valued field when it is set
fn validate_optional_id(id: Option<&str>) -> Result<()> {
    match id.filter(|id| !id.is_empty()) {
        Some(id) => SecurityValidator::validate_item_id(id),
        None => Ok(()),
    }
}
