//! Query executors: one per Skosmos endpoint family.
//!
//! Each executor collects predicates from the listing framework, builds its
//! argument template in [`SkosmosQuery::build`], and in
//! [`SkosmosQuery::execute`] calls the gateway and maps the response into
//! [`ResultRow`]s. Missing mandatory arguments short-circuit to an empty
//! result before any network call; API failures degrade to an empty result.

mod breadcrumbs;
mod concept;
mod search;
mod vocabularies;

pub use breadcrumbs::BreadcrumbQuery;
pub use concept::ConceptQuery;
pub use search::SearchQuery;
pub use vocabularies::VocabulariesQuery;

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tracing::warn;

use skosview_core::{Error, Predicate, SkosmosApi, WhereClause};

use crate::context::ExecutionContext;
use crate::pager::Pager;
use crate::rows::{ResultRow, ViewExecution};
use crate::translator::{translate, ArgumentTemplate, QueryArguments};

pub const VOCID_REQUIRED: &str =
    "The vocabulary ID filter must be configured in the view before a query will be executed.";
pub const LANG_REQUIRED: &str =
    "The language filter must be configured in the view's query settings before a query will be executed.";

/// State shared by all executors.
pub struct QueryBase {
    api: Arc<dyn SkosmosApi>,
    ctx: ExecutionContext,
    where_clause: WhereClause,
    limit: u64,
    offset: u64,
}

impl QueryBase {
    pub fn new(api: Arc<dyn SkosmosApi>, ctx: ExecutionContext) -> Self {
        Self {
            api,
            ctx,
            where_clause: WhereClause::new(),
            limit: 0,
            offset: 0,
        }
    }

    pub fn api(&self) -> &dyn SkosmosApi {
        self.api.as_ref()
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Add a condition; `None` and `Some(0)` address the default group.
    pub fn add_where(&mut self, group: Option<i32>, field: &str, value: impl Into<JsonValue>) {
        self.where_clause
            .add_where(group, Predicate::new(field, value));
    }

    pub fn where_clause(&self) -> &WhereClause {
        &self.where_clause
    }

    pub fn where_clause_mut(&mut self) -> &mut WhereClause {
        &mut self.where_clause
    }

    pub fn set_limit(&mut self, limit: u64) {
        self.limit = limit;
    }

    pub fn set_offset(&mut self, offset: u64) {
        self.offset = offset;
    }

    pub fn translate(&self, template: &ArgumentTemplate) -> QueryArguments {
        translate(&self.where_clause, template, &self.ctx.interface_language)
    }

    pub fn configuration_error(&self, message: &str) {
        self.ctx.messenger.add_configuration_error(message);
    }

    pub fn runtime_error(&self, message: &str) {
        self.ctx.messenger.add_error(message);
    }

    /// Report arguments that could not be turned into a typed request.
    pub(crate) fn invalid_arguments(&self, op: &'static str, err: &Error) {
        warn!(subsystem = "views", op, error = %err, "Invalid query arguments");
        self.configuration_error(&err.to_string());
    }
}

/// Arguments for the data call and, for paged executors, the count call.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub query: QueryArguments,
    pub count_query: Option<QueryArguments>,
}

impl BuiltQuery {
    pub fn new(query: QueryArguments) -> Self {
        Self {
            query,
            count_query: None,
        }
    }
}

#[async_trait]
pub trait SkosmosQuery: Send + Sync {
    fn base(&self) -> &QueryBase;

    fn base_mut(&mut self) -> &mut QueryBase;

    fn build(&self, pager: Option<&Pager>) -> BuiltQuery;

    async fn execute(&self, built: BuiltQuery, pager: Option<&mut Pager>) -> ViewExecution;

    fn add_where(&mut self, group: Option<i32>, field: &str, value: JsonValue) {
        self.base_mut().add_where(group, field, value);
    }

    /// Build then execute.
    async fn run(&self, pager: Option<&mut Pager>) -> ViewExecution {
        let built = self.build(pager.as_deref());
        self.execute(built, pager).await
    }
}

pub(crate) fn finish(start: Instant, result: Vec<ResultRow>) -> ViewExecution {
    ViewExecution {
        total_rows: result.len() as u64,
        result,
        execute_time: start.elapsed(),
    }
}

pub(crate) fn numbered<T>(items: impl IntoIterator<Item = T>, map: impl Fn(ResultRow, T) -> ResultRow) -> Vec<ResultRow> {
    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| map(ResultRow::new(index), item))
        .collect()
}
