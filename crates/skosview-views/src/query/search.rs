//! `/search` executor with pager support.
//!
//! Skosmos does not report a total hit count, so a paged listing costs two
//! calls: a count call without `maxhits`/`offset` whose result length sets up
//! the pager, then the data call for the current page.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use skosview_core::{KeywordFilter, SearchRequest, SearchResults, SkosmosApi};

use super::{numbered, BuiltQuery, QueryBase, SkosmosQuery};
use crate::context::ExecutionContext;
use crate::pager::Pager;
use crate::rows::ViewExecution;
use crate::translator::{FromPositional, QueryArguments, SEARCH_TEMPLATE};

pub struct SearchQuery {
    base: QueryBase,
}

impl SearchQuery {
    pub fn new(api: Arc<dyn SkosmosApi>, ctx: ExecutionContext) -> Self {
        Self {
            base: QueryBase::new(api, ctx),
        }
    }

    /// Add an exposed keyword filter on the `query` field.
    pub fn add_keyword(&mut self, group: Option<i32>, filter: &KeywordFilter) {
        filter.apply(self.base.where_clause_mut(), group, "query");
    }

    /// Run one search; failures are reported on the runtime channel.
    async fn fetch(&self, args: QueryArguments) -> SearchResults {
        let req = match SearchRequest::from_arguments(args) {
            Ok(req) => req,
            Err(e) => {
                self.base.invalid_arguments("search", &e);
                return SearchResults::default();
            }
        };
        match self.base.api().search(&req).await {
            Ok(results) => results,
            Err(e) => {
                warn!(subsystem = "views", op = "search", query = %req.query, error = %e, "Search failed");
                let message = e.as_api().map(|api| api.message.clone()).unwrap_or_else(|| e.to_string());
                self.base.runtime_error(&message);
                SearchResults::default()
            }
        }
    }
}

#[async_trait]
impl SkosmosQuery for SearchQuery {
    fn base(&self) -> &QueryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut QueryBase {
        &mut self.base
    }

    fn build(&self, pager: Option<&Pager>) -> BuiltQuery {
        let mut query = self.base.translate(&SEARCH_TEMPLATE);
        let count_query = query.without_pagination();
        match pager {
            Some(pager) => query.set_pagination(pager.limit(), pager.query_offset()),
            None => query.set_pagination(self.base.limit, self.base.offset),
        }
        BuiltQuery {
            query,
            count_query: Some(count_query),
        }
    }

    async fn execute(&self, built: BuiltQuery, mut pager: Option<&mut Pager>) -> ViewExecution {
        // The API answers 400 without a query; skip the call entirely.
        if built.query.is_blank("query") {
            return ViewExecution::empty();
        }

        let mut execution = ViewExecution::empty();

        if let (Some(pager), Some(count_query)) = (pager.as_deref_mut(), built.count_query) {
            let total = self.fetch(count_query).await.results.len() as u64;
            pager.set_total_items(total);
            execution.total_rows = pager.total_items;
            debug!(
                subsystem = "views",
                op = "search",
                result_count = total,
                total_items = pager.total_items,
                "Counted search results"
            );
        }

        let start = Instant::now();
        let results = self.fetch(built.query).await;
        execution.result = numbered(results.results, |row, hit| {
            row.with("uri", hit.uri)
                .with("type", hit.types)
                .with("pref_label", hit.pref_label)
                .with("alt_label", hit.alt_label)
                .with("hidden_label", hit.hidden_label)
                .with("lang", hit.lang)
                .with("vocid", hit.vocab)
                .with("exvocab", hit.exvocab)
                .with("notation", hit.notation)
        });
        execution.execute_time = start.elapsed();
        debug!(subsystem = "views", op = "search", result_count = execution.result.len(), "Search page fetched");

        match pager {
            Some(pager) => {
                pager.post_execute(&execution.result);
                pager.update_page_info();
            }
            None => execution.total_rows = execution.result.len() as u64,
        }
        execution
    }
}
