//! `/{vocid}/broaderTransitive` executor: one row per breadcrumb trail.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::{debug, warn};

use skosview_core::{
    build_trails, BroaderTransitiveRequest, BroaderTransitiveResult, EdgeIndex, SkosmosApi,
};

use super::{finish, numbered, BuiltQuery, QueryBase, SkosmosQuery, VOCID_REQUIRED};
use crate::context::ExecutionContext;
use crate::pager::Pager;
use crate::rows::ViewExecution;
use crate::translator::{FromPositional, BROADER_TRANSITIVE_TEMPLATE};

pub struct BreadcrumbQuery {
    base: QueryBase,
}

impl BreadcrumbQuery {
    pub fn new(api: Arc<dyn SkosmosApi>, ctx: ExecutionContext) -> Self {
        Self {
            base: QueryBase::new(api, ctx),
        }
    }

    async fn fetch(&self, req: &BroaderTransitiveRequest) -> BroaderTransitiveResult {
        match self.base.api().get_broader_transitive(req).await {
            Ok(result) => result,
            Err(e) => {
                warn!(subsystem = "views", op = "breadcrumbs", vocid = %req.vocid, uri = %req.uri, error = %e, "Broader transitive lookup failed");
                BroaderTransitiveResult::default()
            }
        }
    }
}

#[async_trait]
impl SkosmosQuery for BreadcrumbQuery {
    fn base(&self) -> &QueryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut QueryBase {
        &mut self.base
    }

    fn build(&self, _pager: Option<&Pager>) -> BuiltQuery {
        BuiltQuery::new(self.base.translate(&BROADER_TRANSITIVE_TEMPLATE))
    }

    async fn execute(&self, built: BuiltQuery, _pager: Option<&mut Pager>) -> ViewExecution {
        let args = built.query;
        if args.is_blank("vocid") {
            self.base.configuration_error(VOCID_REQUIRED);
            return ViewExecution::empty();
        }
        if args.is_blank("uri") {
            return ViewExecution::empty();
        }

        let req = match BroaderTransitiveRequest::from_arguments(args) {
            Ok(req) => req,
            Err(e) => {
                self.base.invalid_arguments("breadcrumbs", &e);
                return ViewExecution::empty();
            }
        };

        let start = Instant::now();
        let result = self.fetch(&req).await;
        let index = EdgeIndex::new(result.broader_transitive);
        let trails = build_trails(&index, &req.uri);
        debug!(
            subsystem = "views",
            op = "breadcrumbs",
            uri = %req.uri,
            edge_count = index.len(),
            trail_count = trails.len(),
            "Built breadcrumb trails"
        );

        let rows = numbered(trails, |row, trail| row.with("breadcrumbs", trail));
        finish(start, rows)
    }
}
