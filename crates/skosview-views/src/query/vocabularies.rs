//! `/vocabularies` executor.

use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use tracing::warn;

use skosview_core::{SkosmosApi, VocabulariesRequest, VocabularyList};

use super::{finish, numbered, BuiltQuery, QueryBase, SkosmosQuery, LANG_REQUIRED};
use crate::context::ExecutionContext;
use crate::pager::Pager;
use crate::rows::ViewExecution;
use crate::translator::{FromPositional, VOCABULARIES_TEMPLATE};

pub struct VocabulariesQuery {
    base: QueryBase,
}

impl VocabulariesQuery {
    pub fn new(api: Arc<dyn SkosmosApi>, ctx: ExecutionContext) -> Self {
        Self {
            base: QueryBase::new(api, ctx),
        }
    }

    /// Failures are logged and not posted to the messenger, unlike
    /// [`SearchQuery`](super::SearchQuery) which reports the API message.
    async fn fetch(&self, req: &VocabulariesRequest) -> VocabularyList {
        match self.base.api().list_vocabularies(req).await {
            Ok(list) => list,
            Err(e) => {
                warn!(subsystem = "views", op = "vocabularies", lang = %req.lang, error = %e, "Vocabulary listing failed");
                VocabularyList::default()
            }
        }
    }
}

#[async_trait]
impl SkosmosQuery for VocabulariesQuery {
    fn base(&self) -> &QueryBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut QueryBase {
        &mut self.base
    }

    fn build(&self, _pager: Option<&Pager>) -> BuiltQuery {
        BuiltQuery::new(self.base.translate(&VOCABULARIES_TEMPLATE))
    }

    async fn execute(&self, built: BuiltQuery, _pager: Option<&mut Pager>) -> ViewExecution {
        let args = built.query;
        if args.is_blank("lang") {
            self.base.configuration_error(LANG_REQUIRED);
            return ViewExecution::empty();
        }

        let req = match VocabulariesRequest::from_arguments(args) {
            Ok(req) => req,
            Err(e) => {
                self.base.invalid_arguments("vocabularies", &e);
                return ViewExecution::empty();
            }
        };

        let start = Instant::now();
        let list = self.fetch(&req).await;
        let rows = numbered(list.vocabularies, |row, vocab| {
            row.with("uri", vocab.uri)
                .with("id", vocab.id)
                .with("title", vocab.title)
        });
        finish(start, rows)
    }
}
