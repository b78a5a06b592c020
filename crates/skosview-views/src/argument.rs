//! Contextual concept-URI argument: title lookup and validation.

use std::sync::Arc;

use tracing::{debug, warn};

use skosview_core::SkosmosApi;

use crate::context::ExecutionContext;

/// A concept URI taken from the request path.
pub struct ConceptUriArgument {
    api: Arc<dyn SkosmosApi>,
    ctx: ExecutionContext,
    argument: String,
}

impl ConceptUriArgument {
    pub fn new(api: Arc<dyn SkosmosApi>, ctx: ExecutionContext, argument: impl Into<String>) -> Self {
        Self {
            api,
            ctx,
            argument: argument.into(),
        }
    }

    pub fn argument(&self) -> &str {
        &self.argument
    }

    /// Preferred label of the concept in the interface language.
    ///
    /// An API failure is reported on the runtime channel and yields `""`.
    pub async fn title(&self) -> String {
        let lang = &self.ctx.interface_language;
        match self.api.get_label(&self.argument, lang).await {
            Ok(label) => label.pref_label.unwrap_or_default(),
            Err(e) => {
                warn!(subsystem = "views", op = "title", uri = %self.argument, lang = %lang, error = %e, "Label lookup failed");
                let message = e
                    .as_api()
                    .map(|api| api.message.clone())
                    .unwrap_or_else(|| e.to_string());
                self.ctx.messenger.add_error(&message);
                String::new()
            }
        }
    }
}

/// Accepts an argument only when the API can resolve it as a resource.
pub struct ConceptUriValidator {
    api: Arc<dyn SkosmosApi>,
}

impl ConceptUriValidator {
    pub fn new(api: Arc<dyn SkosmosApi>) -> Self {
        Self { api }
    }

    pub async fn validate(&self, argument: &str) -> bool {
        if argument.trim().is_empty() {
            return false;
        }
        match self.api.get_data(argument).await {
            Ok(_) => true,
            Err(e) => {
                debug!(subsystem = "views", op = "validate", uri = argument, error = %e, "Concept URI rejected");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSkosmosApi;
    use skosview_core::{ApiError, MessageKind, RdfGraph};

    const CATS: &str = "http://www.yso.fi/onto/yso/p4";

    #[tokio::test]
    async fn test_title_uses_interface_language() {
        let api = MockSkosmosApi::new().with_label(CATS, "kissat");
        let (ctx, log) = ExecutionContext::with_log("fi");
        let arg = ConceptUriArgument::new(Arc::new(api.clone()), ctx, CATS);

        assert_eq!(arg.title().await, "kissat");
        assert!(log.is_empty());
        assert_eq!(
            api.calls_to("get_label")[0].input,
            serde_json::json!([CATS, "fi"])
        );
    }

    #[tokio::test]
    async fn test_title_error_is_surfaced() {
        let api = MockSkosmosApi::new()
            .with_failure("get_label", ApiError::new(Some(503), "Service Unavailable"));
        let (ctx, log) = ExecutionContext::with_log("en");
        let arg = ConceptUriArgument::new(Arc::new(api), ctx, CATS);

        assert_eq!(arg.title().await, "");
        assert_eq!(log.of_kind(MessageKind::Runtime), vec!["Service Unavailable"]);
    }

    #[tokio::test]
    async fn test_validator() {
        let api = MockSkosmosApi::new().with_data(CATS, RdfGraph::default());
        let validator = ConceptUriValidator::new(Arc::new(api.clone()));

        assert!(validator.validate(CATS).await);
        assert!(!validator.validate("http://example.org/unknown").await);
        assert!(!validator.validate("  ").await);
        assert_eq!(api.calls_to("get_data").len(), 2);
    }
}
