//! `PostFastNode` — the node's execution entry point.
//!
//! For every input item, in order:
//! 1. Reads the item's parameters into a [`Command`].
//! 2. Sends the command's request (walking all pages for a return-all listing).
//! 3. Normalizes the answer into output items paired with the input item.
//! 4. On failure, classifies the error and either records it as an error item
//!    (continue-on-fail) or aborts the batch.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, error, info, instrument, warn};

use nodes::{AuthenticatedRequest, ExecutableNode, ExecutionContext, NodeError, NodeItem, NodeParameters};

use crate::classify::{classify, ItemFailure};
use crate::command::{selected_operation, Command, Operation, Resource};
use crate::normalize::normalize_response;
use crate::pagination::{fetch_all_pages, unwrap_data};

/// The PostFast node, bound to the helper that performs authenticated calls.
pub struct PostFastNode<H> {
    http: H,
}

impl<H: AuthenticatedRequest> PostFastNode<H> {
    pub fn new(http: H) -> Self {
        Self { http }
    }

    /// The request helper this node sends through.
    pub fn http(&self) -> &H {
        &self.http
    }

    async fn run_item(
        &self,
        resource: Resource,
        operation: Operation,
        params: &dyn NodeParameters,
        item_index: usize,
    ) -> Result<Value, ItemFailure> {
        let command = Command::from_parameters(resource, operation, params, item_index)?;
        let request = command.request()?;
        debug!(
            "item {}: {} {} (query: {:?})",
            item_index, request.method, request.path, request.query
        );

        let response = match &command {
            Command::GetManyPosts(list) if list.return_all => {
                Value::Array(fetch_all_pages(&self.http, &request).await?)
            }
            Command::GetManyPosts(_) => unwrap_data(self.http.request(&request).await?),
            _ => self.http.request(&request).await?,
        };
        Ok(response)
    }
}

#[async_trait]
impl<H: AuthenticatedRequest> ExecutableNode for PostFastNode<H> {
    #[instrument(
        skip(self, items, params, ctx),
        fields(execution_id = %ctx.execution_id, node = %ctx.node_name)
    )]
    async fn execute(
        &self,
        items: Vec<NodeItem>,
        params: &dyn NodeParameters,
        ctx: &ExecutionContext,
    ) -> Result<Vec<NodeItem>, NodeError> {
        let (resource, operation) =
            selected_operation(params).map_err(|e| NodeError::Operation {
                message: e.to_string(),
                description: format!("Node: {}", ctx.node_name),
                item_index: None,
            })?;
        info!(
            "running {}.{} over {} item(s)",
            resource,
            operation,
            items.len()
        );

        let mut output = Vec::new();

        for item_index in 0..items.len() {
            match self.run_item(resource, operation, params, item_index).await {
                Ok(response) => {
                    let produced = normalize_response(response, item_index);
                    debug!("item {} produced {} output item(s)", item_index, produced.len());
                    output.extend(produced);
                }

                Err(failure) => {
                    let classified = classify(&failure, operation);

                    if ctx.continue_on_fail {
                        warn!(
                            "item {} failed, continuing: {} ({})",
                            item_index, classified, failure
                        );
                        output.push(NodeItem::paired(
                            json!({ "error": classified.to_string() }),
                            item_index,
                        ));
                        continue;
                    }

                    error!("item {} failed: {} ({})", item_index, classified, failure);
                    return Err(classified.into_node_error(resource, operation, item_index));
                }
            }
        }

        info!("{}.{} produced {} item(s)", resource, operation, output.len());
        Ok(output)
    }
}
