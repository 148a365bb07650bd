//! JavaScript execution operations for CDP page session.

use serde_json::{json, Value};

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{PropertyDescriptor, RemoteObject};

use super::core::PageSession;

/// Object group holding every remote handle handed out to callers.
pub(crate) const HANDLE_GROUP: &str = "pokernow-handles";

fn exception_text(result: &Value) -> Option<String> {
    result.get("exceptionDetails").map(|exception| {
        exception["exception"]["description"]
            .as_str()
            .or_else(|| exception["text"].as_str())
            .unwrap_or("Unknown error")
            .to_string()
    })
}

fn call_arguments(args: Vec<Value>) -> Value {
    json!(args.into_iter().map(|v| json!({"value": v})).collect::<Vec<_>>())
}

impl PageSession {
    /// Evaluate a JavaScript expression and return its value.
    pub async fn evaluate(&self, expression: &str) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(text) = exception_text(&result) {
            return Err(CdpError::JavaScript(text));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Evaluate a JavaScript expression and return a remote object in the
    /// handle group.
    pub async fn evaluate_handle(&self, expression: &str) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.evaluate",
                Some(json!({
                    "expression": expression,
                    "returnByValue": false,
                    "objectGroup": HANDLE_GROUP,
                })),
            )
            .await?;

        if let Some(text) = exception_text(&result) {
            return Err(CdpError::JavaScript(text));
        }

        Ok(serde_json::from_value(result["result"].clone())?)
    }

    /// Call `function` with `this` bound to a remote object and return its value.
    pub async fn call_function_on(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<Value, CdpError> {
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "objectId": object_id,
                    "functionDeclaration": function,
                    "arguments": call_arguments(args),
                    "returnByValue": true,
                    "awaitPromise": true,
                })),
            )
            .await?;

        if let Some(text) = exception_text(&result) {
            return Err(CdpError::JavaScript(text));
        }

        Ok(result["result"]["value"].clone())
    }

    /// Like [`call_function_on`](Self::call_function_on) but returns a remote
    /// object in the handle group.
    pub async fn call_function_on_handle(
        &self,
        object_id: &str,
        function: &str,
        args: Vec<Value>,
    ) -> Result<RemoteObject, CdpError> {
        let result = self
            .call(
                "Runtime.callFunctionOn",
                Some(json!({
                    "objectId": object_id,
                    "functionDeclaration": function,
                    "arguments": call_arguments(args),
                    "returnByValue": false,
                    "objectGroup": HANDLE_GROUP,
                })),
            )
            .await?;

        if let Some(text) = exception_text(&result) {
            return Err(CdpError::JavaScript(text));
        }

        Ok(serde_json::from_value(result["result"].clone())?)
    }

    /// Own properties of a remote object.
    pub async fn get_properties(&self, object_id: &str) -> Result<Vec<PropertyDescriptor>, CdpError> {
        let result = self
            .call(
                "Runtime.getProperties",
                Some(json!({
                    "objectId": object_id,
                    "ownProperties": true,
                })),
            )
            .await?;

        Ok(serde_json::from_value(result["result"].clone())?)
    }

    /// Remote object ids of the elements of a remote array, in index order.
    pub async fn array_elements(&self, array_id: &str) -> Result<Vec<String>, CdpError> {
        let mut indexed: Vec<(usize, String)> = self
            .get_properties(array_id)
            .await?
            .into_iter()
            .filter_map(|prop| {
                let index = prop.name.parse::<usize>().ok()?;
                let object_id = prop.value?.object_id?;
                Some((index, object_id))
            })
            .collect();
        indexed.sort_by_key(|(index, _)| *index);
        Ok(indexed.into_iter().map(|(_, id)| id).collect())
    }

    pub async fn release_object(&self, object_id: &str) -> Result<(), CdpError> {
        self.call(
            "Runtime.releaseObject",
            Some(json!({"objectId": object_id})),
        )
        .await?;
        Ok(())
    }

    /// Release every handle in [`HANDLE_GROUP`].
    pub async fn release_handles(&self) -> Result<(), CdpError> {
        self.call(
            "Runtime.releaseObjectGroup",
            Some(json!({"objectGroup": HANDLE_GROUP})),
        )
        .await?;
        Ok(())
    }
}
