//! Element operations on remote object handles.

use serde_json::{json, Value};
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{ClickPoint, RemoteObject};

use super::core::PageSession;

const QUERY_IN: &str = "function(selector) { return this.querySelector(selector); }";
const QUERY_ALL_IN: &str =
    "function(selector) { return Array.from(this.querySelectorAll(selector)); }";
const INNER_TEXT: &str =
    "function() { return (this.innerText ?? this.textContent ?? '').trim(); }";
const GET_ATTRIBUTE: &str = "function(name) { return this.getAttribute(name); }";
const IS_DISPLAYED: &str = r#"function() {
    if (!this.isConnected) return false;
    const style = window.getComputedStyle(this);
    if (style.display === 'none' || style.visibility === 'hidden') return false;
    const rect = this.getBoundingClientRect();
    return rect.width > 0 && rect.height > 0;
}"#;
const SCROLL_AND_MEASURE: &str = r#"function() {
    this.scrollIntoView({block: 'center', inline: 'center'});
    const rect = this.getBoundingClientRect();
    return {x: rect.left + rect.width / 2, y: rect.top + rect.height / 2,
            width: rect.width, height: rect.height};
}"#;
const DOM_CLICK: &str = "function() { this.click(); }";
const CLEAR_VALUE: &str = r#"function() {
    this.focus();
    if ('value' in this) {
        this.value = '';
        this.dispatchEvent(new Event('input', {bubbles: true}));
    }
}"#;

fn selector_expression(selector: &str, all: bool) -> Result<String, CdpError> {
    let quoted = serde_json::to_string(selector)?;
    Ok(if all {
        format!("Array.from(document.querySelectorAll({}))", quoted)
    } else {
        format!("document.querySelector({})", quoted)
    })
}

fn object_id(object: RemoteObject) -> Option<String> {
    if object.is_null() {
        None
    } else {
        object.object_id
    }
}

impl PageSession {
    /// First element matching `selector`, searched under `scope` or the document.
    pub async fn query_selector(
        &self,
        selector: &str,
        scope: Option<&str>,
    ) -> Result<Option<String>, CdpError> {
        let object = match scope {
            Some(scope) => {
                self.call_function_on_handle(scope, QUERY_IN, vec![json!(selector)])
                    .await?
            }
            None => self.evaluate_handle(&selector_expression(selector, false)?).await?,
        };
        Ok(object_id(object))
    }

    /// Every element matching `selector`, in document order.
    pub async fn query_selector_all(
        &self,
        selector: &str,
        scope: Option<&str>,
    ) -> Result<Vec<String>, CdpError> {
        let array = match scope {
            Some(scope) => {
                self.call_function_on_handle(scope, QUERY_ALL_IN, vec![json!(selector)])
                    .await?
            }
            None => self.evaluate_handle(&selector_expression(selector, true)?).await?,
        };
        let Some(array_id) = object_id(array) else {
            return Ok(Vec::new());
        };

        let elements = self.array_elements(&array_id).await?;
        self.release_object(&array_id).await?;
        Ok(elements)
    }

    /// Rendered text of an element, trimmed.
    pub async fn element_text(&self, object_id: &str) -> Result<String, CdpError> {
        let value = self.call_function_on(object_id, INNER_TEXT, Vec::new()).await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub async fn element_attribute(
        &self,
        object_id: &str,
        name: &str,
    ) -> Result<Option<String>, CdpError> {
        let value = self
            .call_function_on(object_id, GET_ATTRIBUTE, vec![json!(name)])
            .await?;
        Ok(match value {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub async fn element_displayed(&self, object_id: &str) -> Result<bool, CdpError> {
        let value = self.call_function_on(object_id, IS_DISPLAYED, Vec::new()).await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    /// Click the element's center with mouse events, falling back to a DOM
    /// `click()` when it has no box.
    pub async fn click_element(&self, object_id: &str) -> Result<(), CdpError> {
        let value = self
            .call_function_on(object_id, SCROLL_AND_MEASURE, Vec::new())
            .await?;
        let point: ClickPoint = serde_json::from_value(value)?;

        if point.is_clickable() {
            self.click(point.x, point.y).await
        } else {
            debug!("Element has no box, using DOM click");
            self.call_function_on(object_id, DOM_CLICK, Vec::new()).await?;
            Ok(())
        }
    }

    /// Clear an input and type `text` into it.
    pub async fn fill_element(&self, object_id: &str, text: &str) -> Result<(), CdpError> {
        self.call_function_on(object_id, CLEAR_VALUE, Vec::new()).await?;
        self.focus_object(object_id).await?;
        self.press_key_combo("Control+a").await?;
        self.type_text(text).await
    }

    pub async fn focus_object(&self, object_id: &str) -> Result<(), CdpError> {
        self.call("DOM.focus", Some(json!({"objectId": object_id})))
            .await?;
        Ok(())
    }
}
