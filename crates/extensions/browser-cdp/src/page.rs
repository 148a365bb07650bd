//! [`DomAccessor`] and [`BrowserSession`] over a CDP page session.
//!
//! Element handles are Runtime remote object ids. They stay valid until
//! [`DomAccessor::release`] frees the handle group, which callers do once per
//! poll.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use pokernow_protocols::{BrowserSession, Cookie, DomAccessor, DomError, ElementHandle};
use tracing::debug;

use crate::cdp::PageSession;

/// A single attached page.
#[derive(Clone)]
pub struct CdpPage {
    session: Arc<PageSession>,
}

impl CdpPage {
    pub fn new(session: Arc<PageSession>) -> Self {
        Self { session }
    }

    pub fn session(&self) -> &PageSession {
        &self.session
    }

    pub fn target_id(&self) -> &str {
        self.session.target_id()
    }
}

fn handle(object_id: String) -> ElementHandle {
    ElementHandle::new(object_id)
}

#[async_trait]
impl DomAccessor for CdpPage {
    async fn query(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Option<ElementHandle>, DomError> {
        let found = self
            .session
            .query_selector(selector, scope.map(ElementHandle::id))
            .await?;
        Ok(found.map(handle))
    }

    async fn query_all(
        &self,
        selector: &str,
        scope: Option<&ElementHandle>,
    ) -> Result<Vec<ElementHandle>, DomError> {
        let found = self
            .session
            .query_selector_all(selector, scope.map(ElementHandle::id))
            .await?;
        debug!("'{}' matched {} elements", selector, found.len());
        Ok(found.into_iter().map(handle).collect())
    }

    async fn text(&self, element: &ElementHandle) -> Result<String, DomError> {
        Ok(self.session.element_text(element.id()).await?)
    }

    async fn attr(&self, element: &ElementHandle, name: &str) -> Result<Option<String>, DomError> {
        Ok(self.session.element_attribute(element.id(), name).await?)
    }

    async fn is_displayed(&self, element: &ElementHandle) -> Result<bool, DomError> {
        Ok(self.session.element_displayed(element.id()).await?)
    }

    async fn click(&self, element: &ElementHandle) -> Result<(), DomError> {
        Ok(self.session.click_element(element.id()).await?)
    }

    async fn fill(&self, element: &ElementHandle, text: &str) -> Result<(), DomError> {
        Ok(self.session.fill_element(element.id(), text).await?)
    }

    async fn wait_for(
        &self,
        selector: &str,
        timeout: Duration,
    ) -> Result<Option<ElementHandle>, DomError> {
        let found = self.session.wait_for_selector(selector, timeout).await?;
        Ok(found.map(handle))
    }

    async fn release(&self) -> Result<(), DomError> {
        Ok(self.session.release_handles().await?)
    }
}

#[async_trait]
impl BrowserSession for CdpPage {
    async fn navigate(&self, url: &str) -> Result<(), DomError> {
        self.session.navigate(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String, DomError> {
        Ok(self.session.get_url().await?)
    }

    async fn get_cookies(&self) -> Result<Vec<Cookie>, DomError> {
        Ok(self.session.get_cookies().await?)
    }

    async fn set_cookies(&self, cookies: &[Cookie]) -> Result<(), DomError> {
        Ok(self.session.set_cookies(cookies).await?)
    }

    async fn close(&self) -> Result<(), DomError> {
        Ok(self.session.close().await?)
    }
}
