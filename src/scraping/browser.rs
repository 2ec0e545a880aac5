use std::time::Duration;

use async_trait::async_trait;
use fantoccini::error::CmdError;
use fantoccini::{ClientBuilder, Locator};
use serde_json::Value;
use tokio::time::{sleep, Instant};

use super::bridge::{self, BridgeResult};
use crate::error::AppError;

/// Keys the workflow sends to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Advances the reader by one page (the viewer reads right-to-left).
    ArrowLeft,
}

/// A handle to an element on the current document.
///
/// Handles are only valid until the next full-page navigation; after that
/// every operation on them fails and callers must re-query.
#[async_trait]
pub trait PageElement: Send + Sync {
    async fn text(&self) -> Result<String, AppError>;

    /// Returns the attribute value, or `None` while the attribute is unset.
    async fn attr(&self, name: &str) -> Result<Option<String>, AppError>;

    async fn click(&self) -> Result<(), AppError>;

    async fn send_keys(&self, text: &str) -> Result<(), AppError>;

    /// Finds a single descendant. Fails with `ElementNotFound` if the
    /// selector matches nothing under this element.
    async fn find(&self, selector: &str) -> Result<Box<dyn PageElement>, AppError>;
}

/// The browser session seam: navigation, element lookup, the in-page fetch
/// bridge, key input and lifecycle teardown.
///
/// `find` fails with `ElementNotFound` when the selector matches nothing;
/// `find_all` returns an empty list instead. Bounded waiting lives outside
/// this trait, in [`wait_for_element`] and friends.
#[async_trait]
pub trait Driver: Send + Sync {
    async fn goto(&self, url: &str) -> Result<(), AppError>;

    async fn find(&self, selector: &str) -> Result<Box<dyn PageElement>, AppError>;

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>, AppError>;

    /// Runs the in-page fetch bridge against `uri` and returns its raw
    /// outcome: an encoded payload on success, an HTTP status on failure.
    async fn run_fetch_bridge(&self, uri: &str) -> Result<BridgeResult, AppError>;

    async fn send_key(&self, selector: &str, key: Key) -> Result<(), AppError>;

    /// Navigates back in session history.
    async fn back(&self) -> Result<(), AppError>;

    async fn close(&self) -> Result<(), AppError>;
}

/// How long, and how often, to poll for elements and attributes.
///
/// One policy covers every wait in the workflow; tests shrink it so failure
/// paths resolve quickly.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    pub timeout: Duration,
    pub interval: Duration,
}

impl WaitPolicy {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            timeout,
            interval: Duration::from_millis(250),
        }
    }
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self::with_timeout(Duration::from_secs(10))
    }
}

/// Polls for a single element until the policy deadline.
pub async fn wait_for_element<D: Driver + ?Sized>(
    driver: &D,
    wait: &WaitPolicy,
    selector: &str,
) -> Result<Box<dyn PageElement>, AppError> {
    let deadline = Instant::now() + wait.timeout;
    loop {
        match driver.find(selector).await {
            Ok(element) => return Ok(element),
            Err(AppError::ElementNotFound(_)) => {}
            Err(e) => return Err(e),
        }
        if Instant::now() >= deadline {
            return Err(AppError::ElementNotFound(selector.to_string()));
        }
        sleep(wait.interval).await;
    }
}

/// Polls until the selector matches at least one element, returning whatever
/// matched by the deadline (possibly nothing).
pub async fn wait_for_elements<D: Driver + ?Sized>(
    driver: &D,
    wait: &WaitPolicy,
    selector: &str,
) -> Result<Vec<Box<dyn PageElement>>, AppError> {
    let deadline = Instant::now() + wait.timeout;
    loop {
        let elements = driver.find_all(selector).await?;
        if !elements.is_empty() || Instant::now() >= deadline {
            return Ok(elements);
        }
        sleep(wait.interval).await;
    }
}

/// Polls until the attribute becomes non-null, failing with `Timeout` at the
/// deadline.
pub async fn wait_for_attr(
    element: &dyn PageElement,
    wait: &WaitPolicy,
    name: &str,
) -> Result<String, AppError> {
    let deadline = Instant::now() + wait.timeout;
    loop {
        if let Some(value) = element.attr(name).await? {
            return Ok(value);
        }
        if Instant::now() >= deadline {
            return Err(AppError::Timeout(format!("attribute {name:?} to appear")));
        }
        sleep(wait.interval).await;
    }
}

/// The fantoccini-backed session. Talks to a WebDriver endpoint (geckodriver
/// by default) and drives a real Firefox.
pub struct WebDriver {
    client: fantoccini::Client,
}

impl WebDriver {
    pub async fn connect(webdriver_url: &str, headless: bool) -> Result<Self, AppError> {
        let mut builder = ClientBuilder::native();
        if headless {
            let mut caps = serde_json::map::Map::new();
            caps.insert(
                "moz:firefoxOptions".to_string(),
                serde_json::json!({ "args": ["-headless"] }),
            );
            builder.capabilities(caps);
        }

        let client = builder
            .connect(webdriver_url)
            .await
            .map_err(|e| AppError::Browser(e.to_string()))?;

        client
            .set_window_size(960, 1080)
            .await
            .map_err(|e| AppError::Browser(e.to_string()))?;

        Ok(Self { client })
    }
}

fn lookup_err(selector: &str, e: CmdError) -> AppError {
    if e.is_no_such_element() {
        AppError::ElementNotFound(selector.to_string())
    } else {
        AppError::Browser(e.to_string())
    }
}

fn browser_err(e: CmdError) -> AppError {
    AppError::Browser(e.to_string())
}

#[async_trait]
impl Driver for WebDriver {
    async fn goto(&self, url: &str) -> Result<(), AppError> {
        self.client.goto(url).await.map_err(browser_err)
    }

    async fn find(&self, selector: &str) -> Result<Box<dyn PageElement>, AppError> {
        let element = self
            .client
            .find(Locator::Css(selector))
            .await
            .map_err(|e| lookup_err(selector, e))?;
        Ok(Box::new(WebElement { inner: element }))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Box<dyn PageElement>>, AppError> {
        let elements = self
            .client
            .find_all(Locator::Css(selector))
            .await
            .map_err(|e| lookup_err(selector, e))?;
        Ok(elements
            .into_iter()
            .map(|inner| Box::new(WebElement { inner }) as Box<dyn PageElement>)
            .collect())
    }

    async fn run_fetch_bridge(&self, uri: &str) -> Result<BridgeResult, AppError> {
        let result = self
            .client
            .execute_async(bridge::FETCH_SCRIPT, vec![Value::String(uri.to_string())])
            .await
            .map_err(browser_err)?;
        BridgeResult::from_script_value(result)
    }

    async fn send_key(&self, selector: &str, key: Key) -> Result<(), AppError> {
        let sequence = match key {
            Key::ArrowLeft => char::from(fantoccini::key::Key::Left).to_string(),
        };
        self.client
            .find(Locator::Css(selector))
            .await
            .map_err(|e| lookup_err(selector, e))?
            .send_keys(&sequence)
            .await
            .map_err(browser_err)
    }

    async fn back(&self) -> Result<(), AppError> {
        self.client.back().await.map_err(browser_err)
    }

    async fn close(&self) -> Result<(), AppError> {
        self.client.clone().close().await.map_err(browser_err)
    }
}

struct WebElement {
    inner: fantoccini::elements::Element,
}

#[async_trait]
impl PageElement for WebElement {
    async fn text(&self) -> Result<String, AppError> {
        self.inner.text().await.map_err(browser_err)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>, AppError> {
        self.inner.attr(name).await.map_err(browser_err)
    }

    async fn click(&self) -> Result<(), AppError> {
        // fantoccini gives up the element handle on click since the click may
        // navigate; the workflow re-queries afterwards anyway.
        self.inner
            .clone()
            .click()
            .await
            .map(|_| ())
            .map_err(browser_err)
    }

    async fn send_keys(&self, text: &str) -> Result<(), AppError> {
        self.inner.send_keys(text).await.map_err(browser_err)
    }

    async fn find(&self, selector: &str) -> Result<Box<dyn PageElement>, AppError> {
        let element = self
            .inner
            .find(Locator::Css(selector))
            .await
            .map_err(|e| lookup_err(selector, e))?;
        Ok(Box::new(WebElement { inner: element }))
    }
}
