//! Background image slot with request generations.
//!
//! Every fetch or file load takes a token before it starts. Only the
//! completion carrying the latest token may replace the current image, so a
//! slow early request can never overwrite a faster later one.

use mk_core::MemeError;

/// Generation number of one background request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(pub u32);

pub struct BackgroundSlot<I> {
    /// Newest issued generation; `None` until the first `begin`.
    latest: Option<u32>,
    /// Newest generation that failed, if it has not been superseded.
    failed: Option<RequestToken>,
    current: Option<I>,
}

impl<I> Default for BackgroundSlot<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> BackgroundSlot<I> {
    pub fn new() -> Self {
        Self {
            latest: None,
            failed: None,
            current: None,
        }
    }

    /// Start a request. Any earlier outstanding request becomes stale.
    pub fn begin(&mut self) -> RequestToken {
        let next = self.latest.map_or(1, |n| n.wrapping_add(1));
        self.latest = Some(next);
        self.failed = None;
        log::debug!("background request {next} started");
        RequestToken(next)
    }

    pub fn latest(&self) -> Option<RequestToken> {
        self.latest.map(RequestToken)
    }

    /// Store `image` if `token` is the latest issued request.
    pub fn complete(&mut self, token: RequestToken, image: I) -> Result<(), MemeError> {
        if self.latest != Some(token.0) {
            let latest = self.latest.unwrap_or(0);
            log::warn!("dropping stale background {} (latest {latest})", token.0);
            return Err(MemeError::StaleRequest {
                request: token.0,
                latest,
            });
        }
        self.current = Some(image);
        log::debug!("background request {} completed", token.0);
        Ok(())
    }

    /// Record a failed request. The current image stays in place; only a
    /// failure of the latest request is remembered.
    pub fn fail(&mut self, token: RequestToken, reason: &str) {
        log::warn!("background request {} failed: {reason}", token.0);
        if self.latest == Some(token.0) {
            self.failed = Some(token);
        }
    }

    /// The latest request failed and nothing newer has started.
    pub fn last_failed(&self) -> Option<RequestToken> {
        self.failed
    }

    pub fn current(&self) -> Option<&I> {
        self.current.as_ref()
    }
}
