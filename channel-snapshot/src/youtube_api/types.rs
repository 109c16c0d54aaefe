//! Shared types and streaming infrastructure for the YouTube API client.

use crate::error::Error;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::Stream;

/// One page of results: the items plus the continuation token for the page after it.
pub type Page<T> = (VecDeque<T>, Option<String>);

type OneFuturePage<'a, F, T> = Pin<Box<dyn Future<Output = Result<(F, Page<T>), Error>> + 'a + Send>>;

/// A paginated stream that fetches subsequent pages from a YouTube API list endpoint on demand.
///
/// Items are yielded one by one. The next page is only requested once the consumer polls past the
/// last buffered item, so wrapping the stream in [`StreamExt::take`](tokio_stream::StreamExt::take)
/// stops pagination at exactly the requested number of items. Pages are fetched strictly in order
/// since each request needs the token from the previous response.
///
/// Once an error is yielded the stream is finished.
pub struct PagedStream<'a, T, F> {
    /// Items from the most recent page not yet handed out.
    current_items: VecDeque<T>,
    /// The request for the next page, if one is due.
    pending_request: Option<OneFuturePage<'a, F, T>>,
    /// Set once the last page has been consumed or a request failed.
    is_done: bool,
}

impl<'a, T, F> PagedStream<'a, T, F> {
    /// Create a stream whose pages come from `fetcher`.
    ///
    /// `fetcher` is called with `None` for the first page and with the previous page's
    /// continuation token afterwards. Nothing is fetched until the stream is first polled.
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = Result<Page<T>, Error>> + Send + 'a,
    {
        let first_page = async move {
            let results = fetcher(None).await?;
            Ok((fetcher, results))
        };
        Self {
            pending_request: Some(Box::pin(first_page)),
            current_items: VecDeque::new(),
            is_done: false,
        }
    }
}

impl<'a, T: Unpin, F> Unpin for PagedStream<'a, T, F> {}

impl<'a, T: Unpin, F, Fut> Stream for PagedStream<'a, T, F>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = Result<Page<T>, Error>> + Send + 'a,
{
    type Item = Result<T, Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            // drain the buffered page first
            if let Some(item) = self.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if self.is_done {
                return Poll::Ready(None);
            }

            // no request queued and nothing buffered: the listing is exhausted
            let Some(pending) = self.pending_request.as_mut() else {
                self.is_done = true;
                return Poll::Ready(None);
            };

            match pending.as_mut().poll(cx) {
                Poll::Ready(Ok((fetcher, (items, next_token)))) => {
                    self.current_items.extend(items);

                    if let Some(next_token) = next_token {
                        // set up the next page, but only poll it once the buffer runs dry
                        self.pending_request = Some(Box::pin(async move {
                            let results = fetcher(Some(next_token)).await?;
                            Ok((fetcher, results))
                        }));
                    } else {
                        // last page
                        self.is_done = true;
                        self.pending_request = None;
                    }
                }
                Poll::Ready(Err(e)) => {
                    // a failed page ends the stream; later pages are never requested
                    self.pending_request = None;
                    self.is_done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                // response not here yet
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}
