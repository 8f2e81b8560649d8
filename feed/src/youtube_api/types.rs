//! Shared types and streaming infrastructure for the YouTube API client.

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};
use tokio_stream::Stream;

type OneFuturePage<'a, F, T, E> =
    Pin<Box<dyn Future<Output = Result<(F, (VecDeque<T>, Option<String>)), E>> + 'a + Send>>;

/// A paginated stream that follows continuation tokens of a YouTube API list endpoint.
///
/// This stream yields items one by one, fetching the next page only once the current page is
/// exhausted. Only forward pagination is supported. The first error ends the stream.
pub struct PagedStream<'a, T, F, E> {
    /// Items of the most recently fetched page that have not been yielded yet
    current_items: VecDeque<T>,
    /// The page request currently in flight, if any
    pending_request: Option<OneFuturePage<'a, F, T, E>>,
    is_done: bool,
}

impl<'a, T, F, E> PagedStream<'a, T, F, E> {
    /// Create a new `PagedStream` that starts by fetching the first page.
    ///
    /// `fetcher` receives the continuation token of the page to fetch (`None` for the first
    /// page) and returns that page's items together with the token for the page after it.
    pub fn new<Fut>(fetcher: F) -> Self
    where
        F: Fn(Option<String>) -> Fut,
        F: Send + 'a,
        Fut: Future<Output = Result<(VecDeque<T>, Option<String>), E>> + Send + 'a,
        E: 'a,
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

impl<'a, T: Unpin, F, E> Unpin for PagedStream<'a, T, F, E> {}

impl<'a, T: Unpin, F, Fut, E> Stream for PagedStream<'a, T, F, E>
where
    F: Fn(Option<String>) -> Fut,
    F: Send + 'a,
    Fut: Future<Output = Result<(VecDeque<T>, Option<String>), E>> + Send + 'a,
    E: 'a,
{
    type Item = Result<T, E>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut TaskContext<'_>) -> Poll<Option<Self::Item>> {
        loop {
            if let Some(item) = self.current_items.pop_front() {
                return Poll::Ready(Some(Ok(item)));
            }

            if self.is_done {
                return Poll::Ready(None);
            }

            let Some(pending) = self.pending_request.as_mut() else {
                self.is_done = true;
                return Poll::Ready(None);
            };

            match pending.as_mut().poll(cx) {
                Poll::Ready(Ok((fetcher, (items, next_token)))) => {
                    self.current_items.extend(items);

                    if let Some(next_token) = next_token {
                        // set up the next page, but only poll it once this one is drained
                        self.pending_request = Some(Box::pin(async move {
                            let results = fetcher(Some(next_token)).await?;
                            Ok((fetcher, results))
                        }));
                    } else {
                        self.is_done = true;
                        self.pending_request = None;
                    }
                    continue;
                }
                Poll::Ready(Err(e)) => {
                    self.pending_request = None;
                    self.is_done = true;
                    return Poll::Ready(Some(Err(e)));
                }
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

/// Paging details for lists of resources.
///
/// See: <https://developers.google.com/youtube/v3/docs/pageInfo>
#[derive(Debug, Default, Clone, serde::Serialize, serde::Deserialize)]
pub struct PageInfo {
    /// The total number of results in the result set.
    ///
    /// For search results this is an approximation reported by YouTube.
    #[serde(rename = "totalResults", default)]
    pub total_results: u32,
    /// The number of results included in the API response.
    #[serde(rename = "resultsPerPage", default)]
    pub results_per_page: u32,
}

/// The standard Google API error document returned with non-2xx responses.
///
/// See: <https://developers.google.com/youtube/v3/docs/errors>
#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorResponse {
    pub(crate) error: ErrorBody,
}

#[derive(Debug, serde::Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub(crate) code: Option<u16>,
    pub(crate) message: String,
}
