use futures::{Stream, TryStreamExt};
use reqwest::header::{HeaderMap, LINK};
use reqwest::Url;
use std::collections::{HashSet, VecDeque};

use super::client::Client;
use crate::error::ClientError;
use crate::models::Document;

/// Lazy iterator over a paginated document listing.
///
/// Pages are fetched on demand as [`DocumentIter::next`] runs out of
/// buffered documents. Iteration stops at the first error, which is then
/// available from [`DocumentIter::err`].
///
/// `next` links must stay on the origin of the first page, since every request
/// carries the API token, and must not lead back to a page already fetched.
///
/// ```ignore
/// let mut iter = client.list_documents(applicant_id);
/// while iter.next().await {
///     println!("{:?}", iter.document());
/// }
/// if let Some(err) = iter.err() {
///     return Err(err.into());
/// }
/// ```
pub struct DocumentIter {
    client: Client,
    next_page: Option<Url>,
    first_page: Option<Url>,
    fetched: HashSet<Url>,
    buffer: VecDeque<Document>,
    current: Option<Document>,
    err: Option<ClientError>,
}

impl DocumentIter {
    pub(crate) fn new(client: Client, first_page: Result<Url, ClientError>) -> Self {
        let (next_page, err) = match first_page {
            Ok(url) => (Some(url), None),
            Err(e) => (None, Some(e)),
        };

        Self {
            client,
            first_page: next_page.clone(),
            next_page,
            fetched: HashSet::new(),
            buffer: VecDeque::new(),
            current: None,
            err,
        }
    }

    /// Advance to the next document, fetching a page if needed.
    ///
    /// Returns `false` once the listing is exhausted or a request failed.
    pub async fn next(&mut self) -> bool {
        self.current = None;
        if self.err.is_some() {
            return false;
        }

        loop {
            if let Some(document) = self.buffer.pop_front() {
                self.current = Some(document);
                return true;
            }

            let Some(url) = self.next_page.take() else {
                return false;
            };

            if let Err(e) = self.check_page(&url) {
                tracing::error!(
                    url = %url,
                    error = %e,
                    "Refusing to follow documents page link"
                );
                self.err = Some(e);
                return false;
            }

            match self.client.fetch_documents_page(&url).await {
                Ok((documents, next_page)) => {
                    self.buffer.extend(documents);
                    self.next_page = next_page;
                }
                Err(e) => {
                    self.err = Some(e);
                    return false;
                }
            }
        }
    }

    fn check_page(&mut self, url: &Url) -> Result<(), ClientError> {
        let same_origin = self
            .first_page
            .as_ref()
            .is_some_and(|first| first.origin() == url.origin());
        if !same_origin {
            return Err(ClientError::InvalidUrl(format!(
                "next page {} is not on the API origin",
                url
            )));
        }

        if !self.fetched.insert(url.clone()) {
            return Err(ClientError::Pagination(format!(
                "next page {} was already fetched",
                url
            )));
        }

        Ok(())
    }

    /// The document the iterator is positioned on.
    pub fn document(&self) -> Option<&Document> {
        self.current.as_ref()
    }

    /// The error that ended iteration, if any.
    pub fn err(&self) -> Option<&ClientError> {
        self.err.as_ref()
    }

    /// Adapt into a stream that yields the terminating error as its last item.
    pub fn into_stream(self) -> impl Stream<Item = Result<Document, ClientError>> {
        futures::stream::unfold(Some(self), |state| async move {
            let mut iter = state?;
            if iter.next().await {
                let document = iter.current.take()?;
                Some((Ok(document), Some(iter)))
            } else {
                iter.err.take().map(|e| (Err(e), None))
            }
        })
    }

    /// Drain every remaining document.
    pub async fn collect_all(self) -> Result<Vec<Document>, ClientError> {
        self.into_stream().try_collect().await
    }
}

/// Extract the `rel="next"` target from RFC 5988 `Link` headers, resolved
/// against the URL of the page that carried them.
pub(crate) fn next_page_link(base: &Url, headers: &HeaderMap) -> Option<Url> {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .find_map(|link| {
            let mut parts = link.split(';');
            let target = parts
                .next()?
                .trim()
                .strip_prefix('<')?
                .strip_suffix('>')?;

            let is_next = parts.any(|param| {
                let param = param.trim();
                param == "rel=\"next\"" || param == "rel=next"
            });

            if is_next {
                base.join(target).ok()
            } else {
                None
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(links: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for link in links {
            headers.append(LINK, link.parse().unwrap());
        }
        headers
    }

    #[test]
    fn test_next_link_absolute() {
        let base = Url::parse("https://api.onfido.com/v3/documents?applicant_id=a").unwrap();
        let headers = headers(&[
            "<https://api.onfido.com/v3/documents?page=3>; rel=\"last\", <https://api.onfido.com/v3/documents?page=2>; rel=\"next\"",
        ]);

        assert_eq!(
            next_page_link(&base, &headers).unwrap().as_str(),
            "https://api.onfido.com/v3/documents?page=2"
        );
    }

    #[test]
    fn test_next_link_relative_resolves_against_page() {
        let base = Url::parse("http://127.0.0.1:8080/documents?applicant_id=a").unwrap();
        let headers = headers(&["</documents?page=2>; rel=next"]);

        assert_eq!(
            next_page_link(&base, &headers).unwrap().as_str(),
            "http://127.0.0.1:8080/documents?page=2"
        );
    }

    #[test]
    fn test_no_next_link() {
        let base = Url::parse("https://api.onfido.com/v3/documents").unwrap();
        assert!(next_page_link(&base, &HeaderMap::new()).is_none());

        let headers = headers(&["<https://api.onfido.com/v3/documents?page=1>; rel=\"first\""]);
        assert!(next_page_link(&base, &headers).is_none());
    }
}
