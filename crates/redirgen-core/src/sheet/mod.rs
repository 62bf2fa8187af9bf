//! Source loader: fetch redirect rows from a public Google Sheet.
//!
//! Uses the curl crate (libcurl) for a single blocking GET of the sheet's gviz
//! JSON endpoint, then parses the wrapped payload into rows. No retries.

mod parse;

use std::time::Duration;
use url::Url;

use crate::config::{Identifiers, SourceSettings};
use crate::error::SourceFetchError;
use crate::row::RedirectRow;

/// Anything that can produce the ordered rows of a redirect sheet.
pub trait RowSource {
    fn fetch_rows(&self) -> Result<Vec<RedirectRow>, SourceFetchError>;
}

/// Build `{base}/spreadsheets/d/{document}/gviz/tq?tqx=out:json&gid={sheet}`.
pub fn gviz_url(base_url: &str, ids: &Identifiers) -> Result<Url, SourceFetchError> {
    let mut url = Url::parse(base_url)?;
    url.path_segments_mut()
        .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
        .pop_if_empty()
        .extend(["spreadsheets", "d", ids.document_id.as_str(), "gviz", "tq"]);
    url.query_pairs_mut()
        .append_pair("tqx", "out:json")
        .append_pair("gid", &ids.sheet_id);
    Ok(url)
}

/// A sheet reached over HTTP.
#[derive(Debug, Clone)]
pub struct SheetSource {
    url: Url,
    connect_timeout: Duration,
    timeout: Duration,
}

impl SheetSource {
    pub fn new(ids: &Identifiers, settings: &SourceSettings) -> Result<Self, SourceFetchError> {
        Ok(Self {
            url: gviz_url(&settings.base_url, ids)?,
            connect_timeout: Duration::from_secs(settings.connect_timeout_secs),
            timeout: Duration::from_secs(settings.timeout_secs),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// GET the gviz endpoint and return the raw body.
    fn download(&self) -> Result<String, SourceFetchError> {
        let mut body: Vec<u8> = Vec::new();

        let mut easy = curl::easy::Easy::new();
        easy.url(self.url.as_str())?;
        easy.follow_location(true)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(SourceFetchError::Http(code));
        }

        String::from_utf8(body).map_err(|_| SourceFetchError::NotUtf8)
    }
}

impl RowSource for SheetSource {
    fn fetch_rows(&self) -> Result<Vec<RedirectRow>, SourceFetchError> {
        tracing::debug!(url = %self.url, "fetching sheet");
        let body = self.download()?;
        let rows = parse::parse_rows(&body)?;
        tracing::debug!(rows = rows.len(), "sheet parsed");
        Ok(rows)
    }
}
