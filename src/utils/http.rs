use reqwest::header::{HeaderMap, HeaderValue, COOKIE};
use reqwest::{redirect, Client, ClientBuilder};
use tracing::warn;

use crate::error::{Result, SlackmojiError};

const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/108.0.0.0 Safari/537.36";

/// Client that sends `cookie` with every request and never follows redirects.
pub fn create_client(cookie: &str) -> Result<Client> {
    let mut cookie_value =
        HeaderValue::from_str(cookie).map_err(|_| SlackmojiError::InvalidCookie)?;
    cookie_value.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, cookie_value);

    let client = ClientBuilder::new()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .redirect(redirect::Policy::none())
        .build()?;

    Ok(client)
}

/// GET `url` once and return the body. Anything but 2xx is an error.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client.get(url).send().await?;
    let status = response.status();

    if !status.is_success() {
        warn!("HTTP error {}: {}", status, url);
        return Err(SlackmojiError::HttpStatus {
            status,
            url: url.to_string(),
        });
    }

    Ok(response.text().await?)
}
