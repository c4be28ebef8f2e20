use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use super::clean_text;

/// Marker Slack puts in the page when an upload was refused. The response
/// status is 200 either way.
pub const UPLOAD_ERROR_MARKER: &str = "alert_error";

static EMOJI_NAME_ATTR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"data-emoji-name="(.*?)""#)
        .expect("Invalid emoji name attribute regex")
});

static CRUMB_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"input[name="crumb"]"#)
        .expect("Invalid crumb selector")
});

static UPLOAD_ERROR_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p.alert_error")
        .expect("Invalid upload error selector")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadOutcome {
    Accepted,
    Rejected(String),
}

/// Every emoji name listed on the customize page.
pub fn extract_emoji_names(html: &str) -> Vec<String> {
    EMOJI_NAME_ATTR_REGEX
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Value of the one-time `crumb` form field.
pub fn extract_crumb(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    document
        .select(&CRUMB_SELECTOR)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
}

pub fn interpret_upload_response(html: &str) -> UploadOutcome {
    if !html.contains(UPLOAD_ERROR_MARKER) {
        return UploadOutcome::Accepted;
    }

    let document = Html::parse_document(html);
    let message = document
        .select(&UPLOAD_ERROR_SELECTOR)
        .next()
        .map(|alert| clean_text(&alert.text().collect::<String>()))
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| "unknown error".to_string());

    UploadOutcome::Rejected(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CUSTOMIZE_PAGE: &str = r#"
        <html><body>
          <form action="/customize/emoji" method="post">
            <input type="hidden" name="add" value="1">
            <input type="hidden" name="crumb" value="s-1234-abcd">
          </form>
          <table>
            <tr class="emoji_row"><td data-emoji-name="ok">:ok:</td></tr>
            <tr class="emoji_row"><td data-emoji-name="party-parrot">:party-parrot:</td></tr>
            <tr class="emoji_row"><td data-emoji-name="+1">:+1:</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn finds_every_emoji_name_attribute() {
        assert_eq!(
            extract_emoji_names(CUSTOMIZE_PAGE),
            vec!["ok", "party-parrot", "+1"]
        );
    }

    #[test]
    fn page_without_emoji_yields_nothing() {
        assert!(extract_emoji_names("<html><body></body></html>").is_empty());
    }

    #[test]
    fn finds_crumb_value() {
        assert_eq!(extract_crumb(CUSTOMIZE_PAGE), Some("s-1234-abcd".to_string()));
    }

    #[test]
    fn missing_crumb_is_none() {
        assert_eq!(extract_crumb("<form><input name=\"add\" value=\"1\"></form>"), None);
    }

    #[test]
    fn body_without_marker_is_accepted() {
        assert_eq!(
            interpret_upload_response(r#"<div class="alert_success">Emoji saved</div>"#),
            UploadOutcome::Accepted
        );
    }

    #[test]
    fn marker_yields_alert_text() {
        let html = r#"<div><p class="alert alert_error">
            <i class="ts_icon"></i>There&#39;s already an emoji   named :cool:.
        </p></div>"#;
        assert_eq!(
            interpret_upload_response(html),
            UploadOutcome::Rejected("There's already an emoji named :cool:.".to_string())
        );
    }

    #[test]
    fn marker_without_alert_paragraph_is_still_rejected() {
        let html = r#"<script>var cls = "alert_error";</script>"#;
        assert_eq!(
            interpret_upload_response(html),
            UploadOutcome::Rejected("unknown error".to_string())
        );
    }
}
