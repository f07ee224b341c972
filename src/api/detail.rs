//! Icons8 icon detail lookup
//!
//! Resolves the SVG markup for an icon that was only loaded as a summary.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;
use thiserror::Error;

use super::http::{build_client, get_checked, FetchError};
use crate::config::ApiConfig;
use crate::icon::{Color, IconMeta, IconRecord, Svg, SvgError};

static FILL_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\s)fill\s*=\s*(?:"([^"]*)"|'([^']*)')"#).unwrap()
});

/// `fill:` declarations inside `style` attributes and `<style>` blocks
static FILL_STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([;"'{\s])fill\s*:\s*([^;"'}]*)"#).unwrap());

static SVG_OPEN_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<svg\b").unwrap());

/// Errors that can occur while resolving icon detail
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] FetchError),

    #[error("Icon API rejected the request: {0}")]
    Rejected(String),

    #[error("Icon API returned no SVG for icon {0}")]
    MissingSvg(String),

    #[error("Failed to decode SVG: {0}")]
    Decode(String),

    #[error("Invalid SVG: {0}")]
    InvalidSvg(#[from] SvgError),

    #[error("Failed to parse icon API response: {0}")]
    Parse(String),
}

/// Remote source of icon detail
pub trait IconApi {
    /// Fetch the SVG for `icon`, returning a detailed record with every other
    /// field unchanged
    fn get_icon_detail(&self, icon: &IconMeta, color: Option<&Color>) -> Result<IconRecord, ApiError>;
}

/// Complete `icon` with its SVG unless it already carries one
pub fn fetch_detail(
    api: &dyn IconApi,
    icon: IconRecord,
    color: Option<&Color>,
) -> Result<IconRecord, ApiError> {
    match icon {
        IconRecord::Detailed { .. } => Ok(icon),
        IconRecord::Summary(meta) => {
            log::debug!("Fetching SVG detail for icon {} ({})", meta.name, meta.id);
            api.get_icon_detail(&meta, color)
        }
    }
}

/// Recolor monochrome markup
///
/// Every explicit fill (attribute in either quote style, or CSS declaration)
/// except `none` is rewritten; markup without any fill gets one on the root
/// element.
pub fn apply_color(svg: &Svg, color: &Color) -> Result<Svg, SvgError> {
    let css = color.css();
    let markup = svg.as_str();

    let recolored = if FILL_ATTR.is_match(markup) || FILL_STYLE.is_match(markup) {
        let attrs = FILL_ATTR.replace_all(markup, |caps: &regex::Captures| {
            let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
            if is_none(value) {
                caps[0].to_string()
            } else {
                format!("{}fill=\"{}\"", &caps[1], css)
            }
        });
        FILL_STYLE
            .replace_all(&attrs, |caps: &regex::Captures| {
                if is_none(&caps[2]) {
                    caps[0].to_string()
                } else {
                    format!("{}fill:{}", &caps[1], css)
                }
            })
            .into_owned()
    } else {
        SVG_OPEN_TAG
            .replace(markup, format!("<svg fill=\"{}\"", css).as_str())
            .into_owned()
    };

    Svg::parse(recolored)
}

fn is_none(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("none")
}

#[derive(Debug, Deserialize)]
struct DetailResponse {
    success: Option<bool>,
    message: Option<String>,
    icon: Option<DetailIcon>,
}

#[derive(Debug, Deserialize)]
struct DetailIcon {
    svg: Option<String>,
}

/// Decode a detail response body into validated markup
fn parse_detail_response(icon_id: &str, body: &str) -> Result<Svg, ApiError> {
    let response: DetailResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;

    if response.success == Some(false) {
        return Err(ApiError::Rejected(
            response.message.unwrap_or_else(|| "unknown error".to_string()),
        ));
    }

    let encoded = response
        .icon
        .and_then(|icon| icon.svg)
        .filter(|svg| !svg.is_empty())
        .ok_or_else(|| ApiError::MissingSvg(icon_id.to_string()))?;

    let bytes = BASE64
        .decode(encoded.trim())
        .map_err(|e| ApiError::Decode(e.to_string()))?;
    let markup = String::from_utf8(bytes).map_err(|e| ApiError::Decode(e.to_string()))?;

    Ok(Svg::parse(markup)?)
}

/// Icons8 public API client
pub struct Icons8Client {
    client: reqwest::blocking::Client,
    detail_url: String,
    api_key: String,
}

impl Icons8Client {
    pub fn new(config: &ApiConfig, api_key: impl Into<String>) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(config)?,
            detail_url: config.detail_url.clone(),
            api_key: api_key.into(),
        })
    }

    fn detail_request_url(&self, icon_id: &str) -> String {
        let mut url = format!("{}?id={}", self.detail_url, urlencoding::encode(icon_id));
        if !self.api_key.is_empty() {
            url.push_str(&format!("&token={}", urlencoding::encode(&self.api_key)));
        }
        url
    }
}

impl IconApi for Icons8Client {
    fn get_icon_detail(&self, icon: &IconMeta, color: Option<&Color>) -> Result<IconRecord, ApiError> {
        log::info!("Querying Icons8 for icon detail: {}", icon.id);

        let body = get_checked(&self.client, &self.detail_request_url(&icon.id))?
            .text()
            .map_err(|e| FetchError::Body(e.to_string()))?;

        let mut svg = parse_detail_response(&icon.id, &body)?;
        if let Some(color) = color.filter(|_| !icon.is_color) {
            svg = apply_color(&svg, color)?;
        }

        Ok(IconRecord::Summary(icon.clone()).with_svg(svg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    const SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg"><rect fill="#000000" width="4" height="4"/><path fill="none" d="M0 0"/></svg>"##;

    fn meta() -> IconMeta {
        IconMeta {
            id: "123".to_string(),
            name: "react".to_string(),
            link: "https://icons8.com/icon/123/react".to_string(),
            url: "https://x/react.png".to_string(),
            download_name: Some("react-icon".to_string()),
            platform: None,
            is_color: false,
        }
    }

    struct CountingApi {
        calls: Cell<usize>,
    }

    impl IconApi for CountingApi {
        fn get_icon_detail(&self, icon: &IconMeta, _color: Option<&Color>) -> Result<IconRecord, ApiError> {
            self.calls.set(self.calls.get() + 1);
            Ok(IconRecord::Summary(icon.clone()).with_svg(Svg::parse(SQUARE)?))
        }
    }

    #[test]
    fn test_fetch_detail_skips_detailed_icons() {
        let api = CountingApi { calls: Cell::new(0) };
        let detailed = IconRecord::Summary(meta()).with_svg(Svg::parse("<svg/>").unwrap());

        let result = fetch_detail(&api, detailed.clone(), None).unwrap();
        assert_eq!(result, detailed);
        assert_eq!(api.calls.get(), 0);
    }

    #[test]
    fn test_fetch_detail_preserves_fields() {
        let api = CountingApi { calls: Cell::new(0) };
        let result = fetch_detail(&api, IconRecord::Summary(meta()), None).unwrap();
        assert_eq!(api.calls.get(), 1);
        assert_eq!(result.meta(), &meta());
        assert!(result.is_detailed());

        // Idempotent once resolved
        let again = fetch_detail(&api, result.clone(), None).unwrap();
        assert_eq!(again, result);
        assert_eq!(api.calls.get(), 1);
    }

    #[test]
    fn test_parse_detail_response() {
        let body = format!(r#"{{"success":true,"icon":{{"id":"123","svg":"{}"}}}}"#, BASE64.encode(SQUARE));
        let svg = parse_detail_response("123", &body).unwrap();
        assert_eq!(svg.as_str(), SQUARE);
    }

    #[test]
    fn test_parse_detail_response_errors() {
        assert!(matches!(
            parse_detail_response("1", r#"{"success":false,"message":"bad token"}"#),
            Err(ApiError::Rejected(msg)) if msg == "bad token"
        ));
        assert!(matches!(
            parse_detail_response("1", r#"{"success":true,"icon":{}}"#),
            Err(ApiError::MissingSvg(_))
        ));
        assert!(matches!(
            parse_detail_response("1", r#"{"success":true,"icon":{"svg":"not base64!"}}"#),
            Err(ApiError::Decode(_))
        ));
        let truncated = BASE64.encode("<svg><rect/>");
        assert!(matches!(
            parse_detail_response("1", &format!(r#"{{"icon":{{"svg":"{}"}}}}"#, truncated)),
            Err(ApiError::InvalidSvg(_))
        ));
        assert!(matches!(parse_detail_response("1", "<html>"), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_apply_color_rewrites_fills() {
        let svg = Svg::parse(SQUARE).unwrap();
        let colored = apply_color(&svg, &"#FF0000".parse().unwrap()).unwrap();
        assert!(colored.as_str().contains(r##"fill="#ff0000""##));
        assert!(colored.as_str().contains(r#"fill="none""#));
        assert!(!colored.as_str().contains("#000000"));
    }

    #[test]
    fn test_apply_color_rewrites_quoted_and_styled_fills() {
        let svg = Svg::parse(
            r#"<svg><path fill='#111111' d='M0 0'/><rect style="fill:#222222;stroke:none"/><circle fill='none'/><g style="fill: none"/></svg>"#,
        )
        .unwrap();
        let colored = apply_color(&svg, &"00ff00".parse().unwrap()).unwrap();
        let markup = colored.as_str();

        assert!(markup.contains(r##"<path fill="#00ff00" d='M0 0'/>"##));
        assert!(markup.contains(r##"style="fill:#00ff00;stroke:none""##));
        assert!(markup.contains("fill='none'"));
        assert!(markup.contains(r#"style="fill: none""#));
        assert!(!markup.contains("#111111"));
        assert!(!markup.contains("#222222"));
    }

    #[test]
    fn test_apply_color_ignores_other_fill_properties() {
        let svg = Svg::parse(r#"<svg fill-rule="evenodd"><path fill-opacity="0.5" d="M0 0"/></svg>"#).unwrap();
        let colored = apply_color(&svg, &"00ff00".parse().unwrap()).unwrap();
        assert!(colored.as_str().starts_with(r##"<svg fill="#00ff00" fill-rule="evenodd">"##));
        assert!(colored.as_str().contains(r#"fill-opacity="0.5""#));
    }

    #[test]
    fn test_apply_color_adds_root_fill() {
        let svg = Svg::parse(r#"<svg viewBox="0 0 1 1"><path d="M0 0"/></svg>"#).unwrap();
        let colored = apply_color(&svg, &"00ff00".parse().unwrap()).unwrap();
        assert!(colored.as_str().starts_with(r##"<svg fill="#00ff00" viewBox"##));
    }

    #[test]
    fn test_detail_request_url() {
        let client = Icons8Client::new(&ApiConfig::default(), "k y").unwrap();
        assert_eq!(
            client.detail_request_url("123"),
            "https://api-icons.icons8.com/publicApi/icons/icon?id=123&token=k%20y"
        );
        let anonymous = Icons8Client::new(&ApiConfig::default(), "").unwrap();
        assert!(!anonymous.detail_request_url("123").contains("token"));
    }
}
