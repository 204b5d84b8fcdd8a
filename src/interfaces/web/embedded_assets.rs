use axum::{
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
};
use rust_embed::Embed;

/// WebUIの静的アセットを埋め込む
#[derive(Embed)]
#[folder = "web/"]
#[include = "*"]
#[include = "**/*"]
pub struct WebAssets;

const LOGIN_PAGE: &str = "login.html";
const DASHBOARD_PAGE: &str = "dashboard.html";

/// 埋め込まれた静的ファイルを提供するハンドラ
pub async fn static_handler(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    match WebAssets::get(path) {
        Some(content) if !path.ends_with(".html") => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [(header::CONTENT_TYPE, mime.as_ref().to_string())],
                content.data.into_owned(),
            )
                .into_response()
        }
        _ => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
    }
}

/// ログインページ（エラーメッセージ付き）
pub fn render_login(error: Option<&str>) -> Html<String> {
    let error_html = error
        .map(|message| format!(r#"<p class="error">{}</p>"#, escape_html(message)))
        .unwrap_or_default();
    Html(page(LOGIN_PAGE).replace("{{error}}", &error_html))
}

/// ダッシュボードページ（初期状態のJSONを埋め込む）
pub fn render_dashboard(initial_state: &str, device_endpoint: &str) -> Html<String> {
    // scriptタグ内で閉じタグとして解釈されないようにする
    let initial_state = initial_state.replace("</", "<\\/");
    Html(
        page(DASHBOARD_PAGE)
            .replace("{{device_endpoint}}", &escape_html(device_endpoint))
            .replace("{{initial_state}}", &initial_state),
    )
}

fn page(name: &str) -> String {
    WebAssets::get(name)
        .map(|content| String::from_utf8_lossy(&content.data).into_owned())
        .unwrap_or_default()
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_assets_available() {
        assert!(WebAssets::get("login.html").is_some());
        assert!(WebAssets::get("dashboard.html").is_some());
        assert!(WebAssets::get("css/style.css").is_some());
        assert!(WebAssets::get("js/dashboard.js").is_some());
    }

    #[test]
    fn test_login_page_shows_escaped_error() {
        let Html(body) = render_login(Some("<bad>"));
        assert!(body.contains("&lt;bad&gt;"));
        assert!(!body.contains("{{error}}"));

        let Html(body) = render_login(None);
        assert!(!body.contains("class=\"error\""));
    }

    #[test]
    fn test_dashboard_embeds_state() {
        let Html(body) = render_dashboard(r#"{"relay_status":"ON","note":"</script>"}"#, "http://10.0.0.2");
        assert!(body.contains(r#""relay_status":"ON""#));
        assert!(body.contains(r"<\/script>"));
        assert!(body.contains("http://10.0.0.2"));
    }
}
