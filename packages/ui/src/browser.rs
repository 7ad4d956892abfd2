//! Browser bridges (clipboard, downloads, file picking, page location) and
//! the async sleep used for timed dismissals.
//!
//! Browser-only actions go through `document::eval` with a `dioxus.send`
//! reply; native builds fall back to reasonable defaults.

use std::time::Duration;

use dioxus::prelude::*;

/// Quote a string as a JavaScript string literal.
pub(crate) fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Wall-clock `HH:MM:SS` for activity entries.
#[cfg(target_arch = "wasm32")]
pub fn clock_time() -> String {
    let date = js_sys::Date::new_0();
    let h = date.get_hours();
    let m = date.get_minutes();
    let s = date.get_seconds();
    format!("{h:02}:{m:02}:{s:02}")
}

#[cfg(not(target_arch = "wasm32"))]
pub fn clock_time() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Hostname the page was served from.
#[cfg(target_arch = "wasm32")]
pub fn page_host() -> Option<String> {
    web_sys::window()?.location().hostname().ok()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_host() -> Option<String> {
    None
}

/// Origin used in share links.
#[cfg(target_arch = "wasm32")]
pub fn page_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_default()
}

#[cfg(not(target_arch = "wasm32"))]
pub fn page_origin() -> String {
    "http://localhost:8080".to_string()
}

/// `<origin>?recipe=<id>`
pub fn share_link(origin: &str, recipe_id: &str) -> String {
    format!("{origin}?recipe={recipe_id}")
}

/// Copy text to the clipboard. Resolves to whether the browser accepted it.
pub async fn copy_to_clipboard(text: &str) -> bool {
    let js = format!(
        r#"(function() {{
            if (!navigator.clipboard) {{ dioxus.send(false); return; }}
            navigator.clipboard.writeText({text_js}).then(
                function() {{ dioxus.send(true); }},
                function() {{ dioxus.send(false); }}
            );
        }})();"#,
        text_js = js_string_escape(text),
    );
    let mut eval = document::eval(&js);
    eval.recv::<bool>().await.unwrap_or(false)
}

/// Offer `contents` as a JSON file download.
pub fn download_json(filename: &str, contents: &str) {
    let js = format!(
        r#"(function() {{
            var blob = new Blob([{contents_js}], {{ type: 'application/json' }});
            var url = URL.createObjectURL(blob);
            var a = document.createElement('a');
            a.href = url;
            a.download = {name_js};
            document.body.appendChild(a);
            a.click();
            document.body.removeChild(a);
            URL.revokeObjectURL(url);
        }})();"#,
        contents_js = js_string_escape(contents),
        name_js = js_string_escape(filename),
    );
    document::eval(&js);
}

/// Open the file input with the given element id and read the chosen file as
/// text. `None` when nothing was chosen or reading failed.
pub async fn read_picked_file(input_id: &str) -> Option<String> {
    let js = format!(
        r#"(function() {{
            var input = document.getElementById({id_js});
            if (!input) {{ dioxus.send(null); return; }}
            input.value = '';
            input.onchange = function() {{
                var file = input.files && input.files[0];
                if (!file) {{ dioxus.send(null); return; }}
                file.text().then(
                    function(text) {{ dioxus.send(text); }},
                    function() {{ dioxus.send(null); }}
                );
            }};
            input.click();
        }})();"#,
        id_js = js_string_escape(input_id),
    );
    let mut eval = document::eval(&js);
    eval.recv::<Option<String>>().await.ok().flatten()
}

/// Render Markdown (brewing notes) to HTML. Raw HTML in the source is
/// escaped, never passed through.
pub fn markdown_to_html(markdown: &str) -> String {
    use pulldown_cmark::{html, Event, Options, Parser};

    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        });
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escape() {
        assert_eq!(js_string_escape("a\"b\\c\n"), r#""a\"b\\c\n""#);
        assert_eq!(js_string_escape("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_share_link() {
        assert_eq!(
            share_link("https://recipes.example", "r42"),
            "https://recipes.example?recipe=r42"
        );
    }

    #[test]
    fn test_markdown_to_html() {
        let html = markdown_to_html("**Bloom** 30s");
        assert!(html.contains("<strong>Bloom</strong>"));
        let html = markdown_to_html("<script>alert(1)</script>");
        assert!(!html.contains("<script>"));
    }
}
