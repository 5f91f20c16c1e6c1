//! Shared HTML chrome and escaping for site pages.

use std::fmt::Write;

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

pub fn yes_no(b: bool) -> &'static str {
    if b {
        "YES"
    } else {
        "NO"
    }
}

/// Wrap `body` in the shared page chrome. `depth` is the directory depth
/// below the site root, used to prefix asset and nav links.
pub fn page(title: &str, subtitle: &str, depth: usize, body: &str) -> String {
    let prefix = "../".repeat(depth);
    let mut out = String::new();

    write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{}</title>\n<link rel=\"stylesheet\" href=\"{}css/style.css\">\n</head>\n<body>\n",
        escape(title),
        prefix
    )
    .unwrap();
    write!(
        out,
        "<header><div class=\"container\"><h1>{}</h1><p>{}</p></div></header>\n",
        escape(title),
        escape(subtitle)
    )
    .unwrap();
    write!(
        out,
        "<div class=\"container\">\n<nav>\
         <a href=\"{p}index.html\">Overview</a>\
         <a href=\"{p}diagram.html\">ER Diagram</a>\
         <a href=\"{p}statistics.html\">Statistics</a>\
         </nav>\n",
        p = prefix
    )
    .unwrap();
    out.push_str(body);
    out.push_str("\n</div>\n</body>\n</html>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"'"), "a&lt;b&gt;&amp;&quot;&#39;");
    }

    #[test]
    fn test_page_prefixes_links_by_depth() {
        let root = page("t", "s", 0, "");
        assert!(root.contains("href=\"css/style.css\""));

        let nested = page("t", "s", 1, "");
        assert!(nested.contains("href=\"../css/style.css\""));
        assert!(nested.contains("href=\"../index.html\""));
    }

    #[test]
    fn test_page_escapes_title() {
        let out = page("a<b", "", 0, "");
        assert!(out.contains("<title>a&lt;b</title>"));
    }
}
