use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Display width of `text` in terminal-style cells (CJK counts double).
pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Shorten `text` to at most `max` display cells, appending an ellipsis
/// when anything was cut. Splits on character boundaries, never mid-cell.
pub fn truncate_display(text: &str, max: usize) -> String {
    if display_width(text) <= max {
        return text.to_string();
    }

    let limit = max.saturating_sub(3);
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > limit {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_width() {
        assert_eq!(display_width("CustomerId"), 10);
    }

    #[test]
    fn test_unicode_width() {
        // 全角文字は幅2
        assert_eq!(display_width("ユーザー"), 8);
    }

    #[test]
    fn test_short_text_untouched() {
        assert_eq!(truncate_display("OrderId", 20), "OrderId");
    }

    #[test]
    fn test_long_text_truncated() {
        let name = "AVeryLongColumnNameIndeed";
        let out = truncate_display(name, 20);
        assert_eq!(out, "AVeryLongColumnNa...");
        assert_eq!(display_width(&out), 20);
    }

    #[test]
    fn test_wide_chars_truncated_on_cell_boundary() {
        let out = truncate_display("顧客マスターテーブル名称", 20);
        assert!(display_width(&out) <= 20);
        assert!(out.ends_with("..."));
    }
}
