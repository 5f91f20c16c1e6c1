//! File-name conventions shared by diagram links and site pages.

/// Characters that cannot appear in file names on common filesystems.
fn is_invalid(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

/// Replace filesystem-invalid characters with underscores.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if is_invalid(c) { '_' } else { c })
        .collect()
}

/// Page file name for a `(schema, name)` pair, e.g. `sales_Order.html`.
/// The diagram's clickable regions and the site assembler must agree on
/// this, so both call here.
pub fn table_page(schema: &str, name: &str) -> String {
    format!(
        "{}_{}.html",
        sanitize_file_name(schema),
        sanitize_file_name(name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_names_pass_through() {
        assert_eq!(sanitize_file_name("Customer"), "Customer");
    }

    #[test]
    fn test_invalid_chars_become_underscores() {
        assert_eq!(sanitize_file_name("a/b\\c:d*e"), "a_b_c_d_e");
        assert_eq!(sanitize_file_name("what?\"<>|"), "what_____");
    }

    #[test]
    fn test_table_page_name() {
        assert_eq!(table_page("sales", "Order"), "sales_Order.html");
        assert_eq!(table_page("dbo", "a/b"), "dbo_a_b.html");
    }
}
