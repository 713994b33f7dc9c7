//! # Utility Functions Module
//!
//! Small helpers for building external command lines.

/// Build a `Vec<String>` of command arguments from heterogeneous expressions.
///
/// ```rust
/// use pdf_compressor::args;
///
/// let settings = "/ebook";
/// let argv = args!["-dNOPAUSE", format!("-dPDFSETTINGS={}", settings)];
/// assert_eq!(argv, vec!["-dNOPAUSE", "-dPDFSETTINGS=/ebook"]);
/// ```
#[macro_export]
macro_rules! args {
    [$($item:expr),* $(,)?] => {
        vec![$(::std::string::ToString::to_string(&$item)),*]
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_args_macro_empty() {
        let result: Vec<String> = args![];
        assert!(result.is_empty());
    }

    #[test]
    fn test_args_macro_mixed_types() {
        let level = 1.4;
        let result = args!["-dBATCH", format!("-dCompatibilityLevel={}", level), 3];
        assert_eq!(result, vec!["-dBATCH", "-dCompatibilityLevel=1.4", "3"]);
    }
}
