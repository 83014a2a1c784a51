//! Standalone HTML document shell.
//!
//! The converter only produces body fragments. This wraps them between a
//! prologue (doctype, head, title, optional stylesheet, `<body>`) and an
//! epilogue (`</body></html>`).

use std::io::{self, Write};

/// Built-in stylesheet embedded by default.
pub const STYLESHEET: &str = "\
        body {
            font-family: system-ui, -apple-system, sans-serif;
            max-width: 800px;
            margin: 0 auto;
            padding: 20px;
            line-height: 1.6;
        }
        pre {
            background-color: #f5f5f5;
            padding: 1rem;
            border-radius: 4px;
            overflow: auto;
        }
        code {
            font-family: 'SF Mono', Consolas, monospace;
            background-color: #f5f5f5;
            padding: 0.2rem 0.4rem;
            border-radius: 3px;
        }
";

/// Document shell options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOptions {
    /// Text of the `<title>` element.
    pub title: String,
    /// Value of the `lang` attribute on `<html>`.
    pub lang: String,
    /// Embed [`STYLESHEET`] in the head.
    pub stylesheet: bool,
}

impl DocumentOptions {
    /// Default shell with the given title.
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            lang: "en".to_owned(),
            stylesheet: true,
        }
    }
}

/// Write everything up to and including `<body>\n`.
pub fn write_prologue<W: Write + ?Sized>(out: &mut W, options: &DocumentOptions) -> io::Result<()> {
    out.write_all(b"<!DOCTYPE html>\n")?;
    writeln!(
        out,
        "<html lang=\"{}\">",
        html_escape::encode_double_quoted_attribute(&options.lang)
    )?;
    out.write_all(b"<head>\n")?;
    out.write_all(b"    <meta charset=\"UTF-8\">\n")?;
    out.write_all(
        b"    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    )?;
    writeln!(
        out,
        "    <title>{}</title>",
        html_escape::encode_text(&options.title)
    )?;
    if options.stylesheet {
        out.write_all(b"    <style>\n")?;
        out.write_all(STYLESHEET.as_bytes())?;
        out.write_all(b"    </style>\n")?;
    }
    out.write_all(b"</head>\n<body>\n")
}

/// Write the closing `</body>` and `</html>` tags.
pub fn write_epilogue<W: Write + ?Sized>(out: &mut W) -> io::Result<()> {
    out.write_all(b"</body>\n</html>\n")
}
