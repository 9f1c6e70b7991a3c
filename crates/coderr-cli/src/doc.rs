//! Markdown reference of error codes.

use std::fmt::Write;

use coderr_core::Catalog;

const HEADER: &str = "\
# Error codes

This file is generated by `coderr doc`. Do not edit it by hand.

## Response format

A failed API call returns the error code and its message:

```json
{
  \"code\": 100101,
  \"message\": \"Database error\"
}
```

Every code also maps to an HTTP status, listed below.

## Codes

| Identifier | Code | HTTP Code | Description |
| ---------- | ---- | --------- | ----------- |
";

/// Render the reference table for `catalog`, sorted by code.
pub fn render_markdown(catalog: &Catalog) -> String {
    let mut out = String::from(HEADER);
    for entry in catalog.sorted() {
        let coder = entry.to_coder();
        let _ = write!(
            out,
            "| {} | {} | {} | {}",
            entry.name,
            coder.code(),
            coder.http_status(),
            escape(coder.message())
        );
        if !coder.reference().is_empty() {
            let _ = write!(out, " ([ref]({}))", coder.reference());
        }
        let _ = writeln!(out, " |");
    }
    out
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|")
}
