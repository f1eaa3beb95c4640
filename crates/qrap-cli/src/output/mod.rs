use serde::Serialize;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use qrap_core::pagination::{Page, Pagination};
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        value: u32,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert_eq!(parsed["value"], 7);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "x", value: 7 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "x");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn page_envelope_keeps_total_count() {
        let page = Page::new(vec![1, 2], 7, Pagination::new(0, 2));
        let out = render(&page, OutputFormat::Raw).expect("raw render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["total_count"], 7);
        assert_eq!(parsed["items"].as_array().map(Vec::len), Some(2));
    }
}
