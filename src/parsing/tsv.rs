use std::path::Path;

/// One data line of a delimited file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row<'a> {
    /// 1-based line number in the source text
    pub line: usize,
    pub fields: Vec<&'a str>,
}

impl<'a> Row<'a> {
    /// Trimmed field `i`, or "" past the end of the row
    #[must_use]
    pub fn field(&self, i: usize) -> &'a str {
        self.fields.get(i).copied().unwrap_or_default()
    }

    /// Trimmed field `i` if present and non-empty
    #[must_use]
    pub fn optional(&self, i: usize) -> Option<&'a str> {
        Some(self.field(i)).filter(|f| !f.is_empty())
    }
}

/// Pick the delimiter from the file extension: comma for `.csv`, tab otherwise
#[must_use]
pub fn delimiter_for(path: &Path) -> char {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .as_deref()
    {
        Some("csv") => ',',
        _ => '\t',
    }
}

/// Split delimited text into rows
///
/// Blank lines and lines starting with `#` are skipped. The first remaining
/// line is treated as a header, and dropped, if its first field matches one
/// of `header_keys` (case-insensitive).
#[must_use]
pub fn rows<'a>(text: &'a str, delimiter: char, header_keys: &[&str]) -> Vec<Row<'a>> {
    let mut out = Vec::new();
    let mut first_data_line = true;

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();

        if first_data_line {
            first_data_line = false;
            let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            if header_keys.contains(&first.as_str()) {
                continue;
            }
        }

        out.push(Row {
            line: i + 1,
            fields,
        });
    }

    out
}
