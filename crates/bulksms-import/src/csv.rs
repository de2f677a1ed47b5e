use crate::error::{ImportError, Result};

/// Splits delimited text into rows of cells.
///
/// Quoted fields may contain delimiters, doubled quotes and line breaks.
/// Lines holding nothing at all are dropped.
pub fn parse_delimited(data: &str, delimiter: char) -> Result<Vec<Vec<String>>> {
    let data = data.strip_prefix('\u{feff}').unwrap_or(data);
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut line = 1usize;
    let mut chars = data.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
            }
            '\r' | '\n' => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                line += 1;
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
                field_started = false;
            }
            _ if ch == delimiter => {
                row.push(std::mem::take(&mut field));
                field_started = false;
            }
            _ => {
                field.push(ch);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(ImportError::Parse(format!(
            "unterminated quoted field at line {line}"
        )));
    }

    if field_started || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }

    Ok(rows)
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.len() == 1 && row[0].is_empty() {
        return;
    }
    rows.push(row);
}

pub fn write_delimited<I, R, S>(rows: I, delimiter: char) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for row in rows {
        let mut first = true;
        for cell in row {
            if !first {
                out.push(delimiter);
            }
            first = false;
            push_field(&mut out, cell.as_ref(), delimiter);
        }
        out.push_str("\r\n");
    }
    out
}

fn push_field(out: &mut String, value: &str, delimiter: char) {
    let needs_quotes = value
        .chars()
        .any(|ch| ch == delimiter || matches!(ch, '"' | '\r' | '\n'))
        || value.starts_with(' ')
        || value.ends_with(' ');
    if !needs_quotes {
        out.push_str(value);
        return;
    }
    out.push('"');
    for ch in value.chars() {
        if ch == '"' {
            out.push('"');
        }
        out.push(ch);
    }
    out.push('"');
}
