use crate::device::DeviceContact;
use std::borrow::Cow;

#[derive(Debug, Clone, Default)]
pub struct ParsedVcf {
    pub records: Vec<DeviceContact>,
    pub warnings: Vec<String>,
}

/// Reads vCard 2.1/3.0/4.0 text into device contact records.
///
/// Only the display name and telephone numbers are kept. Cards without any
/// `TEL` still produce a record so the caller can account for them.
pub fn parse_vcf(data: &str) -> ParsedVcf {
    let mut parsed = ParsedVcf::default();
    let mut current: Option<RawCard> = None;

    for line in unfold_lines(data) {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("BEGIN:VCARD") {
            if current.is_some() {
                parsed
                    .warnings
                    .push("nested BEGIN:VCARD encountered".to_string());
            }
            current = Some(RawCard::default());
            continue;
        }

        if trimmed.eq_ignore_ascii_case("END:VCARD") {
            match current.take() {
                Some(card) => parsed.records.push(card.into_record()),
                None => parsed
                    .warnings
                    .push("END:VCARD without matching BEGIN:VCARD".to_string()),
            }
            continue;
        }

        let Some(card) = current.as_mut() else {
            continue;
        };
        let Some((key, raw_value)) = split_property(trimmed) else {
            continue;
        };

        match key.as_str() {
            "FN" => {
                let value = unescape_vcard_value(raw_value);
                if card.formatted_name.is_none() && !value.trim().is_empty() {
                    card.formatted_name = Some(value.trim().to_string());
                }
            }
            "N" => {
                if card.structured_name.is_none() {
                    card.structured_name = structured_name(raw_value);
                }
            }
            "TEL" => {
                let value = unescape_vcard_value(raw_value);
                let value = strip_tel_uri(value.trim());
                if !value.is_empty() {
                    card.tels.push(value.to_string());
                }
            }
            _ => {}
        }
    }

    if let Some(card) = current.take() {
        parsed
            .warnings
            .push("missing END:VCARD at end of file".to_string());
        parsed.records.push(card.into_record());
    }

    parsed
}

#[derive(Default)]
struct RawCard {
    formatted_name: Option<String>,
    structured_name: Option<String>,
    tels: Vec<String>,
}

impl RawCard {
    fn into_record(self) -> DeviceContact {
        let name = self.formatted_name.or(self.structured_name);
        DeviceContact {
            name: name.into_iter().collect(),
            tel: self.tels,
        }
    }
}

/// `N:Family;Given;Additional;Prefix;Suffix` rendered as "Given Family".
fn structured_name(raw: &str) -> Option<String> {
    let parts: Vec<String> = split_unescaped(raw, ';')
        .iter()
        .map(|part| unescape_vcard_value(part).trim().to_string())
        .collect();
    let family = parts.first().map(String::as_str).unwrap_or("");
    let given = parts.get(1).map(String::as_str).unwrap_or("");
    let joined = [given, family]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn strip_tel_uri(value: &str) -> &str {
    match value.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("tel:") => value[4..].trim(),
        _ => value,
    }
}

fn unfold_lines(input: &str) -> Vec<String> {
    let input = normalize_line_endings(input);
    let mut lines: Vec<String> = Vec::new();
    for line in input.lines() {
        if let Some(rest) = line.strip_prefix([' ', '\t']) {
            match lines.last_mut() {
                Some(last) => last.push_str(rest),
                None => lines.push(rest.to_string()),
            }
        } else {
            lines.push(line.to_string());
        }
    }
    lines
}

fn normalize_line_endings(input: &str) -> Cow<'_, str> {
    if !input.contains('\r') {
        return Cow::Borrowed(input);
    }
    Cow::Owned(input.replace("\r\n", "\n").replace('\r', "\n"))
}

fn split_property(line: &str) -> Option<(String, &str)> {
    let (left, value) = line.split_once(':')?;
    let mut name = left.split(';').next()?.trim();
    if let Some((_, grouped)) = name.rsplit_once('.') {
        name = grouped;
    }
    if name.is_empty() {
        return None;
    }
    Some((name.to_ascii_uppercase(), value))
}

fn split_unescaped(value: &str, separator: char) -> Vec<String> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut escape = false;

    for ch in value.chars() {
        if escape {
            current.push(ch);
            escape = false;
            continue;
        }
        if ch == '\\' {
            current.push(ch);
            escape = true;
            continue;
        }
        if ch == separator {
            items.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    items.push(current);
    items
}

fn unescape_vcard_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') | Some('N') => out.push('\n'),
            Some(other) => out.push(other),
            None => break,
        }
    }
    out
}
