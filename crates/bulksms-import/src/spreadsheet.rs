use crate::error::Result;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// Rows of the first worksheet with every cell rendered as text.
///
/// Rows whose cells are all blank are dropped. A workbook without sheets
/// yields no rows.
pub fn read_first_sheet(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match workbook.worksheet_range_at(0) {
        Some(range) => range?,
        None => return Ok(Vec::new()),
    };

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_text).collect::<Vec<_>>())
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect())
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => value.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::cell_text;
    use calamine::Data;

    #[test]
    fn numeric_phones_render_without_fraction() {
        assert_eq!(cell_text(&Data::Float(712345678.0)), "712345678");
        assert_eq!(cell_text(&Data::Int(256712345678)), "256712345678");
        assert_eq!(cell_text(&Data::String("0712 345 678".into())), "0712 345 678");
        assert_eq!(cell_text(&Data::Empty), "");
    }
}
