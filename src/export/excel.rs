//! Excel (xlsx) serialization
//!
//! Builds the OOXML container directly with zip + hand-written XML parts:
//! one workbook, one sheet, inline strings for text cells and native
//! numeric/boolean cells for typed values.

use std::io::{Cursor, Write};

use chrono::Utc;
use zip::write::FileOptions;
use zip::ZipWriter;

use crate::error::Result;
use crate::model::{CellValue, Table};

use super::Exporter;

/// Serializes a table as a single-sheet xlsx workbook
pub struct ExcelExporter;

impl Exporter for ExcelExporter {
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        // ZipWriter needs Seek, so assemble in memory first
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut cursor);
            let options = FileOptions::default();

            zip.start_file("[Content_Types].xml", options)?;
            zip.write_all(content_types_xml().as_bytes())?;

            zip.start_file("_rels/.rels", options)?;
            zip.write_all(root_rels_xml().as_bytes())?;

            zip.start_file("xl/workbook.xml", options)?;
            zip.write_all(workbook_xml().as_bytes())?;

            zip.start_file("xl/_rels/workbook.xml.rels", options)?;
            zip.write_all(workbook_rels_xml().as_bytes())?;

            zip.start_file("xl/worksheets/sheet1.xml", options)?;
            zip.write_all(sheet_xml(table).as_bytes())?;

            zip.start_file("docProps/core.xml", options)?;
            zip.write_all(core_props_xml().as_bytes())?;

            zip.start_file("docProps/app.xml", options)?;
            zip.write_all(app_props_xml().as_bytes())?;

            zip.finish()?;
        }

        writer.write_all(cursor.get_ref())?;
        Ok(())
    }
}

fn content_types_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#,
        r#"<Default Extension="xml" ContentType="application/xml"/>"#,
        r#"<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>"#,
        r#"<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
        r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#,
        r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#,
        r#"</Types>"#
    )
    .to_string()
}

fn root_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>"#,
        r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
        r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#,
        r#"</Relationships>"#
    )
    .to_string()
}

fn workbook_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        r#"<sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets>"#,
        r#"</workbook>"#
    )
    .to_string()
}

fn workbook_rels_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
        r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>"#,
        r#"</Relationships>"#
    )
    .to_string()
}

fn sheet_xml(table: &Table) -> String {
    let mut rows_xml = String::new();

    if table.column_count() > 0 {
        // Header row
        rows_xml.push_str(r#"<row r="1">"#);
        for (col_idx, column) in table.columns.iter().enumerate() {
            rows_xml.push_str(&inline_str_cell(col_idx, 1, &column.name));
        }
        rows_xml.push_str("</row>");

        // Data rows
        for (row_idx, row) in table.rows.iter().enumerate() {
            let r = row_idx + 2;
            rows_xml.push_str(&format!(r#"<row r="{}">"#, r));
            for (col_idx, cell) in row.cells.iter().enumerate() {
                rows_xml.push_str(&cell_xml(col_idx, r, cell));
            }
            rows_xml.push_str("</row>");
        }
    }

    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
            r#"<sheetData>{}</sheetData>"#,
            r#"</worksheet>"#
        ),
        rows_xml
    )
}

fn cell_xml(col_idx: usize, row: usize, cell: &CellValue) -> String {
    let cell_ref = format!("{}{}", column_letter(col_idx), row);
    match cell {
        CellValue::Null => String::new(),
        CellValue::Int(i) => format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, i),
        CellValue::Float(f) => format!(r#"<c r="{}"><v>{}</v></c>"#, cell_ref, f),
        CellValue::Bool(b) => format!(
            r#"<c r="{}" t="b"><v>{}</v></c>"#,
            cell_ref,
            if *b { 1 } else { 0 }
        ),
        CellValue::String(_) | CellValue::Date(_) | CellValue::DateTime(_) => {
            let text = cell.display().into_owned();
            format!(
                r#"<c r="{}" t="inlineStr"><is><t>{}</t></is></c>"#,
                cell_ref,
                escape_xml(&text)
            )
        }
    }
}

fn inline_str_cell(col_idx: usize, row: usize, text: &str) -> String {
    format!(
        r#"<c r="{}{}" t="inlineStr"><is><t>{}</t></is></c>"#,
        column_letter(col_idx),
        row,
        escape_xml(text)
    )
}

/// 0-based column index to spreadsheet letters (0 -> A, 26 -> AA)
fn column_letter(mut idx: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    letters.reverse();
    String::from_utf8(letters).unwrap_or_default()
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

fn core_props_xml() -> String {
    // The timestamp here is why xlsx bytes are not reproducible run to run
    let created = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    format!(
        concat!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
            r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
            r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
            r#"<dc:creator>datatidy</dc:creator>"#,
            r#"<dcterms:created xsi:type="dcterms:W3CDTF">{}</dcterms:created>"#,
            r#"</cp:coreProperties>"#
        ),
        created
    )
}

fn app_props_xml() -> String {
    concat!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#,
        r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties">"#,
        r#"<Application>datatidy</Application>"#,
        r#"</Properties>"#
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_letter() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(27), "AB");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a<b&c>\"d\""), "a&lt;b&amp;c&gt;&quot;d&quot;");
    }

    #[test]
    fn test_sheet_xml_zero_column_table() {
        let table = Table::new(vec![]);
        let xml = sheet_xml(&table);
        assert!(xml.contains("<sheetData></sheetData>"));
    }
}
