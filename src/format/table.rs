//! Table styling pass

use super::config::StyleGuide;
use super::text::{is_numeric_only, sentence_case};
use crate::document::{ParagraphAlignment, Run, Shading, Table, VerticalAlignment};

/// Style every cell of `table`; returns the number of cells touched.
///
/// Row 0 is the header row: bold, centered and shaded unless blank. Other rows center
/// numbers, dates and times and left-align everything else.
pub fn style_table(table: &mut Table, guide: &StyleGuide) -> usize {
    let mut cells = 0;

    for (row_index, row) in table.rows_mut().enumerate() {
        let header = row_index == 0;

        for cell in row.cells_mut() {
            cells += 1;
            cell.set_vertical_alignment(VerticalAlignment::Center);
            let mut shade = false;

            for paragraph in cell.paragraphs_mut() {
                let text = paragraph.text();
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }

                let mut run = Run::from_text(&sentence_case(text));
                run.set_font_size_pt(guide.font_size_pt);
                let alignment = if header {
                    run.set_bold(true);
                    shade = true;
                    ParagraphAlignment::Center
                } else if is_numeric_only(text) {
                    ParagraphAlignment::Center
                } else {
                    ParagraphAlignment::Left
                };

                paragraph.replace_content(run);
                paragraph.set_alignment(alignment);
            }

            if shade {
                cell.set_shading(Shading::solid(guide.header_row_fill.as_str()));
            }
        }
    }

    cells
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(table: &Table) -> Vec<Vec<String>> {
        table
            .rows()
            .map(|row| row.cells().map(|cell| cell.text()).collect())
            .collect()
    }

    #[test]
    fn test_header_and_body_rows() {
        let mut table = Table::from_data(&[["CODE", "credits"], ["CS101", "4"]]);
        let cells = style_table(&mut table, &StyleGuide::default());

        assert_eq!(cells, 4);
        assert_eq!(
            texts(&table),
            vec![vec!["Code", "Credits"], vec!["Cs101", "4"]]
        );

        for cell in table.row(0).unwrap().cells() {
            assert_eq!(cell.shading().map(|s| s.fill.as_str()), Some("D9D9D9"));
            assert_eq!(cell.vertical_alignment(), Some(VerticalAlignment::Center));
            let paragraph = cell.paragraphs().next().unwrap();
            assert_eq!(paragraph.alignment(), Some(ParagraphAlignment::Center));
            let run = paragraph.runs().next().unwrap();
            assert!(run.bold());
            assert_eq!(run.font_size_pt(), Some(12.0));
        }

        let code = table.cell(1, 0).unwrap();
        let credits = table.cell(1, 1).unwrap();
        assert!(code.shading().is_none());
        assert_eq!(
            code.paragraphs().next().unwrap().alignment(),
            Some(ParagraphAlignment::Left)
        );
        assert_eq!(
            credits.paragraphs().next().unwrap().alignment(),
            Some(ParagraphAlignment::Center)
        );
        assert!(!credits.paragraphs().next().unwrap().runs().next().unwrap().bold());
    }

    #[test]
    fn test_empty_cells_keep_their_paragraph_and_stay_unshaded() {
        let mut table = Table::from_data(&[["", "Name"], ["", "12.5"]]);
        style_table(&mut table, &StyleGuide::default());

        let empty = table.cell(1, 0).unwrap();
        assert_eq!(empty.vertical_alignment(), Some(VerticalAlignment::Center));
        assert_eq!(empty.paragraphs().next().unwrap().alignment(), None);
        assert!(table.cell(0, 0).unwrap().shading().is_none());
        assert!(table.cell(0, 1).unwrap().shading().is_some());
    }

    #[test]
    fn test_styling_twice_is_stable() {
        let mut table = Table::from_data(&[["Code", "Credits"], ["CS101", "4"]]);
        let guide = StyleGuide::default();
        style_table(&mut table, &guide);
        let once = table.clone();
        style_table(&mut table, &guide);

        assert_eq!(table, once);
    }
}
