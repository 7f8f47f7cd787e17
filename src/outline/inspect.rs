use tdoc::{Document, Paragraph};

use super::content::paragraph_text;
use super::{NodePath, PathStep};

/// One row of the tabular projection of the outline.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GridRow {
    pub label: String,
    pub cells: Vec<String>,
}

pub(crate) fn outline_entries(document: &Document) -> Option<&Vec<Vec<Paragraph>>> {
    match document.paragraphs.first()? {
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => Some(entries),
        _ => None,
    }
}

pub(crate) fn outline_rows(document: &Document) -> usize {
    outline_entries(document)
        .map(|rows| rows.len())
        .unwrap_or(0)
}

pub(crate) fn row_entry<'a>(document: &'a Document, row: usize) -> Option<&'a Vec<Paragraph>> {
    outline_entries(document)?.get(row)
}

/// Index of the nested cell list inside a row entry. The first paragraph
/// is the label, so lists are looked for behind it; an entry that consists
/// of nothing but a list has no label and the list sits at index zero.
pub(crate) fn entry_cell_list_index(entry: &[Paragraph]) -> Option<usize> {
    let is_list = |paragraph: &Paragraph| {
        matches!(
            paragraph,
            Paragraph::OrderedList { .. } | Paragraph::UnorderedList { .. }
        )
    };
    if let Some(idx) = entry.iter().skip(1).position(is_list) {
        return Some(idx + 1);
    }
    match entry.first() {
        Some(paragraph) if is_list(paragraph) => Some(0),
        _ => None,
    }
}

pub(crate) fn entry_label_index(entry: &[Paragraph]) -> Option<usize> {
    entry
        .iter()
        .position(|paragraph| paragraph.paragraph_type().is_leaf())
}

/// Text of an entry's label paragraph; empty when the label is missing.
pub(crate) fn entry_text(entry: &[Paragraph]) -> String {
    entry_label_index(entry)
        .map(|idx| paragraph_text(&entry[idx]))
        .unwrap_or_default()
}

pub(crate) fn row_cell_entries<'a>(
    document: &'a Document,
    row: usize,
) -> Option<&'a Vec<Vec<Paragraph>>> {
    let entry = row_entry(document, row)?;
    let idx = entry_cell_list_index(entry)?;
    match entry.get(idx)? {
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => Some(entries),
        _ => None,
    }
}

pub(crate) fn collect_grid(document: &Document) -> Vec<GridRow> {
    let Some(rows) = outline_entries(document) else {
        return Vec::new();
    };
    rows.iter()
        .map(|entry| {
            let cells = match entry_cell_list_index(entry).and_then(|idx| entry.get(idx)) {
                Some(
                    Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries },
                ) => entries.iter().map(|cell| entry_text(cell)).collect(),
                _ => Vec::new(),
            };
            GridRow {
                label: entry_text(entry),
                cells,
            }
        })
        .collect()
}

pub(crate) fn paragraph_ref<'a>(document: &'a Document, path: &NodePath) -> Option<&'a Paragraph> {
    paragraph_ref_steps(document, path.steps())
}

pub(crate) fn paragraph_ref_steps<'a>(
    document: &'a Document,
    steps: &[PathStep],
) -> Option<&'a Paragraph> {
    let mut iter = steps.iter();
    let first = iter.next()?;
    let mut paragraph = match first {
        PathStep::Root(idx) => document.paragraphs.get(*idx)?,
        _ => return None,
    };
    for step in iter {
        paragraph = match step {
            PathStep::Entry {
                entry_index,
                paragraph_index,
            } => match paragraph {
                Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => {
                    entries.get(*entry_index)?.get(*paragraph_index)?
                }
                _ => return None,
            },
            PathStep::Root(_) => return None,
        };
    }
    Some(paragraph)
}

/// The entry containing the paragraph a path points at.
pub(crate) fn entry_at<'a>(document: &'a Document, path: &NodePath) -> Option<&'a Vec<Paragraph>> {
    let steps = path.steps();
    let (last, list_steps) = steps.split_last()?;
    let PathStep::Entry { entry_index, .. } = last else {
        return None;
    };
    match paragraph_ref_steps(document, list_steps)? {
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => {
            entries.get(*entry_index)
        }
        _ => None,
    }
}

/// Build a caret path for a row label or one of the row's cells,
/// resolved against the actual entry layout.
pub(crate) fn caret_path(
    document: &Document,
    row: usize,
    column: Option<usize>,
) -> Option<NodePath> {
    let entry = row_entry(document, row)?;
    match column {
        None => {
            let label = entry_label_index(entry)?;
            Some(NodePath::from_steps(vec![
                PathStep::Root(0),
                PathStep::Entry {
                    entry_index: row,
                    paragraph_index: label,
                },
            ]))
        }
        Some(column) => {
            let list_index = entry_cell_list_index(entry)?;
            let cells = match entry.get(list_index)? {
                Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => {
                    entries
                }
                _ => return None,
            };
            let cell = cells.get(column)?;
            let cell_label = entry_label_index(cell)?;
            Some(NodePath::from_steps(vec![
                PathStep::Root(0),
                PathStep::Entry {
                    entry_index: row,
                    paragraph_index: list_index,
                },
                PathStep::Entry {
                    entry_index: column,
                    paragraph_index: cell_label,
                },
            ]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdoc::ftml;

    #[test]
    fn grid_reflects_rows_and_cells() {
        let document = ftml! {
            ul {
                li {
                    p { "Alpha" }
                    ul {
                        li { p { "a1" } }
                        li { p { "a2" } }
                    }
                }
                li { p { "Beta" } }
            }
        };
        let grid = collect_grid(&document);
        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0].label, "Alpha");
        assert_eq!(grid[0].cells, vec!["a1".to_string(), "a2".to_string()]);
        assert_eq!(grid[1].label, "Beta");
        assert!(grid[1].cells.is_empty());
    }

    #[test]
    fn no_outline_means_no_rows() {
        let document = ftml! {
            p { "just text" }
        };
        assert_eq!(outline_rows(&document), 0);
        assert!(collect_grid(&document).is_empty());
    }

    #[test]
    fn label_falls_back_to_empty_when_missing() {
        let document = ftml! {
            ul {
                li {
                    ul {
                        li { p { "only cells" } }
                    }
                }
            }
        };
        let grid = collect_grid(&document);
        assert_eq!(grid.len(), 1);
        assert_eq!(grid[0].label, "");
        assert_eq!(grid[0].cells, vec!["only cells".to_string()]);
    }

    #[test]
    fn caret_path_resolves_cells() {
        let document = ftml! {
            ul {
                li {
                    p { "Row" }
                    ul {
                        li { p { "cell" } }
                    }
                }
            }
        };
        let path = caret_path(&document, 0, Some(0)).unwrap();
        let paragraph = paragraph_ref(&document, &path).unwrap();
        assert_eq!(paragraph_text(paragraph), "cell");
        assert!(caret_path(&document, 0, Some(1)).is_none());
        assert!(caret_path(&document, 1, None).is_none());
    }
}
