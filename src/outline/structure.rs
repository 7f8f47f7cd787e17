use tdoc::{Document, Paragraph, Span};

use super::content::{set_paragraph_text, split_paragraph_content};
use super::inspect::entry_cell_list_index;
use super::{NodePath, PathStep};

pub(crate) fn ensure_outline_initialized(document: &mut Document) {
    if document.paragraphs.is_empty() {
        document.paragraphs.push(Paragraph::new_unordered_list());
    }
    match document.paragraphs.first_mut() {
        Some(Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries }) => {
            if entries.is_empty() {
                entries.push(vec![empty_text_paragraph()]);
            }
        }
        _ => {}
    }
}

fn empty_text_paragraph() -> Paragraph {
    Paragraph::new_text().with_content(vec![Span::new_text("")])
}

fn text_paragraph(text: &str) -> Paragraph {
    Paragraph::new_text().with_content(vec![Span::new_text(text)])
}

pub(crate) fn paragraph_mut<'a>(
    document: &'a mut Document,
    path: &NodePath,
) -> Option<&'a mut Paragraph> {
    paragraph_mut_steps(document, path.steps())
}

fn paragraph_mut_steps<'a>(
    document: &'a mut Document,
    steps: &[PathStep],
) -> Option<&'a mut Paragraph> {
    let mut iter = steps.iter();
    let first = iter.next()?;
    let mut paragraph = match first {
        PathStep::Root(idx) => document.paragraphs.get_mut(*idx)?,
        _ => return None,
    };
    for step in iter {
        paragraph = match step {
            PathStep::Entry {
                entry_index,
                paragraph_index,
            } => match paragraph {
                Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => {
                    entries.get_mut(*entry_index)?.get_mut(*paragraph_index)?
                }
                _ => return None,
            },
            PathStep::Root(_) => return None,
        };
    }
    Some(paragraph)
}

fn list_entries_mut<'a>(
    document: &'a mut Document,
    steps: &[PathStep],
) -> Option<&'a mut Vec<Vec<Paragraph>>> {
    match paragraph_mut_steps(document, steps)? {
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => Some(entries),
        _ => None,
    }
}

pub(crate) fn outline_entries_mut(document: &mut Document) -> Option<&mut Vec<Vec<Paragraph>>> {
    match document.paragraphs.first_mut()? {
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => Some(entries),
        _ => None,
    }
}

/// Index of the entry's cell list, creating an empty one when absent.
pub(crate) fn ensure_entry_cell_list(entry: &mut Vec<Paragraph>) -> usize {
    if let Some(idx) = entry_cell_list_index(entry) {
        return idx;
    }
    entry.push(Paragraph::new_unordered_list());
    entry.len() - 1
}

/// Attach a cell list to a row. `Some(true)` when one was created,
/// `Some(false)` when the row already had one.
pub(crate) fn ensure_cell_list(document: &mut Document, row: usize) -> Option<bool> {
    let rows = outline_entries_mut(document)?;
    let entry = rows.get_mut(row)?;
    if entry_cell_list_index(entry).is_some() {
        return Some(false);
    }
    entry.push(Paragraph::new_unordered_list());
    Some(true)
}

pub(crate) fn append_empty_cell(document: &mut Document, row: usize) -> Option<()> {
    let rows = outline_entries_mut(document)?;
    let entry = rows.get_mut(row)?;
    let idx = ensure_entry_cell_list(entry);
    match entry.get_mut(idx)? {
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => {
            entries.push(vec![empty_text_paragraph()]);
            Some(())
        }
        _ => None,
    }
}

pub(crate) fn append_row_entry(document: &mut Document, label: &str) -> Option<usize> {
    let rows = outline_entries_mut(document)?;
    rows.push(vec![text_paragraph(label)]);
    Some(rows.len() - 1)
}

pub(crate) fn remove_row_entry(document: &mut Document, row: usize) -> Option<Vec<Paragraph>> {
    let rows = outline_entries_mut(document)?;
    if row >= rows.len() {
        return None;
    }
    Some(rows.remove(row))
}

/// Move the entry holding the addressed paragraph under its previous
/// sibling, as the last entry of that sibling's nested list. Returns the
/// paragraph's new path.
pub(crate) fn sink_entry(document: &mut Document, path: &NodePath) -> Option<NodePath> {
    let steps = path.steps();
    let (last, list_steps) = steps.split_last()?;
    let PathStep::Entry {
        entry_index,
        paragraph_index,
    } = *last
    else {
        return None;
    };
    if entry_index == 0 {
        return None;
    }
    let entries = list_entries_mut(document, list_steps)?;
    if entry_index >= entries.len() {
        return None;
    }
    let entry = entries.remove(entry_index);
    let previous = entries.get_mut(entry_index - 1)?;
    let list_index = ensure_entry_cell_list(previous);
    let nested = match previous.get_mut(list_index)? {
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => entries,
        _ => return None,
    };
    nested.push(entry);
    let new_entry = nested.len() - 1;
    let mut new_steps = list_steps.to_vec();
    new_steps.push(PathStep::Entry {
        entry_index: entry_index - 1,
        paragraph_index: list_index,
    });
    new_steps.push(PathStep::Entry {
        entry_index: new_entry,
        paragraph_index,
    });
    Some(NodePath::from_steps(new_steps))
}

/// Move the entry holding the addressed paragraph out of its list, to sit
/// right after the parent entry at the parent's level. A list container
/// left empty by the move is removed. All positions are validated before
/// the first mutation.
pub(crate) fn lift_entry(document: &mut Document, path: &NodePath) -> Option<NodePath> {
    let steps = path.steps();
    let (last, list_steps) = steps.split_last()?;
    let PathStep::Entry {
        entry_index,
        paragraph_index,
    } = *last
    else {
        return None;
    };
    let (list_last, grand_steps) = list_steps.split_last()?;
    let PathStep::Entry {
        entry_index: parent_entry,
        paragraph_index: parent_paragraph,
    } = *list_last
    else {
        return None;
    };

    {
        let entries = list_entries_mut(document, list_steps)?;
        if entry_index >= entries.len() {
            return None;
        }
    }
    {
        let grand = list_entries_mut(document, grand_steps)?;
        if parent_entry >= grand.len() {
            return None;
        }
    }

    let entries = list_entries_mut(document, list_steps)?;
    let entry = entries.remove(entry_index);
    let drop_container = entries.is_empty();

    let grand = list_entries_mut(document, grand_steps)?;
    if drop_container {
        let parent = grand.get_mut(parent_entry)?;
        if parent_paragraph < parent.len() {
            parent.remove(parent_paragraph);
        }
    }
    let insert_at = (parent_entry + 1).min(grand.len());
    grand.insert(insert_at, entry);

    let mut new_steps = grand_steps.to_vec();
    new_steps.push(PathStep::Entry {
        entry_index: insert_at,
        paragraph_index,
    });
    Some(NodePath::from_steps(new_steps))
}

/// Split the addressed paragraph at a character offset. The text after the
/// offset becomes a new entry right behind the current one; nested
/// structure stays where it is. Returns the path of the new entry's text.
pub(crate) fn split_entry(
    document: &mut Document,
    path: &NodePath,
    offset: usize,
) -> Option<NodePath> {
    let steps = path.steps();
    let (last, list_steps) = steps.split_last()?;
    let PathStep::Entry {
        entry_index,
        paragraph_index,
    } = *last
    else {
        return None;
    };
    let entries = list_entries_mut(document, list_steps)?;
    let entry = entries.get_mut(entry_index)?;
    let paragraph = entry.get_mut(paragraph_index)?;
    if !paragraph.paragraph_type().is_leaf() {
        return None;
    }
    let trailing = split_paragraph_content(paragraph, offset);
    let mut new_paragraph = Paragraph::new_text();
    *new_paragraph.content_mut() = trailing;
    if new_paragraph.content().is_empty() {
        new_paragraph.content_mut().push(Span::new_text(""));
    }
    entries.insert(entry_index + 1, vec![new_paragraph]);
    let mut new_steps = list_steps.to_vec();
    new_steps.push(PathStep::Entry {
        entry_index: entry_index + 1,
        paragraph_index: 0,
    });
    Some(NodePath::from_steps(new_steps))
}

pub(crate) fn set_text_at(document: &mut Document, path: &NodePath, text: &str) -> bool {
    let Some(paragraph) = paragraph_mut(document, path) else {
        return false;
    };
    if !paragraph.paragraph_type().is_leaf() {
        return false;
    }
    set_paragraph_text(paragraph, text);
    true
}
