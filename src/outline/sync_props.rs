use proptest::prelude::*;
use tdoc::{Document, Paragraph, Span};

use crate::outline::inspect::collect_grid;
use crate::outline::{LiveModel, Patch, synchronize};

fn build_outline(rows: &[Option<Vec<String>>]) -> Document {
    let entries = rows
        .iter()
        .enumerate()
        .map(|(idx, cells)| {
            let mut entry = vec![
                Paragraph::new_text().with_content(vec![Span::new_text(&format!("row {}", idx))]),
            ];
            if let Some(cells) = cells {
                let cell_entries = cells
                    .iter()
                    .map(|cell| {
                        vec![Paragraph::new_text().with_content(vec![Span::new_text(cell)])]
                    })
                    .collect();
                entry.push(Paragraph::new_unordered_list().with_entries(cell_entries));
            }
            entry
        })
        .collect();
    Document::new().with_paragraphs(vec![Paragraph::new_unordered_list().with_entries(entries)])
}

fn counts(document: &Document) -> Vec<usize> {
    collect_grid(document)
        .iter()
        .map(|row| row.cells.len())
        .collect()
}

fn shape_count(shape: &[Option<Vec<String>>], row: usize) -> usize {
    shape[row].as_ref().map(|cells| cells.len()).unwrap_or(0)
}

fn outline_shape() -> impl Strategy<Value = Vec<Option<Vec<String>>>> {
    prop::collection::vec(
        prop::option::of(prop::collection::vec("[a-z]{0,3}", 0..4)),
        1..6,
    )
}

fn outline_with_trigger() -> impl Strategy<Value = (Vec<Option<Vec<String>>>, usize)> {
    outline_shape().prop_flat_map(|rows| {
        let count = rows.len();
        (Just(rows), 0..count)
    })
}

proptest! {
    #[test]
    fn passes_are_idempotent((rows, trigger) in outline_with_trigger()) {
        let mut document = build_outline(&rows);
        {
            let mut model = LiveModel::new(&mut document);
            synchronize(&mut model, trigger).unwrap();
        }
        let after_first = document.clone();
        let mut model = LiveModel::new(&mut document);
        let second = synchronize(&mut model, trigger).unwrap();
        prop_assert!(second.is_noop());
        prop_assert_eq!(document, after_first);
    }

    #[test]
    fn growth_is_monotonic((rows, trigger) in outline_with_trigger()) {
        let mut document = build_outline(&rows);
        let before = counts(&document);
        let mut model = LiveModel::new(&mut document);
        synchronize(&mut model, trigger).unwrap();
        let after = counts(&document);
        prop_assert_eq!(before.len(), after.len());
        for (b, a) in before.iter().zip(after.iter()) {
            prop_assert!(a >= b);
        }
    }

    #[test]
    fn every_row_ends_at_its_required_count((rows, trigger) in outline_with_trigger()) {
        let mut document = build_outline(&rows);
        let mut model = LiveModel::new(&mut document);
        synchronize(&mut model, trigger).unwrap();
        let after = counts(&document);
        let target = shape_count(&rows, trigger);
        for (idx, count) in after.iter().enumerate() {
            prop_assert_eq!(*count, shape_count(&rows, idx).max(target));
        }
    }

    #[test]
    fn uniform_outlines_are_noops((cells, rows) in (0usize..4, 1usize..5)) {
        let shape: Vec<Option<Vec<String>>> = (0..rows)
            .map(|row| Some((0..cells).map(|cell| format!("r{}c{}", row, cell)).collect()))
            .collect();
        let mut document = build_outline(&shape);
        let before = document.clone();
        let mut model = LiveModel::new(&mut document);
        let report = synchronize(&mut model, 0).unwrap();
        prop_assert!(report.is_noop());
        prop_assert_eq!(document, before);
    }

    #[test]
    fn patch_and_live_agree((rows, trigger) in outline_with_trigger()) {
        let mut live_doc = build_outline(&rows);
        let patch_source = live_doc.clone();
        {
            let mut model = LiveModel::new(&mut live_doc);
            synchronize(&mut model, trigger).unwrap();
        }
        let mut patch = Patch::new(&patch_source);
        synchronize(&mut patch, trigger).unwrap();
        let mut committed = patch_source.clone();
        patch.commit(&mut committed).unwrap();
        prop_assert_eq!(live_doc, committed);
    }
}
