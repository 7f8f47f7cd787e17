use tdoc::{Paragraph, Span};

pub(crate) fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut out = String::new();
    for span in paragraph.content() {
        push_span_text(&mut out, span);
    }
    out
}

fn push_span_text(out: &mut String, span: &Span) {
    out.push_str(&span.text);
    for child in &span.children {
        push_span_text(out, child);
    }
}

pub(crate) fn set_paragraph_text(paragraph: &mut Paragraph, text: &str) {
    *paragraph.content_mut() = vec![Span::new_text(text)];
}

pub(crate) fn span_char_len(span: &Span) -> usize {
    span.text.chars().count() + span.children.iter().map(span_char_len).sum::<usize>()
}

pub(crate) fn paragraph_char_len(paragraph: &Paragraph) -> usize {
    paragraph.content().iter().map(span_char_len).sum()
}

pub(crate) fn span_is_empty(span: &Span) -> bool {
    span.text.is_empty() && span.children.iter().all(span_is_empty)
}

pub(crate) fn paragraph_is_blank(paragraph: &Paragraph) -> bool {
    paragraph.content().iter().all(span_is_empty)
}

/// An entry is blank when it has no text and no remaining nested structure.
pub(crate) fn entry_is_blank(entry: &[Paragraph]) -> bool {
    entry.iter().all(|paragraph| match paragraph {
        Paragraph::OrderedList { entries } | Paragraph::UnorderedList { entries } => {
            entries.is_empty()
        }
        Paragraph::Quote { children } => children.is_empty(),
        Paragraph::Checklist { items } => items.is_empty(),
        _ => paragraph_is_blank(paragraph),
    })
}

pub(crate) fn insert_char_at(paragraph: &mut Paragraph, offset: usize, ch: char) -> bool {
    if !paragraph.paragraph_type().is_leaf() {
        return false;
    }
    let spans = paragraph.content_mut();
    if spans.is_empty() {
        spans.push(Span::new_text(""));
    }
    insert_char_in_spans(spans, offset, ch)
}

fn insert_char_in_spans(spans: &mut [Span], offset: usize, ch: char) -> bool {
    let total: usize = spans.iter().map(span_char_len).sum();
    let mut remaining = offset.min(total);
    let count = spans.len();
    for (idx, span) in spans.iter_mut().enumerate() {
        let len = span_char_len(span);
        if remaining > len && idx + 1 < count {
            remaining -= len;
            continue;
        }
        let text_len = span.text.chars().count();
        if span.children.is_empty() || remaining <= text_len {
            let byte = char_to_byte_idx(&span.text, remaining.min(text_len));
            span.text.insert(byte, ch);
            return true;
        }
        return insert_char_in_spans(&mut span.children, remaining - text_len, ch);
    }
    false
}

/// Split a paragraph's content at a character offset, returning the spans
/// after the split point. Styled spans with children are kept whole; a
/// split inside one leaves it on the left side.
pub(crate) fn split_paragraph_content(paragraph: &mut Paragraph, offset: usize) -> Vec<Span> {
    let spans = paragraph.content_mut();
    let trailing = split_spans_at(spans, offset);
    if spans.is_empty() {
        spans.push(Span::new_text(""));
    }
    trailing
}

fn split_spans_at(spans: &mut Vec<Span>, offset: usize) -> Vec<Span> {
    let total: usize = spans.iter().map(span_char_len).sum();
    let mut remaining = offset.min(total);
    let mut idx = 0;
    while idx < spans.len() {
        let len = span_char_len(&spans[idx]);
        if remaining < len {
            break;
        }
        remaining -= len;
        idx += 1;
    }
    if idx >= spans.len() {
        return Vec::new();
    }
    let mut trailing = spans.split_off(idx + 1);
    if remaining == 0 {
        if let Some(whole) = spans.pop() {
            trailing.insert(0, whole);
        }
        return trailing;
    }
    let span = &mut spans[idx];
    if span.children.is_empty() {
        let byte = char_to_byte_idx(&span.text, remaining);
        let mut rest = span.clone();
        rest.text = span.text.split_off(byte);
        trailing.insert(0, rest);
    }
    trailing
}

pub(crate) fn char_to_byte_idx(text: &str, char_idx: usize) -> usize {
    if char_idx == 0 {
        return 0;
    }
    for (count, (byte_idx, _)) in text.char_indices().enumerate() {
        if count == char_idx {
            return byte_idx;
        }
    }
    text.len()
}
