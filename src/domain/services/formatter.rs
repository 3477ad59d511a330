#[cfg(test)]
#[path = "formatter_test.rs"]
mod tests;

/// One styled run within a paragraph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Span {
    Text(String),
    Bold(String),
    Break,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Paragraph(Vec<Span>),
    Code { language: String, body: String },
}

/// Splits assistant text into paragraphs and fenced code blocks, in the
/// order they appear. Only complete fence pairs count: anything after an
/// unmatched opening fence, the fence line included, stays literal text.
pub fn segments(text: &str) -> Vec<Segment> {
    let mut segments: Vec<Segment> = vec![];
    let mut paragraph_lines: Vec<&str> = vec![];
    let mut code_lines: Vec<&str> = vec![];
    let mut language = "";
    let mut open_fence: Option<&str> = None;

    for line in text.split('\n') {
        let trimmed = line.trim();

        if open_fence.is_some() {
            if trimmed.starts_with("```") {
                segments.push(Segment::Code {
                    language: language.to_string(),
                    body: code_lines.join("\n").trim().to_string(),
                });
                code_lines = vec![];
                language = "";
                open_fence = None;
            } else {
                code_lines.push(line);
            }
            continue;
        }

        if trimmed.starts_with("```") {
            append_paragraphs(&mut segments, &paragraph_lines);
            paragraph_lines = vec![];
            language = trimmed[3..].trim();
            open_fence = Some(line);
            continue;
        }

        paragraph_lines.push(line);
    }

    if let Some(fence) = open_fence {
        paragraph_lines.push(fence);
        paragraph_lines.extend(code_lines);
    }
    append_paragraphs(&mut segments, &paragraph_lines);

    return segments;
}

fn append_paragraphs(segments: &mut Vec<Segment>, lines: &[&str]) {
    for chunk in lines.join("\n").split("\n\n") {
        let trimmed = chunk.trim();
        if trimmed.is_empty() {
            continue;
        }
        segments.push(Segment::Paragraph(spans(trimmed)));
    }
}

fn spans(text: &str) -> Vec<Span> {
    let mut spans: Vec<Span> = vec![];

    for (idx, line) in text.split('\n').enumerate() {
        if idx > 0 {
            spans.push(Span::Break);
        }

        let mut rest = line;
        while let Some(start) = rest.find("**") {
            let after = start + 2;
            let close = match rest[after..].find("**") {
                Some(close) => close,
                None => break,
            };

            if start > 0 {
                spans.push(Span::Text(rest[..start].to_string()));
            }
            spans.push(Span::Bold(rest[after..after + close].to_string()));
            rest = &rest[after + close + 2..];
        }

        if !rest.is_empty() {
            spans.push(Span::Text(rest.to_string()));
        }
    }

    return spans;
}
