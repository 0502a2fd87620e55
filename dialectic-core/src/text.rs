//! Line-oriented text helpers shared by the transformation passes.

/// Leading whitespace of a line.
pub fn indentation(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}

/// Split text into lines, keeping each line's terminator.
///
/// Joining the result reproduces the input byte for byte.
pub fn split_lines_inclusive(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}

/// Remove the indentation common to every non-blank line.
pub fn dedent(text: &str) -> String {
    let common = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| indentation(line).len())
        .min()
        .unwrap_or(0);

    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[common..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Re-indent a block of text so that its least-indented line starts at `indent`.
///
/// Surrounding blank lines are dropped and blank lines inside the block stay
/// empty. The result has no trailing newline.
pub fn reindent(text: &str, indent: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let first = lines.iter().position(|l| !l.trim().is_empty());
    let last = lines.iter().rposition(|l| !l.trim().is_empty());

    let (Some(first), Some(last)) = (first, last) else {
        return String::new();
    };

    dedent(&lines[first..=last].join("\n"))
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split on `separator` at nesting depth zero.
///
/// Brackets (`<>`, `()`, `[]`, `{}`) and quoted strings are respected; the
/// `>` of an `=>` arrow does not close a bracket.
pub fn split_top_level(text: &str, separator: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth: usize = 0;
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut prev = '\0';

    for (i, c) in text.char_indices() {
        if let Some(q) = quote {
            if c == q && prev != '\\' {
                quote = None;
            }
        } else {
            match c {
                '\'' | '"' | '`' => quote = Some(c),
                '<' | '(' | '[' | '{' => depth += 1,
                '>' if prev == '=' => {}
                '>' | ')' | ']' | '}' => depth = depth.saturating_sub(1),
                c if c == separator && depth == 0 => {
                    parts.push(&text[start..i]);
                    start = i + c.len_utf8();
                }
                _ => {}
            }
        }
        prev = c;
    }
    parts.push(&text[start..]);
    parts
}

/// Reduce a type-parameter list to its parameter names.
///
/// `TMode extends 'sync' | 'async', TRunResult = void` becomes
/// `TMode, TRunResult`. Empty entries (trailing commas) are dropped.
pub fn strip_constraints(params: &str) -> String {
    split_top_level(params, ',')
        .into_iter()
        .filter_map(|param| {
            let param = param.trim();
            let end = param
                .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
                .unwrap_or(param.len());
            let name = &param[..end];
            (!name.is_empty()).then_some(name)
        })
        .collect::<Vec<_>>()
        .join(", ")
}
