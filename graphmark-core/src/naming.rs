// Names acceptable to GraphQL

/// True when `name` matches `/[_A-Za-z][_0-9A-Za-z]*/` and is not reserved
/// for introspection (`__` prefix).
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first == '_' || first.is_ascii_alphabetic()) {
        return false;
    }
    if name.starts_with("__") {
        return false;
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Normalise an accessor name to the member it exposes.
///
/// `getTitle` becomes `title`, `isActive` becomes `active`; anything else is
/// only un-capitalised. A bare `get` or `is` is left alone.
pub fn sanitize_member_name(name: &str) -> String {
    let stripped = if name.len() > 2 && name.starts_with("is") {
        &name[2..]
    } else if name.len() > 3 && name.starts_with("get") {
        &name[3..]
    } else {
        name
    };
    uncapitalize(stripped)
}

fn uncapitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Turn a Rust type path into a GraphQL type name.
///
/// Path separators become `_` and generic brackets collapse to `__`, so
/// `app::video::Video` becomes `app_video_Video`.
pub fn compatible_type_name(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut rest = path.trim();
    while !rest.is_empty() {
        if let Some(tail) = rest.strip_prefix("::") {
            out.push('_');
            rest = tail;
            continue;
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            match c {
                '<' | '>' | ',' => out.push_str("__"),
                ' ' => {}
                c => out.push(c),
            }
        }
        rest = chars.as_str();
    }
    out
}
