//! Lexical `/`-separated path operations used to navigate object keys

const SEPARATOR: char = '/';

/// Returns the shortest path equivalent to `path` by purely lexical processing
///
/// Repeated separators collapse, `.` elements are dropped and `..` removes the
/// element before it. `..` at the root of a rooted path is discarded. An empty
/// result is `"."`.
#[must_use]
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with(SEPARATOR);
    let mut parts: Vec<&str> = Vec::new();

    for element in path.split(SEPARATOR) {
        match element {
            "" | "." => {}
            ".." => match parts.last() {
                Some(last) if *last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            element => parts.push(element),
        }
    }

    let joined = parts.join("/");
    if rooted {
        format!("/{joined}")
    } else if joined.is_empty() {
        ".".to_string()
    } else {
        joined
    }
}

/// Returns everything but the last element of `path`, cleaned
///
/// A path without a separator has `"."` as its directory.
#[must_use]
pub fn dir(path: &str) -> String {
    let head = path.rfind(SEPARATOR).map_or("", |i| &path[..=i]);
    clean(head)
}

/// Returns the last element of `path`, ignoring trailing separators
#[must_use]
pub fn base(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let trimmed = path.trim_end_matches(SEPARATOR);
    if trimmed.is_empty() {
        return SEPARATOR.to_string();
    }

    trimmed
        .rfind(SEPARATOR)
        .map_or(trimmed, |i| &trimmed[i + 1..])
        .to_string()
}

/// Returns the extension of the final element of `path`, dot included
#[must_use]
pub fn ext(path: &str) -> &str {
    for (i, c) in path.char_indices().rev() {
        match c {
            SEPARATOR => break,
            '.' => return &path[i..],
            _ => {}
        }
    }
    ""
}
