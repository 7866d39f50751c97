//! Placeholder numbering for SQLite statements
//!
//! SQLite gives an anonymous `?` the index one past the largest index
//! assigned so far, so `SET name = ?1 WHERE id = ?` binds the `WHERE` marker
//! to parameter 2. sqlx counts anonymous markers on their own instead, so
//! statements mixing both styles are rewritten to explicit `?N` markers
//! before they reach the driver.

use std::borrow::Cow;

/// Rewrite every anonymous `?` outside literals and comments to the `?N`
/// SQLite itself would assign it.
///
/// Returns a borrowed `Cow` when the statement has no anonymous markers.
pub(crate) fn number_placeholders(sql: &str) -> Cow<'_, str> {
    let bytes = sql.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut highest = 0usize;
    let mut state = State::Normal;
    let mut idx = 0;

    while idx < bytes.len() {
        let b = bytes[idx];
        match state {
            State::Normal => match b {
                b'\'' => state = State::Quoted(b'\''),
                b'"' => state = State::Quoted(b'"'),
                b'`' => state = State::Quoted(b'`'),
                b'[' => state = State::Quoted(b']'),
                b'-' if bytes.get(idx + 1) == Some(&b'-') => {
                    state = State::LineComment;
                    idx += 1;
                }
                b'/' if bytes.get(idx + 1) == Some(&b'*') => {
                    state = State::BlockComment;
                    idx += 1;
                }
                b'?' | b'$' => match scan_index(bytes, idx + 1) {
                    Some((end, n)) => {
                        highest = highest.max(n);
                        idx = end - 1;
                    }
                    None if b == b'?' => {
                        highest += 1;
                        let buf = out.get_or_insert_with(String::new);
                        buf.push_str(&sql[copied..idx]);
                        buf.push('?');
                        buf.push_str(&highest.to_string());
                        copied = idx + 1;
                    }
                    None => {}
                },
                _ => {}
            },
            State::Quoted(close) => {
                if b == close {
                    if close != b']' && bytes.get(idx + 1) == Some(&close) {
                        idx += 1; // doubled quote
                    } else {
                        state = State::Normal;
                    }
                }
            }
            State::LineComment => {
                if b == b'\n' {
                    state = State::Normal;
                }
            }
            State::BlockComment => {
                if b == b'*' && bytes.get(idx + 1) == Some(&b'/') {
                    state = State::Normal;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&sql[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(sql),
    }
}

#[derive(Clone, Copy)]
enum State {
    Normal,
    Quoted(u8),
    LineComment,
    BlockComment,
}

/// Digits starting at `start`, as the exclusive end offset and their value.
/// Indices too large to parse count as 0; SQLite rejects them anyway.
fn scan_index(bytes: &[u8], start: usize) -> Option<(usize, usize)> {
    let digits = bytes
        .get(start..)?
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    let end = start + digits;
    let n = std::str::from_utf8(&bytes[start..end])
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(0);
    Some((end, n))
}
