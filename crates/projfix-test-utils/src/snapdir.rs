//! Render a whole directory as one string for comparisons in tests.
//! - Respects `.gitignore` and `.ignore` files unless asked not to
//! - Only includes UTF-8 text files (CRLF→LF), ignores binary files
//! - Deterministic path order

use ignore::WalkBuilder;
use std::{fs, io::Read, path::Path};

/// Every text file under `root` as `=== rel/path` followed by its contents.
pub fn dir_manifest(root: impl AsRef<Path>) -> String {
    dir_manifest_with(root, true)
}

/// Like [`dir_manifest`], optionally including ignored and hidden files.
pub fn dir_manifest_with(root: impl AsRef<Path>, respect_ignores: bool) -> String {
    let base = fs::canonicalize(root.as_ref()).expect("failed to canonicalize root path");

    let mut wb = WalkBuilder::new(&base);
    wb.hidden(respect_ignores)
        .git_ignore(respect_ignores)
        .ignore(respect_ignores)
        .git_exclude(respect_ignores)
        .git_global(false)
        .require_git(false)
        .parents(false);

    let mut entries: Vec<(String, String)> = Vec::new();

    for dent in wb.build().filter_map(Result::ok) {
        let p = dent.path();
        if p == base {
            continue;
        }

        let rel = p
            .strip_prefix(&base)
            .expect("path should be within base")
            .to_string_lossy()
            .replace('\\', "/");

        let Some(ft) = dent.file_type() else { continue };
        if !ft.is_file() {
            continue;
        }

        let mut buf = Vec::new();
        fs::File::open(p)
            .expect("failed to open file")
            .read_to_end(&mut buf)
            .expect("failed to read file");

        if let Ok(s) = std::str::from_utf8(&buf) {
            let mut body = s.replace("\r\n", "\n");
            if !body.ends_with('\n') {
                body.push('\n');
            }
            entries.push((rel, body));
        }
    }

    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut out = String::new();
    for (rel, body) in entries {
        out.push_str(&format!("=== {rel}\n"));
        out.push_str(&body);
    }
    out
}
