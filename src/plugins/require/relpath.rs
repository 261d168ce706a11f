//! Relative import specifiers between two absolute paths.

use std::path::{Component, Path};

/// Compare components, ignoring case on Windows path prefixes (drive letters)
fn same_component(a: &Component<'_>, b: &Component<'_>) -> bool {
    match (a, b) {
        (Component::Prefix(a), Component::Prefix(b)) => a
            .as_os_str()
            .to_string_lossy()
            .eq_ignore_ascii_case(&b.as_os_str().to_string_lossy()),
        _ => a == b,
    }
}

/// Specifier that reaches `file` from a module in `from_dir`.
///
/// Always uses `/` and starts with `./` or `../`. Returns `None` when the
/// paths share no root (different drives) or `file` is `from_dir` itself.
pub fn import_specifier(from_dir: &Path, file: &Path) -> Option<String> {
    let from: Vec<Component<'_>> = from_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component<'_>> = file
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| same_component(a, b))
        .count();

    if common == 0 || common == to.len() {
        return None;
    }

    let rest: Vec<String> = to[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    let ups = from.len() - common;

    let mut specifier = if ups == 0 {
        "./".to_string()
    } else {
        "../".repeat(ups)
    };
    specifier.push_str(&rest.join("/"));
    Some(specifier)
}
