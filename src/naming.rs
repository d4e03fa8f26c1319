//! Output naming for the `<basename>_edited` convention.
//!
//! Every operation writes `<basename>_edited<ext>` into the output
//! directory: compression and resizing keep the source extension,
//! conversion uses the target format's extension.
//!
//! Output paths for a whole run are planned up front from the (fixed)
//! input list. Two distinct inputs that would produce the same output
//! file name get a counter suffix in input order (`x_edited.jpg`,
//! `x_edited_2.jpg`, …), so workers never collide and never have to
//! probe the filesystem.

use crate::types::OperationSpec;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Suffix inserted between the basename and the extension.
pub const EDITED_SUFFIX: &str = "_edited";

/// Image file extensions accepted as batch input.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "webp", "tif", "tiff", "bmp", "gif",
];

/// Whether a path carries a supported image extension (case-insensitive).
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            let ext = ext.to_ascii_lowercase();
            SUPPORTED_EXTENSIONS.contains(&ext.as_str())
        })
}

/// Output file name for one source under the given operation, before
/// collision disambiguation.
fn output_file_name(source: &Path, operation: &OperationSpec) -> String {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    match operation {
        OperationSpec::Reformat { target } => {
            format!("{stem}{EDITED_SUFFIX}.{}", target.extension())
        }
        // Compress and resize keep the source extension, case included.
        _ => match source.extension() {
            Some(ext) => format!("{stem}{EDITED_SUFFIX}.{}", ext.to_string_lossy()),
            None => format!("{stem}{EDITED_SUFFIX}"),
        },
    }
}

/// Insert `_n` before the extension: `x_edited.jpg` → `x_edited_2.jpg`.
fn disambiguate(name: &str, n: u32) -> String {
    match name.rfind('.') {
        Some(dot) => format!("{}_{}{}", &name[..dot], n, &name[dot..]),
        None => format!("{name}_{n}"),
    }
}

/// Plan the output path for every input, in input order.
///
/// Returned vector is parallel to `paths`. The first input claiming a
/// file name gets it bare; later inputs with the same name get `_2`,
/// `_3`, … suffixes.
pub fn plan_outputs(
    paths: &[PathBuf],
    operation: &OperationSpec,
    output_dir: &Path,
) -> Vec<PathBuf> {
    let mut seen: HashMap<String, u32> = HashMap::new();
    paths
        .iter()
        .map(|source| {
            let name = output_file_name(source, operation);
            let count = seen.entry(name.clone()).or_insert(0);
            *count += 1;
            let final_name = if *count == 1 {
                name
            } else {
                disambiguate(&name, *count)
            };
            output_dir.join(final_name)
        })
        .collect()
}
