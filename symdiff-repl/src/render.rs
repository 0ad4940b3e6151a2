//! Output files written next to an input file.

use std::{fs, path::{Path, PathBuf}};
use symdiff_parser::{tree::{dot::to_dot, fmt::Latex}, Node};
use tracing::info;
use crate::error::Error;

/// Wraps the LaTeX rendering of the tree in a plain TeX document, ready for `pdftex`.
pub fn tex_document(node: &Node) -> String {
    format!("$$ {} $$\n\\bye\n", node.as_display())
}

/// Returns `path` with `extension` appended to its full file name, so `prog.txt` becomes
/// `prog.txt.dot`.
pub fn output_path(path: &Path, extension: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Writes the Graphviz and TeX renderings of the tree next to `input`, returning the written
/// paths.
pub fn write_outputs(input: &Path, node: &Node) -> Result<[PathBuf; 2], Error> {
    let dot = output_path(input, "dot");
    let tex = output_path(input, "tex");

    for (path, contents) in [(&dot, to_dot(node)), (&tex, tex_document(node))] {
        fs::write(path, contents).map_err(|err| Error::Io(path.clone(), err))?;
        info!(path = %path.display(), "wrote output");
    }

    Ok([dot, tex])
}
