//! LaTeX source document generation
//!
//! Wraps a formula in a minimal article document: fixed preamble, one
//! `\usepackage` line per configured package (order preserved), empty page
//! style, and the formula in a display-math environment.

use crate::error::{TexPngError, TexPngResult};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Render the full LaTeX source for a formula
pub fn build_document(formula: &str, packages: &[String]) -> String {
    let mut doc = String::new();
    doc.push_str("\\documentclass[12pt]{article}\n");
    doc.push_str("\\usepackage[utf8]{inputenc}\n");

    for package in packages {
        doc.push_str(&format!("\\usepackage{{{}}}\n", package));
    }

    doc.push_str("\\begin{document}\n");
    doc.push_str("\\pagestyle{empty}\n");
    doc.push_str("\\begin{displaymath}\n");
    doc.push_str(formula);
    doc.push('\n');
    doc.push_str("\\end{displaymath}\n");
    doc.push_str("\\end{document}\n");
    doc
}

/// Write the source document for a formula into the work directory
pub async fn write_document(path: &Path, formula: &str, packages: &[String]) -> TexPngResult<()> {
    let source = build_document(formula, packages);

    debug!("Writing source document: {}", path.display());
    fs::write(path, source)
        .await
        .map_err(|e| TexPngError::DocumentWrite {
            path: path.to_path_buf(),
            source: e,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn packages(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn document_wraps_formula_in_displaymath() {
        let doc = build_document("x^2 + y^2 = z^2", &[]);

        assert!(doc.starts_with("\\documentclass[12pt]{article}\n"));
        assert!(doc.contains("\\usepackage[utf8]{inputenc}"));
        assert!(doc.contains("\\pagestyle{empty}"));
        assert!(doc.contains("\\begin{displaymath}\nx^2 + y^2 = z^2\n\\end{displaymath}"));
        assert!(doc.ends_with("\\end{document}\n"));
    }

    #[test]
    fn document_lists_packages_in_order() {
        let doc = build_document("x", &packages(&["amssymb,amsmath", "color", "pst-plot"]));

        let first = doc.find("\\usepackage{amssymb,amsmath}").unwrap();
        let second = doc.find("\\usepackage{color}").unwrap();
        let third = doc.find("\\usepackage{pst-plot}").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn document_body_follows_preamble() {
        let doc = build_document("x", &packages(&["color"]));

        let begin = doc.find("\\begin{document}").unwrap();
        let package = doc.find("\\usepackage{color}").unwrap();
        assert!(package < begin);
    }

    #[tokio::test]
    async fn write_document_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("abc123.tex");

        write_document(&path, "x^2", &packages(&["color"]))
            .await
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("x^2"));
        assert!(written.contains("\\usepackage{color}"));
    }

    #[tokio::test]
    async fn write_document_fails_on_missing_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no-such-dir").join("abc123.tex");

        let err = write_document(&path, "x^2", &[]).await.unwrap_err();
        assert!(matches!(err, TexPngError::DocumentWrite { .. }));
    }
}
