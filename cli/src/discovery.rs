//! Background image discovery for when `--background` is omitted.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Extensions accepted as background images (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("Images directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),
    #[error("No image files found in {}", .0.display())]
    NoImages(PathBuf),
    #[error("Selection cancelled")]
    Cancelled,
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// List image files directly inside `dir`, sorted by file name.
pub fn find_candidates(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    if !dir.is_dir() {
        return Err(DiscoveryError::MissingDirectory(dir.to_path_buf()));
    }

    let mut found: Vec<PathBuf> = std::fs::read_dir(dir)?
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_image_extension(path))
        .collect();
    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(found)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Pick a background from `candidates`, prompting when there is more than one.
///
/// `input` is read one line per attempt. Out-of-range numbers re-prompt;
/// anything that is not a number, or end of input, cancels.
pub fn choose_background<R: BufRead, W: Write>(
    candidates: &[PathBuf],
    input: &mut R,
    out: &mut W,
) -> Result<PathBuf, DiscoveryError> {
    match candidates {
        [] => Err(DiscoveryError::NoImages(PathBuf::new())),
        [only] => {
            writeln!(out, "Using background image: {}", only.display())?;
            Ok(only.clone())
        }
        many => {
            writeln!(out, "Multiple images found. Choose a background image:")?;
            for (i, path) in many.iter().enumerate() {
                let name = path.file_name().unwrap_or(path.as_os_str());
                writeln!(out, "  {}: {}", i + 1, name.to_string_lossy())?;
            }

            loop {
                write!(out, "Enter a number: ")?;
                out.flush()?;

                let mut line = String::new();
                if input.read_line(&mut line)? == 0 {
                    writeln!(out)?;
                    return Err(DiscoveryError::Cancelled);
                }
                let Ok(choice) = line.trim().parse::<usize>() else {
                    return Err(DiscoveryError::Cancelled);
                };

                match choice.checked_sub(1).and_then(|i| many.get(i)) {
                    Some(path) => {
                        writeln!(out, "Using background image: {}", path.display())?;
                        return Ok(path.clone());
                    }
                    None => writeln!(out, "Invalid number.")?,
                }
            }
        }
    }
}

/// Find and select a background image inside `dir`.
pub fn discover_background<R: BufRead, W: Write>(
    dir: &Path,
    input: &mut R,
    out: &mut W,
) -> Result<PathBuf, DiscoveryError> {
    let candidates = find_candidates(dir)?;
    if candidates.is_empty() {
        return Err(DiscoveryError::NoImages(dir.to_path_buf()));
    }
    tracing::debug!(dir = %dir.display(), count = candidates.len(), "Found background candidates");
    choose_background(&candidates, input, out)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn touch(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, b"").unwrap();
        path
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_candidates(&dir.path().join("images")).unwrap_err();
        assert!(matches!(err, DiscoveryError::MissingDirectory(_)));
    }

    #[test]
    fn only_image_extensions_are_listed_in_name_order() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "b.JPG");
        touch(dir.path(), "a.png");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "c.gif");
        std::fs::create_dir(dir.path().join("d.png")).unwrap();

        let names: Vec<String> = find_candidates(dir.path())
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.png", "b.JPG", "c.gif"]);
    }

    #[test]
    fn empty_directory_reports_no_images() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "readme.md");
        let err = discover_background(dir.path(), &mut Cursor::new(""), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, DiscoveryError::NoImages(_)));
    }

    #[test]
    fn single_candidate_is_used_without_prompting() {
        let dir = tempfile::tempdir().unwrap();
        let only = touch(dir.path(), "bg.bmp");
        let mut out = Vec::new();

        let chosen = discover_background(dir.path(), &mut Cursor::new(""), &mut out).unwrap();
        assert_eq!(chosen, only);
        assert!(String::from_utf8(out).unwrap().contains("Using background image"));
    }

    #[test]
    fn prompt_retries_out_of_range_numbers() {
        let candidates = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];
        let mut input = Cursor::new("0\n3\n2\n");
        let mut out = Vec::new();

        let chosen = choose_background(&candidates, &mut input, &mut out).unwrap();
        assert_eq!(chosen, PathBuf::from("b.png"));

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("  1: a.png"));
        assert!(printed.contains("  2: b.png"));
        assert_eq!(printed.matches("Invalid number.").count(), 2);
    }

    #[test]
    fn non_numeric_input_cancels() {
        let candidates = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];
        let err = choose_background(&candidates, &mut Cursor::new("two\n"), &mut Vec::new())
            .unwrap_err();
        assert!(matches!(err, DiscoveryError::Cancelled));
    }

    #[test]
    fn end_of_input_cancels() {
        let candidates = vec![PathBuf::from("a.png"), PathBuf::from("b.png")];
        let err =
            choose_background(&candidates, &mut Cursor::new(""), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, DiscoveryError::Cancelled));
    }
}
