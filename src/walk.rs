use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::{MottleError, OUTPUT_DIR};

/// Extensions accepted as corpus input, compared case-insensitively.
pub const ELIGIBLE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

fn is_eligible(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| ELIGIBLE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Recursively collect eligible files under `root`, grouped by containing
/// directory. Any directory whose name contains the [`OUTPUT_DIR`] segment is
/// pruned with its whole subtree. Iteration order of the groups is
/// unspecified. Traversal errors abort the walk.
pub fn group_by_directory(root: &Path) -> Result<HashMap<PathBuf, Vec<PathBuf>>, MottleError> {
    let mut groups: HashMap<PathBuf, Vec<PathBuf>> = HashMap::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        !(entry.file_type().is_dir() && entry.file_name().to_string_lossy().contains(OUTPUT_DIR))
    });
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() || !is_eligible(entry.path()) {
            continue;
        }
        let dir = entry.path().parent().unwrap_or(root).to_path_buf();
        groups.entry(dir).or_default().push(entry.path().to_path_buf());
    }
    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eligibility_ignores_case() {
        assert!(is_eligible(Path::new("a.jpg")));
        assert!(is_eligible(Path::new("a.JPEG")));
        assert!(is_eligible(Path::new("dir/b.Png")));
        assert!(!is_eligible(Path::new("a.gif")));
        assert!(!is_eligible(Path::new("png")));
    }

    #[test]
    fn groups_by_parent_and_prunes_output_dirs() {
        let root = tempfile::tempdir().unwrap();
        let sub = root.path().join("sub");
        let out = root.path().join("sub").join(OUTPUT_DIR);
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(root.path().join("a.png"), b"x").unwrap();
        std::fs::write(sub.join("b.jpg"), b"x").unwrap();
        std::fs::write(sub.join("notes.txt"), b"x").unwrap();
        std::fs::write(out.join("c.png"), b"x").unwrap();

        let groups = group_by_directory(root.path()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[&root.path().to_path_buf()], vec![root.path().join("a.png")]);
        assert_eq!(groups[&sub], vec![sub.join("b.jpg")]);
    }
}
