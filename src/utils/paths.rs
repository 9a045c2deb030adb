use std::path::PathBuf;

/// Expand a leading `~` in a user-supplied path.
pub fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_paths_are_unchanged() {
        assert_eq!(expand("/srv/libphutil"), PathBuf::from("/srv/libphutil"));
        assert_eq!(expand("relative/dir"), PathBuf::from("relative/dir"));
    }

    #[test]
    fn tilde_is_expanded() {
        let expanded = expand("~/libphutil");
        assert!(expanded.ends_with("libphutil"));
    }
}
