//! Wiki-link construction for person cross-references.

use crate::sanitize::clean_for_metadata;

/// Build a double-quoted wiki link for a person reference.
///
/// The shape depends on which of `id` / `folder` are present:
/// `"[[folder/id|name]]"`, `"[[id|name]]"`, `"[[folder/name]]"` or
/// `"[[name]]"`. The quoting keeps the link safe inside frontmatter array
/// literals. Returns `None` when the sanitized name is empty; callers skip
/// the reference entirely.
pub fn build_link(name: &str, id: Option<i64>, folder: &str) -> Option<String> {
    let clean_name = clean_for_metadata(name);
    if clean_name.is_empty() {
        return None;
    }

    let has_folder = !folder.trim().is_empty();
    let link = match (id, has_folder) {
        (Some(id), true) => format!("\"[[{}/{}|{}]]\"", folder, id, clean_name),
        (Some(id), false) => format!("\"[[{}|{}]]\"", id, clean_name),
        (None, true) => format!("\"[[{}/{}]]\"", folder, clean_name),
        (None, false) => format!("\"[[{}]]\"", clean_name),
    };
    Some(link)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_and_folder() {
        assert_eq!(
            build_link("Tom Hanks", Some(37859), "People"),
            Some("\"[[People/37859|Tom Hanks]]\"".to_string())
        );
    }

    #[test]
    fn test_id_only() {
        assert_eq!(
            build_link("Tom Hanks", Some(37859), ""),
            Some("\"[[37859|Tom Hanks]]\"".to_string())
        );
    }

    #[test]
    fn test_folder_only() {
        assert_eq!(
            build_link("Tom Hanks", None, "People"),
            Some("\"[[People/Tom Hanks]]\"".to_string())
        );
    }

    #[test]
    fn test_name_only() {
        assert_eq!(
            build_link("Tom Hanks", None, ""),
            Some("\"[[Tom Hanks]]\"".to_string())
        );
    }

    #[test]
    fn test_blank_folder_counts_as_absent() {
        assert_eq!(
            build_link("Ann", Some(5), "   "),
            Some("\"[[5|Ann]]\"".to_string())
        );
    }

    #[test]
    fn test_name_is_sanitized() {
        assert_eq!(
            build_link("A:B", Some(1), "F"),
            Some("\"[[F/1|AB]]\"".to_string())
        );
    }

    #[test]
    fn test_empty_name_yields_none() {
        assert_eq!(build_link("", Some(1), "F"), None);
        assert_eq!(build_link("   ", None, ""), None);
        // A name that sanitizes away entirely is also skipped.
        assert_eq!(build_link(" : ", Some(1), "F"), None);
    }
}
