//! URL helper functions

/// Path of a single post page
///
/// # Examples
/// ```ignore
/// post_path("/post", Some("como-utilizar-hooks")) // -> "/post/como-utilizar-hooks"
/// ```
pub fn post_path(route: &str, uid: Option<&str>) -> String {
    format!("{}/{}", route.trim_end_matches('/'), uid.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_path() {
        assert_eq!(post_path("/post", Some("a")), "/post/a");
        assert_eq!(post_path("/post/", Some("a")), "/post/a");
        assert_eq!(post_path("/blog/post", Some("hello-world")), "/blog/post/hello-world");
    }

    #[test]
    fn test_post_path_without_uid() {
        assert_eq!(post_path("/post", None), "/post/");
    }
}
