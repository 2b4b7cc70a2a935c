//! Request path helpers.

/// Split a request path into its non-empty segments.
///
/// Leading, trailing and repeated slashes are ignored, so `"/apps//x/"`
/// yields `["apps", "x"]` and `"/"` yields nothing.
#[must_use]
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// Join segments into an absolute path. No segments yields `""`.
#[must_use]
pub fn join_path<S: AsRef<str>>(segments: &[S]) -> String {
    segments.iter().fold(String::new(), |mut out, s| {
        out.push('/');
        out.push_str(s.as_ref());
        out
    })
}
