mod macros;

/// Version string reported by the CLI and sent in outgoing `User-Agent`
/// headers.
pub const fn clinic_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Applies the function `f` only if `value` is `Some(...)` and provides the
    /// contained value to `f`.
    ///
    /// #### Example
    /// ```rust
    /// # use clinic_utils::Apply;
    /// fn greeting(name: Option<&str>) -> String {
    ///     String::from("Hello").apply_map(name, |s, name| format!("{s}, {name}"))
    /// }
    /// assert_eq!(greeting(None), "Hello");
    /// assert_eq!(greeting(Some("Jane")), "Hello, Jane");
    /// ```
    fn apply_map<U>(self, value: Option<U>, f: impl FnOnce(Self, U) -> Self) -> Self
    where
        Self: Sized,
    {
        match value {
            Some(value) => f(self, value),
            None => self,
        }
    }
}

impl<T> Apply for T {}
