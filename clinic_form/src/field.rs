/// Client-local state of a single form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValidationState {
    pub value: String,
    /// Whether the user has left this field at least once
    pub touched: bool,
    pub error: Option<String>,
}

impl FieldValidationState {
    pub fn show_success(&self) -> bool {
        self.touched && self.error.is_none() && !self.value.is_empty()
    }

    pub fn show_error(&self) -> bool {
        self.touched && self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_success() {
        for (touched, error, value, expected) in [
            (true, None, "Jane", true),
            (false, None, "Jane", false),
            (true, Some("Name is required"), "Jane", false),
            (true, None, "", false),
        ] {
            let state = FieldValidationState {
                value: value.into(),
                touched,
                error: error.map(Into::into),
            };
            assert_eq!(state.show_success(), expected, "{state:?}");
        }
    }

    #[test]
    fn untouched_errors_are_hidden() {
        let state = FieldValidationState {
            value: String::new(),
            touched: false,
            error: Some("Name is required".into()),
        };
        assert!(!state.show_error());
        assert!(!state.show_success());
    }
}
