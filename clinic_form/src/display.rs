use clinic_models::contact::ContactField;

/// Everything a field component needs to render one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDisplay<'a> {
    /// Wire name, also used as the input `name`
    pub name: &'static str,
    pub value: &'a str,
    /// Inline error, only present once the field has been touched
    pub error: Option<&'a str>,
    pub show_success: bool,
    /// Rendered as `aria-invalid`
    pub invalid: bool,
    pub disabled: bool,
}

/// Input attributes keeping the honeypot out of sight and out of the tab
/// order while leaving it in the document for bots to fill in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoneypotAttributes {
    pub name: &'static str,
    pub style: &'static str,
    pub tabindex: i8,
    pub autocomplete: &'static str,
    pub aria_hidden: bool,
}

pub const HONEYPOT_ATTRIBUTES: HoneypotAttributes = HoneypotAttributes {
    name: ContactField::Honeypot.as_str(),
    style: "position:absolute;left:-9999px;top:auto;width:1px;height:1px;overflow:hidden",
    tabindex: -1,
    autocomplete: "off",
    aria_hidden: true,
};

impl HoneypotAttributes {
    pub fn html_attributes(&self) -> [(&'static str, String); 5] {
        [
            ("name", self.name.into()),
            ("style", self.style.into()),
            ("tabindex", self.tabindex.to_string()),
            ("autocomplete", self.autocomplete.into()),
            ("aria-hidden", self.aria_hidden.to_string()),
        ]
    }
}
