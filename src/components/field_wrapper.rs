#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldWrapperProps {
    pub label: Option<String>,
    pub required: bool,
    pub error: Option<String>,
    pub display_error: bool,
}

impl FieldWrapperProps {
    pub fn visible_error(&self) -> Option<&str> {
        if self.display_error {
            self.error.as_deref()
        } else {
            None
        }
    }
}
