use crate::controller::{FormController, FormResult};
use crate::validation::ValidationError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubmitButtonProps {
    pub label: String,
    pub enabled: bool,
}

pub struct SubmitButton<E>
where
    E: ValidationError,
{
    controller: FormController<E>,
    can_submit_text: String,
    cannot_submit_text: String,
    is_submitting_text: String,
    last_props: Option<SubmitButtonProps>,
}

impl<E> SubmitButton<E>
where
    E: ValidationError,
{
    pub fn new(controller: &FormController<E>) -> Self {
        Self {
            controller: controller.clone(),
            can_submit_text: "Submit".to_string(),
            cannot_submit_text: "Cannot submit".to_string(),
            is_submitting_text: "Submitting".to_string(),
            last_props: None,
        }
    }

    pub fn can_submit_text(mut self, text: impl Into<String>) -> Self {
        self.can_submit_text = text.into();
        self
    }

    pub fn cannot_submit_text(mut self, text: impl Into<String>) -> Self {
        self.cannot_submit_text = text.into();
        self
    }

    pub fn is_submitting_text(mut self, text: impl Into<String>) -> Self {
        self.is_submitting_text = text.into();
        self
    }

    fn props(&self) -> FormResult<SubmitButtonProps> {
        let is_submitting = self.controller.is_submitting()?;
        let can_submit = self.controller.can_submit()?;
        // The submitting label wins over both gate labels.
        Ok(if is_submitting {
            SubmitButtonProps {
                label: self.is_submitting_text.clone(),
                enabled: false,
            }
        } else if can_submit {
            SubmitButtonProps {
                label: self.can_submit_text.clone(),
                enabled: true,
            }
        } else {
            SubmitButtonProps {
                label: self.cannot_submit_text.clone(),
                enabled: false,
            }
        })
    }

    pub fn render(&mut self) -> FormResult<SubmitButtonProps> {
        let props = self.props()?;
        self.last_props = Some(props.clone());
        Ok(props)
    }

    pub fn needs_render(&self) -> FormResult<bool> {
        let current = self.props()?;
        Ok(self.last_props.as_ref() != Some(&current))
    }

    pub fn handle_click(&self) -> FormResult<bool> {
        if !self.props()?.enabled {
            return Ok(false);
        }
        self.controller.submit_form()
    }
}
