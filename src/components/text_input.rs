use std::sync::Arc;

use super::field_wrapper::FieldWrapperProps;
use crate::binding::FieldBinding;
use crate::controller::{FieldName, FieldRegistration, FormController, FormResult};
use crate::validation::{FieldValidator, ValidationError};

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TextInputProps {
    pub name: String,
    pub value: String,
    pub placeholder: String,
    pub wrapper: FieldWrapperProps,
}

pub struct TextInput<E>
where
    E: ValidationError,
{
    binding: FieldBinding<E>,
    label: Option<String>,
    placeholder: String,
    initial_value: String,
    required: bool,
    validator: Option<Arc<dyn FieldValidator<E>>>,
}

impl<E> TextInput<E>
where
    E: ValidationError,
{
    pub fn new(controller: &FormController<E>, name: impl Into<FieldName>) -> Self {
        Self {
            binding: FieldBinding::new(controller, name),
            label: None,
            placeholder: String::new(),
            initial_value: String::new(),
            required: false,
            validator: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.initial_value = value.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn validator(mut self, validator: impl FieldValidator<E> + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn name(&self) -> &FieldName {
        self.binding.name()
    }

    pub fn mount(&self) -> FormResult<()> {
        let mut registration = FieldRegistration::new(self.binding.name().clone())
            .value(self.initial_value.clone())
            .required(self.required)
            .has_default_value(!self.initial_value.is_empty());
        if let Some(validator) = self.validator.clone() {
            registration = registration.shared_validator(validator);
        }
        self.binding.register(registration)
    }

    pub fn handle_change(&self, value: impl Into<String>) -> FormResult<()> {
        self.binding.change(value)
    }

    pub fn handle_blur(&self) -> FormResult<()> {
        self.binding.blur()
    }

    pub fn needs_render(&self) -> FormResult<bool> {
        self.binding.needs_render()
    }

    pub fn render(&mut self) -> FormResult<TextInputProps> {
        let slice = self.binding.slice()?;
        let display_error = self.binding.should_display_error()?;
        let field = slice.field.clone();

        let value = field
            .as_ref()
            .map(|field| field.value.clone())
            .unwrap_or_else(|| self.initial_value.clone());
        let required = field
            .as_ref()
            .map(|field| field.required)
            .unwrap_or(self.required);
        let error = field
            .as_ref()
            .and_then(|field| field.error.as_ref())
            .map(ValidationError::message);

        let props = TextInputProps {
            name: self.binding.name().to_string(),
            value,
            placeholder: self.placeholder.clone(),
            wrapper: FieldWrapperProps {
                label: self.label.clone(),
                required,
                error,
                display_error,
            },
        };
        self.binding.mark_rendered(slice);
        Ok(props)
    }
}
