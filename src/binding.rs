use crate::controller::{FieldName, FieldRegistration, FieldState, FormController, FormResult};
use crate::validation::ValidationError;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldSlice<E> {
    pub field: Option<FieldState<E>>,
    pub is_submitting: bool,
    pub can_submit: bool,
}

pub struct FieldBinding<E>
where
    E: ValidationError,
{
    controller: FormController<E>,
    name: FieldName,
    error_was_displayed: bool,
    last_slice: Option<FieldSlice<E>>,
}

impl<E> FieldBinding<E>
where
    E: ValidationError,
{
    pub fn new(controller: &FormController<E>, name: impl Into<FieldName>) -> Self {
        Self {
            controller: controller.clone(),
            name: name.into(),
            error_was_displayed: false,
            last_slice: None,
        }
    }

    pub fn name(&self) -> &FieldName {
        &self.name
    }

    pub fn controller(&self) -> &FormController<E> {
        &self.controller
    }

    pub fn register(&self, registration: FieldRegistration<E>) -> FormResult<()> {
        self.controller.init_field(registration)
    }

    pub fn field(&self) -> FormResult<Option<FieldState<E>>> {
        self.controller.get_field(self.name.as_str())
    }

    pub fn value(&self) -> FormResult<String> {
        Ok(self.field()?.map(|field| field.value).unwrap_or_default())
    }

    pub fn change(&self, value: impl Into<String>) -> FormResult<()> {
        self.controller.set_value(self.name.clone(), value)
    }

    pub fn blur(&self) -> FormResult<()> {
        self.controller.set_has_been_touched(self.name.clone(), true)
    }

    pub fn slice(&self) -> FormResult<FieldSlice<E>> {
        Ok(FieldSlice {
            field: self.field()?,
            is_submitting: self.controller.is_submitting()?,
            can_submit: self.controller.can_submit()?,
        })
    }

    // Errors are surfaced only once the field has been touched, and stay
    // visible afterwards even if the touched flag is cleared again.
    pub fn should_display_error(&mut self) -> FormResult<bool> {
        let Some(field) = self.field()? else {
            return Ok(false);
        };
        let display = field.has_been_touched || self.error_was_displayed;
        if display && field.error.is_some() {
            self.error_was_displayed = true;
        }
        Ok(display)
    }

    pub fn display_error(&mut self) -> FormResult<Option<E>> {
        if !self.should_display_error()? {
            return Ok(None);
        }
        Ok(self.field()?.and_then(|field| field.error))
    }

    pub fn needs_render(&self) -> FormResult<bool> {
        let current = self.slice()?;
        Ok(self.last_slice.as_ref() != Some(&current))
    }

    pub fn mark_rendered(&mut self, slice: FieldSlice<E>) {
        self.last_slice = Some(slice);
    }
}
