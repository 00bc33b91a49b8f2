use crate::controller::{
    FieldName, FormController, FormResult, read_lock, recompute_can_submit, write_lock,
};

pub trait ValidationError: Clone + PartialEq + Send + Sync + 'static {
    fn message(&self) -> String;
}

impl ValidationError for String {
    fn message(&self) -> String {
        self.clone()
    }
}

impl ValidationError for &'static str {
    fn message(&self) -> String {
        (*self).to_string()
    }
}

pub trait FieldValidator<E>: Send + Sync
where
    E: ValidationError,
{
    fn validate(&self, value: &str) -> Option<E>;
}

impl<E, F> FieldValidator<E> for F
where
    E: ValidationError,
    F: Fn(&str) -> Option<E> + Send + Sync,
{
    fn validate(&self, value: &str) -> Option<E> {
        (self)(value)
    }
}

impl<E> FormController<E>
where
    E: ValidationError,
{
    pub fn set_value(
        &self,
        name: impl Into<FieldName>,
        value: impl Into<String>,
    ) -> FormResult<()> {
        let name = name.into();
        let validator = read_lock(&self.validators, "reading validator for value change")?
            .get(&name)
            .cloned();
        let mut state = write_lock(&self.state, "writing field value")?;
        let field = state.fields.entry(name.clone()).or_default();
        field.value = value.into();
        field.has_been_touched = true;
        field.error = validator.and_then(|v| v.validate(&field.value));
        let has_error = field.error.is_some();
        recompute_can_submit(&mut state);
        tracing::trace!(field = %name, has_error, "field value changed");
        Ok(())
    }

    pub fn set_has_been_touched(
        &self,
        name: impl Into<FieldName>,
        touched: bool,
    ) -> FormResult<()> {
        let name = name.into();
        let mut state = write_lock(&self.state, "touching field")?;
        state.fields.entry(name).or_default().has_been_touched = touched;
        recompute_can_submit(&mut state);
        Ok(())
    }

    pub fn touch(&self, name: impl Into<FieldName>) -> FormResult<()> {
        self.set_has_been_touched(name, true)
    }
}
