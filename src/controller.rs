use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::submit::SubmitHandler;
use crate::validation::{FieldValidator, ValidationError};

static FORM_ID_ALLOCATOR: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FormId(pub u64);

impl FormId {
    pub fn next() -> Self {
        Self(FORM_ID_ALLOCATOR.fetch_add(1, Ordering::SeqCst))
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct FieldName(Arc<str>);

impl FieldName {
    pub fn new(value: impl Into<Arc<str>>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for FieldName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FieldName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FieldName {
    fn from(value: &str) -> Self {
        Self(value.into())
    }
}

impl From<String> for FieldName {
    fn from(value: String) -> Self {
        Self(value.into())
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldState<E> {
    pub value: String,
    pub has_been_touched: bool,
    pub error: Option<E>,
    pub required: bool,
    pub dirty: bool,
}

#[derive(Clone, Debug)]
pub struct FormSnapshot<E> {
    pub fields: BTreeMap<FieldName, FieldState<E>>,
    pub is_submitting: bool,
    pub can_submit: bool,
    pub submit_count: u32,
    pub is_dirty: bool,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FormError {
    StatePoisoned(&'static str),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::StatePoisoned(context) => {
                write!(f, "form state lock poisoned while {context}")
            }
        }
    }
}

impl std::error::Error for FormError {}

pub type FormResult<T> = Result<T, FormError>;

pub struct FieldRegistration<E>
where
    E: ValidationError,
{
    pub(crate) name: FieldName,
    pub(crate) value: String,
    pub(crate) validator: Option<Arc<dyn FieldValidator<E>>>,
    pub(crate) required: bool,
    pub(crate) has_default_value: bool,
}

impl<E> FieldRegistration<E>
where
    E: ValidationError,
{
    pub fn new(name: impl Into<FieldName>) -> Self {
        Self {
            name: name.into(),
            value: String::new(),
            validator: None,
            required: false,
            has_default_value: false,
        }
    }

    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn validator(mut self, validator: impl FieldValidator<E> + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    pub fn shared_validator(mut self, validator: Arc<dyn FieldValidator<E>>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn has_default_value(mut self, has_default_value: bool) -> Self {
        self.has_default_value = has_default_value;
        self
    }
}

pub(crate) struct FieldEntry<E> {
    pub(crate) value: String,
    pub(crate) default_value: String,
    pub(crate) has_been_touched: bool,
    pub(crate) error: Option<E>,
    pub(crate) required: bool,
}

impl<E> Default for FieldEntry<E> {
    fn default() -> Self {
        Self {
            value: String::new(),
            default_value: String::new(),
            has_been_touched: false,
            error: None,
            required: false,
        }
    }
}

impl<E: Clone> FieldEntry<E> {
    pub(crate) fn state(&self) -> FieldState<E> {
        FieldState {
            value: self.value.clone(),
            has_been_touched: self.has_been_touched,
            error: self.error.clone(),
            required: self.required,
            dirty: self.value != self.default_value,
        }
    }
}

pub(crate) struct FormState<E> {
    pub(crate) id: FormId,
    pub(crate) fields: BTreeMap<FieldName, FieldEntry<E>>,
    pub(crate) is_submitting: bool,
    pub(crate) can_submit: bool,
    pub(crate) submit_ticket: u64,
    pub(crate) submit_count: u32,
}

pub(crate) type ValidatorMap<E> = BTreeMap<FieldName, Arc<dyn FieldValidator<E>>>;

#[derive(Clone)]
pub struct FormController<E>
where
    E: ValidationError,
{
    pub(crate) state: Arc<RwLock<FormState<E>>>,
    pub(crate) validators: Arc<RwLock<ValidatorMap<E>>>,
    pub(crate) on_submit: Arc<dyn SubmitHandler<E>>,
}

impl<E> FormController<E>
where
    E: ValidationError,
{
    pub fn new(on_submit: impl SubmitHandler<E> + 'static) -> Self {
        Self {
            state: Arc::new(RwLock::new(FormState {
                id: FormId::next(),
                fields: BTreeMap::new(),
                is_submitting: false,
                can_submit: true,
                submit_ticket: 0,
                submit_count: 0,
            })),
            validators: Arc::new(RwLock::new(BTreeMap::new())),
            on_submit: Arc::new(on_submit),
        }
    }

    pub fn form_id(&self) -> FormResult<FormId> {
        Ok(read_lock(&self.state, "reading form id")?.id)
    }

    pub fn init_field(&self, registration: FieldRegistration<E>) -> FormResult<()> {
        let FieldRegistration {
            name,
            value,
            validator,
            required,
            has_default_value,
        } = registration;

        // Registration must not clobber user input.
        {
            let state = read_lock(&self.state, "checking field registration")?;
            if state
                .fields
                .get(&name)
                .is_some_and(|field| field.has_been_touched)
            {
                tracing::trace!(field = %name, "registration skipped for touched field");
                return Ok(());
            }
        }

        {
            let mut validators = write_lock(&self.validators, "registering field validator")?;
            match validator.clone() {
                Some(validator) => {
                    validators.insert(name.clone(), validator);
                }
                None => {
                    validators.remove(&name);
                }
            }
        }

        let error = validator.as_ref().and_then(|v| v.validate(&value));
        let mut state = write_lock(&self.state, "registering field")?;
        if state
            .fields
            .get(&name)
            .is_some_and(|field| field.has_been_touched)
        {
            return Ok(());
        }
        tracing::debug!(field = %name, required, has_default_value, "field registered");
        state.fields.insert(
            name,
            FieldEntry {
                default_value: value.clone(),
                value,
                has_been_touched: false,
                error,
                required,
            },
        );
        recompute_can_submit(&mut state);
        Ok(())
    }

    pub fn get_field(&self, name: &str) -> FormResult<Option<FieldState<E>>> {
        Ok(read_lock(&self.state, "reading field state")?
            .fields
            .get(name)
            .map(|field| field.state()))
    }

    pub fn values(&self) -> FormResult<BTreeMap<FieldName, String>> {
        Ok(read_lock(&self.state, "collecting field values")?
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.value.clone()))
            .collect())
    }

    pub fn can_submit(&self) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading submit gate")?.can_submit)
    }

    pub fn is_submitting(&self) -> FormResult<bool> {
        Ok(read_lock(&self.state, "reading submit flag")?.is_submitting)
    }

    pub fn snapshot(&self) -> FormResult<FormSnapshot<E>> {
        let state = read_lock(&self.state, "creating form snapshot")?;
        let fields = state
            .fields
            .iter()
            .map(|(name, field)| (name.clone(), field.state()))
            .collect::<BTreeMap<_, _>>();
        let is_dirty = fields.values().any(|field| field.dirty);
        Ok(FormSnapshot {
            fields,
            is_submitting: state.is_submitting,
            can_submit: state.can_submit,
            submit_count: state.submit_count,
            is_dirty,
        })
    }

    pub fn reset_field(&self, name: &str) -> FormResult<()> {
        let validator = read_lock(&self.validators, "reading validator for field reset")?
            .get(name)
            .cloned();
        let mut state = write_lock(&self.state, "resetting field")?;
        let Some(field) = state.fields.get_mut(name) else {
            return Ok(());
        };
        field.value = field.default_value.clone();
        field.has_been_touched = false;
        field.error = validator.and_then(|v| v.validate(&field.value));
        recompute_can_submit(&mut state);
        Ok(())
    }

    pub fn reset_form(&self) -> FormResult<()> {
        let validators = read_lock(&self.validators, "reading validators for form reset")?.clone();
        let mut state = write_lock(&self.state, "resetting form")?;
        state.is_submitting = false;
        state.submit_count = 0;
        for (name, field) in state.fields.iter_mut() {
            field.value = field.default_value.clone();
            field.has_been_touched = false;
            field.error = validators.get(name).and_then(|v| v.validate(&field.value));
        }
        recompute_can_submit(&mut state);
        tracing::debug!(form = ?state.id, "form reset to registered defaults");
        Ok(())
    }
}

pub(crate) fn recompute_can_submit<E>(state: &mut FormState<E>) {
    state.can_submit = !state.is_submitting
        && state
            .fields
            .values()
            .all(|field| !field.required || field.error.is_none());
}

pub(crate) fn read_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockReadGuard<'a, T>> {
    lock.read().map_err(|_| FormError::StatePoisoned(context))
}

pub(crate) fn write_lock<'a, T>(
    lock: &'a RwLock<T>,
    context: &'static str,
) -> FormResult<RwLockWriteGuard<'a, T>> {
    lock.write().map_err(|_| FormError::StatePoisoned(context))
}
