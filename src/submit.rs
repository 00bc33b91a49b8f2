use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, Weak};

use crate::controller::{
    FieldName, FormController, FormResult, FormState, recompute_can_submit, write_lock,
};
use crate::validation::ValidationError;

pub trait SubmitHandler<E>: Send + Sync
where
    E: ValidationError,
{
    fn submit(&self, values: BTreeMap<FieldName, String>, done: SubmitHandle<E>);
}

impl<E, F> SubmitHandler<E> for F
where
    E: ValidationError,
    F: Fn(BTreeMap<FieldName, String>, SubmitHandle<E>) + Send + Sync,
{
    fn submit(&self, values: BTreeMap<FieldName, String>, done: SubmitHandle<E>) {
        (self)(values, done)
    }
}

pub struct SubmitHandle<E>
where
    E: ValidationError,
{
    state: Weak<RwLock<FormState<E>>>,
    ticket: u64,
}

impl<E> Clone for SubmitHandle<E>
where
    E: ValidationError,
{
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            ticket: self.ticket,
        }
    }
}

impl<E> SubmitHandle<E>
where
    E: ValidationError,
{
    pub fn complete(&self) -> FormResult<bool> {
        let Some(lock) = self.state.upgrade() else {
            return Ok(false);
        };
        let mut state = write_lock(&lock, "completing submit")?;
        if !state.is_submitting || state.submit_ticket != self.ticket {
            return Ok(false);
        }
        state.is_submitting = false;
        recompute_can_submit(&mut state);
        tracing::debug!(form = ?state.id, "submit completed");
        Ok(true)
    }
}

impl<E> FormController<E>
where
    E: ValidationError,
{
    pub fn submit_form(&self) -> FormResult<bool> {
        let (id, values, done) = {
            let mut state = write_lock(&self.state, "starting submit")?;
            if state.is_submitting {
                tracing::debug!(form = ?state.id, "submit ignored while in flight");
                return Ok(false);
            }
            state.is_submitting = true;
            state.submit_ticket += 1;
            state.submit_count = state.submit_count.saturating_add(1);
            recompute_can_submit(&mut state);
            let values = state
                .fields
                .iter()
                .map(|(name, field)| (name.clone(), field.value.clone()))
                .collect::<BTreeMap<_, _>>();
            let done = SubmitHandle {
                state: Arc::downgrade(&self.state),
                ticket: state.submit_ticket,
            };
            (state.id, values, done)
        };

        tracing::debug!(form = ?id, fields = values.len(), "submitting form");
        // The handler may call done synchronously, so the state lock is released first.
        self.on_submit.submit(values, done);
        Ok(true)
    }
}
