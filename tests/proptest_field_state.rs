//! Property tests for field-state bookkeeping: for any sequence of value and
//! touched mutations, the stored error tracks the validator applied to the
//! latest value, and the submit gate tracks required-field errors plus the
//! in-flight submit flag.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use calmform::{FieldName, FieldRegistration, FormController, SubmitHandle};
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum FieldOp {
    Set(String),
    Touch(bool),
}

fn field_op() -> impl Strategy<Value = FieldOp> {
    prop_oneof![
        "[a-z]{0,6}".prop_map(FieldOp::Set),
        any::<bool>().prop_map(FieldOp::Touch),
    ]
}

fn noop_controller() -> FormController<String> {
    FormController::new(|_: BTreeMap<FieldName, String>, _: SubmitHandle<String>| {})
}

fn validate(value: &str) -> Option<String> {
    value.is_empty().then(|| "required".to_string())
}

proptest! {
    #[test]
    fn error_tracks_validator_of_latest_value(
        default in "[a-z]{0,6}",
        required in any::<bool>(),
        ops in proptest::collection::vec(field_op(), 0..32),
    ) {
        let controller = noop_controller();
        controller
            .init_field(
                FieldRegistration::new("field")
                    .value(default.clone())
                    .required(required)
                    .validator(validate)
                    .has_default_value(!default.is_empty()),
            )
            .expect("register field");

        let mut expected_value = default;
        let mut expected_touched = false;
        for op in ops {
            match op {
                FieldOp::Set(value) => {
                    controller.set_value("field", value.clone()).expect("set value");
                    expected_value = value;
                    expected_touched = true;
                }
                FieldOp::Touch(touched) => {
                    controller
                        .set_has_been_touched("field", touched)
                        .expect("set touched");
                    expected_touched = touched;
                }
            }
        }

        let field = controller
            .get_field("field")
            .expect("read field")
            .expect("field registered");
        prop_assert_eq!(field.has_been_touched, expected_touched);
        prop_assert_eq!(field.error.clone(), validate(&expected_value));
        prop_assert_eq!(
            controller.can_submit().expect("read gate"),
            !required || field.error.is_none()
        );
        prop_assert_eq!(field.value, expected_value);
    }

    #[test]
    fn in_flight_submit_blocks_the_gate_until_completed(
        ops in proptest::collection::vec(field_op(), 0..16),
    ) {
        let captured: Arc<Mutex<Option<SubmitHandle<String>>>> = Arc::new(Mutex::new(None));
        let handler = {
            let captured = captured.clone();
            move |_: BTreeMap<FieldName, String>, done: SubmitHandle<String>| {
                *captured.lock().expect("capture lock") = Some(done);
            }
        };
        let controller = FormController::new(handler);
        controller
            .init_field(FieldRegistration::new("field").validator(validate))
            .expect("register field");

        prop_assert!(controller.submit_form().expect("submit"));
        for op in ops {
            match op {
                FieldOp::Set(value) => controller.set_value("field", value).expect("set value"),
                FieldOp::Touch(touched) => controller
                    .set_has_been_touched("field", touched)
                    .expect("set touched"),
            }
        }
        prop_assert!(!controller.can_submit().expect("gate blocked while submitting"));
        prop_assert!(!controller.submit_form().expect("second submit is a no-op"));

        let handle = captured
            .lock()
            .expect("capture lock")
            .clone()
            .expect("handle captured");
        prop_assert!(handle.complete().expect("complete submit"));
        prop_assert!(controller.can_submit().expect("gate reopens"));
    }
}
