use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use futures::executor::block_on;
use futures_timer::Delay;

use calmform::{FieldName, FormController, SubmitButton, SubmitHandle, TextInput};

type Submission = (BTreeMap<FieldName, String>, SubmitHandle<&'static str>);

#[test]
fn basic_form_flow_from_mount_to_completion() {
    let captured: Arc<Mutex<Option<Submission>>> = Arc::new(Mutex::new(None));
    let handler = {
        let captured = captured.clone();
        move |values: BTreeMap<FieldName, String>, done: SubmitHandle<&'static str>| {
            *captured.lock().expect("capture lock") = Some((values, done));
        }
    };
    let controller = FormController::new(handler);

    let mut hello = TextInput::new(&controller, "hello")
        .label("Hello")
        .placeholder("Hello, World!")
        .required(true)
        .validator(|value: &str| value.is_empty().then_some("hello is required"));
    let hello2 = TextInput::new(&controller, "hello2").value("This is a default value");
    let mut submit = SubmitButton::new(&controller)
        .can_submit_text("Submit")
        .cannot_submit_text("Cannot Submit")
        .is_submitting_text("Submitting");

    hello.mount().expect("mount hello");
    hello2.mount().expect("mount hello2");

    // The required field starts empty, so the form is not submittable yet and
    // the unshown error must not flash before first interaction.
    let props = submit.render().expect("render button");
    assert_eq!(props.label, "Cannot Submit");
    assert!(!props.enabled);
    let props = hello.render().expect("render hello");
    assert_eq!(props.wrapper.error.as_deref(), Some("hello is required"));
    assert_eq!(props.wrapper.visible_error(), None);

    hello.handle_change("World").expect("type into hello");
    hello.handle_blur().expect("blur hello");

    let props = hello.render().expect("render hello");
    assert_eq!(props.value, "World");
    assert_eq!(props.wrapper.visible_error(), None);
    let props = submit.render().expect("render button");
    assert_eq!(props.label, "Submit");
    assert!(props.enabled);

    assert!(submit.handle_click().expect("click submit"));
    let (values, done) = captured
        .lock()
        .expect("capture lock")
        .clone()
        .expect("submit handler ran");
    assert_eq!(values.get("hello").map(String::as_str), Some("World"));
    assert_eq!(
        values.get("hello2").map(String::as_str),
        Some("This is a default value")
    );

    let props = submit.render().expect("render button");
    assert_eq!(props.label, "Submitting");
    assert!(!props.enabled);
    assert!(!submit.handle_click().expect("click while submitting"));

    // Completion arrives a turn later, from wherever the embedder ran it.
    let worker = thread::spawn(move || {
        block_on(Delay::new(Duration::from_millis(20)));
        done.complete().expect("complete submit")
    });
    assert!(worker.join().expect("worker joins"));

    let props = submit.render().expect("render button");
    assert_eq!(props.label, "Submit");
    assert!(props.enabled);
    assert_eq!(controller.snapshot().expect("snapshot").submit_count, 1);
}
