mod field_wrapper;
mod submit_button;
mod text_input;

pub use field_wrapper::FieldWrapperProps;
pub use submit_button::{SubmitButton, SubmitButtonProps};
pub use text_input::{TextInput, TextInputProps};
