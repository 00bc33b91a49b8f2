pub mod binding;
pub mod components;
pub mod controller;
pub mod submit;
pub mod validation;

pub use binding::{FieldBinding, FieldSlice};
pub use components::{
    FieldWrapperProps, SubmitButton, SubmitButtonProps, TextInput, TextInputProps,
};
pub use controller::{
    FieldName, FieldRegistration, FieldState, FormController, FormError, FormId, FormResult,
    FormSnapshot,
};
pub use submit::{SubmitHandle, SubmitHandler};
pub use validation::{FieldValidator, ValidationError};
