use crate::Field;

/// Error type for setting a field from user input.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldValueError {
    /// The input is not one of the options offered for a choice field.
    #[error("'{input}' is not a valid option for {field}")]
    UnknownOption { field: Field, input: String },

    /// A yes/no field received something other than `true` or `false`.
    #[error("'{input}' is not a valid yes/no answer for {field}")]
    InvalidBool { field: Field, input: String },
}

/// Error type for reading a prediction response body.
#[derive(Debug, thiserror::Error)]
pub enum ResponseError {
    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response body has no `{0}` object")]
    MissingKey(&'static str),

    #[error("Risk '{label}' has a non-numeric value: {value}")]
    InvalidValue { label: String, value: String },
}
