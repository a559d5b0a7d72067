//! Default message templates

pub const STRING: &str = "Must be a string";
pub const NUMBER: &str = "Must be a number";
pub const BOOLEAN: &str = "Must be a boolean";
pub const DATE: &str = "Must be a date";

pub const MIN_LENGTH: &str = "Must be at least {min_length} characters long";
pub const MAX_LENGTH: &str = "Must be at most {max_length} characters long";
pub const MIN_VALUE: &str = "Must be at least {min_value}";
pub const MAX_VALUE: &str = "Must be at most {max_value}";
pub const MIN_DATE: &str = "Must be on or after {min_date}";
pub const MAX_DATE: &str = "Must be on or before {max_date}";
pub const CHOICES: &str = "Must be one of the allowed choices";
pub const EMPTY: &str = "This field is required";
