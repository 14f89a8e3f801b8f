//! Attribute mapping from Attio's nested value shapes to flat scalars.

pub mod value;

pub use value::{
    extract_attribute, extract_first, extract_key, extract_number, extract_record_reference,
    extract_value,
};
