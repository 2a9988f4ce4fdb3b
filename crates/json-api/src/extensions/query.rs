//! Query parameter parsing helpers.
//!
//! Parameters are taken as raw strings and parsed here so that a malformed
//! value is answered with 422 like any other invalid input.

use std::str::FromStr;

use rust_decimal::Decimal;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait QueryParamExt {
    fn into_decimal(self, name: &str) -> Result<Option<Decimal>, StatusError>;

    fn into_bool(self, name: &str) -> Result<Option<bool>, StatusError>;
}

impl QueryParamExt for QueryParam<String, false> {
    fn into_decimal(self, name: &str) -> Result<Option<Decimal>, StatusError> {
        self.into_inner()
            .map(|value| parse_decimal(&value))
            .transpose()
            .or_422(&format!("could not parse \"{name}\" query parameter"))
    }

    fn into_bool(self, name: &str) -> Result<Option<bool>, StatusError> {
        self.into_inner()
            .map(|value| parse_bool(&value))
            .transpose()
            .or_422(&format!("could not parse \"{name}\" query parameter"))
    }
}

fn parse_decimal(value: &str) -> Result<Decimal, rust_decimal::Error> {
    let value = value.trim();

    Decimal::from_str(value).or_else(|_| Decimal::from_scientific(value))
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        other => Err(format!("expected a boolean, got \"{other}\"")),
    }
}
