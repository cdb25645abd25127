//! Argument formatting for captured log calls.
//!
//! Every argument is converted on its own and the results are joined with a
//! single space. Plain values use their `Display` text; structured values
//! are pretty-printed as JSON with a two-space indent and fall back to their
//! `Debug` text when serialization fails.

use std::borrow::Cow;
use std::fmt;

use serde::Serialize;

/// A value that can be pretty-printed, with a plain fallback.
pub trait Structured {
    /// Pretty JSON rendering.
    fn to_pretty(&self) -> serde_json::Result<String>;

    /// Plain rendering used when `to_pretty` fails.
    fn to_plain(&self) -> String;
}

impl<T: Serialize + fmt::Debug + ?Sized> Structured for T {
    fn to_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    fn to_plain(&self) -> String {
        format!("{self:?}")
    }
}

/// One argument of a log call.
pub enum Arg<'a> {
    /// Already-converted text, used verbatim.
    Text(Cow<'a, str>),
    /// A primitive converted through `Display`.
    Display(&'a dyn fmt::Display),
    /// A compound value, pretty-printed.
    Object(&'a dyn Structured),
}

impl<'a> Arg<'a> {
    pub fn display<T: fmt::Display>(value: &'a T) -> Self {
        Arg::Display(value)
    }

    pub fn object<T: Structured>(value: &'a T) -> Self {
        Arg::Object(value)
    }

    /// Converts this argument to its message text.
    pub fn render(&self) -> String {
        match self {
            Arg::Text(text) => text.clone().into_owned(),
            Arg::Display(value) => value.to_string(),
            Arg::Object(value) => value.to_pretty().unwrap_or_else(|_| value.to_plain()),
        }
    }
}

impl<'a> From<&'a str> for Arg<'a> {
    fn from(s: &'a str) -> Self {
        Arg::Text(Cow::Borrowed(s))
    }
}

impl<'a> From<&'a String> for Arg<'a> {
    fn from(s: &'a String) -> Self {
        Arg::Text(Cow::Borrowed(s.as_str()))
    }
}

impl From<String> for Arg<'_> {
    fn from(s: String) -> Self {
        Arg::Text(Cow::Owned(s))
    }
}

impl fmt::Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Arg::Text(_) => "Text",
            Arg::Display(_) => "Display",
            Arg::Object(_) => "Object",
        };
        f.debug_tuple(variant).field(&self.render()).finish()
    }
}

/// Joins the rendered arguments with single spaces.
pub fn format_message(args: &[Arg<'_>]) -> String {
    args.iter().map(Arg::render).collect::<Vec<_>>().join(" ")
}
