//! Per-locale message catalog backed by Fluent
//!
//! A [`CatalogBundle`] owns the parsed resources of one locale and resolves
//! message keys of the form `id` or `id.attribute`.

use crate::{I18nError, Result};
use fluent_bundle::concurrent::FluentBundle;
use fluent_bundle::types::{FluentNumber, FluentNumberOptions};
use fluent_bundle::{FluentArgs, FluentResource, FluentValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use unic_langid::LanguageIdentifier;

/// Named arguments for message formatting.
pub type Args = HashMap<String, ArgValue>;

/// Outcome of a message lookup.
///
/// Everything except `Found` is a soft failure: the public `gettext` API
/// collapses them to the requested key.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Fully formatted text
    Found(String),
    /// No message with the base id
    MissingMessage,
    /// The message exists but has no value (attributes only)
    MissingValue,
    /// The message exists but lacks the requested attribute
    MissingAttribute,
    /// Formatting reported errors
    FormatError(Vec<String>),
}

impl Lookup {
    /// Whether the lookup produced text.
    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    /// Collapse to the formatted text, or the key on any soft failure.
    pub fn into_text(self, msg_id: &str) -> String {
        match self {
            Lookup::Found(text) => text,
            _ => msg_id.to_string(),
        }
    }
}

/// Split a message key into its id and optional attribute.
pub fn split_key(msg_id: &str) -> Result<(&str, Option<&str>)> {
    let mut parts = msg_id.split('.');
    let id = parts.next().unwrap_or(msg_id);
    let attribute = parts.next();
    if parts.next().is_some() {
        return Err(I18nError::InvalidKey(msg_id.to_string()));
    }
    Ok((id, attribute))
}

/// Compiled message resources for a single locale.
///
/// Immutable once built; safe to share across threads.
pub struct CatalogBundle {
    bundle: FluentBundle<FluentResource>,
    locale: String,
}

impl std::fmt::Debug for CatalogBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogBundle")
            .field("locale", &self.locale)
            .finish_non_exhaustive()
    }
}

impl CatalogBundle {
    /// Create an empty bundle for a locale tag, with the `NUMBER` builtin
    /// registered.
    pub fn new(locale: &str) -> Result<Self> {
        let lang_id: LanguageIdentifier = locale
            .parse()
            .map_err(|e| I18nError::InvalidLocale(format!("{}: {}", locale, e)))?;

        let mut bundle = FluentBundle::new_concurrent(vec![lang_id]);
        if let Err(error) = bundle.add_function("NUMBER", number) {
            tracing::warn!(locale, "failed to register NUMBER: {:?}", error);
        }

        Ok(Self {
            bundle,
            locale: locale.to_string(),
        })
    }

    /// Toggle Unicode isolation marks around placeables.
    pub fn set_use_isolating(&mut self, value: bool) {
        self.bundle.set_use_isolating(value);
    }

    /// Add a parsed resource.
    ///
    /// Messages already defined by an earlier resource are kept; the
    /// conflicting definitions are logged and ignored.
    pub fn add_resource(&mut self, resource: FluentResource) {
        if let Err(errors) = self.bundle.add_resource(resource) {
            for error in errors {
                tracing::warn!(locale = %self.locale, "ignoring duplicate definition: {:?}", error);
            }
        }
    }

    /// Get the locale tag.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Check if a message key resolves to a pattern.
    pub fn has_message(&self, msg_id: &str) -> bool {
        match split_key(msg_id) {
            Ok((id, None)) => self
                .bundle
                .get_message(id)
                .is_some_and(|msg| msg.value().is_some()),
            Ok((id, Some(attribute))) => self
                .bundle
                .get_message(id)
                .is_some_and(|msg| msg.get_attribute(attribute).is_some()),
            Err(_) => false,
        }
    }

    /// Resolve and format a message key.
    ///
    /// Fails only for keys with more than one attribute segment.
    pub fn lookup(&self, msg_id: &str, args: Option<&Args>) -> Result<Lookup> {
        let (id, attribute) = split_key(msg_id)?;

        let Some(message) = self.bundle.get_message(id) else {
            tracing::debug!(locale = %self.locale, msg_id, "message not found");
            return Ok(Lookup::MissingMessage);
        };

        let pattern = match attribute {
            None => match message.value() {
                Some(pattern) => pattern,
                None => return Ok(Lookup::MissingValue),
            },
            Some(attribute) => match message.get_attribute(attribute) {
                Some(attr) => attr.value(),
                None => {
                    tracing::debug!(locale = %self.locale, msg_id, "attribute not found");
                    return Ok(Lookup::MissingAttribute);
                }
            },
        };

        let fluent_args = args.map(to_fluent_args);
        let mut errors = vec![];
        let text = self
            .bundle
            .format_pattern(pattern, fluent_args.as_ref(), &mut errors);

        if !errors.is_empty() {
            return Ok(Lookup::FormatError(
                errors.iter().map(|e| format!("{:?}", e)).collect(),
            ));
        }

        Ok(Lookup::Found(text.into_owned()))
    }
}

/// `NUMBER($value, minimumFractionDigits: .., maximumFractionDigits: ..)`
fn number<'a>(positional: &[FluentValue<'a>], named: &FluentArgs) -> FluentValue<'a> {
    let mut number = match positional.first() {
        Some(FluentValue::Number(n)) => n.clone(),
        Some(FluentValue::String(s)) => match s.trim().parse::<f64>() {
            Ok(value) => FluentNumber::new(value, FluentNumberOptions::default()),
            Err(_) => return FluentValue::Error,
        },
        _ => return FluentValue::Error,
    };

    number.options.merge(named);
    if let Some(max) = number.options.maximum_fraction_digits {
        let factor = 10f64.powi(max.min(20) as i32);
        number.value = (number.value * factor).round() / factor;
    }

    FluentValue::Number(number)
}

fn to_fluent_args(args: &Args) -> FluentArgs<'_> {
    let mut fluent_args = FluentArgs::with_capacity(args.len());
    for (name, value) in args {
        fluent_args.set(name.as_str(), value.to_fluent_value());
    }
    fluent_args
}

/// Value type for message arguments.
///
/// Deserializes from a JSON string or number, so request payloads can be
/// passed straight through as arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    Number(f64),
    String(String),
}

impl ArgValue {
    fn to_fluent_value(&self) -> fluent_bundle::FluentValue<'_> {
        match self {
            ArgValue::String(s) => fluent_bundle::FluentValue::from(s.as_str()),
            ArgValue::Number(n) => fluent_bundle::FluentValue::from(*n),
        }
    }
}

impl std::fmt::Display for ArgValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgValue::String(s) => write!(f, "{}", s),
            ArgValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for ArgValue {
    fn from(s: String) -> Self {
        ArgValue::String(s)
    }
}

impl From<&str> for ArgValue {
    fn from(s: &str) -> Self {
        ArgValue::String(s.to_string())
    }
}

impl From<f64> for ArgValue {
    fn from(n: f64) -> Self {
        ArgValue::Number(n)
    }
}

impl From<f32> for ArgValue {
    fn from(n: f32) -> Self {
        ArgValue::Number(f64::from(n))
    }
}

impl From<i32> for ArgValue {
    fn from(n: i32) -> Self {
        ArgValue::Number(f64::from(n))
    }
}

impl From<u32> for ArgValue {
    fn from(n: u32) -> Self {
        ArgValue::Number(f64::from(n))
    }
}

impl From<i64> for ArgValue {
    fn from(n: i64) -> Self {
        ArgValue::Number(n as f64)
    }
}

impl From<usize> for ArgValue {
    fn from(n: usize) -> Self {
        ArgValue::Number(n as f64)
    }
}

/// Build an [`Args`] map.
///
/// ```
/// use lingo_i18n::{ArgValue, l10n_args};
///
/// let args = l10n_args! { "username" => "John", "count" => 3 };
/// assert_eq!(args["count"], ArgValue::Number(3.0));
/// ```
#[macro_export]
macro_rules! l10n_args {
    () => {
        $crate::Args::new()
    };
    ($($name:expr => $value:expr),+ $(,)?) => {{
        let mut args = $crate::Args::new();
        $(
            args.insert(::std::string::String::from($name), $crate::ArgValue::from($value));
        )+
        args
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_resource;
    use std::path::Path;

    const SOURCE: &str = r#"
hello = Hello, World!
greeting = Hello, { $username }!
    .title = Greeting for { $username }
    .short = Hi
emails = { $count ->
    [one] You have one email.
   *[other] You have { $count } emails.
}
-brand = Lingo
about = About { -brand }
attrs-only =
    .label = Label only
"#;

    fn bundle() -> CatalogBundle {
        let mut bundle = CatalogBundle::new("en").unwrap();
        bundle.set_use_isolating(false);
        bundle.add_resource(parse_resource(SOURCE.to_string(), Path::new("<test>"), "en"));
        bundle
    }

    #[test]
    fn test_split_key() {
        assert_eq!(split_key("hello").unwrap(), ("hello", None));
        assert_eq!(split_key("hello.title").unwrap(), ("hello", Some("title")));
        assert_eq!(split_key("hello.").unwrap(), ("hello", Some("")));
        assert!(split_key("a.b.c").unwrap_err().is_usage());
    }

    #[test]
    fn test_simple_message() {
        let lookup = bundle().lookup("hello", None).unwrap();
        assert_eq!(lookup, Lookup::Found("Hello, World!".to_string()));
    }

    #[test]
    fn test_message_with_args() {
        let args = l10n_args! { "username" => "John" };
        let lookup = bundle().lookup("greeting", Some(&args)).unwrap();
        assert_eq!(lookup, Lookup::Found("Hello, John!".to_string()));
    }

    #[test]
    fn test_attribute() {
        let bundle = bundle();
        let lookup = bundle.lookup("greeting.short", None).unwrap();
        assert_eq!(lookup, Lookup::Found("Hi".to_string()));

        let args = l10n_args! { "username" => "Ann" };
        let lookup = bundle.lookup("greeting.title", Some(&args)).unwrap();
        assert_eq!(lookup, Lookup::Found("Greeting for Ann".to_string()));
    }

    #[test]
    fn test_missing_message_and_attribute() {
        let bundle = bundle();
        assert_eq!(bundle.lookup("nope", None).unwrap(), Lookup::MissingMessage);
        assert_eq!(bundle.lookup("nope.title", None).unwrap(), Lookup::MissingMessage);
        assert_eq!(
            bundle.lookup("greeting.missing_attr", None).unwrap(),
            Lookup::MissingAttribute
        );
    }

    #[test]
    fn test_message_without_value() {
        let bundle = bundle();
        assert_eq!(bundle.lookup("attrs-only", None).unwrap(), Lookup::MissingValue);
        assert_eq!(
            bundle.lookup("attrs-only.label", None).unwrap(),
            Lookup::Found("Label only".to_string())
        );
    }

    #[test]
    fn test_format_error_on_missing_arg() {
        let lookup = bundle().lookup("greeting", None).unwrap();
        assert!(!lookup.is_found());
        assert!(matches!(lookup, Lookup::FormatError(ref errors) if !errors.is_empty()));
        assert_eq!(lookup.into_text("greeting"), "greeting");
    }

    #[test]
    fn test_plural_selection() {
        let bundle = bundle();
        let one = bundle.lookup("emails", Some(&l10n_args! { "count" => 1 })).unwrap();
        assert_eq!(one, Lookup::Found("You have one email.".to_string()));

        let many = bundle.lookup("emails", Some(&l10n_args! { "count" => 5 })).unwrap();
        assert_eq!(many, Lookup::Found("You have 5 emails.".to_string()));
    }

    #[test]
    fn test_term_reference() {
        let lookup = bundle().lookup("about", None).unwrap();
        assert_eq!(lookup, Lookup::Found("About Lingo".to_string()));
    }

    #[test]
    fn test_has_message() {
        let bundle = bundle();
        assert!(bundle.has_message("hello"));
        assert!(bundle.has_message("greeting.title"));
        assert!(!bundle.has_message("greeting.nope"));
        assert!(!bundle.has_message("attrs-only"));
        assert!(!bundle.has_message("a.b.c"));
    }

    #[test]
    fn test_first_definition_wins() {
        let mut bundle = bundle();
        bundle.add_resource(
            parse_resource(
                "hello = Overridden\nnew-one = New".to_string(),
                Path::new("<test>"),
                "en",
            ),
        );
        assert_eq!(
            bundle.lookup("hello", None).unwrap(),
            Lookup::Found("Hello, World!".to_string())
        );
        assert_eq!(
            bundle.lookup("new-one", None).unwrap(),
            Lookup::Found("New".to_string())
        );
    }

    #[test]
    fn test_isolation_marks_by_default() {
        let mut bundle = CatalogBundle::new("en").unwrap();
        bundle.add_resource(parse_resource(SOURCE.to_string(), Path::new("<test>"), "en"));
        let args = l10n_args! { "username" => "John" };
        let text = bundle
            .lookup("greeting", Some(&args))
            .unwrap()
            .into_text("greeting");
        assert_eq!(text, "Hello, \u{2068}John\u{2069}!");
    }

    #[test]
    fn test_number_function() {
        let mut bundle = CatalogBundle::new("en").unwrap();
        bundle.set_use_isolating(false);
        bundle.add_resource(parse_resource(
            r#"
price = Total: { NUMBER($amount, minimumFractionDigits: 2) }
ratio = { NUMBER($value, maximumFractionDigits: 1) }
plain = { NUMBER($value) }
items = { NUMBER($count) ->
    [one] One item
   *[other] { $count } items
}
"#
            .to_string(),
            Path::new("<test>"),
            "en",
        ));

        let lookup = bundle.lookup("price", Some(&l10n_args! { "amount" => 3 })).unwrap();
        assert_eq!(lookup, Lookup::Found("Total: 3.00".to_string()));

        let lookup = bundle.lookup("ratio", Some(&l10n_args! { "value" => 2.46 })).unwrap();
        assert_eq!(lookup, Lookup::Found("2.5".to_string()));

        let lookup = bundle.lookup("plain", Some(&l10n_args! { "value" => "7" })).unwrap();
        assert_eq!(lookup, Lookup::Found("7".to_string()));

        let one = bundle.lookup("items", Some(&l10n_args! { "count" => 1 })).unwrap();
        assert_eq!(one, Lookup::Found("One item".to_string()));
        let many = bundle.lookup("items", Some(&l10n_args! { "count" => 3 })).unwrap();
        assert!(many.is_found());
        assert_eq!(many.into_text("items"), "3 items");
    }

    #[test]
    fn test_invalid_locale() {
        assert!(matches!(
            CatalogBundle::new("not a locale!"),
            Err(I18nError::InvalidLocale(_))
        ));
    }

    #[test]
    fn test_arg_value_deserialize() {
        let args: Args = serde_json::from_str(r#"{"name": "Ann", "count": 2}"#).unwrap();
        assert_eq!(args["name"], ArgValue::String("Ann".to_string()));
        assert_eq!(args["count"], ArgValue::Number(2.0));
    }
}
