//! Token classification.
//!
//! A single left-to-right pass over the tokens:
//!
//! - `--name` is a long flag.
//! - `-xyz` is a cluster of short flags, each resolved through the
//!   short-flag table.
//! - anything else (including `""`) is positional.
//!
//! A flag whose long name is in the value-flags set consumes the next whole
//! token as its value. Inside a cluster every value flag takes the next
//! unconsumed token in turn, so `-fb red green` gives `f` the value `red`
//! and `b` the value `green`. Values are never attached inline
//! (`-fred`, `--foo=red`).

use std::collections::{BTreeMap, HashMap, HashSet};
use std::ffi::OsString;

use tracing::{debug, trace};

use crate::arguments::Arguments;
use crate::error::ParseError;
use crate::types::FlagValue;

/// Parses `tokens` into positional arguments and flags.
///
/// `short_flags` maps each short flag character to its long name;
/// `value_flags` lists the long names that take a value. When a flag
/// repeats, the last occurrence wins.
///
/// # Errors
///
/// - [`ParseError::UnknownShortFlag`] if a character in a `-xyz` token is
///   not in `short_flags`. Negative numbers such as `-5` are short flags
///   too, so they fail the same way unless mapped.
/// - [`ParseError::MissingValue`] if a value flag is the last token.
///
/// # Examples
///
/// ```
/// use std::collections::{HashMap, HashSet};
/// use tinyopt_core::{FlagValue, parse};
///
/// let short_flags = HashMap::from([
///     ('f', "foo".to_string()),
///     ('b', "bar".to_string()),
///     ('B', "baz".to_string()),
/// ]);
/// let value_flags = HashSet::from(["foo".to_string(), "bar".to_string()]);
///
/// let args = parse(
///     ["one", "--qux", "two", "-fB", "red", "three", "--bar", "green", "four"],
///     &short_flags,
///     &value_flags,
/// )
/// .unwrap();
///
/// assert_eq!(args.positional(), ["one", "two", "three", "four"]);
/// assert_eq!(args.flags()["foo"], FlagValue::Value("red".into()));
/// assert_eq!(args.flags()["baz"], FlagValue::NoValue);
/// ```
pub fn parse<I, S>(
    tokens: I,
    short_flags: &HashMap<char, String>,
    value_flags: &HashSet<String>,
) -> Result<Arguments, ParseError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut tokens = tokens.into_iter().map(Into::<String>::into);
    let mut positional = Vec::new();
    let mut flags = BTreeMap::new();

    while let Some(token) = tokens.next() {
        if let Some(name) = token.strip_prefix("--") {
            let value = take_value(name, value_flags, &mut tokens)?;
            record(&mut flags, name, value);
        } else if let Some(cluster) = token.strip_prefix('-') {
            for short in cluster.chars() {
                let Some(name) = short_flags.get(&short) else {
                    debug!(flag = %short, "Unknown short flag");
                    return Err(ParseError::UnknownShortFlag(short));
                };
                let value = take_value(name, value_flags, &mut tokens)?;
                record(&mut flags, name, value);
            }
        } else {
            positional.push(token);
        }
    }

    debug!(
        positional = positional.len(),
        flags = flags.len(),
        "Parsed arguments"
    );
    Ok(Arguments::new(positional, flags))
}

fn take_value(
    name: &str,
    value_flags: &HashSet<String>,
    tokens: &mut impl Iterator<Item = String>,
) -> Result<FlagValue, ParseError> {
    if !value_flags.contains(name) {
        return Ok(FlagValue::NoValue);
    }
    match tokens.next() {
        Some(value) => Ok(FlagValue::Value(value)),
        None => {
            debug!(flag = %name, "Value flag is the last token");
            Err(ParseError::MissingValue {
                flag: name.to_string(),
            })
        }
    }
}

fn record(flags: &mut BTreeMap<String, FlagValue>, name: &str, value: FlagValue) {
    trace!(flag = %name, value = ?value, "Recorded flag");
    flags.insert(name.to_string(), value);
}

/// Owned short-flag table and value-flags set, reusable across parses.
///
/// # Examples
///
/// ```
/// use tinyopt_core::Parser;
///
/// let parser = Parser::new()
///     .short('w', "weekdays")
///     .short('f', "format")
///     .takes_value("format");
///
/// let args = parser.parse(["2019-04-01", "-wf", "%d/%m/%Y"]).unwrap();
/// assert_eq!(args.at(0).unwrap(), "2019-04-01");
/// assert!(args.has("weekdays"));
/// assert_eq!(args.get("format").unwrap(), "%d/%m/%Y");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parser {
    short_flags: HashMap<char, String>,
    value_flags: HashSet<String>,
}

impl Parser {
    /// Creates a parser with empty tables.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser from existing tables.
    pub fn with_tables(
        short_flags: HashMap<char, String>,
        value_flags: HashSet<String>,
    ) -> Self {
        Self {
            short_flags,
            value_flags,
        }
    }

    /// Maps short flag `short` to long name `long`.
    pub fn short(mut self, short: char, long: impl Into<String>) -> Self {
        self.short_flags.insert(short, long.into());
        self
    }

    /// Marks long name `long` as taking a value.
    pub fn takes_value(mut self, long: impl Into<String>) -> Self {
        self.value_flags.insert(long.into());
        self
    }

    /// The short-flag table.
    pub fn short_flags(&self) -> &HashMap<char, String> {
        &self.short_flags
    }

    /// The value-flags set.
    pub fn value_flags(&self) -> &HashSet<String> {
        &self.value_flags
    }

    /// Parses `tokens` with this parser's tables. See [`parse`].
    ///
    /// # Errors
    ///
    /// Same as [`parse`].
    pub fn parse<I, S>(&self, tokens: I) -> Result<Arguments, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        parse(tokens, &self.short_flags, &self.value_flags)
    }

    /// Parses platform strings, such as those from [`std::env::args_os`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUnicode`] for the first token that is not
    /// valid Unicode, before any parsing happens. Otherwise same as
    /// [`parse`].
    pub fn parse_os<I>(&self, tokens: I) -> Result<Arguments, ParseError>
    where
        I: IntoIterator<Item = OsString>,
    {
        let tokens = tokens
            .into_iter()
            .map(|token| {
                token.into_string().map_err(|token| {
                    debug!(token = ?token, "Argument is not valid Unicode");
                    ParseError::InvalidUnicode(token)
                })
            })
            .collect::<Result<Vec<String>, _>>()?;
        self.parse(tokens)
    }

    /// Parses the current process arguments, skipping the program name.
    ///
    /// # Errors
    ///
    /// Same as [`parse_os`](Self::parse_os).
    pub fn parse_env(&self) -> Result<Arguments, ParseError> {
        self.parse_os(std::env::args_os().skip(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn foo_bar_baz() -> HashMap<char, String> {
        HashMap::from([
            ('f', "foo".to_string()),
            ('b', "bar".to_string()),
            ('B', "baz".to_string()),
        ])
    }

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn no_values(names: &[&str]) -> BTreeMap<String, FlagValue> {
        names
            .iter()
            .map(|s| (s.to_string(), FlagValue::NoValue))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let args = parse(Vec::<String>::new(), &HashMap::new(), &HashSet::new()).unwrap();

        assert!(args.positional().is_empty());
        assert!(args.flags().is_empty());
    }

    #[test]
    fn test_short_flags_separately() {
        let args = parse(["-f", "-b", "-B"], &foo_bar_baz(), &HashSet::new()).unwrap();

        assert!(args.positional().is_empty());
        assert_eq!(args.flags(), &no_values(&["foo", "bar", "baz"]));
    }

    #[test]
    fn test_long_flags_with_values() {
        let args = parse(
            ["--foo", "red", "--bar", "green", "--baz", "blue"],
            &HashMap::new(),
            &set(&["foo", "bar", "baz"]),
        )
        .unwrap();

        assert!(args.positional().is_empty());
        assert_eq!(args.get("foo"), Ok("red"));
        assert_eq!(args.get("bar"), Ok("green"));
        assert_eq!(args.get("baz"), Ok("blue"));
    }

    #[test]
    fn test_short_flags_with_values() {
        let args = parse(
            ["-f", "red", "-b", "green", "-B", "blue"],
            &foo_bar_baz(),
            &set(&["foo", "bar", "baz"]),
        )
        .unwrap();

        assert!(args.positional().is_empty());
        assert_eq!(args.get("foo"), Ok("red"));
        assert_eq!(args.get("bar"), Ok("green"));
        assert_eq!(args.get("baz"), Ok("blue"));
    }

    #[test]
    fn test_value_is_taken_verbatim() {
        let args = parse(["--foo", "--bar"], &HashMap::new(), &set(&["foo"])).unwrap();

        assert_eq!(args.get("foo"), Ok("--bar"));
        assert!(!args.has("bar"));
    }

    #[test]
    fn test_unknown_short_flag() {
        let err = parse(["-fx"], &foo_bar_baz(), &HashSet::new()).unwrap_err();
        assert_eq!(err, ParseError::UnknownShortFlag('x'));

        let err = parse(["-5"], &foo_bar_baz(), &HashSet::new()).unwrap_err();
        assert_eq!(err, ParseError::UnknownShortFlag('5'));
    }

    #[test]
    fn test_missing_value() {
        let err = parse(["--foo"], &HashMap::new(), &set(&["foo"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingValue {
                flag: "foo".to_string()
            }
        );

        let err = parse(["-fb", "red"], &foo_bar_baz(), &set(&["foo", "bar"])).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingValue {
                flag: "bar".to_string()
            }
        );
    }

    #[test]
    fn test_degenerate_dash_tokens() {
        let args = parse(["-", "--", ""], &HashMap::new(), &HashSet::new()).unwrap();

        assert_eq!(args.positional(), [""]);
        assert_eq!(args.flags(), &no_values(&[""]));
    }

    #[test]
    fn test_repeated_flag_last_wins() {
        let args = parse(
            ["--foo", "red", "-f", "blue"],
            &foo_bar_baz(),
            &set(&["foo"]),
        )
        .unwrap();

        assert_eq!(args.get("foo"), Ok("blue"));
        assert_eq!(args.flags().len(), 1);
    }

    #[test]
    fn test_parse_os_accepts_unicode() {
        let parser = Parser::new().short('f', "format").takes_value("format");
        let tokens = ["día", "-f", "%d/%m"].map(OsString::from);

        let args = parser.parse_os(tokens).unwrap();
        assert_eq!(args.positional(), ["día"]);
        assert_eq!(args.get("format"), Ok("%d/%m"));
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_os_rejects_invalid_unicode() {
        use std::os::unix::ffi::OsStringExt;

        let bad = OsString::from_vec(vec![b'a', 0xff]);
        let tokens = vec![OsString::from("--verbose"), bad.clone()];

        assert_eq!(
            Parser::new().parse_os(tokens),
            Err(ParseError::InvalidUnicode(bad))
        );
    }

    #[test]
    fn test_parser_with_tables_matches_builder() {
        let parser = Parser::with_tables(foo_bar_baz(), set(&["foo"]));
        let built = Parser::new()
            .short('f', "foo")
            .short('b', "bar")
            .short('B', "baz")
            .takes_value("foo");

        assert_eq!(parser, built);
        assert_eq!(parser.parse(["-bf", "red"]).unwrap().get("foo"), Ok("red"));
    }

    #[test]
    fn test_parser_builder_matches_free_function() {
        let parser = Parser::new()
            .short('f', "foo")
            .short('b', "bar")
            .short('B', "baz")
            .takes_value("foo");
        let tokens = ["-fbB", "red", "one"];

        assert_eq!(
            parser.parse(tokens),
            parse(tokens, &foo_bar_baz(), &set(&["foo"]))
        );
        assert_eq!(parser.short_flags(), &foo_bar_baz());
        assert_eq!(parser.value_flags(), &set(&["foo"]));
    }
}
