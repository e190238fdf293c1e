/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! The owned value type produced by loading, and the core
//! schema resolution of plain scalars: null, booleans,
//! integers (decimal, octal `0o`, hex `0x`) and floats,
//! with everything else a string. Quoted scalars never
//! resolve to anything but strings.

use atoi::atoi;

use crate::{
    error::{
        internal::{self, ErrorCode, SourceError},
        Error, Result,
    },
    event::types::ScalarStyle,
    node::{Document, Node, NodeId, Tree},
};

/// An owned, schema resolved YAML value.
///
/// Mappings preserve entry order; keys may be any value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value
{
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Sequence(Vec<Value>),
    Mapping(Vec<(Value, Value)>),
}

impl Value
{
    pub fn as_str(&self) -> Option<&str>
    {
        match self
        {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64>
    {
        match self
        {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&Vec<Value>>
    {
        match self
        {
            Value::Sequence(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Vec<(Value, Value)>>
    {
        match self
        {
            Value::Mapping(m) => Some(m),
            _ => None,
        }
    }

    /// Index into a mapping by string key.
    pub fn get(&self, key: &str) -> Option<&Value>
    {
        match self
        {
            Value::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| matches!(k, Value::Str(s) if s == key))
                .map(|(_, v)| v),
            _ => None,
        }
    }
}

/// Conversion controls threaded down from the load options.
#[derive(Debug, Clone)]
pub(crate) struct Resolver
{
    /// Underscored numbers resolve as strings when set
    pub strict_integer: bool,
    /// Allow-list of application tags; None permits all
    pub permitted_tags: Option<Vec<String>>,
}

impl Resolver
{
    pub fn permissive() -> Self
    {
        Self {
            strict_integer: false,
            permitted_tags: None,
        }
    }

    /// Convert the (sub)tree rooted at .id into an owned
    /// value. Cycles through shared alias targets are
    /// reported as alias errors, since an owned value
    /// cannot represent them.
    pub fn to_value(&self, tree: &Tree<'_>, id: NodeId) -> Result<Value>
    {
        let mut in_progress = Vec::new();

        self.convert(tree, id, &mut in_progress)
    }

    pub fn document_value(&self, document: &Document<'_>) -> Result<Option<Value>>
    {
        match document.root()
        {
            Some(root) => self.to_value(document.tree(), root).map(Some),
            None => Ok(None),
        }
    }

    fn convert(&self, tree: &Tree<'_>, id: NodeId, in_progress: &mut Vec<NodeId>) -> Result<Value>
    {
        if in_progress.contains(&id)
        {
            return Err(Error::new(internal::Error::new(SourceError::BadAlias(
                "cyclic reference cannot become an owned value".into(),
            ))));
        }

        let node = match tree.get(id)
        {
            Some(node) => node,
            None =>
            {
                return Err(Error::new(internal::Error::new(SourceError::Internal(
                    "value conversion hit an id outside the tree",
                ))));
            },
        };

        self.check_tag(node.tag().map(AsRef::as_ref))?;

        match node
        {
            Node::Scalar(scalar) => Ok(self.scalar_value(
                &scalar.value,
                scalar.style,
                scalar.tag.as_deref(),
            )?),
            Node::Sequence(sequence) =>
            {
                in_progress.push(id);

                let mut children = Vec::with_capacity(sequence.children.len());

                for child in &sequence.children
                {
                    children.push(self.convert(tree, *child, in_progress)?);
                }

                in_progress.pop();

                Ok(Value::Sequence(children))
            },
            Node::Mapping(mapping) =>
            {
                in_progress.push(id);

                let mut entries = Vec::with_capacity(mapping.entries.len());

                for (key, value) in &mapping.entries
                {
                    let key = self.convert(tree, *key, in_progress)?;
                    let value = self.convert(tree, *value, in_progress)?;

                    entries.push((key, value));
                }

                in_progress.pop();

                Ok(Value::Mapping(entries))
            },
            // Resolved aliases share their target's id and never
            // reach here; an alias node means resolution was
            // disabled, so using it as data is refused
            Node::Alias(alias) => Err(Error::new(internal::Error::new(SourceError::BadAlias(
                alias.name.clone().into_owned(),
            )))),
        }
    }

    fn check_tag(&self, tag: Option<&str>) -> Result<()>
    {
        let tag = match tag
        {
            Some(tag) => tag,
            None => return Ok(()),
        };

        // Core tags and the non-specific `!` are always fine;
        // application tags go through the allow-list
        if tag == "!" || tag.starts_with("tag:yaml.org,2002:")
        {
            return Ok(());
        }

        match &self.permitted_tags
        {
            None => Ok(()),
            Some(permitted) if permitted.iter().any(|p| p == tag) => Ok(()),
            Some(_) => Err(Error::new(internal::Error::new(
                SourceError::DisallowedTag(tag.to_string()),
            ))),
        }
    }

    /// Resolve one scalar against the core schema, honoring
    /// an explicit core tag when present.
    fn scalar_value(&self, text: &str, style: ScalarStyle, tag: Option<&str>) -> Result<Value>
    {
        match tag
        {
            Some("tag:yaml.org,2002:str") => return Ok(Value::Str(text.to_string())),
            Some("tag:yaml.org,2002:null") => return Ok(Value::Null),
            Some("tag:yaml.org,2002:bool") =>
            {
                if let Some(value) = resolve_bool(text)
                {
                    return Ok(value);
                }
            },
            Some("tag:yaml.org,2002:int") =>
            {
                if let Some(value) = resolve_int(text, self.strict_integer)
                {
                    return Ok(value);
                }

                return Err(Error::new(internal::Error::new(ErrorCode::IntOverflow)));
            },
            Some("tag:yaml.org,2002:float") =>
            {
                if let Some(value) = resolve_float(text)
                {
                    return Ok(value);
                }
            },
            _ => (),
        }

        // Only untagged plain scalars resolve implicitly
        if style != ScalarStyle::Plain || (tag.is_some() && tag != Some("!"))
        {
            return Ok(Value::Str(text.to_string()));
        }

        if tag == Some("!")
        {
            // The non-specific tag pins the scalar to a string
            return Ok(Value::Str(text.to_string()));
        }

        Ok(resolve_plain(text, self.strict_integer))
    }
}

/// Core schema resolution of an untagged plain scalar.
pub(crate) fn resolve_plain(text: &str, strict_integer: bool) -> Value
{
    if matches!(text, "" | "~" | "null" | "Null" | "NULL")
    {
        return Value::Null;
    }

    if let Some(value) = resolve_bool(text)
    {
        return value;
    }

    if let Some(value) = resolve_int(text, strict_integer)
    {
        return value;
    }

    if let Some(value) = resolve_float(text)
    {
        return value;
    }

    Value::Str(text.to_string())
}

fn resolve_bool(text: &str) -> Option<Value>
{
    match text
    {
        "true" | "True" | "TRUE" => Some(Value::Bool(true)),
        "false" | "False" | "FALSE" => Some(Value::Bool(false)),
        _ => None,
    }
}

fn resolve_int(text: &str, strict: bool) -> Option<Value>
{
    let (negative, digits) = match text.as_bytes()
    {
        [b'-', rest @ ..] => (true, rest),
        [b'+', rest @ ..] => (false, rest),
        rest => (false, rest),
    };

    if let Some(hex) = digits.strip_prefix(b"0x")
    {
        if negative || hex.is_empty() || !hex.iter().all(u8::is_ascii_hexdigit)
        {
            return None;
        }

        return i64::from_str_radix(std::str::from_utf8(hex).ok()?, 16)
            .ok()
            .map(Value::Int);
    }

    if let Some(oct) = digits.strip_prefix(b"0o")
    {
        if negative || oct.is_empty() || !oct.iter().all(|b| (b'0'..=b'7').contains(b))
        {
            return None;
        }

        return i64::from_str_radix(std::str::from_utf8(oct).ok()?, 8)
            .ok()
            .map(Value::Int);
    }

    let cleaned: Vec<u8>;
    let digits = match (strict, digits.contains(&b'_'))
    {
        (true, true) => return None,
        (false, true) =>
        {
            // Underscore separators are cosmetic outside strict
            // mode, unless they begin or end the number
            if digits.first() == Some(&b'_') || digits.last() == Some(&b'_')
            {
                return None;
            }

            cleaned = digits
                .iter()
                .copied()
                .filter(|b| *b != b'_')
                .collect();

            &cleaned[..]
        },
        (_, false) => digits,
    };

    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit)
    {
        return None;
    }

    let magnitude: i64 = atoi(digits)?;

    Some(Value::Int(match negative
    {
        true => -magnitude,
        false => magnitude,
    }))
}

fn resolve_float(text: &str) -> Option<Value>
{
    match text
    {
        ".inf" | ".Inf" | ".INF" | "+.inf" | "+.Inf" | "+.INF" =>
        {
            return Some(Value::Float(f64::INFINITY));
        },
        "-.inf" | "-.Inf" | "-.INF" => return Some(Value::Float(f64::NEG_INFINITY)),
        ".nan" | ".NaN" | ".NAN" => return Some(Value::Float(f64::NAN)),
        _ => (),
    }

    // Delegate the general shape to the standard parser, but
    // reject spellings the core schema does not allow
    let stripped = text
        .strip_prefix('-')
        .or_else(|| text.strip_prefix('+'))
        .unwrap_or(text);

    if stripped.is_empty()
        || !stripped.contains(&['.', 'e', 'E'][..])
        || !stripped
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '-' | '+'))
    {
        return None;
    }

    if !stripped.chars().next().map_or(false, |c| c.is_ascii_digit() || c == '.')
    {
        return None;
    }

    text.parse::<f64>().ok().map(Value::Float)
}

#[cfg(test)]
mod tests
{
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn null_spellings()
    {
        for text in ["", "~", "null", "Null", "NULL"]
        {
            assert_eq!(resolve_plain(text, false), Value::Null, "{:?}", text);
        }
    }

    #[test]
    fn bool_spellings()
    {
        assert_eq!(resolve_plain("true", false), Value::Bool(true));
        assert_eq!(resolve_plain("FALSE", false), Value::Bool(false));

        // 1.1 style spellings stay strings in the core schema
        assert_eq!(resolve_plain("yes", false), Value::Str("yes".into()));
        assert_eq!(resolve_plain("off", false), Value::Str("off".into()));
    }

    #[test]
    fn integers()
    {
        assert_eq!(resolve_plain("0", false), Value::Int(0));
        assert_eq!(resolve_plain("42", false), Value::Int(42));
        assert_eq!(resolve_plain("-17", false), Value::Int(-17));
        assert_eq!(resolve_plain("+8", false), Value::Int(8));
        assert_eq!(resolve_plain("0x1F", false), Value::Int(31));
        assert_eq!(resolve_plain("0o17", false), Value::Int(15));
    }

    #[test]
    fn underscored_integers_depend_on_strictness()
    {
        assert_eq!(resolve_plain("1_000", false), Value::Int(1000));
        assert_eq!(resolve_plain("1_000", true), Value::Str("1_000".into()));
        assert_eq!(resolve_plain("_1", false), Value::Str("_1".into()));
    }

    #[test]
    fn floats()
    {
        assert_eq!(resolve_plain("1.5", false), Value::Float(1.5));
        assert_eq!(resolve_plain("-0.5", false), Value::Float(-0.5));
        assert_eq!(resolve_plain("1e3", false), Value::Float(1000.0));
        assert_eq!(resolve_plain(".5", false), Value::Float(0.5));
        assert_eq!(
            resolve_plain("-.inf", false),
            Value::Float(f64::NEG_INFINITY)
        );

        match resolve_plain(".nan", false)
        {
            Value::Float(f) => assert!(f.is_nan()),
            other => panic!("expected a float, got {:?}", other),
        }
    }

    #[test]
    fn strings()
    {
        assert_eq!(resolve_plain("hello", false), Value::Str("hello".into()));
        assert_eq!(resolve_plain("12ab", false), Value::Str("12ab".into()));
        assert_eq!(resolve_plain("1.2.3", false), Value::Str("1.2.3".into()));
        assert_eq!(resolve_plain("0x", false), Value::Str("0x".into()));
    }
}
