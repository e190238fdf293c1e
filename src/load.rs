/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! High level entry points: parse a source into document
//! trees, or load it all the way to owned values.

use crate::{
    error::{internal, Error, Result},
    event::{
        flag::{Flags, O_COMMENTS, O_NIL},
        parse_events_with,
    },
    node::{Document, TreeBuilder},
    value::{Resolver, Value},
};

/// Options for [`parse_with`] and [`parse_stream`].
#[derive(Debug, Clone, Default)]
pub struct ParseOptions
{
    /// Collect comments and attach them to the tree
    pub comments: bool,
    /// Resolve aliases to their anchored nodes instead of
    /// keeping alias nodes
    pub aliases:  bool,
    /// Stream name reported in errors
    pub filename: Option<String>,
}

/// Options for [`load_with`] and [`load_stream`].
#[derive(Debug, Clone)]
pub struct LoadOptions
{
    /// Resolve aliases; disabled, any alias is an error
    pub aliases:        bool,
    /// Refuse underscored integers
    pub strict_integer: bool,
    /// Collect comments during the parse
    pub comments:       bool,
    /// Allow-list of application tags; None permits all
    pub permitted_tags: Option<Vec<String>>,
    /// Returned when the stream holds no document
    pub fallback:       Option<Value>,
    /// Stream name reported in errors
    pub filename:       Option<String>,
}

impl Default for LoadOptions
{
    fn default() -> Self
    {
        Self {
            aliases:        true,
            strict_integer: false,
            comments:       false,
            permitted_tags: None,
            fallback:       None,
            filename:       None,
        }
    }
}

impl LoadOptions
{
    fn flags(&self) -> Flags
    {
        match self.comments
        {
            true => O_COMMENTS,
            false => O_NIL,
        }
    }

    fn resolver(&self) -> Resolver
    {
        Resolver {
            strict_integer: self.strict_integer,
            permitted_tags: self.permitted_tags.clone(),
        }
    }
}

/// Parse .source into the first document's tree, or None
/// for an empty stream.
///
/// Aliases stay in the tree as alias nodes; see
/// [`ParseOptions::aliases`] to resolve them instead.
///
/// ## Examples
///
/// ```rust
/// let document = yodel::parse("a: 1\n")?.expect("one document");
///
/// assert!(document.root().is_some());
/// # Ok::<(), yodel::error::Error>(())
/// ```
pub fn parse(source: &str) -> Result<Option<Document<'_>>>
{
    parse_with(source, &ParseOptions::default())
}

/// Parse .source into the first document's tree with the
/// given options.
pub fn parse_with<'de>(source: &'de str, options: &ParseOptions)
    -> Result<Option<Document<'de>>>
{
    parse_stream(source, options).map(|documents| documents.into_iter().next())
}

/// Parse every document in .source.
pub fn parse_stream<'de>(source: &'de str, options: &ParseOptions)
    -> Result<Vec<Document<'de>>>
{
    let flags = match options.comments
    {
        true => O_COMMENTS,
        false => O_NIL,
    };

    let mut builder = TreeBuilder::new(options.aliases);

    parse_events_with(source, flags, &mut builder)
        .map_err(|e| e.with_filename(options.filename.as_deref()))?;

    Ok(builder.into_documents())
}

/// Load the first document of .source as an owned value.
///
/// Aliases are resolved, all tags are permitted, and
/// underscored integers are accepted; use [`safe_load`] for
/// the restricted profile or [`load_with`] for full
/// control.
///
/// ## Examples
///
/// ```rust
/// use yodel::Value;
///
/// let value = yodel::load("{a: 1}")?.expect("one document");
///
/// assert_eq!(value.get("a"), Some(&Value::Int(1)));
/// # Ok::<(), yodel::error::Error>(())
/// ```
pub fn load(source: &str) -> Result<Option<Value>>
{
    load_with(source, &LoadOptions::default())
}

/// Load with an allow-list: only core schema types and the
/// listed application tags are permitted, and aliases are
/// refused.
pub fn safe_load(source: &str, permitted_tags: &[&str]) -> Result<Option<Value>>
{
    load_with(
        source,
        &LoadOptions {
            aliases: false,
            permitted_tags: Some(permitted_tags.iter().map(|s| s.to_string()).collect()),
            ..LoadOptions::default()
        },
    )
}

/// Load without any restriction. Present for parity with
/// the safe variant; equivalent to [`load`].
pub fn unsafe_load(source: &str) -> Result<Option<Value>>
{
    load(source)
}

/// Load the first document of .source with the given
/// options.
pub fn load_with(source: &str, options: &LoadOptions) -> Result<Option<Value>>
{
    let mut values = load_all(source, options)?;

    match values.is_empty()
    {
        true => Ok(options.fallback.clone()),
        false => Ok(Some(values.remove(0))),
    }
}

/// Load every document of .source as owned values.
pub fn load_stream(source: &str) -> Result<Vec<Value>>
{
    load_all(source, &LoadOptions::default())
}

fn load_all(source: &str, options: &LoadOptions) -> Result<Vec<Value>>
{
    let mut builder = TreeBuilder::new(options.aliases);

    parse_events_with(source, options.flags(), &mut builder)
        .map_err(|e| e.with_filename(options.filename.as_deref()))?;

    let resolver = options.resolver();
    let mut values = Vec::new();

    for document in builder.into_documents()
    {
        if let Some(value) = resolver
            .document_value(&document)
            .map_err(|e| e.with_filename(options.filename.as_deref()))?
        {
            values.push(value);
        }
    }

    Ok(values)
}

/// Load from raw bytes, rejecting non UTF-8 input with a
/// [`Category::Data`](crate::error::Category::Data) error.
pub fn load_bytes(source: &[u8]) -> Result<Option<Value>>
{
    let source = std::str::from_utf8(source)
        .map_err(|e| Error::new(internal::Error::new(internal::SourceError::from(e))))?;

    load(source)
}
