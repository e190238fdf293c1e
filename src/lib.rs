/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This library is a pure Rust YAML 1.2 processor built
//! around three layers:
//!
//! 1. An event layer ([`event`]) which parses a UTF-8
//!    buffer into a linear stream of structural events,
//!    each annotated with its byte precise source location,
//!    and optionally interleaved with comment records.
//!
//! 2. A node layer ([`node`]) which consumes events into a
//!    document tree, resolving aliases against anchors and
//!    attaching collected comments to the nearest node.
//!
//! 3. An emit layer ([`emit`]) which serialises values or
//!    parsed documents back into YAML text, reusing anchors
//!    for repeated nodes and replaying comments.
//!
//! The high level entry points ([`parse`], [`load`],
//! [`load_stream`], [`dump`] and friends) are re-exported
//! at the crate root.

#![allow(dead_code)]
#![allow(clippy::suspicious_else_formatting)]

pub mod emit;
pub mod error;
pub mod event;
pub mod node;

mod cursor;
mod load;
mod source;
mod value;

pub use crate::{
    emit::{
        dump, dump_document, dump_document_with, dump_stream, dump_with, safe_dump_document,
        DumpOptions,
    },
    load::{
        load, load_bytes, load_stream, load_with, parse, parse_stream, parse_with, safe_load,
        unsafe_load, LoadOptions, ParseOptions,
    },
    source::{Location, Source},
    value::Value,
};
