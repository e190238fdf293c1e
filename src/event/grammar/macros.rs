/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

//! This module contains the combinator macros driving the
//! grammar engine.
//!
//! Every production is a method on the parser returning
//! `Result<bool>`, where `Ok(false)` is a soft failure the
//! caller may backtrack from, and `Err(_)` aborts the whole
//! parse. The macros below handle the save/restore dance so
//! productions stay linear.
//!
//! Keep macro bodies to plain method calls; a `return`
//! inside one would return from the enclosing function.

/// Run a production, restoring the saved parser state if it
/// soft fails. The backtracking primitive.
///
/// Variants
///     /1 .parser, .production => bool
macro_rules! attempt {
    ($parser:expr, $production:expr) => {{
        let saved = $parser.save();
        let ok = $production?;

        if !ok
        {
            $parser.restore(saved);
        }

        ok
    }};
}

/// Run a production and restore the saved parser state no
/// matter the outcome, returning whether it matched.
///
/// Variants
///     /1 .parser, .production => bool
macro_rules! peek {
    ($parser:expr, $production:expr) => {{
        let saved = $parser.save();
        let ok = $production?;

        $parser.restore(saved);

        ok
    }};
}

/// Repeat a production while it matches and moves the
/// cursor, refusing zero width iterations. Always true.
///
/// Variants
///     /1 .parser, .production => true
macro_rules! star {
    ($parser:expr, $production:expr) => {{
        loop
        {
            let at = $parser.cursor.pos();
            let saved = $parser.save();
            let ok = $production?;

            if !ok
            {
                $parser.restore(saved);
                break;
            }

            if $parser.cursor.pos() == at
            {
                break;
            }
        }

        true
    }};
}

/// star, but require at least one successful iteration.
///
/// Variants
///     /1 .parser, .production => bool
macro_rules! plus {
    ($parser:expr, $production:expr) => {{
        if attempt!($parser, $production)
        {
            star!($parser, $production)
        }
        else
        {
            false
        }
    }};
}

/// First matching alternative wins; every branch is
/// attempted from the same saved state.
///
/// Variants
///     /1 .parser, .production... => bool
macro_rules! alt {
    ($parser:expr, $( $production:expr ),+ $(,)?) => {{
        let mut ok = false;

        $(
            if !ok
            {
                ok = attempt!($parser, $production);
            }
        )+

        ok
    }};
}

/// Run a production inside a fresh event cache frame. On
/// success the frame is flushed toward the consumer, on
/// soft failure both the frame and the parser state are
/// rolled back.
///
/// Use this around any production that emits events before
/// it can know whether it will complete.
///
/// Variants
///     /1 .parser, .production => bool
macro_rules! framed {
    ($parser:expr, $production:expr) => {{
        let saved = $parser.save();

        $parser.cache.push_frame();

        let ok = $production?;

        if ok
        {
            $parser.flush_top_frame()?;
        }
        else
        {
            $parser.restore(saved);
        }

        ok
    }};
}

/// Check if the char at the cursor is a line break, or the
/// cursor is at EOF
///
/// Variants
///     /1 .parser
macro_rules! isBreakZ {
    ($parser:expr) => {
        matches!($parser.cursor.peek_char(), None | Some('\n') | Some('\r'))
    };
}

/// Check if the char at the cursor is a space or tab
///
/// Variants
///     /1 .parser
macro_rules! isBlank {
    ($parser:expr) => {
        matches!($parser.cursor.peek_char(), Some(' ') | Some('\t'))
    };
}

/// Check if the char at the cursor is a space, tab, line
/// break or if the cursor is at EOF
///
/// Variants
///     /1 .parser
macro_rules! isBlankZ {
    ($parser:expr) => {
        matches!(
            $parser.cursor.peek_char(),
            None | Some(' ') | Some('\t') | Some('\n') | Some('\r')
        )
    };
}
