// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! The character-scanning engine.
//!
//! A [`CharString`] is one loop shared by every string kind, parameterized by
//! four hooks, plus a `resolve` step that turns the context into the
//! parameters of one parse (see [`ScanHooks`]):
//!
//! - **get_next** reads the next character, or returns [`Step::Stop`] when the
//!   end of input is an acceptable end of the string
//! - **keep_going** decides, from what has been read so far, whether to read more
//! - **post_process** turns the accumulated characters into the final value
//! - **build** writes a value back out
//!
//! New kinds of strings are new hook sets (see [`fixed_length`] and
//! [`terminated`]), never new loop implementations.
//!
//! [`fixed_length`]: super::fixed::fixed_length
//! [`terminated`]: super::terminated::terminated

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::core::{CharwiseError, Context, Result, Value};
use crate::encoding::Codec;
use crate::field::Field;
use crate::io::{ByteSink, ByteSource, SliceSource};

/// Outcome of one `get_next` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// A decoded character
    Char(char),
    /// End the scan here without an error
    Stop,
}

/// Characters read so far during one parse.
///
/// Lives only for the duration of a single [`CharString::parse`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulator {
    text: String,
    chars: usize,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, ch: char) {
        self.text.push(ch);
        self.chars += 1;
    }

    /// Number of characters (not bytes) accumulated.
    pub fn char_count(&self) -> usize {
        self.chars
    }

    pub fn is_empty(&self) -> bool {
        self.chars == 0
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        self.text.ends_with(suffix)
    }

    /// Drop `suffix` from the end if present. Returns whether it was removed.
    pub fn strip_suffix(&mut self, suffix: &str) -> bool {
        if suffix.is_empty() || !self.text.ends_with(suffix) {
            return false;
        }
        self.text.truncate(self.text.len() - suffix.len());
        self.chars -= suffix.chars().count();
        true
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

/// Resolves the parse parameters from the context, once per parse.
pub type Resolve<P> = Box<dyn Fn(&Context) -> Result<P> + Send + Sync>;
/// Reads the next character or signals a stop.
pub type CharGetter<P> =
    Box<dyn Fn(&Codec, &mut dyn ByteSource, &P, &str) -> Result<Step> + Send + Sync>;
/// Decides whether the scan continues.
pub type KeepGoing<P> = Box<dyn Fn(&Accumulator, &P) -> Result<bool> + Send + Sync>;
/// Produces the parsed value from the accumulated characters.
pub type PostProcess<P> = Box<dyn Fn(Accumulator, &P) -> Result<String> + Send + Sync>;
/// Writes a value, returning the bytes written.
pub type Builder =
    Box<dyn Fn(&Codec, &str, &mut dyn ByteSink, &Context, &str) -> Result<Vec<u8>> + Send + Sync>;
/// Static byte size of the string, when it has one.
pub type StaticSize = Box<dyn Fn(&Codec, &Context, &str) -> Result<usize> + Send + Sync>;

/// The hooks of one string kind.
///
/// `P` holds the parameters a parse needs (a length, a terminator). They are
/// produced by `resolve` at the start of every parse and handed to the
/// scanning hooks, so the context is consulted once per parse rather than
/// once per character. `build` and `static_size` see the context directly.
pub struct ScanHooks<P> {
    resolve: Resolve<P>,
    get_next: CharGetter<P>,
    keep_going: KeepGoing<P>,
    post_process: PostProcess<P>,
    builder: Builder,
    static_size: Option<StaticSize>,
}

impl<P> ScanHooks<P> {
    pub fn new<R, G, K, F, B>(
        resolve: R,
        get_next: G,
        keep_going: K,
        post_process: F,
        builder: B,
    ) -> Self
    where
        R: Fn(&Context) -> Result<P> + Send + Sync + 'static,
        G: Fn(&Codec, &mut dyn ByteSource, &P, &str) -> Result<Step> + Send + Sync + 'static,
        K: Fn(&Accumulator, &P) -> Result<bool> + Send + Sync + 'static,
        F: Fn(Accumulator, &P) -> Result<String> + Send + Sync + 'static,
        B: Fn(&Codec, &str, &mut dyn ByteSink, &Context, &str) -> Result<Vec<u8>>
            + Send
            + Sync
            + 'static,
    {
        Self {
            resolve: Box::new(resolve),
            get_next: Box::new(get_next),
            keep_going: Box::new(keep_going),
            post_process: Box::new(post_process),
            builder: Box::new(builder),
            static_size: None,
        }
    }

    /// Attach a static size computation.
    pub fn with_static_size<S>(mut self, static_size: S) -> Self
    where
        S: Fn(&Codec, &Context, &str) -> Result<usize> + Send + Sync + 'static,
    {
        self.static_size = Some(Box::new(static_size));
        self
    }
}

/// Type-erased view of [`ScanHooks`], so string kinds with different
/// parameters share one [`CharString`] type.
trait Scan: Send + Sync {
    fn parse(&self, codec: &Codec, src: &mut dyn ByteSource, ctx: &Context, path: &str)
        -> Result<String>;

    fn build(
        &self,
        codec: &Codec,
        value: &str,
        sink: &mut dyn ByteSink,
        ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>>;

    fn static_size(&self, codec: &Codec, ctx: &Context, path: &str) -> Result<usize>;

    fn is_sized(&self) -> bool;
}

impl<P> Scan for ScanHooks<P> {
    fn parse(
        &self,
        codec: &Codec,
        src: &mut dyn ByteSource,
        ctx: &Context,
        path: &str,
    ) -> Result<String> {
        let params = (self.resolve)(ctx)?;
        let start = src.position();
        let mut acc = Accumulator::new();

        while (self.keep_going)(&acc, &params)? {
            match (self.get_next)(codec, &mut *src, &params, path)? {
                Step::Char(ch) => acc.push(ch),
                Step::Stop => {
                    trace!("{}: input ended after {} characters", path, acc.char_count());
                    break;
                }
            }
        }

        // A zero-length match would let a retrying caller spin on the same position
        if acc.is_empty() {
            return Err(CharwiseError::empty_match(path));
        }

        let value = (self.post_process)(acc, &params)?;
        trace!(
            "{}: parsed {:?} from bytes {}..{}",
            path,
            value,
            start,
            src.position()
        );
        Ok(value)
    }

    fn build(
        &self,
        codec: &Codec,
        value: &str,
        sink: &mut dyn ByteSink,
        ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>> {
        (self.builder)(codec, value, sink, ctx, path)
    }

    fn static_size(&self, codec: &Codec, ctx: &Context, path: &str) -> Result<usize> {
        match &self.static_size {
            Some(f) => f(codec, ctx, path),
            None => Err(CharwiseError::size_unknown(path)),
        }
    }

    fn is_sized(&self) -> bool {
        self.static_size.is_some()
    }
}

/// Immutable string specification: a codec plus scanning hooks.
///
/// Holds no per-parse state, so one instance can be shared (and cloned
/// cheaply) across any number of concurrent parses.
#[derive(Clone)]
pub struct CharString {
    codec: Arc<Codec>,
    hooks: Arc<dyn Scan>,
}

impl CharString {
    /// Assemble a specification from a codec and its hooks.
    pub fn new<P: 'static>(codec: Arc<Codec>, hooks: ScanHooks<P>) -> Self {
        Self {
            codec,
            hooks: Arc::new(hooks),
        }
    }

    pub fn codec(&self) -> &Arc<Codec> {
        &self.codec
    }

    /// Scan characters from `src` until the hooks say stop.
    ///
    /// # Errors
    ///
    /// - Any error from resolving the parameters or from `get_next`
    ///   (underrun, decoding) is returned as is
    /// - [`CharwiseError::EmptyMatch`] if the scan ends with no characters
    pub fn parse(&self, src: &mut dyn ByteSource, ctx: &Context, path: &str) -> Result<String> {
        self.hooks.parse(self.codec.as_ref(), src, ctx, path)
    }

    /// Encode `value` into `sink`, returning the bytes written.
    pub fn build(
        &self,
        value: &str,
        sink: &mut dyn ByteSink,
        ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>> {
        self.hooks.build(self.codec.as_ref(), value, sink, ctx, path)
    }

    /// Byte size of the string when it can be known without data.
    ///
    /// # Errors
    ///
    /// Returns [`CharwiseError::SizeUnknown`] when the string kind has no
    /// static size, or the codec's width error for variable-width codecs.
    pub fn static_size(&self, ctx: &Context, path: &str) -> Result<usize> {
        self.hooks.static_size(self.codec.as_ref(), ctx, path)
    }

    /// Parse from a byte slice with an empty context.
    pub fn parse_bytes(&self, data: &[u8]) -> Result<String> {
        self.parse(&mut SliceSource::new(data), &Context::new(), "(parsing)")
    }

    /// Build into a fresh buffer with an empty context.
    pub fn build_bytes(&self, value: &str) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        self.build(value, &mut out, &Context::new(), "(building)")?;
        Ok(out)
    }
}

impl fmt::Debug for CharString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CharString")
            .field("codec", &self.codec.name())
            .field("sized", &self.hooks.is_sized())
            .finish_non_exhaustive()
    }
}

impl Field for CharString {
    fn parse(&self, src: &mut dyn ByteSource, ctx: &Context, path: &str) -> Result<Value> {
        CharString::parse(self, src, ctx, path).map(Value::String)
    }

    fn build(
        &self,
        value: &Value,
        sink: &mut dyn ByteSink,
        ctx: &Context,
        path: &str,
    ) -> Result<Vec<u8>> {
        let text = value
            .as_str()
            .ok_or_else(|| CharwiseError::context_type(path, "string", value.type_name()))?;
        CharString::build(self, text, sink, ctx, path)
    }

    fn static_size(&self, ctx: &Context, path: &str) -> Result<usize> {
        CharString::static_size(self, ctx, path)
    }
}

/// Encode every character and write them with a single sink call.
///
/// Nothing is written if any character fails to encode.
pub fn encode_all(
    codec: &Codec,
    chars: impl Iterator<Item = char>,
    sink: &mut dyn ByteSink,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    for ch in chars {
        out.extend(codec.encode(ch)?);
    }
    sink.write_bytes(&out)?;
    Ok(out)
}
