/// Configuration options for the decoder.
///
/// These options control how permissive the engine is with documents that
/// are well-formed JSON but stretch the protocol: batches, enumerant codes
/// from newer protocol versions, and deep nesting.
///
/// # Examples
///
/// ```rust
/// use lspbind::{DecoderOptions, MessageReader};
///
/// let options = DecoderOptions {
///     allow_batches: true,
///     max_depth: Some(64),
///     ..Default::default()
/// };
/// let reader = MessageReader::new(options);
/// ```
///
/// # Default
///
/// All flags default to `false` and there is no depth limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderOptions {
    /// Whether a top-level array is a batch of independent values.
    ///
    /// When `true`, each element of a top-level array is decoded and reported
    /// on its own, as JSON-RPC 2.0 batches require. A failure in one element
    /// does not affect its siblings. When `false`, a top-level array is
    /// handed to the root binder like any other value.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_batches: bool,

    /// Whether unknown codes inside enumerant arrays are dropped.
    ///
    /// Capability value sets (for example the completion item kinds a client
    /// supports) may contain codes defined by a newer protocol version. When
    /// `true`, such elements are skipped instead of failing the record.
    /// Unknown codes in scalar enumerant fields always fail.
    ///
    /// # Default
    ///
    /// `false`
    pub skip_unknown_enumerants_in_arrays: bool,

    /// Maximum number of simultaneously open containers, the top-level one
    /// included.
    ///
    /// # Default
    ///
    /// `None` (unlimited)
    pub max_depth: Option<usize>,
}
