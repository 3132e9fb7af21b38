//! Configuration options for article cleaning.

/// Configuration switches consumed by the cleaning pipeline.
///
/// Each switch independently gates extraction vs. outright removal: when a
/// switch is off, the matching markup is still deleted from the tree, but no
/// data is collected and the record field stays `None`.
///
/// # Example
///
/// ```rust
/// use wikiharvest::Options;
///
/// let options = Options {
///     keep_infobox: true,
///     ..Options::default()
/// };
/// assert!(!options.keep_images);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    /// Collect image source/alt/caption records.
    ///
    /// Default: `false`
    pub keep_images: bool,

    /// Collect the key/value infobox mapping.
    ///
    /// Default: `false`
    pub keep_infobox: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_retain_nothing() {
        let opts = Options::default();
        assert!(!opts.keep_images);
        assert!(!opts.keep_infobox);
    }
}
