//! Config emitter: render validated redirects as `netlify.toml` stanzas.

mod write;

pub use write::write_atomic;

use std::fmt::Write as _;

use crate::row::Redirect;

/// Render one `[[redirects]]` stanza per redirect, in order, each followed by a
/// blank line. Values are interpolated verbatim.
pub fn render(redirects: &[Redirect]) -> String {
    let mut out = String::new();
    for r in redirects {
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "[[redirects]]\n  from = \"{}\"\n  to = \"{}\"\n  status = {}\n\n",
            r.from, r.to, r.status
        );
    }
    out
}
