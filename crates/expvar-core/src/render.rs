//! Whole-registry JSON document.
//!
//! Output shape, one entry per line in name order:
//!
//! ```text
//! {
//! "cmdline": ["srv"],
//! "hits": 3
//! }
//! ```

use std::fmt::{self, Write};

use crate::bucket::{default_bucket, Bucket};
use crate::map::quote;

/// Write the document for `bucket` into `out`. Variables that fail to
/// serialize are omitted; the document stays valid JSON.
pub fn write_json<W: Write>(bucket: &Bucket, out: &mut W) -> fmt::Result {
    out.write_str("{\n")?;
    let mut first = true;
    let mut res = Ok(());
    bucket.do_each(|kv| {
        if res.is_err() {
            return;
        }
        let val = match kv.value.to_json() {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(name = %kv.key, error = %e, "omitting expvar from render");
                return;
            }
        };
        if !first {
            res = out.write_str(",\n");
        }
        first = false;
        if res.is_ok() {
            res = write!(out, "{}: {}", quote(&kv.key), val);
        }
    });
    res?;
    out.write_str("\n}\n")
}

pub fn render(bucket: &Bucket) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_json(bucket, &mut out);
    out
}

/// [`render`] over the default bucket.
pub fn render_default() -> String {
    render(default_bucket())
}
