//! Output formats for parsed documents
//!
//! - treeviz: one line per node, for reading
//! - json: the full document including positions and corrected raws

pub mod json;
pub mod registry;
pub mod treeviz;

pub use json::{to_json_str, JsonFormatter};
pub use registry::{FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, to_treeviz_str_with_params, TreevizFormatter};
