// Report output: HTML page rendering, HTML-to-PDF conversion, file serving.
// One browser process per request; generated files are append-only in the reports dir.

pub mod handlers;
pub mod html;
pub mod pdf;

pub use pdf::{ChromiumRenderer, PdfRenderer};
