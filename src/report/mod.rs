pub mod classifier;
pub mod console;
pub mod shape;

pub use classifier::{classify, render_compact, render_report, report, Verdict};
pub use shape::BodyShape;
