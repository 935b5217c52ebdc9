//! framereel turns dimension-indexed datasets into animated GIFs.
//!
//! A run slices its input datasets along one named dimension, hands each slice to a frame
//! function, writes the returned frames into a run-unique temporary directory, and compiles the
//! frames into a single artifact.
//!
//! # Pipeline overview
//!
//! 1. **Check**: every dataset carrying the animation dimension must agree on its extent
//! 2. **Plan**: `ceil(extent / stride)` keyframes, frame files zero-padded to the digit count
//! 3. **Render**: index -> frame function -> PNG in the [`FrameStore`], one keyframe at a time
//! 4. **Compile**: decode the PNGs in order and encode a GIF at `1000 / fps` ms per frame
//!
//! The frame store is removed on every exit path, including failures.
//!
//! ```no_run
//! use framereel::{AnimationOpts, Heatmap, LabeledArray, make_animation};
//!
//! let data = LabeledArray::from_fn(["time", "y", "x"], vec![24, 16, 16], |i| {
//!     ((i[0] + i[1] + i[2]) as f64).sin()
//! })?;
//! let stats = make_animation(
//!     &[data],
//!     "out/anim.gif",
//!     Heatmap::default().into_frame_func(),
//!     &AnimationOpts::default(),
//! )?;
//! assert_eq!(stats.keyframes, 24);
//! # Ok::<(), framereel::ReelError>(())
//! ```
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod dataset;
/// Animation compilation.
pub mod encode;
mod foundation;
mod pipeline;
mod render;
mod session;
mod store;

pub use dataset::array::LabeledArray;
pub use dataset::indexable::Indexable;
pub use encode::gif::{AnimationFormat, CompileOpts, compile_animation};
pub use foundation::color::Color;
pub use foundation::core::{Fps, Keyframe, decimal_digits};
pub use foundation::error::{ReelError, ReelResult};
pub use pipeline::check::check_consistency;
pub use pipeline::indexer::{FrameSlice, index_frame};
pub use pipeline::plan::KeyframePlan;
pub use render::adapter::FrameFunc;
pub use render::figure::Figure;
pub use render::frame::{FrameRGBA, RenderableFrame, SaveStyle};
pub use render::heatmap::{Colormap, Heatmap};
pub use session::animate::{AnimationRequest, AnimationStats, make_animation};
pub use session::opts::AnimationOpts;
pub use store::transient::FrameStore;
