use std::path::{Path, PathBuf};

use crate::dataset::indexable::Indexable;
use crate::encode::gif::{AnimationFormat, CompileOpts, compile_animation};
use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::check::check_consistency;
use crate::pipeline::indexer::index_frame;
use crate::pipeline::plan::KeyframePlan;
use crate::render::adapter::FrameFunc;
use crate::render::frame::RenderableFrame;
use crate::session::opts::AnimationOpts;
use crate::store::transient::FrameStore;

/// Summary of a successful run.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationStats {
    /// Number of keyframes rendered.
    pub keyframes: usize,
    /// Zero-padding width used for frame file names.
    pub digit_width: usize,
    /// Display time of each frame in milliseconds.
    pub frame_duration_ms: f64,
    /// Artifact path.
    pub output: PathBuf,
}

/// One animation run: inputs, destination, frame function, and options.
pub struct AnimationRequest<'a, D, F> {
    /// Input datasets, in the order the frame function receives them.
    pub datasets: &'a [D],
    /// Destination of the compiled artifact.
    pub out_path: PathBuf,
    /// Frame function invoked once per keyframe.
    pub frame_func: FrameFunc<'a, D, F>,
    /// Run options.
    pub opts: AnimationOpts,
}

impl<'a, D: Indexable, F: RenderableFrame> AnimationRequest<'a, D, F> {
    /// Build a request with default options.
    pub fn new(
        datasets: &'a [D],
        out_path: impl Into<PathBuf>,
        frame_func: FrameFunc<'a, D, F>,
    ) -> Self {
        Self {
            datasets,
            out_path: out_path.into(),
            frame_func,
            opts: AnimationOpts::default(),
        }
    }

    /// Replace the run options.
    pub fn with_opts(mut self, opts: AnimationOpts) -> Self {
        self.opts = opts;
        self
    }

    /// Render every keyframe and compile the artifact.
    ///
    /// Nothing touches the filesystem until the options, frame function arity, and dataset
    /// extents have been checked. Once the frame store is open it is removed on every exit
    /// path; if removal itself fails the run reports [`ReelError::Cleanup`].
    #[tracing::instrument(
        skip(self),
        fields(out = %self.out_path.display(), inputs = self.datasets.len())
    )]
    pub fn run(mut self) -> ReelResult<AnimationStats> {
        self.opts.validate()?;
        if AnimationFormat::from_path(&self.out_path).is_none() {
            return Err(ReelError::validation(format!(
                "unsupported output format '{}' (expected .gif)",
                self.out_path.display()
            )));
        }
        self.frame_func.check_arity(self.datasets.len())?;

        let extent = check_consistency(self.datasets, &self.opts.anim_dim)?;
        let plan = KeyframePlan::new(extent, self.opts.index_stride)?;
        tracing::debug!(
            extent,
            keyframes = plan.n_keyframes,
            digit_width = plan.digit_width,
            "planned keyframes"
        );

        let mut store = FrameStore::open(&self.out_path, plan.digit_width)?;
        let outcome = self.render_and_compile(&plan, &mut store);
        let cleanup = store.close();

        match (outcome, cleanup) {
            (Ok(stats), Ok(())) => Ok(stats),
            (Err(e), Ok(())) => Err(e),
            (Ok(_), Err(leak)) => Err(leak),
            (Err(e), Err(ReelError::Cleanup { dir, source, .. })) => Err(ReelError::Cleanup {
                dir,
                source,
                primary: Some(Box::new(e)),
            }),
            (Err(e), Err(other)) => {
                tracing::warn!(error = %other, "unexpected frame store close error");
                Err(e)
            }
        }
    }

    fn render_and_compile(
        &mut self,
        plan: &KeyframePlan,
        store: &mut FrameStore,
    ) -> ReelResult<AnimationStats> {
        let style = self.opts.save_style();
        for keyframe in plan.keyframes() {
            let slice = index_frame(self.datasets, keyframe, plan.stride, &self.opts.anim_dim)?;
            let frame = self.frame_func.render(&slice)?;
            store.persist(keyframe, frame, &style)?;

            let percent = plan.progress_percent(keyframe);
            if self.opts.verbose {
                tracing::info!(
                    keyframe = keyframe.0,
                    total = plan.n_keyframes,
                    percent,
                    "rendered keyframe"
                );
            } else {
                tracing::debug!(
                    keyframe = keyframe.0,
                    total = plan.n_keyframes,
                    percent,
                    "rendered keyframe"
                );
            }
        }

        let compile = CompileOpts {
            fps: self.opts.fps,
            loop_count: self.opts.loop_count,
        };
        compile_animation(store.files(), &self.out_path, compile)?;

        Ok(AnimationStats {
            keyframes: plan.n_keyframes,
            digit_width: plan.digit_width,
            frame_duration_ms: self.opts.fps.frame_duration_ms(),
            output: self.out_path.clone(),
        })
    }
}

/// Render `datasets` frame by frame with `frame_func` and compile the frames into `out_path`.
///
/// Shorthand for [`AnimationRequest::run`].
pub fn make_animation<'a, D: Indexable, F: RenderableFrame>(
    datasets: &'a [D],
    out_path: impl AsRef<Path>,
    frame_func: FrameFunc<'a, D, F>,
    opts: &AnimationOpts,
) -> ReelResult<AnimationStats> {
    AnimationRequest::new(datasets, out_path.as_ref(), frame_func)
        .with_opts(opts.clone())
        .run()
}

#[cfg(test)]
#[path = "../../tests/unit/session/animate.rs"]
mod tests;
