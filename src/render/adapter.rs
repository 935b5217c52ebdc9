use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::indexer::FrameSlice;
use crate::render::frame::RenderableFrame;

type SingleFn<'a, D, F> = Box<dyn FnMut(&D) -> anyhow::Result<F> + 'a>;
type MultiFn<'a, D, F> = Box<dyn FnMut(&[D]) -> anyhow::Result<F> + 'a>;

/// Caller-supplied frame function, invoked once per keyframe.
///
/// `Single` receives the one reduced dataset of a single-input run. `Multi` receives every
/// reduced (or broadcast) dataset positionally, in input order.
pub enum FrameFunc<'a, D, F> {
    /// Frame function over exactly one dataset.
    Single(SingleFn<'a, D, F>),
    /// Frame function over all datasets.
    Multi(MultiFn<'a, D, F>),
}

impl<'a, D, F: RenderableFrame> FrameFunc<'a, D, F> {
    /// Wrap a single-dataset frame function.
    pub fn single(f: impl FnMut(&D) -> anyhow::Result<F> + 'a) -> Self {
        Self::Single(Box::new(f))
    }

    /// Wrap a multi-dataset frame function.
    pub fn multi(f: impl FnMut(&[D]) -> anyhow::Result<F> + 'a) -> Self {
        Self::Multi(Box::new(f))
    }

    /// Check that this frame function can be called with `n_inputs` datasets.
    pub fn check_arity(&self, n_inputs: usize) -> ReelResult<()> {
        match self {
            Self::Single(_) if n_inputs != 1 => Err(ReelError::contract(format!(
                "single-dataset frame function cannot take {n_inputs} datasets; use FrameFunc::multi"
            ))),
            _ => Ok(()),
        }
    }

    /// Invoke the frame function for one keyframe and check that its output is renderable.
    pub fn render(&mut self, slice: &FrameSlice<D>) -> ReelResult<F> {
        let keyframe = slice.keyframe.0;
        let out = match self {
            Self::Single(f) => {
                let [one] = slice.as_slice() else {
                    return Err(ReelError::contract(format!(
                        "single-dataset frame function got {} slices at keyframe {keyframe}",
                        slice.slices.len()
                    )));
                };
                f(one)
            }
            Self::Multi(f) => f(slice.as_slice()),
        };
        let frame = out.map_err(|source| ReelError::Render { keyframe, source })?;

        frame.validate().map_err(|e| match e {
            ReelError::ContractViolation(msg) => {
                ReelError::contract(format!("keyframe {keyframe}: {msg}"))
            }
            other => ReelError::contract(format!("keyframe {keyframe}: {other}")),
        })?;
        Ok(frame)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/adapter.rs"]
mod tests;
