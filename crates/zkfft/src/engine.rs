//! The public transform engine.
//!
//! An [`FftEngine`] owns the shared root table, the worker pool and the
//! configuration. Buffers at least `parallel_threshold` long run on the pool
//! with parallel butterflies; shorter ones run on the calling thread. After
//! [`FftEngine::close`] every call fails with [`FftError::EngineClosed`].

use std::sync::Arc;

use ark_ec::short_weierstrass::SWCurveConfig;
use tracing::info;

use crate::config::EngineConfig;
use crate::coords::{PointBuffer, Repr};
use crate::error::{FftError, Result};
use crate::executor::{ParallelExecutor, TaskHandle};
use crate::group::group_transform;
use crate::roots::RootTable;
use crate::transform::{
    coset_forward_in_place, coset_inverse_in_place, log2_len, transform_in_place, Direction,
    TransformOptions,
};
use crate::FieldDomain;

/// FFT/IFFT engine over the scalar field `F` and any curve whose scalar field is `F`.
#[derive(Debug)]
pub struct FftEngine<F: FieldDomain> {
    roots: Arc<RootTable<F>>,
    executor: ParallelExecutor,
    config: EngineConfig,
}

impl<F: FieldDomain> FftEngine<F> {
    /// Start the pool and warm the root table.
    pub fn new(config: EngineConfig) -> Result<Self> {
        let executor = ParallelExecutor::new(config.threads)?;
        let roots = Arc::new(RootTable::new());
        roots.warm_up(config.warm_up_order)?;
        info!(
            two_adicity = F::two_adicity(),
            warmed = roots.populated(),
            threads = executor.threads(),
            parallel_threshold = config.parallel_threshold,
            "fft engine started"
        );
        Ok(Self {
            roots,
            executor,
            config,
        })
    }

    /// Engine with [`EngineConfig::default`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(EngineConfig::default())
    }

    /// Shared root table.
    #[must_use]
    pub fn roots(&self) -> &RootTable<F> {
        &self.roots
    }

    /// Construction-time configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Release the worker pool. Idempotent.
    pub fn close(&self) {
        if self.executor.close() {
            info!("fft engine closed");
        }
    }

    /// Whether [`FftEngine::close`] has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.executor.is_closed()
    }

    /// Per-call options win; otherwise the engine-wide `max_order` applies.
    fn resolve(&self, opts: TransformOptions) -> TransformOptions {
        if opts.max_order.is_some() {
            opts
        } else {
            TransformOptions {
                max_order: self.config.max_order,
            }
        }
    }

    fn is_large(&self, len: usize) -> bool {
        len >= self.config.parallel_threshold
    }

    /// Run `op(parallel)` on the pool for large buffers, inline otherwise.
    fn run<R, OP>(&self, len: usize, op: OP) -> Result<R>
    where
        R: Send,
        OP: FnOnce(bool) -> Result<R> + Send,
    {
        if self.is_large(len) {
            return self.executor.install(|| op(true))?;
        }
        if self.is_closed() {
            return Err(FftError::EngineClosed);
        }
        op(false)
    }

    /// Transform `values` in place.
    pub fn transform_field(
        &self,
        values: &mut [F],
        direction: Direction,
        opts: TransformOptions,
    ) -> Result<()> {
        let opts = self.resolve(opts);
        let roots = &*self.roots;
        self.run(values.len(), |parallel| {
            transform_in_place(roots, values, direction, opts, parallel)
        })
    }

    /// Evaluations of `values` (as coefficients) at the `N`-th roots of unity, natural order.
    pub fn forward_field(&self, values: &[F]) -> Result<Vec<F>> {
        let mut out = values.to_vec();
        self.transform_field(&mut out, Direction::Forward, TransformOptions::default())?;
        Ok(out)
    }

    /// Exact inverse of [`FftEngine::forward_field`].
    pub fn inverse_field(&self, values: &[F]) -> Result<Vec<F>> {
        let mut out = values.to_vec();
        self.transform_field(&mut out, Direction::Inverse, TransformOptions::default())?;
        Ok(out)
    }

    /// Evaluations on the coset `shift·H`.
    pub fn coset_forward_field(&self, values: &[F], shift: F) -> Result<Vec<F>> {
        let mut out = values.to_vec();
        let opts = self.resolve(TransformOptions::default());
        let roots = &*self.roots;
        self.run(out.len(), |parallel| {
            coset_forward_in_place(roots, &mut out, shift, opts, parallel)
        })?;
        Ok(out)
    }

    /// Coefficients from evaluations on the coset `shift·H`.
    pub fn coset_inverse_field(&self, values: &[F], shift: F) -> Result<Vec<F>> {
        let mut out = values.to_vec();
        let opts = self.resolve(TransformOptions::default());
        let roots = &*self.roots;
        self.run(out.len(), |parallel| {
            coset_inverse_in_place(roots, &mut out, shift, opts, parallel)
        })?;
        Ok(out)
    }

    /// Transform a point buffer; the input representation is the buffer's variant.
    pub fn transform_group<P>(
        &self,
        points: PointBuffer<P>,
        direction: Direction,
        out: Repr,
        opts: TransformOptions,
    ) -> Result<PointBuffer<P>>
    where
        P: SWCurveConfig<ScalarField = F>,
    {
        let opts = self.resolve(opts);
        let validate = self.config.validate_points;
        let roots = &*self.roots;
        self.run(points.len(), move |parallel| {
            group_transform(roots, points, direction, out, opts, parallel, validate)
        })
    }

    /// Forward group transform, output in `out`.
    pub fn forward_group<P>(&self, points: PointBuffer<P>, out: Repr) -> Result<PointBuffer<P>>
    where
        P: SWCurveConfig<ScalarField = F>,
    {
        self.transform_group(points, Direction::Forward, out, TransformOptions::default())
    }

    /// Inverse group transform, output in `out`.
    pub fn inverse_group<P>(&self, points: PointBuffer<P>, out: Repr) -> Result<PointBuffer<P>>
    where
        P: SWCurveConfig<ScalarField = F>,
    {
        self.transform_group(points, Direction::Inverse, out, TransformOptions::default())
    }

    /// Submit a field transform to the pool and return its handle.
    ///
    /// The length is checked up front so malformed input fails here rather
    /// than through the handle.
    pub fn spawn_field(
        &self,
        mut values: Vec<F>,
        direction: Direction,
        opts: TransformOptions,
    ) -> Result<TaskHandle<Vec<F>>> {
        log2_len(values.len())?;
        let opts = self.resolve(opts);
        let parallel = self.is_large(values.len());
        let roots = Arc::clone(&self.roots);
        self.executor.spawn(move || {
            transform_in_place(&roots, &mut values, direction, opts, parallel)?;
            Ok(values)
        })
    }

    /// Submit a group transform to the pool and return its handle.
    pub fn spawn_group<P>(
        &self,
        points: PointBuffer<P>,
        direction: Direction,
        out: Repr,
        opts: TransformOptions,
    ) -> Result<TaskHandle<PointBuffer<P>>>
    where
        P: SWCurveConfig<ScalarField = F>,
    {
        log2_len(points.len())?;
        let opts = self.resolve(opts);
        let parallel = self.is_large(points.len());
        let validate = self.config.validate_points;
        let roots = Arc::clone(&self.roots);
        self.executor.spawn(move || {
            group_transform(&roots, points, direction, out, opts, parallel, validate)
        })
    }
}
