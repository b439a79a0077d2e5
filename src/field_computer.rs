// src/field_computer.rs

use std::sync::Arc;

use tracing::{debug, trace};

use crate::array2d::Array2D;
use crate::config::FieldSolverConfig;
use crate::const_arrays::ConstArrays;
use crate::error::ConfigResult;
use crate::fields::{Currents, Fields};
use crate::solvers::longitudinal::{calculate_bz, calculate_ez, calculate_phi};
use crate::solvers::transverse::calculate_ex_ey_bx_by;
use crate::solvers::SliceSources;
use crate::transform::TransformBackend;

/// Per-slice field solver. Holds only immutable run parameters and the transform backend.
pub struct FieldComputer {
    pub grid_step_size: f64,
    pub xi_step_size: f64,
    pub trick: f64,
    pub variant_a: bool,
    backend: Arc<dyn TransformBackend>,
}

impl FieldComputer {
    /// Validates `config` before building the backend, so a bad grid size or step size comes
    /// back as a `ConfigError` instead of a panic or NaN fields.
    pub fn new(config: &FieldSolverConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self::with_backend(
            config.grid_step_size,
            config.xi_step_size,
            config.trick,
            config.variant_a,
            config.transform.build(config.window_width_steps),
        ))
    }

    /// Solver around an already built backend. The caller is responsible for the parameters
    /// being valid for the backend's grid.
    pub fn with_backend(
        grid_step_size: f64,
        xi_step_size: f64,
        trick: f64,
        variant_a: bool,
        backend: Arc<dyn TransformBackend>,
    ) -> Self {
        debug!(
            h = grid_step_size,
            xi_step = xi_step_size,
            trick,
            variant_a,
            backend = backend.name(),
            "field computer ready"
        );
        Self {
            grid_step_size,
            xi_step_size,
            trick,
            variant_a,
            backend,
        }
    }

    pub fn backend(&self) -> &dyn TransformBackend {
        self.backend.as_ref()
    }

    /// Solve one slice.
    ///
    /// - `fields`: previous iteration's averaged estimate at this slice (trick term input)
    /// - `flds_prev`: solution at the previous slice
    /// - `consts`: spectral matrices for this grid and trick
    ///
    /// Returns the new fields and their average with `flds_prev`, which the driver feeds back
    /// as `fields` on the next iteration.
    pub fn compute_fields(
        &self,
        fields: &Fields,
        flds_prev: &Fields,
        consts: &ConstArrays,
        rho_beam_full: &Array2D,
        rho_beam_prev: &Array2D,
        currents_prev: &Currents,
        currents_full: &Currents,
    ) -> (Fields, Fields) {
        trace!(n = currents_full.n(), variant_a = self.variant_a, "compute_fields");

        let sources = SliceSources {
            currents_full,
            currents_prev,
            ro_beam_full: rho_beam_full,
            ro_beam_prev: rho_beam_prev,
        };
        let backend = self.backend();
        let h = self.grid_step_size;

        let (transverse, (ez, (bz, phi))) = rayon::join(
            || {
                calculate_ex_ey_bx_by(
                    backend,
                    h,
                    self.xi_step_size,
                    self.trick,
                    self.variant_a,
                    consts,
                    fields,
                    flds_prev,
                    sources,
                )
            },
            || {
                rayon::join(
                    || calculate_ez(backend, h, consts, currents_full),
                    || {
                        rayon::join(
                            || calculate_bz(backend, h, consts, currents_full),
                            || calculate_phi(backend, consts, currents_full),
                        )
                    },
                )
            },
        );

        let new_flds = Fields {
            ex: transverse.ex,
            ey: transverse.ey,
            ez,
            bx: transverse.bx,
            by: transverse.by,
            bz,
            phi,
        };
        let averaged = new_flds.average(flds_prev);
        (new_flds, averaged)
    }
}
